//! Calculatrice scientifique — noyau d’évaluation.
//!
//! `evaluate("2+3*4", ModeAngle::Degres, ans)` : texte -> jetons -> RPN -> f64.
//! L’interface egui (binaire) ne fait qu’appeler ce noyau.

pub mod noyau;

pub use noyau::{evaluate, Contexte, ErreurCalcul, ModeAngle, TypeErreur};
