//! Noyau de calcul scientifique (flottant)
//!
//! Organisation interne :
//! - erreur.rs     : erreurs typées (Lex / Syntaxe / Eval / Domaine)
//! - jetons.rs     : tokenisation
//! - operateurs.rs : table des opérateurs (précédence, associativité, arité)
//! - fonctions.rs  : registres fonctions + constantes, nPr / nCr
//! - trig.rs       : mode d’angle + angles spéciaux
//! - rpn.rs        : shunting-yard -> programme RPN
//! - eval.rs       : pile d’évaluation + pipeline complet
//! - format.rs     : affichage d’un résultat

pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod operateurs;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErreurCalcul, TypeErreur};
pub use eval::{compiler, eval_expression, evaluate, Contexte, DemarcheNoyau};
pub use format::format_resultat;
pub use rpn::ProgrammeRpn;
pub use trig::ModeAngle;
