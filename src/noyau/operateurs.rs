// src/noyau/operateurs.rs
//
// Table statique des opérateurs
// -----------------------------
// précédence / associativité / arité / postfixe / application.
// Lecture seule pendant toute la vie du programme.

use super::erreur::{fini, ErreurCalcul};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,
    MoinsUnaire, // u-
    Factorielle, // ! postfixe
}

pub struct DescripteurOp {
    pub symbole: &'static str,
    pub precedence: u8,
    pub assoc: Assoc,
    pub arite: usize,
    pub postfixe: bool,
    pub appliquer: fn(&[f64]) -> Result<f64, ErreurCalcul>,
}

// Même ordre que l’enum Op (indexé par `op as usize`).
static OPERATEURS: [DescripteurOp; 8] = [
    DescripteurOp {
        symbole: "+",
        precedence: 2,
        assoc: Assoc::Gauche,
        arite: 2,
        postfixe: false,
        appliquer: |a| fini(a[0] + a[1], "+"),
    },
    DescripteurOp {
        symbole: "-",
        precedence: 2,
        assoc: Assoc::Gauche,
        arite: 2,
        postfixe: false,
        appliquer: |a| fini(a[0] - a[1], "-"),
    },
    DescripteurOp {
        symbole: "*",
        precedence: 3,
        assoc: Assoc::Gauche,
        arite: 2,
        postfixe: false,
        appliquer: |a| fini(a[0] * a[1], "*"),
    },
    DescripteurOp {
        symbole: "/",
        precedence: 3,
        assoc: Assoc::Gauche,
        arite: 2,
        postfixe: false,
        appliquer: divise,
    },
    DescripteurOp {
        symbole: "%",
        precedence: 3,
        assoc: Assoc::Gauche,
        arite: 2,
        postfixe: false,
        appliquer: modulo,
    },
    DescripteurOp {
        symbole: "^",
        precedence: 4,
        assoc: Assoc::Droite,
        arite: 2,
        postfixe: false,
        appliquer: |a| fini(a[0].powf(a[1]), "^"),
    },
    DescripteurOp {
        symbole: "u-",
        precedence: 5,
        assoc: Assoc::Droite,
        arite: 1,
        postfixe: false,
        appliquer: |a| fini(-a[0], "u-"),
    },
    DescripteurOp {
        symbole: "!",
        precedence: 6,
        assoc: Assoc::Gauche,
        arite: 1,
        postfixe: true,
        appliquer: |a| factorielle(a[0]),
    },
];

impl Op {
    pub fn descripteur(self) -> &'static DescripteurOp {
        &OPERATEURS[self as usize]
    }

    pub fn precedence(self) -> u8 {
        self.descripteur().precedence
    }

    pub fn arite(self) -> usize {
        self.descripteur().arite
    }

    pub fn symbole(self) -> &'static str {
        self.descripteur().symbole
    }

    /// Règle shunting-yard : `top` (sommet de pile) doit-il sortir avant `self` ?
    pub fn cede_a(self, top: Op) -> bool {
        let (p_top, p_new) = (top.precedence(), self.precedence());
        p_top > p_new || (p_top == p_new && self.descripteur().assoc == Assoc::Gauche)
    }

    /// Applique l’opérateur ; `operandes.len()` doit valoir `arite()`.
    pub fn appliquer(self, operandes: &[f64]) -> Result<f64, ErreurCalcul> {
        debug_assert_eq!(operandes.len(), self.arite());
        (self.descripteur().appliquer)(operandes)
    }
}

fn divise(a: &[f64]) -> Result<f64, ErreurCalcul> {
    if a[1] == 0.0 {
        return Err(ErreurCalcul::domaine("division par zéro"));
    }
    fini(a[0] / a[1], "/")
}

/// Reste tronqué (signe du dividende), comme `%` sur les flottants.
fn modulo(a: &[f64]) -> Result<f64, ErreurCalcul> {
    if a[1] == 0.0 {
        return Err(ErreurCalcul::domaine("modulo par zéro"));
    }
    fini(a[0] % a[1], "%")
}

/// n! pour n entier ≥ 0 (171! dépasse f64 => erreur de domaine).
pub fn factorielle(n: f64) -> Result<f64, ErreurCalcul> {
    if !n.is_finite() || n < 0.0 {
        return Err(ErreurCalcul::domaine("factorielle d’un nombre négatif"));
    }
    if n.fract() != 0.0 {
        return Err(ErreurCalcul::domaine("factorielle d’un non-entier"));
    }

    let mut r = 1.0_f64;
    let mut i = 2.0_f64;
    while i <= n {
        r *= i;
        if !r.is_finite() {
            break;
        }
        i += 1.0;
    }
    fini(r, "!")
}
