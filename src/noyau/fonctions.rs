// src/noyau/fonctions.rs
//
// Registres : fonctions nommées + constantes
// ------------------------------------------
// - Fonctions : nom -> (arité, application), paramétrées par le mode d’angle
//   (seules les entrées trig le lisent).
// - Constantes : pi, e fixes ; Ans lue dans le contexte de l’appelant.
// - nPr / nCr : fonctions ordinaires à 2 arguments, calcul entier exact
//   (BigUint) puis conversion f64.

use num_bigint::BigUint;
use num_traits::{FromPrimitive, One, ToPrimitive};

use super::erreur::{fini, ErreurCalcul};
use super::trig::{trig, trig_inverse, ModeAngle, TrigFn, TrigInvFn};

pub struct DescripteurFonction {
    pub nom: &'static str,
    pub arite: usize,
    pub appliquer: fn(&[f64], ModeAngle) -> Result<f64, ErreurCalcul>,
}

static FONCTIONS: &[DescripteurFonction] = &[
    DescripteurFonction {
        nom: "sin",
        arite: 1,
        appliquer: |a, m| trig(TrigFn::Sin, a[0], m),
    },
    DescripteurFonction {
        nom: "cos",
        arite: 1,
        appliquer: |a, m| trig(TrigFn::Cos, a[0], m),
    },
    DescripteurFonction {
        nom: "tan",
        arite: 1,
        appliquer: |a, m| trig(TrigFn::Tan, a[0], m),
    },
    DescripteurFonction {
        nom: "asin",
        arite: 1,
        appliquer: |a, m| trig_inverse(TrigInvFn::Asin, a[0], m),
    },
    DescripteurFonction {
        nom: "acos",
        arite: 1,
        appliquer: |a, m| trig_inverse(TrigInvFn::Acos, a[0], m),
    },
    DescripteurFonction {
        nom: "atan",
        arite: 1,
        appliquer: |a, m| trig_inverse(TrigInvFn::Atan, a[0], m),
    },
    DescripteurFonction {
        nom: "log",
        arite: 1,
        appliquer: |a, _| fini(a[0].log10(), "log"),
    },
    DescripteurFonction {
        nom: "ln",
        arite: 1,
        appliquer: |a, _| fini(a[0].ln(), "ln"),
    },
    DescripteurFonction {
        nom: "sqrt",
        arite: 1,
        appliquer: |a, _| fini(a[0].sqrt(), "sqrt"),
    },
    DescripteurFonction {
        nom: "exp",
        arite: 1,
        appliquer: |a, _| fini(a[0].exp(), "exp"),
    },
    DescripteurFonction {
        nom: "abs",
        arite: 1,
        appliquer: |a, _| fini(a[0].abs(), "abs"),
    },
    DescripteurFonction {
        nom: "nPr",
        arite: 2,
        appliquer: |a, _| n_p_r(a[0], a[1]),
    },
    DescripteurFonction {
        nom: "nCr",
        arite: 2,
        appliquer: |a, _| n_c_r(a[0], a[1]),
    },
];

pub fn fonction(nom: &str) -> Option<&'static DescripteurFonction> {
    FONCTIONS.iter().find(|f| f.nom == nom)
}

/// Noms connus (pour l’UI : touches + backspace “intelligent”).
pub fn noms_fonctions() -> impl Iterator<Item = &'static str> {
    FONCTIONS.iter().map(|f| f.nom)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constante {
    Fixe(f64),
    DerniereReponse, // Ans
}

pub fn constante(nom: &str) -> Option<Constante> {
    match nom {
        "pi" => Some(Constante::Fixe(std::f64::consts::PI)),
        "e" => Some(Constante::Fixe(std::f64::consts::E)),
        "Ans" => Some(Constante::DerniereReponse),
        _ => None,
    }
}

impl Constante {
    pub fn valeur(self, ans: f64) -> f64 {
        match self {
            Constante::Fixe(v) => v,
            Constante::DerniereReponse => ans,
        }
    }
}

/* ------------------------ Combinatoire ------------------------ */

/// nPr ≥ r! : au-delà de 170, le résultat dépasse f64 de toute façon.
const NPR_R_MAX: u64 = 170;

/// nCr(n, k) ≥ C(2k, k) ~ 4^k : au-delà de k = 1100 (k = min(r, n-r)),
/// le résultat dépasse f64.
const NCR_K_MAX: u64 = 1100;

/// Valide (n, r) : entiers finis, 0 ≤ r ≤ n. Conversion exacte (n peut dépasser u64).
fn arguments_combinatoires(
    n: f64,
    r: f64,
    nom: &str,
) -> Result<(BigUint, BigUint), ErreurCalcul> {
    if !n.is_finite() || !r.is_finite() {
        return Err(ErreurCalcul::domaine(format!("{nom}: arguments non finis")));
    }
    if n.fract() != 0.0 || r.fract() != 0.0 {
        return Err(ErreurCalcul::domaine(format!("{nom}: arguments non entiers")));
    }
    if n < 0.0 || r < 0.0 || r > n {
        return Err(ErreurCalcul::domaine(format!("{nom}: il faut 0 ≤ r ≤ n")));
    }
    let entier = |x: f64| {
        BigUint::from_f64(x)
            .ok_or_else(|| ErreurCalcul::domaine(format!("{nom}: argument invalide")))
    };
    Ok((entier(n)?, entier(r)?))
}

/// Borne de boucle : k ≤ `max`, sinon le résultat dépasse f64.
fn borne(k: &BigUint, max: u64, nom: &str) -> Result<u64, ErreurCalcul> {
    match k.to_u64() {
        Some(k) if k <= max => Ok(k),
        _ => Err(ErreurCalcul::domaine(format!("{nom}: dépassement"))),
    }
}

/// Produit descendant n·(n-1)···(n-k+1), exact (k ≤ n).
fn produit_descendant(n: &BigUint, k: u64) -> BigUint {
    (0..k).fold(BigUint::one(), |acc, i| acc * (n - i))
}

fn vers_f64(x: &BigUint, nom: &str) -> Result<f64, ErreurCalcul> {
    let v = x
        .to_f64()
        .ok_or_else(|| ErreurCalcul::domaine(format!("{nom}: dépassement")))?;
    fini(v, nom)
}

/// nPr(n, r) = n! / (n-r)!
pub fn n_p_r(n: f64, r: f64) -> Result<f64, ErreurCalcul> {
    let (n, r) = arguments_combinatoires(n, r, "nPr")?;
    let r = borne(&r, NPR_R_MAX, "nPr")?;
    vers_f64(&produit_descendant(&n, r), "nPr")
}

/// nCr(n, r) = n! / (r!(n-r)!), calculé avec k = min(r, n-r).
pub fn n_c_r(n: f64, r: f64) -> Result<f64, ErreurCalcul> {
    let (n, r) = arguments_combinatoires(n, r, "nCr")?;
    let reste = &n - &r;
    let k = borne(&r.min(reste), NCR_K_MAX, "nCr")?;
    let k_fact = produit_descendant(&BigUint::from(k), k);
    vers_f64(&(produit_descendant(&n, k) / k_fact), "nCr")
}
