// src/noyau/trig.rs
//
// Trigonométrie + mode d’angle
// ----------------------------
// - sin/cos/tan : en degrés, l’argument est converti en radians
// - asin/acos/atan : en degrés, le résultat est reconverti en degrés
// - Angles spéciaux (degrés seulement) : multiples de 30° et 45° donnent
//   la valeur exacte de la table, et tan(90° + k·180°) est indéfini.

use std::f64::consts::FRAC_1_SQRT_2;

use super::erreur::{fini, ErreurCalcul};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }

    fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_radians(),
            ModeAngle::Radians => x,
        }
    }

    fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x.to_degrees(),
            ModeAngle::Radians => x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigInvFn {
    Asin,
    Acos,
    Atan,
}

const SQRT3_2: f64 = 0.866_025_403_784_438_6; // √3/2
const SQRT3: f64 = 1.732_050_807_568_877_2;
const SQRT3_3: f64 = 0.577_350_269_189_625_8; // √3/3

/// sin/cos/tan selon le mode d’angle.
pub fn trig(f: TrigFn, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
    if mode == ModeAngle::Degres {
        if let Some(exact) = trig_special_degres(f, x) {
            return exact;
        }
    }

    let r = mode.vers_radians(x);
    let (v, nom) = match f {
        TrigFn::Sin => (r.sin(), "sin"),
        TrigFn::Cos => (r.cos(), "cos"),
        TrigFn::Tan => (r.tan(), "tan"),
    };
    fini(v, nom)
}

/// asin/acos/atan : résultat en degrés si le mode le demande.
pub fn trig_inverse(f: TrigInvFn, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalcul> {
    let (v, nom) = match f {
        TrigInvFn::Asin => (x.asin(), "asin"),
        TrigInvFn::Acos => (x.acos(), "acos"),
        TrigInvFn::Atan => (x.atan(), "atan"),
    };
    let v = fini(v, nom)?;
    Ok(mode.depuis_radians(v))
}

/// Reconnaît les angles spéciaux (en degrés) : k·30° ou k·45°.
///
/// Retour:
/// - Some(Ok(valeur_exacte)) si reconnu
/// - Some(Err(domaine)) si indéfini (tan(90°), tan(270°))
/// - None si non reconnu (calcul flottant normal)
fn trig_special_degres(f: TrigFn, x: f64) -> Option<Result<f64, ErreurCalcul>> {
    // Au-delà de 2^53 la réduction modulo 360 n’a plus de sens en f64.
    if !x.is_finite() || x.fract() != 0.0 || x.abs() > 9.0e15 {
        return None;
    }

    let a = x.rem_euclid(360.0) as i64;
    if a % 30 != 0 && a % 45 != 0 {
        return None;
    }

    // Valeurs (sin, cos) sur le premier quadrant, étendues par symétrie.
    let (quadrant, reste) = (a / 90, a % 90);
    let (s, c) = match reste {
        0 => (0.0, 1.0),
        30 => (0.5, SQRT3_2),
        45 => (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        60 => (SQRT3_2, 0.5),
        _ => return None,
    };
    let (sin, cos) = match quadrant {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };

    let v = match f {
        TrigFn::Sin => sin,
        TrigFn::Cos => cos,
        TrigFn::Tan => {
            if cos == 0.0 {
                return Some(Err(ErreurCalcul::domaine(format!(
                    "tan({x}°) indéfinie"
                ))));
            }
            tan_exacte(reste, quadrant)
        }
    };
    Some(Ok(v))
}

/// tan sur la table (reste ∈ {0,30,45,60}, cos ≠ 0).
/// Période 180° : sur les quadrants impairs, tan(90° + ρ) = -1/tan(ρ).
fn tan_exacte(reste: i64, quadrant: i64) -> f64 {
    let pair = quadrant % 2 == 0;
    match (reste, pair) {
        (0, _) => 0.0,
        (30, true) | (60, false) => SQRT3_3,
        (45, _) => 1.0,
        _ => SQRT3,
    }
    .copysign(if pair { 1.0 } else { -1.0 })
}
