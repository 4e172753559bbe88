// src/noyau/format.rs
//
// Affichage d’un résultat flottant
// - entiers (< 1e15) sans partie décimale
// - sinon `chiffres` chiffres significatifs, zéros finaux retirés
// - notation scientifique pour |v| ≥ 1e15 ou |v| < 1e-6

/// Borne haute : au-delà, f64 n’a plus de chiffres significatifs fiables.
pub const CHIFFRES_MAX: usize = 17;

pub fn format_resultat(v: f64, chiffres: usize) -> String {
    let chiffres = chiffres.clamp(1, CHIFFRES_MAX);

    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        // évite "-0"
        return "0".to_string();
    }

    let abs = v.abs();
    if !(1e-6..1e15).contains(&abs) {
        return format_scientifique(v, chiffres);
    }
    if v.fract() == 0.0 {
        return format!("{v:.0}");
    }

    // nombre de décimales pour `chiffres` significatifs
    let exposant = abs.log10().floor() as i32;
    let decimales = (chiffres as i32 - 1 - exposant).max(0) as usize;
    let txt = format!("{v:.decimales$}");
    let txt = retire_zeros(&txt);

    if txt == "-0" {
        "0".to_string()
    } else {
        txt
    }
}

fn format_scientifique(v: f64, chiffres: usize) -> String {
    let txt = format!("{:.*e}", chiffres - 1, v);
    match txt.split_once('e') {
        Some((mantisse, exp)) => format!("{}e{exp}", retire_zeros(mantisse)),
        None => txt,
    }
}

fn retire_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
