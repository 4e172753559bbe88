//! Tests scientifiques (campagne) : propriétés attendues du noyau.
//!
//! - précédence / associativité
//! - moins unaire contre la table (u- = 5 > ^ = 4)
//! - factorielle, nPr / nCr
//! - mode d’angle, Ans, constantes vs fonctions
//! - entrées malformées : famille d’erreur exacte
//! - stress borné (budget temps)

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::{compiler, evaluate, Contexte, ModeAngle, TypeErreur};

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    evaluate(expr, mode, 0.0).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn ok(expr: &str) -> f64 {
    eval_ok(expr, ModeAngle::Radians)
}

fn assert_famille(expr: &str, attendu: TypeErreur) {
    match evaluate(expr, ModeAngle::Radians, 0.0) {
        Ok(v) => panic!("expr={expr:?} : attendu {attendu:?}, obtenu {v}"),
        Err(e) => assert_eq!(e.kind(), attendu, "expr={expr:?} err={e}"),
    }
}

fn assert_proche(v: f64, attendu: f64, expr: &str) {
    assert!((v - attendu).abs() < 1e-12, "expr={expr:?} : {v} ≠ {attendu}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence_associativite() {
    assert_eq!(ok("2+3*4"), 14.0);
    assert_eq!(ok("2^3^2"), 512.0);
    assert_eq!(ok("2-3-4"), -5.0);
    assert_eq!(ok("100/10/5"), 2.0);
    assert_eq!(ok("2*3^2"), 18.0);
}

#[test]
fn sci_moins_unaire_selon_la_table() {
    // u- (5) lie plus fort que ^ (4) : -3^2 = (-3)^2
    assert_eq!(ok("-3^2"), 9.0);
    assert_eq!(ok("-(3^2)"), -9.0);
    assert_eq!(ok("0-3^2"), -9.0);
    assert_eq!(ok("2^-1"), 0.5);
    assert_eq!(ok("--4"), 4.0);
    assert_eq!(ok("3*-2"), -6.0);
}

/* ------------------------ Factorielle / combinatoire ------------------------ */

#[test]
fn sci_factorielle() {
    assert_eq!(ok("5!"), 120.0);
    assert_eq!(ok("0!"), 1.0);
    assert_eq!(ok("3!!"), 720.0);
    assert_eq!(ok("2^3!"), 64.0);
    assert_eq!(ok("(2+1)!"), 6.0);
    assert_famille("-1!", TypeErreur::Domaine);
    assert_famille("2.5!", TypeErreur::Domaine);
    assert_famille("171!", TypeErreur::Domaine);
}

#[test]
fn sci_permutations_combinaisons() {
    assert_eq!(ok("nPr(5,2)"), 20.0);
    assert_eq!(ok("nCr(5,2)"), 10.0);
    assert_eq!(ok("nCr(2+3, 1+1)"), 10.0);
    assert_eq!(ok("nCr(200, 2)"), 19_900.0);
    assert_eq!(ok("2*nPr(4, 4)"), 48.0);
    assert_famille("nCr(5,7)", TypeErreur::Domaine);
    assert_famille("nPr(5,-1)", TypeErreur::Domaine);
    assert_famille("nCr(5.5,2)", TypeErreur::Domaine);
    assert_famille("nCr(5)", TypeErreur::Eval);
    // n au-delà de u64 : toujours exact
    assert_eq!(ok("nCr(10^20, 0)"), 1.0);
    assert_eq!(ok("nCr(10^20, 1)"), 1e20);
    assert_eq!(ok("nPr(10^20, 1)"), 1e20);
}

/* ------------------------ Angles ------------------------ */

#[test]
fn sci_mode_angle() {
    assert_proche(eval_ok("sin(90)", ModeAngle::Degres), 1.0, "sin(90)");
    assert_proche(eval_ok("sin(pi/2)", ModeAngle::Radians), 1.0, "sin(pi/2)");
    assert_proche(eval_ok("acos(0)", ModeAngle::Degres), 90.0, "acos(0)");
    assert_proche(eval_ok("atan(1)", ModeAngle::Radians), std::f64::consts::FRAC_PI_4, "atan(1)");
    assert_eq!(eval_ok("cos(60)", ModeAngle::Degres), 0.5);
    assert_famille("tan(pi/2) * 0 + asin(2)", TypeErreur::Domaine);
}

#[test]
fn sci_changement_de_mode_sans_retokeniser() {
    let prog = compiler("sin(90)").unwrap();
    let deg = Contexte {
        mode_angle: ModeAngle::Degres,
        ans: 0.0,
    };
    let rad = Contexte {
        mode_angle: ModeAngle::Radians,
        ..deg
    };
    assert_eq!(prog.evaluer(&deg), Ok(1.0));
    assert_proche(prog.evaluer(&rad).unwrap(), 90.0_f64.sin(), "sin(90) rad");
}

/* ------------------------ Constantes / fonctions ------------------------ */

#[test]
fn sci_constante_ou_fonction() {
    assert_eq!(ok("pi"), std::f64::consts::PI);
    assert_eq!(ok("e"), std::f64::consts::E);
    assert_famille("sin", TypeErreur::Eval);
    assert_famille("pi(2)", TypeErreur::Eval);
    assert_famille("inconnu", TypeErreur::Eval);
    assert_famille("ANS", TypeErreur::Eval);
}

#[test]
fn sci_ans_aller_retour() {
    for ans in [0.0, -2.5, 1e300, std::f64::consts::PI] {
        assert_eq!(evaluate("Ans", ModeAngle::Degres, ans), Ok(ans));
    }
    assert_eq!(evaluate("Ans*2 + 1", ModeAngle::Radians, 20.0), Ok(41.0));
    assert_eq!(evaluate("2Ans", ModeAngle::Radians, 4.0), Ok(8.0));
}

/* ------------------------ Entrées malformées ------------------------ */

#[test]
fn sci_entrees_malformees() {
    assert_famille("2+", TypeErreur::Syntaxe);
    assert_famille("(2+3", TypeErreur::Syntaxe);
    assert_famille("2,3", TypeErreur::Syntaxe);
    assert_famille("", TypeErreur::Syntaxe);
    assert_famille("2+3)", TypeErreur::Syntaxe);
    assert_famille("1.2.3", TypeErreur::Lex);
    assert_famille("2 & 3", TypeErreur::Lex);
    assert_famille("2 3", TypeErreur::Eval);
}

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(ok("2(3+1)"), 8.0);
    assert_eq!(ok("(1+1)(2+2)"), 8.0);
    assert_eq!(ok("2pi"), 2.0 * std::f64::consts::PI);
    assert_eq!(ok("3!2"), 12.0);
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence() {
    for expr in ["2+3*4", "sin(45)", "Ans/3", "nCr(5,7)", "1/0", "sin", "(2"] {
        for mode in [ModeAngle::Degres, ModeAngle::Radians] {
            let a = evaluate(expr, mode, 7.0);
            let b = evaluate(expr, mode, 7.0);
            assert_eq!(a, b, "expr={expr:?} mode={mode:?}");
        }
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let n = 2000;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    budget(t0, max);

    assert_eq!(ok(&expr), 1.0);
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = vec!["0.5"; 5000].join(" + ");
    assert_eq!(ok(&expr), 2500.0);
    budget(t0, max);
}

#[test]
fn sci_stress_appels_imbriques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let n = 500;
    let expr = format!("{}4{}", "abs(".repeat(n), ")".repeat(n));
    assert_eq!(ok(&expr), 4.0);
    budget(t0, max);
}
