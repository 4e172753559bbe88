//! Tests fuzz safe : robustesse + déterminisme (proptest).
//!
//! - littéraux numériques : aller-retour exact texte -> f64
//! - expressions bien formées générées : jamais d’erreur Lex / Syntaxe / Eval,
//!   seulement Ok(fini) ou Domaine
//! - entrées quelconques sur l’alphabet accepté : pas de panique,
//!   toute valeur Ok est finie
//! - déterminisme : même entrée + même contexte => même sortie

use proptest::prelude::*;

use super::{evaluate, ModeAngle, TypeErreur};

const ANS: f64 = 1.5;

fn mode_strategy() -> impl Strategy<Value = ModeAngle> {
    prop_oneof![Just(ModeAngle::Degres), Just(ModeAngle::Radians)]
}

/// Expressions bien formées, profondeur bornée.
fn expr_strategy() -> impl Strategy<Value = String> {
    let feuille = prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        (0u32..1000).prop_map(|n| format!("{}", f64::from(n) / 8.0)),
        Just("pi".to_string()),
        Just("e".to_string()),
        Just("Ans".to_string()),
    ];

    feuille.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "%", "^"]),
                inner.clone()
            )
                .prop_map(|(a, op, b)| format!("({a}{op}{b})")),
            (
                prop::sample::select(vec![
                    "sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "sqrt", "exp",
                    "abs"
                ]),
                inner.clone()
            )
                .prop_map(|(f, a)| format!("{f}({a})")),
            (
                prop::sample::select(vec!["nPr", "nCr"]),
                inner.clone(),
                inner.clone()
            )
                .prop_map(|(f, a, b)| format!("{f}({a}, {b})")),
            inner.clone().prop_map(|a| format!("-{a}")),
            inner.prop_map(|a| format!("({a})!")),
        ]
    })
}

proptest! {
    #[test]
    fn fuzz_litteraux_aller_retour(n in 0.0f64..1e12) {
        let txt = format!("{n}");
        prop_assert_eq!(evaluate(&txt, ModeAngle::Radians, 0.0), Ok(n));
    }

    #[test]
    fn fuzz_entiers_aller_retour(n in 0u64..(1u64 << 53)) {
        prop_assert_eq!(evaluate(&n.to_string(), ModeAngle::Degres, 0.0), Ok(n as f64));
    }

    #[test]
    fn fuzz_bien_forme_ok_ou_domaine(expr in expr_strategy(), mode in mode_strategy()) {
        match evaluate(&expr, mode, ANS) {
            Ok(v) => prop_assert!(v.is_finite(), "expr={} v={}", expr, v),
            Err(e) => prop_assert_eq!(e.kind(), TypeErreur::Domaine, "expr={} err={}", expr, e),
        }
    }

    #[test]
    fn fuzz_parentheses_neutres(expr in expr_strategy(), mode in mode_strategy()) {
        let entoure = format!("({expr})");
        prop_assert_eq!(evaluate(&expr, mode, ANS), evaluate(&entoure, mode, ANS));
    }

    #[test]
    fn fuzz_determinisme(expr in expr_strategy(), mode in mode_strategy()) {
        prop_assert_eq!(evaluate(&expr, mode, ANS), evaluate(&expr, mode, ANS));
    }

    #[test]
    fn fuzz_entree_quelconque_sans_panique(s in "[0-9a-zA-Z_+*/^()%!,. -]{0,40}") {
        if let Ok(v) = evaluate(&s, ModeAngle::Radians, ANS) {
            prop_assert!(v.is_finite(), "s={:?} v={}", s, v);
        }
    }
}
