//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> RPN (shunting-yard) -> pile de valeurs -> f64
//!
//! Le contexte (mode d’angle, Ans) appartient à l’appelant : il est lu au
//! début de l’évaluation et jamais modifié ici.

use tracing::{debug, trace};

use super::erreur::{fini, ErreurCalcul};
use super::fonctions::{constante, fonction};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, to_rpn, ElemRpn, ProgrammeRpn};
use super::trig::ModeAngle;

/// Paramètres externes d’une évaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contexte {
    pub mode_angle: ModeAngle,
    /// Dernière réponse (constante `Ans`).
    pub ans: f64,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
}

/// Pile d’évaluation : nombres résolus ou identifiants en attente d’une Fermeture.
#[derive(Clone, Debug)]
enum ValeurPile {
    Nombre(f64),
    Nom(String),
}

/// Résout un identifiant utilisé sans appel (constante nue).
fn resoudre_constante(nom: &str, ctx: &Contexte) -> Result<f64, ErreurCalcul> {
    if let Some(c) = constante(nom) {
        return Ok(c.valeur(ctx.ans));
    }
    if fonction(nom).is_some() {
        return Err(ErreurCalcul::FonctionSansAppel(nom.to_string()));
    }
    Err(ErreurCalcul::IdentifiantInconnu(nom.to_string()))
}

fn depile_nombre(pile: &mut Vec<ValeurPile>, ctx: &Contexte) -> Result<f64, ErreurCalcul> {
    match pile.pop() {
        Some(ValeurPile::Nombre(v)) => Ok(v),
        Some(ValeurPile::Nom(nom)) => resoudre_constante(&nom, ctx),
        None => Err(ErreurCalcul::ExpressionInvalide),
    }
}

/// Dépile `n` opérandes, dans l’ordre d’origine (a, b, ...).
fn depile_operandes(
    pile: &mut Vec<ValeurPile>,
    n: usize,
    ctx: &Contexte,
) -> Result<Vec<f64>, ErreurCalcul> {
    let mut args = vec![0.0; n];
    for slot in args.iter_mut().rev() {
        *slot = depile_nombre(pile, ctx)?;
    }
    Ok(args)
}

/// Fermeture d’un groupe : simple parenthèse, ou appel du nom qui précède
/// les arguments sur la pile.
fn fermer_groupe(
    pile: &mut Vec<ValeurPile>,
    n: usize,
    appel: bool,
    ctx: &Contexte,
) -> Result<f64, ErreurCalcul> {
    let args = depile_operandes(pile, n, ctx)?;

    if !appel {
        // ( expr ) : la valeur revient telle quelle
        return match args.as_slice() {
            [v] => Ok(*v),
            _ => Err(ErreurCalcul::VirguleHorsAppel),
        };
    }

    let nom = match pile.pop() {
        Some(ValeurPile::Nom(nom)) => nom,
        _ => return Err(ErreurCalcul::ExpressionInvalide),
    };

    if let Some(f) = fonction(&nom) {
        if f.arite != n {
            return Err(ErreurCalcul::AriteInvalide {
                nom,
                attendu: f.arite,
                recu: n,
            });
        }
        let v = (f.appliquer)(&args, ctx.mode_angle)?;
        trace!(fonction = %nom, ?args, resultat = v, "appel");
        return Ok(v);
    }
    if constante(&nom).is_some() {
        return Err(ErreurCalcul::ConstanteAppelee(nom));
    }
    Err(ErreurCalcul::FonctionInconnue(nom))
}

impl ProgrammeRpn {
    /// Exécute la séquence postfixe (une passe, une pile).
    pub fn evaluer(&self, ctx: &Contexte) -> Result<f64, ErreurCalcul> {
        let mut pile: Vec<ValeurPile> = Vec::with_capacity(self.elems.len());

        for elem in &self.elems {
            match elem {
                ElemRpn::Num(n) => pile.push(ValeurPile::Nombre(*n)),
                ElemRpn::Ident(nom) => pile.push(ValeurPile::Nom(nom.clone())),
                ElemRpn::Fermeture { args, appel } => {
                    let v = fermer_groupe(&mut pile, *args, *appel, ctx)?;
                    pile.push(ValeurPile::Nombre(v));
                }
                ElemRpn::Op(op) => {
                    let operandes = depile_operandes(&mut pile, op.arite(), ctx)?;
                    let v = op.appliquer(&operandes)?;
                    pile.push(ValeurPile::Nombre(v));
                }
            }
        }

        // Identifiants restants : constantes nues
        let mut valeurs = Vec::with_capacity(pile.len());
        for v in pile {
            valeurs.push(match v {
                ValeurPile::Nombre(x) => x,
                ValeurPile::Nom(nom) => resoudre_constante(&nom, ctx)?,
            });
        }

        match valeurs.as_slice() {
            [v] => fini(*v, "résultat"),
            _ => Err(ErreurCalcul::ExpressionInvalide),
        }
    }
}

/// Texte -> programme RPN (sans évaluer).
pub fn compiler(expr_str: &str) -> Result<ProgrammeRpn, ErreurCalcul> {
    compiler_avec_jetons(expr_str).map(|(prog, _)| prog)
}

fn compiler_avec_jetons(expr_str: &str) -> Result<(ProgrammeRpn, String), ErreurCalcul> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }

    let jetons = tokenize(s)?;
    debug!(n = jetons.len(), "jetons");
    let prog = to_rpn(&jetons)?;
    debug!(n = prog.elems.len(), "rpn");
    Ok((prog, format_tokens(&jetons)))
}

/// API publique : évalue une expression et retourne:
/// - la valeur
/// - le programme RPN (ré-évaluable sous un autre contexte)
/// - la démarche (jetons, RPN) pour le panneau d’explication
pub fn eval_expression(
    expr_str: &str,
    ctx: &Contexte,
) -> Result<(f64, ProgrammeRpn, DemarcheNoyau), ErreurCalcul> {
    let (prog, jetons) = compiler_avec_jetons(expr_str)?;
    let v = prog.evaluer(ctx)?;
    debug!(resultat = v, mode = ?ctx.mode_angle, "évaluation terminée");

    let d = DemarcheNoyau {
        jetons,
        rpn: format_rpn(&prog),
    };
    Ok((v, prog, d))
}

/// API minimale : `evaluate(expression, mode, Ans) -> f64`.
pub fn evaluate(expression: &str, mode_angle: ModeAngle, ans: f64) -> Result<f64, ErreurCalcul> {
    let ctx = Contexte { mode_angle, ans };
    compiler(expression)?.evaluer(&ctx)
}
