//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, Ans,
//! mémoire, mode d’angle, démarche) et offrir des opérations simples
//! (C/CLR/AC, MC/M+/M-) sans logique d’affichage.
//!
//! Contrats :
//! - Évaluation de l’entrée principale : vue.rs appelle le noyau puis dépose
//!   le résultat via `set_resultat` / `set_erreur`.
//! - Ici seulement : ré-évaluation DEG/RAD du dernier programme et M+ / M-,
//!   sans egui (testables).
//! - Ans et mémoire vivent ici ; le noyau les reçoit en paramètre.
//! - Précision d’affichage bornée (chiffres significatifs).

use calculatrice_sci::noyau::format::CHIFFRES_MAX;
use calculatrice_sci::noyau::{compiler, format_resultat, Contexte, ModeAngle, ProgrammeRpn};
use tracing::warn;

/// Chiffres significatifs affichés par défaut.
const CHIFFRES_DEFAUT: usize = 12;

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// Dernier programme évalué avec succès + le Ans qu’il a lu.
/// Sert à ré-évaluer lors d’un changement DEG/RAD, sans re-tokeniser.
#[derive(Clone, Debug)]
pub struct DernierCalcul {
    pub programme: ProgrammeRpn,
    pub ans_utilise: f64,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // valeur formatée
    pub erreur: String,   // message d’erreur (si parsing/éval échoue)

    // --- registres (appartiennent à l’UI, pas au noyau) ---
    pub ans: f64,
    pub memoire: f64,
    pub dernier: Option<DernierCalcul>,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub mode_angle: ModeAngle,
    pub chiffres: usize,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            ans: 0.0,
            memoire: 0.0,
            dernier: None,
            demarche: Demarche::default(),
            mode_angle: ModeAngle::default(),
            chiffres: CHIFFRES_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + Ans + mémoire).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.ans = 0.0;
        self.memoire = 0.0;
        self.chiffres = CHIFFRES_DEFAUT;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée ni à Ans).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.dernier = None;
        self.focus_entree = true;
    }

    /// Contexte passé au noyau pour une nouvelle évaluation.
    pub fn contexte(&self) -> Contexte {
        Contexte {
            mode_angle: self.mode_angle,
            ans: self.ans,
        }
    }

    /// Placer une erreur.
    ///
    /// On CONSERVE le dernier résultat affiché et Ans : une faute de frappe
    /// n’efface pas l’écran.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.focus_entree = true;
    }

    /// Déposer un résultat réussi : il devient le nouveau Ans.
    pub fn set_resultat(&mut self, valeur: f64, demarche: Demarche, dernier: DernierCalcul) {
        self.erreur.clear();
        self.ans = valeur;
        self.resultat = format_resultat(valeur, self.chiffres);
        self.demarche = demarche;
        self.dernier = Some(dernier);
        self.focus_entree = true;
    }

    /// Ré-évaluation (changement de mode) : même programme, nouvelle valeur.
    pub fn set_valeur_reevaluee(&mut self, valeur: f64) {
        self.erreur.clear();
        self.ans = valeur;
        self.resultat = format_resultat(valeur, self.chiffres);
    }

    /// Garde-fou : limite les chiffres significatifs et reformate Ans.
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.clamp(1, CHIFFRES_MAX);
        if self.dernier.is_some() {
            self.resultat = format_resultat(self.ans, self.chiffres);
        }
        self.focus_entree = true;
    }

    /// DEG/RAD : le dernier programme est ré-évalué (même Ans qu’à l’origine).
    pub fn changer_mode_angle(&mut self, mode: ModeAngle) {
        self.mode_angle = mode;

        let Some(dernier) = &self.dernier else {
            return;
        };
        let ctx = Contexte {
            mode_angle: mode,
            ans: dernier.ans_utilise,
        };
        match dernier.programme.evaluer(&ctx) {
            Ok(v) => self.set_valeur_reevaluee(v),
            Err(e) => {
                warn!(erreur = %e, "ré-évaluation refusée");
                self.set_erreur(e.to_string());
            }
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
        self.focus_entree = true;
    }

    /// M+ / M- : `signe` vaut 1.0 ou -1.0. Un débordement est refusé.
    pub fn memoire_cumuler(&mut self, valeur: f64, signe: f64) -> Result<(), String> {
        let m = self.memoire + signe * valeur;
        if !m.is_finite() {
            return Err("mémoire: dépassement".into());
        }
        self.memoire = m;
        self.focus_entree = true;
        Ok(())
    }

    /// M+ / M- sur l’entrée : vide compte pour 0 ; une erreur est affichée, jamais avalée.
    pub fn memoire_entree(&mut self, signe: f64) {
        let valeur = if self.entree.trim().is_empty() {
            Ok(0.0)
        } else {
            compiler(&self.entree).and_then(|p| p.evaluer(&self.contexte()))
        };

        let res = valeur
            .map_err(|e| e.to_string())
            .and_then(|v| self.memoire_cumuler(v, signe));
        if let Err(msg) = res {
            warn!(erreur = %msg, "mémoire inchangée");
            self.set_erreur(msg);
        }
    }

    /// MR : texte à insérer dans l’entrée (relisible exactement par le noyau).
    pub fn texte_memoire(&self) -> String {
        if self.memoire < 0.0 {
            format!("({})", self.memoire)
        } else {
            format!("{}", self.memoire)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use calculatrice_sci::noyau::eval_expression;

    /// Évalue `expr` comme le fait la vue (Enter / "=").
    fn calculer(app: &mut AppCalc, expr: &str) {
        app.entree = expr.into();
        let ctx = app.contexte();
        let (v, programme, _) = eval_expression(expr, &ctx).unwrap();
        app.set_resultat(
            v,
            Demarche::default(),
            DernierCalcul {
                programme,
                ans_utilise: ctx.ans,
            },
        );
    }

    fn dernier() -> DernierCalcul {
        DernierCalcul {
            programme: ProgrammeRpn::default(),
            ans_utilise: 0.0,
        }
    }

    #[test]
    fn resultat_devient_ans() {
        let mut app = AppCalc::default();
        app.set_resultat(1.0 / 3.0, Demarche::default(), dernier());
        assert_eq!(app.ans, 1.0 / 3.0);
        assert_eq!(app.resultat, "0.333333333333");
        assert_eq!(app.contexte().ans, 1.0 / 3.0);
    }

    #[test]
    fn erreur_conserve_resultat_et_ans() {
        let mut app = AppCalc::default();
        app.set_resultat(42.0, Demarche::default(), dernier());
        app.set_erreur("parenthèses non fermées");
        assert_eq!(app.resultat, "42");
        assert_eq!(app.ans, 42.0);
        assert_eq!(app.erreur, "parenthèses non fermées");

        app.set_resultat(1.0, Demarche::default(), dernier());
        assert!(app.erreur.is_empty());
    }

    #[test]
    fn memoire() {
        let mut app = AppCalc::default();
        app.memoire_cumuler(5.0, 1.0).unwrap();
        app.memoire_cumuler(7.5, -1.0).unwrap();
        assert_eq!(app.memoire, -2.5);
        assert_eq!(app.texte_memoire(), "(-2.5)");

        app.memoire_cumuler(f64::MAX, 1.0).unwrap();
        assert!(app.memoire_cumuler(f64::MAX, 1.0).is_err());
        assert_eq!(app.memoire, f64::MAX - 2.5);
        app.memoire_effacer();
        assert_eq!(app.texte_memoire(), "0");
    }

    #[test]
    fn texte_memoire_relisible() {
        let mut app = AppCalc::default();
        app.memoire_cumuler(1e-7, 1.0).unwrap();
        let txt = app.texte_memoire();
        assert_eq!(
            calculatrice_sci::evaluate(&txt, ModeAngle::Degres, 0.0),
            Ok(1e-7)
        );
    }

    #[test]
    fn chiffres_bornes_et_reformatage() {
        let mut app = AppCalc::default();
        app.set_resultat(2.0 / 3.0, Demarche::default(), dernier());
        app.set_chiffres(3);
        assert_eq!(app.resultat, "0.667");
        app.set_chiffres(500);
        assert_eq!(app.chiffres, CHIFFRES_MAX);
        app.set_chiffres(0);
        assert_eq!(app.chiffres, 1);
    }

    #[test]
    fn clr_et_ac() {
        let mut app = AppCalc::default();
        app.entree = "2+2".into();
        app.set_resultat(4.0, Demarche::default(), dernier());
        app.memoire_cumuler(1.0, 1.0).unwrap();

        app.clear_resultats();
        assert_eq!(app.entree, "2+2");
        assert!(app.resultat.is_empty() && app.dernier.is_none());
        assert_eq!(app.ans, 4.0);

        app.reset_total();
        assert!(app.entree.is_empty());
        assert_eq!((app.ans, app.memoire), (0.0, 0.0));
    }

    #[test]
    fn changement_de_mode_reevalue_avec_le_ans_d_origine() {
        let mut app = AppCalc::default();
        calculer(&mut app, "90");
        calculer(&mut app, "sin(Ans)");
        assert_eq!(app.resultat, "1");
        assert_eq!(app.ans, 1.0);

        // Ans vaut maintenant 1, mais le programme relit le 90 d’origine
        app.changer_mode_angle(ModeAngle::Radians);
        assert_eq!(app.mode_angle, ModeAngle::Radians);
        assert_eq!(app.ans, 90.0_f64.sin());
        assert!(app.erreur.is_empty());

        app.changer_mode_angle(ModeAngle::Degres);
        assert_eq!(app.ans, 1.0);
    }

    #[test]
    fn changement_de_mode_sans_calcul_ni_erreur_conservee() {
        let mut app = AppCalc::default();
        app.changer_mode_angle(ModeAngle::Radians);
        assert_eq!(app.mode_angle, ModeAngle::Radians);
        assert!(app.resultat.is_empty() && app.erreur.is_empty());

        // tan(pi/2) est fini en radians, refusé en degrés (tan 90)
        calculer(&mut app, "tan(90)");
        app.changer_mode_angle(ModeAngle::Degres);
        assert!(!app.erreur.is_empty());
        assert_eq!(app.ans, 90.0_f64.tan());
    }

    #[test]
    fn memoire_sur_l_entree() {
        let mut app = AppCalc::default();
        app.memoire_entree(1.0);
        assert_eq!(app.memoire, 0.0);
        assert!(app.erreur.is_empty());

        app.entree = "2*3".into();
        app.memoire_entree(1.0);
        app.entree = "  1 ".into();
        app.memoire_entree(-1.0);
        assert_eq!(app.memoire, 5.0);

        app.entree = "2+".into();
        app.memoire_entree(1.0);
        assert_eq!(app.memoire, 5.0);
        assert!(!app.erreur.is_empty());
    }
}
