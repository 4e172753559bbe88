// src/noyau/erreur.rs
//
// Erreurs du noyau
// ----------------
// Une seule enum pour tout le pipeline (jetons -> RPN -> évaluation).
// Chaque variante appartient à une famille (`TypeErreur`) que l’appelant
// peut tester sans dépendre du texte du message.

use thiserror::Error;

/// Famille d’erreur (ce que l’UI ou les tests regardent).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeErreur {
    /// Caractère invalide ou nombre mal formé.
    Lex,
    /// Parenthèses, virgules, opérandes manquants, entrée vide.
    Syntaxe,
    /// Identifiant inconnu, fonction sans appel, constante appelée...
    Eval,
    /// Résultat non fini ou hors domaine mathématique.
    Domaine,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    /* ------------------------ Lex ------------------------ */
    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),
    #[error("nombre mal formé: {0}")]
    NombreMalForme(String),

    /* ------------------------ Syntaxe ------------------------ */
    #[error("Entrée vide")]
    EntreeVide,
    #[error("parenthèse fermante sans ouvrante")]
    ParentheseFermante,
    #[error("parenthèses non fermées")]
    ParentheseNonFermee,
    #[error("virgule hors d’un appel de fonction")]
    VirguleHorsAppel,
    #[error("opérande manquant près de '{0}'")]
    OperandeManquant(String),

    /* ------------------------ Évaluation ------------------------ */
    #[error("identifiant inconnu: {0}")]
    IdentifiantInconnu(String),
    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),
    #[error("fonction sans parenthèses: {0}")]
    FonctionSansAppel(String),
    #[error("une constante ne s’appelle pas: {0}")]
    ConstanteAppelee(String),
    #[error("{nom} attend {attendu} argument(s), reçu {recu}")]
    AriteInvalide {
        nom: String,
        attendu: usize,
        recu: usize,
    },
    #[error("expression invalide")]
    ExpressionInvalide,

    /* ------------------------ Domaine ------------------------ */
    #[error("erreur de domaine: {0}")]
    Domaine(String),
}

impl ErreurCalcul {
    pub fn kind(&self) -> TypeErreur {
        use ErreurCalcul::*;

        match self {
            CaractereInattendu(_) | NombreMalForme(_) => TypeErreur::Lex,

            EntreeVide
            | ParentheseFermante
            | ParentheseNonFermee
            | VirguleHorsAppel
            | OperandeManquant(_) => TypeErreur::Syntaxe,

            IdentifiantInconnu(_)
            | FonctionInconnue(_)
            | FonctionSansAppel(_)
            | ConstanteAppelee(_)
            | AriteInvalide { .. }
            | ExpressionInvalide => TypeErreur::Eval,

            Domaine(_) => TypeErreur::Domaine,
        }
    }

    /// Raccourci : erreur de domaine avec message.
    pub(crate) fn domaine(msg: impl Into<String>) -> Self {
        ErreurCalcul::Domaine(msg.into())
    }
}

/// Garde-fou commun : tout résultat non fini devient une erreur de domaine.
pub(crate) fn fini(v: f64, operation: &str) -> Result<f64, ErreurCalcul> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurCalcul::domaine(format!("{operation}: résultat non fini")))
    }
}
