// src/noyau/rpn.rs
//
// Shunting-yard -> RPN
// Objectif:
// - Convertir une suite de Tok en RPN (postfix), une seule passe
// - Chaque ')' devient un marqueur Fermeture{args, appel} : `args` = 1 + nombre
//   de virgules de premier niveau ; `appel` = la '(' suivait un identifiant.
//   L’évaluateur résout le nom (fonction, constante, inconnu) à l’exécution.
//
// Règles:
// - Num / Ident : sortie directe (résolution différée)
// - Moins unaire : '-' quand on attend un opérande => u-
// - '!' postfixe : s’applique à la valeur immédiatement à gauche,
//   y compris une valeur déjà niée (-1! = (-1)!)
// - Multiplication implicite : 2pi, 2(3), (1)(2), 3!2, pi e
//   (sauf nombre→nombre, et ident→'(' qui est un appel)

use tracing::trace;

use super::erreur::ErreurCalcul;
use super::jetons::Tok;
use super::operateurs::Op;

#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Num(f64),
    Ident(String),
    Op(Op),
    Fermeture { args: usize, appel: bool },
}

/// Séquence postfixe compilée : évaluable plusieurs fois
/// (changement DEG/RAD, Ans) sans re-tokeniser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgrammeRpn {
    pub elems: Vec<ElemRpn>,
}

/// Entrée de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    Op(Op),
    Ouvrante,
}

/// Groupe parenthésé en cours (parallèle aux `Pile::Ouvrante`).
#[derive(Clone, Copy, Debug)]
struct Groupe {
    appel: bool,
    args: usize,
}

/// Nature du dernier jeton traité (pour unaire / implicite / appels).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Precedent {
    Rien,
    Num,
    Ident,
    Fermante,
    Bang,
    Operateur, // binaire, u-, '(' ou ','
}

impl Precedent {
    /// Le jeton précédent termine une valeur.
    fn fin_de_valeur(self) -> bool {
        matches!(
            self,
            Precedent::Num | Precedent::Ident | Precedent::Fermante | Precedent::Bang
        )
    }
}

struct Convertisseur {
    out: Vec<ElemRpn>,
    ops: Vec<Pile>,
    groupes: Vec<Groupe>,
    prev: Precedent,
}

impl Convertisseur {
    fn new(capacite: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacite),
            ops: Vec::new(),
            groupes: Vec::new(),
            prev: Precedent::Rien,
        }
    }

    fn attend_operande(&self) -> bool {
        !self.prev.fin_de_valeur()
    }

    /// Dépile vers la sortie tant que `doit_sortir(top)` (arrêt sur '(').
    fn depile_tant_que(&mut self, doit_sortir: impl Fn(Op) -> bool) {
        while let Some(Pile::Op(top)) = self.ops.last().copied() {
            if !doit_sortir(top) {
                break;
            }
            self.ops.pop();
            self.out.push(ElemRpn::Op(top));
        }
    }

    /// Dépile jusqu’à la '(' la plus proche (sans la consommer).
    /// Retourne false s’il n’y en a pas.
    fn depile_jusqu_a_ouvrante(&mut self) -> bool {
        self.depile_tant_que(|_| true);
        matches!(self.ops.last(), Some(Pile::Ouvrante))
    }

    fn pousse_operateur(&mut self, op: Op) {
        self.depile_tant_que(|top| op.cede_a(top));
        self.ops.push(Pile::Op(op));
        self.prev = Precedent::Operateur;
    }

    /// Insère '*' si une valeur est suivie d’un début de valeur.
    fn multiplication_implicite(&mut self, tok: &Tok) {
        let implicite = match (self.prev, tok) {
            (Precedent::Num, Tok::Num(_)) => false,
            (Precedent::Ident, Tok::LPar) => false,
            (p, Tok::Num(_) | Tok::Ident(_) | Tok::LPar) => p.fin_de_valeur(),
            _ => false,
        };
        if implicite {
            trace!(?tok, "multiplication implicite");
            self.pousse_operateur(Op::Fois);
        }
    }

    fn jeton(&mut self, tok: &Tok) -> Result<(), ErreurCalcul> {
        self.multiplication_implicite(tok);

        match tok {
            Tok::Num(n) => {
                self.out.push(ElemRpn::Num(*n));
                self.prev = Precedent::Num;
            }

            Tok::Ident(name) => {
                self.out.push(ElemRpn::Ident(name.clone()));
                self.prev = Precedent::Ident;
            }

            Tok::LPar => {
                self.groupes.push(Groupe {
                    appel: self.prev == Precedent::Ident,
                    args: 1,
                });
                self.ops.push(Pile::Ouvrante);
                self.prev = Precedent::Operateur;
            }

            Tok::RPar => {
                if self.attend_operande() {
                    return Err(ErreurCalcul::OperandeManquant(")".into()));
                }
                if !self.depile_jusqu_a_ouvrante() {
                    return Err(ErreurCalcul::ParentheseFermante);
                }
                self.ops.pop(); // '('
                let groupe = self.groupes.pop().ok_or(ErreurCalcul::ParentheseFermante)?;
                self.out.push(ElemRpn::Fermeture {
                    args: groupe.args,
                    appel: groupe.appel,
                });
                self.prev = Precedent::Fermante;
            }

            Tok::Comma => {
                if self.attend_operande() {
                    return Err(ErreurCalcul::OperandeManquant(",".into()));
                }
                if !self.depile_jusqu_a_ouvrante() {
                    return Err(ErreurCalcul::VirguleHorsAppel);
                }
                match self.groupes.last_mut() {
                    Some(g) if g.appel => g.args += 1,
                    _ => return Err(ErreurCalcul::VirguleHorsAppel),
                }
                self.prev = Precedent::Operateur;
            }

            Tok::Bang => {
                if self.attend_operande() {
                    return Err(ErreurCalcul::OperandeManquant("!".into()));
                }
                // La valeur à gauche est complète : un u- en attente lui appartient.
                self.depile_tant_que(|top| top == Op::MoinsUnaire || Op::Factorielle.cede_a(top));
                self.ops.push(Pile::Op(Op::Factorielle));
                self.prev = Precedent::Bang;
            }

            Tok::Minus if self.attend_operande() => {
                self.pousse_operateur(Op::MoinsUnaire);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Caret => {
                let op = match tok {
                    Tok::Plus => Op::Plus,
                    Tok::Minus => Op::Moins,
                    Tok::Star => Op::Fois,
                    Tok::Slash => Op::Divise,
                    Tok::Percent => Op::Modulo,
                    _ => Op::Puissance,
                };
                if self.attend_operande() {
                    return Err(ErreurCalcul::OperandeManquant(op.symbole().into()));
                }
                self.pousse_operateur(op);
            }
        }

        Ok(())
    }

    fn terminer(mut self) -> Result<ProgrammeRpn, ErreurCalcul> {
        if self.prev == Precedent::Rien {
            return Err(ErreurCalcul::EntreeVide);
        }
        if self.attend_operande() {
            let pres = match self.ops.last() {
                Some(Pile::Op(op)) => op.symbole(),
                _ => "(",
            };
            return Err(ErreurCalcul::OperandeManquant(pres.into()));
        }

        while let Some(top) = self.ops.pop() {
            match top {
                Pile::Ouvrante => return Err(ErreurCalcul::ParentheseNonFermee),
                Pile::Op(op) => self.out.push(ElemRpn::Op(op)),
            }
        }

        Ok(ProgrammeRpn { elems: self.out })
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Num(30), RPar, Star, Num(2)]
///   rpn:    [Ident("sin"), Num(30), Fermeture{1, appel}, Num(2), Op(*)]
pub fn to_rpn(tokens: &[Tok]) -> Result<ProgrammeRpn, ErreurCalcul> {
    let mut conv = Convertisseur::new(tokens.len());
    for tok in tokens {
        conv.jeton(tok)?;
    }
    let prog = conv.terminer()?;
    trace!(elems = prog.elems.len(), "rpn construite");
    Ok(prog)
}

/// Format utilitaire (“démarche”) : RPN en texte.
/// Les fermetures apparaissent comme `)` ou `)/n` pour n arguments.
pub fn format_rpn(prog: &ProgrammeRpn) -> String {
    let mut out = Vec::with_capacity(prog.elems.len());
    for e in &prog.elems {
        let s = match e {
            ElemRpn::Num(n) => format!("{n}"),
            ElemRpn::Ident(name) => name.clone(),
            ElemRpn::Op(op) => op.symbole().to_string(),
            ElemRpn::Fermeture { args: 1, .. } => ")".to_string(),
            ElemRpn::Fermeture { args, .. } => format!(")/{args}"),
        };
        out.push(s);
    }
    out.join(" ")
}
