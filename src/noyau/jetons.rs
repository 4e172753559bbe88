// src/noyau/jetons.rs

use super::erreur::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constantes + fonctions : la résolution se fait à l’évaluation,
    // pas ici (pi, Ans, sin, nCr... sont tous des Ident).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret, // ^
    Bang,  // ! (factorielle postfixe)

    LPar,
    RPar,
    Comma,
}

impl Tok {
    /// Symbole d’un jeton de ponctuation (None pour Num / Ident).
    pub fn symbole(&self) -> Option<&'static str> {
        let s = match self {
            Tok::Plus => "+",
            Tok::Minus => "-",
            Tok::Star => "*",
            Tok::Slash => "/",
            Tok::Percent => "%",
            Tok::Caret => "^",
            Tok::Bang => "!",
            Tok::LPar => "(",
            Tok::RPar => ")",
            Tok::Comma => ",",
            Tok::Num(_) | Tok::Ident(_) => return None,
        };
        Some(s)
    }
}

fn ponctuation(c: char) -> Option<Tok> {
    let t = match c {
        '+' => Tok::Plus,
        '-' => Tok::Minus,
        '*' => Tok::Star,
        '/' => Tok::Slash,
        '%' => Tok::Percent,
        '^' => Tok::Caret,
        '!' => Tok::Bang,
        '(' => Tok::LPar,
        ')' => Tok::RPar,
        ',' => Tok::Comma,
        _ => return None,
    };
    Some(t)
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux `12`, `3.5`, `.5` (pas de `5.` ni de `1.2.3`)
/// - identifiants [a-zA-Z][a-zA-Z0-9_]* (sensibles à la casse : `Ans` ≠ `ANS`)
/// - ponctuation + - * / % ^ ! ( ) ,
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(t) = ponctuation(c) {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push(Tok::Ident(chars[start..i].iter().collect()));
            continue;
        }

        // Nombre : digit+ ('.' digit+)? | '.' digit+
        let point_puis_chiffre =
            c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit();
        if c.is_ascii_digit() || point_puis_chiffre {
            let (fin, n) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = fin;
            continue;
        }
        if c == '.' {
            // point isolé : nombre sans chiffre
            return Err(ErreurCalcul::NombreMalForme(".".into()));
        }

        return Err(ErreurCalcul::CaractereInattendu(c));
    }

    Ok(out)
}

/// Lit un nombre à partir de `start`. Retourne (index après le nombre, valeur).
fn lire_nombre(chars: &[char], start: usize) -> Result<(usize, f64), ErreurCalcul> {
    let chiffres = |mut i: usize| {
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = chiffres(start);

    if i < chars.len() && chars[i] == '.' {
        let apres_point = i + 1;
        i = chiffres(apres_point);
        if i == apres_point {
            // "5." : point sans partie décimale
            let txt: String = chars[start..i].iter().collect();
            return Err(ErreurCalcul::NombreMalForme(txt));
        }
    }

    // "1.2.3" : un second point collé au nombre n’est pas un nouveau nombre
    if i < chars.len() && chars[i] == '.' {
        let mut fin = i;
        while fin < chars.len() && (chars[fin].is_ascii_digit() || chars[fin] == '.') {
            fin += 1;
        }
        let txt: String = chars[start..fin].iter().collect();
        return Err(ErreurCalcul::NombreMalForme(txt));
    }

    let txt: String = chars[start..i].iter().collect();
    let n = txt
        .parse::<f64>()
        .map_err(|_| ErreurCalcul::NombreMalForme(txt.clone()))?;
    if n.is_infinite() {
        // littéral au-delà de f64::MAX
        return Err(ErreurCalcul::NombreMalForme(txt));
    }
    Ok((i, n))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),
            _ => t.symbole().unwrap_or("?").to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
