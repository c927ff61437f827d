// src/noyau/jetons.rs
//
// Tokenisation du texte RÉÉCRIT (après constantes, postfixes, fonctions).
// Le texte ne contient plus que :
// - nombres décimaux simples (12, 0.5, 3., .25)
// - opérateurs + - * /
// - parenthèses ( ) et virgule d’arguments
// - intrinsèques [a-z][a-z0-9]* (sin, log10, pow, ...)

use super::echec::Echec;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Appels intrinsèques (le RPN vérifie le nom)
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    // Moins unaire : produit par to_rpn, jamais par tokenize
    Neg,

    Comma,
    LPar,
    RPar,
}

/// Tokenize une chaîne réécrite en jetons.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, Echec> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Comma),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants : [a-z][a-z0-9]*
        if c.is_ascii_lowercase() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_lowercase() || chars[i].is_ascii_digit()) {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        // Nombre décimal (un seul point)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            let v = lire_nombre(&txt)?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(Echec::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Nombre décimal simple : au moins un chiffre, au plus un point, pas d’exposant.
pub fn lire_nombre(txt: &str) -> Result<f64, Echec> {
    let points = txt.chars().filter(|&c| c == '.').count();
    let chiffres = txt.chars().any(|c| c.is_ascii_digit());
    if points > 1 || !chiffres || !txt.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(Echec::syntaxe(format!("nombre invalide: {txt}")));
    }
    txt.parse::<f64>()
        .map_err(|_| Echec::syntaxe(format!("nombre invalide: {txt}")))
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::Comma => ",".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
