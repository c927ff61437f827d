// src/noyau/reecriture.rs
//
// Réécritures textuelles (avant le parseur final)
// -----------------------------------------------
// Chaque étape prend un texte et rend un texte, dans cet ordre (voir eval.rs) :
//   postfixes -> constantes -> factorielles -> carrés -> inverses -> fonctions -> puissances
//   -> (contrôles) -> fusion des opérateurs -> moins initial
//
// Vocabulaire :
// - « nombre » = suite maximale de [0-9.] terminée par un chiffre (12, 0.5, 3.25)
// - les postfixes (!, ², 1/x) ne s’appliquent qu’à un nombre littéral collé
//   (pas à un résultat parenthésé : laissé tel quel => refusé par le parseur)

use std::ops::Range;

use super::echec::Echec;
use super::fonctions::{Fonction, Intrinseque, ModeAngle};
use super::jetons::lire_nombre;
use super::touches::{est_operateur, Constante, MARQUEUR_CARRE, MARQUEUR_INVERSE};

/* ------------------------ Outils ------------------------ */

/// Nombre littéral en fin de texte (ex: "2+13.5" -> "13.5").
pub fn nombre_final(texte: &str) -> Option<&str> {
    let octets = texte.as_bytes();
    if !octets.last()?.is_ascii_digit() {
        return None;
    }
    let mut debut = octets.len();
    while debut > 0 && (octets[debut - 1].is_ascii_digit() || octets[debut - 1] == b'.') {
        debut -= 1;
    }
    Some(&texte[debut..])
}

/// Nombre littéral en début de tranche (indices en chars).
fn nombre_initial(chars: &[char]) -> Option<String> {
    let fin = chars
        .iter()
        .position(|c| !(c.is_ascii_digit() || *c == '.'))
        .unwrap_or(chars.len());
    let run = &chars[..fin];
    if run.iter().any(|c| c.is_ascii_digit()) {
        Some(run.iter().collect())
    } else {
        None
    }
}

/// Un '-' placé après `avant` est-il unaire ?
fn moins_unaire(avant: &str) -> bool {
    match avant.trim_end().chars().last() {
        None => true,
        Some(c) => est_operateur(c) || c == '(',
    }
}

fn est_lettre(c: Option<&char>) -> bool {
    matches!(c, Some(c) if c.is_ascii_alphabetic())
}

/// n! pour n entier >= 0.
pub fn factorielle(n: f64) -> Result<f64, Echec> {
    if n < 0.0 || n.fract() != 0.0 {
        return Err(Echec::Domaine);
    }
    let mut acc = 1.0_f64;
    let mut k = 2.0_f64;
    while k <= n {
        acc *= k;
        if acc.is_infinite() {
            return Err(Echec::Invalide);
        }
        k += 1.0;
    }
    Ok(acc)
}

/// Ce qui, collé à droite d’une valeur, ouvre une autre valeur (nombre, '(', constante, fonction).
fn colle_a_droite(c: &char) -> bool {
    c.is_ascii_digit() || c.is_ascii_alphabetic() || matches!(c, '.' | '(' | 'π')
}

/* ------------------------ 4) Fin des postfixes ------------------------ */

/// Un postfixe (!, ², 1/x) termine une valeur : ce qui suit reçoit un '*'
/// explicite (5!2 = 5!*2, 3²e = 3²*e). Un postfixe suivant reste collé (3!!, 3!²).
pub fn separer_postfixes(texte: &str) -> String {
    let marqueur: Vec<char> = MARQUEUR_INVERSE.chars().collect();
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len() + 8);
    let mut postfixe = false;
    let mut i = 0;

    while i < chars.len() {
        let suite = &chars[i..];
        if postfixe && !suite.starts_with(&marqueur) && colle_a_droite(&chars[i]) {
            out.push('*');
        }

        if suite.starts_with(&marqueur) {
            out.extend(&marqueur);
            i += marqueur.len();
            postfixe = true;
            continue;
        }
        postfixe = matches!(chars[i], '!' | MARQUEUR_CARRE);
        out.push(chars[i]);
        i += 1;
    }

    out
}

/* ------------------------ 4) Constantes ------------------------ */

/// π et e -> littéraux. `e` seulement s’il n’est pas dans un identifiant (exp).
/// Collée à un nombre, une parenthèse ou une fonction, la constante reçoit un '*'
/// explicite (2π = 2*π) : le littéral ne fusionne jamais avec les chiffres voisins.
pub fn substituer_constantes(texte: &str) -> String {
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len() + 32);

    for (i, &c) in chars.iter().enumerate() {
        let avant = i.checked_sub(1).and_then(|j| chars.get(j));
        let apres = chars.get(i + 1);

        let constante = match c {
            'π' => Some(Constante::Pi),
            'e' if !est_lettre(avant) && !est_lettre(apres) => Some(Constante::E),
            _ => None,
        };
        let Some(k) = constante else {
            out.push(c);
            continue;
        };

        if matches!(out.chars().last(), Some(p) if p.is_ascii_digit() || p == '.' || p == ')') {
            out.push('*');
        }
        out.push_str(&format!("{}", k.valeur()));
        if apres.is_some_and(colle_a_droite) {
            out.push('*');
        }
    }

    out
}

/* ------------------------ 5) Factorielles ------------------------ */

/// `n!` -> valeur. Le nombre inclut un moins unaire collé : "-1!" => Domaine.
pub fn reecrire_factorielles(texte: &str) -> Result<String, Echec> {
    let mut out = String::with_capacity(texte.len());

    for c in texte.chars() {
        if c != '!' {
            out.push(c);
            continue;
        }
        let Some(longueur) = nombre_final(&out).map(str::len) else {
            // rien à factoriser : reste tel quel (refusé plus loin)
            out.push(c);
            continue;
        };

        let debut = out.len() - longueur;
        let mut n = lire_nombre(&out[debut..])?;
        let mut coupe = debut;
        if out[..debut].ends_with('-') && moins_unaire(&out[..debut - 1]) {
            n = -n;
            coupe -= 1;
        }

        let v = factorielle(n)?;
        out.truncate(coupe);
        out.push_str(&format!("{v}"));
    }

    Ok(out)
}

/* ------------------------ 6) Carrés ------------------------ */

/// `n²` -> `pow(n,2)`.
pub fn reecrire_carres(texte: &str) -> String {
    let mut out = String::with_capacity(texte.len() + 8);

    for c in texte.chars() {
        if c != MARQUEUR_CARRE {
            out.push(c);
            continue;
        }
        match nombre_final(&out).map(str::to_string) {
            Some(n) => {
                out.truncate(out.len() - n.len());
                out.push_str(&format!("pow({n},2)"));
            }
            None => out.push(c),
        }
    }

    out
}

/* ------------------------ 7) Inverses ------------------------ */

/// `n1/x` -> `(1/n)`.
pub fn reecrire_inverses(texte: &str) -> String {
    let marqueur: Vec<char> = MARQUEUR_INVERSE.chars().collect();
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        if chars[i..].starts_with(&marqueur) {
            if let Some(n) = nombre_final(&out).map(str::to_string) {
                out.truncate(out.len() - n.len());
                out.push_str(&format!("(1/{n})"));
                i += marqueur.len();
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/* ------------------------ 8) Fonctions ------------------------ */

/// Appel `nom(arg)` de premier niveau (indices en octets).
struct Appel {
    fonction: Fonction,
    debut: usize,
    arg: Range<usize>,
    fin: usize,
}

/// Indice de la parenthèse fermante associée à `ouvrante`.
fn parenthese_fermante(octets: &[u8], ouvrante: usize) -> Option<usize> {
    let mut profondeur = 0usize;
    for (i, &b) in octets.iter().enumerate().skip(ouvrante) {
        match b {
            b'(' => profondeur += 1,
            b')' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Repère les appels de premier niveau (les appels imbriqués sont dans `arg`).
/// Les identifiants sont lus en entier : "asin(" ne peut jamais être pris pour "sin(".
fn appels_premier_niveau(texte: &str) -> Result<Vec<Appel>, Echec> {
    let octets = texte.as_bytes();
    let mut appels = Vec::new();
    let mut i = 0;

    while i < octets.len() {
        if !octets[i].is_ascii_lowercase() {
            i += 1;
            continue;
        }

        let debut = i;
        while i < octets.len() && octets[i].is_ascii_lowercase() {
            i += 1;
        }
        let nom = &texte[debut..i];

        let mut p = i;
        while p < octets.len() && octets[p] == b' ' {
            p += 1;
        }
        if p >= octets.len() || octets[p] != b'(' {
            // pas un appel : laissé au parseur
            continue;
        }

        let Some(fonction) = Fonction::depuis_nom(nom) else {
            if Intrinseque::depuis_nom(nom).is_some() {
                // déjà réécrit (pow des carrés) : laissé au parseur
                continue;
            }
            return Err(Echec::syntaxe(format!("fonction inconnue: {nom}")));
        };
        let fermante = parenthese_fermante(octets, p).ok_or(Echec::Incomplet)?;

        appels.push(Appel {
            fonction,
            debut,
            arg: p + 1..fermante,
            fin: fermante + 1,
        });
        i = fermante + 1;
    }

    Ok(appels)
}

/// `nom(arg)` -> appel intrinsèque (conversion degrés selon le mode).
/// Récursif sur l’argument ; remplacements de droite à gauche (indices stables).
pub fn reecrire_fonctions(texte: &str, mode: ModeAngle) -> Result<String, Echec> {
    let appels = appels_premier_niveau(texte)?;
    let mut out = texte.to_string();

    for a in appels.iter().rev() {
        let arg = reecrire_fonctions(&texte[a.arg.clone()], mode)?;
        out.replace_range(a.debut..a.fin, &a.fonction.reecrire(&arg, mode));
    }

    Ok(out)
}

/* ------------------------ 9) Puissances ------------------------ */

/// `a^b` (deux nombres littéraux) -> `pow(a,b)`. Tout autre '^' reste en place.
pub fn reecrire_puissances(texte: &str) -> String {
    let chars: Vec<char> = texte.chars().collect();
    let mut out = String::with_capacity(texte.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '^' {
            let gauche = nombre_final(&out).map(str::to_string);
            let droite = nombre_initial(&chars[i + 1..]);
            if let (Some(a), Some(b)) = (gauche, droite) {
                out.truncate(out.len() - a.len());
                out.push_str(&format!("pow({a},{b})"));
                i += 1 + b.chars().count();
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/* ------------------------ 11) / 12) Normalisations ------------------------ */

/// "2+*3" -> "2*3" : une suite d’opérateurs garde le dernier.
pub fn fusionner_operateurs(texte: &str) -> String {
    let mut out = String::with_capacity(texte.len());
    for c in texte.chars() {
        if est_operateur(c) && matches!(out.chars().last(), Some(p) if est_operateur(p)) {
            out.pop();
        }
        out.push(c);
    }
    out
}

/// "-5+2" -> "0-5+2".
pub fn prefixer_moins(texte: &str) -> String {
    if texte.trim_start().starts_with('-') {
        format!("0{texte}")
    } else {
        texte.to_string()
    }
}
