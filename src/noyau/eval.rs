//! Noyau — évaluation (pipeline réel)
//!
//! contrôles (vide, parenthèses, appel ouvert)
//!   -> fin des postfixes -> constantes -> factorielles -> carrés -> inverses
//!   -> fonctions -> puissances
//!   -> contrôles (vide, opérateur final) -> fusion opérateurs -> moins initial
//!   -> jetons -> RPN -> f64 -> contrôle fini
//!
//! Aucune évaluation de code : le dernier étage est un shunting-yard (rpn.rs).

use tracing::trace;

use super::echec::Echec;
use super::fonctions::ModeAngle;
use super::jetons::{format_tokens, tokenize};
use super::reecriture::{
    fusionner_operateurs, prefixer_moins, reecrire_carres, reecrire_factorielles,
    reecrire_fonctions, reecrire_inverses, reecrire_puissances, separer_postfixes,
    substituer_constantes,
};
use super::rpn::{eval_rpn, to_rpn};
use super::touches::est_operateur;

/// Plus de '(' que de ')' ?
pub fn parentheses_ouvertes(texte: &str) -> bool {
    let ouvertes = texte.chars().filter(|&c| c == '(').count();
    let fermees = texte.chars().filter(|&c| c == ')').count();
    ouvertes > fermees
}

/// Texte terminé par `nom(` (appel entamé, rien après).
fn fin_appel_ouvert(texte: &str) -> bool {
    match texte.trim_end().strip_suffix('(') {
        Some(avant) => avant
            .trim_end()
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_lowercase()),
        None => false,
    }
}

/// API publique : évalue une expression saisie, selon le mode d’angle.
pub fn eval_expression(texte: &str, mode: ModeAngle) -> Result<f64, Echec> {
    // 1) Vide
    if texte.trim().is_empty() {
        return Err(Echec::Vide);
    }

    // 2) / 3) Incomplet : parenthèses ouvertes ou appel entamé
    if parentheses_ouvertes(texte) || fin_appel_ouvert(texte) {
        return Err(Echec::Incomplet);
    }

    // 4) .. 9) Réécritures
    let s = substituer_constantes(&separer_postfixes(texte));
    let s = reecrire_factorielles(&s)?;
    let s = reecrire_carres(&s);
    let s = reecrire_inverses(&s);
    let s = reecrire_fonctions(&s, mode)?;
    let s = reecrire_puissances(&s);

    // 10) Vide ou opérateur final
    let s = s.trim();
    if s.is_empty() || s.chars().last().is_some_and(est_operateur) {
        return Err(Echec::Incomplet);
    }

    // 11) / 12) Normalisations
    let s = prefixer_moins(&fusionner_operateurs(s));
    trace!(entree = texte, reecrit = %s, "texte réécrit");

    // 13) Jetons -> RPN -> valeur
    let jetons = tokenize(&s)?;
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "postfixe");
    let v = eval_rpn(&rpn)?;

    // 14) Fini seulement
    if !v.is_finite() {
        return Err(Echec::Invalide);
    }
    Ok(v)
}
