// src/noyau/echec.rs
//
// Échecs d’évaluation (jamais fatals).
// La saisie distingue « incomplet » (aperçu partiel) du reste (affiche "Error").

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Echec {
    /// Entrée vide ou blanche.
    #[error("Entrée vide")]
    Vide,

    /// Parenthèses ouvertes, opérateur final, appel de fonction entamé.
    #[error("expression incomplète")]
    Incomplet,

    /// Factorielle d’un négatif ou d’un non-entier.
    #[error("hors domaine (factorielle)")]
    Domaine,

    /// Résultat NaN ou infini.
    #[error("résultat non fini")]
    Invalide,

    /// Texte réécrit mal formé.
    #[error("syntaxe: {0}")]
    Syntaxe(String),
}

impl Echec {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Echec::Syntaxe(msg.into())
    }
}
