//! Noyau de la calculatrice scientifique (sans interface)
//!
//! Organisation interne :
//! - touches.rs    : vocabulaire des touches (boutons + clavier)
//! - fonctions.rs  : fonctions scientifiques, mode d’angle, intrinsèques
//! - saisie.rs     : machine de saisie (expression, aperçu, erreur)
//! - reecriture.rs : réécritures textuelles (constantes, postfixes, appels…)
//! - jetons.rs     : tokenisation
//! - rpn.rs        : shunting-yard + évaluation RPN (f64)
//! - eval.rs       : pipeline complet
//! - format.rs     : affichage décimal arrondi
//! - reglages.rs   : réglages de session
//! - echec.rs      : raisons d’échec

pub mod echec;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod reecriture;
pub mod reglages;
pub mod rpn;
pub mod saisie;
pub mod touches;


#[cfg(test)]
mod tests_fuzz_safe;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale (utilisée par app/)
pub use fonctions::ModeAngle;
pub use reglages::Reglages;
pub use saisie::Saisie;
pub use touches::Touche;
