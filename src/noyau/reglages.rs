// src/noyau/reglages.rs
//
// Réglages de session (pas de persistance).

use super::fonctions::ModeAngle;

/// Décimales affichées par défaut.
pub const DECIMALES_DEFAUT: usize = 12;

/// Garde-fou : au-delà, un f64 n’a plus de chiffres significatifs à montrer.
pub const DECIMALES_MAX: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub decimales: usize,
    pub mode_initial: ModeAngle,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            decimales: DECIMALES_DEFAUT,
            mode_initial: ModeAngle::Deg,
        }
    }
}

impl Reglages {
    /// Borne les décimales à 0..=DECIMALES_MAX.
    pub fn avec_decimales(mut self, decimales: usize) -> Self {
        self.decimales = decimales.min(DECIMALES_MAX);
        self
    }
}
