//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la machine de saisie et lui transmettre les actions de la vue
//! (boutons, clavier, mode d’angle, décimales).
//!
//! Contrats :
//! - Aucune évaluation ici : tout passe par `Saisie` (noyau).
//! - Une touche = une mutation complète, dans l’ordre d’arrivée.

use crate::noyau::{ModeAngle, Reglages, Saisie, Touche};

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    saisie: Saisie,
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            saisie: Saisie::new(reglages),
        }
    }

    /// Lecture seule pour la vue.
    pub fn saisie(&self) -> &Saisie {
        &self.saisie
    }

    pub fn presser(&mut self, touche: Touche) {
        self.saisie.presser(touche);
    }

    pub fn mode(&self) -> ModeAngle {
        self.saisie.mode()
    }

    pub fn definir_mode(&mut self, mode: ModeAngle) {
        self.saisie.definir_mode(mode);
    }

    pub fn decimales(&self) -> usize {
        self.saisie.reglages().decimales
    }

    /// Garde-fou : borné par `Reglages`.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.saisie.set_decimales(decimales);
    }
}
