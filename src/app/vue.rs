// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - DEG / RAD exclusifs, écran (expression + résultat), pavé, décimales
// - Tactile : gros boutons ; chaque bouton = une Touche du noyau
//
// Note :
// - Le clavier est lu dans app.rs (événements globaux), pas ici.

use eframe::egui;

use crate::noyau::reglages::DECIMALES_MAX;
use crate::noyau::{ModeAngle, Touche};

use super::etat::AppCalc;

/// Pavé de référence (identifiants de boutons, rangée par rangée).
const PAVE: &[&[&str]] = &[
    &["C", "⌫", "(", ")", "/"],
    &["sin", "cos", "tan", "asin", "*"],
    &["acos", "atan", "sinh", "cosh", "-"],
    &["tanh", "log", "ln", "exp", "+"],
    &["sqrt", "cbrt", "^", "x²", "="],
    &["pi", "e", "!", "1/x"],
    &["7", "8", "9"],
    &["4", "5", "6"],
    &["1", "2", "3"],
    &["0", "."],
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_mode(ui);
                ui.add_space(6.0);

                self.ui_ecran(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reglages(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut mode = self.mode();
            for m in [ModeAngle::Deg, ModeAngle::Rad] {
                ui.selectable_value(&mut mode, m, m.libelle());
            }
            if mode != self.mode() {
                self.definir_mode(mode);
            }
        });
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        let saisie = self.saisie();

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.monospace(saisie.affichage_expression());

                    let resultat = egui::RichText::new(saisie.resultat()).monospace().size(26.0);
                    // Erreur : résultat en rouge
                    let resultat = if saisie.a_erreur() {
                        resultat.color(ui.visuals().error_fg_color)
                    } else {
                        resultat.strong()
                    };
                    ui.label(resultat);
                });
            });
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in PAVE {
                    for id in *rangee {
                        self.bouton_touche(ui, id);
                    }
                    ui.end_row();
                }
            });
    }

    fn bouton_touche(&mut self, ui: &mut egui::Ui, id: &str) {
        let Some(touche) = Touche::depuis_id(id) else {
            ui.label("");
            return;
        };

        let resp = ui.add_sized([58.0, 34.0], egui::Button::new(touche.libelle()));
        if resp.clicked() {
            self.presser(touche);
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Décimales :");
            let mut d = self.decimales() as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=DECIMALES_MAX as u32),
            );
            if resp.changed() {
                self.set_decimales(d as usize);
            }
        });
    }
}
