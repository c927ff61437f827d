// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier:
// - caractères (chiffres, + - * / . ( ) =) : Event::Text
// - Enter / Escape / Backspace           : Event::Key
// Un chiffre produit aussi un Event::Key : on ne garde que Text pour éviter le doublon.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::Touche;

/// Touches clavier de la frame, dans l’ordre d’arrivée.
fn touches_clavier(ctx: &egui::Context) -> Vec<Touche> {
    ctx.input(|i| {
        let mut touches = Vec::new();
        for ev in &i.events {
            match ev {
                egui::Event::Text(texte) => {
                    let mut tampon = [0u8; 4];
                    touches.extend(
                        texte
                            .chars()
                            .filter_map(|c| Touche::depuis_clavier(c.encode_utf8(&mut tampon))),
                    );
                }
                egui::Event::Key {
                    key: key @ (egui::Key::Enter | egui::Key::Escape | egui::Key::Backspace),
                    pressed: true,
                    ..
                } => touches.extend(Touche::depuis_clavier(key.name())),
                _ => {}
            }
        }
        touches
    })
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for touche in touches_clavier(ctx) {
            self.presser(touche);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
