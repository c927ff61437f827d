//! Noyau — machine de saisie
//!
//! Possède l’expression, le résultat affiché, le drapeau d’erreur et le mode d’angle.
//! Chaque touche est traitée entièrement (mutation + aperçu) avant la suivante.
//!
//! Contrats :
//! - jamais deux opérateurs binaires consécutifs (le dernier remplace le précédent)
//! - jamais d’opérateur en tête (le moins initial est géré par l’évaluateur)
//! - l’aperçu ne modifie jamais l’expression ; seul "=" la remplace
//! - « incomplet » => aperçu partiel ; « invalide » => "Error"

use tracing::debug;

use super::echec::Echec;
use super::eval::{eval_expression, parentheses_ouvertes};
use super::fonctions::{Fonction, ModeAngle};
use super::format::formater_nombre;
use super::reecriture::nombre_final;
use super::reglages::Reglages;
use super::touches::{est_operateur, Constante, Touche, MARQUEUR_CARRE, MARQUEUR_INVERSE};

/// Texte affiché à la place du résultat en cas d’échec.
pub const TEXTE_ERREUR: &str = "Error";

#[derive(Clone, Debug)]
pub struct Saisie {
    expression: String,
    resultat: String,
    erreur: bool,
    mode: ModeAngle,
    reglages: Reglages,
}

impl Default for Saisie {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl Saisie {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            expression: String::new(),
            resultat: "0".to_string(),
            erreur: false,
            mode: reglages.mode_initial,
            reglages,
        }
    }

    /* ------------------------ Lecture (rendu) ------------------------ */

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Expression brute, ou "0" si vide.
    pub fn affichage_expression(&self) -> &str {
        match self.expression() {
            "" => "0",
            e => e,
        }
    }

    /// Aperçu / résultat final, ou "Error".
    pub fn resultat(&self) -> &str {
        &self.resultat
    }

    pub fn a_erreur(&self) -> bool {
        self.erreur
    }

    pub fn mode(&self) -> ModeAngle {
        self.mode
    }

    pub fn reglages(&self) -> Reglages {
        self.reglages
    }

    /* ------------------------ Réglages ------------------------ */

    /// Change le mode d’angle : vaut pour les évaluations suivantes seulement.
    pub fn definir_mode(&mut self, mode: ModeAngle) {
        if self.mode != mode {
            debug!(mode = mode.libelle(), "mode d’angle");
        }
        self.mode = mode;
    }

    pub fn set_decimales(&mut self, decimales: usize) {
        self.reglages = self.reglages.avec_decimales(decimales);
    }

    /* ------------------------ Touches ------------------------ */

    /// C : retour à l’état initial (le mode d’angle est conservé).
    pub fn effacer(&mut self) {
        self.expression.clear();
        self.resultat = "0".to_string();
        self.erreur = false;
    }

    /// Traite une touche (bouton ou clavier).
    pub fn presser(&mut self, touche: Touche) {
        // Sortie d’erreur : toute touche sauf C repart d’une expression vide
        if self.erreur && touche != Touche::Effacer {
            self.effacer();
            if matches!(touche, Touche::Egal | Touche::Retour) {
                return;
            }
        }

        match touche {
            Touche::Effacer => {
                self.effacer();
                return;
            }

            Touche::Egal => {
                self.valider();
                return;
            }

            Touche::Retour => {
                self.expression.pop();
            }

            Touche::Fonction(f) => self.ouvrir_appel(f),

            Touche::Constante(c) => self.ajouter_constante(c),

            Touche::Carre => {
                if nombre_final(&self.expression).is_none() {
                    return;
                }
                self.expression.push(MARQUEUR_CARRE);
            }

            Touche::Inverse => {
                // le nombre est en fin d’expression : le marqueur se colle juste après
                if nombre_final(&self.expression).is_none() {
                    return;
                }
                self.expression.push_str(MARQUEUR_INVERSE);
            }

            Touche::Factorielle => self.expression.push('!'),

            Touche::Puissance => self.expression.push('^'),

            Touche::Operateur(op) => {
                // "-" seul : reste d’un résultat négatif effacé au ⌫
                if self.expression.is_empty() || self.expression == "-" {
                    return;
                }
                if self.expression.ends_with(est_operateur) {
                    self.expression.pop();
                }
                self.expression.push(op.car());
            }

            Touche::Point => {
                if nombre_courant(&self.expression).contains('.') {
                    return;
                }
                self.expression.push('.');
            }

            Touche::Chiffre(d) => {
                let Some(c) = char::from_digit(u32::from(d), 10) else {
                    return;
                };
                self.expression.push(c);
            }

            Touche::ParenOuvrante => self.expression.push('('),
            Touche::ParenFermante => self.expression.push(')'),
        }

        debug!(?touche, expression = %self.expression, "touche");
        self.rafraichir_apercu();
    }

    fn ouvrir_appel(&mut self, f: Fonction) {
        self.expression.push_str(f.nom());
        self.expression.push('(');
    }

    fn ajouter_constante(&mut self, c: Constante) {
        self.expression.push(c.symbole());
    }

    /// "=" : évalue l’expression COMPLÈTE ; le résultat devient la nouvelle expression.
    fn valider(&mut self) {
        if self.expression.is_empty() {
            return;
        }
        match eval_expression(&self.expression, self.mode) {
            Ok(v) => {
                let s = formater_nombre(v, self.reglages.decimales);
                debug!(expression = %self.expression, resultat = %s, "validé");
                self.expression = s.clone();
                self.resultat = s;
                self.erreur = false;
            }
            Err(e) => self.marquer_erreur(&e),
        }
    }

    fn marquer_erreur(&mut self, e: &Echec) {
        debug!(echec = %e, expression = %self.expression, "évaluation refusée");
        self.resultat = TEXTE_ERREUR.to_string();
        self.erreur = true;
    }

    fn rafraichir_apercu(&mut self) {
        match apercu(&self.expression, self.mode) {
            Ok(Some(v)) => {
                self.resultat = formater_nombre(v, self.reglages.decimales);
                self.erreur = false;
            }
            Ok(None) => {
                self.resultat = "0".to_string();
                self.erreur = false;
            }
            Err(e) => self.marquer_erreur(&e),
        }
    }
}

/* ------------------------ Aperçu ------------------------ */

/// Aperçu d’une expression en cours de frappe.
/// - Ok(None)    : rien d’évaluable pour l’instant => "0"
/// - Ok(Some(v)) : valeur (éventuellement d’un préfixe)
/// - Err         : invalide => "Error"
///
/// Ordre : parenthèse non fermée, puis opérateur final, puis nom de fonction final.
pub fn apercu(expression: &str, mode: ModeAngle) -> Result<Option<f64>, Echec> {
    if expression.trim().is_empty() {
        return Ok(None);
    }

    // Parenthèse non fermée : préfixe brut avant la dernière '(' ouverte, sinon "0"
    if parentheses_ouvertes(expression) {
        let avant = derniere_ouverture_non_fermee(expression).map_or("", |i| &expression[..i]);
        if avant.trim().is_empty() {
            return Ok(None);
        }
        return Ok(eval_expression(avant, mode).ok());
    }

    // Opérateur final (+ - * / ^) : évalué sans lui
    if let Some(sans) = expression.strip_suffix(|c: char| est_operateur(c) || c == '^') {
        return evaluer_reste(sans, mode);
    }

    // Nom de fonction sans '(' : évalué sans lui
    if let Some(i) = debut_nom_fonction_final(expression) {
        return evaluer_reste(&expression[..i], mode);
    }

    eval_expression(expression, mode).map(Some)
}

/// Reste d’une expression tronquée : "0" si vide, sinon évalué tel quel.
fn evaluer_reste(reste: &str, mode: ModeAngle) -> Result<Option<f64>, Echec> {
    if reste.trim().is_empty() {
        return Ok(None);
    }
    eval_expression(reste, mode).map(Some)
}

/// Début d’un nom de fonction (ou d’un début de nom) en fin de texte.
/// "e" seul est la constante, "x" le marqueur d’inverse : pas des fonctions.
fn debut_nom_fonction_final(texte: &str) -> Option<usize> {
    let debut = texte
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_lowercase())
        .last()
        .map(|(i, _)| i)?;
    let nom = &texte[debut..];
    if nom == "e" {
        return None;
    }
    Fonction::TOUTES
        .iter()
        .any(|f| f.nom().starts_with(nom))
        .then_some(debut)
}

/// Indice de la dernière '(' sans ')' associée.
fn derniere_ouverture_non_fermee(texte: &str) -> Option<usize> {
    let mut pile = Vec::new();
    for (i, c) in texte.char_indices() {
        match c {
            '(' => pile.push(i),
            ')' => {
                pile.pop();
            }
            _ => {}
        }
    }
    pile.pop()
}

/// Nombre en cours de frappe : texte depuis le dernier opérateur ou parenthèse.
fn nombre_courant(texte: &str) -> &str {
    texte
        .rsplit(|c: char| est_operateur(c) || c == '(' || c == ')')
        .next()
        .unwrap_or("")
}
