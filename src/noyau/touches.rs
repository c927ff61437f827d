// src/noyau/touches.rs
//
// Touches logiques de la calculatrice.
// Boutons et clavier physique aboutissent au même `Touche`.

use super::fonctions::Fonction;

/// Marqueur postfixe de l’inverse (tapé tel quel dans l’expression).
pub const MARQUEUR_INVERSE: &str = "1/x";

/// Marqueur postfixe du carré.
pub const MARQUEUR_CARRE: char = '²';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
}

impl Operateur {
    pub fn car(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '*',
            Operateur::Divise => '/',
        }
    }

    pub fn depuis_car(c: char) -> Option<Operateur> {
        match c {
            '+' => Some(Operateur::Plus),
            '-' => Some(Operateur::Moins),
            '*' => Some(Operateur::Fois),
            '/' => Some(Operateur::Divise),
            _ => None,
        }
    }
}

/// Opérateur binaire (+ - * /) ?
pub fn est_operateur(c: char) -> bool {
    Operateur::depuis_car(c).is_some()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn symbole(self) -> char {
        match self {
            Constante::Pi => 'π',
            Constante::E => 'e',
        }
    }

    pub fn valeur(self) -> f64 {
        match self {
            Constante::Pi => std::f64::consts::PI,
            Constante::E => std::f64::consts::E,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Touche {
    Chiffre(u8),
    Point,
    Operateur(Operateur),
    ParenOuvrante,
    ParenFermante,
    Egal,
    Effacer,
    Retour,
    Fonction(Fonction),
    Constante(Constante),
    Carre,
    Inverse,
    Factorielle,
    Puissance,
}

impl Touche {
    /// Identifiant de bouton -> touche (pavé de référence).
    pub fn depuis_id(id: &str) -> Option<Touche> {
        let t = match id {
            "." => Touche::Point,
            "=" => Touche::Egal,
            "C" => Touche::Effacer,
            "⌫" => Touche::Retour,
            "(" => Touche::ParenOuvrante,
            ")" => Touche::ParenFermante,
            "pi" => Touche::Constante(Constante::Pi),
            "e" => Touche::Constante(Constante::E),
            "!" => Touche::Factorielle,
            "1/x" => Touche::Inverse,
            "x²" => Touche::Carre,
            "^" | "pow" => Touche::Puissance,
            _ => {
                return Touche::chiffre_ou_operateur(id)
                    .or_else(|| Fonction::depuis_nom(id).map(Touche::Fonction))
            }
        };
        Some(t)
    }

    /// Touche clavier (noms façon DOM : "7", "+", "Enter", "Escape", ...).
    /// Toute autre touche est ignorée.
    pub fn depuis_clavier(cle: &str) -> Option<Touche> {
        match cle {
            "Enter" | "=" => Some(Touche::Egal),
            "Escape" => Some(Touche::Effacer),
            "Backspace" => Some(Touche::Retour),
            "." => Some(Touche::Point),
            "(" => Some(Touche::ParenOuvrante),
            ")" => Some(Touche::ParenFermante),
            _ => Touche::chiffre_ou_operateur(cle),
        }
    }

    fn chiffre_ou_operateur(s: &str) -> Option<Touche> {
        let mut it = s.chars();
        let c = it.next()?;
        if it.next().is_some() {
            return None;
        }
        if let Some(d) = c.to_digit(10) {
            return Some(Touche::Chiffre(d as u8));
        }
        Operateur::depuis_car(c).map(Touche::Operateur)
    }

    /// Étiquette du bouton.
    pub fn libelle(self) -> String {
        match self {
            Touche::Chiffre(d) => d.to_string(),
            Touche::Point => ".".into(),
            Touche::Operateur(Operateur::Plus) => "+".into(),
            Touche::Operateur(Operateur::Moins) => "−".into(),
            Touche::Operateur(Operateur::Fois) => "×".into(),
            Touche::Operateur(Operateur::Divise) => "÷".into(),
            Touche::ParenOuvrante => "(".into(),
            Touche::ParenFermante => ")".into(),
            Touche::Egal => "=".into(),
            Touche::Effacer => "C".into(),
            Touche::Retour => "⌫".into(),
            Touche::Fonction(f) => f.libelle().into(),
            Touche::Constante(c) => c.symbole().to_string(),
            Touche::Carre => "x²".into(),
            Touche::Inverse => "1/x".into(),
            Touche::Factorielle => "n!".into(),
            Touche::Puissance => "xʸ".into(),
        }
    }
}
