// src/noyau/fonctions.rs
//
// Fonctions scientifiques + mode d’angle
// --------------------------------------
// - Fonction    : ce que l’utilisateur tape (sin, asin, log, ln, ...)
// - Intrinseque : ce que le parseur final sait calculer (sin, log10, pow, ...)
// - Réécriture  : name(arg) -> intrinsèque, avec conversion degrés si besoin
//
// La conversion ne touche que sin/cos/tan (argument) et asin/acos/atan (résultat).

use std::f64::consts::PI;

/// Mode d’angle (global à la session).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModeAngle {
    #[default]
    Deg,
    Rad,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Deg => "DEG",
            ModeAngle::Rad => "RAD",
        }
    }
}

/// Où s’applique la conversion degrés <-> radians.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Aucune,
    Argument, // sin/cos/tan : x° -> x·π/180
    Resultat, // asin/acos/atan : y rad -> y·180/π
}

/// Fonctions unaires proposées au clavier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log,
    Ln,
    Exp,
    Sqrt,
    Cbrt,
}

impl Fonction {
    /// Table complète, noms les plus longs d’abord.
    pub const TOUTES: [Fonction; 14] = [
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Sqrt,
        Fonction::Cbrt,
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Log,
        Fonction::Exp,
        Fonction::Ln,
    ];

    /// Nom tapé dans l’expression (sans parenthèse).
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Asin => "asin",
            Fonction::Acos => "acos",
            Fonction::Atan => "atan",
            Fonction::Sinh => "sinh",
            Fonction::Cosh => "cosh",
            Fonction::Tanh => "tanh",
            Fonction::Log => "log",
            Fonction::Ln => "ln",
            Fonction::Exp => "exp",
            Fonction::Sqrt => "sqrt",
            Fonction::Cbrt => "cbrt",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    /// Étiquette du bouton.
    pub fn libelle(self) -> &'static str {
        match self {
            Fonction::Asin => "sin⁻¹",
            Fonction::Acos => "cos⁻¹",
            Fonction::Atan => "tan⁻¹",
            Fonction::Exp => "eˣ",
            Fonction::Sqrt => "√",
            Fonction::Cbrt => "∛",
            f => f.nom(),
        }
    }

    fn conversion(self) -> Conversion {
        match self {
            Fonction::Sin | Fonction::Cos | Fonction::Tan => Conversion::Argument,
            Fonction::Asin | Fonction::Acos | Fonction::Atan => Conversion::Resultat,
            _ => Conversion::Aucune,
        }
    }

    fn intrinseque(self) -> Intrinseque {
        match self {
            Fonction::Sin => Intrinseque::Sin,
            Fonction::Cos => Intrinseque::Cos,
            Fonction::Tan => Intrinseque::Tan,
            Fonction::Asin => Intrinseque::Asin,
            Fonction::Acos => Intrinseque::Acos,
            Fonction::Atan => Intrinseque::Atan,
            Fonction::Sinh => Intrinseque::Sinh,
            Fonction::Cosh => Intrinseque::Cosh,
            Fonction::Tanh => Intrinseque::Tanh,
            Fonction::Log => Intrinseque::Log10,
            Fonction::Ln => Intrinseque::Ln,
            Fonction::Exp => Intrinseque::Exp,
            Fonction::Sqrt => Intrinseque::Sqrt,
            Fonction::Cbrt => Intrinseque::Cbrt,
        }
    }

    /// Réécrit `nom(arg)` en appel intrinsèque, selon le mode d’angle.
    ///
    /// Exemple (Deg): sin(30) -> sin(0.017453292519943295*(30))
    pub fn reecrire(self, arg: &str, mode: ModeAngle) -> String {
        let nom = self.intrinseque().nom();
        match (self.conversion(), mode) {
            (Conversion::Argument, ModeAngle::Deg) => {
                format!("{nom}({}*({arg}))", PI / 180.0)
            }
            (Conversion::Resultat, ModeAngle::Deg) => {
                format!("({}*{nom}({arg}))", 180.0 / PI)
            }
            _ => format!("{nom}({arg})"),
        }
    }
}

/// Appels compris par le parseur final (après réécriture).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intrinseque {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Log10,
    Ln,
    Exp,
    Sqrt,
    Cbrt,
    Pow,
}

impl Intrinseque {
    const TOUTES: [Intrinseque; 15] = [
        Intrinseque::Sin,
        Intrinseque::Cos,
        Intrinseque::Tan,
        Intrinseque::Asin,
        Intrinseque::Acos,
        Intrinseque::Atan,
        Intrinseque::Sinh,
        Intrinseque::Cosh,
        Intrinseque::Tanh,
        Intrinseque::Log10,
        Intrinseque::Ln,
        Intrinseque::Exp,
        Intrinseque::Sqrt,
        Intrinseque::Cbrt,
        Intrinseque::Pow,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Intrinseque::Sin => "sin",
            Intrinseque::Cos => "cos",
            Intrinseque::Tan => "tan",
            Intrinseque::Asin => "asin",
            Intrinseque::Acos => "acos",
            Intrinseque::Atan => "atan",
            Intrinseque::Sinh => "sinh",
            Intrinseque::Cosh => "cosh",
            Intrinseque::Tanh => "tanh",
            Intrinseque::Log10 => "log10",
            Intrinseque::Ln => "ln",
            Intrinseque::Exp => "exp",
            Intrinseque::Sqrt => "sqrt",
            Intrinseque::Cbrt => "cbrt",
            Intrinseque::Pow => "pow",
        }
    }

    pub fn depuis_nom(nom: &str) -> Option<Intrinseque> {
        Intrinseque::TOUTES.into_iter().find(|i| i.nom() == nom)
    }

    pub fn arite(self) -> usize {
        match self {
            Intrinseque::Pow => 2,
            _ => 1,
        }
    }

    /// `args.len()` == `arite()` (vérifié par l’appelant).
    pub fn appliquer(self, args: &[f64]) -> f64 {
        let x = args[0];
        match self {
            Intrinseque::Sin => x.sin(),
            Intrinseque::Cos => x.cos(),
            Intrinseque::Tan => x.tan(),
            Intrinseque::Asin => x.asin(),
            Intrinseque::Acos => x.acos(),
            Intrinseque::Atan => x.atan(),
            Intrinseque::Sinh => x.sinh(),
            Intrinseque::Cosh => x.cosh(),
            Intrinseque::Tanh => x.tanh(),
            Intrinseque::Log10 => x.log10(),
            Intrinseque::Ln => x.ln(),
            Intrinseque::Exp => x.exp(),
            Intrinseque::Sqrt => x.sqrt(),
            Intrinseque::Cbrt => x.cbrt(),
            Intrinseque::Pow => x.powf(args[1]),
        }
    }
}
