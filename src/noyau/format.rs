// src/noyau/format.rs
//
// Affichage d’un résultat numérique
// - entier : sans partie décimale ("120")
// - sinon  : arrondi à `decimales` chiffres (demi -> loin de zéro), zéros finaux retirés
// - toujours en notation décimale simple (jamais 1e21), jamais "-0"
//
// L’arrondi passe par un rationnel exact (la valeur binaire du f64),
// pour éviter les surprises de x * 10^n en flottant.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// "1.250000" -> "1.25" ; "3.000" -> "3" ; "-0" -> "0".
fn nettoyer(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Formate une valeur finie pour l’affichage.
pub fn formater_nombre(v: f64, decimales: usize) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.fract() == 0.0 {
        // Display f64 : jamais d’exposant
        return format!("{v}");
    }

    let Some(r) = BigRational::from_float(v) else {
        // non fini : l’évaluateur ne le laisse pas passer
        return format!("{v}");
    };

    let scaled = (r * BigRational::from_integer(pow10(decimales)))
        .round()
        .to_integer();
    if scaled.is_zero() {
        return "0".to_string();
    }
    nettoyer(scaled_to_decimal(scaled, decimales))
}
