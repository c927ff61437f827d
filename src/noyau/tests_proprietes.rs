//! Tests de propriétés (proptest) : arithmétique de référence, arrondi d’affichage,
//! fusion des opérateurs, effacement.

use proptest::prelude::*;

use super::eval::eval_expression;
use super::fonctions::ModeAngle;
use super::format::formater_nombre;
use super::saisie::Saisie;
use super::touches::{Operateur, Touche};

const OPS: [Operateur; 4] = [
    Operateur::Plus,
    Operateur::Moins,
    Operateur::Fois,
    Operateur::Divise,
];

/// Évaluation de référence d’une suite plate `a0 op0 a1 op1 a2 ...` :
/// * et / dans le terme courant, + et - cumulés de gauche à droite.
fn reference(nombres: &[u32], ops: &[usize]) -> f64 {
    fn cumuler(total: f64, signe: Operateur, terme: f64) -> f64 {
        match signe {
            Operateur::Moins => total - terme,
            _ => total + terme,
        }
    }

    let mut total = 0.0;
    let mut signe = Operateur::Plus;
    let mut terme = f64::from(nombres[0]);

    for (k, &i) in ops.iter().enumerate() {
        let b = f64::from(nombres[k + 1]);
        match OPS[i] {
            Operateur::Fois => terme *= b,
            Operateur::Divise => terme /= b,
            op => {
                total = cumuler(total, signe, terme);
                signe = op;
                terme = b;
            }
        }
    }
    cumuler(total, signe, terme)
}

fn texte_plat(nombres: &[u32], ops: &[usize]) -> String {
    let mut s = nombres[0].to_string();
    for (k, &i) in ops.iter().enumerate() {
        s.push(OPS[i].car());
        s.push_str(&nombres[k + 1].to_string());
    }
    s
}

fn suite_plate() -> impl Strategy<Value = (Vec<u32>, Vec<usize>)> {
    (1usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(1u32..1000, n + 1),
            prop::collection::vec(0usize..4, n),
        )
    })
}

fn touche_quelconque() -> impl Strategy<Value = Touche> {
    prop::sample::select(vec![
        "0", "1", "2", "5", "9", ".", "+", "-", "*", "/", "(", ")", "=", "⌫", "pi", "e", "!",
        "1/x", "x²", "^", "sin", "atan", "ln", "sqrt", "C",
    ])
    .prop_map(|id| Touche::depuis_id(id).unwrap_or(Touche::Effacer))
}

proptest! {
    #[test]
    fn prop_arithmetique_plate((nombres, ops) in suite_plate()) {
        let expr = texte_plat(&nombres, &ops);
        let attendu = reference(&nombres, &ops);
        let v = eval_expression(&expr, ModeAngle::Deg);
        prop_assert_eq!(v, Ok(attendu), "expr={}", expr);
    }

    #[test]
    fn prop_parentheses_englobantes((nombres, ops) in suite_plate(), k in 1u32..50) {
        let expr = format!("({})*{k}", texte_plat(&nombres, &ops));
        let attendu = reference(&nombres, &ops) * f64::from(k);
        prop_assert_eq!(eval_expression(&expr, ModeAngle::Rad), Ok(attendu));
    }

    #[test]
    fn prop_affichage_aller_retour(v in -1.0e6f64..1.0e6) {
        let s = formater_nombre(v, 12);
        prop_assert!(!s.contains('e') && !s.contains('E'), "{}", s);
        prop_assert!(s != "-0");

        let relu: f64 = s.parse().map_err(|e| TestCaseError::fail(format!("{s:?}: {e}")))?;
        let tolerance = 0.5e-12 + v.abs() * 4.0 * f64::EPSILON;
        prop_assert!((relu - v).abs() <= tolerance, "{} -> {} ({})", v, s, relu);
    }

    #[test]
    fn prop_fusion_operateurs(d in 0u8..10, a in 0usize..4, b in 0usize..4) {
        let mut s = Saisie::default();
        s.presser(Touche::Chiffre(d));
        s.presser(Touche::Operateur(OPS[a]));
        let longueur = s.expression().len();
        s.presser(Touche::Operateur(OPS[b]));
        prop_assert_eq!(s.expression().len(), longueur);
        prop_assert_eq!(s.expression().chars().last(), Some(OPS[b].car()));
    }

    #[test]
    fn prop_effacer_idempotent(touches in prop::collection::vec(touche_quelconque(), 0..40)) {
        let mut s = Saisie::default();
        for t in touches {
            s.presser(t);
        }
        s.presser(Touche::Effacer);
        prop_assert_eq!((s.expression(), s.resultat(), s.a_erreur()), ("", "0", false));
        s.presser(Touche::Effacer);
        prop_assert_eq!((s.expression(), s.resultat(), s.a_erreur()), ("", "0", false));
    }

    #[test]
    fn prop_mode_sans_effet_immediat(touches in prop::collection::vec(touche_quelconque(), 0..30)) {
        let mut s = Saisie::default();
        for t in touches {
            s.presser(t);
        }
        let avant = (s.expression().to_string(), s.resultat().to_string(), s.a_erreur());
        s.definir_mode(ModeAngle::Rad);
        let apres = (s.expression().to_string(), s.resultat().to_string(), s.a_erreur());
        prop_assert_eq!(avant, apres);
    }
}
