//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler la saisie et le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariants vérifiés après CHAQUE touche :
//!   "Error" <=> drapeau d’erreur, pas d’opérateurs binaires consécutifs,
//!   pas d’opérateur en tête (hors moins d’un résultat négatif), C => état initial

use std::f64::consts::{E, PI};
use std::time::{Duration, Instant};

use super::echec::Echec;
use super::eval::eval_expression;
use super::fonctions::{Fonction, ModeAngle};
use super::format::formater_nombre;
use super::saisie::{Saisie, TEXTE_ERREUR};
use super::touches::{est_operateur, Constante, Operateur, Touche};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choisir<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Invariants de saisie ------------------------ */

fn check_invariants(s: &Saisie, trace: &[&str]) {
    assert_eq!(
        s.resultat() == TEXTE_ERREUR,
        s.a_erreur(),
        "Error <=> drapeau, trace={trace:?}"
    );
    assert!(!s.affichage_expression().is_empty());

    let chars: Vec<char> = s.expression().chars().collect();
    for w in chars.windows(2) {
        assert!(
            !(est_operateur(w[0]) && est_operateur(w[1])),
            "opérateurs consécutifs dans {:?}, trace={trace:?}",
            s.expression()
        );
    }
    if let Some(&c) = chars.first() {
        assert!(
            !matches!(c, '+' | '*' | '/'),
            "opérateur en tête dans {:?}, trace={trace:?}",
            s.expression()
        );
    }
}

const IDS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "(", ")", "=",
    "⌫", "pi", "e", "!", "1/x", "x²", "^", "sin", "cos", "tan", "asin", "acos", "atan", "sinh",
    "cosh", "tanh", "log", "ln", "exp", "sqrt", "cbrt", "C",
];

fn rejouer(seed: u64, n: usize) -> Vec<(String, String, bool)> {
    let mut rng = Rng::new(seed);
    let mut s = Saisie::default();
    let mut trace = Vec::with_capacity(n);
    let mut sorties = Vec::with_capacity(n);

    for _ in 0..n {
        let id = *rng.choisir(IDS);
        trace.push(id);
        let touche = Touche::depuis_id(id).unwrap_or_else(|| panic!("id inconnu {id:?}"));
        s.presser(touche);
        check_invariants(&s, &trace);

        if touche == Touche::Effacer {
            assert_eq!((s.expression(), s.resultat(), s.a_erreur()), ("", "0", false));
        }
        sorties.push((s.expression().to_string(), s.resultat().to_string(), s.a_erreur()));
    }
    sorties
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Expression tapée touche par touche + valeur de référence (même ordre d’opérations).
struct Genere {
    touches: Vec<Touche>,
    valeur: f64,
}

fn texte(touches: &[Touche]) -> String {
    let mut out = String::new();
    for t in touches {
        match *t {
            Touche::Chiffre(d) => out.push(char::from(b'0' + d)),
            Touche::Point => out.push('.'),
            Touche::Operateur(op) => out.push(op.car()),
            Touche::ParenOuvrante => out.push('('),
            Touche::ParenFermante => out.push(')'),
            Touche::Fonction(f) => {
                out.push_str(f.nom());
                out.push('(');
            }
            Touche::Constante(c) => out.push(c.symbole()),
            autre => panic!("touche non générée: {autre:?}"),
        }
    }
    out
}

fn gen_nombre(rng: &mut Rng) -> Genere {
    let entier = 1 + rng.pick(99);
    let lit = if rng.pick(3) == 0 {
        format!("{entier}.{}", 1 + rng.pick(9))
    } else {
        format!("{entier}")
    };
    let touches = lit
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => Touche::Chiffre(d as u8),
            None => Touche::Point,
        })
        .collect();
    let valeur = lit.parse().unwrap_or_else(|e| panic!("{lit:?}: {e}"));
    Genere { touches, valeur }
}

fn gen_atome(rng: &mut Rng) -> Genere {
    match rng.pick(6) {
        0 => Genere {
            touches: vec![Touche::Constante(Constante::Pi)],
            valeur: PI,
        },
        1 => Genere {
            touches: vec![Touche::Constante(Constante::E)],
            valeur: E,
        },
        2 => {
            // (-n)
            let n = gen_nombre(rng);
            let mut touches = vec![Touche::ParenOuvrante, Touche::Operateur(Operateur::Moins)];
            touches.extend(n.touches);
            touches.push(Touche::ParenFermante);
            Genere {
                touches,
                valeur: -n.valeur,
            }
        }
        _ => gen_nombre(rng),
    }
}

/// Appel en degrés : même calcul que la réécriture (facteur π/180 ou 180/π).
fn appliquer_deg(f: Fonction, x: f64) -> f64 {
    match f {
        Fonction::Sin => (PI / 180.0 * x).sin(),
        Fonction::Cos => (PI / 180.0 * x).cos(),
        Fonction::Atan => 180.0 / PI * x.atan(),
        Fonction::Sqrt => x.sqrt(),
        autre => panic!("fonction non générée: {autre:?}"),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize, avec_division: bool) -> Genere {
    if depth == 0 {
        return gen_atome(rng);
    }

    let nb_ops = if avec_division { 4 } else { 3 };
    match rng.pick(nb_ops + 3) {
        k @ 0..=3 if k < nb_ops => {
            let a = gen_expr(rng, depth - 1, avec_division);
            let b = gen_expr(rng, depth - 1, avec_division);
            let (op, valeur) = match k {
                0 => (Operateur::Plus, a.valeur + b.valeur),
                1 => (Operateur::Moins, a.valeur - b.valeur),
                2 => (Operateur::Fois, a.valeur * b.valeur),
                _ => (Operateur::Divise, a.valeur / b.valeur),
            };
            let mut touches = vec![Touche::ParenOuvrante];
            touches.extend(a.touches);
            touches.push(Touche::Operateur(op));
            touches.extend(b.touches);
            touches.push(Touche::ParenFermante);
            Genere { touches, valeur }
        }
        k if k == nb_ops => gen_atome(rng),
        _ => {
            // sqrt seulement avec division (peut sortir du domaine => Invalide attendu)
            let fonctions: &[Fonction] = if avec_division {
                &[Fonction::Sin, Fonction::Cos, Fonction::Atan, Fonction::Sqrt]
            } else {
                &[Fonction::Sin, Fonction::Cos, Fonction::Atan]
            };
            let f = *rng.choisir(fonctions);
            let arg = gen_expr(rng, depth - 1, avec_division);
            let mut touches = vec![Touche::Fonction(f)];
            touches.extend(arg.touches);
            touches.push(Touche::ParenFermante);
            Genere {
                touches,
                valeur: appliquer_deg(f, arg.valeur),
            }
        }
    }
}

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-12 * b.abs().max(1.0)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_touches_invariants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    for seed in 0..60u64 {
        budget(t0, max);
        rejouer(0xC0FFEE_u64 ^ seed, 80);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    // Même seed => mêmes touches => mêmes états
    assert_eq!(rejouer(0xBADC0DE, 120), rejouer(0xBADC0DE, 120));
}

#[test]
fn fuzz_safe_expressions_vs_reference() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x5EED_u64);
    let mut vu_ok = 0usize;
    let mut vu_invalide = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let g = gen_expr(&mut rng, 4, true);
        let expr = texte(&g.touches);

        match eval_expression(&expr, ModeAngle::Deg) {
            Ok(v) => {
                assert!(g.valeur.is_finite(), "expr={expr:?} attendu non fini, obtenu {v}");
                assert!(proche(v, g.valeur), "expr={expr:?}: {v} vs {}", g.valeur);
                vu_ok += 1;
            }
            Err(e) => {
                // seule erreur admise pour une expression bien formée
                assert_eq!(e, Echec::Invalide, "expr={expr:?}");
                assert!(!g.valeur.is_finite(), "expr={expr:?} attendu {}", g.valeur);
                vu_invalide += 1;
            }
        }
    }

    // On veut voir surtout des succès, sinon le fuzz ne “balaye” rien.
    assert!(vu_ok > 100, "trop peu de succès: {vu_ok} (invalides: {vu_invalide})");
}

#[test]
fn fuzz_safe_frappe_sans_erreur_intermediaire() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..60 {
        budget(t0, max);

        // sans division ni racine : toute valeur intermédiaire est finie
        let g = gen_expr(&mut rng, 3, false);
        let mut s = Saisie::default();
        for (i, &t) in g.touches.iter().enumerate() {
            s.presser(t);
            assert!(
                !s.a_erreur(),
                "erreur après {:?} (touche {i})",
                s.expression()
            );
        }

        assert_eq!(s.expression(), texte(&g.touches));
        assert_eq!(s.resultat(), formater_nombre(g.valeur, 12));

        s.presser(Touche::Egal);
        assert_eq!(s.expression(), formater_nombre(g.valeur, 12));
        assert!(!s.a_erreur());
    }
}
