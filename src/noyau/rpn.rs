// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l’évaluer sur une pile de f64 (aucune évaluation de code)
//
// Règles:
// - Ident(name) : seulement les intrinsèques (sin, log10, pow, ...) suivis de '('
// - Moins unaire : '-' quand on n’attend PAS une opérande binaire => Tok::Neg,
//   priorité la plus haute, associatif à droite
// - Virgule : sépare les arguments d’un appel (pow(a,b)), arité vérifiée à ')'
// - Pas de multiplication implicite : deux valeurs collées => erreur

use super::echec::Echec;
use super::fonctions::Intrinseque;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Neg)
}

/// Parenthèse ouverte sur la pile : appel de fonction ou simple groupement.
struct Ouverture {
    appel: Option<Intrinseque>,
    args: usize,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("pow"), LPar, Num(2), Comma, Num(3), RPar, Star, Num(4)]
///   rpn:    [Num(2), Num(3), Ident("pow"), Num(4), Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, Echec> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();
    let mut ouvertures: Vec<Ouverture> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire et les valeurs collées.
    let mut prev_was_value = false;

    let mut iter = tokens.iter().cloned().peekable();
    while let Some(tok) = iter.next() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(Echec::syntaxe("opérateur manquant"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(Echec::syntaxe("opérateur manquant"));
                }
                let f = Intrinseque::depuis_nom(&name)
                    .ok_or_else(|| Echec::syntaxe(format!("identifiant inconnu: {name}")))?;
                if iter.next() != Some(Tok::LPar) {
                    return Err(Echec::syntaxe(format!("{name} sans parenthèse")));
                }
                ops.push(Tok::LPar);
                ouvertures.push(Ouverture {
                    appel: Some(f),
                    args: 1,
                });
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(Echec::syntaxe("opérateur manquant avant '('"));
                }
                ops.push(Tok::LPar);
                ouvertures.push(Ouverture {
                    appel: None,
                    args: 1,
                });
                prev_was_value = false;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(Echec::syntaxe("argument vide"));
                }
                depile_jusqua_parenthese(&mut ops, &mut out);
                match ouvertures.last_mut() {
                    Some(o) if o.appel.is_some() => o.args += 1,
                    _ => return Err(Echec::syntaxe("virgule hors d’un appel")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(Echec::syntaxe("parenthèse vide ou opérande manquante"));
                }
                depile_jusqua_parenthese(&mut ops, &mut out);
                if ops.pop() != Some(Tok::LPar) {
                    return Err(Echec::syntaxe("parenthèse fermante en trop"));
                }
                let o = ouvertures
                    .pop()
                    .ok_or_else(|| Echec::syntaxe("parenthèse fermante en trop"))?;

                // appel : la fonction sort juste après son argument
                if let Some(f) = o.appel {
                    if o.args != f.arite() {
                        return Err(Echec::syntaxe(format!(
                            "{} attend {} argument(s)",
                            f.nom(),
                            f.arite()
                        )));
                    }
                    out.push(Tok::Ident(f.nom().to_string()));
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // unaire : rien à dépiler (priorité max, associatif à droite)
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                if !prev_was_value {
                    return Err(Echec::syntaxe("opérande gauche manquante"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(Echec::syntaxe("jeton inattendu")),
        }
    }

    if !prev_was_value {
        return Err(Echec::syntaxe("opérande manquante en fin d’expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(Echec::Incomplet);
        }
        out.push(op);
    }

    Ok(out)
}

fn depile_jusqua_parenthese(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }
}

/// Évalue une RPN sur une pile de f64.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, Echec> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Neg => {
                let a = st.pop().ok_or_else(|| Echec::syntaxe("expression invalide"))?;
                st.push(-a);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or_else(|| Echec::syntaxe("expression invalide"))?;
                let a = st.pop().ok_or_else(|| Echec::syntaxe("expression invalide"))?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => a / b,
                };
                st.push(v);
            }

            Tok::Ident(name) => {
                let f = Intrinseque::depuis_nom(name)
                    .ok_or_else(|| Echec::syntaxe(format!("identifiant inconnu: {name}")))?;
                let n = f.arite();
                if st.len() < n {
                    return Err(Echec::syntaxe(format!("{name} sans argument")));
                }
                let args = st.split_off(st.len() - n);
                st.push(f.appliquer(&args));
            }

            Tok::Comma | Tok::LPar | Tok::RPar => {
                return Err(Echec::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(Echec::syntaxe("expression invalide")),
    }
}
