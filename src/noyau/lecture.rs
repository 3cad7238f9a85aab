// src/noyau/lecture.rs
//
// Jetons -> suite BRUTE de termes (non réduite).
//
// Règles:
// - '/' ne divise que le facteur qui le suit : "a / b * c" => a, b^-1, c
// - '/' en tête accepté ("/s" => s^-1), '*' en tête refusé
// - le facteur "1" est le neutre : absorbé ("1/s" => s^-1, "1" => [])
// - deux facteurs sans opérateur ("m s") => erreur

use num_rational::BigRational;
use num_traits::One;

use super::erreur::{Result, SymbolicError};
use super::jetons::{format_tokens, tokenize, Jeton, Tok};
use super::terme::Term;

/// Décompose un texte en termes bruts, dans l’ordre d’écriture.
pub fn asterms(s: &str) -> Result<Vec<Term>> {
    let termes = lire(s);
    if let Err(e) = &termes {
        log::debug!("asterms({s:?}) refusé: {e}");
    }
    termes
}

fn lire(s: &str) -> Result<Vec<Term>> {
    if s.trim().is_empty() {
        return Err(SymbolicError::lecture(s, "expression vide"));
    }

    let jetons = tokenize(s)?;
    log::trace!("asterms({s:?}) jetons: {}", format_tokens(&jetons));

    let mut out: Vec<Term> = Vec::new();
    let mut i = 0;

    // Signe du prochain facteur : '/' en tête autorisé.
    let mut diviseur = false;
    if let Some(Jeton { tok: Tok::Slash, .. }) = jetons.first() {
        diviseur = true;
        i += 1;
    }

    loop {
        // 1) facteur attendu
        let base = match jetons.get(i) {
            Some(Jeton {
                tok: Tok::Base(b), ..
            }) => b.clone(),
            Some(j) => {
                return Err(SymbolicError::lecture(
                    fragment(s, &jetons, i),
                    match j.tok {
                        Tok::Star | Tok::Slash if i == 0 => "opérateur en tête",
                        Tok::Star | Tok::Slash => "facteur vide entre deux opérateurs",
                        _ => "exposant sans base",
                    },
                ))
            }
            None => {
                return Err(SymbolicError::lecture(
                    fragment(s, &jetons, i.saturating_sub(1)),
                    "opérateur en fin d’expression",
                ))
            }
        };
        i += 1;

        // 2) exposant optionnel
        let mut exposant = BigRational::one();
        if let Some(Jeton { tok: Tok::Caret, .. }) = jetons.get(i) {
            match jetons.get(i + 1) {
                Some(Jeton { tok: Tok::Num(r), .. }) => exposant = r.clone(),
                _ => {
                    return Err(SymbolicError::lecture(
                        fragment(s, &jetons, i),
                        "exposant manquant",
                    ))
                }
            }
            i += 2;
        }

        if diviseur {
            exposant = -exposant;
        }

        let terme = Term::brut(base, exposant);
        if !terme.is_identity() {
            out.push(terme);
        }

        // 3) opérateur ou fin
        match jetons.get(i) {
            None => break,
            Some(Jeton { tok: Tok::Star, .. }) => diviseur = false,
            Some(Jeton { tok: Tok::Slash, .. }) => diviseur = true,
            Some(Jeton { tok: Tok::Caret, .. }) => {
                return Err(SymbolicError::lecture(
                    fragment(s, &jetons, i),
                    "exposant en double",
                ))
            }
            Some(_) => {
                return Err(SymbolicError::lecture(
                    fragment(s, &jetons, i),
                    "opérateur manquant entre deux facteurs",
                ))
            }
        }
        i += 1;
    }

    Ok(out)
}

/// Sous-chaîne fautive : du jeton précédent au jeton `i` (inclus).
fn fragment<'a>(s: &'a str, jetons: &[Jeton], i: usize) -> &'a str {
    let Some(j) = jetons.get(i) else {
        return s.trim();
    };
    let debut = if i > 0 { jetons[i - 1].debut } else { j.debut };
    let fin = jetons
        .get(i + 1)
        .map(|suivant| suivant.fin)
        .unwrap_or(j.fin);
    &s[debut..fin]
}
