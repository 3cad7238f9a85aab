// src/noyau/jetons.rs
//
// Tokenisation de la grammaire des unités :
//   facteur (('*' | '/') facteur)*     facteur = base ['^' exposant]
//
// Le lexeur est contextuel : après '^' on lit un exposant (jamais une base),
// ce qui lève l’ambiguïté de '/' :
// - "m^2/3"  -> exposant 2/3 (fraction littérale collée)
// - "m^2/s"  -> m^2 puis division par s
// - "m^2 / 3"-> m^2 puis division par 3

use num_rational::BigRational;
use num_traits::Zero;

use super::erreur::{Result, SymbolicError};
use super::terme::{est_reserve, format_exposant, parse_decimal, parse_rationnel};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    /// Nom de facteur (opaque).
    Base(String),
    /// Exposant déjà converti en rationnel exact.
    Num(BigRational),

    Star,
    Slash,
    Caret, // ^
}

/// Jeton + position (octets) dans le texte source, pour les diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub debut: usize,
    pub fin: usize,
}

/// Tokenize une chaîne d’unités.
/// Supporte:
/// - bases : toute suite sans blanc ni * / ^ ( )
/// - opérateurs * /
/// - exposants après ^ : entier signé, décimal, fraction collée p/q, ou (…)
pub fn tokenize(s: &str) -> Result<Vec<Jeton>> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let fin_texte = s.len();
    let pos = |i: usize| chars.get(i).map(|(p, _)| *p).unwrap_or(fin_texte);

    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let (p, c) = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '*' => {
                out.push(Jeton {
                    tok: Tok::Star,
                    debut: p,
                    fin: pos(i + 1),
                });
                i += 1;
                continue;
            }
            '/' => {
                out.push(Jeton {
                    tok: Tok::Slash,
                    debut: p,
                    fin: pos(i + 1),
                });
                i += 1;
                continue;
            }
            '^' => {
                out.push(Jeton {
                    tok: Tok::Caret,
                    debut: p,
                    fin: pos(i + 1),
                });
                i += 1;

                let (r, debut, suivant) = lire_exposant(s, &chars, i)?;
                out.push(Jeton {
                    tok: Tok::Num(r),
                    debut,
                    fin: pos(suivant),
                });
                i = suivant;
                continue;
            }
            '(' | ')' => {
                return Err(SymbolicError::lecture(
                    &s[p..pos(i + 1)],
                    "parenthèse inattendue (seul un exposant peut être parenthésé)",
                ));
            }
            _ => {}
        }

        // Base : suite maximale de caractères non réservés
        while i < chars.len() && !chars[i].1.is_whitespace() && !est_reserve(chars[i].1) {
            i += 1;
        }
        out.push(Jeton {
            tok: Tok::Base(s[p..pos(i)].to_string()),
            debut: p,
            fin: pos(i),
        });
    }

    Ok(out)
}

/// Lit un exposant à partir de l’indice `i` (juste après '^').
/// Renvoie (valeur, position de début, indice du caractère suivant).
fn lire_exposant(
    s: &str,
    chars: &[(usize, char)],
    mut i: usize,
) -> Result<(BigRational, usize, usize)> {
    let fin_texte = s.len();
    let pos = |k: usize| chars.get(k).map(|(p, _)| *p).unwrap_or(fin_texte);
    let caret = pos(i.saturating_sub(1));

    while i < chars.len() && chars[i].1.is_whitespace() {
        i += 1;
    }
    let debut = pos(i);

    if i >= chars.len() {
        return Err(SymbolicError::lecture(
            &s[caret..],
            "exposant manquant après '^'",
        ));
    }

    // Exposant parenthésé : ^(1/2), ^(-1)
    if chars[i].1 == '(' {
        let ouvrant = i;
        i += 1;
        while i < chars.len() && chars[i].1 != ')' {
            i += 1;
        }
        if i >= chars.len() {
            return Err(SymbolicError::lecture(&s[debut..], "parenthèse non fermée"));
        }
        let contenu = &s[pos(ouvrant + 1)..pos(i)];
        i += 1; // ')'
        let r = parse_rationnel(contenu)
            .ok_or_else(|| SymbolicError::lecture(&s[debut..pos(i)], "exposant invalide"))?;
        return Ok((r, debut, i));
    }

    // Signe éventuel
    let start = i;
    if chars[i].1 == '-' || chars[i].1 == '+' {
        i += 1;
    }

    while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
        i += 1;
    }

    // fraction immédiate: 1/2 (pas d’espaces, chiffre juste après '/')
    if i + 1 < chars.len() && chars[i].1 == '/' && chars[i + 1].1.is_ascii_digit() {
        i += 1;
        while i < chars.len() && (chars[i].1.is_ascii_digit() || chars[i].1 == '.') {
            i += 1;
        }
    }

    let texte = &s[pos(start)..pos(i)];
    if texte.is_empty() {
        // ex: "m^s" : on montre le caractère fautif
        let fin = pos(i + 1);
        return Err(SymbolicError::lecture(&s[debut..fin], "exposant non numérique"));
    }

    let r = match parse_rationnel(texte) {
        Some(r) => r,
        None if denominateur_nul(texte) => {
            return Err(SymbolicError::lecture(
                texte,
                "division par zéro dans un exposant",
            ))
        }
        None => return Err(SymbolicError::lecture(texte, "exposant invalide")),
    };

    // "m^2x" : l’exposant doit être suivi d’un blanc, d’un opérateur ou de la fin
    if i < chars.len() && !chars[i].1.is_whitespace() && !matches!(chars[i].1, '*' | '/' | '^') {
        let fin = pos(i + 1);
        return Err(SymbolicError::lecture(&s[debut..fin], "exposant non numérique"));
    }

    Ok((r, debut, i))
}

fn denominateur_nul(texte: &str) -> bool {
    texte
        .split_once('/')
        .and_then(|(_, d)| parse_decimal(d))
        .is_some_and(|d| d.is_zero())
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match &j.tok {
            Tok::Base(b) => b.clone(),
            Tok::Num(r) => format_exposant(r),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
