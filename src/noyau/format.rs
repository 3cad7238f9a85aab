// src/noyau/format.rs
//
// Rendu texte standard d’une suite de termes (grammaire de lecture.rs) :
// - "A * B / C" : exposants positifs après '*', négatifs après '/'
// - exposant ±1 jamais écrit ("m", pas "m^1")
// - suite vide => "1" ; premier terme négatif => "1 / s"
//
// Aller-retour garanti : asterms(format_terms(t)) redonne t (au neutre près).

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::erreur::Result;
use super::fabrique::{termes_bruts, Operand};
use super::terme::{est_unitaire, format_exposant, Term};

/// Littéral du neutre multiplicatif.
pub const NEUTRE: &str = "1";

fn format_facteur(base: &str, e: &BigRational) -> String {
    if est_unitaire(e) {
        base.to_string()
    } else {
        format!("{base}^{}", format_exposant(e))
    }
}

/// Rend des termes tels quels (aucune réduction).
pub fn format_terms(terms: &[Term]) -> String {
    if terms.is_empty() {
        return NEUTRE.to_string();
    }

    let mut out = String::new();
    for (k, t) in terms.iter().enumerate() {
        let e = t.exponent();
        let negatif = e.is_negative();
        let facteur = if negatif {
            format_facteur(t.base(), &e.abs())
        } else if e.is_zero() {
            // seulement possible pour une suite brute
            format!("{}^0", t.base())
        } else {
            format_facteur(t.base(), e)
        };

        match (k, negatif) {
            (0, false) => {}
            (0, true) => {
                out.push_str(NEUTRE);
                out.push_str(" / ");
            }
            (_, false) => out.push_str(" * "),
            (_, true) => out.push_str(" / "),
        }
        out.push_str(&facteur);
    }
    out
}

/// Normalise le texte d’un terme / d’une expression sans toucher au contenu
/// algébrique : espacement des opérateurs, notation des exposants.
///
/// "km^2*J/erg" -> "km^2 * J / erg" ; "a^-1" -> "1 / a" ; "a*a^-1" -> "a / a"
pub fn standard(value: impl Into<Operand>) -> Result<String> {
    let terms = termes_bruts(value.into())?;
    Ok(format_terms(&terms))
}
