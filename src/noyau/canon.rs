// src/noyau/canon.rs
//
// Canonicalisation (déterministe) d’une suite de termes :
// - regroupement par base (somme exacte des exposants)
// - suppression des exposants nuls et du neutre "1"
// - ordre : exposants positifs (ordre de première apparition),
//           puis négatifs (ordre de première apparition)
//
// C’est le SEUL point qui garantit l’invariant d’Expression :
// au plus un terme par base, aucun exposant nul.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use std::collections::HashMap;

use super::terme::Term;

/// Forme canonique d’une suite de termes quelconque.
pub fn reduce<I>(terms: I) -> Vec<Term>
where
    I: IntoIterator<Item = Term>,
{
    // (base, somme) dans l’ordre de première apparition
    let mut groupes: Vec<(String, BigRational)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entree = 0usize;

    for t in terms {
        entree += 1;
        if t.is_identity() {
            continue;
        }
        match index.get(t.base()) {
            Some(&k) => groupes[k].1 += t.exponent(),
            None => {
                index.insert(t.base().to_string(), groupes.len());
                groupes.push((t.base().to_string(), t.exponent().clone()));
            }
        }
    }

    // Partition stable : positifs d’abord, puis négatifs ; zéros retirés.
    let (positifs, negatifs): (Vec<_>, Vec<_>) = groupes
        .into_iter()
        .filter(|(_, e)| !e.is_zero())
        .partition(|(_, e)| e.is_positive());

    let out: Vec<Term> = positifs
        .into_iter()
        .chain(negatifs)
        .map(|(base, e)| Term::brut(base, e))
        .collect();

    log::trace!("reduce: {entree} termes -> {}", out.len());
    out
}

/// Clef de comparaison indépendante de l’ordre : termes triés par base.
/// Sert à l’égalité et au hash d’Expression (comparaison de multiensembles).
pub(crate) fn contenu_trie(terms: &[Term]) -> Vec<&Term> {
    let mut v: Vec<&Term> = terms.iter().collect();
    // Ord de Term : (base, exposant)
    v.sort();
    v
}

/// Vrai si la suite respecte déjà l’invariant canonique.
pub(crate) fn est_canonique(terms: &[Term]) -> bool {
    let mut vues = std::collections::HashSet::new();
    let mut negatif_vu = false;
    for t in terms {
        if t.exponent().is_zero() || t.is_identity() || !vues.insert(t.base()) {
            return false;
        }
        if t.exponent().is_negative() {
            negatif_vu = true;
        } else if negatif_vu {
            return false;
        }
    }
    true
}
