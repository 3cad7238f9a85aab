// src/lib.rs
//
// Symbolique Q-pur — moteur d’algèbre de termes pour unités / dimensions
// ----------------------------------------------------------------------
// Une unité ("km^2 * J / erg") est un produit de facteurs nommés, chacun
// élevé à un exposant rationnel exact. Le noyau sait :
// - lire le texte (asterms), valider toute entrée (expression / term)
// - combiner : *, /, puissance ; réduire en forme canonique (reduce)
// - comparer indépendamment de l’ordre ; réécrire le texte (standard)
//
// Aucun calcul numérique, aucune connaissance des unités physiques :
// les bases sont des symboles opaques. Tout est immuable => Send + Sync.
//
// Exemple :
//   let v = symbolique_qpur::expression("m / s")?;
//   let a = v.try_div("s")?;            // m / s^2
//   assert_eq!(a.to_string(), "m / s^2");

pub mod noyau;

pub use noyau::{
    asterms, composition, equality, power, product, ratio, reduce, standard, Expression,
    Operand, Result, Scalar, SymbolicError, Term,
};

// Noms courts de la fabrique : expression(…) / term(…)
pub use noyau::{expression_factory as expression, term_factory as term};
