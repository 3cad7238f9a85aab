//! Noyau symbolique Q-pur
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie des erreurs (type / valeur / lecture / produit / rapport)
//! - terme.rs      : Term (base, exposant rationnel exact)
//! - jetons.rs     : tokenisation de la grammaire des unités
//! - lecture.rs    : asterms (texte -> termes bruts)
//! - canon.rs      : reduce (forme canonique)
//! - format.rs     : standard (rendu texte "A * B / C")
//! - fabrique.rs   : Operand + expression / term + composition
//! - expr.rs       : Expression et ses opérateurs
//! - operations.rs : equality / product / ratio / power

pub mod canon;
pub mod erreur;
pub mod expr;
pub mod fabrique;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod operations;
pub mod terme;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use canon::reduce;
pub use erreur::{Result, SymbolicError};
pub use expr::Expression;
pub use fabrique::{composition, expression_factory, term_factory, Operand, Scalar};
pub use format::standard;
pub use lecture::asterms;
pub use operations::{equality, power, product, ratio};
pub use terme::Term;
