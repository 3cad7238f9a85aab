//! Noyau — opérations symboliques (API publique)
//!
//! Chaque opérande passe d’abord par la fabrique ; l’opérande droit d’un
//! produit / rapport non convertible devient une erreur Product / Ratio.

use super::erreur::Result;
use super::expr::Expression;
use super::fabrique::{expression_factory, Operand};

/// a == b, symboliquement (contenu canonique).
pub fn equality(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<bool> {
    let x = expression_factory(a)?;
    let y = expression_factory(b)?;
    Ok(x == y)
}

/// a * b
pub fn product(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Expression> {
    expression_factory(a)?.try_mul(b)
}

/// a / b
pub fn ratio(a: impl Into<Operand>, b: impl Into<Operand>) -> Result<Expression> {
    expression_factory(a)?.try_div(b)
}

/// a ** n
pub fn power(a: impl Into<Operand>, n: impl Into<Operand>) -> Result<Expression> {
    expression_factory(a)?.try_pow(n)
}
