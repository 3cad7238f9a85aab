// src/noyau/expr.rs
//
// Expression = produit de puissances, forme canonique (canon.rs) :
// - au plus un terme par base, aucun exposant nul
// - positifs d’abord puis négatifs (ordre de première apparition)
// - neutre = suite vide, rendu "1"
//
// IMPORTANT :
// - toute nouvelle suite de termes passe par reduce() (depuis_termes)
// - jamais de mutation : chaque opération rend une nouvelle valeur
// - égalité / hash sur le CONTENU (multiensemble), pas sur l’ordre en mémoire

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Pow, Zero};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Div, Mul};
use std::str::FromStr;

use super::canon::{contenu_trie, est_canonique, reduce};
use super::erreur::{Result, SymbolicError};
use super::fabrique::{expression_factory, Operand};
use super::format::format_terms;
use super::terme::{exposant_entier, Term};

/// Garde-fou : au-delà, un « nombre pur » n’est pas évalué (pas de BigInt géant).
const MAX_EXPOSANT_NUMERIQUE: i64 = 1024;

#[derive(Clone, Debug, Default)]
pub struct Expression {
    terms: Vec<Term>,
}

impl Expression {
    /// Neutre multiplicatif ("1").
    pub fn identity() -> Self {
        Expression::default()
    }

    /// Seul constructeur : réduit toujours.
    pub(crate) fn depuis_termes<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = Term>,
    {
        let terms = reduce(terms);
        debug_assert!(est_canonique(&terms));
        Expression { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, base: &str) -> bool {
        self.terms.iter().any(|t| t.base() == base)
    }

    pub fn exponent_of(&self, base: &str) -> Option<&BigRational> {
        self.terms
            .iter()
            .find(|t| t.base() == base)
            .map(|t| t.exponent())
    }

    /// 1 / self
    pub fn inverse(&self) -> Expression {
        Expression::depuis_termes(self.terms.iter().map(Term::inverse))
    }

    /// self ** n, n rationnel exact. n == 0 => neutre.
    pub fn pow_rational(&self, n: &BigRational) -> Expression {
        if n.is_zero() {
            return Expression::identity();
        }
        Expression::depuis_termes(self.terms.iter().map(|t| t.pow(n)))
    }

    /// Valeur d’une expression « nombre pur » : neutre (1), ou produit de
    /// littéraux numériques à exposant entier ("2", "10^3 / 4").
    pub fn pure_number(&self) -> Option<BigRational> {
        let mut acc = BigRational::one();
        for t in &self.terms {
            let base = t.base_numerique()?;
            let n = exposant_entier(t.exponent())?;
            if n.abs() > MAX_EXPOSANT_NUMERIQUE || (base.is_zero() && n < 0) {
                return None;
            }
            acc *= rational_pow_int(base, n);
        }
        Some(acc)
    }

    /// self * rhs, rhs quelconque ; rhs non convertible => Product.
    pub fn try_mul(&self, rhs: impl Into<Operand>) -> Result<Expression> {
        let rhs = operande_droit(rhs.into(), |operande, source| SymbolicError::Product {
            operande,
            source,
        })?;
        Ok(self * &rhs)
    }

    /// self / rhs, rhs quelconque ; rhs non convertible => Ratio.
    pub fn try_div(&self, rhs: impl Into<Operand>) -> Result<Expression> {
        let rhs = operande_droit(rhs.into(), |operande, source| SymbolicError::Ratio {
            operande,
            source,
        })?;
        Ok(self / &rhs)
    }

    /// self ** n, n = entier, flottant fini, rationnel, ou expression « nombre pur ».
    /// Un exposant porteur de contenu symbolique => Product.
    pub fn try_pow(&self, n: impl Into<Operand>) -> Result<Expression> {
        let n = match n.into() {
            Operand::Number(s) => s.to_rational()?,
            autre => {
                let apercu = autre.to_string();
                let produit = |source: SymbolicError| SymbolicError::Product {
                    operande: apercu.clone(),
                    source: Box::new(source),
                };
                let e = expression_factory(autre).map_err(&produit)?;
                e.pure_number().ok_or_else(|| {
                    produit(SymbolicError::valeur_operande(format!(
                        "exposant symbolique '{e}' non réductible à un nombre"
                    )))
                })?
            }
        };
        Ok(self.pow_rational(&n))
    }
}

/// Conversion de l’opérande droit d’un produit / rapport.
fn operande_droit<F>(rhs: Operand, erreur: F) -> Result<Expression>
where
    F: FnOnce(String, Box<SymbolicError>) -> SymbolicError,
{
    if let Operand::Expression(e) = rhs {
        return Ok(e);
    }
    let apercu = rhs.to_string();
    expression_factory(rhs).map_err(|e| erreur(apercu, Box::new(e)))
}

/* ------------------------ Opérateurs ------------------------ */

impl Mul<&Expression> for &Expression {
    type Output = Expression;

    fn mul(self, rhs: &Expression) -> Expression {
        Expression::depuis_termes(self.terms.iter().chain(rhs.terms.iter()).cloned())
    }
}

impl Div<&Expression> for &Expression {
    type Output = Expression;

    fn div(self, rhs: &Expression) -> Expression {
        Expression::depuis_termes(
            self.terms
                .iter()
                .cloned()
                .chain(rhs.terms.iter().map(Term::inverse)),
        )
    }
}

// Variantes par valeur : délèguent aux versions par référence.
macro_rules! forward_binop {
    ($Trait:ident, $method:ident) => {
        impl $Trait<Expression> for Expression {
            type Output = Expression;
            fn $method(self, rhs: Expression) -> Expression {
                (&self).$method(&rhs)
            }
        }

        impl $Trait<&Expression> for Expression {
            type Output = Expression;
            fn $method(self, rhs: &Expression) -> Expression {
                (&self).$method(rhs)
            }
        }

        impl $Trait<Expression> for &Expression {
            type Output = Expression;
            fn $method(self, rhs: Expression) -> Expression {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Pow<&BigRational> for &Expression {
    type Output = Expression;

    fn pow(self, n: &BigRational) -> Expression {
        self.pow_rational(n)
    }
}

impl Pow<BigRational> for &Expression {
    type Output = Expression;

    fn pow(self, n: BigRational) -> Expression {
        self.pow_rational(&n)
    }
}

impl Pow<BigRational> for Expression {
    type Output = Expression;

    fn pow(self, n: BigRational) -> Expression {
        self.pow_rational(&n)
    }
}

impl Pow<i32> for &Expression {
    type Output = Expression;

    fn pow(self, n: i32) -> Expression {
        self.pow_rational(&BigRational::from_integer(BigInt::from(n)))
    }
}

impl Pow<i32> for Expression {
    type Output = Expression;

    fn pow(self, n: i32) -> Expression {
        (&self).pow(n)
    }
}

/* ------------------------ Égalité / hash / texte ------------------------ */

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.terms.len() == other.terms.len()
            && contenu_trie(&self.terms) == contenu_trie(&other.terms)
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        contenu_trie(&self.terms).hash(state);
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_terms(&self.terms))
    }
}

impl FromStr for Expression {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self> {
        expression_factory(s)
    }
}

impl From<Term> for Expression {
    fn from(t: Term) -> Self {
        Expression::depuis_termes([t])
    }
}

impl<'a> IntoIterator for &'a Expression {
    type Item = &'a Term;
    type IntoIter = std::slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/* ------------------------ Outil rationnel (nombre pur) ------------------------ */

fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/* ------------------------ serde : forme texte standard ------------------------ */

#[cfg(feature = "serde")]
impl serde::Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
