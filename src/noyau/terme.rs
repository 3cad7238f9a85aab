// src/noyau/terme.rs
//
// Terme = (base, exposant rationnel exact).
// - base : identifiant opaque ("km", "J", "L"…), jamais vide, sans opérateur
// - exposant : BigRational (défaut 1), jamais de flottant
//
// Valeur immuable : égalité / ordre / hash sur (base, exposant).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use std::fmt;
use std::str::FromStr;

use super::erreur::{Result, SymbolicError};

/// Base réservée : le neutre multiplicatif.
pub const BASE_NEUTRE: &str = "1";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term {
    base: String,
    exponent: BigRational,
}

impl Term {
    /// Construit un terme validé.
    pub fn new(base: impl Into<String>, exponent: BigRational) -> Result<Self> {
        let base = base.into();
        valide_base(&base)?;
        Ok(Term { base, exponent })
    }

    /// Terme d’exposant 1.
    pub fn unit(base: impl Into<String>) -> Result<Self> {
        Term::new(base, BigRational::one())
    }

    /// Construction interne : base déjà validée par le lecteur.
    pub(crate) fn brut(base: String, exponent: BigRational) -> Self {
        Term { base, exponent }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn exponent(&self) -> &BigRational {
        &self.exponent
    }

    pub fn with_exponent(&self, exponent: BigRational) -> Term {
        Term::brut(self.base.clone(), exponent)
    }

    /// base^-e
    pub fn inverse(&self) -> Term {
        self.with_exponent(-self.exponent.clone())
    }

    /// (base^e)^n = base^(e*n)
    pub fn pow(&self, n: &BigRational) -> Term {
        self.with_exponent(&self.exponent * n)
    }

    /// Le facteur "1" : absorbé par la réduction.
    pub fn is_identity(&self) -> bool {
        self.base == BASE_NEUTRE
    }

    /// Valeur numérique de la base si c’est un littéral ("2", "10", "0.5").
    pub(crate) fn base_numerique(&self) -> Option<BigRational> {
        parse_decimal(&self.base)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exponent.is_one() {
            write!(f, "{}", self.base)
        } else {
            write!(f, "{}^{}", self.base, format_exposant(&self.exponent))
        }
    }
}

impl FromStr for Term {
    type Err = SymbolicError;

    fn from_str(s: &str) -> Result<Self> {
        super::fabrique::term_factory(s)
    }
}

/* ------------------------ Validation de base ------------------------ */

/// Caractères interdits dans une base (opérateurs + groupement).
pub(crate) fn est_reserve(c: char) -> bool {
    matches!(c, '*' | '/' | '^' | '(' | ')')
}

fn valide_base(base: &str) -> Result<()> {
    if base.is_empty() {
        return Err(SymbolicError::valeur_operande("base vide"));
    }
    if let Some(c) = base
        .chars()
        .find(|c| c.is_whitespace() || est_reserve(*c))
    {
        return Err(SymbolicError::valeur_operande(format!(
            "caractère '{c}' interdit dans la base '{base}'"
        )));
    }
    Ok(())
}

/* ------------------------ Exposants rationnels ------------------------ */

/// Affichage d’un exposant : "2", "-1", "1/2".
pub fn format_exposant(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// Lit un décimal signé exact : "2", "-3", "1.5", "+0.25".
/// None si ce n’est pas un littéral décimal.
pub(crate) fn parse_decimal(s: &str) -> Option<BigRational> {
    let (neg, corps) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (entier, frac) = match corps.split_once('.') {
        Some((a, b)) => (a, b),
        None => (corps, ""),
    };

    if entier.is_empty() && frac.is_empty() {
        return None;
    }
    if !entier.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // "2." accepté, "." refusé ci-dessus
    let chiffres = format!("{entier}{frac}");
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    let d = BigInt::from(10).pow(frac.len() as u32);

    let r = BigRational::new(n, d);
    Some(if neg { -r } else { r })
}

/// Lit un rationnel signé : décimal ou "p/q" (q ≠ 0).
pub(crate) fn parse_rationnel(s: &str) -> Option<BigRational> {
    let s = s.trim();
    match s.split_once('/') {
        None => parse_decimal(s),
        Some((p, q)) => {
            let p = parse_decimal(p.trim())?;
            let q = parse_decimal(q.trim())?;
            if q.is_zero() {
                return None;
            }
            Some(p / q)
        }
    }
}

/// Flottant -> rationnel exact via sa représentation décimale la plus courte
/// (0.1 -> 1/10 et non la fraction binaire). None si NaN/infini.
pub(crate) fn rationnel_depuis_f64(x: f64) -> Option<BigRational> {
    if !x.is_finite() {
        return None;
    }
    // Display de f64 : jamais d’exposant scientifique, aller-retour garanti.
    parse_decimal(&format!("{x}"))
}

/// Exposant entier (i64) si r est entier et tient dans un i64.
pub(crate) fn exposant_entier(r: &BigRational) -> Option<i64> {
    if !r.is_integer() {
        return None;
    }
    r.numer().to_string().parse::<i64>().ok()
}

/// |r| == 1 ?
pub(crate) fn est_unitaire(r: &BigRational) -> bool {
    r.abs().is_one()
}

/* ------------------------ serde : forme texte "base^e" ------------------------ */

#[cfg(feature = "serde")]
impl serde::Serialize for Term {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
