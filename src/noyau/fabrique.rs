// src/noyau/fabrique.rs
//
// Fabrique d’opérandes : une seule porte d’entrée pour toutes les formes
// acceptées (texte, Expression, Term, liste de termes, paires (base, exposant)).
// On dispatche UNE fois ici ; ensuite tout le noyau ne voit que des Term validés.
//
// - forme non supportée (ex: un nombre nu)      => OperandType
// - bonne forme, contenu invalide (base vide…)  => OperandValue
// - texte hors grammaire                         => ParsingValue (via asterms)

use num_bigint::BigInt;
use num_rational::BigRational;

use std::fmt;

use super::erreur::{Result, SymbolicError};
use super::expr::Expression;
use super::format::format_terms;
use super::lecture::asterms;
use super::terme::{format_exposant, parse_rationnel, rationnel_depuis_f64, Term};

/// Valeur numérique d’entrée (exposant d’une paire, opérande de puissance).
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Rational(BigRational),
    /// "2", "-1/2", "0.5"
    Text(String),
}

impl Scalar {
    /// Conversion exacte ; NaN / infini / texte non numérique => OperandValue.
    pub fn to_rational(&self) -> Result<BigRational> {
        match self {
            Scalar::Int(n) => Ok(BigRational::from_integer(BigInt::from(*n))),
            Scalar::Float(x) => rationnel_depuis_f64(*x).ok_or_else(|| {
                SymbolicError::valeur_operande(format!("exposant flottant non fini: {x}"))
            }),
            Scalar::Rational(r) => Ok(r.clone()),
            Scalar::Text(s) => parse_rationnel(s).ok_or_else(|| {
                SymbolicError::valeur_operande(format!("exposant non numérique: '{s}'"))
            }),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Rational(r) => write!(f, "{}", format_exposant(r)),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Entrée hétérogène de la fabrique (variante étiquetée).
#[derive(Clone, Debug)]
pub enum Operand {
    Text(String),
    Expression(Expression),
    Term(Term),
    Terms(Vec<Term>),
    /// (base, exposant) pas encore validée
    Pair(String, Scalar),
    /// Itérable hétérogène : chaque élément doit être un Term ou une Pair.
    List(Vec<Operand>),
    /// Nombre nu : jamais une expression (seulement un exposant de puissance).
    Number(Scalar),
}

impl Operand {
    /// Nom de la forme, pour les diagnostics.
    pub fn nature(&self) -> &'static str {
        match self {
            Operand::Text(_) => "texte",
            Operand::Expression(_) => "expression",
            Operand::Term(_) => "terme",
            Operand::Terms(_) => "liste de termes",
            Operand::Pair(..) => "paire (base, exposant)",
            Operand::List(_) => "liste",
            Operand::Number(_) => "nombre",
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Text(s) => write!(f, "{s}"),
            Operand::Expression(e) => write!(f, "{e}"),
            Operand::Term(t) => write!(f, "{t}"),
            Operand::Terms(v) => write!(f, "{}", format_terms(v)),
            Operand::Pair(b, e) => write!(f, "({b}, {e})"),
            Operand::List(items) => {
                let parts: Vec<String> = items.iter().map(|o| o.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Operand::Number(s) => write!(f, "{s}"),
        }
    }
}

/* ------------------------ Conversions d’entrée ------------------------ */

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n as i64)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<BigRational> for Scalar {
    fn from(r: BigRational) -> Self {
        Scalar::Rational(r)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<&String> for Operand {
    fn from(s: &String) -> Self {
        Operand::Text(s.clone())
    }
}

impl From<Expression> for Operand {
    fn from(e: Expression) -> Self {
        Operand::Expression(e)
    }
}

impl From<&Expression> for Operand {
    fn from(e: &Expression) -> Self {
        Operand::Expression(e.clone())
    }
}

impl From<Term> for Operand {
    fn from(t: Term) -> Self {
        Operand::Term(t)
    }
}

impl From<&Term> for Operand {
    fn from(t: &Term) -> Self {
        Operand::Term(t.clone())
    }
}

impl From<Vec<Term>> for Operand {
    fn from(v: Vec<Term>) -> Self {
        Operand::Terms(v)
    }
}

impl From<&[Term]> for Operand {
    fn from(v: &[Term]) -> Self {
        Operand::Terms(v.to_vec())
    }
}

impl<S: Into<String>, E: Into<Scalar>> From<(S, E)> for Operand {
    fn from((base, exposant): (S, E)) -> Self {
        Operand::Pair(base.into(), exposant.into())
    }
}

impl<S: Into<String>, E: Into<Scalar>> From<Vec<(S, E)>> for Operand {
    fn from(v: Vec<(S, E)>) -> Self {
        Operand::List(v.into_iter().map(Operand::from).collect())
    }
}

impl From<Vec<Operand>> for Operand {
    fn from(v: Vec<Operand>) -> Self {
        Operand::List(v)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(Scalar::Int(n))
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(Scalar::Int(n as i64))
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Operand::Number(Scalar::Float(x))
    }
}

impl From<BigRational> for Operand {
    fn from(r: BigRational) -> Self {
        Operand::Number(Scalar::Rational(r))
    }
}

/* ------------------------ Fabrique ------------------------ */

fn paire(base: String, exposant: &Scalar) -> Result<Term> {
    Term::new(base, exposant.to_rational()?)
}

/// Élément d’une liste : Term ou Pair, sinon OperandValue.
fn element(op: Operand) -> Result<Term> {
    match op {
        Operand::Term(t) => Ok(t),
        Operand::Pair(b, e) => paire(b, &e),
        autre => Err(SymbolicError::valeur_operande(format!(
            "élément non convertible en (base, exposant): {} '{autre}'",
            autre.nature()
        ))),
    }
}

/// Suite BRUTE de termes validés (sans réduction) pour une entrée quelconque.
pub(crate) fn termes_bruts(op: Operand) -> Result<Vec<Term>> {
    match op {
        Operand::Text(s) => asterms(&s),
        Operand::Expression(e) => Ok(e.terms().to_vec()),
        Operand::Term(t) => Ok(vec![t]),
        Operand::Terms(v) => Ok(v),
        Operand::Pair(b, e) => Ok(vec![paire(b, &e)?]),
        Operand::List(items) => items.into_iter().map(element).collect(),
        Operand::Number(s) => Err(SymbolicError::type_operande(format!("nombre ({s})"))),
    }
}

/// Toute entrée acceptée -> Expression canonique validée.
pub fn expression_factory(value: impl Into<Operand>) -> Result<Expression> {
    let op = value.into();
    log::trace!("expression_factory: {}", op.nature());

    match op {
        // immuable : pas de copie à faire
        Operand::Expression(e) => Ok(e),
        autre => Ok(Expression::depuis_termes(termes_bruts(autre)?)),
    }
}

/// Toute entrée désignant UN seul terme -> Term validé.
pub fn term_factory(value: impl Into<Operand>) -> Result<Term> {
    let op = value.into();
    log::trace!("term_factory: {}", op.nature());

    let apercu = op.to_string();
    let mut termes = match op {
        Operand::Term(t) => return Ok(t),
        Operand::Pair(b, e) => return paire(b, &e),
        Operand::List(mut items) if items.len() == 1 => vec![element(items.remove(0))?],
        autre => termes_bruts(autre)?,
    };

    if termes.len() != 1 {
        return Err(SymbolicError::valeur_operande(format!(
            "'{apercu}' n’est pas un terme unique ({} termes)",
            termes.len()
        )));
    }
    Ok(termes.remove(0))
}

/// Heuristique rapide : `value` est-elle CLAIREMENT une composition de termes ?
/// Vrai pour une Expression, ou un texte contenant '*' ou '/'.
/// Ne remplace jamais une vraie lecture ("a" est valide mais renvoie false).
pub fn composition(value: &Operand) -> bool {
    match value {
        Operand::Expression(_) => true,
        Operand::Text(s) => s.contains('*') || s.contains('/'),
        _ => false,
    }
}
