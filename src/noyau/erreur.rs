// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau symbolique.
// - OperandType  : forme d’entrée non supportée par la fabrique
// - OperandValue : bonne forme, contenu invalide (base vide, exposant non numérique…)
// - ParsingValue : texte hors grammaire (porte le fragment fautif)
// - Product/Ratio: opérande droit non convertible en Expression
//
// Toutes les erreurs sont locales et synchrones : rien n’est construit à moitié.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymbolicError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SymbolicError {
    #[error("type d’opérande non supporté: {recu}")]
    OperandType { recu: String },

    #[error("valeur d’opérande invalide: {detail}")]
    OperandValue { detail: String },

    #[error("lecture impossible de '{fragment}': {raison}")]
    ParsingValue { fragment: String, raison: String },

    #[error("produit impossible avec '{operande}'")]
    Product {
        operande: String,
        #[source]
        source: Box<SymbolicError>,
    },

    #[error("rapport impossible avec '{operande}'")]
    Ratio {
        operande: String,
        #[source]
        source: Box<SymbolicError>,
    },
}

impl SymbolicError {
    pub(crate) fn type_operande(recu: impl Into<String>) -> Self {
        SymbolicError::OperandType { recu: recu.into() }
    }

    pub(crate) fn valeur_operande(detail: impl Into<String>) -> Self {
        SymbolicError::OperandValue {
            detail: detail.into(),
        }
    }

    pub(crate) fn lecture(fragment: impl Into<String>, raison: impl Into<String>) -> Self {
        SymbolicError::ParsingValue {
            fragment: fragment.into(),
            raison: raison.into(),
        }
    }

    /// Erreur de la fabrique (type ou valeur) : l’appelant peut tenter une autre lecture.
    pub fn is_operand_error(&self) -> bool {
        matches!(
            self,
            SymbolicError::OperandType { .. } | SymbolicError::OperandValue { .. }
        )
    }

    pub fn is_parsing_error(&self) -> bool {
        matches!(self, SymbolicError::ParsingValue { .. })
    }

    /// Produit/rapport : mauvais usage réel, à propager.
    pub fn is_algebraic_error(&self) -> bool {
        matches!(
            self,
            SymbolicError::Product { .. } | SymbolicError::Ratio { .. }
        )
    }
}
