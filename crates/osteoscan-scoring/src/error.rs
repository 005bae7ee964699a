use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use osteoscan_core::models::analysis::{
    AnalysisStatus, AnatomicalRegion, DxaRecommendation, RiskCategory,
};

use crate::fields::{Bound, MeasureField};

/// A hard failure: the record must not be persisted as completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    #[error("{field} is required but was not provided")]
    Missing { field: MeasureField },

    #[error("{field} is required for {region} and must lie in [{}, {}]", .bound.min, .bound.max)]
    OutOfRangeOrMissing {
        field: MeasureField,
        region: AnatomicalRegion,
        value: Option<f64>,
        bound: Bound,
    },

    #[error("{field} does not apply to {region} but was {value}")]
    UnexpectedValue {
        field: MeasureField,
        region: AnatomicalRegion,
        value: f64,
    },

    #[error("{field} = {value} is outside [{}, {}]", .bound.min, .bound.max)]
    FieldOutOfBounds {
        field: MeasureField,
        value: f64,
        bound: Bound,
    },

    #[error("invalid {field}: {reason}")]
    InvalidSubmission { field: String, reason: String },

    #[error("analysis cannot move from {from} to {to}")]
    InvalidTransition {
        from: AnalysisStatus,
        to: AnalysisStatus,
    },
}

impl ValidationError {
    /// The measure a field-level failure refers to.
    pub fn field(&self) -> Option<MeasureField> {
        match self {
            ValidationError::Missing { field }
            | ValidationError::OutOfRangeOrMissing { field, .. }
            | ValidationError::UnexpectedValue { field, .. }
            | ValidationError::FieldOutOfBounds { field, .. } => Some(*field),
            ValidationError::InvalidSubmission { .. }
            | ValidationError::InvalidTransition { .. } => None,
        }
    }
}

/// A soft failure: the record is kept but marked `requires_review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationWarning {
    #[error("declared category {declared} does not match T-score {t_score} (expected {expected})")]
    CategoryMismatch {
        t_score: f64,
        declared: RiskCategory,
        expected: RiskCategory,
    },

    #[error("declared recommendation {declared} does not fit {category} (expected {expected})")]
    RecommendationMismatch {
        category: RiskCategory,
        declared: DxaRecommendation,
        expected: DxaRecommendation,
    },

    #[error("confidence score {confidence} is below the review floor {floor}")]
    LowConfidence { confidence: f64, floor: f64 },
}
