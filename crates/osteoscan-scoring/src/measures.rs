use serde::{Deserialize, Serialize};
use ts_rs::TS;

use osteoscan_core::models::analysis::AnalysisFindings;

use crate::error::ValidationError;
use crate::fields::MeasureField;

/// Numeric fields every model response must carry, whatever the region.
pub const ALWAYS_REQUIRED: [MeasureField; 9] = [
    MeasureField::TextureContrast,
    MeasureField::TextureHomogeneity,
    MeasureField::TextureEnergy,
    MeasureField::TextureEntropy,
    MeasureField::FractalDimension,
    MeasureField::PredictedBmdGmCm2,
    MeasureField::PredictedTScore,
    MeasureField::PredictedZScore,
    MeasureField::ConfidenceScore,
];

/// The always-required measures once they are known to be present, finite
/// and within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidatedMeasures {
    pub texture_contrast: f64,
    pub texture_homogeneity: f64,
    pub texture_energy: f64,
    pub texture_entropy: f64,
    pub fractal_dimension: f64,
    pub predicted_bmd_gm_cm2: f64,
    pub predicted_t_score: f64,
    pub predicted_z_score: f64,
    pub confidence_score: f64,
}

/// Check presence, finiteness and bounds of every always-required measure.
/// Out-of-bound values are rejected, never clamped.
pub fn validate_always_required(
    findings: &AnalysisFindings,
) -> Result<ValidatedMeasures, ValidationError> {
    let get = |field: MeasureField| require(field, findings);

    Ok(ValidatedMeasures {
        texture_contrast: get(MeasureField::TextureContrast)?,
        texture_homogeneity: get(MeasureField::TextureHomogeneity)?,
        texture_energy: get(MeasureField::TextureEnergy)?,
        texture_entropy: get(MeasureField::TextureEntropy)?,
        fractal_dimension: get(MeasureField::FractalDimension)?,
        predicted_bmd_gm_cm2: get(MeasureField::PredictedBmdGmCm2)?,
        predicted_t_score: get(MeasureField::PredictedTScore)?,
        predicted_z_score: get(MeasureField::PredictedZScore)?,
        confidence_score: get(MeasureField::ConfidenceScore)?,
    })
}

fn require(field: MeasureField, findings: &AnalysisFindings) -> Result<f64, ValidationError> {
    let value = field
        .read(findings)
        .ok_or(ValidationError::Missing { field })?;
    match field.bound() {
        Some(bound) if !bound.contains(value) => Err(ValidationError::FieldOutOfBounds {
            field,
            value,
            bound,
        }),
        _ => Ok(value),
    }
}
