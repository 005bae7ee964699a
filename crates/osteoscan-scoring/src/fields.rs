use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use osteoscan_core::models::analysis::AnalysisFindings;

/// Inclusive numeric bound for a measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN and infinities are never contained.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Every numeric field of an analysis the validator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MeasureField {
    SinghIndex,
    JhamariaIndex,
    CorticalThicknessMm,
    TextureContrast,
    TextureHomogeneity,
    TextureEnergy,
    TextureEntropy,
    FractalDimension,
    PredictedBmdGmCm2,
    PredictedTScore,
    PredictedZScore,
    ConfidenceScore,
    /// Not numeric, but required of every model response.
    OsteoporosisRiskCategory,
}

impl MeasureField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureField::SinghIndex => "singh_index",
            MeasureField::JhamariaIndex => "jhamaria_index",
            MeasureField::CorticalThicknessMm => "cortical_thickness_mm",
            MeasureField::TextureContrast => "texture_contrast",
            MeasureField::TextureHomogeneity => "texture_homogeneity",
            MeasureField::TextureEnergy => "texture_energy",
            MeasureField::TextureEntropy => "texture_entropy",
            MeasureField::FractalDimension => "fractal_dimension",
            MeasureField::PredictedBmdGmCm2 => "predicted_bmd_gm_cm2",
            MeasureField::PredictedTScore => "predicted_t_score",
            MeasureField::PredictedZScore => "predicted_z_score",
            MeasureField::ConfidenceScore => "confidence_score",
            MeasureField::OsteoporosisRiskCategory => "osteoporosis_risk_category",
        }
    }

    /// Declared bound of a numeric field. `None` for the category field.
    pub fn bound(&self) -> Option<Bound> {
        let bound = match self {
            MeasureField::SinghIndex => Bound::new(1.0, 6.0),
            MeasureField::JhamariaIndex => Bound::new(0.0, 10.0),
            MeasureField::CorticalThicknessMm => Bound::new(1.0, 8.0),
            MeasureField::TextureContrast => Bound::new(0.1, 2.0),
            MeasureField::TextureHomogeneity => Bound::new(0.3, 0.9),
            MeasureField::TextureEnergy => Bound::new(0.1, 0.8),
            MeasureField::TextureEntropy => Bound::new(2.0, 8.0),
            MeasureField::FractalDimension => Bound::new(1.2, 1.8),
            MeasureField::PredictedBmdGmCm2 => Bound::new(0.5, 1.5),
            MeasureField::PredictedTScore => Bound::new(-4.0, 3.0),
            MeasureField::PredictedZScore => Bound::new(-3.0, 2.0),
            MeasureField::ConfidenceScore => Bound::new(0.0, 100.0),
            MeasureField::OsteoporosisRiskCategory => return None,
        };
        Some(bound)
    }

    /// Read this field's numeric value out of a model response.
    pub fn read(&self, findings: &AnalysisFindings) -> Option<f64> {
        match self {
            MeasureField::SinghIndex => findings.regional.singh_index,
            MeasureField::JhamariaIndex => findings.regional.jhamaria_index,
            MeasureField::CorticalThicknessMm => findings.regional.cortical_thickness_mm,
            MeasureField::TextureContrast => findings.texture_contrast,
            MeasureField::TextureHomogeneity => findings.texture_homogeneity,
            MeasureField::TextureEnergy => findings.texture_energy,
            MeasureField::TextureEntropy => findings.texture_entropy,
            MeasureField::FractalDimension => findings.fractal_dimension,
            MeasureField::PredictedBmdGmCm2 => findings.predicted_bmd_gm_cm2,
            MeasureField::PredictedTScore => findings.predicted_t_score,
            MeasureField::PredictedZScore => findings.predicted_z_score,
            MeasureField::ConfidenceScore => findings.confidence_score,
            MeasureField::OsteoporosisRiskCategory => None,
        }
    }
}

impl fmt::Display for MeasureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
