//! Plain-language readings of the indices for reports and result screens.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use osteoscan_core::models::analysis::AnalysisFindings;

use crate::fields::MeasureField;

/// How a reading should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Tone {
    Favorable,
    Intermediate,
    Unfavorable,
    Informational,
}

/// One index value with its display name and interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IndexReading {
    pub field: MeasureField,
    pub name: String,
    pub value: f64,
    pub max_value: f64,
    pub unit: String,
    pub interpretation: String,
    pub tone: Tone,
}

/// Clinical indices shown only when populated for the record's region.
pub const CLINICAL_INDICES: [MeasureField; 3] = [
    MeasureField::SinghIndex,
    MeasureField::JhamariaIndex,
    MeasureField::CorticalThicknessMm,
];

/// Texture indices, always populated on a validated record.
pub const TEXTURE_INDICES: [MeasureField; 4] = [
    MeasureField::TextureContrast,
    MeasureField::TextureHomogeneity,
    MeasureField::TextureEnergy,
    MeasureField::FractalDimension,
];

/// Interpret a single value. `None` for fields with no display reading.
pub fn interpret(field: MeasureField, value: f64) -> Option<(&'static str, Tone)> {
    use Tone::*;
    let reading = match field {
        MeasureField::SinghIndex | MeasureField::JhamariaIndex => {
            let (good, moderate) = if field == MeasureField::SinghIndex {
                (4.0, 2.0)
            } else {
                (7.0, 4.0)
            };
            if value >= good {
                ("Good", Favorable)
            } else if value >= moderate {
                ("Moderate", Intermediate)
            } else {
                ("Poor", Unfavorable)
            }
        }
        MeasureField::CorticalThicknessMm => {
            if value >= 4.0 {
                ("Normal", Favorable)
            } else if value >= 2.5 {
                ("Reduced", Intermediate)
            } else {
                ("Severely Reduced", Unfavorable)
            }
        }
        MeasureField::TextureContrast => {
            if value > 1.2 {
                ("High Variation", Informational)
            } else if value > 0.6 {
                ("Moderate", Intermediate)
            } else {
                ("Low Variation", Informational)
            }
        }
        MeasureField::TextureHomogeneity => {
            if value > 0.7 {
                ("Uniform", Favorable)
            } else if value > 0.4 {
                ("Moderate", Intermediate)
            } else {
                ("Non-uniform", Unfavorable)
            }
        }
        MeasureField::TextureEnergy => {
            if value > 0.6 {
                ("Ordered", Favorable)
            } else if value > 0.3 {
                ("Moderate", Intermediate)
            } else {
                ("Disordered", Unfavorable)
            }
        }
        MeasureField::FractalDimension => {
            if value > 1.5 {
                ("Complex", Favorable)
            } else if value > 1.3 {
                ("Moderate", Intermediate)
            } else {
                ("Simple", Unfavorable)
            }
        }
        _ => return None,
    };
    Some(reading)
}

fn display(field: MeasureField) -> (&'static str, f64, &'static str) {
    match field {
        MeasureField::SinghIndex => ("Singh Index", 6.0, "/6"),
        MeasureField::JhamariaIndex => ("Jhamaria Index", 10.0, "/10"),
        MeasureField::CorticalThicknessMm => ("Cortical Thickness", 8.0, "mm"),
        MeasureField::TextureContrast => ("GLCM Contrast", 2.0, ""),
        MeasureField::TextureHomogeneity => ("GLCM Homogeneity", 1.0, ""),
        MeasureField::TextureEnergy => ("Texture Energy", 1.0, ""),
        MeasureField::FractalDimension => ("Fractal Dimension", 1.8, ""),
        other => (other.as_str(), other.bound().map_or(0.0, |b| b.max), ""),
    }
}

/// Readings for every populated field in `fields`. Null fields (indices not
/// applicable to the region) are skipped.
pub fn readings(findings: &AnalysisFindings, fields: &[MeasureField]) -> Vec<IndexReading> {
    fields
        .iter()
        .filter_map(|field| {
            let value = field.read(findings)?;
            let (interpretation, tone) = interpret(*field, value)?;
            let (name, max_value, unit) = display(*field);
            Some(IndexReading {
                field: *field,
                name: name.to_string(),
                value,
                max_value,
                unit: unit.to_string(),
                interpretation: interpretation.to_string(),
                tone,
            })
        })
        .collect()
}
