//! Region-conditional applicability of the clinical indices.
//!
//! | field                   | applicable regions           |
//! |-------------------------|------------------------------|
//! | `singh_index`           | proximal_femur               |
//! | `jhamaria_index`        | calcaneus                    |
//! | `cortical_thickness_mm` | clavicle, proximal_femur     |
//!
//! The table is fixed. A value supplied for a region where the index does not
//! apply is rejected outright rather than nulled.

use osteoscan_core::models::analysis::{AnatomicalRegion, RegionalIndices};

use crate::error::ValidationError;
use crate::fields::MeasureField;

/// The region-conditional fields, in validation order.
pub const REGIONAL_FIELDS: [MeasureField; 3] = [
    MeasureField::SinghIndex,
    MeasureField::JhamariaIndex,
    MeasureField::CorticalThicknessMm,
];

/// Whether `field` applies to `region`. Fields outside the regional table
/// apply everywhere.
pub fn applies_to(field: MeasureField, region: AnatomicalRegion) -> bool {
    match field {
        MeasureField::SinghIndex => region == AnatomicalRegion::ProximalFemur,
        MeasureField::JhamariaIndex => region == AnatomicalRegion::Calcaneus,
        MeasureField::CorticalThicknessMm => matches!(
            region,
            AnatomicalRegion::Clavicle | AnatomicalRegion::ProximalFemur
        ),
        _ => true,
    }
}

/// The regional fields that must be populated for `region`.
pub fn applicable_fields(region: AnatomicalRegion) -> Vec<MeasureField> {
    REGIONAL_FIELDS
        .into_iter()
        .filter(|field| applies_to(*field, region))
        .collect()
}

/// Enforce the applicability table on the regional triple.
///
/// Values supplied for inapplicable fields are reported before missing or
/// out-of-range applicable ones, so a stray index is always named as the
/// cause even when the expected index is also absent.
pub fn validate_applicability(
    region: AnatomicalRegion,
    fields: &RegionalIndices,
) -> Result<RegionalIndices, ValidationError> {
    for field in REGIONAL_FIELDS {
        if !applies_to(field, region)
            && let Some(value) = regional_value(fields, field)
        {
            return Err(ValidationError::UnexpectedValue {
                field,
                region,
                value,
            });
        }
    }

    let mut normalized = RegionalIndices::default();
    for field in applicable_fields(region) {
        let value = regional_value(fields, field);
        let Some(bound) = field.bound() else {
            continue;
        };
        match value {
            Some(v) if bound.contains(v) => set_regional_value(&mut normalized, field, v),
            _ => {
                return Err(ValidationError::OutOfRangeOrMissing {
                    field,
                    region,
                    value,
                    bound,
                });
            }
        }
    }
    Ok(normalized)
}

fn regional_value(fields: &RegionalIndices, field: MeasureField) -> Option<f64> {
    match field {
        MeasureField::SinghIndex => fields.singh_index,
        MeasureField::JhamariaIndex => fields.jhamaria_index,
        MeasureField::CorticalThicknessMm => fields.cortical_thickness_mm,
        _ => None,
    }
}

fn set_regional_value(fields: &mut RegionalIndices, field: MeasureField, value: f64) {
    match field {
        MeasureField::SinghIndex => fields.singh_index = Some(value),
        MeasureField::JhamariaIndex => fields.jhamaria_index = Some(value),
        MeasureField::CorticalThicknessMm => fields.cortical_thickness_mm = Some(value),
        _ => {}
    }
}
