use osteoscan_core::models::analysis::AnalysisSubmission;

use crate::error::ValidationError;

/// Oldest accepted patient age, matching the intake form.
pub const MAX_PATIENT_AGE: u32 = 120;

/// Check what the user typed before anything is persisted or sent to the
/// model.
pub fn validate_submission(submission: &AnalysisSubmission) -> Result<(), ValidationError> {
    if submission.patient_name.trim().is_empty() {
        return Err(invalid("patient_name", "must not be blank"));
    }
    if submission.patient_age == 0 || submission.patient_age > MAX_PATIENT_AGE {
        return Err(invalid(
            "patient_age",
            format!(
                "{} is outside 1..={MAX_PATIENT_AGE}",
                submission.patient_age
            ),
        ));
    }
    if submission.image_url.trim().is_empty() {
        return Err(invalid("image_url", "an image must be uploaded first"));
    }
    Ok(())
}

fn invalid(field: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidSubmission {
        field: field.to_string(),
        reason: reason.into(),
    }
}
