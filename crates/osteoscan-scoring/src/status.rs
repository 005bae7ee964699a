//! Analysis status transitions.
//!
//! ```text
//! processing ──► completed ◄──► requires_review
//!     │                              ▲
//!     ├──────────────────────────────┘
//!     └────────► failed
//! ```
//!
//! `requires_review → completed` is operator approval; `completed →
//! requires_review` is administrative correction. `failed` is final: a
//! failed analysis is resubmitted as a new record.

use osteoscan_core::models::analysis::AnalysisStatus;

use crate::error::ValidationError;

pub fn can_transition(from: AnalysisStatus, to: AnalysisStatus) -> bool {
    use AnalysisStatus::*;
    matches!(
        (from, to),
        (Processing, Completed)
            | (Processing, RequiresReview)
            | (Processing, Failed)
            | (RequiresReview, Completed)
            | (Completed, RequiresReview)
    ) || (from == to && from != Processing)
}

/// Check a transition, returning the new status on success. Re-asserting a
/// settled status is a no-op and is allowed.
pub fn transition(
    from: AnalysisStatus,
    to: AnalysisStatus,
) -> Result<AnalysisStatus, ValidationError> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(ValidationError::InvalidTransition { from, to })
    }
}

/// Statuses the intake flow can leave a record in.
pub fn is_settled(status: AnalysisStatus) -> bool {
    status != AnalysisStatus::Processing
}
