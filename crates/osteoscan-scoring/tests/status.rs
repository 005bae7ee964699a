use osteoscan_core::models::analysis::AnalysisStatus::{self, *};
use osteoscan_scoring::status::{can_transition, is_settled, transition};
use osteoscan_scoring::ValidationError;

#[test]
fn processing_settles_once() {
    for to in [Completed, RequiresReview, Failed] {
        assert_eq!(transition(Processing, to).unwrap(), to);
    }
    assert!(!is_settled(Processing));
    assert!(is_settled(Failed));
}

#[test]
fn review_and_correction() {
    assert!(can_transition(RequiresReview, Completed));
    assert!(can_transition(Completed, RequiresReview));
    assert!(can_transition(Completed, Completed));
}

#[test]
fn failed_and_processing_are_not_reentered() {
    let rejected: [(AnalysisStatus, AnalysisStatus); 4] = [
        (Failed, Completed),
        (Failed, Processing),
        (Completed, Processing),
        (RequiresReview, Failed),
    ];
    for (from, to) in rejected {
        assert_eq!(
            transition(from, to),
            Err(ValidationError::InvalidTransition { from, to }),
            "{from} -> {to}"
        );
    }
}
