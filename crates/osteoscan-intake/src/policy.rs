use std::time::Duration;

use osteoscan_scoring::AnalysisRecordValidator;

/// Default bound on one model call.
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);

/// Operator-tunable knobs of the intake flow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakePolicy {
    pub analysis_timeout: Duration,
    /// Records below this confidence score are held for review.
    pub confidence_floor: Option<f64>,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            analysis_timeout: DEFAULT_ANALYSIS_TIMEOUT,
            confidence_floor: None,
        }
    }
}

impl IntakePolicy {
    pub fn validator(&self) -> AnalysisRecordValidator {
        match self.confidence_floor {
            Some(floor) => AnalysisRecordValidator::new().with_confidence_floor(floor),
            None => AnalysisRecordValidator::new(),
        }
    }
}
