//! osteoscan-scoring
//!
//! Validation of analysis records returned by the external model, and the
//! derivations layered on top of them: WHO risk bucketing, DXA
//! recommendation mapping, analysis status transitions and display
//! interpretations of the indices. Pure functions over their input with no
//! AWS dependency.

pub mod applicability;
pub mod error;
pub mod fields;
pub mod interpret;
pub mod measures;
pub mod risk;
pub mod status;
pub mod submission;
pub mod validator;

pub use applicability::validate_applicability;
pub use error::{ValidationError, ValidationWarning};
pub use fields::{Bound, MeasureField};
pub use measures::{validate_always_required, ValidatedMeasures};
pub use risk::{classify_recommendation, derive_risk_category_consistency, who_category};
pub use validator::{AnalysisRecordValidator, ValidatedAnalysis};
