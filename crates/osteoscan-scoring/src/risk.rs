//! WHO T-score bucketing and the recommendation mapping.

use osteoscan_core::models::analysis::{DxaRecommendation, RiskCategory};

use crate::error::ValidationWarning;

/// T-scores at or above this are normal.
pub const NORMAL_T_SCORE_MIN: f64 = -1.0;

/// T-scores at or below this are osteoporotic.
pub const OSTEOPOROSIS_T_SCORE_MAX: f64 = -2.5;

/// The WHO bucket implied by a T-score. Never returns
/// [`RiskCategory::SevereOsteoporosis`]: that escalation needs a signal the
/// T-score alone does not carry.
pub fn who_category(t_score: f64) -> RiskCategory {
    if t_score >= NORMAL_T_SCORE_MIN {
        RiskCategory::Normal
    } else if t_score > OSTEOPOROSIS_T_SCORE_MAX {
        RiskCategory::Osteopenia
    } else {
        RiskCategory::Osteoporosis
    }
}

/// Compare a declared category against the T-score.
///
/// `severe_osteoporosis` counts as agreeing with an osteoporotic T-score; the
/// declaration itself is the upstream's severity signal. A disagreement is
/// returned as a warning, never corrected.
pub fn derive_risk_category_consistency(
    t_score: f64,
    declared: RiskCategory,
) -> Option<ValidationWarning> {
    let expected = who_category(t_score);
    let agrees = match declared {
        RiskCategory::SevereOsteoporosis => expected == RiskCategory::Osteoporosis,
        other => other == expected,
    };
    if agrees {
        None
    } else {
        Some(ValidationWarning::CategoryMismatch {
            t_score,
            declared,
            expected,
        })
    }
}

pub fn classify_recommendation(category: RiskCategory) -> DxaRecommendation {
    match category {
        RiskCategory::Normal => DxaRecommendation::RoutineMonitoring,
        RiskCategory::Osteopenia => DxaRecommendation::FollowUp6Months,
        RiskCategory::Osteoporosis => DxaRecommendation::ImmediateDxaRecommended,
        RiskCategory::SevereOsteoporosis => DxaRecommendation::ClinicalInterventionNeeded,
    }
}

/// Settle the stored recommendation: the declared one when present (flagged
/// if it disagrees with the category), otherwise the mapped one.
pub fn reconcile_recommendation(
    category: RiskCategory,
    declared: Option<DxaRecommendation>,
) -> (DxaRecommendation, Option<ValidationWarning>) {
    let expected = classify_recommendation(category);
    match declared {
        Some(declared) if declared != expected => (
            declared,
            Some(ValidationWarning::RecommendationMismatch {
                category,
                declared,
                expected,
            }),
        ),
        Some(declared) => (declared, None),
        None => (expected, None),
    }
}
