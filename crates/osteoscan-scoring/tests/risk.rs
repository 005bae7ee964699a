use osteoscan_core::models::analysis::{DxaRecommendation, RiskCategory};
use osteoscan_scoring::risk::reconcile_recommendation;
use osteoscan_scoring::{
    classify_recommendation, derive_risk_category_consistency, who_category, ValidationWarning,
};

#[test]
fn who_thresholds() {
    assert_eq!(who_category(0.4), RiskCategory::Normal);
    assert_eq!(who_category(-1.0), RiskCategory::Normal);
    assert_eq!(who_category(-1.01), RiskCategory::Osteopenia);
    assert_eq!(who_category(-2.49), RiskCategory::Osteopenia);
    assert_eq!(who_category(-2.5), RiskCategory::Osteoporosis);
    assert_eq!(who_category(-3.7), RiskCategory::Osteoporosis);
}

#[test]
fn consistency_cases() {
    assert_eq!(derive_risk_category_consistency(-0.5, RiskCategory::Normal), None);
    assert_eq!(
        derive_risk_category_consistency(-1.8, RiskCategory::Normal),
        Some(ValidationWarning::CategoryMismatch {
            t_score: -1.8,
            declared: RiskCategory::Normal,
            expected: RiskCategory::Osteopenia,
        })
    );
    assert_eq!(derive_risk_category_consistency(-3.0, RiskCategory::Osteoporosis), None);
}

#[test]
fn severe_needs_an_osteoporotic_t_score() {
    assert_eq!(derive_risk_category_consistency(-3.2, RiskCategory::SevereOsteoporosis), None);
    assert_eq!(derive_risk_category_consistency(-2.5, RiskCategory::SevereOsteoporosis), None);
    assert!(matches!(
        derive_risk_category_consistency(-2.0, RiskCategory::SevereOsteoporosis),
        Some(ValidationWarning::CategoryMismatch { expected: RiskCategory::Osteopenia, .. })
    ));
}

#[test]
fn recommendation_mapping_is_total() {
    let expected = [
        (RiskCategory::Normal, DxaRecommendation::RoutineMonitoring),
        (RiskCategory::Osteopenia, DxaRecommendation::FollowUp6Months),
        (RiskCategory::Osteoporosis, DxaRecommendation::ImmediateDxaRecommended),
        (RiskCategory::SevereOsteoporosis, DxaRecommendation::ClinicalInterventionNeeded),
    ];
    for (category, recommendation) in expected {
        assert_eq!(classify_recommendation(category), recommendation);
    }
    for category in RiskCategory::ALL {
        assert_eq!(classify_recommendation(category), classify_recommendation(category));
    }
}

#[test]
fn declared_recommendation_is_kept_but_flagged() {
    let (kept, warning) =
        reconcile_recommendation(RiskCategory::Normal, Some(DxaRecommendation::FollowUp6Months));
    assert_eq!(kept, DxaRecommendation::FollowUp6Months);
    assert!(matches!(
        warning,
        Some(ValidationWarning::RecommendationMismatch {
            expected: DxaRecommendation::RoutineMonitoring,
            ..
        })
    ));

    let (derived, warning) = reconcile_recommendation(RiskCategory::Osteopenia, None);
    assert_eq!(derived, DxaRecommendation::FollowUp6Months);
    assert!(warning.is_none());
}
