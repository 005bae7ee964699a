use jiff::Timestamp;

use osteoscan_core::models::analysis::{
    AnalysisFindings, AnalysisStatus, AnalysisSubmission, AnatomicalRegion, DxaRecommendation,
    RegionalIndices, RiskCategory, XRayAnalysis,
};
use osteoscan_core::models::patient::Gender;
use osteoscan_scoring::submission::validate_submission;
use osteoscan_scoring::{
    validate_always_required, AnalysisRecordValidator, MeasureField, ValidationError,
    ValidationWarning,
};

fn in_bounds(regional: RegionalIndices, t_score: f64, category: RiskCategory) -> AnalysisFindings {
    AnalysisFindings {
        regional,
        texture_contrast: Some(0.72),
        texture_homogeneity: Some(0.61),
        texture_energy: Some(0.44),
        texture_entropy: Some(5.1),
        fractal_dimension: Some(1.46),
        predicted_bmd_gm_cm2: Some(0.98),
        predicted_t_score: Some(t_score),
        predicted_z_score: Some(0.1),
        osteoporosis_risk_category: Some(category),
        dxa_recommendation: None,
        confidence_score: Some(88.0),
        texture_analysis_method: Some("GLCM + box-counting fractal".to_string()),
        preprocessing_applied: Some("CLAHE".to_string()),
    }
}

fn calcaneus_triple() -> RegionalIndices {
    RegionalIndices {
        singh_index: None,
        jhamaria_index: Some(8.0),
        cortical_thickness_mm: None,
    }
}

fn record(region: AnatomicalRegion) -> XRayAnalysis {
    XRayAnalysis::processing(
        AnalysisSubmission {
            patient_id: None,
            patient_name: "Anna Berg".to_string(),
            patient_age: 71,
            patient_gender: Gender::Female,
            anatomical_region: region,
            image_url: "images/heel.png".to_string(),
            analysis_notes: None,
        },
        Timestamp::from_second(1_750_000_000).unwrap(),
    )
}

#[test]
fn calcaneus_end_to_end_completes_with_routine_monitoring() {
    let findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
    let validated = AnalysisRecordValidator::new()
        .validate(AnatomicalRegion::Calcaneus, &findings)
        .unwrap();

    assert_eq!(validated.status, AnalysisStatus::Completed);
    assert_eq!(validated.recommendation, DxaRecommendation::RoutineMonitoring);
    assert_eq!(validated.risk_category, RiskCategory::Normal);
    assert!(validated.warnings.is_empty());
    assert_eq!(validated.findings.regional, calcaneus_triple());
    assert_eq!(
        validated.findings.dxa_recommendation,
        Some(DxaRecommendation::RoutineMonitoring)
    );
}

#[test]
fn femur_with_jhamaria_is_rejected() {
    let regional = RegionalIndices {
        singh_index: Some(4.0),
        jhamaria_index: Some(5.0),
        cortical_thickness_mm: Some(3.5),
    };
    let findings = in_bounds(regional, -1.5, RiskCategory::Osteopenia);
    let err = AnalysisRecordValidator::new()
        .validate(AnatomicalRegion::ProximalFemur, &findings)
        .unwrap_err();
    assert!(matches!(
        err,
        ValidationError::UnexpectedValue {
            field: MeasureField::JhamariaIndex,
            region: AnatomicalRegion::ProximalFemur,
            ..
        }
    ));
}

#[test]
fn category_mismatch_goes_to_review_uncorrected() {
    let findings = in_bounds(calcaneus_triple(), -1.8, RiskCategory::Normal);
    let validated = AnalysisRecordValidator::new()
        .validate(AnatomicalRegion::Calcaneus, &findings)
        .unwrap();

    assert_eq!(validated.status, AnalysisStatus::RequiresReview);
    assert_eq!(validated.risk_category, RiskCategory::Normal);
    assert_eq!(
        validated.findings.osteoporosis_risk_category,
        Some(RiskCategory::Normal)
    );
    assert!(matches!(
        validated.warnings.as_slice(),
        [ValidationWarning::CategoryMismatch { expected: RiskCategory::Osteopenia, .. }]
    ));
}

#[test]
fn always_required_fields_are_bounded_not_clamped() {
    let cases = [
        (MeasureField::TextureContrast, 2.5),
        (MeasureField::TextureHomogeneity, 0.2),
        (MeasureField::TextureEnergy, 0.85),
        (MeasureField::TextureEntropy, 1.0),
        (MeasureField::FractalDimension, 1.9),
        (MeasureField::PredictedBmdGmCm2, 0.4),
        (MeasureField::ConfidenceScore, 101.0),
        (MeasureField::PredictedTScore, -4.5),
    ];
    for (field, bad) in cases {
        let mut findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
        match field {
            MeasureField::TextureContrast => findings.texture_contrast = Some(bad),
            MeasureField::TextureHomogeneity => findings.texture_homogeneity = Some(bad),
            MeasureField::TextureEnergy => findings.texture_energy = Some(bad),
            MeasureField::TextureEntropy => findings.texture_entropy = Some(bad),
            MeasureField::FractalDimension => findings.fractal_dimension = Some(bad),
            MeasureField::PredictedBmdGmCm2 => findings.predicted_bmd_gm_cm2 = Some(bad),
            MeasureField::ConfidenceScore => findings.confidence_score = Some(bad),
            MeasureField::PredictedTScore => findings.predicted_t_score = Some(bad),
            _ => unreachable!(),
        }
        let err = validate_always_required(&findings).unwrap_err();
        match err {
            ValidationError::FieldOutOfBounds { field: f, value, bound } => {
                assert_eq!(f, field);
                assert_eq!(value, bad);
                assert_eq!(Some(bound), field.bound());
            }
            other => panic!("{field}: unexpected {other:?}"),
        }
    }
}

#[test]
fn missing_or_non_finite_measures_fail() {
    let mut findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
    findings.texture_entropy = None;
    assert_eq!(
        validate_always_required(&findings).unwrap_err(),
        ValidationError::Missing { field: MeasureField::TextureEntropy }
    );

    let mut findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
    findings.fractal_dimension = Some(f64::NAN);
    assert!(matches!(
        validate_always_required(&findings).unwrap_err(),
        ValidationError::FieldOutOfBounds { field: MeasureField::FractalDimension, .. }
    ));

    let mut findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
    findings.osteoporosis_risk_category = None;
    assert_eq!(
        AnalysisRecordValidator::new()
            .validate(AnatomicalRegion::Calcaneus, &findings)
            .unwrap_err(),
        ValidationError::Missing { field: MeasureField::OsteoporosisRiskCategory }
    );
}

#[test]
fn low_confidence_floor_sends_to_review() {
    let mut findings = in_bounds(calcaneus_triple(), -0.3, RiskCategory::Normal);
    findings.confidence_score = Some(62.0);

    let lenient = AnalysisRecordValidator::new();
    assert_eq!(
        lenient.validate(AnatomicalRegion::Calcaneus, &findings).unwrap().status,
        AnalysisStatus::Completed
    );

    let strict = AnalysisRecordValidator::new().with_confidence_floor(75.0);
    let validated = strict.validate(AnatomicalRegion::Calcaneus, &findings).unwrap();
    assert_eq!(validated.status, AnalysisStatus::RequiresReview);
    assert_eq!(
        validated.warnings,
        [ValidationWarning::LowConfidence { confidence: 62.0, floor: 75.0 }]
    );
}

#[test]
fn revalidating_a_stored_record_is_idempotent() {
    let validator = AnalysisRecordValidator::new();
    for (t_score, category, expected) in [
        (-0.3, RiskCategory::Normal, AnalysisStatus::Completed),
        (-1.8, RiskCategory::Normal, AnalysisStatus::RequiresReview),
    ] {
        let mut stored = record(AnatomicalRegion::Calcaneus);
        let first = validator
            .validate(
                AnatomicalRegion::Calcaneus,
                &in_bounds(calcaneus_triple(), t_score, category),
            )
            .unwrap();
        first.apply_to(&mut stored);
        assert_eq!(stored.analysis_status, expected);

        let second = validator.validate_record(&stored).unwrap();
        assert_eq!(second.status, expected);
        assert_eq!(second.findings, stored.findings);

        let mut again = stored.clone();
        second.apply_to(&mut again);
        assert_eq!(again, stored);
    }
}

#[test]
fn review_reasons_are_recorded() {
    let mut stored = record(AnatomicalRegion::Calcaneus);
    let mut findings = in_bounds(calcaneus_triple(), -1.8, RiskCategory::Normal);
    findings.dxa_recommendation = Some(DxaRecommendation::ImmediateDxaRecommended);
    AnalysisRecordValidator::new()
        .validate(AnatomicalRegion::Calcaneus, &findings)
        .unwrap()
        .apply_to(&mut stored);

    assert_eq!(stored.analysis_status, AnalysisStatus::RequiresReview);
    assert_eq!(stored.review_reasons.len(), 2);
    assert!(stored.review_reasons[0].contains("osteopenia"));
    assert!(stored.review_reasons[1].contains("routine_monitoring"));
}

#[test]
fn submission_rules() {
    let mut submission = AnalysisSubmission {
        patient_id: None,
        patient_name: "Anna Berg".to_string(),
        patient_age: 71,
        patient_gender: Gender::Female,
        anatomical_region: AnatomicalRegion::Clavicle,
        image_url: "images/a.png".to_string(),
        analysis_notes: None,
    };
    assert!(validate_submission(&submission).is_ok());

    submission.patient_age = 0;
    assert!(matches!(
        validate_submission(&submission),
        Err(ValidationError::InvalidSubmission { ref field, .. }) if field == "patient_age"
    ));

    submission.patient_age = 121;
    assert!(validate_submission(&submission).is_err());

    submission.patient_age = 50;
    submission.image_url = " ".to_string();
    assert!(validate_submission(&submission).is_err());
}
