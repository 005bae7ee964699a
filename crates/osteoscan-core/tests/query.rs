use jiff::Timestamp;

use osteoscan_core::models::analysis::{
    AnalysisStatus, AnalysisSubmission, AnatomicalRegion, RiskCategory, XRayAnalysis,
};
use osteoscan_core::models::patient::Gender;
use osteoscan_core::query::AnalysisQuery;
use osteoscan_core::stats::DashboardStats;

fn analysis(
    created: i64,
    status: AnalysisStatus,
    category: Option<RiskCategory>,
) -> XRayAnalysis {
    let submission = AnalysisSubmission {
        patient_id: None,
        patient_name: format!("Patient {created}"),
        patient_age: 60,
        patient_gender: Gender::Male,
        anatomical_region: AnatomicalRegion::LumbarSpine,
        image_url: format!("images/{created}.png"),
        analysis_notes: None,
    };
    let mut a = XRayAnalysis::processing(submission, Timestamp::from_second(created).unwrap());
    a.analysis_status = status;
    a.findings.osteoporosis_risk_category = category;
    a
}

#[test]
fn reports_query_keeps_completed_newest_first() {
    let analyses = vec![
        analysis(10, AnalysisStatus::Completed, Some(RiskCategory::Normal)),
        analysis(30, AnalysisStatus::Completed, Some(RiskCategory::Osteopenia)),
        analysis(20, AnalysisStatus::RequiresReview, Some(RiskCategory::Normal)),
        analysis(40, AnalysisStatus::Failed, None),
    ];

    let listed = AnalysisQuery::reports(None).apply(analyses.clone());
    let names: Vec<_> = listed.iter().map(|a| a.patient_name.as_str()).collect();
    assert_eq!(names, ["Patient 30", "Patient 10"]);

    let normal = AnalysisQuery::reports(Some(RiskCategory::Normal)).apply(analyses);
    assert_eq!(normal.len(), 1);
    assert_eq!(normal[0].patient_name, "Patient 10");
}

#[test]
fn limit_applies_after_ordering() {
    let analyses = (1..=5)
        .map(|i| analysis(i, AnalysisStatus::Processing, None))
        .collect();
    let query = AnalysisQuery {
        limit: Some(2),
        ..AnalysisQuery::default()
    };
    let listed = query.apply(analyses);
    let names: Vec<_> = listed.iter().map(|a| a.patient_name.as_str()).collect();
    assert_eq!(names, ["Patient 5", "Patient 4"]);
}

#[test]
fn dashboard_split_rounds_and_merges_severe() {
    let analyses = vec![
        analysis(1, AnalysisStatus::Completed, Some(RiskCategory::Normal)),
        analysis(2, AnalysisStatus::Completed, Some(RiskCategory::Osteopenia)),
        analysis(3, AnalysisStatus::Completed, Some(RiskCategory::SevereOsteoporosis)),
        analysis(4, AnalysisStatus::Processing, None),
        analysis(5, AnalysisStatus::RequiresReview, Some(RiskCategory::Normal)),
    ];

    let stats = DashboardStats::compute(&analyses, 7);
    assert_eq!(stats.total_analyses, 5);
    assert_eq!(stats.total_patients, 7);
    assert_eq!(stats.processing_count, 1);
    assert_eq!(stats.requires_review_count, 1);
    assert_eq!(stats.classification.normal, 33);
    assert_eq!(stats.classification.osteopenia, 33);
    assert_eq!(stats.classification.osteoporosis, 33);
}

#[test]
fn dashboard_split_is_zero_without_completed() {
    let stats = DashboardStats::compute(&[analysis(1, AnalysisStatus::Failed, None)], 0);
    assert_eq!(stats.classification.normal, 0);
    assert_eq!(stats.classification.osteoporosis, 0);
}
