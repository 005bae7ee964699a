use serde_json::json;

use osteoscan_audit::events::SYSTEM_ACTOR;
use osteoscan_audit::{AuditAction, AuditEvent, ResourceType};

#[test]
fn resource_type_follows_action() {
    assert_eq!(AuditAction::PatientUpdated.resource_type(), ResourceType::Patient);
    assert_eq!(AuditAction::ImageUploaded.resource_type(), ResourceType::Image);
    assert_eq!(AuditAction::AnalysisFailed.resource_type(), ResourceType::Analysis);
    assert_eq!(AuditAction::ReviewApproved.resource_type(), ResourceType::Analysis);
    assert_eq!(AuditAction::ReportRendered.resource_type(), ResourceType::Report);
}

#[test]
fn event_serializes_flat() {
    let event = AuditEvent::new(AuditAction::AnalysisFlaggedForReview, "a1b2")
        .with_details(json!({ "reasons": 2 }));
    assert_eq!(event.actor, SYSTEM_ACTOR);

    let value = serde_json::to_value(event.by("dr.hansen")).unwrap();
    assert_eq!(
        value,
        json!({
            "action": "analysis_flagged_for_review",
            "resource_type": "analysis",
            "resource_id": "a1b2",
            "actor": "dr.hansen",
            "details": { "reasons": 2 },
        })
    );
}

#[test]
fn emit_without_subscriber_is_silent() {
    AuditEvent::new(AuditAction::PatientCreated, 42).emit();
}
