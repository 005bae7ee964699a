use std::fmt;

use serde::Serialize;
use tracing::info;

/// Actor recorded when no authenticated user is attached to the request.
pub const SYSTEM_ACTOR: &str = "system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Patient,
    Analysis,
    Image,
    Report,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Patient => "patient",
            ResourceType::Analysis => "analysis",
            ResourceType::Image => "image",
            ResourceType::Report => "report",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    PatientCreated,
    PatientUpdated,
    ImageUploaded,
    AnalysisSubmitted,
    AnalysisCompleted,
    AnalysisFlaggedForReview,
    AnalysisFailed,
    ReviewApproved,
    AnalysisRevalidated,
    ReportRendered,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::PatientCreated => "patient_created",
            AuditAction::PatientUpdated => "patient_updated",
            AuditAction::ImageUploaded => "image_uploaded",
            AuditAction::AnalysisSubmitted => "analysis_submitted",
            AuditAction::AnalysisCompleted => "analysis_completed",
            AuditAction::AnalysisFlaggedForReview => "analysis_flagged_for_review",
            AuditAction::AnalysisFailed => "analysis_failed",
            AuditAction::ReviewApproved => "review_approved",
            AuditAction::AnalysisRevalidated => "analysis_revalidated",
            AuditAction::ReportRendered => "report_rendered",
        }
    }

    /// The resource an action applies to.
    pub fn resource_type(&self) -> ResourceType {
        match self {
            AuditAction::PatientCreated | AuditAction::PatientUpdated => ResourceType::Patient,
            AuditAction::ImageUploaded => ResourceType::Image,
            AuditAction::ReportRendered => ResourceType::Report,
            _ => ResourceType::Analysis,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured audit event for one clinical action.
///
/// Events are logged via `tracing` and land in CloudWatch Logs next to the
/// request log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub actor: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, resource_id: impl fmt::Display) -> Self {
        Self {
            action,
            resource_type: action.resource_type(),
            resource_id: resource_id.to_string(),
            actor: SYSTEM_ACTOR.to_string(),
            details: None,
        }
    }

    pub fn by(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.actor = %self.actor,
            audit.details = %details,
            "audit event"
        );
    }
}
