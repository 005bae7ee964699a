use jiff::Timestamp;
use serde_json::json;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use osteoscan_audit::{AuditAction, AuditEvent};
use osteoscan_bedrock::prompt::{build_analysis_prompt, AnalysisRequest};
use osteoscan_bedrock::{parse_findings, AnalysisModel, PromptImage};
use osteoscan_core::image::{check_upload, ImageFormat};
use osteoscan_core::models::analysis::{
    AnalysisFindings, AnalysisStatus, AnalysisSubmission, XRayAnalysis,
};
use osteoscan_core::models::patient::{Patient, PatientInput};
use osteoscan_scoring::status::transition;
use osteoscan_scoring::submission::validate_submission;
use osteoscan_scoring::{AnalysisRecordValidator, ValidationError, ValidationWarning};
use osteoscan_storage::{ImageStore, RecordStore};

use crate::error::{IntakeError, UpstreamError};
use crate::policy::IntakePolicy;

/// Outcome of re-running the validator on a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct Revalidation {
    pub analysis: XRayAnalysis,
    pub warnings: Vec<ValidationWarning>,
    /// The status the validator derives today, which may differ from the
    /// stored one when the record is held for review.
    pub derived_status: AnalysisStatus,
    /// Whether the stored status was changed and written back.
    pub changed: bool,
}

/// Runs submissions through the model and the validator, one sequential flow
/// per submission. Holds no mutable state of its own.
pub struct IntakeService<M, S> {
    model: M,
    store: S,
    policy: IntakePolicy,
    validator: AnalysisRecordValidator,
}

impl<M, S> IntakeService<M, S>
where
    M: AnalysisModel,
    S: RecordStore + ImageStore,
{
    pub fn new(model: M, store: S, policy: IntakePolicy) -> Self {
        Self {
            model,
            store,
            validator: policy.validator(),
            policy,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub async fn register_patient(&self, input: PatientInput) -> Result<Patient, IntakeError> {
        let patient = Patient::create(input, Timestamp::now())?;
        self.store.create_patient(&patient).await?;
        AuditEvent::new(AuditAction::PatientCreated, patient.id).emit();
        Ok(patient)
    }

    pub async fn edit_patient(
        &self,
        id: Uuid,
        input: PatientInput,
    ) -> Result<Patient, IntakeError> {
        let mut patient = self.store.get_patient(id).await?;
        patient.apply_edit(input, Timestamp::now())?;
        self.store.update_patient(&patient).await?;
        AuditEvent::new(AuditAction::PatientUpdated, patient.id).emit();
        Ok(patient)
    }

    /// Check and store an uploaded image. Returns the `image_url` to submit
    /// with.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        content_type: Option<&str>,
        filename: Option<&str>,
    ) -> Result<String, IntakeError> {
        let format = ImageFormat::detect(content_type, filename)?;
        check_upload(&bytes, format)?;
        let size = bytes.len();

        let image_url = self
            .store
            .put_image(bytes, format)
            .await
            .map_err(|e| IntakeError::Upload(UpstreamError::Upload(e.to_string())))?;

        AuditEvent::new(AuditAction::ImageUploaded, &image_url)
            .with_details(json!({ "format": format, "bytes": size }))
            .emit();
        Ok(image_url)
    }

    /// Run one submission end to end.
    ///
    /// The record is stored as `processing` before the model is called, so
    /// every attempt past submission checks leaves a record behind: completed,
    /// requires_review, or failed with the reason.
    pub async fn submit(
        &self,
        submission: AnalysisSubmission,
    ) -> Result<XRayAnalysis, IntakeError> {
        validate_submission(&submission).map_err(IntakeError::Rejected)?;
        if let Some(patient_id) = submission.patient_id {
            self.store.get_patient(patient_id).await?;
        }

        let request = AnalysisRequest::from(&submission);
        let mut record = XRayAnalysis::processing(submission, Timestamp::now());
        self.store.create_analysis(&record).await?;
        info!(analysis_id = %record.id, region = %record.anatomical_region, "analysis submitted");
        AuditEvent::new(AuditAction::AnalysisSubmitted, record.id)
            .with_details(json!({ "region": record.anatomical_region }))
            .emit();

        let findings = match self.run_model(&record, &request).await {
            Ok(findings) => findings,
            Err(source) => {
                warn!(analysis_id = %record.id, error = %source, "analysis upstream failure");
                self.store_failure(&mut record, source.to_string()).await?;
                return Err(IntakeError::Upstream {
                    record_id: record.id,
                    source,
                });
            }
        };

        let validated = match self.validator.validate(record.anatomical_region, &findings) {
            Ok(validated) => validated,
            Err(source) => {
                warn!(analysis_id = %record.id, error = %source, "analysis failed validation");
                self.store_failure(&mut record, source.to_string()).await?;
                return Err(IntakeError::Validation {
                    record_id: record.id,
                    source,
                });
            }
        };

        transition(record.analysis_status, validated.status).map_err(IntakeError::Rejected)?;
        validated.apply_to(&mut record);
        record.updated_at = Timestamp::now();
        self.store.update_analysis(&record).await?;

        info!(
            analysis_id = %record.id,
            status = %record.analysis_status,
            category = %validated.risk_category,
            warnings = validated.warnings.len(),
            "analysis stored"
        );
        let action = if record.analysis_status == AnalysisStatus::Completed {
            AuditAction::AnalysisCompleted
        } else {
            AuditAction::AnalysisFlaggedForReview
        };
        AuditEvent::new(action, record.id)
            .with_details(json!({ "review_reasons": record.review_reasons }))
            .emit();

        Ok(record)
    }

    /// Operator approval of a record held for review.
    pub async fn approve_review(&self, id: Uuid, actor: &str) -> Result<XRayAnalysis, IntakeError> {
        let mut record = self.store.get_analysis(id).await?;
        if record.analysis_status != AnalysisStatus::RequiresReview {
            return Err(IntakeError::Rejected(ValidationError::InvalidTransition {
                from: record.analysis_status,
                to: AnalysisStatus::Completed,
            }));
        }
        record.analysis_status = AnalysisStatus::Completed;
        let now = Timestamp::now();
        record.reviewed_at = Some(now);
        record.updated_at = now;
        self.store.update_analysis(&record).await?;

        AuditEvent::new(AuditAction::ReviewApproved, record.id)
            .by(actor)
            .emit();
        Ok(record)
    }

    /// Re-run the validator on a stored record.
    ///
    /// Nothing is written when the derived status matches the stored one.
    /// Revalidation never completes a held record; that takes
    /// [`approve_review`](Self::approve_review). It also never reopens an
    /// operator-approved completion.
    pub async fn revalidate(&self, id: Uuid) -> Result<Revalidation, IntakeError> {
        let mut record = self.store.get_analysis(id).await?;
        let validated = self
            .validator
            .validate_record(&record)
            .map_err(|source| IntakeError::Validation {
                record_id: record.id,
                source,
            })?;

        let approved = record.reviewed_at.is_some()
            && record.analysis_status == AnalysisStatus::Completed;
        let held = record.analysis_status == AnalysisStatus::RequiresReview;
        let changed = validated.status != record.analysis_status && !approved && !held;
        if changed {
            transition(record.analysis_status, validated.status).map_err(IntakeError::Rejected)?;
            validated.apply_to(&mut record);
            record.updated_at = Timestamp::now();
            self.store.update_analysis(&record).await?;
        }

        info!(
            analysis_id = %record.id,
            status = %record.analysis_status,
            changed,
            "analysis revalidated"
        );
        AuditEvent::new(AuditAction::AnalysisRevalidated, record.id)
            .with_details(json!({ "derived_status": validated.status, "changed": changed }))
            .emit();

        Ok(Revalidation {
            analysis: record,
            warnings: validated.warnings,
            derived_status: validated.status,
            changed,
        })
    }

    async fn run_model(
        &self,
        record: &XRayAnalysis,
        request: &AnalysisRequest,
    ) -> Result<AnalysisFindings, UpstreamError> {
        let image = self.load_image(&record.image_url).await?;
        let prompt = build_analysis_prompt(request, Some(image));

        let output = timeout(self.policy.analysis_timeout, self.model.analyze(&prompt))
            .await
            .map_err(|_| UpstreamError::Timeout(self.policy.analysis_timeout))??;
        info!(
            analysis_id = %record.id,
            tokens = output.usage.total(),
            "analysis model replied"
        );

        Ok(parse_findings(&output.text)?)
    }

    async fn load_image(&self, image_url: &str) -> Result<PromptImage, UpstreamError> {
        let format = ImageFormat::detect(None, Some(image_url))
            .map_err(|e| UpstreamError::Upload(e.to_string()))?;
        let bytes = self
            .store
            .get_image(image_url)
            .await
            .map_err(|e| UpstreamError::Upload(e.to_string()))?;
        Ok(PromptImage { bytes, format })
    }

    async fn store_failure(
        &self,
        record: &mut XRayAnalysis,
        reason: String,
    ) -> Result<(), IntakeError> {
        transition(record.analysis_status, AnalysisStatus::Failed).map_err(IntakeError::Rejected)?;
        record.fail(reason, Timestamp::now());
        self.store.update_analysis(record).await?;
        AuditEvent::new(AuditAction::AnalysisFailed, record.id)
            .with_details(json!({ "reason": record.failure_reason }))
            .emit();
        Ok(())
    }
}
