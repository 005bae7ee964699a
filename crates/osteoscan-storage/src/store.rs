use uuid::Uuid;

use osteoscan_core::image::ImageFormat;
use osteoscan_core::models::analysis::XRayAnalysis;
use osteoscan_core::models::patient::Patient;
use osteoscan_core::query::{AnalysisQuery, PatientQuery};

use crate::error::StorageError;

/// Persistence for patients and analysis records.
///
/// Listings are ordered newest first. Patient writes enforce that a medical
/// record number belongs to at most one patient.
pub trait RecordStore: Send + Sync {
    fn create_patient(
        &self,
        patient: &Patient,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn get_patient(&self, id: Uuid) -> impl Future<Output = Result<Patient, StorageError>> + Send;

    fn update_patient(
        &self,
        patient: &Patient,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_patients(
        &self,
        query: &PatientQuery,
    ) -> impl Future<Output = Result<Vec<Patient>, StorageError>> + Send;

    fn create_analysis(
        &self,
        analysis: &XRayAnalysis,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn get_analysis(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<XRayAnalysis, StorageError>> + Send;

    fn update_analysis(
        &self,
        analysis: &XRayAnalysis,
    ) -> impl Future<Output = Result<(), StorageError>> + Send;

    fn list_analyses(
        &self,
        query: &AnalysisQuery,
    ) -> impl Future<Output = Result<Vec<XRayAnalysis>, StorageError>> + Send;
}

/// Storage for uploaded X-ray images. The returned `image_url` is the handle
/// stored on analysis records.
pub trait ImageStore: Send + Sync {
    fn put_image(
        &self,
        bytes: Vec<u8>,
        format: ImageFormat,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;

    fn get_image(
        &self,
        image_url: &str,
    ) -> impl Future<Output = Result<Vec<u8>, StorageError>> + Send;
}

/// Reject `candidate` if another patient already carries its medical record
/// number.
pub fn check_mrn_unique<'a>(
    existing: impl IntoIterator<Item = &'a Patient>,
    candidate: &Patient,
) -> Result<(), StorageError> {
    let Some(mrn) = candidate.medical_record_number.as_deref() else {
        return Ok(());
    };
    match existing
        .into_iter()
        .find(|p| p.id != candidate.id && p.shares_mrn_with(mrn))
    {
        Some(other) => Err(StorageError::DuplicateMrn {
            mrn: mrn.trim().to_string(),
            existing: other.id,
        }),
        None => Ok(()),
    }
}
