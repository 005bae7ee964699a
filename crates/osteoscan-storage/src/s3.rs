use aws_sdk_s3::Client;
use tracing::info;
use uuid::Uuid;

use osteoscan_core::image::ImageFormat;
use osteoscan_core::models::analysis::XRayAnalysis;
use osteoscan_core::models::patient::Patient;
use osteoscan_core::query::{AnalysisQuery, PatientQuery};
use osteoscan_core::s3_keys;

use crate::error::StorageError;
use crate::objects;
use crate::state;
use crate::store::{check_mrn_unique, ImageStore, RecordStore};

/// Records and images as objects in one S3 bucket.
///
/// Medical record number uniqueness is best effort here: the check lists the
/// patients and the write follows as a separate request, so two concurrent
/// writes carrying the same number can both land. [`MemoryStore`] checks
/// and writes under one lock and has no such window.
///
/// [`MemoryStore`]: crate::memory::MemoryStore
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn all_patients(&self) -> Result<Vec<Patient>, StorageError> {
        state::load_all(&self.client, &self.bucket, s3_keys::PATIENTS_PREFIX).await
    }
}

impl RecordStore for S3Store {
    async fn create_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        // Not atomic with the write below; see the type docs.
        check_mrn_unique(&self.all_patients().await?, patient)?;
        let key = s3_keys::patient(patient.id);
        state::create_json(&self.client, &self.bucket, &key, patient).await?;
        info!(patient_id = %patient.id, "patient created");
        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> Result<Patient, StorageError> {
        state::load_json(&self.client, &self.bucket, &s3_keys::patient(id)).await
    }

    async fn update_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        let key = s3_keys::patient(patient.id);
        // Ensure the record exists before overwriting.
        objects::get_object(&self.client, &self.bucket, &key).await?;
        check_mrn_unique(&self.all_patients().await?, patient)?;
        state::save_json(&self.client, &self.bucket, &key, patient).await?;
        info!(patient_id = %patient.id, "patient updated");
        Ok(())
    }

    async fn list_patients(&self, query: &PatientQuery) -> Result<Vec<Patient>, StorageError> {
        Ok(query.apply(self.all_patients().await?))
    }

    async fn create_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        let key = s3_keys::analysis(analysis.id);
        state::create_json(&self.client, &self.bucket, &key, analysis).await
    }

    async fn get_analysis(&self, id: Uuid) -> Result<XRayAnalysis, StorageError> {
        state::load_json(&self.client, &self.bucket, &s3_keys::analysis(id)).await
    }

    async fn update_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        let key = s3_keys::analysis(analysis.id);
        state::save_json(&self.client, &self.bucket, &key, analysis).await
    }

    async fn list_analyses(
        &self,
        query: &AnalysisQuery,
    ) -> Result<Vec<XRayAnalysis>, StorageError> {
        let analyses =
            state::load_all(&self.client, &self.bucket, s3_keys::ANALYSES_PREFIX).await?;
        Ok(query.apply(analyses))
    }
}

impl ImageStore for S3Store {
    async fn put_image(&self, bytes: Vec<u8>, format: ImageFormat) -> Result<String, StorageError> {
        let key = s3_keys::image(Uuid::new_v4(), format);
        let size = bytes.len();
        objects::put_object(
            &self.client,
            &self.bucket,
            &key,
            bytes,
            Some(format.content_type()),
        )
        .await?;
        info!(key = %key, size, "image uploaded");
        Ok(key)
    }

    async fn get_image(&self, image_url: &str) -> Result<Vec<u8>, StorageError> {
        objects::get_object(&self.client, &self.bucket, image_url).await
    }
}
