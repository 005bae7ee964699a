use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use osteoscan_core::image::ImageFormat;
use osteoscan_core::models::analysis::XRayAnalysis;
use osteoscan_core::models::patient::Patient;
use osteoscan_core::query::{AnalysisQuery, PatientQuery};
use osteoscan_core::s3_keys;

use crate::error::StorageError;
use crate::store::{check_mrn_unique, ImageStore, RecordStore};

#[derive(Default)]
struct Inner {
    patients: HashMap<Uuid, Patient>,
    analyses: HashMap<Uuid, XRayAnalysis>,
    images: HashMap<String, Vec<u8>>,
}

/// In-process store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    async fn create_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.patients.contains_key(&patient.id) {
            return Err(StorageError::AlreadyExists {
                key: s3_keys::patient(patient.id),
            });
        }
        check_mrn_unique(inner.patients.values(), patient)?;
        inner.patients.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> Result<Patient, StorageError> {
        self.inner
            .read()
            .await
            .patients
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: s3_keys::patient(id),
            })
    }

    async fn update_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if !inner.patients.contains_key(&patient.id) {
            return Err(StorageError::NotFound {
                key: s3_keys::patient(patient.id),
            });
        }
        check_mrn_unique(inner.patients.values(), patient)?;
        inner.patients.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn list_patients(&self, query: &PatientQuery) -> Result<Vec<Patient>, StorageError> {
        let patients = self.inner.read().await.patients.values().cloned().collect();
        Ok(query.apply(patients))
    }

    async fn create_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        let mut inner = self.inner.write().await;
        if inner.analyses.contains_key(&analysis.id) {
            return Err(StorageError::AlreadyExists {
                key: s3_keys::analysis(analysis.id),
            });
        }
        inner.analyses.insert(analysis.id, analysis.clone());
        Ok(())
    }

    async fn get_analysis(&self, id: Uuid) -> Result<XRayAnalysis, StorageError> {
        self.inner
            .read()
            .await
            .analyses
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: s3_keys::analysis(id),
            })
    }

    async fn update_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        self.inner
            .write()
            .await
            .analyses
            .insert(analysis.id, analysis.clone());
        Ok(())
    }

    async fn list_analyses(
        &self,
        query: &AnalysisQuery,
    ) -> Result<Vec<XRayAnalysis>, StorageError> {
        let analyses = self.inner.read().await.analyses.values().cloned().collect();
        Ok(query.apply(analyses))
    }
}

impl ImageStore for MemoryStore {
    async fn put_image(&self, bytes: Vec<u8>, format: ImageFormat) -> Result<String, StorageError> {
        let key = s3_keys::image(Uuid::new_v4(), format);
        self.inner.write().await.images.insert(key.clone(), bytes);
        Ok(key)
    }

    async fn get_image(&self, image_url: &str) -> Result<Vec<u8>, StorageError> {
        self.inner
            .read()
            .await
            .images
            .get(image_url)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                key: image_url.to_string(),
            })
    }
}
