use uuid::Uuid;

use osteoscan_core::image::ImageFormat;
use osteoscan_core::models::analysis::XRayAnalysis;
use osteoscan_core::models::patient::Patient;
use osteoscan_core::query::{AnalysisQuery, PatientQuery};

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::s3::S3Store;
use crate::store::{ImageStore, RecordStore};

/// The store selected at startup.
#[derive(Clone)]
pub enum StoreBackend {
    S3(S3Store),
    Memory(MemoryStore),
}

macro_rules! dispatch {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            StoreBackend::S3($store) => $call.await,
            StoreBackend::Memory($store) => $call.await,
        }
    };
}

impl StoreBackend {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::S3(_) => "s3",
            StoreBackend::Memory(_) => "memory",
        }
    }
}

impl RecordStore for StoreBackend {
    async fn create_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        dispatch!(self, s => s.create_patient(patient))
    }

    async fn get_patient(&self, id: Uuid) -> Result<Patient, StorageError> {
        dispatch!(self, s => s.get_patient(id))
    }

    async fn update_patient(&self, patient: &Patient) -> Result<(), StorageError> {
        dispatch!(self, s => s.update_patient(patient))
    }

    async fn list_patients(&self, query: &PatientQuery) -> Result<Vec<Patient>, StorageError> {
        dispatch!(self, s => s.list_patients(query))
    }

    async fn create_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        dispatch!(self, s => s.create_analysis(analysis))
    }

    async fn get_analysis(&self, id: Uuid) -> Result<XRayAnalysis, StorageError> {
        dispatch!(self, s => s.get_analysis(id))
    }

    async fn update_analysis(&self, analysis: &XRayAnalysis) -> Result<(), StorageError> {
        dispatch!(self, s => s.update_analysis(analysis))
    }

    async fn list_analyses(
        &self,
        query: &AnalysisQuery,
    ) -> Result<Vec<XRayAnalysis>, StorageError> {
        dispatch!(self, s => s.list_analyses(query))
    }
}

impl ImageStore for StoreBackend {
    async fn put_image(&self, bytes: Vec<u8>, format: ImageFormat) -> Result<String, StorageError> {
        dispatch!(self, s => s.put_image(bytes, format))
    }

    async fn get_image(&self, image_url: &str) -> Result<Vec<u8>, StorageError> {
        dispatch!(self, s => s.get_image(image_url))
    }
}
