use std::sync::Arc;

use osteoscan_intake::IntakeService;
use osteoscan_storage::StoreBackend;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<M> {
    pub intake: Arc<IntakeService<M, StoreBackend>>,
}

impl<M> AppState<M> {
    pub fn new(intake: IntakeService<M, StoreBackend>) -> Self {
        Self {
            intake: Arc::new(intake),
        }
    }
}

impl<M> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            intake: Arc::clone(&self.intake),
        }
    }
}
