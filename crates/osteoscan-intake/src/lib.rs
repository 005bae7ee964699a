//! osteoscan-intake
//!
//! The submission flow: upload, model call under a timeout, validation, and
//! persistence with the derived status.

pub mod error;
pub mod policy;
pub mod service;

pub use error::{IntakeError, UpstreamError};
pub use policy::IntakePolicy;
pub use service::{IntakeService, Revalidation};
