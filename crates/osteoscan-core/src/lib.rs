//! osteoscan-core
//!
//! Pure domain types, list queries, dashboard statistics and S3 key
//! conventions. No AWS SDK dependency; this is the shared vocabulary of the
//! Osteoscan system.

pub mod error;
pub mod image;
pub mod models;
pub mod query;
pub mod s3_keys;
pub mod stats;
