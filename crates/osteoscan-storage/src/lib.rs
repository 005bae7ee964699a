//! osteoscan-storage
//!
//! Record and image persistence. `S3Store` is a thin wrapper around the AWS
//! S3 SDK; `MemoryStore` keeps everything in process.

pub mod backend;
pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod state;
pub mod store;

pub use backend::StoreBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::{ImageStore, RecordStore};
