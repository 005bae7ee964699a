//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the
//! canonical layout of objects in the Osteoscan bucket.

use uuid::Uuid;

use crate::image::ImageFormat;

pub const PATIENTS_PREFIX: &str = "patients/";

pub const ANALYSES_PREFIX: &str = "analyses/";

pub const IMAGES_PREFIX: &str = "images/";

pub fn patient(id: Uuid) -> String {
    format!("{PATIENTS_PREFIX}{id}.json")
}

pub fn analysis(id: Uuid) -> String {
    format!("{ANALYSES_PREFIX}{id}.json")
}

pub fn image(id: Uuid, format: ImageFormat) -> String {
    format!("{IMAGES_PREFIX}{id}.{}", format.extension())
}

/// Returns true for keys that hold a JSON record (skips folder markers and
/// stray uploads under a record prefix).
pub fn is_record_key(key: &str) -> bool {
    key.ends_with(".json")
}
