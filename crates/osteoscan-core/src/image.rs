//! Accepted X-ray image formats and upload limits.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Dicom,
}

impl ImageFormat {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "application/dicom" => Some(ImageFormat::Dicom),
            _ => None,
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "dcm" | "dicom" => Some(ImageFormat::Dicom),
            _ => None,
        }
    }

    /// Resolve the format from a content type, falling back to the file
    /// extension (browsers often send DICOM as `application/octet-stream`).
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self, CoreError> {
        if let Some(format) = content_type.and_then(Self::from_content_type) {
            return Ok(format);
        }
        if let Some(format) = filename
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| Self::from_extension(ext))
        {
            return Ok(format);
        }
        Err(CoreError::UnsupportedImageFormat(
            content_type
                .or(filename)
                .unwrap_or("unknown")
                .to_string(),
        ))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::Dicom => "dcm",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Dicom => "application/dicom",
        }
    }

    /// Check the leading bytes. DICOM files may omit the preamble, so any
    /// body is accepted for them.
    pub fn matches_signature(&self, bytes: &[u8]) -> bool {
        match self {
            ImageFormat::Jpeg => bytes.starts_with(&[0xFF, 0xD8, 0xFF]),
            ImageFormat::Png => {
                bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
            }
            ImageFormat::Dicom => true,
        }
    }
}

/// Check an upload body against the size limit and the format signature.
pub fn check_upload(bytes: &[u8], format: ImageFormat) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::invalid("image", "upload is empty"));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::invalid(
            "image",
            format!(
                "upload is {} bytes, limit is {MAX_IMAGE_BYTES}",
                bytes.len()
            ),
        ));
    }
    if !format.matches_signature(bytes) {
        return Err(CoreError::invalid(
            "image",
            format!("body is not a valid {} file", format.extension()),
        ));
    }
    Ok(())
}
