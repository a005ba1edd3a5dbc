//! Uploaded image validation.
//!
//! Checks an image file before it is handed to the classifier: it must exist,
//! fit the size limit, and start with the magic bytes of a supported format.

use std::path::{Path, PathBuf};

use image::ImageFormat;

use crate::config::UploadConfig;
use crate::error::UploadError;

/// Formats the classifier accepts.
const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// A validated image, read fully into memory.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    path: PathBuf,
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl ImageUpload {
    /// Read and validate an image file.
    pub fn open(path: &Path, limits: &UploadConfig) -> Result<Self, UploadError> {
        if !path.exists() {
            return Err(UploadError::NotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            message: format!("Cannot read metadata: {e}"),
        })?;

        let max_bytes = limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(UploadError::TooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: limits.max_file_size_mb,
            });
        }

        let bytes = std::fs::read(path).map_err(|e| UploadError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let format = Self::detect_format(&bytes).map_err(|message| {
            UploadError::UnsupportedFormat {
                path: path.to_path_buf(),
                message,
            }
        })?;

        tracing::debug!(
            "Accepted upload {:?} ({}, {} bytes)",
            path,
            format.to_mime_type(),
            bytes.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
            format,
        })
    }

    /// Identify the image format from its header bytes.
    fn detect_format(bytes: &[u8]) -> Result<ImageFormat, String> {
        if bytes.len() < 4 {
            return Err("File too small to be a valid image".to_string());
        }

        let format = image::guess_format(bytes)
            .map_err(|_| "Unrecognized image format (invalid magic bytes)".to_string())?;

        if SUPPORTED_FORMATS.contains(&format) {
            Ok(format)
        } else {
            Err(format!("{format:?} images are not supported"))
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// MIME type for the detected format (e.g. "image/png").
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }
}
