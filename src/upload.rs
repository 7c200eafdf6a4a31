use std::fmt::Display;
use std::path::Path;

use log::warn;

/// File extensions accepted for answer sheet images.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_size_bytes: u64,
}

impl UploadLimits {
    pub fn from_megabytes(megabytes: u64) -> Self {
        Self {
            max_file_size_bytes: megabytes.saturating_mul(1024 * 1024),
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self::from_megabytes(DEFAULT_MAX_FILE_SIZE_MB)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    MissingFile,
    InvalidFileType(String),
    EmptyFile,
    FileTooLarge { size: u64, limit: u64 },
    ReadFailed(String),
}

impl UploadError {
    pub fn http_status(&self) -> u16 {
        match self {
            UploadError::FileTooLarge { .. } => 413,
            UploadError::ReadFailed(_) => 500,
            _ => 400,
        }
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::MissingFile => write!(f, "No image file provided."),
            UploadError::InvalidFileType(_) => write!(
                f,
                "Invalid file type. Please upload a PNG, JPG, or JPEG image."
            ),
            UploadError::EmptyFile => write!(f, "No file selected."),
            UploadError::FileTooLarge { size, limit } => write!(
                f,
                "File is too large ({} bytes). The limit is {} bytes.",
                size, limit
            ),
            UploadError::ReadFailed(_) => write!(
                f,
                "An internal server error occurred. Please try again later."
            ),
        }
    }
}

impl std::error::Error for UploadError {}

/// Whether the file name ends in one of [`ALLOWED_EXTENSIONS`], ignoring case.
pub fn allowed_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Checks an upload's name and size before its contents are read.
pub fn validate_upload(path: &Path, size: u64, limits: &UploadLimits) -> Result<(), UploadError> {
    if !allowed_file(path) {
        return Err(UploadError::InvalidFileType(path.display().to_string()));
    }
    if size == 0 {
        return Err(UploadError::EmptyFile);
    }
    if size > limits.max_file_size_bytes {
        return Err(UploadError::FileTooLarge {
            size,
            limit: limits.max_file_size_bytes,
        });
    }
    Ok(())
}

/// Validates and reads an uploaded sheet from disk.
pub fn read_upload(path: &Path, limits: &UploadLimits) -> Result<Vec<u8>, UploadError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(UploadError::MissingFile)
        }
        Err(e) => return Err(UploadError::ReadFailed(e.to_string())),
    };

    validate_upload(path, metadata.len(), limits)?;

    std::fs::read(path).map_err(|e| {
        warn!("failed to read {}: {}", path.display(), e);
        UploadError::ReadFailed(e.to_string())
    })
}
