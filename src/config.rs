use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::grade::GradeOptions;

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(path, e) => {
                write!(f, "Error reading config {}: {}", path.display(), e)
            }
            ConfigError::Parse(path, e) => {
                write!(f, "Error parsing config {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read(_, e) => Some(e),
            ConfigError::Parse(_, e) => Some(e),
        }
    }
}

/// Loads grading options from a JSON file. Sections and fields that are
/// missing keep their defaults.
///
/// ```json
/// {
///   "preprocess": { "blurSigma": 1.1, "minContrast": 32 },
///   "bubbles": { "minAspectRatio": 0.9, "maxAspectRatio": 1.2, "minSide": 20, "minArea": 399 },
///   "fill": { "minFillRatio": 0.3 }
/// }
/// ```
pub fn load_grade_options(path: &Path) -> Result<GradeOptions, ConfigError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    serde_json::from_str(&json).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}
