use serde::{Deserialize, Serialize};

use crate::{error::GradingError, types::GradingResult};

/// JSON body returned for a grading request.
///
/// ```json
/// {"status":"success","score":4,"total_questions":5}
/// {"status":"error","message":"No bubbles were recognized. ..."}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GradeResponse {
    Success {
        score: usize,
        total_questions: usize,
    },
    Error {
        message: String,
    },
}

impl GradeResponse {
    pub fn error(err: &impl std::error::Error) -> Self {
        GradeResponse::Error {
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GradeResponse::Success { .. })
    }
}

impl From<GradingResult> for GradeResponse {
    fn from(result: GradingResult) -> Self {
        GradeResponse::Success {
            score: result.correct_count,
            total_questions: result.total_questions,
        }
    }
}

impl From<Result<GradingResult, GradingError>> for GradeResponse {
    fn from(result: Result<GradingResult, GradingError>) -> Self {
        match result {
            Ok(result) => result.into(),
            Err(err) => GradeResponse::error(&err),
        }
    }
}
