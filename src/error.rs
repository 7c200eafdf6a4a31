use std::fmt::Display;

/// Reasons a sheet could not be graded. Every variant is terminal for the
/// request that produced it; resubmitting the same bytes fails the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingError {
    /// The bytes are not a decodable image, or the image has no pixels.
    ImageDecode(String),

    /// Preprocessing succeeded but nothing passed the bubble filter.
    NoBubblesDetected,

    /// The number of bubbles found cannot be split into 4-option questions.
    BubbleCountMismatch { count: usize },

    /// The sheet and the answer key disagree on the number of questions.
    AnswerKeyLengthMismatch { questions: usize, answers: usize },
}

impl GradingError {
    /// All grading failures are caused by the submitted image or key.
    pub fn http_status(&self) -> u16 {
        400
    }
}

impl Display for GradingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradingError::ImageDecode(reason) => write!(
                f,
                "Image data could not be decoded. The file may be corrupt or not a valid image format. ({})",
                reason
            ),
            GradingError::NoBubblesDetected => write!(
                f,
                "No bubbles were recognized. Please ensure the image is clear, well-lit, and properly aligned."
            ),
            GradingError::BubbleCountMismatch { count } => write!(
                f,
                "An incomplete number of bubbles ({}) was detected. Each question must have 4 options.",
                count
            ),
            GradingError::AnswerKeyLengthMismatch { questions, answers } => write!(
                f,
                "Mismatch: The image has {} questions, but the answer key is for {} questions.",
                questions, answers
            ),
        }
    }
}

impl std::error::Error for GradingError {}
