use logging_timer::time;

use crate::{answer_key::AnswerKey, error::GradingError, types::GradingResult};

/// Compares the sheet's selections with the key, question by question.
/// Unanswered questions are never correct.
#[time]
pub fn score_answers(
    selected: &[Option<u8>],
    key: &AnswerKey,
) -> Result<GradingResult, GradingError> {
    if selected.len() != key.len() {
        return Err(GradingError::AnswerKeyLengthMismatch {
            questions: selected.len(),
            answers: key.len(),
        });
    }

    let correct_count = selected
        .iter()
        .zip(key.answers())
        .filter(|(answer, expected)| **answer == Some(**expected))
        .count();

    Ok(GradingResult {
        correct_count,
        total_questions: selected.len(),
    })
}
