use log::debug;
use logging_timer::time;

use crate::{
    error::GradingError,
    types::{Bubble, Question, OPTIONS_PER_QUESTION},
};

/// Orders bubbles into question rows.
///
/// Bubbles are stable-sorted top to bottom by centroid, cut into consecutive
/// runs of [`OPTIONS_PER_QUESTION`], and each run is stable-sorted left to
/// right. Assumes the rows are roughly axis-aligned.
#[time]
pub fn group_questions(bubbles: &[Bubble]) -> Result<Vec<Question>, GradingError> {
    if bubbles.len() % OPTIONS_PER_QUESTION != 0 {
        return Err(GradingError::BubbleCountMismatch {
            count: bubbles.len(),
        });
    }

    let mut top_to_bottom = bubbles.to_vec();
    top_to_bottom.sort_by(|a, b| a.centroid().y.total_cmp(&b.centroid().y));

    let questions = top_to_bottom
        .chunks_exact(OPTIONS_PER_QUESTION)
        .enumerate()
        .map(|(i, row)| -> Result<Question, GradingError> {
            let mut row = row.to_vec();
            row.sort_by(|a, b| a.centroid().x.total_cmp(&b.centroid().x));
            let options: [Bubble; OPTIONS_PER_QUESTION] = row
                .try_into()
                .map_err(|_| GradingError::BubbleCountMismatch {
                    count: bubbles.len(),
                })?;
            Ok(Question {
                number: i + 1,
                options,
            })
        })
        .collect::<Result<Vec<Question>, GradingError>>()?;

    debug!("grouped {} bubbles into {} questions", bubbles.len(), questions.len());
    Ok(questions)
}
