use log::debug;
use logging_timer::time;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::types::{BinaryImage, Bubble, Question, MARKED, OPTIONS_PER_QUESTION};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillOptions {
    /// When set, a question whose densest bubble is filled less than this
    /// fraction of its region is reported as unanswered. `None` always picks
    /// the densest bubble.
    pub min_fill_ratio: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredBubble {
    pub bubble: Bubble,
    /// Marked pixels inside the bubble's region.
    pub fill_score: u32,
    /// Total pixels inside the bubble's region.
    pub region_area: u32,
}

impl ScoredBubble {
    pub fn fill_ratio(&self) -> f32 {
        if self.region_area == 0 {
            0.0
        } else {
            self.fill_score as f32 / self.region_area as f32
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredQuestion {
    pub number: usize,
    pub options: [ScoredBubble; OPTIONS_PER_QUESTION],
    /// 1-based option chosen by the sheet, or `None` when unanswered.
    pub selected: Option<u8>,
}

/// Scores one bubble against the binary image. Only pixels enclosed by the
/// bubble's boundary count, so ink in the opening of a concave outline is
/// ignored.
pub fn score_bubble(bubble: &Bubble, binary: &BinaryImage) -> ScoredBubble {
    let origin = bubble.bounds();
    let (fill_score, region_area) = bubble
        .shape
        .region_mask()
        .enumerate_pixels()
        .filter(|(_, _, pixel)| **pixel == MARKED)
        .fold((0u32, 0u32), |(marked, area), (x, y, _)| {
            let ink = binary.is_marked(origin.left() + x as i32, origin.top() + y as i32);
            (marked + ink as u32, area + 1)
        });

    ScoredBubble {
        bubble: bubble.clone(),
        fill_score,
        region_area,
    }
}

/// Index of the highest score. Ties go to the lowest index, i.e. the
/// leftmost option. Returns `None` only for an empty slice.
pub fn densest_option(scores: &[u32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, u32)>, (i, &score)| match best {
            Some((_, best_score)) if score <= best_score => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

/// Decides which option of a question is marked.
pub fn score_question(
    question: &Question,
    binary: &BinaryImage,
    options: &FillOptions,
) -> ScoredQuestion {
    let scored = question
        .options
        .clone()
        .map(|bubble| score_bubble(&bubble, binary));

    let scores = scored.iter().map(|b| b.fill_score).collect::<Vec<u32>>();
    let selected = densest_option(&scores).and_then(|i| match options.min_fill_ratio {
        Some(min_ratio) if scored[i].fill_ratio() < min_ratio => None,
        _ => Some((i + 1) as u8),
    });

    debug!(
        "question {}: fill scores {:?}, selected {:?}",
        question.number, scores, selected
    );

    ScoredQuestion {
        number: question.number,
        options: scored,
        selected,
    }
}

/// Scores every question. Output order matches input order.
#[time]
pub fn detect_fills(
    questions: &[Question],
    binary: &BinaryImage,
    options: &FillOptions,
) -> Vec<ScoredQuestion> {
    questions
        .par_iter()
        .map(|question| score_question(question, binary, options))
        .collect()
}
