use image::GrayImage;
use log::debug;
use logging_timer::time;
use serde::{Deserialize, Serialize};

use crate::{
    answer_key::AnswerKey,
    bubbles::{filter_bubbles, BubbleFilterOptions},
    error::GradingError,
    fill::{detect_fills, FillOptions, ScoredQuestion},
    image_utils::decode_image,
    preprocess::{preprocess, PreprocessOptions},
    questions::group_questions,
    score::score_answers,
    shapes::find_shapes,
    types::{BinaryImage, GradingResult, Shape},
};

/// Tuning for every stage of the grading pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GradeOptions {
    pub preprocess: PreprocessOptions,
    pub bubbles: BubbleFilterOptions,
    pub fill: FillOptions,
}

/// Everything the pipeline learned about one sheet.
#[derive(Debug, Clone)]
pub struct GradedSheet {
    pub gray: GrayImage,
    pub binary: BinaryImage,
    /// Every outer contour, bubble or not.
    pub shapes: Vec<Shape>,
    pub questions: Vec<ScoredQuestion>,
    pub result: GradingResult,
}

impl GradedSheet {
    /// The option selected for each question, top to bottom.
    pub fn selections(&self) -> Vec<Option<u8>> {
        self.questions.iter().map(|q| q.selected).collect()
    }
}

/// Grades answer sheets. Holds configuration only, so a single grader can be
/// shared between threads and reused for any number of sheets.
#[derive(Debug, Clone, Default)]
pub struct Grader {
    options: GradeOptions,
}

impl Grader {
    pub fn new(options: GradeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GradeOptions {
        &self.options
    }

    pub fn grade(
        &self,
        image_bytes: &[u8],
        answer_key: &AnswerKey,
    ) -> Result<GradingResult, GradingError> {
        self.grade_sheet(image_bytes, answer_key)
            .map(|sheet| sheet.result)
    }

    /// Runs the full pipeline and keeps the intermediate products.
    #[time]
    pub fn grade_sheet(
        &self,
        image_bytes: &[u8],
        answer_key: &AnswerKey,
    ) -> Result<GradedSheet, GradingError> {
        let image = decode_image(image_bytes)?;
        let preprocessed = preprocess(&image, &self.options.preprocess)?;
        let shapes = find_shapes(&preprocessed.binary);
        let bubbles = filter_bubbles(&shapes, &self.options.bubbles)?;
        let questions = group_questions(&bubbles)?;
        let questions = detect_fills(&questions, &preprocessed.binary, &self.options.fill);
        let selections = questions.iter().map(|q| q.selected).collect::<Vec<_>>();
        let result = score_answers(&selections, answer_key)?;

        debug!(
            "graded sheet: {}/{} correct",
            result.correct_count, result.total_questions
        );

        Ok(GradedSheet {
            gray: preprocessed.gray,
            binary: preprocessed.binary,
            shapes,
            questions,
            result,
        })
    }
}

/// Grades a sheet with the default options.
pub fn grade(image_bytes: &[u8], answer_key: &AnswerKey) -> Result<GradingResult, GradingError> {
    Grader::default().grade(image_bytes, answer_key)
}
