//! Grades photographed multiple-choice answer sheets.
//!
//! A sheet is a column of question rows with four bubbles each. The pipeline
//! decodes the image, binarizes it, traces the outer contours, keeps the
//! bubble-shaped ones, orders them into questions, picks the densest bubble
//! per question, and compares the picks with an answer key.
//!
//! ```no_run
//! let bytes = std::fs::read("sheet.png").unwrap();
//! let key = "2,4,1,3,2".parse().unwrap();
//! let result = omr_grader::grade(&bytes, &key).unwrap();
//! println!("{}/{}", result.correct_count, result.total_questions);
//! ```

pub mod answer_key;
pub mod bubbles;
pub mod config;
pub mod debug;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod grade;
pub mod image_utils;
pub mod preprocess;
pub mod questions;
pub mod response;
pub mod score;
pub mod shapes;
pub mod types;
pub mod upload;

pub use answer_key::{AnswerKey, AnswerKeyParseError};
pub use error::GradingError;
pub use grade::{grade, GradeOptions, GradedSheet, Grader};
pub use response::GradeResponse;
pub use types::GradingResult;
