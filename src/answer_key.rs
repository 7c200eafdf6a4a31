use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::OPTIONS_PER_QUESTION;

/// Expected option (1-based, left to right) for each question, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct AnswerKey(Vec<u8>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerKeyParseError {
    Empty,
    InvalidToken(String),
    OutOfRange(u8),
}

impl AnswerKeyParseError {
    pub fn http_status(&self) -> u16 {
        400
    }
}

impl Display for AnswerKeyParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerKeyParseError::Empty => {
                write!(f, "No answer key provided in 'answers' field.")
            }
            AnswerKeyParseError::InvalidToken(token) => write!(
                f,
                "Invalid answer key format. Must be a comma-separated list of numbers (e.g., '1,4,2,3'). Got '{}'.",
                token
            ),
            AnswerKeyParseError::OutOfRange(answer) => write!(
                f,
                "Invalid answer {} in answer key. Answers must be between 1 and {}.",
                answer, OPTIONS_PER_QUESTION
            ),
        }
    }
}

impl std::error::Error for AnswerKeyParseError {}

impl AnswerKey {
    pub fn new(answers: Vec<u8>) -> Result<Self, AnswerKeyParseError> {
        if let Some(&bad) = answers
            .iter()
            .find(|&&a| a == 0 || a as usize > OPTIONS_PER_QUESTION)
        {
            return Err(AnswerKeyParseError::OutOfRange(bad));
        }
        Ok(Self(answers))
    }

    pub fn answers(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for AnswerKey {
    type Err = AnswerKeyParseError;

    /// Parses a comma-separated list such as `"1,4,2,3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AnswerKeyParseError::Empty);
        }

        let answers = s
            .split(',')
            .map(str::trim)
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| AnswerKeyParseError::InvalidToken(token.to_string()))
            })
            .collect::<Result<Vec<u8>, AnswerKeyParseError>>()?;

        Self::new(answers)
    }
}

impl TryFrom<Vec<u8>> for AnswerKey {
    type Error = AnswerKeyParseError;

    fn try_from(answers: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(answers)
    }
}

impl From<AnswerKey> for Vec<u8> {
    fn from(key: AnswerKey) -> Self {
        key.0
    }
}
