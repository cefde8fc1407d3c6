// src/tutor/parser.rs
// Extracts structured results from free-form model output

use crate::tutor::types::QuizQuestion;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Recommendations used when an analysis has no recognisable list
pub const DEFAULT_RECOMMENDATIONS: [&str; 3] =
    ["Focus on weak areas", "Practice daily", "Review fundamentals"];

/// Numbered ("1." / "2)") or bulleted ("-", "*", "•") list item
#[allow(clippy::expect_used)]
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s+(.+?)\s*$").expect("valid regex")
});

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("no JSON array found in response")]
    NoArray,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("quiz array is empty")]
    Empty,

    #[error("question {index}: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// Turns raw provider text into operation payloads
pub struct ResponseParser;

impl ResponseParser {
    /// Parse the quiz array embedded in `raw`.
    ///
    /// Takes the text between the first `[` and the last `]`, so prose around
    /// the array is ignored. Every question must have text, exactly four
    /// options, and a correct answer that is a single letter A-D (normalised
    /// to upper case).
    pub fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, ParseError> {
        let start = raw.find('[').ok_or(ParseError::NoArray)?;
        let end = raw.rfind(']').ok_or(ParseError::NoArray)?;
        if end < start {
            return Err(ParseError::NoArray);
        }

        let mut questions: Vec<QuizQuestion> = serde_json::from_str(&raw[start..=end])?;
        if questions.is_empty() {
            return Err(ParseError::Empty);
        }

        for (index, question) in questions.iter_mut().enumerate() {
            validate_question(question).map_err(|reason| ParseError::InvalidQuestion {
                index,
                reason: reason.to_string(),
            })?;
        }

        Ok(questions)
    }

    /// Pull the recommendation list out of a progress analysis.
    ///
    /// Looks for list items following a line that mentions "recommend" and
    /// stops at the next line that is neither blank nor a list item.
    pub fn extract_recommendations(analysis: &str) -> Vec<String> {
        let mut in_section = false;
        let mut found = Vec::new();

        for line in analysis.lines() {
            let item = LIST_ITEM_RE
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| clean_markdown(m.as_str()));

            if in_section {
                match item {
                    Some(text) if !text.is_empty() => found.push(text),
                    Some(_) => {}
                    None if line.trim().is_empty() => {}
                    None => break,
                }
            } else if line.to_lowercase().contains("recommend") {
                in_section = true;
                // Heading may itself be a list item ("3. Targeted recommendations: ...")
                if let Some(rest) = line.split_once(':').map(|(_, r)| clean_markdown(r)) {
                    if !rest.is_empty() {
                        found.push(rest);
                    }
                }
            }
        }

        if found.is_empty() {
            DEFAULT_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
        } else {
            found
        }
    }
}

fn validate_question(question: &mut QuizQuestion) -> Result<(), &'static str> {
    if question.question.trim().is_empty() {
        return Err("question text is empty");
    }
    if question.options.len() != 4 {
        return Err("expected exactly 4 options");
    }

    let answer = question.correct_answer.trim();
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if matches!(c.to_ascii_uppercase(), 'A'..='D') => {
            question.correct_answer = c.to_ascii_uppercase().to_string();
            Ok(())
        }
        _ => Err("correctAnswer must be a single letter A-D"),
    }
}

fn clean_markdown(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}
