// src/tutor/types.rs
// Request parameters and result shapes for the tutoring operations

use crate::llm::Provider;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How deep a concept explanation should go
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Depth {
    Simple,
    #[default]
    Detailed,
    Advanced,
}

/// Difficulty for quizzes and practice problems
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Optional learner context for `teach`; missing fields fall back to the
/// conversation's current subject/level and then to fixed defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachContext {
    pub subject: Option<String>,
    pub level: Option<String>,
    pub learning_style: Option<String>,
}

impl TeachContext {
    pub fn for_subject(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachReply {
    pub response: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationResult {
    pub concept: String,
    pub subject: String,
    pub depth: Depth,
    pub explanation: String,
}

/// One multiple-choice question. Field order matches the JSON schema the
/// quiz prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub subject: String,
    pub duration: String,
    pub level: String,
    pub plan: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuizScores {
    /// Average quiz score as a percentage
    pub average: f64,
}

/// Learner data fed to `analyze_progress`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub completed_topics: Vec<String>,
    pub quiz_scores: QuizScores,
    /// Hours spent studying
    pub time_spent: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub analysis: String,
    pub recommendations: Vec<String>,
    pub motivational_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeProblems {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub problems: String,
}

/// What every operation hands back: its payload plus where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult<T> {
    pub content: T,
    /// True when the payload is templated mock content
    pub used_mock_mode: bool,
    /// Provider that answered, if a live call succeeded
    pub provider: Option<Provider>,
}

impl<T> OperationResult<T> {
    pub fn live(content: T, provider: Provider) -> Self {
        Self {
            content,
            used_mock_mode: false,
            provider: Some(provider),
        }
    }

    pub fn mock(content: T) -> Self {
        Self {
            content,
            used_mock_mode: true,
            provider: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_depth_parse_and_default() {
        assert_eq!(Depth::from_str("ADVANCED").unwrap(), Depth::Advanced);
        assert_eq!(Depth::default(), Depth::Detailed);
        assert_eq!(Depth::Simple.to_string(), "simple");
        assert!(Depth::from_str("eli5").is_err());
    }

    #[test]
    fn test_difficulty_default() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
    }

    #[test]
    fn test_quiz_question_camel_case() {
        let q = QuizQuestion {
            question: "Q".to_string(),
            options: vec!["A) 1".into(), "B) 2".into(), "C) 3".into(), "D) 4".into()],
            correct_answer: "B".to_string(),
            explanation: "e".to_string(),
            points: 10,
        };
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(
            json,
            r#"{"question":"Q","options":["A) 1","B) 2","C) 3","D) 4"],"correctAnswer":"B","explanation":"e","points":10}"#
        );
    }

    #[test]
    fn test_user_progress_from_json() {
        let json = r#"{
            "completedTopics": ["Fractions"],
            "quizScores": {"average": 82.5},
            "timeSpent": 12,
            "strengths": ["Arithmetic"],
            "weaknesses": ["Geometry"]
        }"#;
        let progress: UserProgress = serde_json::from_str(json).unwrap();
        assert_eq!(progress.completed_topics, vec!["Fractions"]);
        assert!((progress.quiz_scores.average - 82.5).abs() < f64::EPSILON);
        assert_eq!(progress.weaknesses, vec!["Geometry"]);
    }

    #[test]
    fn test_operation_result_constructors() {
        let live = OperationResult::live("text", Provider::Cohere);
        assert!(!live.used_mock_mode);
        assert_eq!(live.provider, Some(Provider::Cohere));

        let mock = OperationResult::mock("text");
        assert!(mock.used_mock_mode);
        assert!(mock.provider.is_none());
    }

    #[test]
    fn test_operation_result_json_shape() {
        let result = OperationResult::mock(1);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["usedMockMode"], true);
        assert!(json["provider"].is_null());
    }
}
