// src/tutor/scoring.rs
// Quiz grading, motivation score, and points-to-level progression

use crate::tutor::types::QuizQuestion;
use serde::{Deserialize, Serialize};

/// Motivation score reported with mock progress analyses
pub const MOCK_MOTIVATIONAL_SCORE: u8 = 75;

/// Percentage needed to pass a quiz
pub const PASS_PERCENTAGE: u32 = 60;

/// Points per learner level
pub const POINTS_PER_LEVEL: u64 = 100;

/// Map an average quiz score (percent) to a motivation score
pub fn motivational_score(average: f64) -> u8 {
    if average >= 90.0 {
        95
    } else if average >= 75.0 {
        80
    } else if average >= 60.0 {
        65
    } else {
        50
    }
}

/// Outcome of grading one quiz attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    /// Rounded percentage of correct answers
    pub percentage: u32,
    pub passed: bool,
    /// Sum of `points` over correctly answered questions, saturating at `u32::MAX`
    pub points_earned: u32,
}

impl QuizScore {
    /// Grade answers against questions by position.
    ///
    /// Answers compare case-insensitively on the option letter, so "b" and
    /// "B) 2" both match a correct answer of "B". Unanswered questions count
    /// as incorrect.
    pub fn grade(questions: &[QuizQuestion], answers: &[&str]) -> Self {
        let mut correct = 0;
        let mut points_earned: u32 = 0;

        for (idx, question) in questions.iter().enumerate() {
            let Some(answer) = answers.get(idx) else {
                continue;
            };
            if answer_letter(answer) == answer_letter(&question.correct_answer) {
                correct += 1;
                points_earned = points_earned.saturating_add(question.points);
            }
        }

        let total = questions.len();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };

        Self {
            correct,
            incorrect: total - correct,
            total,
            percentage,
            passed: total > 0 && percentage >= PASS_PERCENTAGE,
            points_earned,
        }
    }
}

fn answer_letter(answer: &str) -> Option<char> {
    answer
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
}

/// Learner level for a running points total
pub fn level_for_points(points: u64) -> u64 {
    points / POINTS_PER_LEVEL
}

/// Points still needed to reach the next level
pub fn points_to_next_level(points: u64) -> u64 {
    (level_for_points(points) + 1) * POINTS_PER_LEVEL - points
}

/// Progress through the current level, 0..100
pub fn level_progress(points: u64) -> u8 {
    ((points % POINTS_PER_LEVEL) * 100 / POINTS_PER_LEVEL) as u8
}
