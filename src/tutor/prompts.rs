// src/tutor/prompts.rs
// Prompt templates for every tutoring operation

use crate::tutor::types::{Depth, Difficulty, UserProgress};

pub const DEFAULT_SUBJECT: &str = "general";
pub const DEFAULT_LEVEL: &str = "beginner";
pub const DEFAULT_LEARNING_STYLE: &str = "balanced";

const EDUCATOR_PERSONA: &str = "You are an expert educator.";
const QUIZ_PERSONA: &str = "You are a quiz generator for educational purposes.";
const COACH_PERSONA: &str = "You are a learning coach and curriculum designer.";
const ANALYST_PERSONA: &str = "You are an educational analytics expert and learning coach.";
const PRACTICE_PERSONA: &str = "You are a problem-based learning expert.";

const TEACHING_APPROACH: &str = r#"Your teaching approach:
1. Break down complex concepts into digestible parts
2. Use analogies and real-world examples
3. Check for understanding before moving forward
4. Encourage questions and critical thinking
5. Provide positive reinforcement
6. Adapt explanations based on student responses
Be patient, encouraging, and thorough. Your goal is mastery, not just information transfer."#;

const EXPLANATION_STRUCTURE: &str = r#"Structure your explanation:
1. Simple Definition
2. Key Points (3-5 bullet points)
3. Real-world Example
4. Common Misconceptions
5. Related Concepts to explore next"#;

const QUIZ_SCHEMA: &str = r#"Format as JSON array with this structure:
[
  {
    "question": "Question text",
    "options": ["A) option1", "B) option2", "C) option3", "D) option4"],
    "correctAnswer": "B",
    "explanation": "Why this answer is correct",
    "points": 10
  }
]
Make questions educational and engaging. Include explanations for learning."#;

/// System instruction plus user content for one backend call.
///
/// Fully determined by the operation and its parameters: no clock, no
/// randomness, no conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub system: String,
    pub user: String,
}

impl PromptSpec {
    fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Builds backend-agnostic prompts for each operation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Tutoring persona around the learner's verbatim message
    pub fn teach(
        subject: Option<&str>,
        level: Option<&str>,
        learning_style: Option<&str>,
        message: &str,
    ) -> PromptSpec {
        let system = format!(
            "You are an expert AI tutor specializing in {}.\nTeaching Parameters:\n- Student Level: {}\n- Learning Style: {}\n{}",
            subject.unwrap_or(DEFAULT_SUBJECT),
            level.unwrap_or(DEFAULT_LEVEL),
            learning_style.unwrap_or(DEFAULT_LEARNING_STYLE),
            TEACHING_APPROACH
        );
        PromptSpec::new(system, message)
    }

    pub fn explain_concept(concept: &str, subject: &str, depth: Depth) -> PromptSpec {
        let user = format!(
            "Explain the concept of \"{}\" in {}. {}.\n{}",
            concept,
            subject,
            Self::depth_instruction(depth),
            EXPLANATION_STRUCTURE
        );
        PromptSpec::new(EDUCATOR_PERSONA, user)
    }

    pub fn generate_quiz(subject: &str, difficulty: Difficulty, question_count: usize) -> PromptSpec {
        let user = format!(
            "Generate exactly {} multiple-choice quiz questions about {} at {} difficulty level.\n{}",
            question_count, subject, difficulty, QUIZ_SCHEMA
        );
        PromptSpec::new(QUIZ_PERSONA, user)
    }

    pub fn create_study_plan(
        subject: &str,
        time_available: &str,
        current_level: &str,
        goals: &str,
    ) -> PromptSpec {
        let user = format!(
            "Create a personalized {} study plan for learning {}.\n\
             Current level: {}\n\
             Goals: {}\n\
             Provide a structured study plan with:\n\
             1. Week-by-week breakdown\n\
             2. Daily time allocation\n\
             3. Specific topics to cover\n\
             4. Recommended resources\n\
             5. Practice exercises\n\
             6. Milestones and checkpoints\n\
             Format as a clear, actionable plan.",
            time_available, subject, current_level, goals
        );
        PromptSpec::new(COACH_PERSONA, user)
    }

    pub fn analyze_progress(progress: &UserProgress) -> PromptSpec {
        let user = format!(
            "Analyze this learner's progress and provide personalized feedback:\n\
             Completed Topics: {}\n\
             Average Quiz Score: {}%\n\
             Time Spent: {} hours\n\
             Strengths: {}\n\
             Areas for Improvement: {}\n\
             Provide:\n\
             1. Overall Progress Assessment\n\
             2. Specific Strengths to leverage\n\
             3. Targeted recommendations for weak areas\n\
             4. Next topics to focus on\n\
             5. Motivational insights\n\
             6. Adjusted learning strategy",
            progress.completed_topics.join(", "),
            progress.quiz_scores.average,
            progress.time_spent,
            progress.strengths.join(", "),
            progress.weaknesses.join(", ")
        );
        PromptSpec::new(ANALYST_PERSONA, user)
    }

    pub fn generate_practice_problems(
        subject: &str,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> PromptSpec {
        let user = format!(
            "Generate {} practice problems for {} in {} at {} difficulty.\n\
             For each problem provide:\n\
             - Clear problem statement\n\
             - Step-by-step solution\n\
             - Common mistakes to avoid\n\
             - Similar problems for practice\n\
             Make problems progressively challenging and educational.",
            count, topic, subject, difficulty
        );
        PromptSpec::new(PRACTICE_PERSONA, user)
    }

    fn depth_instruction(depth: Depth) -> &'static str {
        match depth {
            Depth::Simple => "Explain this like I'm 10 years old, using simple analogies",
            Depth::Detailed => "Provide a comprehensive explanation with examples",
            Depth::Advanced => {
                "Give an in-depth technical explanation with real-world applications"
            }
        }
    }
}
