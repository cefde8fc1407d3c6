// src/tutor/mock.rs
// Templated fallback content used when no live provider can answer

use crate::tutor::scoring::MOCK_MOTIVATIONAL_SCORE;
use crate::tutor::types::{
    Depth, Difficulty, ExplanationResult, PracticeProblems, ProgressAnalysis, QuizQuestion,
    StudyPlan, UserProgress,
};
use rand::seq::IndexedRandom;

/// Number of canned quiz questions. Mock quizzes never exceed this, so they
/// are often shorter than requested.
pub const MOCK_QUIZ_BANK_SIZE: usize = 3;

const MATHEMATICS_PHRASES: &[&str] = &[
    "Great question! In mathematics, let's break this down step by step...",
    "That's an interesting problem! Here's how we can approach it...",
    "Mathematics is all about patterns. Let me help you understand this concept...",
];

const PROGRAMMING_PHRASES: &[&str] = &[
    "Excellent programming question! Let me explain this concept with an example...",
    "In programming, we use this pattern to solve similar problems. Here's how...",
    "That's a fundamental concept in software development. Let me clarify...",
];

const SCIENCE_PHRASES: &[&str] = &[
    "Fascinating scientific question! The key principle here is...",
    "Science helps us understand the world around us. For this topic...",
    "That's a great observation! In science, we explain this phenomenon by...",
];

const GENERAL_PHRASES: &[&str] = &[
    "That's a great question! Let me help you understand this better...",
    "I'm here to help you learn! Based on what you're asking...",
    "Interesting topic! Here's what you should know...",
];

const PRACTICE_TIERS: [(&str, &str, &str); 3] = [
    ("Basic Application", "Apply the concept of {topic} to solve...", "Don't forget to..."),
    ("Intermediate Challenge", "Given this scenario, how would you use {topic}...", "Many overlook..."),
    ("Advanced Application", "Combine {topic} with other concepts to...", "Remember to validate..."),
];

/// Produces operation-specific placeholder content
pub struct MockGenerator;

impl MockGenerator {
    /// Phrase bank for a subject; unknown subjects use the general bank
    pub fn teaching_phrases(subject: &str) -> &'static [&'static str] {
        match subject.trim().to_lowercase().as_str() {
            "mathematics" => MATHEMATICS_PHRASES,
            "programming" => PROGRAMMING_PHRASES,
            "science" => SCIENCE_PHRASES,
            _ => GENERAL_PHRASES,
        }
    }

    /// One phrase chosen uniformly at random from the subject's bank
    pub fn teach(subject: &str) -> String {
        let phrases = Self::teaching_phrases(subject);
        phrases
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(GENERAL_PHRASES[0])
            .to_string()
    }

    /// Canned quiz sliced to `min(count, MOCK_QUIZ_BANK_SIZE)`
    pub fn quiz(subject: &str, count: usize) -> Vec<QuizQuestion> {
        let bank = [
            QuizQuestion {
                question: format!("What is a fundamental concept in {}?", subject),
                options: options([
                    "Basic principle",
                    "Advanced theory",
                    "Practical application",
                    "Historical context",
                ]),
                correct_answer: "A".to_string(),
                explanation: "Understanding fundamental concepts is the foundation of learning."
                    .to_string(),
                points: 10,
            },
            QuizQuestion {
                question: format!("Which approach works best for learning {}?", subject),
                options: options([
                    "Memorization only",
                    "Practice and application",
                    "Reading theory only",
                    "Guessing",
                ]),
                correct_answer: "B".to_string(),
                explanation: "Practice and application help solidify understanding.".to_string(),
                points: 10,
            },
            QuizQuestion {
                question: format!("What's an important skill in {}?", subject),
                options: options([
                    "Problem solving",
                    "Pattern recognition",
                    "Critical thinking",
                    "All of the above",
                ]),
                correct_answer: "D".to_string(),
                explanation: "All these skills work together for mastery.".to_string(),
                points: 15,
            },
        ];

        bank.into_iter().take(count.min(MOCK_QUIZ_BANK_SIZE)).collect()
    }

    pub fn explanation(concept: &str, subject: &str, depth: Depth) -> ExplanationResult {
        let explanation = format!(
            "**{concept}** in {subject}\n\
             **Simple Definition**: {concept} is a core principle that helps you understand...\n\
             **Key Points**:\n\
             • It forms the foundation for advanced topics\n\
             • Used in practical applications daily\n\
             • Essential for problem-solving\n\
             • Connects to other important concepts\n\
             **Real-world Example**: Think of when you...\n\
             **Common Misconceptions**: Many learners think... but actually...\n\
             **Related Concepts**: Next, explore: Advanced {concept}, Applied {concept}, {concept} in practice"
        );
        ExplanationResult {
            concept: concept.to_string(),
            subject: subject.to_string(),
            depth,
            explanation,
        }
    }

    pub fn study_plan(subject: &str, duration: &str, level: &str, goals: &str) -> StudyPlan {
        let goals_line = if goals.trim().is_empty() {
            String::new()
        } else {
            format!("**Goals**: {}\n", goals.trim())
        };
        let plan = format!(
            "**{duration} Study Plan for {subject}** ({level} level)\n\
             {goals_line}\
             **Week 1-2: Foundations**\n\
             - Daily: 1 hour\n\
             - Topics: Core concepts, basic terminology\n\
             - Practice: 30 mins/day\n\
             - Checkpoint: Complete basic quiz\n\
             **Week 3-4: Building Skills**\n\
             - Daily: 1.5 hours\n\
             - Topics: Intermediate concepts, applications\n\
             - Practice: Hands-on exercises\n\
             - Checkpoint: Mini-project\n\
             **Week 5-6: Advanced Application**\n\
             - Daily: 2 hours\n\
             - Topics: Complex problems, real scenarios\n\
             - Practice: Challenge problems\n\
             - Checkpoint: Final assessment\n\
             **Resources**:\n\
             • Interactive tutorials\n\
             • Practice problems database\n\
             • Community forums\n\
             • Video explanations\n\
             **Success Tips**:\n\
             ✓ Practice daily for consistency\n\
             ✓ Don't skip fundamentals\n\
             ✓ Ask questions when stuck\n\
             ✓ Track your progress"
        );
        StudyPlan {
            subject: subject.to_string(),
            duration: duration.to_string(),
            level: level.to_string(),
            plan,
        }
    }

    pub fn progress_analysis(progress: &UserProgress) -> ProgressAnalysis {
        let strengths = progress
            .strengths
            .iter()
            .map(|s| format!("✓ {}", s))
            .collect::<Vec<_>>()
            .join("\n");
        let growth = progress
            .weaknesses
            .iter()
            .map(|w| format!("→ {} (Focus here next)", w))
            .collect::<Vec<_>>()
            .join("\n");
        let next_focus = progress
            .weaknesses
            .first()
            .map(String::as_str)
            .unwrap_or("your next topic");

        let analysis = format!(
            "**Progress Analysis**\n\
             **Overall Performance**: You're making solid progress!\n\
             **Strengths**:\n{strengths}\n\
             **Areas for Growth**:\n{growth}\n\
             **Recommendations**:\n\
             1. Continue practicing your strong areas\n\
             2. Dedicate 30% more time to weak areas\n\
             3. Try different learning approaches\n\
             4. Join study groups for support\n\
             **Next Steps**: Focus on {next_focus}, then move to advanced topics.\n\
             Keep up the great work!"
        );

        ProgressAnalysis {
            analysis,
            recommendations: progress.weaknesses.clone(),
            motivational_score: MOCK_MOTIVATIONAL_SCORE,
        }
    }

    pub fn practice_problems(
        subject: &str,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
    ) -> PracticeProblems {
        let mut problems = format!("**Practice Problems for {}**\n", topic);
        for n in 0..count {
            let (title, question, mistake) = PRACTICE_TIERS[n % PRACTICE_TIERS.len()];
            problems.push_str(&format!(
                "**Problem {}**: {}\n- Question: {}\n- Solution: Step 1... Step 2... Step 3...\n- Common Mistake: {}\n",
                n + 1,
                title,
                question.replace("{topic}", topic),
                mistake
            ));
        }
        problems.push_str("**Practice Tip**: Work through each problem slowly, understand each step!");

        PracticeProblems {
            subject: subject.to_string(),
            topic: topic.to_string(),
            difficulty,
            problems,
        }
    }
}

fn options(labels: [&str; 4]) -> Vec<String> {
    ["A", "B", "C", "D"]
        .iter()
        .zip(labels)
        .map(|(letter, label)| format!("{}) {}", letter, label))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tutor::types::QuizScores;

    // ========================================================================
    // teach
    // ========================================================================

    #[test]
    fn test_teach_picks_from_subject_bank() {
        for _ in 0..20 {
            let reply = MockGenerator::teach("Programming");
            assert!(PROGRAMMING_PHRASES.contains(&reply.as_str()));
        }
    }

    #[test]
    fn test_unknown_subject_uses_general_bank() {
        assert_eq!(MockGenerator::teaching_phrases("Underwater basket weaving"), GENERAL_PHRASES);
        assert_eq!(MockGenerator::teaching_phrases(""), GENERAL_PHRASES);
        assert_eq!(MockGenerator::teaching_phrases(" science "), SCIENCE_PHRASES);
    }

    // ========================================================================
    // quiz
    // ========================================================================

    #[test]
    fn test_quiz_is_capped_at_bank_size() {
        let quiz = MockGenerator::quiz("Algebra", 5);
        assert_eq!(quiz.len(), MOCK_QUIZ_BANK_SIZE);
        assert_eq!(quiz[0].question, "What is a fundamental concept in Algebra?");
        assert_eq!(quiz[2].correct_answer, "D");
        assert_eq!(quiz[2].points, 15);
    }

    #[test]
    fn test_quiz_respects_smaller_counts() {
        assert_eq!(MockGenerator::quiz("Algebra", 2).len(), 2);
        assert!(MockGenerator::quiz("Algebra", 0).is_empty());
    }

    #[test]
    fn test_quiz_options_are_labeled() {
        for q in MockGenerator::quiz("History", 3) {
            assert_eq!(q.options.len(), 4);
            assert!(q.options[0].starts_with("A) "));
            assert!(q.options[3].starts_with("D) "));
        }
    }

    // ========================================================================
    // other operations
    // ========================================================================

    #[test]
    fn test_explanation_interpolates() {
        let result = MockGenerator::explanation("Photosynthesis", "Biology", Depth::Simple);
        assert_eq!(result.concept, "Photosynthesis");
        assert_eq!(result.depth, Depth::Simple);
        assert!(result.explanation.starts_with("**Photosynthesis** in Biology\n"));
        assert!(result.explanation.contains("Applied Photosynthesis"));
    }

    #[test]
    fn test_study_plan_includes_goals() {
        let plan = MockGenerator::study_plan("Rust", "6-week", "intermediate", "ship a CLI");
        assert!(plan.plan.starts_with("**6-week Study Plan for Rust** (intermediate level)\n"));
        assert!(plan.plan.contains("**Goals**: ship a CLI\n"));

        let no_goals = MockGenerator::study_plan("Rust", "6-week", "intermediate", "  ");
        assert!(!no_goals.plan.contains("**Goals**"));
    }

    #[test]
    fn test_study_plan_lists_resources_before_tips() {
        let plan = MockGenerator::study_plan("Chemistry", "4-week", "beginner", "").plan;
        let resources = plan.find("**Resources**:\n").unwrap();
        let tips = plan.find("**Success Tips**:").unwrap();
        assert!(plan.find("- Checkpoint: Final assessment\n").unwrap() < resources);
        assert!(resources < tips);
        for item in [
            "• Interactive tutorials\n",
            "• Practice problems database\n",
            "• Community forums\n",
            "• Video explanations\n",
        ] {
            assert!(plan[resources..tips].contains(item), "missing {item:?}");
        }
    }

    #[test]
    fn test_progress_analysis() {
        let progress = UserProgress {
            completed_topics: vec![],
            quiz_scores: QuizScores { average: 40.0 },
            time_spent: 2.0,
            strengths: vec!["Vocabulary".into()],
            weaknesses: vec!["Grammar".into(), "Listening".into()],
        };
        let result = MockGenerator::progress_analysis(&progress);
        assert!(result.analysis.contains("✓ Vocabulary"));
        assert!(result.analysis.contains("→ Listening (Focus here next)"));
        assert!(result.analysis.contains("Focus on Grammar, then"));
        assert_eq!(result.recommendations, vec!["Grammar", "Listening"]);
        assert_eq!(result.motivational_score, MOCK_MOTIVATIONAL_SCORE);
    }

    #[test]
    fn test_progress_analysis_without_weaknesses() {
        let result = MockGenerator::progress_analysis(&UserProgress::default());
        assert!(result.analysis.contains("Focus on your next topic"));
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_practice_problems_follow_count() {
        let result = MockGenerator::practice_problems("Math", "Fractions", Difficulty::Hard, 4);
        assert_eq!(result.difficulty, Difficulty::Hard);
        assert!(result.problems.contains("**Problem 4**: Basic Application"));
        assert!(!result.problems.contains("**Problem 5**"));
        assert!(result.problems.contains("Apply the concept of Fractions"));
    }
}
