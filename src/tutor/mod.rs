// src/tutor/mod.rs
// Tutoring operations, prompts, fallback and mock content

pub mod context;
pub mod mock;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod scoring;
pub mod service;
pub mod types;

pub use context::{ConversationContext, ConversationTurn, Role};
pub use orchestrator::{Dispatch, ExhaustionReport, FallbackObserver, FallbackOrchestrator, TracingObserver};
pub use parser::{ParseError, ResponseParser};
pub use prompts::{PromptBuilder, PromptSpec};
pub use service::{ServiceStatus, TutorService};
pub use types::{
    Depth, Difficulty, ExplanationResult, OperationResult, PracticeProblems, ProgressAnalysis,
    QuizQuestion, QuizScores, StudyPlan, TeachContext, TeachReply, UserProgress,
};
