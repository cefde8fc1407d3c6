// src/tutor/service.rs
// The six tutoring operations over one fallback orchestrator and conversation

use crate::config::Settings;
use crate::error::{Result, TutorError};
use crate::llm::{Provider, ProviderRegistry};
use crate::tutor::context::{ConversationContext, ConversationTurn, Role};
use crate::tutor::mock::MockGenerator;
use crate::tutor::orchestrator::{Dispatch, FallbackObserver, FallbackOrchestrator};
use crate::tutor::parser::ResponseParser;
use crate::tutor::prompts::{DEFAULT_SUBJECT, PromptBuilder, PromptSpec};
use crate::tutor::scoring::motivational_score;
use crate::tutor::types::{
    Depth, Difficulty, ExplanationResult, OperationResult, PracticeProblems, ProgressAnalysis,
    QuizQuestion, StudyPlan, TeachContext, TeachReply, UserProgress,
};
use serde::Serialize;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Allowed `question_count` for quizzes
pub const QUIZ_QUESTION_RANGE: RangeInclusive<usize> = 1..=20;

/// Allowed `count` for practice problems
pub const PRACTICE_COUNT_RANGE: RangeInclusive<usize> = 1..=10;

/// Snapshot of the service's fallback state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub available: Vec<Provider>,
    pub sticky: Option<Provider>,
    pub mock_latched: bool,
    pub history_len: usize,
}

/// Session-scoped tutoring service.
///
/// Construct once at startup and share by reference. Every operation either
/// returns live provider output or mock content; only invalid input,
/// cancellation and internal defects come back as errors.
pub struct TutorService {
    orchestrator: FallbackOrchestrator,
    context: Mutex<ConversationContext>,
}

impl TutorService {
    pub fn new(registry: ProviderRegistry, settings: &Settings) -> Self {
        Self {
            orchestrator: FallbackOrchestrator::new(
                registry,
                settings.attempt_timeout,
                settings.force_mock,
            ),
            context: Mutex::new(ConversationContext::new(settings.history_limit)),
        }
    }

    /// Build provider clients from configured credentials
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ProviderRegistry::from_settings(settings), settings)
    }

    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.orchestrator = self.orchestrator.with_observer(observer);
        self
    }

    pub fn orchestrator(&self) -> &FallbackOrchestrator {
        &self.orchestrator
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Conversational tutoring turn.
    ///
    /// Subject and level given in `ctx` become the session's current values
    /// once the turn completes. The user turn is recorded before any provider
    /// is tried; a cancelled turn is taken back and leaves the session as it was.
    pub async fn teach(
        &self,
        message: &str,
        ctx: &TeachContext,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<TeachReply>> {
        if message.trim().is_empty() {
            return Err(TutorError::InvalidInput("message must not be empty".into()));
        }

        let (subject, level, turn) = {
            let mut conversation = self.conversation_lock();
            let subject = ctx
                .subject
                .clone()
                .or_else(|| conversation.current_subject().map(str::to_string));
            let level = ctx
                .level
                .clone()
                .or_else(|| conversation.user_level().map(str::to_string));
            let turn = conversation.push(Role::User, message);
            (subject, level, turn)
        };

        let prompt = PromptBuilder::teach(
            subject.as_deref(),
            level.as_deref(),
            ctx.learning_style.as_deref(),
            message,
        );

        let dispatched = self.orchestrator.dispatch(&prompt, cancel).await;
        let mut conversation = self.conversation_lock();
        if dispatched.is_ok() {
            if let Some(subject) = &subject {
                conversation.set_subject(subject.clone());
            }
            if let Some(level) = level {
                conversation.set_level(level);
            }
        }
        let subject = subject.unwrap_or_else(|| DEFAULT_SUBJECT.to_string());
        let result = match dispatched {
            Ok(Dispatch::Live { provider, text }) => OperationResult::live(text, provider),
            Ok(Dispatch::Mock { newly_latched }) => {
                debug!(operation = "teach", newly_latched, "Serving mock content");
                OperationResult::mock(MockGenerator::teach(&subject))
            }
            Err(e) => {
                conversation.retract(turn);
                return Err(e);
            }
        };
        conversation.push(Role::Assistant, result.content.clone());

        Ok(OperationResult {
            content: TeachReply {
                response: result.content,
                subject,
            },
            used_mock_mode: result.used_mock_mode,
            provider: result.provider,
        })
    }

    pub async fn explain_concept(
        &self,
        concept: &str,
        subject: &str,
        depth: Depth,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<ExplanationResult>> {
        if concept.trim().is_empty() {
            return Err(TutorError::InvalidInput("concept must not be empty".into()));
        }

        let prompt = PromptBuilder::explain_concept(concept, subject, depth);
        self.generate(
            "explain_concept",
            &prompt,
            cancel,
            |explanation| ExplanationResult {
                concept: concept.to_string(),
                subject: subject.to_string(),
                depth,
                explanation,
            },
            || MockGenerator::explanation(concept, subject, depth),
        )
        .await
    }

    /// Multiple-choice quiz.
    ///
    /// Unparseable provider output is replaced by the mock quiz without trying
    /// another provider; the result then reports both `used_mock_mode` and the
    /// provider that answered. Mock quizzes may hold fewer questions than
    /// requested.
    pub async fn generate_quiz(
        &self,
        subject: &str,
        difficulty: Difficulty,
        question_count: usize,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<Vec<QuizQuestion>>> {
        check_range("question_count", question_count, &QUIZ_QUESTION_RANGE)?;

        let prompt = PromptBuilder::generate_quiz(subject, difficulty, question_count);
        let result = match self.orchestrator.dispatch(&prompt, cancel).await? {
            Dispatch::Live { provider, text } => match ResponseParser::parse_quiz(&text) {
                Ok(questions) => {
                    if questions.len() != question_count {
                        debug!(
                            requested = question_count,
                            returned = questions.len(),
                            "Provider returned a different question count"
                        );
                    }
                    return Ok(OperationResult::live(questions, provider));
                }
                Err(e) => {
                    warn!(provider = %provider, error = %e, "Quiz parse failed, using mock quiz");
                    OperationResult {
                        content: MockGenerator::quiz(subject, question_count),
                        used_mock_mode: true,
                        provider: Some(provider),
                    }
                }
            },
            Dispatch::Mock { .. } => OperationResult::mock(MockGenerator::quiz(subject, question_count)),
        };

        if result.content.len() < question_count {
            warn!(
                requested = question_count,
                returned = result.content.len(),
                "Mock quiz is shorter than requested"
            );
        }
        Ok(result)
    }

    pub async fn create_study_plan(
        &self,
        subject: &str,
        time_available: &str,
        current_level: &str,
        goals: &str,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<StudyPlan>> {
        let prompt = PromptBuilder::create_study_plan(subject, time_available, current_level, goals);
        self.generate(
            "create_study_plan",
            &prompt,
            cancel,
            |plan| StudyPlan {
                subject: subject.to_string(),
                duration: time_available.to_string(),
                level: current_level.to_string(),
                plan,
            },
            || MockGenerator::study_plan(subject, time_available, current_level, goals),
        )
        .await
    }

    pub async fn analyze_progress(
        &self,
        progress: &UserProgress,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<ProgressAnalysis>> {
        let prompt = PromptBuilder::analyze_progress(progress);
        self.generate(
            "analyze_progress",
            &prompt,
            cancel,
            |analysis| ProgressAnalysis {
                recommendations: ResponseParser::extract_recommendations(&analysis),
                motivational_score: motivational_score(progress.quiz_scores.average),
                analysis,
            },
            || MockGenerator::progress_analysis(progress),
        )
        .await
    }

    pub async fn generate_practice_problems(
        &self,
        subject: &str,
        topic: &str,
        difficulty: Difficulty,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<OperationResult<PracticeProblems>> {
        check_range("count", count, &PRACTICE_COUNT_RANGE)?;

        let prompt = PromptBuilder::generate_practice_problems(subject, topic, difficulty, count);
        self.generate(
            "generate_practice_problems",
            &prompt,
            cancel,
            |problems| PracticeProblems {
                subject: subject.to_string(),
                topic: topic.to_string(),
                difficulty,
                problems,
            },
            || MockGenerator::practice_problems(subject, topic, difficulty, count),
        )
        .await
    }

    // ========================================================================
    // Session management
    // ========================================================================

    /// Clear the conversation. Sticky provider and mock latch are kept.
    pub fn reset_conversation(&self) {
        self.conversation_lock().reset();
        info!("Conversation reset");
    }

    pub fn conversation(&self) -> Vec<ConversationTurn> {
        self.conversation_lock().turns()
    }

    pub fn unlatch(&self) {
        self.orchestrator.unlatch();
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            available: self.orchestrator.registry().available_providers(),
            sticky: self.orchestrator.sticky(),
            mock_latched: self.orchestrator.is_latched(),
            history_len: self.conversation_lock().len(),
        }
    }

    async fn generate<T>(
        &self,
        operation: &'static str,
        prompt: &PromptSpec,
        cancel: &CancellationToken,
        live: impl FnOnce(String) -> T,
        mock: impl FnOnce() -> T,
    ) -> Result<OperationResult<T>> {
        match self.orchestrator.dispatch(prompt, cancel).await? {
            Dispatch::Live { provider, text } => Ok(OperationResult::live(live(text), provider)),
            Dispatch::Mock { newly_latched } => {
                debug!(operation, newly_latched, "Serving mock content");
                Ok(OperationResult::mock(mock()))
            }
        }
    }

    fn conversation_lock(&self) -> MutexGuard<'_, ConversationContext> {
        self.context.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_range(name: &str, value: usize, range: &RangeInclusive<usize>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(TutorError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}
