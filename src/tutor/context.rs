// src/tutor/context.rs
// Conversation history for the teach operation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
    #[serde(skip)]
    seq: u64,
}

/// Handle returned by [`ConversationContext::push`], used to take a turn back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnId(u64);

/// Bounded, insertion-ordered conversation history.
///
/// Turns are appended in call order with no enforced alternation. When the
/// buffer is full the oldest turn is evicted.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
    next_seq: u64,
    current_subject: Option<String>,
    user_level: Option<String>,
}

impl ConversationContext {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: VecDeque::with_capacity(capacity.min(64)),
            capacity,
            next_seq: 0,
            current_subject: None,
            user_level: None,
        }
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) -> TurnId {
        if self.turns.len() == self.capacity {
            self.turns.pop_front();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.turns.push_back(ConversationTurn {
            role,
            content: content.into(),
            at: Utc::now(),
            seq,
        });
        TurnId(seq)
    }

    /// Remove a previously pushed turn. Returns false if it was already evicted.
    pub fn retract(&mut self, id: TurnId) -> bool {
        match self.turns.iter().position(|t| t.seq == id.0) {
            Some(idx) => self.turns.remove(idx).is_some(),
            None => false,
        }
    }

    /// Snapshot of the history, oldest first
    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_subject(&self) -> Option<&str> {
        self.current_subject.as_deref()
    }

    pub fn user_level(&self) -> Option<&str> {
        self.user_level.as_deref()
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.current_subject = Some(subject.into());
    }

    pub fn set_level(&mut self, level: impl Into<String>) {
        self.user_level = Some(level.into());
    }

    /// Clear turns, subject and level
    pub fn reset(&mut self) {
        self.turns.clear();
        self.current_subject = None;
        self.user_level = None;
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order() {
        let mut ctx = ConversationContext::new(10);
        ctx.push(Role::User, "hi");
        ctx.push(Role::User, "again");
        ctx.push(Role::Assistant, "hello");

        let turns = ctx.turns();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].content, "hi");
        assert_eq!(turns[1].role, Role::User);
        assert_eq!(turns[2].role, Role::Assistant);
        assert!(turns[0].at <= turns[2].at);
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let mut ctx = ConversationContext::new(3);
        for n in 0..5 {
            ctx.push(Role::User, format!("m{n}"));
        }
        let contents: Vec<_> = ctx.turns().into_iter().map(|t| t.content).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4"]);
        assert_eq!(ctx.capacity(), 3);
    }

    #[test]
    fn test_retract() {
        let mut ctx = ConversationContext::new(3);
        ctx.push(Role::User, "keep");
        let id = ctx.push(Role::User, "drop");
        assert!(ctx.retract(id));
        assert!(!ctx.retract(id));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.turns()[0].content, "keep");
    }

    #[test]
    fn test_retract_after_eviction() {
        let mut ctx = ConversationContext::new(2);
        let id = ctx.push(Role::User, "first");
        ctx.push(Role::Assistant, "second");
        ctx.push(Role::User, "third");
        assert!(!ctx.retract(id));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut ctx = ConversationContext::new(5);
        ctx.push(Role::User, "q");
        ctx.set_subject("Math");
        ctx.set_level("advanced");
        assert_eq!(ctx.current_subject(), Some("Math"));

        ctx.reset();
        assert!(ctx.is_empty());
        assert!(ctx.current_subject().is_none());
        assert!(ctx.user_level().is_none());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut ctx = ConversationContext::new(0);
        ctx.push(Role::User, "a");
        ctx.push(Role::User, "b");
        assert_eq!(ctx.len(), 1);
    }

    #[test]
    fn test_turn_serializes_without_seq() {
        let mut ctx = ConversationContext::new(2);
        ctx.push(Role::Assistant, "x");
        let json = serde_json::to_value(&ctx.turns()[0]).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(json.get("seq").is_none());
    }
}
