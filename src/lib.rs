// src/lib.rs
// Tutor - AI tutoring with multi-provider fallback and offline mock mode

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod tutor;

pub use error::{Result, TutorError};
