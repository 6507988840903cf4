//! Form Submission State
//!
//! Explicit per-form state machine, independent of any UI runtime:
//! `Idle -> Submitting -> (Success | Error) -> ...`.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

impl FormState {
    /// Enter `Submitting`. Returns false if a submission is already in flight,
    /// in which case the caller must not issue another request.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = FormState::Submitting;
        true
    }

    pub fn succeed(&mut self) {
        *self = FormState::Success;
    }

    pub fn fail(&mut self, err: impl Display) {
        *self = FormState::Error(err.to_string());
    }

    pub fn reset(&mut self) {
        *self = FormState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormState::Success)
    }

    /// Inline error message, if the last submission failed
    pub fn error(&self) -> Option<&str> {
        match self {
            FormState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Button label for the current state
    pub fn label<'a>(&self, idle: &'a str, busy: &'a str) -> &'a str {
        if self.is_submitting() {
            busy
        } else {
            idle
        }
    }
}
