//! Job lifecycle state machine

use crate::{Error, Result};
use std::fmt;

/// Lifecycle of a validation job
///
/// `NotStarted -> RulesLoaded -> StreamsOpen -> Processing -> Finished`, with
/// `ConfigMissing` and `InputMissing` as terminal failures reachable only
/// before the streams are opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobState {
    #[default]
    NotStarted,
    RulesLoaded,
    StreamsOpen,
    Processing,
    Finished,
    ConfigMissing,
    InputMissing,
}

impl JobState {
    /// Stable name used in logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            JobState::NotStarted => "NotStarted",
            JobState::RulesLoaded => "RulesLoaded",
            JobState::StreamsOpen => "StreamsOpen",
            JobState::Processing => "Processing",
            JobState::Finished => "Finished",
            JobState::ConfigMissing => "ConfigMissing",
            JobState::InputMissing => "InputMissing",
        }
    }

    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Finished | JobState::ConfigMissing | JobState::InputMissing
        )
    }

    /// Whether the transition `self -> next` is allowed
    pub fn can_transition_to(&self, next: JobState) -> bool {
        matches!(
            (self, next),
            (JobState::NotStarted, JobState::RulesLoaded)
                | (JobState::NotStarted, JobState::ConfigMissing)
                | (JobState::RulesLoaded, JobState::StreamsOpen)
                | (JobState::RulesLoaded, JobState::InputMissing)
                | (JobState::StreamsOpen, JobState::Processing)
                | (JobState::Processing, JobState::Finished)
        )
    }

    /// Move to `next`, rejecting transitions outside the lifecycle
    pub fn transition(&mut self, next: JobState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(Error::InvalidTransition {
                from: self.name(),
                to: next.name(),
            });
        }
        *self = next;
        Ok(())
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
