//! Tests for the job lifecycle

use crate::Error;
use crate::app::services::pipeline::JobState;

#[test]
fn test_happy_path_transitions() {
    let mut state = JobState::default();
    assert_eq!(state, JobState::NotStarted);

    for next in [
        JobState::RulesLoaded,
        JobState::StreamsOpen,
        JobState::Processing,
        JobState::Finished,
    ] {
        state.transition(next).unwrap();
        assert_eq!(state, next);
    }
    assert!(state.is_terminal());
}

#[test]
fn test_early_failures_only_before_streams_open() {
    assert!(JobState::NotStarted.can_transition_to(JobState::ConfigMissing));
    assert!(JobState::RulesLoaded.can_transition_to(JobState::InputMissing));

    assert!(!JobState::StreamsOpen.can_transition_to(JobState::InputMissing));
    assert!(!JobState::Processing.can_transition_to(JobState::ConfigMissing));
    assert!(!JobState::RulesLoaded.can_transition_to(JobState::ConfigMissing));
}

#[test]
fn test_invalid_transition_is_rejected() {
    let mut state = JobState::NotStarted;
    let err = state.transition(JobState::Processing).unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidTransition {
            from: "NotStarted",
            to: "Processing"
        }
    ));
    assert_eq!(state, JobState::NotStarted);
}

#[test]
fn test_terminal_states() {
    assert!(JobState::ConfigMissing.is_terminal());
    assert!(JobState::InputMissing.is_terminal());
    assert!(!JobState::Processing.is_terminal());
    assert_eq!(JobState::StreamsOpen.to_string(), "StreamsOpen");
}
