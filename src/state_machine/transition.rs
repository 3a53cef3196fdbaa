//! Pure state transition function
//!
//! Given the same state and event this always produces the same new state
//! and effects, with no I/O.

use super::{Effect, TurnEvent, TurnState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("session is busy, cannot accept a message (cancel the current interaction first)")]
    SessionBusy,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function for one interaction lifecycle.
pub fn transition(
    state: &TurnState,
    event: TurnEvent,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User message handling
        // ============================================================

        // Accepting states + empty/whitespace-only input -> no action.
        // The input box enforces non-empty already; this is the
        // defensive guard.
        (s, TurnEvent::UserMessage { text }) if s.accepts_input() && text.trim().is_empty() => {
            Ok(TransitionResult::new(s.clone()))
        }

        // Idle/Failed + UserMessage -> UserTurnRecorded. The user turn is
        // appended before any network interaction.
        (s, TurnEvent::UserMessage { text }) if s.accepts_input() => {
            Ok(TransitionResult::new(TurnState::UserTurnRecorded)
                .with_effect(Effect::AppendUserTurn { text: text.clone() })
                .with_effect(Effect::RequestCompletion { user_text: text }))
        }

        // Busy states + UserMessage -> reject. No queueing.
        (_, TurnEvent::UserMessage { .. }) => Err(TransitionError::SessionBusy),

        // ============================================================
        // Completion lifecycle
        // ============================================================

        (TurnState::UserTurnRecorded, TurnEvent::CompletionDispatched) => {
            Ok(TransitionResult::new(TurnState::AwaitingCompletion))
        }

        (TurnState::AwaitingCompletion, TurnEvent::CompletionSucceeded { text }) => {
            Ok(
                TransitionResult::new(TurnState::Revealing {
                    full_text: text.clone(),
                })
                .with_effect(Effect::BeginReveal { full_text: text }),
            )
        }

        // Failure: no assistant turn is appended; the transcript keeps the
        // unanswered user turn and the notice is never stored.
        (TurnState::AwaitingCompletion, TurnEvent::CompletionFailed { message }) => {
            Ok(TransitionResult::new(TurnState::Failed {
                message: message.clone(),
            })
            .with_effect(Effect::NotifyError { message }))
        }

        // ============================================================
        // Reveal completion
        // ============================================================

        // The committed content is always the complete text, never a
        // partial reveal state.
        (TurnState::Revealing { full_text }, TurnEvent::RevealFinished) => {
            Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::AppendAssistantTurn {
                    text: full_text.clone(),
                })
                .with_effect(Effect::NotifyDone))
        }

        // ============================================================
        // Cancellation
        // ============================================================

        // Cancel while awaiting: discard the response when it resolves.
        (TurnState::AwaitingCompletion, TurnEvent::UserCancel) => {
            Ok(TransitionResult::new(TurnState::Cancelling))
        }

        // The discarded outcome closes the cancelled interaction.
        (TurnState::Cancelling, TurnEvent::CompletionSucceeded { .. })
        | (TurnState::Cancelling, TurnEvent::CompletionFailed { .. }) => {
            Ok(TransitionResult::new(TurnState::Idle).with_effect(Effect::NotifyCancelled))
        }

        // Cancel mid-reveal: the response already exists, so skip the
        // remaining reveal and commit the full text immediately.
        (TurnState::Revealing { full_text }, TurnEvent::UserCancel) => {
            Ok(TransitionResult::new(TurnState::Idle)
                .with_effect(Effect::AppendAssistantTurn {
                    text: full_text.clone(),
                })
                .with_effect(Effect::NotifyDone))
        }

        // Cancel with nothing in flight, or a repeated cancel, is a no-op.
        (TurnState::Cancelling, TurnEvent::UserCancel) => {
            Ok(TransitionResult::new(TurnState::Cancelling))
        }
        (s, TurnEvent::UserCancel) if s.accepts_input() => {
            Ok(TransitionResult::new(s.clone()))
        }

        // ============================================================
        // Invalid transitions
        // ============================================================

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "no transition from {state:?} with event {event:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> TurnEvent {
        TurnEvent::UserMessage {
            text: text.to_string(),
        }
    }

    #[test]
    fn idle_user_message_records_turn_before_completion() {
        let result = transition(&TurnState::Idle, user("What is entropy?")).unwrap();

        assert_eq!(result.new_state, TurnState::UserTurnRecorded);
        assert_eq!(
            result.effects,
            vec![
                Effect::AppendUserTurn {
                    text: "What is entropy?".to_string()
                },
                Effect::RequestCompletion {
                    user_text: "What is entropy?".to_string()
                },
            ]
        );
    }

    #[test]
    fn empty_input_takes_no_action() {
        for input in ["", "   ", "\n\t "] {
            let result = transition(&TurnState::Idle, user(input)).unwrap();
            assert_eq!(result.new_state, TurnState::Idle);
            assert!(result.effects.is_empty());
        }
    }

    #[test]
    fn busy_session_rejects_user_message() {
        let result = transition(&TurnState::AwaitingCompletion, user("another question"));
        assert!(matches!(result, Err(TransitionError::SessionBusy)));
    }

    #[test]
    fn failed_state_accepts_new_input() {
        let failed = TurnState::Failed {
            message: "network failure".to_string(),
        };
        let result = transition(&failed, user("try again")).unwrap();
        assert_eq!(result.new_state, TurnState::UserTurnRecorded);
    }

    #[test]
    fn success_begins_reveal_with_full_text() {
        let result = transition(
            &TurnState::AwaitingCompletion,
            TurnEvent::CompletionSucceeded {
                text: "Entropy measures disorder.".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            result.new_state,
            TurnState::Revealing {
                full_text: "Entropy measures disorder.".to_string()
            }
        );
        assert_eq!(
            result.effects,
            vec![Effect::BeginReveal {
                full_text: "Entropy measures disorder.".to_string()
            }]
        );
    }

    #[test]
    fn failure_notifies_without_appending_assistant_turn() {
        let result = transition(
            &TurnState::AwaitingCompletion,
            TurnEvent::CompletionFailed {
                message: "connection failed".to_string(),
            },
        )
        .unwrap();

        assert!(matches!(result.new_state, TurnState::Failed { .. }));
        assert_eq!(
            result.effects,
            vec![Effect::NotifyError {
                message: "connection failed".to_string()
            }]
        );
        assert!(!result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::AppendAssistantTurn { .. })));
    }

    #[test]
    fn reveal_finished_commits_complete_text() {
        let revealing = TurnState::Revealing {
            full_text: "full answer".to_string(),
        };
        let result = transition(&revealing, TurnEvent::RevealFinished).unwrap();

        assert_eq!(result.new_state, TurnState::Idle);
        assert_eq!(
            result.effects,
            vec![
                Effect::AppendAssistantTurn {
                    text: "full answer".to_string()
                },
                Effect::NotifyDone,
            ]
        );
    }

    #[test]
    fn cancel_while_awaiting_discards_the_response() {
        let result = transition(&TurnState::AwaitingCompletion, TurnEvent::UserCancel).unwrap();
        assert_eq!(result.new_state, TurnState::Cancelling);

        let result = transition(
            &TurnState::Cancelling,
            TurnEvent::CompletionSucceeded {
                text: "discarded".to_string(),
            },
        )
        .unwrap();
        assert_eq!(result.new_state, TurnState::Idle);
        assert_eq!(result.effects, vec![Effect::NotifyCancelled]);
    }

    #[test]
    fn cancel_mid_reveal_commits_immediately() {
        let revealing = TurnState::Revealing {
            full_text: "already complete".to_string(),
        };
        let result = transition(&revealing, TurnEvent::UserCancel).unwrap();

        assert_eq!(result.new_state, TurnState::Idle);
        assert!(result.effects.contains(&Effect::AppendAssistantTurn {
            text: "already complete".to_string()
        }));
    }

    #[test]
    fn cancel_when_idle_is_a_no_op() {
        let result = transition(&TurnState::Idle, TurnEvent::UserCancel).unwrap();
        assert_eq!(result.new_state, TurnState::Idle);
        assert!(result.effects.is_empty());
    }
}
