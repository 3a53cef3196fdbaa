//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = TurnState> {
    prop_oneof![
        Just(TurnState::Idle),
        Just(TurnState::UserTurnRecorded),
        Just(TurnState::AwaitingCompletion),
        "[a-zA-Z0-9 .]{0,40}".prop_map(|full_text| TurnState::Revealing { full_text }),
        Just(TurnState::Cancelling),
        "[a-zA-Z0-9 .]{0,40}".prop_map(|message| TurnState::Failed { message }),
    ]
}

fn arb_event() -> impl Strategy<Value = TurnEvent> {
    prop_oneof![
        "[a-zA-Z0-9 ?]{0,40}".prop_map(|text| TurnEvent::UserMessage { text }),
        Just(TurnEvent::UserCancel),
        Just(TurnEvent::CompletionDispatched),
        "[a-zA-Z0-9 .]{0,40}".prop_map(|text| TurnEvent::CompletionSucceeded { text }),
        "[a-zA-Z0-9 ]{0,40}".prop_map(|message| TurnEvent::CompletionFailed { message }),
        Just(TurnEvent::RevealFinished),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The transition function never panics, for any state/event pair.
    #[test]
    fn transition_is_total(state in arb_state(), event in arb_event()) {
        let _ = transition(&state, event);
    }

    /// An accepted user message always appends the user turn before
    /// requesting the completion.
    #[test]
    fn user_turn_is_recorded_before_completion_request(
        text in "[a-zA-Z0-9?][a-zA-Z0-9 ?]{0,40}",
    ) {
        let result = transition(&TurnState::Idle, TurnEvent::UserMessage { text: text.clone() })
            .unwrap();

        let append_pos = result.effects.iter().position(|e| {
            matches!(e, Effect::AppendUserTurn { text: t } if *t == text)
        });
        let request_pos = result.effects.iter().position(|e| {
            matches!(e, Effect::RequestCompletion { user_text } if *user_text == text)
        });

        prop_assert_eq!(append_pos, Some(0));
        prop_assert!(request_pos > append_pos);
    }

    /// Whitespace-only input never produces effects and never changes state.
    #[test]
    fn whitespace_input_is_inert(ws in "[ \t\n]{0,10}") {
        let result = transition(&TurnState::Idle, TurnEvent::UserMessage { text: ws }).unwrap();
        prop_assert_eq!(result.new_state, TurnState::Idle);
        prop_assert!(result.effects.is_empty());
    }

    /// A failed completion never appends an assistant turn.
    #[test]
    fn failure_never_appends_assistant_turn(message in "[a-zA-Z ]{1,40}") {
        let result = transition(
            &TurnState::AwaitingCompletion,
            TurnEvent::CompletionFailed { message },
        )
        .unwrap();

        let appended_assistant_turn = result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::AppendAssistantTurn { .. }));
        prop_assert!(!appended_assistant_turn);
    }

    /// Whatever the outcome, a cancelled interaction ends in Idle without
    /// appending an assistant turn.
    #[test]
    fn cancelled_completion_is_discarded(event in prop_oneof![
        "[a-zA-Z ]{0,40}".prop_map(|text| TurnEvent::CompletionSucceeded { text }),
        "[a-zA-Z ]{0,40}".prop_map(|message| TurnEvent::CompletionFailed { message }),
    ]) {
        let result = transition(&TurnState::Cancelling, event).unwrap();
        prop_assert_eq!(result.new_state, TurnState::Idle);
        let appended_assistant_turn = result
            .effects
            .iter()
            .any(|e| matches!(e, Effect::AppendAssistantTurn { .. }));
        prop_assert!(!appended_assistant_turn);
    }

    /// Committed assistant content always equals the full revealed text.
    #[test]
    fn reveal_commits_exactly_the_full_text(full_text in "[a-zA-Z0-9 .]{1,60}") {
        let state = TurnState::Revealing { full_text: full_text.clone() };
        let result = transition(&state, TurnEvent::RevealFinished).unwrap();

        let committed_full_text = result.effects.iter().any(|e| {
            matches!(e, Effect::AppendAssistantTurn { text } if *text == full_text)
        });
        prop_assert!(committed_full_text);
    }

    /// Busy states reject user messages instead of queueing them.
    #[test]
    fn busy_states_reject_messages(
        state in prop_oneof![
            Just(TurnState::UserTurnRecorded),
            Just(TurnState::AwaitingCompletion),
            Just(TurnState::Cancelling),
            "[a-zA-Z ]{0,20}".prop_map(|full_text| TurnState::Revealing { full_text }),
        ],
        text in "[a-zA-Z][a-zA-Z ]{0,20}",
    ) {
        let result = transition(&state, TurnEvent::UserMessage { text });
        prop_assert!(matches!(result, Err(TransitionError::SessionBusy)));
    }
}
