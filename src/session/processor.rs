//! The Turn Processor
//!
//! Realizes one request/response cycle per accepted user message: append
//! the user turn, dispatch the completion request, drive the reveal effect,
//! and commit the assistant turn. All failures are caught here; no error
//! escapes to crash the session.

use super::{Command, SessionContext, SessionEvent};
use crate::llm::{CompletionClient, CompletionRequest};
use crate::prompt;
use crate::reveal;
use crate::state_machine::{transition, Effect, TurnEvent, TurnState};
use crate::transcript::{ChatTurn, Transcript};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio_util::sync::CancellationToken;

/// Per-session processor task
pub struct Processor {
    context: SessionContext,
    client: Arc<dyn CompletionClient>,
    transcript: Arc<RwLock<Transcript>>,
    state: TurnState,
    command_rx: mpsc::Receiver<Command>,
    broadcast_tx: broadcast::Sender<SessionEvent>,
    busy: Arc<AtomicBool>,
    cancel: Arc<Mutex<CancellationToken>>,
    reveal_delay: Duration,
}

impl Processor {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: SessionContext,
        client: Arc<dyn CompletionClient>,
        transcript: Arc<RwLock<Transcript>>,
        command_rx: mpsc::Receiver<Command>,
        broadcast_tx: broadcast::Sender<SessionEvent>,
        busy: Arc<AtomicBool>,
        cancel: Arc<Mutex<CancellationToken>>,
        reveal_delay: Duration,
    ) -> Self {
        Self {
            context,
            client,
            transcript,
            state: TurnState::Idle,
            command_rx,
            broadcast_tx,
            busy,
            cancel,
            reveal_delay,
        }
    }

    /// Process commands until the session's channel closes.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            match command {
                Command::Chat { text } => self.handle(text).await,
                Command::Clear => self.clear().await,
            }
        }
    }

    /// One request/response cycle for a single user message.
    async fn handle(&mut self, text: String) {
        let mut pending = VecDeque::from([TurnEvent::UserMessage { text }]);

        while let Some(event) = pending.pop_front() {
            let result = match transition(&self.state, event) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.context.session_id,
                        error = %e,
                        "rejected event"
                    );
                    self.broadcast(SessionEvent::Error {
                        message: e.to_string(),
                    });
                    break;
                }
            };

            self.state = result.new_state;
            for effect in result.effects {
                if let Some(next) = self.run_effect(effect).await {
                    pending.push_back(next);
                }
            }
        }

        // Every interaction terminates in an input-accepting state.
        self.busy.store(false, Ordering::SeqCst);
    }

    /// Clear the Session Store and force a full client re-render.
    async fn clear(&mut self) {
        if self.state.is_busy() {
            self.broadcast(SessionEvent::Error {
                message: "session is busy, cannot clear".to_string(),
            });
            return;
        }

        self.transcript.write().await.clear();
        self.state = TurnState::Idle;
        self.broadcast(SessionEvent::Cleared);
        tracing::info!(session_id = %self.context.session_id, "transcript cleared");
    }

    /// Execute one effect, possibly yielding the next event.
    async fn run_effect(&mut self, effect: Effect) -> Option<TurnEvent> {
        match effect {
            Effect::AppendUserTurn { text } => {
                self.append(ChatTurn::user(text)).await;
                None
            }

            Effect::AppendAssistantTurn { text } => {
                self.append(ChatTurn::assistant(text)).await;
                None
            }

            Effect::RequestCompletion { user_text } => {
                Some(self.request_completion(&user_text).await)
            }

            Effect::BeginReveal { full_text } => Some(self.run_reveal(&full_text).await),

            Effect::NotifyError { message } => {
                self.broadcast(SessionEvent::Error { message });
                None
            }

            Effect::NotifyCancelled => {
                self.broadcast(SessionEvent::Cancelled);
                None
            }

            Effect::NotifyDone => {
                self.broadcast(SessionEvent::Done);
                None
            }
        }
    }

    /// Dispatch the completion request, racing it against cancellation.
    async fn request_completion(&mut self, user_text: &str) -> TurnEvent {
        // UserTurnRecorded is intermediate; advance before the call goes out.
        self.advance(TurnEvent::CompletionDispatched);

        let token = self.fresh_cancel_token();
        let request = CompletionRequest::new(
            prompt::build_request_text(user_text),
            self.context.model_id.clone(),
        );

        tokio::select! {
            () = token.cancelled() => {
                // Drop the in-flight future; the response is discarded.
                self.advance(TurnEvent::UserCancel);
                TurnEvent::CompletionFailed {
                    message: "cancelled by user".to_string(),
                }
            }
            result = self.client.complete(&request) => match result {
                Ok(response) => TurnEvent::CompletionSucceeded {
                    text: response.text,
                },
                Err(e) => {
                    tracing::warn!(
                        session_id = %self.context.session_id,
                        kind = ?e.kind,
                        retryable = e.kind.is_retryable(),
                        "completion request failed"
                    );
                    TurnEvent::CompletionFailed { message: e.message }
                }
            }
        }
    }

    /// Word-by-word reveal over the session's event stream. The final
    /// state (no cursor) is always emitted, even when cancelled early.
    async fn run_reveal(&mut self, full_text: &str) -> TurnEvent {
        let token = self.current_cancel_token();
        let mut partials = reveal::reveal_states(full_text);
        // reveal_states always yields the final committed text last.
        let final_state = partials.pop().unwrap_or_default();

        let mut cancelled = false;
        for partial in partials {
            self.broadcast(SessionEvent::Reveal { text: partial });
            tokio::select! {
                () = token.cancelled() => {
                    cancelled = true;
                    break;
                }
                () = tokio::time::sleep(self.reveal_delay) => {}
            }
        }

        self.broadcast(SessionEvent::Reveal { text: final_state });

        if cancelled {
            TurnEvent::UserCancel
        } else {
            TurnEvent::RevealFinished
        }
    }

    /// Apply an intermediate transition that is expected to yield no
    /// effects.
    fn advance(&mut self, event: TurnEvent) {
        match transition(&self.state, event) {
            Ok(result) => {
                debug_assert!(result.effects.is_empty());
                self.state = result.new_state;
            }
            Err(e) => {
                tracing::error!(
                    session_id = %self.context.session_id,
                    error = %e,
                    "invalid intermediate transition"
                );
            }
        }
    }

    async fn append(&self, turn: ChatTurn) {
        self.transcript.write().await.append(turn.clone());
        self.broadcast(SessionEvent::Turn { turn });
    }

    fn broadcast(&self, event: SessionEvent) {
        // Lagging or absent subscribers are fine; the transcript is the
        // source of truth.
        let _ = self.broadcast_tx.send(event);
    }

    fn fresh_cancel_token(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self
            .cancel
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = token.clone();
        token
    }

    fn current_cancel_token(&self) -> CancellationToken {
        self.cancel
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}
