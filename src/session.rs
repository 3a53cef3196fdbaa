//! Session management
//!
//! One processor task per interactive session. Each session owns its
//! transcript; commands for a session are handled strictly sequentially by
//! its task, so an interaction never re-enters while one is outstanding.

mod processor;

#[cfg(test)]
pub mod testing;

pub use processor::Processor;

use crate::config;
use crate::llm::CompletionClient;
use crate::transcript::{ChatTurn, Transcript};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, RwLock};
use tokio_util::sync::CancellationToken;

/// Immutable per-session context passed into the processor
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub model_id: String,
}

/// Commands a client can send to a session
#[derive(Debug, Clone)]
pub enum Command {
    Chat { text: String },
    Clear,
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A turn was appended to the transcript
    Turn { turn: ChatTurn },
    /// A partial (or final) reveal state for the in-flight response
    Reveal { text: String },
    /// Transient error notice; never stored in the transcript
    Error { message: String },
    /// The in-flight interaction was cancelled
    Cancelled,
    /// The transcript was cleared; clients must fully re-render
    Cleared,
    /// The interaction completed and the assistant turn was recorded
    Done,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub command_tx: mpsc::Sender<Command>,
    pub broadcast_tx: broadcast::Sender<SessionEvent>,
    pub transcript: Arc<RwLock<Transcript>>,
    busy: Arc<AtomicBool>,
    cancel: Arc<Mutex<CancellationToken>>,
}

impl SessionHandle {
    /// Whether an interaction is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Atomically claim the session for one interaction. Returns false if
    /// an interaction is already in flight; the processor releases the
    /// claim when the interaction ends.
    pub fn try_claim(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Release a claim that never reached the processor.
    pub fn release_claim(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }

    /// Cancel the in-flight interaction, if any.
    pub fn cancel(&self) {
        self.cancel
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .cancel();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.broadcast_tx.subscribe()
    }
}

/// Manager for all session processors
pub struct SessionManager {
    client: Arc<dyn CompletionClient>,
    model_id: String,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(client: Arc<dyn CompletionClient>, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new session and start its processor task.
    pub async fn create(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();

        let (command_tx, command_rx) = mpsc::channel(16);
        let (broadcast_tx, _) = broadcast::channel(128);
        let transcript = Arc::new(RwLock::new(Transcript::new()));
        let busy = Arc::new(AtomicBool::new(false));
        let cancel = Arc::new(Mutex::new(CancellationToken::new()));

        let handle = SessionHandle {
            command_tx,
            broadcast_tx: broadcast_tx.clone(),
            transcript: Arc::clone(&transcript),
            busy: Arc::clone(&busy),
            cancel: Arc::clone(&cancel),
        };

        let context = SessionContext {
            session_id: session_id.clone(),
            model_id: self.model_id.clone(),
        };

        let processor = Processor::new(
            context,
            Arc::clone(&self.client),
            transcript,
            command_rx,
            broadcast_tx,
            busy,
            cancel,
            config::REVEAL_DELAY,
        );

        let id = session_id.clone();
        tokio::spawn(async move {
            processor.run().await;
            tracing::debug!(session_id = %id, "session processor finished");
        });

        self.sessions
            .write()
            .await
            .insert(session_id.clone(), handle);

        tracing::info!(session_id = %session_id, "session created");
        session_id
    }

    /// Look up a session handle by id.
    pub async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(session_id).cloned()
    }
}
