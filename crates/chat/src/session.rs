//! Conversational session engine for campaign intake.
//!
//! One open-ended exchange per session: the marketer sends a turn, the
//! backend answers with one assistant turn, and the reply is revealed with a
//! cancellable simulated-typing effect. When the backend signals completion
//! the session hands off to campaign creation and accepts no further turns.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use promo_api_client::PromoBackend;
use promo_core::error::{PromoError, PromoResult};
use promo_core::types::{CampaignSeed, ChatRole, ChatTurn};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::reveal::Typewriter;

/// Synthetic assistant turn appended when a request fails.
const TURN_ERROR_MESSAGE: &str = "죄송합니다. 메시지 처리 중 오류가 발생했습니다.";

/// Engine state. `Idle -> AwaitingResponse -> Revealing -> Idle` loops, with
/// a one-shot exit to `HandedOff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
    Revealing,
    HandedOff,
}

/// What the caller should do after a successfully submitted turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The backend assigned a fresh conversation id: the reply was appended
    /// without animation (avoids a flash before navigation) and the caller
    /// should adopt the new id.
    NewSession(String),
    /// The reply is being revealed into [`ChatSession::reveal_buffer`].
    Revealing,
    /// The backend declared the intake finished; create a campaign from the
    /// seed. The session accepts no further turns.
    HandedOff(Option<CampaignSeed>),
}

struct SessionInner {
    state: SessionState,
    transcript: Vec<ChatTurn>,
    reveal_buffer: String,
}

/// A single conversational intake session. Owns its transcript, independent
/// of any campaign until hand-off.
pub struct ChatSession {
    backend: Arc<dyn PromoBackend>,
    conversation_id: Option<String>,
    reveal_interval: Duration,
    inner: Arc<Mutex<SessionInner>>,
    reveal_task: Option<JoinHandle<()>>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn PromoBackend>, reveal_interval: Duration) -> Self {
        Self {
            backend,
            conversation_id: None,
            reveal_interval,
            inner: Arc::new(Mutex::new(SessionInner {
                state: SessionState::Idle,
                transcript: Vec::new(),
                reveal_buffer: String::new(),
            })),
            reveal_task: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// Committed transcript. The turn currently being revealed is not here
    /// until the reveal completes.
    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.inner.lock().transcript.clone()
    }

    /// Partially revealed assistant reply, empty outside `Revealing`.
    pub fn reveal_buffer(&self) -> String {
        self.inner.lock().reveal_buffer.clone()
    }

    /// Load an existing session's transcript. History is rendered as-is; the
    /// typing animation applies only to turns arriving in this process
    /// lifetime.
    pub async fn load_history(&mut self, conversation_id: &str) -> PromoResult<()> {
        self.cancel_reveal();
        let turns = self.backend.fetch_chat_history(conversation_id).await?;
        self.conversation_id = Some(conversation_id.to_string());
        let mut inner = self.inner.lock();
        inner.transcript = turns;
        inner.state = SessionState::Idle;
        Ok(())
    }

    /// Send one user turn. Rejects empty input and enforces one outstanding
    /// request per session. On transport failure a single synthetic assistant
    /// error turn is appended, the session returns to `Idle`, and the error
    /// is surfaced; nothing is retried automatically.
    pub async fn submit(&mut self, text: &str) -> PromoResult<TurnOutcome> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PromoError::Validation(
                "메시지를 입력해주세요.".to_string(),
            ));
        }

        {
            let mut inner = self.inner.lock();
            match inner.state {
                SessionState::Idle => {}
                SessionState::HandedOff => {
                    return Err(PromoError::Validation(
                        "이미 종료된 대화입니다.".to_string(),
                    ));
                }
                SessionState::AwaitingResponse | SessionState::Revealing => {
                    return Err(PromoError::Validation(
                        "이전 메시지를 처리하는 중입니다.".to_string(),
                    ));
                }
            }
            inner.transcript.push(ChatTurn {
                role: ChatRole::User,
                content: text.to_string(),
            });
            inner.state = SessionState::AwaitingResponse;
        }

        let response = self
            .backend
            .send_chat_turn(text, self.conversation_id.as_deref())
            .await;

        let wire = match response {
            Ok(wire) => wire,
            Err(e) => {
                warn!(error = %e, "Chat turn failed");
                let mut inner = self.inner.lock();
                inner.transcript.push(ChatTurn {
                    role: ChatRole::Assistant,
                    content: TURN_ERROR_MESSAGE.to_string(),
                });
                inner.state = SessionState::Idle;
                return Err(e);
            }
        };

        let is_new_session = self.conversation_id.is_none();
        self.conversation_id = Some(wire.conversation_id.clone());

        if wire.finished {
            debug!(conversation_id = %wire.conversation_id, "Intake finished, handing off");
            let mut inner = self.inner.lock();
            inner.transcript.push(ChatTurn {
                role: ChatRole::Assistant,
                content: wire.message,
            });
            inner.state = SessionState::HandedOff;
            return Ok(TurnOutcome::HandedOff(wire.campaign_draft));
        }

        if is_new_session {
            // Skip the reveal for the first turn of a brand-new session to
            // avoid a flash before the caller navigates to it.
            let mut inner = self.inner.lock();
            inner.transcript.push(ChatTurn {
                role: ChatRole::Assistant,
                content: wire.message,
            });
            inner.state = SessionState::Idle;
            return Ok(TurnOutcome::NewSession(wire.conversation_id));
        }

        self.start_reveal(wire.message);
        Ok(TurnOutcome::Revealing)
    }

    fn start_reveal(&mut self, message: String) {
        {
            let mut inner = self.inner.lock();
            inner.state = SessionState::Revealing;
            inner.reveal_buffer.clear();
        }

        let shared = Arc::clone(&self.inner);
        let interval = self.reveal_interval;
        self.reveal_task = Some(tokio::spawn(async move {
            let mut typewriter = Typewriter::new(&message);
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let mut inner = shared.lock();
                match typewriter.step() {
                    Some(ch) => inner.reveal_buffer.push(ch),
                    None => {
                        inner.transcript.push(ChatTurn {
                            role: ChatRole::Assistant,
                            content: typewriter.full_text(),
                        });
                        inner.reveal_buffer.clear();
                        inner.state = SessionState::Idle;
                        break;
                    }
                }
            }
        }));
    }

    /// Abort any in-progress reveal, e.g. when the view is navigated away.
    /// The partially revealed turn is discarded, not committed.
    pub fn cancel_reveal(&mut self) {
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
        let mut inner = self.inner.lock();
        if inner.state == SessionState::Revealing {
            inner.reveal_buffer.clear();
            inner.state = SessionState::Idle;
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if let Some(task) = self.reveal_task.take() {
            task.abort();
        }
    }
}
