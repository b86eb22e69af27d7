use std::path::PathBuf;
use std::sync::Arc;

use ratatui::Frame;
use tokio::sync::mpsc;
use uuid::Uuid;

use parley_client::{Backend, ChatReply, UploadReply};
use parley_core::{Result, Transcript};

use crate::components::Footer;
use crate::event_handler::{EventHandler, KeyAction};
use crate::layout::TuiLayout;
use crate::state::AppState;
use crate::transcript::{CHAT_FALLBACK, TranscriptEntry, TranscriptRenderer, TranscriptView, UPLOAD_FALLBACK};

pub mod event_loop;

/// Lines moved per PageUp/PageDown press
const SCROLL_STEP: usize = 5;

/// Resolution of a background exchange, delivered over the outcome channel
#[derive(Debug)]
pub enum ExchangeOutcome {
    Chat {
        pending: Uuid,
        sent: String,
        result: Result<ChatReply>,
    },
    Upload {
        pending: Uuid,
        result: Result<UploadReply>,
    },
}

/// Top-level application state for the chat TUI.
///
/// Owns the view transcript (what is drawn), the session transcript (what
/// is replayed to the backend as history), and the channel that background
/// exchange tasks resolve through.
pub struct App {
    pub state: AppState,
    pub view: TranscriptView,
    session: Transcript,
    backend: Arc<dyn Backend>,
    outcome_tx: mpsc::UnboundedSender<ExchangeOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<ExchangeOutcome>,
    should_exit: bool,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, backend_label: impl Into<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(backend_label),
            view: TranscriptView::new(),
            session: Transcript::new(),
            backend,
            outcome_tx,
            outcome_rx,
            should_exit: false,
        }
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn session(&self) -> &Transcript {
        &self.session
    }

    pub fn handle_event(&mut self, event: &crossterm::event::Event) {
        if let Some(action) = EventHandler::handle_event(event, &mut self.state) {
            self.apply_action(action);
        }
    }

    pub fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::SendMessage { message } => self.send_chat(message),
            KeyAction::Upload { path } => self.start_upload(path),
            KeyAction::ToggleSources => {
                self.view.toggle_last_sources();
            }
            KeyAction::ScrollUp => self.view.scroll_up(SCROLL_STEP),
            KeyAction::ScrollDown => self.view.scroll_down(SCROLL_STEP),
            KeyAction::ScrollToBottom => self.view.scroll_to_bottom(),
            KeyAction::Notice { body } => self.view.push(TranscriptEntry::notice(body)),
            KeyAction::Exit => self.should_exit = true,
        }
    }

    /// Start a chat exchange: echo the message, show a placeholder, and
    /// resolve the request on a background task. The history snapshot is
    /// taken before the user's new message so the backend receives the
    /// message once, as `message`, not twice.
    fn send_chat(&mut self, message: String) {
        self.view.push(TranscriptEntry::user_message(message.clone()));
        let pending = self.view.push_pending();
        self.state.start_exchange();

        let history = self.session.snapshot().to_vec();
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = backend.chat(&message, &history).await;
            let _ = tx.send(ExchangeOutcome::Chat { pending, sent: message, result });
        });
    }

    /// Start an upload. Uploads run independently of the chat single-flight
    /// guard and never touch the session transcript.
    fn start_upload(&mut self, path: PathBuf) {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        self.view
            .push(TranscriptEntry::user_message(format!("Uploading {}...", filename)));
        let pending = self.view.push_pending();

        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => backend.upload(&filename, bytes).await,
                Err(e) => Err(e.into()),
            };
            let _ = tx.send(ExchangeOutcome::Upload { pending, result });
        });
    }

    /// Await the next resolved exchange. Returns `None` only if every
    /// sender is gone, which cannot happen while the app holds its own.
    pub async fn recv_outcome(&mut self) -> Option<ExchangeOutcome> {
        self.outcome_rx.recv().await
    }

    pub fn handle_outcome(&mut self, outcome: ExchangeOutcome) {
        match outcome {
            ExchangeOutcome::Chat { pending, sent, result } => {
                self.view.remove_pending(pending);
                self.state.finish_exchange();
                match result {
                    Ok(reply) => {
                        self.session.record_exchange(&sent, &reply.response);
                        self.view
                            .push(TranscriptEntry::model_reply(reply.response, reply.sources));
                    }
                    Err(e) => {
                        // Failed exchanges leave the session history untouched
                        tracing::warn!("chat exchange failed: {}", e);
                        self.view.push(TranscriptEntry::error_message(CHAT_FALLBACK));
                    }
                }
            }
            ExchangeOutcome::Upload { pending, result } => {
                self.view.remove_pending(pending);
                match result {
                    Ok(reply) => {
                        self.view.push(TranscriptEntry::model_reply(reply.status, Vec::new()));
                    }
                    Err(e) => {
                        tracing::warn!("upload failed: {}", e);
                        self.view.push(TranscriptEntry::error_message(UPLOAD_FALLBACK));
                    }
                }
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let layout = TuiLayout::calculate(frame.area(), self.state.input.visual_height());

        TranscriptRenderer::new(&mut self.view).render(frame, layout.transcript);
        Footer::new(&self.state).render(frame, layout.footer);
    }
}
