pub mod app;
pub mod components;
pub mod event_handler;
pub mod layout;
pub mod markdown;
pub mod state;
pub mod theme;
pub mod transcript;

pub use app::{App, ExchangeOutcome};
pub use event_handler::{EventHandler, KeyAction};
pub use state::{AppState, InputState};
pub use transcript::{TranscriptEntry, TranscriptView};
