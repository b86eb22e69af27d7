pub mod entry;
pub mod renderer;
pub mod state;

pub use entry::{CHAT_FALLBACK, THINKING_LABEL, TranscriptEntry, UPLOAD_FALLBACK};
pub use renderer::{TranscriptRenderer, render_entry_lines, render_transcript_lines};
pub use state::TranscriptView;
