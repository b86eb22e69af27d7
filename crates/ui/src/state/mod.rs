pub mod input;

pub use input::InputState;

/// Top-level UI state outside the transcript view
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub input: InputState,
    /// Label shown in the footer (the backend base URL)
    pub backend_label: String,
    /// Chat sends are single-flight: while one exchange is outstanding the
    /// send key is a no-op, which keeps context turns in request order.
    /// Uploads are independent and unguarded.
    chat_in_flight: bool,
}

impl AppState {
    pub fn new(backend_label: impl Into<String>) -> Self {
        Self { input: InputState::new(), backend_label: backend_label.into(), chat_in_flight: false }
    }

    pub fn is_busy(&self) -> bool {
        self.chat_in_flight
    }

    pub fn start_exchange(&mut self) {
        self.chat_in_flight = true;
    }

    pub fn finish_exchange(&mut self) {
        self.chat_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_flag() {
        let mut state = AppState::new("http://localhost:8000");
        assert!(!state.is_busy());

        state.start_exchange();
        assert!(state.is_busy());

        state.finish_exchange();
        assert!(!state.is_busy());
    }
}
