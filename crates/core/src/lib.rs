pub mod config;
pub mod error;
pub mod logging;
pub mod transcript;

pub use config::{BackendConfig, Config, LoggingConfig};
pub use error::{Error, Result};
pub use logging::{LogFormat, init_logging};
pub use transcript::{Role, Transcript, Turn};
