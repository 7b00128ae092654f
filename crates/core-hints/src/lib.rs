pub mod config;
pub mod error;
pub mod prompt;
pub mod service;


pub use config::{Backend, HintConfig};
pub use error::{HintError, HintResult};
pub use service::{FALLBACK_HINT, HintService, LlmHintService, MOCK_HINT};
