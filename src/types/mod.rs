pub mod error;
pub mod slide;
pub mod utils;

pub use error::{DeckError, ErrorCategory, ErrorClassifier, LlmError, Result};
pub use slide::{OutlineSection, Slide};
pub use utils::{json_string, json_string_array, short_hash, truncate_chars};
