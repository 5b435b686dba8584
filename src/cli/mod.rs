pub mod commands;
pub mod ui;
pub mod util;

pub use util::{LlmOverrides, load_config, read_input};
