//! Command handlers for the recency CLI

pub mod config;
pub mod curve;
pub mod query;
pub mod timestamp;

pub use config::handle_config_command;
pub use curve::handle_curve_command;
pub use query::{handle_explain_command, handle_search_command};
pub use timestamp::{handle_encode_command, handle_recency_command};
