pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use context::CliContext;
pub use output::{
    CliColors, format_error, format_hours, format_info, format_multiplier, format_success,
    format_warning, output_error_json, print_config, print_curve, print_explanation, print_hits,
};
pub use utils::{parse_epoch, parse_instant};
