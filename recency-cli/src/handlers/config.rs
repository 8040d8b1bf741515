//! Effective configuration

use crate::context::CliContext;
use crate::output::print_config;

pub fn handle_config_command(context: &CliContext, output_format: &str) -> recency::Result<()> {
    if output_format == "json" {
        println!("{}", serde_json::to_string_pretty(&context.config)?);
    } else {
        print_config(&context.config);
    }
    Ok(())
}
