use clap::Parser;
use recency_cli::commands::Commands;
use recency_cli::context::CliContext;
use recency_cli::handlers::*;
use recency_cli::output::output_error_json;
use recency_cli::utils::parse_instant;
use recency::config::{LogLevel, RecencyConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recency-cli")]
#[command(about = "Inspect term recency boosting", long_about = None)]
#[command(version = recency::VERSION)]
struct Cli {
    /// Configuration file, merged over the default locations
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Instant recency is measured against (RFC 3339 or "now")
    #[arg(long, default_value = "now", global = true)]
    now: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli_args = Cli::parse();

    let output_format = std::env::var("RECENCY_OUTPUT").unwrap_or_else(|_| cli_args.output.clone());

    if let Err(e) = run(cli_args, &output_format) {
        output_error_json(&e, &output_format);
        std::process::exit(1);
    }
}

/// Configured logging with the command-line overrides applied. Console logs
/// always go to stderr so table and json output stay clean on stdout.
fn cli_config(config: &RecencyConfig, cli_args: &Cli, output_format: &str) -> RecencyConfig {
    let mut config = config.clone();
    config.logging.stderr = true;
    if cli_args.quiet || output_format == "json" {
        config.logging.level = LogLevel::Error;
    } else if cli_args.verbose {
        config.logging.level = LogLevel::Debug;
    }
    config
}

fn run(cli_args: Cli, output_format: &str) -> recency::Result<()> {
    if matches!(cli_args.command, Commands::Version) {
        println!("recency-cli v{}", recency::VERSION);
        return Ok(());
    }

    let now = parse_instant(&cli_args.now)?;
    let context = CliContext::new(cli_args.config.as_deref(), now)?;
    let _log_guard = recency::init(&cli_config(&context.config, &cli_args, output_format))?;

    match cli_args.command {
        Commands::Version => Ok(()),
        Commands::Curve(args) => handle_curve_command(args, &context, output_format),
        Commands::Recency(args) => handle_recency_command(args, &context, output_format),
        Commands::Encode(args) => handle_encode_command(args, &context, output_format),
        Commands::Search(args) => handle_search_command(args, &context, output_format),
        Commands::Explain(args) => handle_explain_command(args, &context, output_format),
        Commands::Config => handle_config_command(&context, output_format),
    }
}
