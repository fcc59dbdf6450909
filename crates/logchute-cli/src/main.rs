use anyhow::Result;
use clap::Parser;
use logchute_cli::OutputFormat;
use logchute_cli::commands;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logchute")]
#[command(author, version)]
#[command(
    about = "Compute aggregate statistics from a web-server access log",
    long_about = "logchute reads a combined-format access log with a trailing microsecond \
                  duration field and reports line count, time span, busiest page and client, \
                  page load times, error count and bytes transferred in a single pass."
)]
struct Cli {
    /// Path to the access log
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "LOGCHUTE_FORMAT", default_value_t)]
    format: OutputFormat,

    /// Skip lines with anything but whitespace after the duration field
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    commands::stats::execute(&cli.file, cli.strict, cli.format)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("logchute=debug,logchute_cli=debug,logchute_core=debug")
    } else {
        EnvFilter::new("logchute=info,logchute_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
