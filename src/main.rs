//! torchpost CLI - post a CAM job for a plasma table

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use torchpost::{init_logging, post_job, write_program};

#[derive(Parser)]
#[command(name = "torchpost", version)]
#[command(about = "Turn CAM toolpath events into a plasma table program", long_about = None)]
struct Cli {
    /// Job file: JSON array of toolpath events
    #[arg(short, long)]
    job: PathBuf,

    /// Post configuration (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Program file to write; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    init_logging(level, cli.json_logs)?;

    let program = post_job(&cli.job, cli.config.as_deref())?;
    write_program(&program, cli.output.as_deref())?;

    if let Some(output) = &cli.output {
        tracing::info!(
            blocks = program.blocks,
            warnings = program.warnings.len(),
            output = %output.display(),
            "program written"
        );
    }
    Ok(())
}
