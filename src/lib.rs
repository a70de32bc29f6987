//! # torchpost
//!
//! Post-processor for plasma cutting tables. Reads the toolpath event stream
//! written by a CAM planner and produces the numerical-control program the
//! table controller runs.
//!
//! ## Architecture
//!
//! torchpost is organized as a workspace with multiple crates:
//!
//! 1. **torchpost-core** - Toolpath events, sections, units, planar geometry
//! 2. **torchpost-settings** - Post configuration, file loading, validation
//! 3. **torchpost-post** - The emission engine and the plasma post
//! 4. **torchpost** - Job loading, logging setup and the command-line binary

use anyhow::Context;
use std::fs;
use std::path::Path;

pub use torchpost_core::{
    parse_events, CommandKind, CompensationSide, MeasurementSystem, Plane, Point2, Section,
    Tool, ToolpathEvent,
};
pub use torchpost_post::{PlasmaPost, PostError, PostWarning, Program};
pub use torchpost_settings::{PostConfig, TorchControl, WordSeparator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, stdout is reserved for the program text
/// - RUST_LOG environment variable support, `level` when unset
/// - Pretty or JSON formatting
pub fn init_logging(level: tracing::Level, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
    });
    let pretty_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .context("failed to install the log subscriber")?;
    Ok(())
}

/// Load the post configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PostConfig> {
    match path {
        Some(path) => PostConfig::load_from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => {
            tracing::debug!("no configuration file, using defaults");
            Ok(PostConfig::default())
        }
    }
}

/// Read a job file: a JSON array of toolpath events.
pub fn load_job(path: &Path) -> anyhow::Result<Vec<ToolpathEvent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read job {}", path.display()))?;
    let events =
        parse_events(&text).with_context(|| format!("invalid job {}", path.display()))?;
    tracing::info!(events = events.len(), job = %path.display(), "job loaded");
    Ok(events)
}

/// Post a job file with an optional configuration file.
pub fn post_job(job: &Path, config: Option<&Path>) -> anyhow::Result<Program> {
    let config = load_config(config)?;
    let events = load_job(job)?;
    let program = PlasmaPost::new(config)
        .generate_program(events)
        .with_context(|| format!("failed to post {}", job.display()))?;
    Ok(program)
}

/// Write the program to `output`, or stdout when no path is given.
pub fn write_program(program: &Program, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, &program.text)
            .with_context(|| format!("failed to write program {}", path.display())),
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(program.text.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write program to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JOB: &str = r#"[
        {"type": "section_start", "tool": {"number": 1, "description": "mild steel 45A"},
         "initial_position": {"x": 1.0, "y": 1.0}},
        {"type": "power_request", "on": true},
        {"type": "linear_move", "x": 2.0, "y": 1.0, "feed": 80.0},
        {"type": "power_request", "on": false},
        {"type": "section_end"}
    ]"#;

    fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_post_job_with_defaults() {
        let job = write_temp(".json", JOB);
        let program = post_job(job.path(), None).unwrap();

        assert!(program.text.contains(" T1 (MILD STEEL 45A)\n"));
        assert!(program.text.contains(" G00 X1. Y1.\n"));
        assert!(program.text.contains(" G01 X2. F80.\n"));
        assert!(program.text.ends_with(" M30\n"));
        assert!(program.warnings.is_empty());
    }

    #[test]
    fn test_post_job_with_config() {
        let job = write_temp(".json", JOB);
        let config = write_temp(
            ".toml",
            "sequencing = false\nprogram_name = \"o1001\"\nshow_notes = false\n",
        );
        let program = post_job(job.path(), Some(config.path())).unwrap();

        assert!(program.text.starts_with("(O1001)\n(UNITS IN)\nG20\n"));
        assert!(program.text.contains("\nT1\n"));
    }

    #[test]
    fn test_missing_config_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.sequencing);
    }

    #[test]
    fn test_invalid_job_reports_path() {
        let job = write_temp(".json", r#"[{"type": "teleport"}]"#);
        let err = post_job(job.path(), None).unwrap_err();
        assert!(err.to_string().contains("invalid job"));
    }

    #[test]
    fn test_post_error_is_preserved() {
        let job = write_temp(
            ".json",
            r#"[
                {"type": "section_start", "tool": {"number": 1}},
                {"type": "command", "kind": "tool_measure"}
            ]"#,
        );
        let err = post_job(job.path(), None).unwrap_err();
        let post_error = err.downcast_ref::<PostError>().unwrap();
        assert_eq!(
            *post_error,
            PostError::UnsupportedCommand {
                event: 1,
                command: "ToolMeasure".into()
            }
        );
    }

    #[test]
    fn test_write_program_to_file() {
        let job = write_temp(".json", JOB);
        let program = post_job(job.path(), None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("part.nc");
        write_program(&program, Some(&output)).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), program.text);
    }

    #[test]
    fn test_missing_job_file() {
        let err = post_job(Path::new("/nonexistent/job.json"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read job"));
    }
}
