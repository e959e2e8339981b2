//! Command‑line entry point for the `lgraph` tool.
//!
//! Provides subcommands to run the reference square demo, walk fixture
//! shapes with a chosen metric, and list the available metrics.

use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
    process,
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use linegraph::registry;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// CLI command implementations.
mod cmd;
/// Named fixture graphs.
mod shape;

/// Validate a metric name against the registry.
fn parse_metric_name(s: &str) -> Result<String, String> {
    if registry::METRIC_NAMES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "Invalid metric name '{}'. Valid options: {}",
            s,
            registry::METRIC_NAMES.join(", ")
        ))
    }
}

/// Validate a shape name against the fixture set.
fn parse_shape_name(s: &str) -> Result<String, String> {
    if shape::SHAPE_NAMES.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(format!(
            "Invalid shape name '{}'. Valid options: {}",
            s,
            shape::SHAPE_NAMES.join(", ")
        ))
    }
}

#[derive(Parser)]
#[command(name = "lgraph")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, global = true, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `lgraph` tool.
enum Commands {
    #[command(about = "Measure and subdivide the unit square")]
    /// Run the reference square demo.
    Demo {
        #[arg(short = 'o', long = "output", help = "Optional output file path; prints to stdout when omitted")]
        /// Optional output file path.
        output: Option<PathBuf>,
    },

    #[command(about = "Subdivide a fixture shape and generate point metadata")]
    /// Build a shape, subdivide it, and walk it with a metric.
    Run {
        #[arg(
            short = 'm',
            long = "metric",
            default_value = "count",
            value_parser = parse_metric_name,
            help = &format!("Metric name (options: {})", registry::METRIC_NAMES.join(", "))
        )]
        /// Metric used for the walk.
        metric: String,

        #[arg(long = "init", default_value_t = 9.0, allow_negative_numbers = true, help = "Value every point is reset to")]
        /// Metadata reset value.
        init: f64,

        #[arg(long = "start", default_value_t = 0.0, allow_negative_numbers = true, help = "Value given to the first point of each line")]
        /// Root value for every line.
        start: f64,

        #[arg(
            short = 'n',
            long = "times",
            default_value_t = 0,
            value_parser = clap::value_parser!(u32).range(0..=16),
            help = "Number of subdivision passes (0-16)"
        )]
        /// Subdivision passes applied before the walk.
        times: u32,

        #[arg(short = 'o', long = "output", help = "Optional output file path; prints to stdout when omitted")]
        /// Optional output file path.
        output: Option<PathBuf>,

        #[arg(help = &format!("Shape name (options: {})", shape::SHAPE_NAMES.join(", ")), value_parser = parse_shape_name)]
        /// Shape name.
        shape: String,
    },

    #[command(name = "list-metrics", about = "List supported metrics and their rules")]
    /// List supported metrics.
    ListMetrics,
}

/// Install the stderr log subscriber. `RUST_LOG` directives extend the level
/// picked by `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Print the error and exit non-zero on failure.
fn report_ok<E: Display>(result: Result<(), E>) {
    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Write a report to disk, or to stdout when no path is given.
fn deliver_text(text: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, text)?;
        debug!(path = %path.display(), bytes = text.len(), "wrote report");
        println!("OK!");
    } else {
        print!("{text}");
    }
    Ok(())
}

/// Handle the `demo` subcommand.
fn handle_demo(output: Option<&Path>) -> Result<()> {
    let text = cmd::demo()?;
    deliver_text(&text, output)
}

/// Handle the `run` subcommand.
fn handle_run(opts: &cmd::RunOptions<'_>, output: Option<&Path>) -> Result<()> {
    let text = cmd::run(opts)?;
    deliver_text(&text, output)
}

/// Handle the `list-metrics` subcommand.
fn handle_list_metrics() -> Result<()> {
    print!("{}", cmd::list_metrics()?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.v);

    match cli.command {
        Commands::Demo { output } => report_ok(handle_demo(output.as_deref())),
        Commands::Run {
            metric,
            init,
            start,
            times,
            output,
            shape,
        } => report_ok(handle_run(
            &cmd::RunOptions {
                shape: &shape,
                metric: &metric,
                init,
                start,
                times,
            },
            output.as_deref(),
        )),
        Commands::ListMetrics => report_ok(handle_list_metrics()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!(parse_metric_name("dist").unwrap(), "dist");
        assert!(parse_metric_name("manhattan").is_err());
        assert_eq!(parse_shape_name("tree").unwrap(), "tree");
        assert!(parse_shape_name("circle").is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
