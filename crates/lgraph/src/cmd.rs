//! Command handlers for the `lgraph` CLI.
//!
//! Each handler builds its graph, runs the requested operations and returns
//! the text report; `main` decides where the report goes.

use std::fmt::Write;

use anyhow::Result;
use linegraph::{Lines, metric::Distance, metric_from_name, registry};
use tracing::info;

use crate::shape;

/// Metadata reset value used by the demo.
const DEMO_INIT: f64 = 9.0;
/// Root value used by the demo.
const DEMO_START: f64 = 0.0;

/// Append a titled rendering of `lines` and its metadata to `out`.
fn report(out: &mut String, title: &str, lines: &Lines) -> Result<()> {
    writeln!(
        out,
        "{title} ({} points, {} connections, {} lines)",
        lines.npoints(),
        lines.nconnections(),
        lines.lines().len()
    )?;
    write!(out, "{lines}")?;
    writeln!(out, "metadata:")?;
    for (i, value) in lines.point_metadata().iter().enumerate() {
        writeln!(out, "  {i}: {value}")?;
    }
    Ok(())
}

/// Measure the unit square by distance, report it, subdivide it, then report
/// the subdivided copy followed by the original again.
///
/// The subdivided copy is reported as produced, before any metadata walk, so
/// its metadata is all zeros. The second rendering of the original shows that
/// subdividing left it untouched.
pub fn demo() -> Result<String> {
    let mut lines = shape::square()?;
    lines.gen_metadata(&Distance, DEMO_INIT, DEMO_START)?;

    let mut out = String::new();
    report(&mut out, "original", &lines)?;
    let sub = lines.subdivide()?;
    report(&mut out, "subdivided", &sub)?;
    report(&mut out, "original after subdivide", &lines)?;
    Ok(out)
}

/// Parameters for the `run` subcommand.
pub struct RunOptions<'a> {
    /// Fixture shape name.
    pub shape: &'a str,
    /// Metric name.
    pub metric: &'a str,
    /// Metadata reset value.
    pub init: f64,
    /// Value forced onto the first point of every line.
    pub start: f64,
    /// Number of subdivision passes before the walk.
    pub times: u32,
}

/// Build a fixture, subdivide it, generate metadata and report the result.
pub fn run(opts: &RunOptions<'_>) -> Result<String> {
    let metric = metric_from_name(opts.metric)?;
    let mut lines = shape::from_name(opts.shape)?.subdivide_n(opts.times)?;
    info!(
        shape = opts.shape,
        times = opts.times,
        points = lines.npoints(),
        "built shape"
    );
    lines.gen_metadata(metric.as_ref(), opts.init, opts.start)?;

    let mut out = String::new();
    report(&mut out, opts.shape, &lines)?;
    Ok(out)
}

/// List every registered metric.
pub fn list_metrics() -> Result<String> {
    let mut out = String::from("Supported metrics (key — display — rule):\n");
    for entry in registry::REGISTRY {
        writeln!(
            out,
            "- {} — {} — {}",
            entry.key, entry.display, entry.description
        )?;
    }
    Ok(out)
}
