//! Relaxation policies used by [`Lines::gen_metadata`].

use crate::{
    error::Result,
    lines::{Connection, Lines},
};

/// Computes the metadata value for a connection's destination point.
///
/// Implementations should only read metadata that the walk has already
/// written for the connection's endpoints. Any closure of the form
/// `Fn(&Lines, Connection) -> Result<f64>` is a metric.
pub trait Metric {
    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "custom"
    }

    /// New value for `conn.b`.
    fn relax(&self, lines: &Lines, conn: Connection) -> Result<f64>;
}

impl<F> Metric for F
where
    F: Fn(&Lines, Connection) -> Result<f64>,
{
    fn relax(&self, lines: &Lines, conn: Connection) -> Result<f64> {
        self(lines, conn)
    }
}

/// Hop count: `min(md[a] + 1, md[b])`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Count;

impl Metric for Count {
    fn name(&self) -> &'static str {
        "count"
    }

    fn relax(&self, lines: &Lines, conn: Connection) -> Result<f64> {
        let from = lines.metadata(conn.a)?;
        let to = lines.metadata(conn.b)?;
        Ok((from + 1.0).min(to))
    }
}

/// Path length: `min(md[a] + |p[b] - p[a]|, md[b])`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Distance;

impl Metric for Distance {
    fn name(&self) -> &'static str {
        "dist"
    }

    fn relax(&self, lines: &Lines, conn: Connection) -> Result<f64> {
        let from = lines.metadata(conn.a)?;
        let to = lines.metadata(conn.b)?;
        let d = lines.point(conn.a)?.distance(&lines.point(conn.b)?);
        Ok((from + d).min(to))
    }
}
