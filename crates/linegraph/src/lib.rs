//! Point/connection graphs for procedural line drawing.
//!
//! A [`Lines`] value holds a fixed number of 2D points, directed connections
//! between them, and lines traced through ordered lists of connections. On
//! top of that it offers:
//!
//! - [`Lines::gen_metadata`]: walk every line and assign each point a scalar
//!   (hop count, travelled distance, or anything a [`Metric`] computes)
//! - [`Lines::subdivide`]: insert a midpoint on every connection
//!
//! # Supported Metrics
//!
//! - Hop count (`count`)
//! - Euclidean distance (`dist`)

/// Error types used across the crate.
pub mod error;
/// The `Lines` container and its operations.
mod lines;
/// Relaxation policies for metadata generation.
pub mod metric;
/// 2D points and helpers.
pub mod point;
/// Central registry of metric metadata and constructors.
pub mod registry;

pub use crate::{
    lines::{Connection, DEFAULT_CONNECTIONS, DEFAULT_POINTS, Line, Lines},
    metric::Metric,
    point::Point,
};

/// Construct a built-in metric by name.
///
/// Returns an error if the name is unknown.
pub fn metric_from_name(name: &str) -> error::Result<Box<dyn Metric + 'static>> {
    registry::construct(name)
}
