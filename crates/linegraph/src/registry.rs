//! Central registry of metric names, descriptions and constructors.

use crate::{
    error::{Error, Result},
    metric::{Count, Distance, Metric},
};

/// Registry entry describing one built-in metric.
#[derive(Clone, Copy, Debug)]
pub struct MetricEntry {
    /// Key accepted by [`metric_from_name`](crate::metric_from_name).
    pub key: &'static str,
    /// Human-readable name.
    pub display: &'static str,
    /// One-line description of the relaxation rule.
    pub description: &'static str,
}

/// Every built-in metric, in listing order.
pub const REGISTRY: &[MetricEntry] = &[
    MetricEntry {
        key: "count",
        display: "Hop count",
        description: "min(md[a] + 1, md[b])",
    },
    MetricEntry {
        key: "dist",
        display: "Euclidean distance",
        description: "min(md[a] + |p[b] - p[a]|, md[b])",
    },
];

/// Keys of every built-in metric.
pub const METRIC_NAMES: &[&str] = &["count", "dist"];

/// Look up the registry entry for `name`.
pub fn entry(name: &str) -> Option<&'static MetricEntry> {
    REGISTRY.iter().find(|e| e.key == name)
}

/// Construct the metric registered under `name`.
pub fn construct(name: &str) -> Result<Box<dyn Metric>> {
    match name {
        "count" => Ok(Box::new(Count)),
        "dist" => Ok(Box::new(Distance)),
        _ => Err(Error::InvalidArgument(format!(
            "unknown metric '{name}' (options: {})",
            METRIC_NAMES.join(", ")
        ))),
    }
}
