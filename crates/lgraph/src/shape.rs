//! Fixture graphs the CLI can build by name.

use anyhow::{Result, bail};
use linegraph::Lines;

/// Names accepted by [`from_name`].
pub const SHAPE_NAMES: &[&str] = &["square", "tree"];

/// Build the fixture registered under `name`.
pub fn from_name(name: &str) -> Result<Lines> {
    match name {
        "square" => square(),
        "tree" => tree(),
        _ => bail!(
            "unknown shape '{name}' (options: {})",
            SHAPE_NAMES.join(", ")
        ),
    }
}

/// Unit square traced as one closed line through connections 0..4.
pub fn square() -> Result<Lines> {
    let mut lines = Lines::new(4, 4)?;
    lines.set_point(0, (0.0, 0.0))?;
    lines.set_point(1, (0.0, 1.0))?;
    lines.set_point(2, (1.0, 1.0))?;
    lines.set_point(3, (1.0, 0.0))?;
    lines.set_connection(0, 0, 1)?;
    lines.set_connection(1, 1, 2)?;
    lines.set_connection(2, 2, 3)?;
    lines.set_connection(3, 3, 0)?;
    lines.add_line([0, 1, 2, 3]);
    Ok(lines)
}

/// Tree rooted at point 0 (edges 0->1, 0->2, 0->3, 2->4) drawn as three lines.
///
/// Point 3 is assigned twice; its final position is `(1, 2)`.
pub fn tree() -> Result<Lines> {
    let mut lines = Lines::new(5, 4)?;
    lines.set_point(0, (0.0, 0.0))?;
    lines.set_point(1, (0.0, 1.0))?;
    lines.set_point(2, (1.0, 1.0))?;
    lines.set_point(3, (1.0, 0.0))?;
    lines.set_point(3, (1.0, 2.0))?;
    lines.set_connection(0, 0, 1)?;
    lines.set_connection(1, 0, 2)?;
    lines.set_connection(2, 0, 3)?;
    lines.set_connection(3, 2, 4)?;
    lines.add_line([0]);
    lines.add_line([1, 3]);
    lines.add_line([2]);
    Ok(lines)
}
