//! Minimal example: trace a unit square, measure it, then subdivide it.

use std::error::Error;

use linegraph::{Lines, metric::Distance};

fn main() -> Result<(), Box<dyn Error>> {
    // snips-start: example
    let mut lines = Lines::new(4, 4)?;
    for (i, p) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]
        .into_iter()
        .enumerate()
    {
        lines.set_point(i, p)?;
        lines.set_connection(i, i, (i + 1) % 4)?;
    }
    lines.add_line([0, 1, 2, 3]);

    lines.gen_metadata(&Distance, 9.0, 0.0)?;
    println!("{lines}");
    println!("metadata: {:?}", lines.point_metadata());

    let mut sub = lines.subdivide()?;
    sub.gen_metadata(&Distance, 9.0, 0.0)?;
    println!("{sub}");
    println!("metadata: {:?}", sub.point_metadata());
    // snips-end: example

    Ok(())
}
