//! The [`Lines`] container: points, connections, polylines and per-point
//! metadata, plus the walks and rewrites defined over them.

use std::{fmt, ops::Deref};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    error::{Error, IndexKind, Result},
    metric::Metric,
    point::Point,
};

/// Point capacity of [`Lines::default`].
pub const DEFAULT_POINTS: usize = 1000;
/// Connection capacity of [`Lines::default`].
pub const DEFAULT_CONNECTIONS: usize = 500;

/// Rule printed before every line by the `Display` impl of [`Lines`].
const RULE: &str = "----------------------------------------";

/// A directed edge from point `a` to point `b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Source point index.
    pub a: usize,
    /// Destination point index.
    pub b: usize,
}

impl Connection {
    /// Create a connection from `a` to `b`.
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

impl From<(usize, usize)> for Connection {
    fn from((a, b): (usize, usize)) -> Self {
        Self { a, b }
    }
}

impl From<[usize; 2]> for Connection {
    fn from([a, b]: [usize; 2]) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// An ordered list of connection indices traced as one polyline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line(pub SmallVec<[usize; 8]>);

impl Line {
    /// Create a line from a list of connection indices.
    pub fn new(conns: impl Into<SmallVec<[usize; 8]>>) -> Self {
        Self(conns.into())
    }

    /// Return the connection indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl FromIterator<usize> for Line {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Deref for Line {
    type Target = [usize];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Points, the connections between them, the lines drawn through those
/// connections, and one scalar of metadata per point.
///
/// Point and connection storage is sized once at construction and never grows
/// through mutation. Every coordinate and metadata entry starts at `0.0`;
/// every connection starts as `(0, 0)` and must be filled in by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct Lines {
    /// Point coordinates, indexed by point id.
    points: Vec<Point>,
    /// Connections, indexed by connection id.
    conns: Vec<Connection>,
    /// Lines in insertion order.
    lines: Vec<Line>,
    /// One value per point, parallel to `points`.
    point_metadata: Vec<f64>,
}

impl Default for Lines {
    fn default() -> Self {
        Self::zeroed(DEFAULT_POINTS, DEFAULT_CONNECTIONS)
    }
}

impl Lines {
    /// Allocate storage for `npoints` points and `nconnections` connections.
    ///
    /// Fails with [`Error::InvalidArgument`] when connections are requested
    /// without any points for them to reference. No connection of such a
    /// graph could ever be valid, so the request is refused up front instead
    /// of failing at the first use of a connection.
    pub fn new(npoints: usize, nconnections: usize) -> Result<Self> {
        if npoints == 0 && nconnections > 0 {
            return Err(Error::InvalidArgument(format!(
                "{nconnections} connections requested with no points"
            )));
        }
        Ok(Self::zeroed(npoints, nconnections))
    }

    /// Build from pre-filled point and connection arrays.
    ///
    /// Every connection endpoint is checked against `points`.
    pub fn from_parts(points: Vec<Point>, conns: Vec<Connection>) -> Result<Self> {
        for conn in &conns {
            check_point(conn.a, points.len())?;
            check_point(conn.b, points.len())?;
        }
        let point_metadata = vec![0.0; points.len()];
        Ok(Self {
            points,
            conns,
            lines: Vec::new(),
            point_metadata,
        })
    }

    /// Unchecked zero-filled allocation.
    fn zeroed(npoints: usize, nconnections: usize) -> Self {
        Self {
            points: vec![Point::ZERO; npoints],
            conns: vec![Connection::default(); nconnections],
            lines: Vec::new(),
            point_metadata: vec![0.0; npoints],
        }
    }

    /// Number of point slots.
    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    /// Number of connection slots.
    pub fn nconnections(&self) -> usize {
        self.conns.len()
    }

    /// All point slots.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access to the point slots. The slot count cannot change.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// All connection slots.
    pub fn connections(&self) -> &[Connection] {
        &self.conns
    }

    /// Mutable access to the connection slots. Endpoints written here are
    /// only checked when an operation dereferences them.
    pub fn connections_mut(&mut self) -> &mut [Connection] {
        &mut self.conns
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Per-point metadata from the last [`gen_metadata`](Self::gen_metadata).
    pub fn point_metadata(&self) -> &[f64] {
        &self.point_metadata
    }

    /// Coordinates of point `index`.
    pub fn point(&self, index: usize) -> Result<Point> {
        self.points
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(IndexKind::Point, index, self.points.len()))
    }

    /// Connection `index`.
    pub fn connection(&self, index: usize) -> Result<Connection> {
        self.conns
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(IndexKind::Connection, index, self.conns.len()))
    }

    /// Metadata value of point `index`.
    pub fn metadata(&self, index: usize) -> Result<f64> {
        self.point_metadata
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_range(IndexKind::Point, index, self.point_metadata.len()))
    }

    /// Mutable metadata slot of point `index`.
    fn metadata_mut(&mut self, index: usize) -> Result<&mut f64> {
        let len = self.point_metadata.len();
        self.point_metadata
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(IndexKind::Point, index, len))
    }

    /// Overwrite the coordinates of point `index`.
    pub fn set_point(&mut self, index: usize, point: impl Into<Point>) -> Result<()> {
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(IndexKind::Point, index, len))?;
        *slot = point.into();
        Ok(())
    }

    /// Overwrite connection `index` with an edge from `a` to `b`.
    pub fn set_connection(&mut self, index: usize, a: usize, b: usize) -> Result<()> {
        check_point(a, self.points.len())?;
        check_point(b, self.points.len())?;
        let len = self.conns.len();
        let slot = self
            .conns
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(IndexKind::Connection, index, len))?;
        *slot = Connection::new(a, b);
        Ok(())
    }

    /// Append a line made of the given connection indices and return its
    /// index. Indices are not checked until an operation walks the line.
    pub fn add_line(&mut self, conns: impl IntoIterator<Item = usize>) -> usize {
        self.lines.push(conns.into_iter().collect());
        self.lines.len() - 1
    }

    /// Recompute every point's metadata by walking each line in order.
    ///
    /// All entries are reset to `init`. For each line the source point of its
    /// first connection is set to `start`, then every connection's destination
    /// receives `metric.relax(self, conn)`. Later lines overwrite values
    /// written by earlier ones.
    ///
    /// An invalid index aborts the walk, leaving metadata partially written.
    pub fn gen_metadata<M>(&mut self, metric: &M, init: f64, start: f64) -> Result<()>
    where
        M: Metric + ?Sized,
    {
        debug!(
            metric = metric.name(),
            lines = self.lines.len(),
            init,
            start,
            "generating point metadata"
        );
        self.point_metadata.fill(init);

        for line_idx in 0..self.lines.len() {
            let first = self.line_entry(line_idx, 0)?;
            let first = self.connection(first)?;
            *self.metadata_mut(first.a)? = start;

            for pos in 0..self.lines[line_idx].len() {
                let conn = self.connection(self.lines[line_idx][pos])?;
                let value = metric.relax(self, conn)?;
                trace!(line = line_idx, a = conn.a, b = conn.b, value, "relaxed");
                *self.metadata_mut(conn.b)? = value;
            }
        }
        Ok(())
    }

    /// Connection index at position `pos` of line `line_idx`.
    fn line_entry(&self, line_idx: usize, pos: usize) -> Result<usize> {
        let line = self
            .lines
            .get(line_idx)
            .ok_or_else(|| Error::out_of_range(IndexKind::Line, line_idx, self.lines.len()))?;
        line.get(pos)
            .copied()
            .ok_or_else(|| Error::out_of_range(IndexKind::LineEntry, pos, line.len()))
    }

    /// Return a new `Lines` with a midpoint inserted on every connection.
    ///
    /// Original points and connections occupy the low half of the result.
    /// Connection `i = (a, b)` becomes `(a, m)` and a new connection
    /// `nconnections + i = (m, b)` is added, where `m = npoints + i` is the
    /// midpoint. Each line index `i` expands to `[i, nconnections + i]`.
    /// Metadata is not carried over; `self` is left untouched.
    ///
    /// The result has exactly twice the point slots, so a graph with more
    /// connections than points runs out of midpoint slots and fails with
    /// [`Error::IndexOutOfRange`].
    pub fn subdivide(&self) -> Result<Self> {
        let npoints = self.points.len();
        let nconns = self.conns.len();
        let doubled_points = npoints.checked_mul(2).ok_or_else(|| {
            Error::InvalidArgument(format!("cannot double point capacity {npoints}"))
        })?;
        let doubled_conns = nconns.checked_mul(2).ok_or_else(|| {
            Error::InvalidArgument(format!("cannot double connection capacity {nconns}"))
        })?;
        let mut out = Self::zeroed(doubled_points, doubled_conns);

        out.points[..npoints].copy_from_slice(&self.points);
        out.conns[..nconns].copy_from_slice(&self.conns);

        let mut cmap: Vec<[usize; 2]> = Vec::with_capacity(nconns);
        for (i, conn) in self.conns.iter().enumerate() {
            let pa = self.point(conn.a)?;
            let pb = self.point(conn.b)?;
            let pid = npoints + i;
            let cid = nconns + i;

            let slot = out
                .points
                .get_mut(pid)
                .ok_or_else(|| Error::out_of_range(IndexKind::Point, pid, doubled_points))?;
            *slot = pa.midpoint(&pb);
            out.conns[i].b = pid;
            out.conns[cid] = Connection::new(pid, conn.b);
            cmap.push([i, cid]);
        }

        for line in &self.lines {
            let mut next = Line(SmallVec::with_capacity(line.len() * 2));
            for &c in line.iter() {
                let pair = cmap
                    .get(c)
                    .ok_or_else(|| Error::out_of_range(IndexKind::Connection, c, nconns))?;
                next.0.extend_from_slice(pair);
            }
            out.lines.push(next);
        }

        debug!(
            points = out.points.len(),
            connections = out.conns.len(),
            lines = out.lines.len(),
            "subdivided"
        );
        Ok(out)
    }

    /// Apply [`subdivide`](Self::subdivide) `times` times.
    pub fn subdivide_n(&self, times: u32) -> Result<Self> {
        let mut current = self.clone();
        for _ in 0..times {
            current = current.subdivide()?;
        }
        Ok(current)
    }

    /// Reserved for mapping every point onto one or more output points.
    ///
    /// How extra points and their connections would be numbered is not
    /// settled, so this always fails with [`Error::Unimplemented`] without
    /// calling `mapper`.
    pub fn transform<F>(&self, _mapper: F) -> Result<Self>
    where
        F: FnMut(usize, Point) -> Vec<Point>,
    {
        Err(Error::Unimplemented("transform"))
    }
}

/// Check that `index` addresses one of `len` points.
fn check_point(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::out_of_range(IndexKind::Point, index, len))
    }
}

impl fmt::Display for Lines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |i: usize| {
            self.points
                .get(i)
                .map_or_else(|| "?".to_string(), ToString::to_string)
        };
        for line in &self.lines {
            writeln!(f, "{RULE}")?;
            for &c in line.iter() {
                match self.conns.get(c) {
                    Some(conn) => writeln!(f, "{conn} => {} -> {}", show(conn.a), show(conn.b))?,
                    None => writeln!(f, "? => ? -> ?")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error,
        metric::{Count, Distance},
    };

    fn square() -> error::Result<Lines> {
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

    #[test]
    fn new_is_zeroed() -> error::Result<()> {
        let lines = Lines::new(3, 2)?;
        assert_eq!(lines.points(), &[Point::ZERO; 3]);
        assert_eq!(lines.point_metadata(), &[0.0; 3]);
        assert_eq!(lines.nconnections(), 2);
        assert!(lines.lines().is_empty());
        Ok(())
    }

    #[test]
    fn default_capacity() {
        let lines = Lines::default();
        assert_eq!(lines.npoints(), DEFAULT_POINTS);
        assert_eq!(lines.nconnections(), DEFAULT_CONNECTIONS);
    }

    #[test]
    fn connections_without_points() {
        assert!(matches!(
            Lines::new(0, 1),
            Err(Error::InvalidArgument(_))
        ));
        assert!(Lines::new(0, 0).is_ok());
    }

    #[test]
    fn setters_check_bounds() -> error::Result<()> {
        let mut lines = Lines::new(2, 1)?;
        assert_eq!(
            lines.set_point(2, (1.0, 1.0)),
            Err(Error::out_of_range(IndexKind::Point, 2, 2))
        );
        assert_eq!(
            lines.set_connection(0, 0, 5),
            Err(Error::out_of_range(IndexKind::Point, 5, 2))
        );
        assert_eq!(
            lines.set_connection(1, 0, 1),
            Err(Error::out_of_range(IndexKind::Connection, 1, 1))
        );
        Ok(())
    }

    #[test]
    fn from_parts_checks_endpoints() {
        let points = vec![Point::ZERO; 2];
        assert!(Lines::from_parts(points.clone(), vec![Connection::new(0, 1)]).is_ok());
        assert_eq!(
            Lines::from_parts(points, vec![Connection::new(0, 2)]),
            Err(Error::out_of_range(IndexKind::Point, 2, 2))
        );
    }

    #[test]
    fn add_line_does_not_validate() -> error::Result<()> {
        let mut lines = Lines::new(2, 1)?;
        assert_eq!(lines.add_line([0]), 0);
        assert_eq!(lines.add_line([42, 7]), 1);
        assert_eq!(lines.lines()[1].as_slice(), &[42, 7]);
        Ok(())
    }

    #[test]
    fn gen_metadata_square() -> error::Result<()> {
        let mut lines = square()?;
        lines.gen_metadata(&Count, 9.0, 0.0)?;
        assert_eq!(lines.point_metadata(), &[0.0, 1.0, 2.0, 3.0]);

        lines.gen_metadata(&Distance, 9.0, 0.0)?;
        assert_eq!(lines.point_metadata(), &[0.0, 1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn gen_metadata_untouched_points_keep_init() -> error::Result<()> {
        let mut lines = Lines::new(4, 1)?;
        lines.set_connection(0, 1, 2)?;
        lines.add_line([0]);
        lines.gen_metadata(&Count, 9.0, 0.0)?;
        assert_eq!(lines.point_metadata(), &[9.0, 0.0, 1.0, 9.0]);
        Ok(())
    }

    #[test]
    fn gen_metadata_bad_connection() -> error::Result<()> {
        let mut lines = square()?;
        lines.add_line([1, 9]);
        assert_eq!(
            lines.gen_metadata(&Count, 9.0, 0.0),
            Err(Error::out_of_range(IndexKind::Connection, 9, 4))
        );
        // First line ran before the failure.
        assert_eq!(lines.metadata(3)?, 3.0);
        Ok(())
    }

    #[test]
    fn gen_metadata_bad_endpoint() -> error::Result<()> {
        let mut lines = square()?;
        lines.connections_mut()[2] = Connection::new(2, 8);
        assert_eq!(
            lines.gen_metadata(&Count, 9.0, 0.0),
            Err(Error::out_of_range(IndexKind::Point, 8, 4))
        );
        Ok(())
    }

    #[test]
    fn gen_metadata_empty_line() -> error::Result<()> {
        let mut lines = square()?;
        lines.add_line([]);
        assert_eq!(
            lines.gen_metadata(&Count, 9.0, 0.0),
            Err(Error::out_of_range(IndexKind::LineEntry, 0, 0))
        );
        Ok(())
    }

    #[test]
    fn gen_metadata_closure() -> error::Result<()> {
        let mut lines = square()?;
        let double = |l: &Lines, c: Connection| -> error::Result<f64> {
            Ok(l.metadata(c.a)? * 2.0 + 1.0)
        };
        lines.gen_metadata(&double, 0.0, 0.0)?;
        assert_eq!(lines.point_metadata(), &[15.0, 1.0, 3.0, 7.0]);
        Ok(())
    }

    #[test]
    fn subdivide_square() -> error::Result<()> {
        let lines = square()?;
        let sub = lines.subdivide()?;
        assert_eq!(sub.npoints(), 8);
        assert_eq!(sub.nconnections(), 8);
        assert_eq!(sub.lines()[0].as_slice(), &[0, 4, 1, 5, 2, 6, 3, 7]);
        assert_eq!(sub.point(4)?, Point::new(0.0, 0.5));
        assert_eq!(sub.point(7)?, Point::new(0.5, 0.0));
        assert_eq!(sub.connection(0)?, Connection::new(0, 4));
        assert_eq!(sub.connection(4)?, Connection::new(4, 1));
        assert_eq!(sub.connection(7)?, Connection::new(7, 0));
        assert_eq!(sub.point_metadata(), &[0.0; 8]);
        Ok(())
    }

    #[test]
    fn subdivide_then_distance() -> error::Result<()> {
        let mut sub = square()?.subdivide()?;
        sub.gen_metadata(&Distance, 9.0, 0.0)?;
        assert_eq!(
            sub.point_metadata(),
            &[0.0, 1.0, 2.0, 3.0, 0.5, 1.5, 2.5, 3.5]
        );
        Ok(())
    }

    #[test]
    fn subdivide_more_connections_than_points() -> error::Result<()> {
        let mut lines = Lines::new(2, 3)?;
        lines.set_point(1, (4.0, 0.0))?;
        lines.set_connection(0, 0, 1)?;
        lines.set_connection(1, 1, 0)?;
        lines.set_connection(2, 0, 1)?;
        // Midpoints go to ids 2, 3, 4 but only 2 * 2 slots exist.
        assert_eq!(
            lines.subdivide(),
            Err(Error::out_of_range(IndexKind::Point, 4, 4))
        );
        Ok(())
    }

    #[test]
    fn subdivide_as_many_connections_as_points() -> error::Result<()> {
        let mut lines = Lines::new(2, 2)?;
        lines.set_point(1, (4.0, 0.0))?;
        lines.set_connection(0, 0, 1)?;
        lines.set_connection(1, 1, 0)?;
        let sub = lines.subdivide()?;
        assert_eq!(sub.npoints(), 4);
        assert_eq!(sub.point(3)?, Point::new(2.0, 0.0));
        Ok(())
    }

    #[test]
    fn subdivide_bad_line_entry() -> error::Result<()> {
        let mut lines = square()?;
        lines.add_line([4]);
        assert_eq!(
            lines.subdivide(),
            Err(Error::out_of_range(IndexKind::Connection, 4, 4))
        );
        Ok(())
    }

    #[test]
    fn subdivide_n_zero_is_copy() -> error::Result<()> {
        let lines = square()?;
        assert_eq!(lines.subdivide_n(0)?, lines);
        assert_eq!(lines.subdivide_n(2)?.nconnections(), 16);
        Ok(())
    }

    #[test]
    fn transform_is_unimplemented() -> error::Result<()> {
        let lines = square()?;
        let mut calls = 0;
        let res = lines.transform(|_, p| {
            calls += 1;
            vec![p]
        });
        assert_eq!(res, Err(Error::Unimplemented("transform")));
        assert_eq!(calls, 0);
        Ok(())
    }

    #[test]
    fn display() -> error::Result<()> {
        let mut lines = Lines::new(2, 1)?;
        lines.set_point(1, (2.0, 0.0))?;
        lines.set_connection(0, 0, 1)?;
        lines.add_line([0]);
        lines.add_line([3]);
        let expected = format!("{RULE}\n(0, 1) => (0, 0) -> (2, 0)\n{RULE}\n? => ? -> ?\n");
        assert_eq!(lines.to_string(), expected);
        Ok(())
    }
}
