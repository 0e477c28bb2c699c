use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use ordered_float::OrderedFloat;

use crate::point::Point;

pub type F64 = OrderedFloat<f64>;

/// Total Euclidean length of walking `route` (positions into `points`) in
/// order. A closed route already repeats its first point, so no wrap-around
/// leg is added.
pub fn path_distance(points: &[Point], route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|leg| points[leg[0]].distance_to(&points[leg[1]]))
        .sum()
}

/// A tour through an instance's points, stored as positions into the point
/// slice it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Visiting order; closed tours end with their first position
    pub route: Vec<usize>,
    /// Total distance travelled
    pub length: f64,
}

impl Tour {
    /// Wraps a route and evaluates its length.
    pub fn new(points: &[Point], route: Vec<usize>) -> Tour {
        let length = path_distance(points, &route);
        Tour { route, length }
    }

    pub fn objective(&self) -> F64 {
        OrderedFloat(self.length)
    }

    pub fn is_closed(&self) -> bool {
        self.route.len() >= 2 && self.route.first() == self.route.last()
    }

    /// True if the tour is closed and its open part visits each of
    /// `n_points` positions exactly once.
    pub fn is_complete(&self, n_points: usize) -> bool {
        if !self.is_closed() || self.route.len() != n_points + 1 {
            return false;
        }
        let mut seen = vec![false; n_points];
        for &pos in &self.route[..n_points] {
            if pos >= n_points || seen[pos] {
                return false;
            }
            seen[pos] = true;
        }
        true
    }

    /// Input indices in visiting order.
    pub fn indices<'a>(&'a self, points: &'a [Point]) -> impl Iterator<Item = usize> + 'a {
        self.route.iter().map(move |&pos| points[pos].index)
    }

    /// Writes one input index per line, then the tour length. The length is
    /// printed at full `f64` round-trip precision (`3.414213562373095`), not
    /// rounded to six significant digits.
    pub fn write_solution(&self, points: &[Point], mut w: impl Write) -> io::Result<()> {
        for index in self.indices(points) {
            writeln!(w, "{}", index)?;
        }
        writeln!(w, "{}", self.length)
    }

    pub fn save_solution(&self, points: &[Point], file_name: impl AsRef<Path>) -> io::Result<()> {
        let file_name = file_name.as_ref();
        log::info!("Solution file: {}", file_name.display());
        let f = fs::File::create(file_name)?;
        let mut w = io::BufWriter::new(f);
        self.write_solution(points, &mut w)?;
        w.flush()
    }
}
