use std::fmt::Display;

use kiddo::distance_metric::DistanceMetric;
use kiddo::SquaredEuclidean;

use crate::error::{Result, TspError};

/// An input point. `index` is its position in the input and is what gets
/// reported in the tour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
  pub index: usize,
  pub x: i64,
  pub y: i64,
}

impl Point {
  pub fn new(index: usize, x: i64, y: i64) -> Point {
    Point { index, x, y }
  }

  /// Squared distance from the origin. Kept in integers so segment sorting
  /// never sees rounding.
  pub fn origin_key(&self) -> i128 {
    let (x, y) = (self.x as i128, self.y as i128);
    x * x + y * y
  }

  pub fn distance_to(&self, other: &Point) -> f64 {
    SquaredEuclidean::dist(&[self.x as f64, self.y as f64], &[other.x as f64, other.y as f64]).sqrt()
  }
}

impl Display for Point {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Point({}, {}, {})", self.index, self.x, self.y)
  }
}

/// Translates the points so the smallest x and the smallest y both become 0,
/// putting every point in the first quadrant. Returns the `(min_x, min_y)`
/// offsets that were subtracted.
pub fn normalize(points: &mut [Point]) -> Result<(i64, i64)> {
  let min_x = points.iter().map(|p| p.x).min().ok_or(TspError::EmptyInput)?;
  let min_y = points.iter().map(|p| p.y).min().ok_or(TspError::EmptyInput)?;

  for p in points.iter_mut() {
    p.x -= min_x;
    p.y -= min_y;
  }
  Ok((min_x, min_y))
}
