//! Radial segmentation of the first quadrant.
//!
//! The quadrant is cut into `n` equal angular segments around the origin.
//! Each segment is sorted by distance from the origin, alternating ascending
//! and descending, so the concatenation sweeps out and back like a zigzag.

use std::f64::consts::PI;

use crate::error::{Result, TspError};
use crate::point::Point;

/// A point position paired with its squared distance from the origin. Built
/// fresh for every segmentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyedPoint {
  /// Position in the point slice that was segmented
  pub pos: usize,
  pub key: i128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentOrder {
  Ascending,
  Descending,
}

/// Even segments run outward, odd segments run back in.
pub fn segment_order(segment: usize) -> SegmentOrder {
  if segment % 2 == 0 {
    SegmentOrder::Ascending
  } else {
    SegmentOrder::Descending
  }
}

/// Which of `n_segments` angular segments a normalized point falls in.
///
/// Points on the y axis go to the last segment. The angle is scaled from
/// `[0, pi/2)` onto `[0, n_segments)`; anything landing outside that range
/// through rounding is clamped to the last segment. `n_segments` must be at
/// least 1.
pub fn segment_index(p: &Point, n_segments: usize) -> usize {
  debug_assert!(n_segments > 0, "segment count must be at least 1");
  let last = n_segments.saturating_sub(1);
  if p.x == 0 {
    return last;
  }
  // The diagonal sits exactly at n/2, which f64 atan can undershoot
  if p.y == p.x {
    return (n_segments / 2).min(last);
  }

  let angle = (p.y as f64 / p.x as f64).atan();
  let segment = (angle * 2.0 * n_segments as f64 / PI).floor();
  if segment < 0.0 || segment > last as f64 {
    log::trace!("Clamping {} from segment {} to {}", p, segment, last);
    return last;
  }
  segment as usize
}

/// Buckets the points into `n_segments` segments, keeping input order within
/// each segment. Segments may be empty.
pub fn fill_segments(points: &[Point], n_segments: usize) -> Result<Vec<Vec<KeyedPoint>>> {
  if n_segments == 0 {
    return Err(TspError::invalid_params("segment count must be at least 1"));
  }
  let mut segments = vec![Vec::new(); n_segments];
  for (pos, p) in points.iter().enumerate() {
    segments[segment_index(p, n_segments)].push(KeyedPoint { pos, key: p.origin_key() });
  }
  Ok(segments)
}

/// Sorts each segment in its zigzag order and joins them into a closed path
/// of point positions. Returns an empty path if every segment is empty.
pub fn path_from_segments(mut segments: Vec<Vec<KeyedPoint>>) -> Vec<usize> {
  let n_points = segments.iter().map(Vec::len).sum::<usize>();
  let mut path = Vec::with_capacity(n_points + 1);

  for (i, segment) in segments.iter_mut().enumerate() {
    // Stable, so equal keys keep input order
    match segment_order(i) {
      SegmentOrder::Ascending => segment.sort_by(|a, b| a.key.cmp(&b.key)),
      SegmentOrder::Descending => segment.sort_by(|a, b| b.key.cmp(&a.key)),
    }
    path.extend(segment.iter().map(|kp| kp.pos));
  }

  // Make into a loop
  if let Some(&first) = path.first() {
    path.push(first);
  }
  path
}

/// Builds a closed path through `points` using `n_segments` segments.
/// `points` must be normalized.
pub fn segment_method_path(points: &[Point], n_segments: usize) -> Result<Vec<usize>> {
  Ok(path_from_segments(fill_segments(points, n_segments)?))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pt(x: i64, y: i64) -> Point {
    Point::new(0, x, y)
  }

  #[test]
  fn order_alternates_by_parity() {
    assert_eq!(segment_order(0), SegmentOrder::Ascending);
    assert_eq!(segment_order(1), SegmentOrder::Descending);
    assert_eq!(segment_order(2), SegmentOrder::Ascending);
    assert_eq!(segment_order(7), SegmentOrder::Descending);
  }

  #[test]
  fn y_axis_goes_to_last_segment() {
    for n in 1..=20 {
      assert_eq!(segment_index(&pt(0, 5), n), n - 1);
      assert_eq!(segment_index(&pt(0, 0), n), n - 1);
    }
  }

  #[test]
  fn x_axis_goes_to_first_segment() {
    for n in 1..=20 {
      assert_eq!(segment_index(&pt(7, 0), n), 0);
    }
  }

  #[test]
  fn diagonal_splits_two_segments() {
    // atan(1) = pi/4, exactly the boundary between the two halves
    assert_eq!(segment_index(&pt(3, 3), 2), 1);
    assert_eq!(segment_index(&pt(3, 2), 2), 0);
    assert_eq!(segment_index(&pt(2, 3), 2), 1);
  }

  #[test]
  fn diagonal_lands_on_half_for_every_count() {
    for n in 1..=64 {
      for d in [1, 7, 1_000, i32::MAX as i64] {
        assert_eq!(segment_index(&pt(d, d), n), n / 2, "n = {}, d = {}", n, d);
      }
    }
    // Counts the size estimate produces around 1000 and 2000 points
    assert_eq!(segment_index(&pt(7, 7), 22), 11);
    assert_eq!(segment_index(&pt(7, 7), 30), 15);
  }

  #[test]
  fn near_diagonal_stays_either_side() {
    // Just below and just above the diagonal for an even count
    assert_eq!(segment_index(&pt(1_000, 999), 22), 10);
    assert_eq!(segment_index(&pt(999, 1_000), 22), 11);
  }

  #[test]
  fn zero_segments_is_an_error() {
    assert!(matches!(fill_segments(&[pt(1, 2)], 0), Err(TspError::InvalidParams(_))));
    assert!(matches!(segment_method_path(&[pt(1, 2)], 0), Err(TspError::InvalidParams(_))));
  }

  #[test]
  fn steep_points_stay_in_range() {
    let steep = pt(1, i32::MAX as i64);
    for n in [1, 2, 20, 1_000, 1_000_000] {
      assert!(segment_index(&steep, n) < n);
    }
  }

  #[test]
  fn every_point_lands_in_one_segment() {
    let points: Vec<Point> = (0..10)
      .flat_map(|x| (0..10).map(move |y| (x, y)))
      .enumerate()
      .map(|(i, (x, y))| Point::new(i, x, y))
      .collect();

    for n in [1, 3, 4, 9] {
      let segments = fill_segments(&points, n).unwrap();
      assert_eq!(segments.len(), n);
      let mut seen: Vec<usize> = segments.iter().flatten().map(|kp| kp.pos).collect();
      seen.sort_unstable();
      assert_eq!(seen, (0..points.len()).collect::<Vec<_>>());
    }
  }

  #[test]
  fn segments_zigzag_by_distance() {
    let points = vec![
      Point::new(0, 5, 1),
      Point::new(1, 1, 0),
      Point::new(2, 3, 1),
      Point::new(3, 1, 4),
      Point::new(4, 1, 2),
    ];
    let path = segment_method_path(&points, 2).unwrap();
    // segment 0 ascending: 1, 2, 0; segment 1 descending: 3, 4
    assert_eq!(path, vec![1, 2, 0, 3, 4, 1]);
  }

  #[test]
  fn equal_keys_keep_input_order() {
    let points = vec![Point::new(0, 0, 5), Point::new(1, 0, 3), Point::new(2, 0, 5)];
    // single segment, ascending
    assert_eq!(segment_method_path(&points, 1).unwrap(), vec![1, 0, 2, 1]);
    // all in segment 1 of 2, descending
    assert_eq!(segment_method_path(&points, 2).unwrap(), vec![0, 2, 1, 0]);
  }

  #[test]
  fn no_points_no_path() {
    assert!(path_from_segments(vec![Vec::new(); 4]).is_empty());
    assert!(segment_method_path(&[], 3).unwrap().is_empty());
  }

  #[test]
  fn single_point_loops_to_itself() {
    assert_eq!(segment_method_path(&[pt(4, 4)], 6).unwrap(), vec![0, 0]);
  }
}
