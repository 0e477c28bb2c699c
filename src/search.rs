use std::time::Instant;

use crate::{
    error::{Result, TspError},
    params::Params,
    point::Point,
    segment::segment_method_path,
    tour::Tour,
    tsp_instance::TspInstance,
};

/// How the segment count is chosen for an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Try the search grid in order, stopping once a candidate gets longer
    Search,
    /// Build a single tour with an estimated segment count
    Estimate(usize),
}

impl Strategy {
    pub fn for_size(n_points: usize, params: &Params) -> Result<Strategy> {
        if n_points < params.size_threshold {
            Ok(Strategy::Search)
        } else {
            Ok(Strategy::Estimate(params.estimate_segments(n_points)?))
        }
    }
}

/// A segment count that was tried and the length it produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub n_segments: usize,
    pub length: f64,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub tour: Tour,
    /// Segment count that produced `tour`
    pub n_segments: usize,
    pub strategy: Strategy,
    /// Every segment count evaluated, in order
    pub candidates: Vec<Candidate>,
}

/// Picks a segment count for the radial segment heuristic and builds the tour.
pub struct SegmentSearch {
    params: Params,
}

impl SegmentSearch {
    pub fn new(params: Params) -> Result<SegmentSearch> {
        params.validate()?;
        Ok(SegmentSearch { params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Normalizes the instance and solves it.
    pub fn solve(&self, instance: &mut TspInstance) -> Result<Solution> {
        instance.normalize()?;
        let solution = self.run(&instance.points)?;
        log::info!(
            "Solved {} ({} points) in {:.3?}",
            instance.instance_name,
            instance.n_points(),
            instance.start_time.elapsed()
        );
        Ok(solution)
    }

    /// Builds the shortest tour the strategy finds for `points`, which must
    /// already be normalized.
    pub fn run(&self, points: &[Point]) -> Result<Solution> {
        if points.is_empty() {
            return Err(TspError::EmptyInput);
        }

        let strategy = Strategy::for_size(points.len(), &self.params)?;
        log::info!("Using {:?} for {} points", strategy, points.len());

        let solution = match strategy {
            Strategy::Search => self.search(points),
            Strategy::Estimate(n_segments) => self.estimate(points, n_segments),
        }?;

        log::info!(
            "Best tour: {} segments, length {:.3}",
            solution.n_segments,
            solution.tour.length
        );
        Ok(solution)
    }

    /// Walks the search grid. Stops at the first candidate strictly longer
    /// than the best so far; a tie replaces the best and the walk continues.
    /// This assumes length is unimodal in the segment count, which is a
    /// heuristic rather than a guarantee.
    fn search(&self, points: &[Point]) -> Result<Solution> {
        let start = Instant::now();
        let mut best: Option<(Tour, usize)> = None;
        let mut candidates = Vec::with_capacity(self.params.search_grid.len());

        for &n_segments in self.params.search_grid.iter() {
            let tour = Tour::new(points, segment_method_path(points, n_segments)?);
            log::debug!("{} segments: length {:.3}", n_segments, tour.length);
            candidates.push(Candidate { n_segments, length: tour.length });

            if let Some((best_tour, _)) = &best {
                if tour.objective() > best_tour.objective() {
                    log::debug!(
                        "Stopping search at {} segments ({:.3} > {:.3})",
                        n_segments,
                        tour.length,
                        best_tour.length
                    );
                    break;
                }
            }
            best = Some((tour, n_segments));
        }
        log::debug!("Search took {:.3?}", start.elapsed());

        // Grid is non-empty after validation
        let (tour, n_segments) = best.ok_or_else(|| TspError::invalid_params("search grid is empty"))?;
        Ok(Solution { tour, n_segments, strategy: Strategy::Search, candidates })
    }

    fn estimate(&self, points: &[Point], n_segments: usize) -> Result<Solution> {
        let tour = Tour::new(points, segment_method_path(points, n_segments)?);
        Ok(Solution {
            candidates: vec![Candidate { n_segments, length: tour.length }],
            tour,
            n_segments,
            strategy: Strategy::Estimate(n_segments),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_points(side: i64) -> Vec<Point> {
        (0..side)
            .flat_map(|x| (0..side).map(move |y| (x, y)))
            .enumerate()
            .map(|(i, (x, y))| Point::new(i, x, y))
            .collect()
    }

    #[test]
    fn strategy_switches_at_threshold() {
        let params = Params::default();
        assert_eq!(Strategy::for_size(1, &params).unwrap(), Strategy::Search);
        assert_eq!(Strategy::for_size(299, &params).unwrap(), Strategy::Search);
        assert_eq!(Strategy::for_size(300, &params).unwrap(), Strategy::Estimate(14));
        assert_eq!(Strategy::for_size(500, &params).unwrap(), Strategy::Estimate(16));
    }

    #[test]
    fn empty_points_are_rejected() {
        let search = SegmentSearch::new(Params::default()).unwrap();
        assert!(matches!(search.run(&[]), Err(TspError::EmptyInput)));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let mut params = Params::default();
        params.search_grid = vec![0];
        assert!(SegmentSearch::new(params).is_err());
    }

    #[test]
    fn oversized_estimate_is_an_error() {
        let mut params = Params::default();
        params.size_threshold = 1;
        params.large_step = crate::params::MAX_SEGMENTS;
        params.large_divisor = 1;
        let search = SegmentSearch::new(params).unwrap();
        assert!(matches!(search.run(&grid_points(3)), Err(TspError::InvalidParams(_))));
    }

    #[test]
    fn best_is_no_longer_than_any_candidate() {
        let points = grid_points(12);
        let search = SegmentSearch::new(Params::default()).unwrap();
        let solution = search.run(&points).unwrap();

        assert_eq!(solution.strategy, Strategy::Search);
        assert!(!solution.candidates.is_empty());
        for c in &solution.candidates {
            assert!(solution.tour.length <= c.length);
        }
        assert!(solution.tour.is_complete(points.len()));
    }

    #[test]
    fn search_stops_after_first_longer_candidate() {
        let points = grid_points(9);
        let search = SegmentSearch::new(Params::default()).unwrap();
        let solution = search.run(&points).unwrap();

        let lengths: Vec<f64> = solution.candidates.iter().map(|c| c.length).collect();
        // Everything before the last candidate is non-increasing
        for pair in lengths[..lengths.len() - 1].windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        if lengths.len() < search.params().search_grid.len() {
            let last = lengths[lengths.len() - 1];
            assert!(last > solution.tour.length);
        }
    }

    #[test]
    fn estimate_builds_one_tour() {
        let points = grid_points(18); // 324 points
        let search = SegmentSearch::new(Params::default()).unwrap();
        let solution = search.run(&points).unwrap();

        assert_eq!(solution.strategy, Strategy::Estimate(14));
        assert_eq!(solution.n_segments, 14);
        assert_eq!(solution.candidates.len(), 1);
        assert!(solution.tour.is_complete(points.len()));
    }

    #[test]
    fn custom_threshold_forces_estimate() {
        let mut params = Params::default();
        params.size_threshold = 1;
        params.large_base = 3;
        let search = SegmentSearch::new(params).unwrap();
        let solution = search.run(&grid_points(4)).unwrap();
        // (16 - 1) / 200 rounds to 0
        assert_eq!(solution.n_segments, 3);
    }
}
