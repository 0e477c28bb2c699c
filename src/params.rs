use std::fmt::Display;

use lazy_static::lazy_static;

use crate::error::{Result, TspError};

/// Upper bound on any segment count, searched or estimated.
pub const MAX_SEGMENTS: usize = 1 << 16;

lazy_static! {
  pub static ref DEFAULT_PARAMS: Params = Params {
    // Inputs below this size search the grid, the rest use the formula
    size_threshold: 300,

    // Even segment counts 2..=20
    search_grid: (2..=20).step_by(2).collect(),

    // Large inputs: base + step * round((n - size_threshold) / divisor).
    // Tuned empirically; treat as knobs.
    large_base: 14,
    large_step: 2,
    large_divisor: 200,
  };
}

/// Segment-count selection parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    /// Point count at which the solver stops searching and estimates the
    /// segment count directly
    pub size_threshold: usize,

    /// Candidate segment counts tried, in order, for small inputs
    pub search_grid: Vec<usize>,

    /// Linear coefficients of the large-input estimate
    pub large_base: usize,
    pub large_step: usize,
    pub large_divisor: usize,
}

impl Params {
    /// Rejects configurations that could produce zero segments, or more
    /// than `MAX_SEGMENTS`.
    pub fn validate(&self) -> Result<()> {
        if self.search_grid.is_empty() {
            return Err(TspError::invalid_params("search grid is empty"));
        }
        if self.search_grid.contains(&0) {
            return Err(TspError::invalid_params(
                "search grid contains a zero segment count",
            ));
        }
        if self.large_divisor == 0 {
            return Err(TspError::invalid_params("large-mode divisor is zero"));
        }
        if self.large_base == 0 {
            return Err(TspError::invalid_params(
                "large-mode base segment count is zero",
            ));
        }
        if let Some(&n) = self.search_grid.iter().find(|&&n| n > MAX_SEGMENTS) {
            return Err(TspError::invalid_params(format!(
                "search grid segment count {} exceeds {}",
                n, MAX_SEGMENTS
            )));
        }
        if self.large_base > MAX_SEGMENTS || self.large_step > MAX_SEGMENTS {
            return Err(TspError::invalid_params(format!(
                "large-mode base and step must not exceed {}",
                MAX_SEGMENTS
            )));
        }
        Ok(())
    }

    /// Segment count for an input of `n_points >= size_threshold`.
    ///
    /// Rounds half to even, so 400 points (0.5 steps past the default
    /// threshold) still get the base count. Fails if the count would exceed
    /// `MAX_SEGMENTS`.
    pub fn estimate_segments(&self, n_points: usize) -> Result<usize> {
        let excess = n_points.saturating_sub(self.size_threshold) as f64;
        let steps = (excess / self.large_divisor as f64).round_ties_even() as usize;
        self.large_step
            .checked_mul(steps)
            .and_then(|grown| grown.checked_add(self.large_base))
            .filter(|&n| n <= MAX_SEGMENTS)
            .ok_or_else(|| {
                TspError::invalid_params(format!(
                    "estimated segment count for {} points exceeds {}",
                    n_points, MAX_SEGMENTS
                ))
            })
    }
}

impl Default for Params {
    fn default() -> Self {
        DEFAULT_PARAMS.clone()
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== Segment Search Parameters =====")?;
        writeln!(
            f,
            "\t - size_threshold (search below, estimate at or above): {}",
            self.size_threshold
        )?;
        writeln!(f, "\t - search_grid (candidate segment counts): {:?}", self.search_grid)?;
        write!(
            f,
            "\t - large mode (segments = {} + {} * round((n - {}) / {}))",
            self.large_base, self.large_step, self.size_threshold, self.large_divisor
        )
    }
}
