//! Approximate planar Euclidean TSP tours by radial segmentation.
//!
//! Points are shifted into the first quadrant, cut into angular segments
//! around the origin, and each segment is walked by distance from the origin,
//! alternating outward and inward. The number of segments is searched for
//! small inputs and estimated from the input size for large ones.

pub mod error;
pub mod params;
pub mod point;
pub mod search;
pub mod segment;
pub mod tour;
pub mod tsp_instance;

pub use error::{Result, TspError};
pub use params::{Params, DEFAULT_PARAMS};
pub use point::Point;
pub use search::{Candidate, SegmentSearch, Solution, Strategy};
pub use tour::Tour;
pub use tsp_instance::TspInstance;
