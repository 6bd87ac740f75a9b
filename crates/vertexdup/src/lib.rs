//! Duplicate vertex analysis for `geo` geometries.
//!
//! Four independent pieces, usually run as a pipeline:
//!
//! * [`walk`] flattens a geometry into indexed vertices, dropping ring closures.
//! * [`exact`] finds coordinates that repeat bit-for-bit.
//! * [`tolerance`] finds coordinates within a distance of one another.
//! * [`collapse`] removes consecutive repeated vertices along lines and rings.
//!
//! Every function is pure: inputs are borrowed, outputs are freshly allocated.

pub mod collapse;
pub mod error;
pub mod exact;
pub mod set;
pub mod tolerance;
pub mod walk;

pub use collapse::{collapse, collapse_consecutive, CollapseRepeated};
pub use error::{CollapseError, ToleranceError};
pub use exact::find_exact_duplicates;
pub use set::{CoordKey, DuplicateSet};
pub use tolerance::{find_tolerance_duplicates, find_tolerance_duplicates_with, Metric};
pub use walk::{flatten, open_vertices, IndexedCoordinate, Vertices};

use geo::Geometry;

/// Find duplicate vertices, picking the strategy from `tolerance`:
/// `0.0` selects exact matching, anything else the Euclidean tolerance match.
pub fn find_duplicates(geometry: &Geometry<f64>, tolerance: f64) -> Result<DuplicateSet, ToleranceError> {
    find_duplicates_with(geometry, tolerance, Metric::Euclidean)
}

/// Like [`find_duplicates`], with an explicit distance metric for the tolerance case.
pub fn find_duplicates_with(
    geometry: &Geometry<f64>,
    tolerance: f64,
    metric: Metric,
) -> Result<DuplicateSet, ToleranceError> {
    if tolerance == 0.0 {
        Ok(find_exact_duplicates(geometry))
    } else {
        find_tolerance_duplicates_with(geometry, tolerance, metric)
    }
}
