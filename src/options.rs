use anyhow::Result;
use vertexdup::{Metric, ToleranceError};

/// How batch detection matches vertices.
///
/// A tolerance of `0.0` selects exact matching; anything larger selects the
/// tolerance detector with `metric`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanOptions {
    pub tolerance: f64,
    pub metric: Metric,
}

impl ScanOptions {
    /// Exact matching.
    pub fn exact() -> Self { Self::default() }

    /// Tolerance matching with the Euclidean metric.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance, metric: Metric::Euclidean }
    }

    pub fn metric(self, metric: Metric) -> Self { Self { metric, ..self } }

    /// Returns `true` when the options select exact matching.
    #[inline] pub fn is_exact(&self) -> bool { self.tolerance == 0.0 }

    /// Reject a negative or non-finite tolerance.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ToleranceError::Invalid(self.tolerance).into());
        }
        Ok(())
    }
}
