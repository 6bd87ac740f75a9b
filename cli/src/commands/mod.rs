pub mod clean;
pub mod scan;

use dupvert::{Metric, ScanOptions};

use crate::cli::{MatchArgs, MetricArg};

impl From<&MatchArgs> for ScanOptions {
    fn from(args: &MatchArgs) -> Self {
        let metric = match args.metric {
            MetricArg::Euclidean => Metric::Euclidean,
            MetricArg::PerAxis => Metric::PerAxis,
        };
        ScanOptions::with_tolerance(args.tolerance).metric(metric)
    }
}
