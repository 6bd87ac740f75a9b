mod clean;
mod scan;
mod summary;

pub use clean::{clean_features, CleanReport};
pub use scan::{scan_features, FeatureDuplicates, ScanReport, SkippedFeature};
pub use summary::Summary;
