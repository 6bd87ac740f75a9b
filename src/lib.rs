#![doc = "Duplicate vertex detection and cleaning for GeoJSON features"]
mod batch;
mod common;
mod feature;
mod options;

#[doc(inline)]
pub use vertexdup::{
    collapse, collapse_consecutive, find_duplicates, find_duplicates_with, find_exact_duplicates,
    find_tolerance_duplicates, find_tolerance_duplicates_with, flatten, open_vertices, CollapseError,
    CollapseRepeated, CoordKey, DuplicateSet, IndexedCoordinate, Metric, ToleranceError, Vertices,
};

#[doc(inline)]
pub use batch::{clean_features, scan_features, CleanReport, FeatureDuplicates, ScanReport, SkippedFeature, Summary};

#[doc(inline)]
pub use common::{
    geometry_type, read_features, read_features_from_path, shape_to_geojson, write_features,
    write_features_to_path, write_json_to_path,
};

#[doc(inline)]
pub use feature::{Feature, Shape};

#[doc(inline)]
pub use options::ScanOptions;
