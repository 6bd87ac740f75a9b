use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use vertexdup::{collapse, find_duplicates_with, Vertices};

use crate::batch::{FeatureDuplicates, SkippedFeature, Summary};
use crate::common::geometry_type;
use crate::feature::Feature;
use crate::options::ScanOptions;

/// Result of cleaning a batch of features.
///
/// `residual` lists the cleaned features, re-scanned with the same options used
/// for cleaning, that still carry duplicates. `summary` counts them against
/// every input feature, skipped ones included.
#[derive(Clone, Debug, Serialize)]
pub struct CleanReport {
    /// Cleaned features in input order; skipped features are omitted.
    #[serde(skip)]
    pub features: Vec<Feature>,
    /// Logical vertices removed, ring closures excluded. Collapse keeps every
    /// closure, so this also equals the number of stored coordinates removed.
    pub removed_vertices: usize,
    pub summary: Summary,
    pub residual: Vec<FeatureDuplicates>,
    pub skipped: Vec<SkippedFeature>,
}

struct Cleaned {
    feature: Feature,
    removed: usize,
    residual: Option<FeatureDuplicates>,
}

/// Remove consecutive repeated vertices from every feature, then re-scan the
/// cleaned geometries for remaining duplicates.
///
/// A feature whose geometry is missing, or would collapse into an invalid line
/// or ring, is logged and skipped; it does not stop the batch.
pub fn clean_features(features: &[Feature], options: &ScanOptions) -> Result<CleanReport> {
    options.validate()?;

    let outcomes = features.par_iter()
        .map(|feature| clean_feature(feature, options))
        .collect::<Vec<_>>();

    let mut report = CleanReport {
        features: Vec::with_capacity(features.len()),
        removed_vertices: 0,
        summary: Summary::default(),
        residual: Vec::new(),
        skipped: Vec::new(),
    };

    for outcome in outcomes {
        match outcome {
            Ok(cleaned) => {
                report.removed_vertices += cleaned.removed;
                report.residual.extend(cleaned.residual);
                report.features.push(cleaned.feature);
            }
            Err(skip) => report.skipped.push(skip),
        }
    }

    report.summary = Summary::from_counts(
        features.len(),
        report.residual.iter().map(|f| f.duplicate_count),
    );
    tracing::info!(
        cleaned = report.features.len(),
        removed_vertices = report.removed_vertices,
        skipped = report.skipped.len(),
        "clean complete"
    );

    Ok(report)
}

fn clean_feature(feature: &Feature, options: &ScanOptions) -> Result<Cleaned, SkippedFeature> {
    let shape = feature.shape.as_ref().map_err(|reason| SkippedFeature::new(feature, reason.as_str()))?;

    let geometry = collapse(&shape.geometry)
        .map_err(|e| SkippedFeature::new(feature, e.to_string()))?;
    let removed = shape.geometry.vertices().len().saturating_sub(geometry.vertices().len());

    let duplicates = find_duplicates_with(&geometry, options.tolerance, options.metric)
        .map_err(|e| SkippedFeature::new(feature, e.to_string()))?;
    let residual = (!duplicates.is_empty())
        .then(|| FeatureDuplicates::new(feature, geometry_type(&geometry), &duplicates));

    Ok(Cleaned {
        feature: feature.with_shape(shape.replace_geometry(geometry)),
        removed,
        residual,
    })
}
