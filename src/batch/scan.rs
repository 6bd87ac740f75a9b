use anyhow::Result;
use geo::Coord;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use vertexdup::{find_duplicates_with, DuplicateSet};

use crate::batch::Summary;
use crate::common::geometry_type;
use crate::feature::Feature;
use crate::options::ScanOptions;

/// Duplicate vertices found in one feature.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureDuplicates {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry_type: &'static str,
    /// Number of distinct duplicate coordinates.
    pub duplicate_count: usize,
    pub duplicate_coordinates: Vec<[f64; 2]>,
    pub properties: Map<String, Value>,
}

impl FeatureDuplicates {
    pub(crate) fn new(feature: &Feature, geometry_type: &'static str, duplicates: &DuplicateSet) -> Self {
        Self {
            index: feature.index,
            id: feature.id.clone(),
            geometry_type,
            duplicate_count: duplicates.len(),
            duplicate_coordinates: duplicates.iter().map(|Coord { x, y }| [x, y]).collect(),
            properties: feature.properties.clone(),
        }
    }
}

/// A feature left out of a batch, and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SkippedFeature {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub reason: String,
}

impl SkippedFeature {
    pub(crate) fn new(feature: &Feature, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::warn!(index = feature.index, reason = %reason, "skipping feature");
        Self { index: feature.index, id: feature.id.clone(), reason }
    }
}

/// Result of scanning a batch of features for duplicate vertices.
#[derive(Clone, Debug, Serialize)]
pub struct ScanReport {
    pub tolerance: f64,
    pub metric: String,
    pub summary: Summary,
    /// Features with at least one duplicate, in input order.
    pub features: Vec<FeatureDuplicates>,
    pub skipped: Vec<SkippedFeature>,
}

/// Detect duplicate vertices in every feature.
///
/// Features are processed in parallel and independently: a feature without a
/// usable geometry is logged and listed in `skipped` while the rest of the
/// batch carries on. Only invalid `options` fail the whole call.
pub fn scan_features(features: &[Feature], options: &ScanOptions) -> Result<ScanReport> {
    options.validate()?;

    let outcomes = features.par_iter()
        .map(|feature| scan_feature(feature, options))
        .collect::<Vec<_>>();

    let mut found = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(Some(duplicates)) => found.push(duplicates),
            Ok(None) => {}
            Err(skip) => skipped.push(skip),
        }
    }

    let summary = Summary::from_counts(features.len(), found.iter().map(|f| f.duplicate_count));
    tracing::info!(
        features = features.len(),
        with_duplicates = summary.features_with_duplicates,
        skipped = skipped.len(),
        "scan complete"
    );

    Ok(ScanReport {
        tolerance: options.tolerance,
        metric: if options.is_exact() { "exact".to_string() } else { options.metric.to_string() },
        summary,
        features: found,
        skipped,
    })
}

fn scan_feature(feature: &Feature, options: &ScanOptions) -> Result<Option<FeatureDuplicates>, SkippedFeature> {
    let shape = feature.shape.as_ref().map_err(|reason| SkippedFeature::new(feature, reason.as_str()))?;

    let duplicates = find_duplicates_with(&shape.geometry, options.tolerance, options.metric)
        .map_err(|e| SkippedFeature::new(feature, e.to_string()))?;

    if duplicates.is_empty() { return Ok(None) }

    tracing::debug!(index = feature.index, count = duplicates.len(), "duplicate vertices");
    Ok(Some(FeatureDuplicates::new(feature, geometry_type(&shape.geometry), &duplicates)))
}
