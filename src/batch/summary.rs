use std::fmt;

use serde::Serialize;

/// Aggregate duplicate statistics over a batch of features.
///
/// `max_duplicates` and `min_duplicates` range over the features that have at
/// least one duplicate; both are 0 when no feature does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_features: usize,
    pub features_with_duplicates: usize,
    pub total_duplicate_vertices: usize,
    pub percentage_with_duplicates: f64,
    pub max_duplicates: usize,
    pub min_duplicates: usize,
}

impl Summary {
    /// Summarize `total_features` features given the duplicate count of each
    /// feature found to have duplicates.
    pub fn from_counts(total_features: usize, counts: impl IntoIterator<Item = usize>) -> Self {
        let mut summary = Self { total_features, min_duplicates: usize::MAX, ..Self::default() };

        for count in counts.into_iter().filter(|&count| count > 0) {
            summary.features_with_duplicates += 1;
            summary.total_duplicate_vertices += count;
            summary.max_duplicates = summary.max_duplicates.max(count);
            summary.min_duplicates = summary.min_duplicates.min(count);
        }

        if summary.features_with_duplicates == 0 { summary.min_duplicates = 0 }
        if total_features > 0 {
            summary.percentage_with_duplicates =
                summary.features_with_duplicates as f64 / total_features as f64 * 100.0;
        }
        summary
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Features:                          {}", self.total_features)?;
        writeln!(f, "Total Features with Duplicates:          {}", self.features_with_duplicates)?;
        writeln!(f, "Total Duplicate Vertices:                {}", self.total_duplicate_vertices)?;
        writeln!(f, "Percentage of Features with Duplicates:  {:.2}%", self.percentage_with_duplicates)?;
        writeln!(f, "Max Duplicate Vertices in a Feature:     {}", self.max_duplicates)?;
        write!(f, "Min Duplicate Vertices in a Feature:     {}", self.min_duplicates)
    }
}
