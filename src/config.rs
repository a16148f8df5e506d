use crate::error::AlignError;

/// Largest supported output precision (decimal digits).
pub const MAX_PRECISION: usize = 10;

/// All alignment parameters in one struct.
#[derive(Debug, Clone)]
pub struct AlignConfig {
    // -- Resolution stage --
    /// Two cross-path vertices closer than this (strictly) are merged.
    /// Measured in the document's user-space units.
    pub threshold: f64,
    /// Neighbours fetched per query. Two is enough to skip the query
    /// point itself; raise it when paths have many coincident vertices.
    pub neighbors: usize,
    /// How near-coincident vertices are grouped before merging.
    pub strategy: MergeStrategy,

    // -- Input handling --
    /// What to do with a path whose data cannot be tokenized.
    pub on_malformed: MalformedPolicy,

    // -- Output --
    /// Decimal digits kept when re-serializing path data.
    pub precision: usize,
    /// Re-serialize every path, not only the ones that were moved.
    pub rewrite_all: bool,
}

/// Grouping rule for the merge resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Nearest cross-path neighbour, pair by pair in vertex id order.
    /// A vertex takes part in at most one merge per run.
    #[default]
    Pairwise,
    /// Union all cross-path pairs under the threshold and collapse each
    /// group to its mean point.
    Cluster,
}

/// Policy for paths whose data fails to tokenize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Warn, leave the path untouched and align the rest.
    #[default]
    Skip,
    /// Fail the whole run.
    Abort,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            neighbors: 2,
            strategy: MergeStrategy::Pairwise,
            on_malformed: MalformedPolicy::Skip,
            precision: 2,
            rewrite_all: false,
        }
    }
}

impl AlignConfig {
    /// Config with a custom merge threshold and defaults elsewhere.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(AlignError::InvalidConfig(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if self.neighbors < 2 {
            return Err(AlignError::InvalidConfig(format!(
                "neighbors must be at least 2, got {}",
                self.neighbors
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(AlignError::InvalidConfig(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}
