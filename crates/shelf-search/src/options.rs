#![forbid(unsafe_code)]

//! Search configuration: field selection, threshold, limit, case policy.

use shelf_core::config::{DEFAULT_THRESHOLD, EngineConfig};
use shelf_core::{ConfigError, FieldPath};
use shelf_text::{CaseFolding, Scorer};

/// Weighted averages at or below this value are discarded.
pub const WEIGHTED_FLOOR: f64 = 0.3;

/// How a field value is compared against the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Score the query against the whole field value.
    #[default]
    WholeField,
    /// Also score the query against each whitespace-separated word of the
    /// value and keep the best.
    Words,
}

/// Options for equal-weight, best-field search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    fields: Vec<FieldPath>,
    threshold: f64,
    limit: Option<usize>,
    case_sensitive: bool,
    mode: MatchMode,
}

impl SearchOptions {
    /// Search the given field paths with the default threshold.
    pub fn new<I, P>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        let fields: Vec<FieldPath> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(ConfigError::EmptyFields);
        }
        Ok(Self {
            fields,
            threshold: DEFAULT_THRESHOLD,
            limit: None,
            case_sensitive: false,
            mode: MatchMode::WholeField,
        })
    }

    /// Build from engine defaults (threshold and case policy).
    pub fn from_config<I, P>(fields: I, config: &EngineConfig) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        Ok(Self::new(fields)?
            .with_threshold(config.threshold)?
            .with_case_sensitive(config.case_sensitive))
    }

    /// Set the minimum score a record needs to be kept. Must lie in `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ThresholdOutOfRange { value: threshold });
        }
        self.threshold = threshold;
        Ok(self)
    }

    /// Keep at most `limit` results.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Compare without case folding.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Select the field matching mode.
    #[must_use]
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldPath] {
        &self.fields
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub(crate) fn scorer(&self) -> Scorer {
        Scorer::new(CaseFolding::from_flag(self.case_sensitive))
    }
}

/// Field paths with positive weights for weighted-average search.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedFields {
    fields: Vec<(FieldPath, f64)>,
    case_sensitive: bool,
}

impl WeightedFields {
    /// Validate and collect `(path, weight)` pairs. Order is preserved.
    pub fn new<I, P>(fields: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (P, f64)>,
        P: Into<FieldPath>,
    {
        let fields: Vec<(FieldPath, f64)> = fields
            .into_iter()
            .map(|(path, weight)| (path.into(), weight))
            .collect();
        if fields.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        if let Some((path, weight)) = fields
            .iter()
            .find(|(_, weight)| !(weight.is_finite() && *weight > 0.0))
        {
            return Err(ConfigError::NonPositiveWeight {
                path: path.to_string(),
                weight: *weight,
            });
        }
        Ok(Self {
            fields,
            case_sensitive: false,
        })
    }

    /// Compare without case folding.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &[(FieldPath, f64)] {
        &self.fields
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub(crate) fn scorer(&self) -> Scorer {
        Scorer::new(CaseFolding::from_flag(self.case_sensitive))
    }
}
