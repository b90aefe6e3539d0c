//! Coverage metrics, quality buckets and watermarks.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One of the four coverage dimensions reported per file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Statements,
    Branches,
    Functions,
    Lines,
}

impl Dimension {
    /// All dimensions in report column order.
    pub const ALL: [Self; 4] = [
        Self::Statements,
        Self::Branches,
        Self::Functions,
        Self::Lines,
    ];

    /// Get the dimension key as used in payloads and sort keys
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Statements => "statements",
            Self::Branches => "branches",
            Self::Functions => "functions",
            Self::Lines => "lines",
        }
    }

    /// Column header label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Statements => "Statements",
            Self::Branches => "Branches",
            Self::Functions => "Functions",
            Self::Lines => "Lines",
        }
    }

    /// Parse a dimension key, case-insensitively.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "statements" => Some(Self::Statements),
            "branches" => Some(Self::Branches),
            "functions" => Some(Self::Functions),
            "lines" => Some(Self::Lines),
            _ => None,
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A numeric field of a [`CoverageMetric`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MetricField {
    Total,
    Covered,
    Skipped,
    Pct,
}

impl MetricField {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Covered => "covered",
            Self::Skipped => "skipped",
            Self::Pct => "pct",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "total" => Some(Self::Total),
            "covered" => Some(Self::Covered),
            "skipped" => Some(Self::Skipped),
            "pct" => Some(Self::Pct),
            _ => None,
        }
    }
}

/// Coverage counts for a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetric {
    pub total: u64,
    pub covered: u64,
    #[serde(default)]
    pub skipped: u64,
    /// Percentage covered (0-100). Older payloads write `"Unknown"` when
    /// nothing is instrumented; that reads as 100.
    #[serde(deserialize_with = "deserialize_pct")]
    pub pct: f64,
}

impl CoverageMetric {
    /// Build a metric from counts, deriving `pct` the way the report
    /// generator does (floored to two decimals, 100 when `total` is 0).
    #[must_use]
    pub fn from_counts(total: u64, covered: u64, skipped: u64) -> Self {
        Self {
            total,
            covered,
            skipped,
            pct: expected_pct(total, covered),
        }
    }

    /// Value of a numeric field, widened to `f64` for comparison.
    #[must_use]
    pub fn value(&self, field: MetricField) -> f64 {
        match field {
            MetricField::Total => self.total as f64,
            MetricField::Covered => self.covered as f64,
            MetricField::Skipped => self.skipped as f64,
            MetricField::Pct => self.pct,
        }
    }
}

/// Percentage the report generator writes for the given counts.
#[must_use]
pub fn expected_pct(total: u64, covered: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let raw = (1000.0 * 100.0 * covered as f64) / total as f64;
    (raw / 10.0).floor() / 100.0
}

fn deserialize_pct<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pct {
        Number(f64),
        Text(String),
    }

    match Pct::deserialize(deserializer)? {
        Pct::Number(n) => Ok(n),
        Pct::Text(s) if s.eq_ignore_ascii_case("unknown") => Ok(100.0),
        Pct::Text(s) => s
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid percentage '{s}'"))),
    }
}

/// The four coverage metrics of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    pub statements: CoverageMetric,
    pub branches: CoverageMetric,
    pub functions: CoverageMetric,
    pub lines: CoverageMetric,
}

impl CoverageMetrics {
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &CoverageMetric {
        match dimension {
            Dimension::Statements => &self.statements,
            Dimension::Branches => &self.branches,
            Dimension::Functions => &self.functions,
            Dimension::Lines => &self.lines,
        }
    }

    /// True when the node has no instrumented lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.total == 0
    }

    /// Metrics with every dimension at the same percentage out of 100.
    ///
    /// Mostly useful for building fixtures.
    #[must_use]
    pub fn uniform(covered_of_100: u64) -> Self {
        let metric = CoverageMetric::from_counts(100, covered_of_100.min(100), 0);
        Self {
            statements: metric,
            branches: metric,
            functions: metric,
            lines: metric,
        }
    }
}

// ============================================================================
// Quality buckets
// ============================================================================

/// Coarse coverage-quality classification of a percentage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum QualityBucket {
    Low,
    Medium,
    High,
}

impl QualityBucket {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Label used in payloads, CSS classes and CLI flags
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for QualityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A `[low, high]` threshold pair.
///
/// `pct < low` is [`QualityBucket::Low`], `pct >= high` is
/// [`QualityBucket::High`], anything in between is medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Watermark(pub f64, pub f64);

impl Watermark {
    #[must_use]
    pub const fn low(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub const fn high(&self) -> f64 {
        self.1
    }

    #[must_use]
    pub fn classify(&self, pct: f64) -> QualityBucket {
        if pct < self.low() {
            QualityBucket::Low
        } else if pct >= self.high() {
            QualityBucket::High
        } else {
            QualityBucket::Medium
        }
    }

    /// Both thresholds within 0-100 and ordered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0.0..=100.0).contains(&self.low())
            && (0.0..=100.0).contains(&self.high())
            && self.low() <= self.high()
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Self(50.0, 80.0)
    }
}

/// Watermarks for every dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Watermarks {
    pub statements: Watermark,
    pub branches: Watermark,
    pub functions: Watermark,
    pub lines: Watermark,
}

impl Watermarks {
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &Watermark {
        match dimension {
            Dimension::Statements => &self.statements,
            Dimension::Branches => &self.branches,
            Dimension::Functions => &self.functions,
            Dimension::Lines => &self.lines,
        }
    }

    /// Quality bucket of one dimension of a node's metrics.
    #[must_use]
    pub fn bucket(&self, metrics: &CoverageMetrics, dimension: Dimension) -> QualityBucket {
        self.get(dimension).classify(metrics.get(dimension).pct)
    }
}
