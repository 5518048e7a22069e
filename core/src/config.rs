use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Every tunable of the pipeline. Loaded from JSON; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub noise: NoiseConfig,
    pub segmenter: SegmenterConfig,
    pub analyzer: AnalyzerConfig,
    pub importance: ImportanceConfig,
    pub ranking: RankingConfig,
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Regex for speaker/timestamp markers such as `[Alice] 00:01:02 `.
    pub speaker_pattern: String,
    /// Removed in list order, so earlier entries win when phrases overlap.
    pub fillers: Vec<String>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            speaker_pattern: r"\[[^\]]*\] \d{2}:\d{2}:\d{2} ?".to_string(),
            fillers: ["えーと", "えっと", "あのー", "えー", "うーん"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    pub terminators: Vec<char>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self { terminators: vec!['。', '！', '？'] }
    }
}

/// Settings for the built-in [`crate::ScriptAnalyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub extra_stopwords: Vec<String>,
    pub stem_latin: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { extra_stopwords: Vec::new(), stem_latin: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImportanceMode {
    /// Keep sentences whose aggregate weight is at least `threshold`.
    Threshold { threshold: f64 },
    /// Keep the best `ceil(fraction * n)` sentences.
    TopFraction { fraction: f64 },
}

impl Default for ImportanceMode {
    fn default() -> Self {
        ImportanceMode::Threshold { threshold: 0.1 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreAggregate {
    /// Mean over the whole vocabulary, absent terms counting as zero. The
    /// default threshold of 0.1 is calibrated for this aggregate.
    #[default]
    VocabularyMean,
    /// Mean over the terms the sentence contains. Never below `1 / k` for a
    /// sentence with `k` distinct terms, so it needs a higher threshold.
    TermMean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceConfig {
    pub mode: ImportanceMode,
    pub aggregate: ScoreAggregate,
    /// idf = ln((1 + n) / (1 + df)) + 1 when set, ln(n / df) + 1 otherwise.
    pub smooth_idf: bool,
    /// tf = 1 + ln(count) instead of the raw count.
    pub sublinear_tf: bool,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            mode: ImportanceMode::default(),
            aggregate: ScoreAggregate::default(),
            smooth_idf: true,
            sublinear_tf: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub damping: f64,
    /// Iteration stops once the L1 change drops below this.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Similarities below this are not added as edges.
    pub edge_threshold: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { damping: 0.85, tolerance: 1e-4, max_iterations: 100, edge_threshold: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputOrder {
    #[default]
    Document,
    Rank,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub order: OutputOrder,
}

impl SummarizerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: SummarizerConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut f = File::open(path)?;
        let mut buf = String::new();
        f.read_to_string(&mut buf)?;
        Self::from_json_str(&buf)
    }

    /// Reject values the pipeline cannot work with. The speaker pattern is
    /// checked when the normalizer compiles it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segmenter.terminators.is_empty() {
            return Err(out_of_range("segmenter.terminators", "at least one terminator is required"));
        }
        if self.noise.fillers.iter().any(|f| f.is_empty()) {
            return Err(out_of_range("noise.fillers", "filler phrases must be non-empty"));
        }
        match self.importance.mode {
            ImportanceMode::Threshold { threshold } if !threshold.is_finite() => {
                return Err(out_of_range("importance.mode.threshold", format!("{threshold} is not finite")));
            }
            ImportanceMode::TopFraction { fraction } if !(fraction > 0.0 && fraction <= 1.0) => {
                return Err(out_of_range("importance.mode.fraction", format!("{fraction} not in (0, 1]")));
            }
            _ => {}
        }
        let r = &self.ranking;
        if !(0.0..=1.0).contains(&r.damping) {
            return Err(out_of_range("ranking.damping", format!("{} not in [0, 1]", r.damping)));
        }
        if !(r.tolerance > 0.0) {
            return Err(out_of_range("ranking.tolerance", format!("{} must be positive", r.tolerance)));
        }
        if r.max_iterations == 0 {
            return Err(out_of_range("ranking.max_iterations", "must be at least 1"));
        }
        if !r.edge_threshold.is_finite() || r.edge_threshold < 0.0 {
            return Err(out_of_range("ranking.edge_threshold", format!("{} must be >= 0", r.edge_threshold)));
        }
        Ok(())
    }
}

fn out_of_range(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::OutOfRange { field, reason: reason.into() }
}
