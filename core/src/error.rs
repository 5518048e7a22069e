use thiserror::Error;

/// Terminal conditions of a summarization run. Recoverable situations
/// (importance-filter fallback, ranking non-convergence) are reported in
/// [`crate::SummaryStats`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("input is empty after removing speaker tags, timestamps and fillers")]
    EmptyInput,

    #[error("input has no extractable content: all {sentences} sentences lack content words")]
    NoContent { sentences: usize },

    #[error("similarity graph has no nodes")]
    EmptyGraph,
}

impl SummarizeError {
    /// Stable machine-readable name, used by the CLI and HTTP surfaces.
    pub fn kind(&self) -> &'static str {
        match self {
            SummarizeError::EmptyInput => "empty_input",
            SummarizeError::NoContent { .. } => "no_content",
            SummarizeError::EmptyGraph => "empty_graph",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RatioError {
    #[error("ratio must be a percentage between {min} and {max}, got {value}", min = crate::Ratio::MIN, max = crate::Ratio::MAX)]
    OutOfRange { value: i64 },

    #[error("ratio `{input}` is not a whole number")]
    NotANumber { input: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid speaker/timestamp pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("config value `{field}` out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
