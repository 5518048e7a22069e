//! Extractive summarization of meeting transcripts.
//!
//! The pipeline runs strictly in order: [`normalize`] → [`segment`] →
//! [`lexical`] → [`importance`] → [`graph`] / [`lexrank`] → [`ratio`] →
//! [`select`]. Every stage after segmentation refers to sentences by their
//! [`SentenceIndex`], never by position in a filtered list.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod graph;
pub mod importance;
pub mod lexical;
pub mod lexrank;
pub mod normalize;
pub mod pipeline;
pub mod ratio;
pub mod segment;
pub mod select;

use serde::{Deserialize, Serialize};

pub use analyzer::{Analyzer, ScriptAnalyzer};
pub use config::SummarizerConfig;
pub use error::{ConfigError, RatioError, SummarizeError};
pub use pipeline::{Summarizer, Summary, SummaryStats};
pub use ratio::Ratio;

/// Position of a sentence in the segmented sequence. Stable for a whole run.
pub type SentenceIndex = u32;
pub type TermId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub index: SentenceIndex,
    /// Literal wording from the normalized text, used for display.
    pub text: String,
    /// Byte offsets into the normalized text.
    pub start: usize,
    pub end: usize,
}

/// One sentence of the finished summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySentence {
    pub index: SentenceIndex,
    pub text: String,
    pub score: f64,
}
