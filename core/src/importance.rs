//! TF-IDF weighting and importance filtering of content sentences.
//!
//! Each content sentence is one document of the corpus. Weights follow the
//! common vectorizer defaults: raw term counts, smoothed idf
//! `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows. A sentence's
//! importance is the mean of its row over the whole vocabulary unless
//! [`ScoreAggregate::TermMean`] is configured.

use crate::config::{ImportanceConfig, ImportanceMode, ScoreAggregate};
use crate::lexical::TokenSet;
use crate::{SentenceIndex, TermId};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Sparse term weights of one sentence, sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermVector {
    entries: Vec<(TermId, f64)>,
    norm: f64,
}

impl TermVector {
    pub fn from_weights(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.sort_by_key(|(t, _)| *t);
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { entries, norm }
    }

    pub fn entries(&self) -> &[(TermId, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Cosine similarity; 0.0 when either vector has zero norm.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let (mut i, mut j, mut dot) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot / (self.norm * other.norm)
    }
}

/// A content sentence with its weights and aggregate importance.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSentence {
    pub index: SentenceIndex,
    pub vector: TermVector,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ImportanceOutcome {
    /// Kept sentences in document order.
    pub survivors: Vec<WeightedSentence>,
    /// Set when threshold filtering dropped everything and the unfiltered
    /// corpus was kept instead.
    pub fell_back: bool,
    pub vocabulary_size: usize,
}

/// Weight the corpus and keep the important sentences.
///
/// `corpus` must be non-empty (the lexical filter guarantees it).
pub fn filter(corpus: &[TokenSet], cfg: &ImportanceConfig) -> ImportanceOutcome {
    let (weighted, vocabulary_size) = weigh(corpus, cfg);
    let total = weighted.len();

    let (survivors, fell_back) = match cfg.mode {
        ImportanceMode::Threshold { threshold } => {
            let kept: Vec<_> = weighted.iter().filter(|w| w.score >= threshold).cloned().collect();
            if kept.is_empty() {
                tracing::warn!(threshold, sentences = total, "importance threshold discarded every sentence, keeping all");
                (weighted, true)
            } else {
                (kept, false)
            }
        }
        ImportanceMode::TopFraction { fraction } => (top_fraction(weighted, fraction), false),
    };

    tracing::debug!(total, kept = survivors.len(), vocabulary_size, fell_back, "importance filter");
    ImportanceOutcome { survivors, fell_back, vocabulary_size }
}

/// Computes the TF-IDF vector and aggregate score of every sentence.
pub fn weigh(corpus: &[TokenSet], cfg: &ImportanceConfig) -> (Vec<WeightedSentence>, usize) {
    let mut dictionary: FxHashMap<&str, TermId> = FxHashMap::default();
    let mut df: Vec<u32> = Vec::new();
    let mut counts: Vec<FxHashMap<TermId, u32>> = Vec::with_capacity(corpus.len());

    for doc in corpus {
        let mut tf: FxHashMap<TermId, u32> = FxHashMap::default();
        for lemma in &doc.lemmas {
            let next_id = dictionary.len() as TermId;
            let tid = *dictionary.entry(lemma.as_str()).or_insert_with(|| {
                df.push(0);
                next_id
            });
            let count = tf.entry(tid).or_insert(0);
            if *count == 0 {
                df[tid as usize] += 1;
            }
            *count += 1;
        }
        counts.push(tf);
    }

    let n = corpus.len() as f64;
    let vocabulary_size = dictionary.len();
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| {
            let d = d.max(1) as f64;
            if cfg.smooth_idf {
                ((1.0 + n) / (1.0 + d)).ln() + 1.0
            } else {
                (n / d).ln() + 1.0
            }
        })
        .collect();

    let weighted = corpus
        .iter()
        .zip(counts)
        .map(|(doc, tf)| {
            let raw: Vec<(TermId, f64)> = tf
                .into_iter()
                .map(|(tid, count)| {
                    let tf = if cfg.sublinear_tf { 1.0 + (count as f64).ln() } else { count as f64 };
                    (tid, tf * idf[tid as usize])
                })
                .collect();
            let vector = l2_normalized(TermVector::from_weights(raw));
            let denominator = match cfg.aggregate {
                ScoreAggregate::TermMean => vector.len(),
                ScoreAggregate::VocabularyMean => vocabulary_size,
            };
            let score = if denominator == 0 { 0.0 } else { vector.sum() / denominator as f64 };
            WeightedSentence { index: doc.index, vector, score }
        })
        .collect();

    (weighted, vocabulary_size)
}

fn l2_normalized(vector: TermVector) -> TermVector {
    if vector.norm == 0.0 {
        return vector;
    }
    let norm = vector.norm;
    TermVector::from_weights(vector.entries.into_iter().map(|(t, w)| (t, w / norm)).collect())
}

/// Keeps the best `ceil(fraction * n)` sentences (ties go to the earlier
/// sentence), returned in document order.
fn top_fraction(weighted: Vec<WeightedSentence>, fraction: f64) -> Vec<WeightedSentence> {
    let n = weighted.len();
    let k = ((fraction * n as f64).ceil() as usize).clamp(1, n.max(1));
    let mut ranked = weighted;
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.index.cmp(&b.index)));
    ranked.truncate(k);
    ranked.sort_by_key(|w| w.index);
    ranked
}
