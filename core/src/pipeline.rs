//! End-to-end summarization of one transcript.

use crate::analyzer::{Analyzer, ScriptAnalyzer};
use crate::config::SummarizerConfig;
use crate::error::{ConfigError, SummarizeError};
use crate::graph::SimilarityGraph;
use crate::lexrank::LexRank;
use crate::normalize::Normalizer;
use crate::ratio::Ratio;
use crate::segment::Segmenter;
use crate::{importance, lexical, select, SummarySentence};
use serde::{Deserialize, Serialize};

/// How a run went, including the locally recovered conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_sentences: usize,
    pub degenerate_sentences: usize,
    pub surviving_sentences: usize,
    pub target_sentences: usize,
    /// The importance threshold discarded every sentence and was bypassed.
    pub filter_fell_back: bool,
    pub ranking_converged: bool,
    pub ranking_iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub sentences: Vec<SummarySentence>,
    pub stats: SummaryStats,
}

impl Summary {
    /// Sentence texts, one per output line.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(|s| s.text.as_str())
    }
}

/// Holds the compiled configuration and the analyzer. Immutable after
/// construction, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Summarizer<A = ScriptAnalyzer> {
    config: SummarizerConfig,
    normalizer: Normalizer,
    segmenter: Segmenter,
    ranker: LexRank,
    analyzer: A,
}

impl Summarizer<ScriptAnalyzer> {
    /// Uses the built-in [`ScriptAnalyzer`] configured from `config.analyzer`.
    pub fn new(config: SummarizerConfig) -> Result<Self, ConfigError> {
        let analyzer = ScriptAnalyzer::new(&config.analyzer);
        Self::with_analyzer(config, analyzer)
    }
}

impl<A: Analyzer> Summarizer<A> {
    pub fn with_analyzer(config: SummarizerConfig, analyzer: A) -> Result<Self, ConfigError> {
        config.validate()?;
        let normalizer = Normalizer::new(&config.noise)?;
        let segmenter = Segmenter::new(&config.segmenter);
        let ranker = LexRank::from_config(&config.ranking);
        Ok(Self { config, normalizer, segmenter, ranker, analyzer })
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    pub fn summarize(&self, raw: &str, ratio: Ratio) -> Result<Summary, SummarizeError> {
        let _span = tracing::info_span!("summarize", %ratio, bytes = raw.len()).entered();

        let normalized = self.normalizer.normalize(raw);
        if normalized.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let sentences = self.segmenter.segment(&normalized);
        tracing::debug!(sentences = sentences.len(), "segmented");

        let lexical = lexical::filter(&sentences, &self.analyzer)?;
        let importance = importance::filter(&lexical.content, &self.config.importance);

        let graph = SimilarityGraph::build(&importance.survivors, self.config.ranking.edge_threshold);
        let ranked = self.ranker.run(&graph)?;

        let surviving = graph.num_nodes;
        let target = ratio.sentence_count(surviving);
        let chosen = select::top_sentences(&ranked.by_sentence(&graph), target, self.config.selection.order);
        let summary = select::resolve(&chosen, &sentences);

        let stats = SummaryStats {
            total_sentences: sentences.len(),
            degenerate_sentences: lexical.degenerate.len(),
            surviving_sentences: surviving,
            target_sentences: target,
            filter_fell_back: importance.fell_back,
            ranking_converged: ranked.converged,
            ranking_iterations: ranked.iterations,
        };
        tracing::info!(
            total = stats.total_sentences,
            surviving,
            selected = summary.len(),
            "summary complete"
        );
        Ok(Summary { sentences: summary, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImportanceMode, OutputOrder, ScoreAggregate};

    fn summarizer() -> Summarizer {
        Summarizer::new(SummarizerConfig::default()).unwrap()
    }

    #[test]
    fn empty_and_noise_only_input_is_empty_input() {
        let s = summarizer();
        assert_eq!(s.summarize("", Ratio::new(50).unwrap()).unwrap_err(), SummarizeError::EmptyInput);
        assert_eq!(
            s.summarize("[Alice] 00:00:01 \n\r えーと", Ratio::new(50).unwrap()).unwrap_err(),
            SummarizeError::EmptyInput
        );
    }

    #[test]
    fn fillers_with_punctuation_have_no_content() {
        let err = summarizer().summarize("えーと。うーん。", Ratio::new(50).unwrap()).unwrap_err();
        assert_eq!(err, SummarizeError::NoContent { sentences: 1 });
    }

    #[test]
    fn hiragana_only_input_has_no_content() {
        let err = summarizer().summarize("あのですね。まあそうですね。", Ratio::new(50).unwrap()).unwrap_err();
        assert_eq!(err, SummarizeError::NoContent { sentences: 2 });
    }

    #[test]
    fn stats_describe_the_run() {
        let text = "予算案を確認します。はい。来期の予算案は増額です。人員計画も確認します。";
        let summary = summarizer().summarize(text, Ratio::new(50).unwrap()).unwrap();
        assert_eq!(summary.stats.total_sentences, 4);
        assert_eq!(summary.stats.degenerate_sentences, 1);
        assert_eq!(summary.stats.surviving_sentences, 3);
        assert_eq!(summary.stats.target_sentences, 2);
        assert_eq!(summary.sentences.len(), 2);
        assert!(summary.stats.ranking_converged);
        assert!(summary.sentences.iter().all(|s| s.index != 1));
    }

    #[test]
    fn default_importance_filter_drops_low_weight_sentences() {
        let text = "予算と広告費と採用計画と人員配置です。予算です。会議の議題と資料と日程を確認します。来期の売上目標と利益計画です。";
        let summary = summarizer().summarize(text, Ratio::new(99).unwrap()).unwrap();
        assert_eq!(summary.stats.total_sentences, 4);
        assert_eq!(summary.stats.degenerate_sentences, 0);
        assert_eq!(summary.stats.surviving_sentences, 3);
        assert!(!summary.stats.filter_fell_back);
        let indices: Vec<_> = summary.sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);

        let mut config = SummarizerConfig::default();
        config.importance.aggregate = ScoreAggregate::TermMean;
        let summary = Summarizer::new(config).unwrap().summarize(text, Ratio::new(99).unwrap()).unwrap();
        assert_eq!(summary.stats.surviving_sentences, 4);
    }

    #[test]
    fn rank_order_configuration() {
        let mut config = SummarizerConfig::default();
        config.selection.order = OutputOrder::Rank;
        config.importance.mode = ImportanceMode::TopFraction { fraction: 1.0 };
        let s = Summarizer::new(config).unwrap();
        let text = "予算案を確認します。来期の予算案は増額です。予算案の承認は来週です。天気の話。";
        let summary = s.summarize(text, Ratio::new(99).unwrap()).unwrap();
        let scores: Vec<f64> = summary.sentences.iter().map(|s| s.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = SummarizerConfig::default();
        config.noise.speaker_pattern = "(".into();
        assert!(matches!(Summarizer::new(config), Err(ConfigError::Pattern(_))));
    }
}
