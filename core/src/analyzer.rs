use crate::config::AnalyzerConfig;
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// Morphological analysis capability consumed by the lexical filter.
///
/// Implementations return the lemmas of the open-class words (nouns, verbs,
/// adjectives, adverbs) of `text` in order, with particles, function words and
/// interjections already removed. Output must be deterministic for identical
/// input.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Vec<String>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn analyze(&self, text: &str) -> Vec<String> {
        self(text)
    }
}

lazy_static! {
    static ref SCRIPT_RUN: Regex = Regex::new(
        r"(?P<han>[\p{Han}&&\p{L}]+)|(?P<kata>[\p{Katakana}&&\p{L}&&[^ー]][\p{Katakana}ー&&\p{L}]*)|(?P<hira>[\p{Hiragana}ー&&\p{L}]+)|(?P<word>[^\P{L}\p{Han}\p{Hiragana}\p{Katakana}](?:[^\P{L}\p{Han}\p{Hiragana}\p{Katakana}]|[\p{N}_'])*)"
    )
    .expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could","did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","it's","its","itself",
            "let's","me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves",
            // conversational fillers
            "um","uh","er","ah","oh","hmm","like","okay","ok","yeah","well",
        ];
        words.iter().copied().collect()
    };
}

/// Dictionary-free analyzer driven by Unicode script runs.
///
/// Kanji and katakana runs count as content lemmas; hiragana runs (particles,
/// auxiliaries, inflection, interjections) are dropped. Words in other scripts
/// are lowercased, stopword-filtered and stemmed. Digits never form tokens.
/// Deployments with a real morphological analyzer implement [`Analyzer`]
/// directly instead.
#[derive(Debug, Clone)]
pub struct ScriptAnalyzer {
    extra_stopwords: HashSet<String>,
    stem_latin: bool,
}

impl Default for ScriptAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl ScriptAnalyzer {
    pub fn new(cfg: &AnalyzerConfig) -> Self {
        let extra_stopwords = cfg
            .extra_stopwords
            .iter()
            .map(|w| w.nfkc().collect::<String>().to_lowercase())
            .collect();
        Self { extra_stopwords, stem_latin: cfg.stem_latin }
    }

    fn is_stopword(&self, token: &str) -> bool {
        STOPWORDS.contains(token) || self.extra_stopwords.contains(token)
    }
}

impl Analyzer for ScriptAnalyzer {
    fn analyze(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut lemmas = Vec::new();
        for caps in SCRIPT_RUN.captures_iter(&normalized) {
            if let Some(m) = caps.name("han").or_else(|| caps.name("kata")) {
                if !self.is_stopword(m.as_str()) {
                    lemmas.push(m.as_str().to_string());
                }
            } else if let Some(m) = caps.name("word") {
                let word = m.as_str();
                if self.is_stopword(word) {
                    continue;
                }
                if self.stem_latin {
                    lemmas.push(STEMMER.stem(word).into_owned());
                } else {
                    lemmas.push(word.to_string());
                }
            }
        }
        lemmas
    }
}
