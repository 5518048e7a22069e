use crate::analyzer::Analyzer;
use crate::error::SummarizeError;
use crate::{Sentence, SentenceIndex};

/// Content lemmas of one sentence, keyed by its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub index: SentenceIndex,
    pub lemmas: Vec<String>,
}

impl TokenSet {
    pub fn is_degenerate(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// Result of running the analyzer over every sentence.
#[derive(Debug, Clone)]
pub struct LexicalOutcome {
    /// Sentences with at least one content lemma, in document order.
    pub content: Vec<TokenSet>,
    /// Indices of sentences without content lemmas.
    pub degenerate: Vec<SentenceIndex>,
}

/// Runs `analyzer` on each sentence. Sentences with no content lemma are set
/// aside as degenerate; if none has content the run cannot continue.
pub fn filter<A: Analyzer + ?Sized>(sentences: &[Sentence], analyzer: &A) -> Result<LexicalOutcome, SummarizeError> {
    let mut content = Vec::with_capacity(sentences.len());
    let mut degenerate = Vec::new();
    for sentence in sentences {
        let set = TokenSet { index: sentence.index, lemmas: analyzer.analyze(&sentence.text) };
        if set.is_degenerate() {
            degenerate.push(sentence.index);
        } else {
            content.push(set);
        }
    }
    tracing::debug!(content = content.len(), degenerate = degenerate.len(), "lexical filter");
    if content.is_empty() {
        return Err(SummarizeError::NoContent { sentences: sentences.len() });
    }
    Ok(LexicalOutcome { content, degenerate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(index: SentenceIndex, text: &str) -> Sentence {
        Sentence { index, text: text.to_string(), start: 0, end: text.len() }
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().filter(|w| w.len() > 2).map(str::to_string).collect()
    }

    #[test]
    fn degenerate_sentences_keep_their_index() {
        let sentences = vec![sentence(0, "ok"), sentence(1, "budget review"), sentence(2, "uh"), sentence(3, "next quarter")];
        let out = filter(&sentences, &words).unwrap();
        let content: Vec<_> = out.content.iter().map(|t| t.index).collect();
        assert_eq!(content, vec![1, 3]);
        assert_eq!(out.degenerate, vec![0, 2]);
        assert_eq!(out.content[1].lemmas, vec!["next", "quarter"]);
    }

    #[test]
    fn all_degenerate_is_no_content() {
        let sentences = vec![sentence(0, "ok"), sentence(1, "uh")];
        let err = filter(&sentences, &words).unwrap_err();
        assert_eq!(err, SummarizeError::NoContent { sentences: 2 });
    }

    #[test]
    fn no_sentences_is_no_content() {
        assert!(filter(&[], &words).is_err());
    }
}
