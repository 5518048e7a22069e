use crate::config::OutputOrder;
use crate::{Sentence, SentenceIndex, SummarySentence};

/// Picks the `target` best-scored sentences. Ties go to the earlier sentence
/// so runs are reproducible; the result is in `order`.
pub fn top_sentences(scored: &[(SentenceIndex, f64)], target: usize, order: OutputOrder) -> Vec<(SentenceIndex, f64)> {
    let mut ranked = scored.to_vec();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(target);
    if order == OutputOrder::Document {
        ranked.sort_by_key(|(index, _)| *index);
    }
    ranked
}

/// Resolves chosen indices to the original sentence wording.
pub fn resolve(chosen: &[(SentenceIndex, f64)], sentences: &[Sentence]) -> Vec<SummarySentence> {
    chosen
        .iter()
        .filter_map(|&(index, score)| {
            sentences
                .get(index as usize)
                .map(|s| SummarySentence { index, text: s.text.clone(), score })
        })
        .collect()
}
