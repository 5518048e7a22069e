use crate::config::SegmenterConfig;
use crate::{Sentence, SentenceIndex};

/// Splits normalized text into sentences at terminal punctuation.
#[derive(Debug, Clone)]
pub struct Segmenter {
    terminators: Vec<char>,
}

impl Segmenter {
    pub fn new(cfg: &SegmenterConfig) -> Self {
        Self { terminators: cfg.terminators.clone() }
    }

    fn is_terminator(&self, c: char) -> bool {
        self.terminators.contains(&c)
    }

    /// A sentence runs up to and including its terminator; a run of several
    /// terminators (`？！`) stays with the sentence it closes. The final run is
    /// emitted even without a terminator. Surrounding whitespace is trimmed and
    /// whitespace-only runs are dropped; a run of bare punctuation left behind
    /// by filler removal is still a sentence, one without content. Indices
    /// follow scan order from 0.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();
        while let Some((pos, c)) = chars.next() {
            if !self.is_terminator(c) {
                continue;
            }
            let mut end = pos + c.len_utf8();
            while let Some(&(next_pos, next)) = chars.peek() {
                if !self.is_terminator(next) {
                    break;
                }
                end = next_pos + next.len_utf8();
                chars.next();
            }
            self.push(&mut sentences, text, start, end);
            start = end;
        }
        if start < text.len() {
            self.push(&mut sentences, text, start, text.len());
        }
        sentences
    }

    fn push(&self, sentences: &mut Vec<Sentence>, text: &str, start: usize, end: usize) {
        let run = &text[start..end];
        let trimmed = run.trim();
        if trimmed.is_empty() {
            return;
        }
        let lead = run.len() - run.trim_start().len();
        let start = start + lead;
        sentences.push(Sentence {
            index: sentences.len() as SentenceIndex,
            text: trimmed.to_string(),
            start,
            end: start + trimmed.len(),
        });
    }
}
