use crate::config::NoiseConfig;
use crate::error::ConfigError;
use regex::Regex;

/// Strips structural noise from a raw transcript: line breaks, speaker and
/// timestamp markers, filler phrases.
#[derive(Debug, Clone)]
pub struct Normalizer {
    speaker: Regex,
    fillers: Vec<String>,
}

impl Normalizer {
    pub fn new(cfg: &NoiseConfig) -> Result<Self, ConfigError> {
        let speaker = Regex::new(&cfg.speaker_pattern)?;
        Ok(Self { speaker, fillers: cfg.fillers.clone() })
    }

    /// Never fails. Passes repeat until nothing changes, so a removal that
    /// splices together a new marker or filler is also cleaned up and the
    /// result is a fixed point.
    pub fn normalize(&self, raw: &str) -> String {
        let mut text = raw.replace(|c: char| c == '\r' || c == '\n', " ");
        loop {
            let next = self.strip_once(&text);
            if next == text {
                return text;
            }
            text = next;
        }
    }

    fn strip_once(&self, text: &str) -> String {
        let mut out = self.speaker.replace_all(text, "").into_owned();
        for filler in &self.fillers {
            if out.contains(filler.as_str()) {
                out = out.replace(filler.as_str(), "");
            }
        }
        out
    }
}
