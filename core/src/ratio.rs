use crate::error::RatioError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target summary size as a whole percentage of the surviving sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Ratio(u8);

impl Ratio {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 99;

    pub fn new(percent: i64) -> Result<Self, RatioError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&percent) {
            Ok(Ratio(percent as u8))
        } else {
            Err(RatioError::OutOfRange { value: percent })
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// `ceil(ratio * n / 100)`, never below 1 nor above `n`. Zero only when
    /// `n` is zero.
    pub fn sentence_count(self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let t = (self.0 as usize * n).div_ceil(100);
        t.clamp(1, n)
    }
}

impl TryFrom<i64> for Ratio {
    type Error = RatioError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Ratio::new(value)
    }
}

impl From<Ratio> for u8 {
    fn from(r: Ratio) -> u8 {
        r.0
    }
}

impl std::str::FromStr for Ratio {
    type Err = RatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| RatioError::NotANumber { input: s.to_string() })?;
        Ratio::new(value)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
