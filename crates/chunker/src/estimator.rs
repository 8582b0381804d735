//! Heuristic size estimation standing in for model token counts.

use serde::{Deserialize, Serialize};

/// Fixed character↔unit ratio. Used wherever a unit budget has to be turned
/// into a character count (overlap sizing, last-resort slicing), regardless
/// of which estimator is active.
pub const CHARS_PER_UNIT: usize = 4;

/// Swappable token-cost heuristic. The rest of the pipeline only ever calls
/// `estimate`; which variant is active is a configuration choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeEstimator {
    /// `ceil(chars / 4)` — assumes roughly four characters per token.
    #[default]
    Coarse,
    /// Whitespace tokens weighted by length, punctuation surcharged, with a
    /// 1.2 safety factor.
    Weighted,
}

impl SizeEstimator {
    /// Estimate the generative-model cost of `text` in abstract units.
    /// Pure; `estimate("") == 0` for both variants.
    pub fn estimate(&self, text: &str) -> usize {
        match self {
            Self::Coarse => text.chars().count().div_ceil(CHARS_PER_UNIT),
            Self::Weighted => weighted(text),
        }
    }
}

fn weighted(text: &str) -> usize {
    let mut units = 0.0f64;
    for word in text.split_whitespace() {
        units += if word.chars().count() < 3 { 0.5 } else { 1.0 };
    }
    let punctuation = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    units += punctuation as f64 * 0.5;
    (units * 1.2) as usize
}

impl std::str::FromStr for SizeEstimator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coarse" => Ok(Self::Coarse),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!("unknown size estimator: '{other}'")),
        }
    }
}
