use serde::{Deserialize, Serialize};

use crate::aligner::scoring::{Score, ScoringFunction, GAP};

/// Whether upper- and lowercase symbols are considered equal
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

/// Match/mismatch scoring with a linear gap penalty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapLinear {
    score_match: Score,
    score_mismatch: Score,
    score_gap: Score,
    case: CaseSensitivity,
}

impl GapLinear {
    pub fn new(score_match: Score, score_mismatch: Score, score_gap: Score) -> Self {
        Self {
            score_match,
            score_mismatch,
            score_gap,
            case: CaseSensitivity::Sensitive,
        }
    }

    pub fn with_case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    #[inline(always)]
    pub fn match_score(&self) -> Score {
        self.score_match
    }

    #[inline(always)]
    pub fn mismatch_score(&self) -> Score {
        self.score_mismatch
    }

    #[inline(always)]
    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    #[inline(always)]
    fn symbols_equal(&self, a: u8, b: u8) -> bool {
        match self.case {
            CaseSensitivity::Sensitive => a == b,
            CaseSensitivity::Insensitive => a.eq_ignore_ascii_case(&b),
        }
    }
}

impl Default for GapLinear {
    fn default() -> Self {
        Self::new(1, -1, -2)
    }
}

impl ScoringFunction for GapLinear {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Score {
        if a == GAP || b == GAP {
            self.score_gap
        } else if self.symbols_equal(a, b) {
            self.score_match
        } else {
            self.score_mismatch
        }
    }

    #[inline]
    fn gap_penalty(&self) -> Score {
        self.score_gap
    }
}
