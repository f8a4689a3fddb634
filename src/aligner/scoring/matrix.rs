use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::aligner::scoring::{Score, ScoringFunction, GAP};
use crate::errors::PairAlignError;

const NOT_IN_ALPHABET: u8 = u8::MAX;

/// On-disk representation of a substitution matrix.
///
/// ```json
/// {
///   "alphabet": "ACGT",
///   "scores": [[ 2, -1, -1, -1],
///              [-1,  2, -1, -1],
///              [-1, -1,  2, -1],
///              [-1, -1, -1,  2]],
///   "gap": -3,
///   "unknown": -1
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubstitutionMatrixDef {
    pub alphabet: String,
    pub scores: Vec<Vec<Score>>,
    pub gap: Score,

    /// Score used when either symbol is not part of the alphabet
    pub unknown: Score,
}

/// Scoring scheme backed by a full substitution table, with a linear gap penalty.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "SubstitutionMatrixDef", into = "SubstitutionMatrixDef")]
pub struct SubstitutionMatrix {
    alphabet: Vec<u8>,
    symbol_index: Vec<u8>,
    table: Vec<Score>,
    gap: Score,
    unknown: Score,
}

impl SubstitutionMatrix {
    pub fn new(
        alphabet: &[u8],
        scores: &[Vec<Score>],
        gap: Score,
        unknown: Score,
    ) -> Result<Self, PairAlignError> {
        let n = alphabet.len();
        if n == 0 {
            return Err(PairAlignError::InvalidScoringMatrix("the alphabet is empty".to_string()));
        }

        if n >= NOT_IN_ALPHABET as usize {
            return Err(PairAlignError::InvalidScoringMatrix(
                format!("alphabet has {n} symbols, at most {} are supported", NOT_IN_ALPHABET - 1)
            ));
        }

        if scores.len() != n {
            return Err(PairAlignError::InvalidScoringMatrix(
                format!("expected {n} rows, got {}", scores.len())
            ));
        }

        let mut symbol_index = vec![NOT_IN_ALPHABET; 256];
        for (ix, &symbol) in alphabet.iter().enumerate() {
            if symbol == GAP {
                return Err(PairAlignError::InvalidScoringMatrix(
                    "the gap symbol '-' can't be part of the alphabet".to_string()
                ));
            }

            if symbol_index[symbol as usize] != NOT_IN_ALPHABET {
                return Err(PairAlignError::InvalidScoringMatrix(
                    format!("symbol '{}' occurs more than once in the alphabet", symbol as char)
                ));
            }

            symbol_index[symbol as usize] = ix as u8;
        }

        let mut table = Vec::with_capacity(n * n);
        for (row_ix, row) in scores.iter().enumerate() {
            if row.len() != n {
                return Err(PairAlignError::InvalidScoringMatrix(
                    format!("row {row_ix} has {} columns, expected {n}", row.len())
                ));
            }

            table.extend_from_slice(row);
        }

        Ok(Self {
            alphabet: alphabet.to_vec(),
            symbol_index,
            table,
            gap,
            unknown,
        })
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Self, PairAlignError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Nucleotide matrix rewarding identity and penalizing transversions more than transitions.
    pub fn dna_transition_transversion() -> Self {
        let scores = vec![
            vec![ 2, -1, -2, -2],
            vec![-1,  2, -2, -2],
            vec![-2, -2,  2, -1],
            vec![-2, -2, -1,  2],
        ];

        // A/G purines, C/T pyrimidines
        Self::new(b"AGCT", &scores, -3, -2).expect("built-in matrix is valid")
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }
}

impl TryFrom<SubstitutionMatrixDef> for SubstitutionMatrix {
    type Error = PairAlignError;

    fn try_from(value: SubstitutionMatrixDef) -> Result<Self, Self::Error> {
        Self::new(value.alphabet.as_bytes(), &value.scores, value.gap, value.unknown)
    }
}

impl From<SubstitutionMatrix> for SubstitutionMatrixDef {
    fn from(value: SubstitutionMatrix) -> Self {
        let n = value.alphabet.len();
        Self {
            alphabet: String::from_utf8_lossy(&value.alphabet).into_owned(),
            scores: value.table.chunks(n).map(|row| row.to_vec()).collect(),
            gap: value.gap,
            unknown: value.unknown,
        }
    }
}

impl ScoringFunction for SubstitutionMatrix {
    #[inline]
    fn score(&self, a: u8, b: u8) -> Score {
        if a == GAP || b == GAP {
            return self.gap;
        }

        let ia = self.symbol_index[a as usize];
        let ib = self.symbol_index[b as usize];
        if ia == NOT_IN_ALPHABET || ib == NOT_IN_ALPHABET {
            return self.unknown;
        }

        self.table[ia as usize * self.alphabet.len() + ib as usize]
    }

    #[inline]
    fn gap_penalty(&self) -> Score {
        self.gap
    }
}
