use std::fmt::{Display, Formatter};
use std::ops::Index;

use serde::Serialize;

use crate::aligner::scoring::GAP;
use crate::errors::PairAlignError;

/// Identifies which of the two input sequences something refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SequenceRole {
    /// The sequence laid out along the columns of the alignment grid
    First,

    /// The sequence laid out along the rows of the alignment grid
    Second,
}

impl Display for SequenceRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Second => write!(f, "second"),
        }
    }
}

/// A validated input sequence, prefixed with the gap sentinel.
///
/// Index 0 always holds [`GAP`], so grid row/column `k` corresponds to symbol
/// `k` of the padded sequence and row/column 0 means "before the sequence starts".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedSequence {
    symbols: Vec<u8>,
}

impl PaddedSequence {
    pub fn new(seq: &[u8], role: SequenceRole) -> Result<Self, PairAlignError> {
        if seq.is_empty() {
            return Err(PairAlignError::EmptySequence(role));
        }

        if let Some(position) = seq.iter().position(|&c| c == GAP) {
            return Err(PairAlignError::ReservedSymbol { sequence: role, position });
        }

        let mut symbols = Vec::with_capacity(seq.len() + 1);
        symbols.push(GAP);
        symbols.extend_from_slice(seq);

        Ok(Self { symbols })
    }

    /// Length including the leading sentinel
    #[inline(always)]
    pub fn padded_len(&self) -> usize {
        self.symbols.len()
    }

    /// The original, unpadded sequence
    #[inline(always)]
    pub fn residues(&self) -> &[u8] {
        &self.symbols[1..]
    }
}

impl Index<usize> for PaddedSequence {
    type Output = u8;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

#[cfg(test)]
mod tests {
    use super::{PaddedSequence, SequenceRole};
    use crate::errors::PairAlignError;

    #[test]
    fn test_padding() {
        let seq = PaddedSequence::new(b"ACGT", SequenceRole::First).unwrap();

        assert_eq!(seq.padded_len(), 5);
        assert_eq!(seq[0], b'-');
        assert_eq!(seq[1], b'A');
        assert_eq!(seq[4], b'T');
        assert_eq!(seq.residues(), b"ACGT");
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(matches!(
            PaddedSequence::new(b"", SequenceRole::Second),
            Err(PairAlignError::EmptySequence(SequenceRole::Second))
        ));

        assert!(matches!(
            PaddedSequence::new(b"AC-T", SequenceRole::First),
            Err(PairAlignError::ReservedSymbol { sequence: SequenceRole::First, position: 2 })
        ));
    }
}
