use std::fmt::{self, Display, Formatter, Write};
use std::ops::Range;

use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::aligner::scoring::{Score, GAP};

/// Kind of a single alignment column
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlignedColumn {
    Match,
    Mismatch,

    /// Gap in the first sequence
    Insertion,

    /// Gap in the second sequence
    Deletion,
}

impl AlignedColumn {
    fn classify(a: u8, b: u8) -> Self {
        match (a, b) {
            (GAP, _) => Self::Insertion,
            (_, GAP) => Self::Deletion,
            (a, b) if a == b => Self::Match,
            _ => Self::Mismatch,
        }
    }

    fn cigar_op(self) -> char {
        match self {
            Self::Match => '=',
            Self::Mismatch => 'X',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
        }
    }
}

/// Column counts of an alignment
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

impl AlignmentStats {
    pub fn len(&self) -> usize {
        self.matches + self.mismatches + self.gaps
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fraction of columns that are identical symbols
    pub fn identity(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.matches as f64 / self.len() as f64
        }
    }
}

/// One optimal alignment of two sequences.
///
/// Both gapped rows have equal length. The ranges give the 0-based, half-open
/// part of each input sequence covered by the alignment; for global alignments
/// these always span the whole sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlignmentResult {
    pub score: Score,

    #[serde(serialize_with = "serialize_bytes_as_str")]
    pub first: Vec<u8>,

    #[serde(serialize_with = "serialize_bytes_as_str")]
    pub second: Vec<u8>,

    pub first_range: Range<usize>,
    pub second_range: Range<usize>,
}

fn serialize_bytes_as_str<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

impl AlignmentResult {
    #[inline]
    pub fn len(&self) -> usize {
        self.first.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = AlignedColumn> + '_ {
        self.first.iter()
            .zip(self.second.iter())
            .map(|(&a, &b)| AlignedColumn::classify(a, b))
    }

    /// Extended CIGAR string, using `=`/`X` for aligned columns, `I` for a gap
    /// in the first sequence and `D` for a gap in the second.
    pub fn cigar(&self) -> String {
        let runs = self.columns().chunk_by(|op| *op);

        let cigar = runs.into_iter()
            .fold(String::new(), |mut output, (op, group)| {
                let _ = write!(output, "{}{}", group.count(), op.cigar_op());
                output
            });

        cigar
    }

    pub fn stats(&self) -> AlignmentStats {
        self.columns()
            .fold(AlignmentStats::default(), |mut stats, column| {
                match column {
                    AlignedColumn::Match => stats.matches += 1,
                    AlignedColumn::Mismatch => stats.mismatches += 1,
                    AlignedColumn::Insertion | AlignedColumn::Deletion => stats.gaps += 1,
                }

                stats
            })
    }

    /// The gapped rows with gaps removed, i.e., the aligned parts of the input sequences
    pub fn ungapped(&self) -> (Vec<u8>, Vec<u8>) {
        let strip = |row: &[u8]| row.iter().copied().filter(|&c| c != GAP).collect::<Vec<_>>();

        (strip(&self.first), strip(&self.second))
    }
}

impl Display for AlignmentResult {
    /// Three line view: first sequence, a marker line (`|` match, `*` mismatch)
    /// and the second sequence.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let markers: String = self.columns()
            .map(|column| match column {
                AlignedColumn::Match => '|',
                AlignedColumn::Mismatch => '*',
                AlignedColumn::Insertion | AlignedColumn::Deletion => ' ',
            })
            .collect();

        write!(
            f,
            "{}\n{}\n{}",
            String::from_utf8_lossy(&self.first),
            markers,
            String::from_utf8_lossy(&self.second),
        )
    }
}
