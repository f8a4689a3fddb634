use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use crate::sequence::SequenceRole;

#[derive(Debug)]
pub enum PairAlignError {
    /// One of the input sequences has no symbols
    EmptySequence(SequenceRole),

    /// A sequence contains the reserved gap symbol at the given (0-based) position
    ReservedSymbol { sequence: SequenceRole, position: usize },

    /// Alignment enumeration was requested with a maximum count of zero
    InvalidRequestCount,

    /// Alignments were requested before the score matrix was filled
    ComputationNotPerformed,

    /// The substitution matrix definition is malformed
    InvalidScoringMatrix(String),

    /// The FASTA file did not contain any records
    EmptyFasta,

    /// Error variant when we couldn't read from a file
    FileReadError { source: io::Error },

    /// Error variant when (de)serializing JSON failed
    SerializationError { source: serde_json::Error },

    /// Other IO errors
    IOError(io::Error),
}

impl PairAlignError {
    /// Whether this error was caused by unusable input sequences.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptySequence(_) | Self::ReservedSymbol { .. })
    }
}

impl Error for PairAlignError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            Self::FileReadError { ref source } => Some(source),
            Self::SerializationError { ref source } => Some(source),
            Self::IOError(ref source) => Some(source),
            _ => None
        }
    }
}

impl From<io::Error> for PairAlignError {
    fn from(value: io::Error) -> Self {
        Self::IOError(value)
    }
}

impl From<serde_json::Error> for PairAlignError {
    fn from(value: serde_json::Error) -> Self {
        Self::SerializationError {
            source: value
        }
    }
}

impl Display for PairAlignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::EmptySequence(role) =>
                write!(f, "The {role} sequence is empty!"),
            Self::ReservedSymbol { sequence, position } =>
                write!(f, "The {sequence} sequence contains the reserved gap symbol at position {position}!"),
            Self::InvalidRequestCount =>
                write!(f, "The maximum number of alignments to report must be at least 1!"),
            Self::ComputationNotPerformed =>
                write!(f, "Alignments requested before the alignment score was computed!"),
            Self::InvalidScoringMatrix(ref reason) =>
                write!(f, "Invalid substitution matrix: {reason}"),
            Self::EmptyFasta =>
                write!(f, "The FASTA file does not contain any sequences!"),
            Self::FileReadError { source: _ } =>
                write!(f, "Could not read from file!"),
            Self::SerializationError { ref source } =>
                write!(f, "Could not (de)serialize JSON: {source}"),
            Self::IOError(ref err) =>
                err.fmt(f),
        }
    }
}
