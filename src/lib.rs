//! Optimal pairwise sequence alignment.
//!
//! Global (Needleman-Wunsch) and local (Smith-Waterman) alignment with a
//! pluggable scoring function, reporting every co-optimal alignment up to a
//! requested maximum.

pub mod errors;
pub mod sequence;
pub mod aligner;
pub mod io;
