pub mod alignment;
pub mod builder;
pub mod grid;
pub mod scoring;
pub mod traceback;
pub mod variants;

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::errors::PairAlignError;
use crate::sequence::{PaddedSequence, SequenceRole};

pub use alignment::{AlignmentResult, AlignmentStats};
pub use builder::RowProgress;
pub use grid::{AlignmentGrid, Arrow, ArrowSet, GridPos};
pub use scoring::{Score, ScoringFunction};
pub use traceback::Alignments;
pub use variants::{AlignmentVariant, Global, Local};

/// Enum representing the kind of alignment to perform, for callers that pick
/// the variant at run time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentMode {
    /// Needleman-Wunsch: align both sequences end to end
    #[default]
    Global,

    /// Smith-Waterman: align the best scoring pair of substrings
    Local,
}

/// Score matrices and traceback for a single pair of sequences.
///
/// An engine owns its matrices; build a fresh one for every pair of sequences.
///
/// ```
/// use pairalign::aligner::{AlignmentEngine, Global};
/// use pairalign::aligner::scoring::GapLinear;
///
/// let mut engine = AlignmentEngine::<Global, _>::new(b"GATTACA", b"GCATGCU", GapLinear::default())?;
/// assert_eq!(engine.compute_score(), -1);
///
/// let alignments: Vec<_> = engine.enumerate_alignments(5)?.collect();
/// assert_eq!(alignments[0].first, b"GATTACA");
/// assert_eq!(alignments[0].second, b"GCATGCU");
/// # Ok::<(), pairalign::errors::PairAlignError>(())
/// ```
pub struct AlignmentEngine<V, S> {
    first: PaddedSequence,
    second: PaddedSequence,
    scoring: S,
    grid: AlignmentGrid,
    score: Option<Score>,
    variant: PhantomData<V>,
}

impl<V, S> AlignmentEngine<V, S>
where
    V: AlignmentVariant,
    S: ScoringFunction,
{
    /// Validate both sequences and allocate the grid. Does not compute anything yet.
    pub fn new(
        first: impl AsRef<[u8]>,
        second: impl AsRef<[u8]>,
        scoring: S,
    ) -> Result<Self, PairAlignError> {
        let first = PaddedSequence::new(first.as_ref(), SequenceRole::First)?;
        let second = PaddedSequence::new(second.as_ref(), SequenceRole::Second)?;
        let grid = AlignmentGrid::new(second.padded_len(), first.padded_len());

        Ok(Self {
            first,
            second,
            scoring,
            grid,
            score: None,
            variant: PhantomData,
        })
    }

    /// Fill the grid and return the alignment score.
    pub fn compute_score(&mut self) -> Score {
        self.compute_score_with_progress(|_| ())
    }

    /// Like [`compute_score`](Self::compute_score), calling `on_row` after each completed row.
    ///
    /// The grid is only filled once; later calls return the cached score
    /// without invoking `on_row`.
    pub fn compute_score_with_progress<F>(&mut self, on_row: F) -> Score
    where
        F: FnMut(RowProgress),
    {
        if let Some(score) = self.score {
            return score;
        }

        let span = debug_span!("fill_grid", variant = V::NAME, rows = self.grid.rows(), cols = self.grid.cols());
        let _enter = span.enter();

        let score = builder::fill_grid::<V, _, _>(&mut self.grid, &self.first, &self.second, &self.scoring, on_row);
        debug!(score, "alignment score computed");

        self.score = Some(score);
        score
    }

    /// Enumerate up to `max_count` optimal alignments.
    ///
    /// The order is deterministic, and calling this again yields the same alignments.
    pub fn enumerate_alignments(&self, max_count: usize) -> Result<Alignments<'_, V>, PairAlignError> {
        if max_count == 0 {
            return Err(PairAlignError::InvalidRequestCount);
        }

        let Some(score) = self.score else {
            return Err(PairAlignError::ComputationNotPerformed);
        };

        debug!(variant = V::NAME, max_count, "enumerating alignments");
        Ok(Alignments::new(&self.grid, &self.first, &self.second, score, max_count))
    }

    /// The alignment score, if already computed
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Read-only view of the score and arrow matrices
    pub fn grid(&self) -> &AlignmentGrid {
        &self.grid
    }

    pub fn first(&self) -> &[u8] {
        self.first.residues()
    }

    pub fn second(&self) -> &[u8] {
        self.second.residues()
    }

    pub fn scoring(&self) -> &S {
        &self.scoring
    }
}

fn run_engine<V, S, F>(
    first: &[u8],
    second: &[u8],
    scoring: S,
    max_count: usize,
    on_row: F,
) -> Result<(Score, Vec<AlignmentResult>), PairAlignError>
where
    V: AlignmentVariant,
    S: ScoringFunction,
    F: FnMut(RowProgress),
{
    let mut engine = AlignmentEngine::<V, S>::new(first, second, scoring)?;
    let score = engine.compute_score_with_progress(on_row);
    let alignments = engine.enumerate_alignments(max_count)?.collect();

    Ok((score, alignments))
}

/// Compute the score and up to `max_count` optimal alignments in one go.
pub fn align<S>(
    mode: AlignmentMode,
    first: impl AsRef<[u8]>,
    second: impl AsRef<[u8]>,
    scoring: S,
    max_count: usize,
) -> Result<(Score, Vec<AlignmentResult>), PairAlignError>
where
    S: ScoringFunction,
{
    align_with_progress(mode, first, second, scoring, max_count, |_| ())
}

/// [`align`] with a row-completion callback for progress reporting.
pub fn align_with_progress<S, F>(
    mode: AlignmentMode,
    first: impl AsRef<[u8]>,
    second: impl AsRef<[u8]>,
    scoring: S,
    max_count: usize,
    on_row: F,
) -> Result<(Score, Vec<AlignmentResult>), PairAlignError>
where
    S: ScoringFunction,
    F: FnMut(RowProgress),
{
    // Fail before allocating any matrices
    if max_count == 0 {
        return Err(PairAlignError::InvalidRequestCount);
    }

    match mode {
        AlignmentMode::Global =>
            run_engine::<Global, _, _>(first.as_ref(), second.as_ref(), scoring, max_count, on_row),
        AlignmentMode::Local =>
            run_engine::<Local, _, _>(first.as_ref(), second.as_ref(), scoring, max_count, on_row),
    }
}
