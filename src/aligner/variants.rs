//! Global (Needleman-Wunsch) and local (Smith-Waterman) alignment policies.
//!
//! Both variants share the same matrix fill and traceback. They only differ in
//! how the grid border is initialized, whether cell scores are floored at zero,
//! which cells traceback starts from, and where it stops.

use smallvec::{smallvec, SmallVec};

use crate::aligner::grid::{AlignmentGrid, Arrow, ArrowSet, GridPos};
use crate::aligner::scoring::Score;

/// Traceback start cells. Almost always a single cell.
pub type Seeds = SmallVec<[GridPos; 4]>;

pub trait AlignmentVariant {
    /// Name used in log output
    const NAME: &'static str;

    /// Applied to the best of the three candidate scores of an interior cell
    fn max_method(best_candidate: Score) -> Score;

    /// Fill row 0 and column 0. Called before any interior cell is computed.
    fn init_borders(grid: &mut AlignmentGrid, gap_penalty: Score);

    /// The alignment score of a completely filled grid
    fn alignment_score(grid: &AlignmentGrid) -> Score;

    /// Cells from which traceback starts, in the order they should be pushed
    fn seeds(grid: &AlignmentGrid) -> Seeds;

    /// Whether a traceback path ending at `pos` is complete
    fn is_terminal(grid: &AlignmentGrid, pos: GridPos) -> bool;
}

/// End-to-end alignment of both sequences.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl AlignmentVariant for Global {
    const NAME: &'static str = "global";

    #[inline(always)]
    fn max_method(best_candidate: Score) -> Score {
        best_candidate
    }

    fn init_borders(grid: &mut AlignmentGrid, gap_penalty: Score) {
        grid.set(0, 0, 0, ArrowSet::EMPTY);

        // Leading gaps: each border cell has a single predecessor towards the origin
        for i in 1..grid.rows() {
            grid.set(i, 0, (i as Score).saturating_mul(gap_penalty), ArrowSet::single(Arrow::Top));
        }

        for j in 1..grid.cols() {
            grid.set(0, j, (j as Score).saturating_mul(gap_penalty), ArrowSet::single(Arrow::Left));
        }
    }

    fn alignment_score(grid: &AlignmentGrid) -> Score {
        grid.score_at(grid.bottom_right())
    }

    fn seeds(grid: &AlignmentGrid) -> Seeds {
        smallvec![grid.bottom_right()]
    }

    #[inline(always)]
    fn is_terminal(_: &AlignmentGrid, pos: GridPos) -> bool {
        pos.is_origin()
    }
}

/// Alignment of the highest scoring pair of substrings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Local;

impl AlignmentVariant for Local {
    const NAME: &'static str = "local";

    #[inline(always)]
    fn max_method(best_candidate: Score) -> Score {
        best_candidate.max(0)
    }

    fn init_borders(grid: &mut AlignmentGrid, _: Score) {
        for i in 0..grid.rows() {
            grid.set(i, 0, 0, ArrowSet::EMPTY);
        }

        for j in 1..grid.cols() {
            grid.set(0, j, 0, ArrowSet::EMPTY);
        }
    }

    fn alignment_score(grid: &AlignmentGrid) -> Score {
        grid.max_score()
    }

    /// Every cell attaining the grid maximum. If nothing scores above zero this
    /// is every cell, and each one yields an empty alignment.
    fn seeds(grid: &AlignmentGrid) -> Seeds {
        grid.positions_with_score(grid.max_score()).collect()
    }

    /// A path stops at the first zero-score cell, even if that cell still
    /// records predecessors that tie at zero.
    #[inline(always)]
    fn is_terminal(grid: &AlignmentGrid, pos: GridPos) -> bool {
        grid.score_at(pos) == 0
    }
}
