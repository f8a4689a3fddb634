use tracing::trace;

use crate::aligner::grid::{AlignmentGrid, Arrow, ArrowSet};
use crate::aligner::scoring::{Score, ScoringFunction};
use crate::aligner::variants::AlignmentVariant;
use crate::sequence::PaddedSequence;

/// Emitted after each completed interior row of the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowProgress {
    /// Grid row that was just completed, starting at 1
    pub row: usize,

    /// Number of interior rows, i.e., the length of the second sequence
    pub total_rows: usize,
}

impl RowProgress {
    pub fn fraction(&self) -> f64 {
        self.row as f64 / self.total_rows as f64
    }
}

/// Fill score and arrow matrices in a single row-major pass and return the
/// variant's alignment score.
///
/// Every direction whose candidate score equals the stored cell score is
/// recorded, so ties between predecessors are kept for traceback.
pub(crate) fn fill_grid<V, S, F>(
    grid: &mut AlignmentGrid,
    first: &PaddedSequence,
    second: &PaddedSequence,
    scoring: &S,
    mut on_row: F,
) -> Score
where
    V: AlignmentVariant,
    S: ScoringFunction,
    F: FnMut(RowProgress),
{
    debug_assert_eq!(grid.rows(), second.padded_len());
    debug_assert_eq!(grid.cols(), first.padded_len());

    let gap = scoring.gap_penalty();
    V::init_borders(grid, gap);

    let total_rows = grid.rows() - 1;
    for i in 1..grid.rows() {
        for j in 1..grid.cols() {
            let candidates = [
                (Arrow::Left, grid.score(i, j - 1).saturating_add(gap)),
                (Arrow::Diag, grid.score(i - 1, j - 1).saturating_add(scoring.score(first[j], second[i]))),
                (Arrow::Top, grid.score(i - 1, j).saturating_add(gap)),
            ];

            let best = candidates.iter()
                .map(|(_, score)| *score)
                .max()
                .unwrap_or(Score::MIN);
            let cell_score = V::max_method(best);

            let mut arrows = ArrowSet::EMPTY;
            for (arrow, score) in candidates {
                if score == cell_score {
                    arrows.insert(arrow);
                }
            }

            grid.set(i, j, cell_score, arrows);
        }

        trace!(row = i, total_rows, "filled row");
        on_row(RowProgress { row: i, total_rows });
    }

    V::alignment_score(grid)
}

#[cfg(test)]
mod tests {
    use super::{fill_grid, RowProgress};
    use crate::aligner::grid::{AlignmentGrid, Arrow, ArrowSet};
    use crate::aligner::scoring::GapLinear;
    use crate::aligner::variants::{Global, Local};
    use crate::sequence::{PaddedSequence, SequenceRole};

    fn padded(first: &[u8], second: &[u8]) -> (PaddedSequence, PaddedSequence) {
        (
            PaddedSequence::new(first, SequenceRole::First).unwrap(),
            PaddedSequence::new(second, SequenceRole::Second).unwrap(),
        )
    }

    #[test]
    fn test_global_fill() {
        let (first, second) = padded(b"AAA", b"AA");
        let mut grid = AlignmentGrid::new(second.padded_len(), first.padded_len());

        let mut progress = Vec::new();
        let score = fill_grid::<Global, _, _>(&mut grid, &first, &second, &GapLinear::default(), |p| progress.push(p));

        assert_eq!(score, 0);
        assert_eq!(format!("{grid}"), "0\t-2\t-4\t-6\n-2\t1\t-1\t-3\n-4\t-1\t2\t0\n");
        assert_eq!(progress, vec![
            RowProgress { row: 1, total_rows: 2 },
            RowProgress { row: 2, total_rows: 2 },
        ]);

        // Three co-optimal ways to place the single gap
        let mut expected = ArrowSet::single(Arrow::Left);
        expected.insert(Arrow::Diag);
        assert_eq!(grid.arrows(2, 3), expected);
        assert_eq!(grid.arrows(1, 1), ArrowSet::single(Arrow::Diag));
    }

    #[test]
    fn test_local_fill_is_floored() {
        let (first, second) = padded(b"TAC", b"GAC");
        let mut grid = AlignmentGrid::new(second.padded_len(), first.padded_len());

        let score = fill_grid::<Local, _, _>(&mut grid, &first, &second, &GapLinear::default(), |_| ());

        assert_eq!(score, 2);
        assert_eq!(format!("{grid}"), "0\t0\t0\t0\n0\t0\t0\t0\n0\t0\t1\t0\n0\t0\t0\t2\n");

        // T vs G only has negative candidates: floored cell without predecessors
        assert!(grid.arrows(1, 1).is_empty());
        assert_eq!(grid.arrows(3, 3), ArrowSet::single(Arrow::Diag));
    }
}
