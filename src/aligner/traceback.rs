use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::{debug_span, trace, Span};

use crate::aligner::alignment::AlignmentResult;
use crate::aligner::grid::{AlignmentGrid, Arrow, GridPos};
use crate::aligner::scoring::{Score, GAP};
use crate::aligner::variants::AlignmentVariant;
use crate::sequence::PaddedSequence;

/// A partially reconstructed alignment.
///
/// Rows are built back to front; to avoid shifting on every prepend, symbols
/// are pushed and the rows are reversed once the path completes.
#[derive(Clone, Debug)]
struct BacktrackNode {
    first_rev: Vec<u8>,
    second_rev: Vec<u8>,
    pos: GridPos,
    seed: GridPos,
}

impl BacktrackNode {
    fn new(seed: GridPos) -> Self {
        Self {
            first_rev: Vec::new(),
            second_rev: Vec::new(),
            pos: seed,
            seed,
        }
    }

    fn child(&self, arrow: Arrow, first: &PaddedSequence, second: &PaddedSequence) -> Self {
        let (a, b) = match arrow {
            Arrow::Left => (first[self.pos.col], GAP),
            Arrow::Diag => (first[self.pos.col], second[self.pos.row]),
            Arrow::Top => (GAP, second[self.pos.row]),
        };

        let mut first_rev = Vec::with_capacity(self.first_rev.len() + 1);
        first_rev.extend_from_slice(&self.first_rev);
        first_rev.push(a);

        let mut second_rev = Vec::with_capacity(self.second_rev.len() + 1);
        second_rev.extend_from_slice(&self.second_rev);
        second_rev.push(b);

        Self {
            first_rev,
            second_rev,
            pos: arrow.predecessor(self.pos),
            seed: self.seed,
        }
    }

    fn into_result(self, score: Score) -> AlignmentResult {
        let BacktrackNode { mut first_rev, mut second_rev, pos, seed } = self;
        first_rev.reverse();
        second_rev.reverse();

        // Grid column k holds symbol k - 1 of the unpadded sequence
        AlignmentResult {
            score,
            first: first_rev,
            second: second_rev,
            first_range: pos.col..seed.col,
            second_range: pos.row..seed.row,
        }
    }
}

/// Depth-first enumeration of co-optimal alignments.
///
/// Uses an explicit LIFO stack. Children are pushed in LEFT, DIAG, TOP order,
/// so ties are explored TOP first, then DIAG, then LEFT. Yields at most the
/// requested number of alignments, fewer if the paths run out.
pub struct Alignments<'a, V> {
    grid: &'a AlignmentGrid,
    first: &'a PaddedSequence,
    second: &'a PaddedSequence,
    score: Score,
    stack: Vec<BacktrackNode>,
    remaining: usize,
    span: Span,
    variant: PhantomData<V>,
}

impl<'a, V> Alignments<'a, V>
where
    V: AlignmentVariant,
{
    pub(crate) fn new(
        grid: &'a AlignmentGrid,
        first: &'a PaddedSequence,
        second: &'a PaddedSequence,
        score: Score,
        max_count: usize,
    ) -> Self {
        let span = debug_span!("enumerate_alignments", variant = V::NAME, max_count);

        let stack: Vec<_> = span.in_scope(|| {
            let stack: Vec<_> = V::seeds(grid)
                .into_iter()
                .map(BacktrackNode::new)
                .collect();

            trace!(seeds = stack.len(), "start traceback");
            stack
        });

        Self {
            grid,
            first,
            second,
            score,
            stack,
            remaining: max_count,
            span,
            variant: PhantomData,
        }
    }
}

impl<V> Iterator for Alignments<'_, V>
where
    V: AlignmentVariant,
{
    type Item = AlignmentResult;

    fn next(&mut self) -> Option<Self::Item> {
        let _enter = self.span.enter();

        while self.remaining > 0 {
            let node = self.stack.pop()?;

            if V::is_terminal(self.grid, node.pos) {
                self.remaining -= 1;
                trace!(row = node.pos.row, col = node.pos.col, "path complete");

                return Some(node.into_result(self.score));
            }

            let arrows = self.grid.arrows_at(node.pos);
            if arrows.is_empty() {
                trace!(row = node.pos.row, col = node.pos.col, "dead end");
                continue;
            }

            for arrow in arrows.iter() {
                self.stack.push(node.child(arrow, self.first, self.second));
            }
        }

        None
    }
}

impl<V> FusedIterator for Alignments<'_, V>
where
    V: AlignmentVariant,
{ }

#[cfg(test)]
mod tests {
    use super::Alignments;
    use crate::aligner::builder::fill_grid;
    use crate::aligner::grid::AlignmentGrid;
    use crate::aligner::scoring::GapLinear;
    use crate::aligner::variants::{AlignmentVariant, Global, Local};
    use crate::sequence::{PaddedSequence, SequenceRole};

    fn traceback<V: AlignmentVariant>(first: &[u8], second: &[u8], max_count: usize) -> Vec<(String, String)> {
        let first = PaddedSequence::new(first, SequenceRole::First).unwrap();
        let second = PaddedSequence::new(second, SequenceRole::Second).unwrap();
        let mut grid = AlignmentGrid::new(second.padded_len(), first.padded_len());
        let score = fill_grid::<V, _, _>(&mut grid, &first, &second, &GapLinear::default(), |_| ());

        Alignments::<V>::new(&grid, &first, &second, score, max_count)
            .map(|aln| {
                (String::from_utf8(aln.first).unwrap(), String::from_utf8(aln.second).unwrap())
            })
            .collect()
    }

    #[test]
    fn test_tie_order() {
        // TOP is explored before DIAG before LEFT
        let alns = traceback::<Global>(b"AAA", b"AA", 10);
        assert_eq!(alns, vec![
            ("AAA".to_string(), "-AA".to_string()),
            ("AAA".to_string(), "A-A".to_string()),
            ("AAA".to_string(), "AA-".to_string()),
        ]);
    }

    #[test]
    fn test_max_count() {
        let alns = traceback::<Global>(b"AAA", b"AA", 2);
        assert_eq!(alns.len(), 2);
        assert_eq!(alns[1], ("AAA".to_string(), "A-A".to_string()));
    }

    #[test]
    fn test_leading_gap_reaches_origin() {
        let alns = traceback::<Global>(b"A", b"AA", 10);
        assert_eq!(alns, vec![
            ("A-".to_string(), "AA".to_string()),
            ("-A".to_string(), "AA".to_string()),
        ]);
    }

    #[test]
    fn test_local_stops_at_zero() {
        let alns = traceback::<Local>(b"TTACG", b"GACT", 10);
        assert_eq!(alns, vec![("AC".to_string(), "AC".to_string())]);
    }

    #[test]
    fn test_local_without_positive_score() {
        // Every cell ties at the maximum of zero and is terminal right away
        let alns = traceback::<Local>(b"TTT", b"GGG", 10);
        assert_eq!(alns.len(), 10);
        assert!(alns.iter().all(|(a, b)| a.is_empty() && b.is_empty()));

        let first = PaddedSequence::new(b"A", SequenceRole::First).unwrap();
        let second = PaddedSequence::new(b"B", SequenceRole::Second).unwrap();
        let mut grid = AlignmentGrid::new(second.padded_len(), first.padded_len());
        let score = fill_grid::<Local, _, _>(&mut grid, &first, &second, &GapLinear::default(), |_| ());
        assert_eq!(score, 0);

        let ranges: Vec<_> = Alignments::<Local>::new(&grid, &first, &second, score, 3)
            .map(|aln| (aln.first_range, aln.second_range))
            .collect();
        assert_eq!(ranges, vec![(1..1, 1..1), (0..0, 1..1), (1..1, 0..0)]);
    }

    #[test]
    fn test_ranges() {
        let first = PaddedSequence::new(b"TTACG", SequenceRole::First).unwrap();
        let second = PaddedSequence::new(b"GACT", SequenceRole::Second).unwrap();
        let mut grid = AlignmentGrid::new(second.padded_len(), first.padded_len());
        let score = fill_grid::<Local, _, _>(&mut grid, &first, &second, &GapLinear::default(), |_| ());

        let aln = Alignments::<Local>::new(&grid, &first, &second, score, 1).next().unwrap();
        assert_eq!(aln.score, 2);
        assert_eq!(aln.first_range, 2..4);
        assert_eq!(aln.second_range, 1..3);
        assert_eq!(&first.residues()[aln.first_range.clone()], b"AC");
        assert_eq!(&second.residues()[aln.second_range.clone()], b"AC");
    }
}
