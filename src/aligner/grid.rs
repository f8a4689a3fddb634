use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::aligner::scoring::Score;

/// Direction of an optimal predecessor in the alignment grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Arrow {
    /// From `(i, j - 1)`: a symbol of the first sequence against a gap
    Left,

    /// From `(i - 1, j - 1)`: both symbols aligned
    Diag,

    /// From `(i - 1, j)`: a symbol of the second sequence against a gap
    Top,
}

impl Arrow {
    pub const ALL: [Arrow; 3] = [Arrow::Left, Arrow::Diag, Arrow::Top];

    #[inline(always)]
    fn bit(self) -> u8 {
        match self {
            Self::Left => 0b001,
            Self::Diag => 0b010,
            Self::Top => 0b100,
        }
    }

    /// Position of the predecessor cell. Must not be called on a border cell
    /// that has no predecessor in this direction.
    #[inline(always)]
    pub fn predecessor(self, pos: GridPos) -> GridPos {
        match self {
            Self::Left => GridPos::new(pos.row, pos.col - 1),
            Self::Diag => GridPos::new(pos.row - 1, pos.col - 1),
            Self::Top => GridPos::new(pos.row - 1, pos.col),
        }
    }
}

/// The set of optimal predecessor directions for a single cell.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub struct ArrowSet(u8);

impl ArrowSet {
    pub const EMPTY: ArrowSet = ArrowSet(0);

    #[inline(always)]
    pub fn single(arrow: Arrow) -> Self {
        Self(arrow.bit())
    }

    #[inline(always)]
    pub fn insert(&mut self, arrow: Arrow) {
        self.0 |= arrow.bit();
    }

    #[inline(always)]
    pub fn contains(&self, arrow: Arrow) -> bool {
        self.0 & arrow.bit() != 0
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Arrows in the order LEFT, DIAG, TOP
    pub fn iter(&self) -> impl Iterator<Item = Arrow> {
        let set = *self;
        Arrow::ALL.into_iter().filter(move |arrow| set.contains(*arrow))
    }
}

impl fmt::Debug for ArrowSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Row/column position in the alignment grid. Row indexes the second sequence,
/// column indexes the first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    #[inline(always)]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn is_origin(&self) -> bool {
        self.row == 0 && self.col == 0
    }
}

/// Dense score and arrow matrices of identical shape, stored row-major.
#[derive(Clone)]
pub struct AlignmentGrid {
    rows: usize,
    cols: usize,
    scores: Vec<Score>,
    arrows: Vec<ArrowSet>,
}

impl AlignmentGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            scores: vec![0; rows * cols],
            arrows: vec![ArrowSet::EMPTY; rows * cols],
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn ix(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    #[inline(always)]
    pub fn score(&self, row: usize, col: usize) -> Score {
        self.scores[self.ix(row, col)]
    }

    #[inline(always)]
    pub fn score_at(&self, pos: GridPos) -> Score {
        self.score(pos.row, pos.col)
    }

    #[inline(always)]
    pub fn arrows(&self, row: usize, col: usize) -> ArrowSet {
        self.arrows[self.ix(row, col)]
    }

    #[inline(always)]
    pub fn arrows_at(&self, pos: GridPos) -> ArrowSet {
        self.arrows(pos.row, pos.col)
    }

    #[inline(always)]
    pub fn set(&mut self, row: usize, col: usize, score: Score, arrows: ArrowSet) {
        let ix = self.ix(row, col);
        self.scores[ix] = score;
        self.arrows[ix] = arrows;
    }

    #[inline(always)]
    pub fn bottom_right(&self) -> GridPos {
        GridPos::new(self.rows - 1, self.cols - 1)
    }

    /// Highest score anywhere in the grid
    pub fn max_score(&self) -> Score {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// All cells holding `score`, in row-major order
    pub fn positions_with_score(&self, score: Score) -> impl Iterator<Item = GridPos> + '_ {
        let cols = self.cols;

        self.scores.iter()
            .enumerate()
            .filter(move |(_, s)| **s == score)
            .map(move |(ix, _)| GridPos::new(ix / cols, ix % cols))
    }
}

impl Display for AlignmentGrid {
    /// Tab separated score matrix, mostly useful for debugging
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.scores.chunks(self.cols) {
            writeln!(f, "{}", row.iter().join("\t"))?;
        }

        Ok(())
    }
}
