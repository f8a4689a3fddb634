pub mod gap_linear;
pub mod matrix;

pub use gap_linear::{CaseSensitivity, GapLinear};
pub use matrix::SubstitutionMatrix;

/// Alignment scores. Larger is better.
pub type Score = i32;

/// The symbol denoting an inserted or deleted position in an alignment.
pub const GAP: u8 = b'-';

/// Maps a pair of symbols, either of which may be [`GAP`], to a score.
///
/// Implementations must return the gap penalty whenever one of the symbols is
/// the gap sentinel. The engine makes no assumption about the actual values
/// other than that they are comparable. Cell scores saturate at the bounds of
/// [`Score`], so penalties near `i32::MIN` no longer order alignments exactly.
pub trait ScoringFunction {
    fn score(&self, a: u8, b: u8) -> Score;

    /// Score of aligning a residue against a gap
    #[inline]
    fn gap_penalty(&self) -> Score {
        self.score(GAP, GAP)
    }
}

impl<T> ScoringFunction for &T
where
    T: ScoringFunction + ?Sized,
{
    #[inline]
    fn score(&self, a: u8, b: u8) -> Score {
        (**self).score(a, b)
    }
}

/// Adapter turning any closure into a [`ScoringFunction`].
///
/// ```
/// use pairalign::aligner::scoring::{ScoreFn, ScoringFunction, GAP};
///
/// let scoring = ScoreFn(|a: u8, b: u8| match (a, b) {
///     (GAP, _) | (_, GAP) => -3,
///     (a, b) if a == b => 2,
///     _ => -1,
/// });
///
/// assert_eq!(scoring.score(b'A', b'A'), 2);
/// assert_eq!(scoring.gap_penalty(), -3);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ScoreFn<F>(pub F);

impl<F> ScoringFunction for ScoreFn<F>
where
    F: Fn(u8, u8) -> Score,
{
    #[inline]
    fn score(&self, a: u8, b: u8) -> Score {
        (self.0)(a, b)
    }
}
