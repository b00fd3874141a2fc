//! Affine-gap pairwise sequence alignment.
//!
//! A general alignment primitive over arbitrary symbol sequences, used
//! wherever two transcriptions or segmentations must be compared position by
//! position. It is a pure function of its inputs: no caches, no shared
//! state, safe to call from any thread.
//!
//! # Cost models
//!
//! Substitution scores come from a per-pair table, defaulting to +1 for a
//! match and -1 for a mismatch. Gaps are costed by one of two mutually
//! exclusive models:
//!
//! - [`GapModel::Affine`]: opening a new gap costs `open`, continuing an
//!   existing one costs `extend` (defaults -2.5 / -1.75);
//! - [`GapModel::PerSymbol`]: each symbol carries its own indel cost, with a
//!   fallback for symbols absent from the table.
//!
//! # Determinism
//!
//! When several operations tie for the best score at a cell, the priority is
//! diagonal match/mismatch, then consuming from `x`, then consuming from
//! `y`. Local mode starts its traceback at the first maximal cell in
//! row-major order. Identical inputs therefore always produce the identical
//! alignment.
//!
//! # Example
//!
//! ```
//! use orthophon::alignment::{align_chars, AlignmentParams};
//!
//! let params = AlignmentParams::new('-');
//! let result = align_chars("AAAAABBBB", "AACAABBCB", &params).unwrap();
//! assert_eq!(result.score, 5.0);
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Default gap-open cost for the affine model.
pub const DEFAULT_GAP_OPEN: f64 = -2.5;

/// Default gap-extend cost for the affine model, also the conventional
/// fallback for per-symbol tables.
pub const DEFAULT_GAP_EXTEND: f64 = -1.75;

/// Errors raised by alignment parameter validation.
///
/// Validation runs before any matrix work; an alignment is never attempted
/// with invalid parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignmentError {
    /// A gap cost is NaN or infinite.
    #[error("non-finite gap cost: {0}")]
    NonFiniteGap(f64),
    /// A substitution score is NaN or infinite.
    #[error("non-finite substitution score: {0}")]
    NonFiniteScore(f64),
}

/// A specialized `Result` type for alignment operations.
pub type Result<T> = std::result::Result<T, AlignmentError>;

/// Whether the alignment spans both sequences or only their best region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentMode {
    /// Align the sequences end to end.
    #[default]
    Global,
    /// Align the highest-scoring local region; scores clamp at zero.
    Local,
}

/// Gap cost model.
#[derive(Debug, Clone)]
pub enum GapModel<S> {
    /// Opening a new gap costs `open`; each further step costs `extend`.
    Affine {
        /// Cost of the first indel of a gap.
        open: f64,
        /// Cost of continuing a gap in the same direction.
        extend: f64,
    },
    /// Indel cost looked up per symbol.
    PerSymbol {
        /// Cost of aligning each symbol against a gap.
        costs: FxHashMap<S, f64>,
        /// Cost for symbols absent from the table.
        fallback: f64,
    },
}

impl<S> Default for GapModel<S> {
    fn default() -> Self {
        GapModel::Affine {
            open: DEFAULT_GAP_OPEN,
            extend: DEFAULT_GAP_EXTEND,
        }
    }
}

/// Parameters for [`align`].
#[derive(Debug, Clone)]
pub struct AlignmentParams<S> {
    /// Substitution scores per symbol pair. Pairs absent from the table
    /// score +1 when the symbols are equal and -1 otherwise.
    pub scores: FxHashMap<(S, S), f64>,
    /// Gap cost model.
    pub gap: GapModel<S>,
    /// Global or local alignment.
    pub mode: AlignmentMode,
    /// Placeholder emitted opposite an unmatched symbol.
    pub indel: S,
}

impl<S> AlignmentParams<S> {
    /// Default parameters: empty score table, affine gaps, global mode.
    pub fn new(indel: S) -> Self {
        Self {
            scores: FxHashMap::default(),
            gap: GapModel::default(),
            mode: AlignmentMode::Global,
            indel,
        }
    }

    /// Switch to local mode.
    pub fn local(mut self) -> Self {
        self.mode = AlignmentMode::Local;
        self
    }

    /// Replace the gap model.
    pub fn with_gap(mut self, gap: GapModel<S>) -> Self {
        self.gap = gap;
        self
    }

    /// Replace the substitution score table.
    pub fn with_scores(mut self, scores: FxHashMap<(S, S), f64>) -> Self {
        self.scores = scores;
        self
    }
}

/// An optimal score and one alignment achieving it.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment<S> {
    /// Score at the traceback start cell.
    pub score: f64,
    /// Aligned symbol pairs in sequence order; either side of a pair may be
    /// the indel placeholder.
    pub pairs: Vec<(S, S)>,
}

/// Traceback direction of one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dir {
    Diag,
    FromX,
    FromY,
}

fn validate<S>(params: &AlignmentParams<S>) -> Result<()> {
    match &params.gap {
        GapModel::Affine { open, extend } => {
            for cost in [*open, *extend] {
                if !cost.is_finite() {
                    return Err(AlignmentError::NonFiniteGap(cost));
                }
            }
        }
        GapModel::PerSymbol { costs, fallback } => {
            if !fallback.is_finite() {
                return Err(AlignmentError::NonFiniteGap(*fallback));
            }
            for cost in costs.values() {
                if !cost.is_finite() {
                    return Err(AlignmentError::NonFiniteGap(*cost));
                }
            }
        }
    }
    for score in params.scores.values() {
        if !score.is_finite() {
            return Err(AlignmentError::NonFiniteScore(*score));
        }
    }
    Ok(())
}

/// Align two symbol sequences.
///
/// Fills an `(n+1) x (m+1)` score matrix and a parallel traceback matrix by
/// rows, then reconstructs one optimal alignment by walking the traceback
/// from the end cell (global) or from the first row-major maximum down to
/// the first zero-score cell (local). `O(n*m)` time and space.
pub fn align<S>(x: &[S], y: &[S], params: &AlignmentParams<S>) -> Result<Alignment<S>>
where
    S: Clone + Eq + Hash,
{
    validate(params)?;

    let n = x.len();
    let m = y.len();
    let width = m + 1;
    let local = params.mode == AlignmentMode::Local;

    let mut scores = vec![0.0_f64; (n + 1) * width];
    let mut trace = vec![Dir::Diag; (n + 1) * width];

    let indel_cost = |symbol: &S, run: bool| -> f64 {
        match &params.gap {
            GapModel::Affine { open, extend } => {
                if run {
                    *extend
                } else {
                    *open
                }
            }
            GapModel::PerSymbol { costs, fallback } => {
                costs.get(symbol).copied().unwrap_or(*fallback)
            }
        }
    };
    let substitution = |a: &S, b: &S| -> f64 {
        params
            .scores
            .get(&(a.clone(), b.clone()))
            .copied()
            .unwrap_or(if a == b { 1.0 } else { -1.0 })
    };

    if !local {
        // cumulative gap costs along both borders
        for i in 1..=n {
            scores[i * width] = scores[(i - 1) * width] + indel_cost(&x[i - 1], i > 1);
            trace[i * width] = Dir::FromX;
        }
        for j in 1..=m {
            scores[j] = scores[j - 1] + indel_cost(&y[j - 1], j > 1);
            trace[j] = Dir::FromY;
        }
    }

    for i in 1..=n {
        for j in 1..=m {
            let matched = scores[(i - 1) * width + j - 1] + substitution(&x[i - 1], &y[j - 1]);
            let from_x = scores[(i - 1) * width + j]
                + indel_cost(&x[i - 1], trace[(i - 1) * width + j] == Dir::FromX);
            let from_y = scores[i * width + j - 1]
                + indel_cost(&y[j - 1], trace[i * width + j - 1] == Dir::FromY);

            // ties resolve diagonal first, then consume-from-x
            let (mut best, mut dir) = (matched, Dir::Diag);
            if from_x > best {
                best = from_x;
                dir = Dir::FromX;
            }
            if from_y > best {
                best = from_y;
                dir = Dir::FromY;
            }
            if local && best < 0.0 {
                best = 0.0;
            }
            scores[i * width + j] = best;
            trace[i * width + j] = dir;
        }
    }

    let (mut i, mut j) = if local {
        // first maximum in row-major order
        let mut at = (0, 0);
        let mut top = f64::NEG_INFINITY;
        for row in 0..=n {
            for col in 0..=m {
                let score = scores[row * width + col];
                if score > top {
                    top = score;
                    at = (row, col);
                }
            }
        }
        at
    } else {
        (n, m)
    };

    let score = scores[i * width + j];
    let mut pairs: Vec<(S, S)> = Vec::with_capacity(n.max(m));
    while i > 0 || j > 0 {
        match trace[i * width + j] {
            Dir::Diag => {
                i -= 1;
                j -= 1;
                pairs.push((x[i].clone(), y[j].clone()));
            }
            Dir::FromX => {
                i -= 1;
                pairs.push((x[i].clone(), params.indel.clone()));
            }
            Dir::FromY => {
                j -= 1;
                pairs.push((params.indel.clone(), y[j].clone()));
            }
        }
        if local && scores[i * width + j] == 0.0 {
            break;
        }
    }
    pairs.reverse();

    Ok(Alignment { score, pairs })
}

/// Align two strings as character sequences.
///
/// Convenience wrapper over [`align`] collecting each string into its
/// characters.
pub fn align_chars(x: &str, y: &str, params: &AlignmentParams<char>) -> Result<Alignment<char>> {
    let xs: SmallVec<[char; 32]> = x.chars().collect();
    let ys: SmallVec<[char; 32]> = y.chars().collect();
    align(&xs, &ys, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_alignment_of_similar_strings() {
        let params = AlignmentParams::new('-');
        let result = align_chars("AAAAABBBB", "AACAABBCB", &params).unwrap();
        assert_eq!(result.score, 5.0);
        assert_eq!(
            result.pairs,
            vec![
                ('A', 'A'),
                ('A', 'A'),
                ('A', 'C'),
                ('A', 'A'),
                ('A', 'A'),
                ('B', 'B'),
                ('B', 'B'),
                ('B', 'C'),
                ('B', 'B'),
            ]
        );
    }

    #[test]
    fn local_alignment_finds_the_best_region() {
        let params = AlignmentParams::new('-').local();
        let result = align_chars("banana", "mancala", &params).unwrap();
        assert_eq!(result.score, 2.0);
        assert_eq!(result.pairs, vec![('a', 'a'), ('n', 'n')]);
    }

    #[test]
    fn per_symbol_indel_costs() {
        let costs: FxHashMap<char, f64> =
            [('a', 0.0), ('b', -2.0), ('c', -0.5)].into_iter().collect();
        let params = AlignmentParams::new('-').with_gap(GapModel::PerSymbol {
            costs,
            fallback: DEFAULT_GAP_EXTEND,
        });
        let result = align_chars("abc", "t", &params).unwrap();
        assert_eq!(result.score, -1.5);
        assert_eq!(
            result.pairs,
            vec![('a', '-'), ('b', 't'), ('c', '-')]
        );
    }

    #[test]
    fn identical_sequences_score_their_length() {
        let params = AlignmentParams::new('-');
        let result = align_chars("kitten", "kitten", &params).unwrap();
        assert_eq!(result.score, 6.0);
        assert!(result.pairs.iter().all(|(a, b)| a == b));
    }

    #[test]
    fn empty_against_nonempty_is_all_indels() {
        let params = AlignmentParams::new('-');
        let result = align_chars("", "ab", &params).unwrap();
        assert_eq!(result.pairs, vec![('-', 'a'), ('-', 'b')]);
        // one open plus one extend
        assert_eq!(result.score, DEFAULT_GAP_OPEN + DEFAULT_GAP_EXTEND);
    }

    #[test]
    fn both_empty_is_the_empty_alignment() {
        let params = AlignmentParams::new('-');
        let result = align_chars("", "", &params).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.pairs.is_empty());
    }

    #[test]
    fn custom_substitution_scores_are_honored() {
        let scores: FxHashMap<(char, char), f64> = [(('a', 'b'), 0.5)].into_iter().collect();
        let params = AlignmentParams::new('-').with_scores(scores);
        let result = align_chars("a", "b", &params).unwrap();
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn non_finite_gap_parameters_are_rejected() {
        let params = AlignmentParams::new('-').with_gap(GapModel::Affine {
            open: f64::NAN,
            extend: DEFAULT_GAP_EXTEND,
        });
        assert!(matches!(
            align_chars("a", "b", &params),
            Err(AlignmentError::NonFiniteGap(_))
        ));

        let params = AlignmentParams::new('-').with_gap(GapModel::PerSymbol {
            costs: FxHashMap::default(),
            fallback: f64::INFINITY,
        });
        assert!(matches!(
            align_chars("a", "b", &params),
            Err(AlignmentError::NonFiniteGap(_))
        ));
    }

    #[test]
    fn non_finite_substitution_scores_are_rejected() {
        let scores: FxHashMap<(char, char), f64> =
            [(('a', 'b'), f64::NAN)].into_iter().collect();
        let params = AlignmentParams::new('-').with_scores(scores);
        assert!(matches!(
            align_chars("a", "b", &params),
            Err(AlignmentError::NonFiniteScore(_))
        ));
    }

    #[test]
    fn works_over_arbitrary_symbol_types() {
        let x = vec!["t".to_string(), "aː".to_string()];
        let y = vec!["t".to_string(), "a".to_string()];
        let params = AlignmentParams::new(String::new());
        let result = align(&x, &y, &params).unwrap();
        assert_eq!(result.score, 0.0); // one match, one mismatch
        assert_eq!(result.pairs.len(), 2);
    }

    #[test]
    fn local_score_is_never_negative() {
        let params = AlignmentParams::new('-').local();
        let result = align_chars("xyz", "abc", &params).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(result.pairs.is_empty());
    }

    #[test]
    fn deterministic_tie_breaking() {
        let params = AlignmentParams::new('-');
        let a = align_chars("ab", "ba", &params).unwrap();
        let b = align_chars("ab", "ba", &params).unwrap();
        assert_eq!(a, b);
    }
}
