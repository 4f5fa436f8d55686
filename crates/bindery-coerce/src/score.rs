//! Match scores
//!
//! Lower is better. Four disjoint bands:
//!
//! | Band          | Value            | Meaning                                   |
//! |---------------|------------------|-------------------------------------------|
//! | `EXACT`       | `0`              | no conversion needed                      |
//! | penalties     | `1..NULL_VALUE`  | safe but imperfect numeric conversions    |
//! | `NULL_VALUE`  | `0x10`           | nil bound to a reference parameter        |
//! | `WRONG_TYPE`  | `0x100`          | convertible only through a lossy transform|
//! | `UNCOERCIBLE` | `0x10000`        | cannot be delivered; absorbs any sum      |
//!
//! A single coercible argument costs at most [`MAX_ARGUMENT_SCORE`]
//! (`WRONG_TYPE` plus the text-to-number penalty), and
//! `MAX_ARGUMENT_SCORE * MAX_ARITY < UNCOERCIBLE` keeps the sum of any
//! admissible call finite.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use bindery_types::UNREACHABLE;

/// Extra cost of reading a number out of text
pub const TEXT_TO_NUMBER_PENALTY: u32 = 4;

/// Highest finite score of one argument: `WRONG_TYPE` plus the
/// text-to-number penalty
pub const MAX_ARGUMENT_SCORE: u32 = Score::WRONG_TYPE.0 + TEXT_TO_NUMBER_PENALTY;

/// Largest argument count whose summed scores stay finite
pub const MAX_ARITY: usize = ((UNREACHABLE - 1) / MAX_ARGUMENT_SCORE) as usize;

/// Cost of delivering a script value as a native type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    /// Perfect match
    pub const EXACT: Score = Score(0);
    /// Nil bound to a reference type
    pub const NULL_VALUE: Score = Score(0x10);
    /// Convertible only through a non-trivial transform
    pub const WRONG_TYPE: Score = Score(0x100);
    /// Cannot be delivered
    pub const UNCOERCIBLE: Score = Score(UNREACHABLE);

    /// Score from a raw cost, capped at `UNCOERCIBLE`
    pub const fn new(cost: u32) -> Self {
        if cost >= UNREACHABLE {
            Score::UNCOERCIBLE
        } else {
            Score(cost)
        }
    }

    /// Score from an inheritance distance
    pub const fn from_distance(levels: u32) -> Self {
        Score::new(levels)
    }

    /// Raw cost
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether the value can be delivered at all
    pub const fn is_coercible(self) -> bool {
        self.0 < UNREACHABLE
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        if !self.is_coercible() || !rhs.is_coercible() {
            return Score::UNCOERCIBLE;
        }
        Score::new(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Score {
        iter.fold(Score::EXACT, |acc, s| acc + s)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Score::UNCOERCIBLE => f.write_str("uncoercible"),
            Score(cost) => write!(f, "{}", cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_ordering() {
        assert!(Score::EXACT < Score::new(1));
        assert!(Score::new(4) < Score::NULL_VALUE);
        assert!(Score::NULL_VALUE < Score::WRONG_TYPE);
        assert!(Score::WRONG_TYPE < Score::UNCOERCIBLE);
    }

    #[test]
    fn test_uncoercible_absorbs() {
        assert_eq!(Score::UNCOERCIBLE + Score::EXACT, Score::UNCOERCIBLE);
        assert_eq!(Score::EXACT + Score::UNCOERCIBLE, Score::UNCOERCIBLE);
        let total: Score = [Score::new(1), Score::UNCOERCIBLE, Score::new(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Score::UNCOERCIBLE);
    }

    #[test]
    fn test_max_arity_stays_in_band() {
        assert_eq!(MAX_ARITY, 252);
        let worst = Score::new(MAX_ARGUMENT_SCORE);
        let total: Score = std::iter::repeat(worst).take(MAX_ARITY).sum();
        assert!(total.is_coercible());
        let over: Score = std::iter::repeat(worst).take(MAX_ARITY + 1).sum();
        assert!(!over.is_coercible());
    }

    #[test]
    fn test_capped_construction() {
        assert_eq!(Score::new(u32::MAX), Score::UNCOERCIBLE);
        assert_eq!(Score::from_distance(3).get(), 3);
    }
}
