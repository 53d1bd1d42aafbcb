//! Tile values: signed numbers and letters.
//!
//! Boards in this variant carry two kinds of value:
//!
//! - **Numbers**: signed integers (`2`, `-3`, `6`, even `0`). Equal numbers
//!   merge by doubling; a number and its exact negation cancel out.
//! - **Letters**: a single code point (`'A'`, `'B'`, ...). Letters appear when
//!   a `+v`/`-v` pair cancels, or when doubling overflows `i64`. Equal letters
//!   merge into the next code point.
//!
//! ## Weights
//!
//! Scoring needs a magnitude for every value. Numbers weigh their own value.
//! Letters weigh `2^(codepoint - 62)`, so `'A'` weighs 8, `'B'` weighs 16 and
//! so on.

use serde::{Deserialize, Serialize};

/// Code point offset applied when turning a power of two into a letter.
///
/// `64 + log2(|v|)`: `2 -> 'A'`, `4 -> 'B'`, `8 -> 'C'`.
pub const LETTER_BASE: u8 = 64;

/// Exponent offset for letter weights: `2^(codepoint - 62)`.
pub const LETTER_WEIGHT_OFFSET: u8 = 62;

/// The numeric value that wins the game when produced by a merge.
///
/// Doubling integers can never produce it. The check is kept anyway so the
/// number track behaves exactly like the letter track's sentinel.
pub const MIGHTY_NUMBER: f64 = 0.5;

/// The letter that wins the game when produced by a cancelling merge.
pub const MIGHTY_LETTER: u8 = b' ';

/// Value held by a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileValue {
    /// A signed integer value.
    Number(i64),
    /// A single code point.
    Letter(u8),
}

impl TileValue {
    /// Create a numeric value.
    #[must_use]
    pub const fn number(n: i64) -> Self {
        TileValue::Number(n)
    }

    /// Create a letter value from a character.
    ///
    /// Characters outside the single-byte range saturate to `u8::MAX`.
    #[must_use]
    pub fn letter(c: char) -> Self {
        TileValue::Letter(u8::try_from(u32::from(c)).unwrap_or(u8::MAX))
    }

    /// Letter produced by cancelling a pair whose magnitude is `magnitude`.
    ///
    /// Uses the floored base-2 logarithm, so `3 -> 'A'` and `6 -> 'B'` just like
    /// `2` and `4`. A zero magnitude has no logarithm and maps to `'@'`.
    #[must_use]
    pub fn letter_for_magnitude(magnitude: u64) -> Self {
        let exponent = magnitude.checked_ilog2().unwrap_or(0);
        let code = u32::from(LETTER_BASE) + exponent;
        TileValue::Letter(u8::try_from(code).unwrap_or(u8::MAX))
    }

    /// Is this a numeric value?
    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, TileValue::Number(_))
    }

    /// Is this a letter value?
    #[must_use]
    pub const fn is_letter(self) -> bool {
        matches!(self, TileValue::Letter(_))
    }

    /// Numeric payload, if any.
    #[must_use]
    pub const fn as_number(self) -> Option<i64> {
        match self {
            TileValue::Number(n) => Some(n),
            TileValue::Letter(_) => None,
        }
    }

    /// Negated value. Letters have no negation.
    #[must_use]
    pub fn negated(self) -> Option<Self> {
        match self {
            TileValue::Number(n) => n.checked_neg().map(TileValue::Number),
            TileValue::Letter(_) => None,
        }
    }

    /// Do these values cancel each other out (`v` against `-v`)?
    ///
    /// Zero is its own negation, but two zeros are equal first, so callers
    /// checking equality before inversion never see zero cancel.
    #[must_use]
    pub fn is_inverse_of(self, other: TileValue) -> bool {
        self.negated() == Some(other)
    }

    /// Can these two values merge, either by equality or by cancellation?
    #[must_use]
    pub fn merges_with(self, other: TileValue) -> bool {
        self == other || self.is_inverse_of(other)
    }

    /// The value produced by merging two equal values.
    ///
    /// Numbers double. Letters advance one code point (saturating). A number
    /// whose double overflows `i64` becomes the letter of the next power.
    #[must_use]
    pub fn successor(self) -> Self {
        match self {
            TileValue::Number(n) => match n.checked_mul(2) {
                Some(doubled) => TileValue::Number(doubled),
                // Only non-zero values overflow, so the logarithm exists.
                None => Self::letter_for_magnitude(n.unsigned_abs()).successor(),
            },
            TileValue::Letter(code) => TileValue::Letter(code.saturating_add(1)),
        }
    }

    /// Scoring weight: the number itself, or `2^(codepoint - 62)` for letters.
    ///
    /// Letter weights saturate at `u64::MAX`; code points below 62 weigh 1.
    #[must_use]
    pub fn weight(self) -> u64 {
        match self {
            TileValue::Number(n) => n.unsigned_abs(),
            TileValue::Letter(code) => {
                let exponent = u32::from(code.saturating_sub(LETTER_WEIGHT_OFFSET));
                2u64.checked_pow(exponent).unwrap_or(u64::MAX)
            }
        }
    }

    /// Squared weight, saturating.
    #[must_use]
    pub fn weight_squared(self) -> u64 {
        let w = self.weight();
        w.saturating_mul(w)
    }

    /// Contribution of this value to the board sum. Letters contribute nothing.
    #[must_use]
    pub const fn sum_contribution(self) -> i64 {
        match self {
            TileValue::Number(n) => n,
            TileValue::Letter(_) => 0,
        }
    }

    /// Does producing this value by an equal merge win the game?
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_mighty_number(self) -> bool {
        match self {
            TileValue::Number(n) => n as f64 == MIGHTY_NUMBER,
            TileValue::Letter(_) => false,
        }
    }

    /// Does producing this value by a cancelling merge win the game?
    #[must_use]
    pub fn is_mighty_letter(self) -> bool {
        self == TileValue::Letter(MIGHTY_LETTER)
    }
}

impl From<i64> for TileValue {
    fn from(n: i64) -> Self {
        TileValue::Number(n)
    }
}

impl From<char> for TileValue {
    fn from(c: char) -> Self {
        TileValue::letter(c)
    }
}

impl std::fmt::Display for TileValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileValue::Number(n) => write!(f, "{}", n),
            TileValue::Letter(code) => write!(f, "{}", char::from(*code)),
        }
    }
}
