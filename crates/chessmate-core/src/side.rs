//! Player side representation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two players in chess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    /// Returns the opposing side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Returns the forward rank direction (+1 for White, -1 for Black).
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Returns the back rank for this side (0 for White, 7 for Black).
    #[inline]
    pub const fn home_rank(self) -> i8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Returns the promotion rank for this side (7 for White, 0 for Black).
    #[inline]
    pub const fn farthest_rank(self) -> i8 {
        self.opposite().home_rank()
    }

    /// Returns the starting rank of this side's pawns (1 for White, 6 for Black).
    #[inline]
    pub const fn pawn_rank(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    /// Returns the FEN active-color character ('w' or 'b').
    #[inline]
    pub const fn to_fen_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}
