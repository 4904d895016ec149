//! Board coordinates.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A file/rank coordinate on the board.
///
/// Files run a-h (0-7 left to right from White's view), ranks run 1-8
/// (0-7 from White's back rank). Signed components so that direction
/// vectors and offset arithmetic compose without casts; `is_valid`
/// reports whether the coordinate is actually on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    /// Creates a position, returning `None` when off the board.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Option<Self> {
        let pos = Position { file, rank };
        if pos.is_valid() {
            Some(pos)
        } else {
            None
        }
    }

    /// Creates a position without bounds checking.
    ///
    /// Used for intermediate arithmetic; check with [`is_valid`](Self::is_valid)
    /// before indexing a board with it.
    #[inline]
    pub const fn raw(file: i8, rank: i8) -> Self {
        Position { file, rank }
    }

    /// Returns true if both components are within 0-7.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.file >= 0 && self.file < 8 && self.rank >= 0 && self.rank < 8
    }

    /// Returns this position shifted by the given file/rank deltas,
    /// or `None` when the result leaves the board.
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Position::new(self.file + file_delta, self.rank + rank_delta)
    }

    /// Parses algebraic notation (e.g. "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Position::new((file - b'a') as i8, (rank - b'1') as i8)
    }

    /// Returns the file character ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file as u8) as char
    }

    /// Returns the rank character ('1'-'8').
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank as u8) as char
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
