//! A board square: a coordinate plus its occupant.

use crate::{Piece, Position};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the 64 squares of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square {
    pub position: Position,
    pub piece: Option<Piece>,
}

impl Square {
    /// Creates an empty square at the given position.
    #[inline]
    pub const fn empty(position: Position) -> Self {
        Square {
            position,
            piece: None,
        }
    }

    /// Creates an occupied square.
    #[inline]
    pub const fn occupied(position: Position, piece: Piece) -> Self {
        Square {
            position,
            piece: Some(piece),
        }
    }

    /// Returns true when no piece occupies this square.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    /// Removes and returns the occupant.
    #[inline]
    pub fn clear(&mut self) -> Option<Piece> {
        self.piece.take()
    }
}
