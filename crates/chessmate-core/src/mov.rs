//! Move representation.
//!
//! A [`Move`] starts life with only the side and the two endpoints
//! filled in. The legality engine annotates it with a [`SideEffect`]
//! and the verified flag; commit fills in the notation strings. The
//! `resigned`/`timed_out` flags belong to the surrounding session and
//! are only read back by game-status derivation.

use crate::{Piece, Position, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-generic consequence of a move that commit must additionally apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SideEffect {
    /// Plain relocation.
    #[default]
    None,
    /// A pawn double-step: `territory` is the skipped square, `invader`
    /// the landing square. Capturable-through for exactly one ply.
    EnPassantInvade {
        territory: Position,
        invader: Position,
    },
    /// A pawn capture onto the en-passant territory: `attack` is the
    /// destination, `trespasser` the square holding the captured pawn.
    EnPassantCapture {
        attack: Position,
        trespasser: Position,
    },
    /// Castling: the rook relocates alongside the king.
    Castling {
        rook_square: Position,
        rook_destination: Position,
    },
    /// The moving pawn is replaced by `new_piece` on arrival.
    Promotion { new_piece: Piece },
}

/// A proposed or committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub side: Side,
    pub from: Position,
    pub to: Position,
    pub side_effect: SideEffect,
    /// Set only after full legality confirmation.
    pub verified: bool,
    /// Figurine form, set at commit time.
    pub display_notation: Option<String>,
    /// Algebraic interchange form, set at commit time.
    pub machine_notation: Option<String>,
    /// Session signal: the mover resigned with this move.
    pub resigned: bool,
    /// Session signal: the mover's clock ran out on this move.
    pub timed_out: bool,
}

impl Move {
    /// Creates an unverified move with no side effect.
    pub fn new(side: Side, from: Position, to: Position) -> Self {
        Move {
            side,
            from,
            to,
            side_effect: SideEffect::None,
            verified: false,
            display_notation: None,
            machine_notation: None,
            resigned: false,
            timed_out: false,
        }
    }

    /// Creates a move from coordinate notation ("e2e4").
    pub fn from_coords(side: Side, s: &str) -> Option<Self> {
        if s.len() != 4 {
            return None;
        }
        let from = Position::from_algebraic(s.get(0..2)?)?;
        let to = Position::from_algebraic(s.get(2..4)?)?;
        Some(Move::new(side, from, to))
    }

    /// Absolute rank distance between the endpoints.
    #[inline]
    pub fn rank_distance(&self) -> i8 {
        (self.to.rank - self.from.rank).abs()
    }

    /// Absolute file distance between the endpoints.
    #[inline]
    pub fn file_distance(&self) -> i8 {
        (self.to.file - self.from.file).abs()
    }

    /// Rank direction of travel: -1, 0 or +1.
    #[inline]
    pub fn rank_direction(&self) -> i8 {
        (self.to.rank - self.from.rank).signum()
    }

    /// File direction of travel: -1, 0 or +1.
    #[inline]
    pub fn file_direction(&self) -> i8 {
        (self.to.file - self.from.file).signum()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
