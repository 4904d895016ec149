//! Chess piece representation.
//!
//! Piece variants carry their own eligibility state: pawns, rooks and
//! kings remember whether they have moved (pawn double-step and
//! castling decay), and rooks know which wing they started on.

use crate::Side;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which wing a rook belongs to, for castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wing {
    King,
    Queen,
}

impl Wing {
    /// Returns the rook's home file on this wing (7 kingside, 0 queenside).
    #[inline]
    pub const fn rook_file(self) -> i8 {
        match self {
            Wing::King => 7,
            Wing::Queen => 0,
        }
    }
}

/// The six piece types, with per-piece eligibility payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn { has_moved: bool },
    Knight,
    Bishop,
    Rook { has_moved: bool, wing: Wing },
    Queen,
    King { has_moved: bool },
}

/// A piece on the board: a side that never changes plus a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece.
    #[inline]
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Piece { side, kind }
    }

    /// A pawn that has not yet moved.
    #[inline]
    pub const fn pawn(side: Side) -> Self {
        Piece::new(side, PieceKind::Pawn { has_moved: false })
    }

    /// A rook on its home square for the given wing.
    #[inline]
    pub const fn rook(side: Side, wing: Wing) -> Self {
        Piece::new(
            side,
            PieceKind::Rook {
                has_moved: false,
                wing,
            },
        )
    }

    /// A queen.
    #[inline]
    pub const fn queen(side: Side) -> Self {
        Piece::new(side, PieceKind::Queen)
    }

    /// A king that has not yet moved.
    #[inline]
    pub const fn king(side: Side) -> Self {
        Piece::new(side, PieceKind::King { has_moved: false })
    }

    /// Returns true for the kinds that track movement, once they have moved.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        match self.kind {
            PieceKind::Pawn { has_moved }
            | PieceKind::Rook { has_moved, .. }
            | PieceKind::King { has_moved } => has_moved,
            _ => false,
        }
    }

    /// Records that this piece has moved, for the kinds that care.
    #[inline]
    pub fn mark_moved(&mut self) {
        match &mut self.kind {
            PieceKind::Pawn { has_moved }
            | PieceKind::Rook { has_moved, .. }
            | PieceKind::King { has_moved } => *has_moved = true,
            _ => {}
        }
    }

    #[inline]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn { .. })
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King { .. })
    }

    /// Returns the FEN character (uppercase White, lowercase Black).
    pub const fn to_fen_char(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn { .. } => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook { .. } => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King { .. } => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }

    /// Parses a FEN character into a piece with fresh eligibility flags.
    ///
    /// Rook wing defaults to the half of the board the piece sits on and
    /// is refined by the board constructor from the castling-rights field.
    pub const fn from_fen_char(c: char, file: i8) -> Option<Self> {
        let side = if c.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn { has_moved: false },
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook {
                has_moved: false,
                wing: if file >= 4 { Wing::King } else { Wing::Queen },
            },
            'q' => PieceKind::Queen,
            'k' => PieceKind::King { has_moved: false },
            _ => return None,
        };
        Some(Piece { side, kind })
    }

    /// Returns the SAN letter for this piece kind (pawns have none).
    pub const fn san_letter(&self) -> Option<char> {
        match self.kind {
            PieceKind::Pawn { .. } => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook { .. } => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King { .. } => Some('K'),
        }
    }

    /// Returns the Unicode figurine for this piece.
    pub const fn glyph(&self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King { .. }) => '\u{2654}',
            (Side::White, PieceKind::Queen) => '\u{2655}',
            (Side::White, PieceKind::Rook { .. }) => '\u{2656}',
            (Side::White, PieceKind::Bishop) => '\u{2657}',
            (Side::White, PieceKind::Knight) => '\u{2658}',
            (Side::White, PieceKind::Pawn { .. }) => '\u{2659}',
            (Side::Black, PieceKind::King { .. }) => '\u{265A}',
            (Side::Black, PieceKind::Queen) => '\u{265B}',
            (Side::Black, PieceKind::Rook { .. }) => '\u{265C}',
            (Side::Black, PieceKind::Bishop) => '\u{265D}',
            (Side::Black, PieceKind::Knight) => '\u{265E}',
            (Side::Black, PieceKind::Pawn { .. }) => '\u{265F}',
        }
    }
}
