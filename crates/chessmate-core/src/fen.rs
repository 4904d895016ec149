//! FEN (Forsyth-Edwards Notation) field splitting and serialization.
//!
//! Deliberately thin: the rules kernel consumes and produces the
//! board-state string but does not police its grammar. Only structural
//! failures that would make the fields unusable are reported.

use thiserror::Error;

/// Errors for structurally unusable FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six FEN fields, split but otherwise uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Piece placement, rank 8 first (e.g. "rnbqkbnr/pppppppp/8/...").
    pub placement: String,
    /// Active color ('w' or 'b').
    pub active_color: char,
    /// Castling availability ("KQkq", "-", ...).
    pub castling: String,
    /// En passant target square ("e3", "-").
    pub en_passant: String,
    /// Plies since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl Fen {
    /// The canonical starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Splits a FEN string into its six fields.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let active_color = match parts[1] {
            "w" => 'w',
            "b" => 'b',
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            placement: parts[0].to_string(),
            active_color,
            castling: parts[2].to_string(),
            en_passant: parts[3].to_string(),
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Joins the fields back into the canonical single-space form.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.placement,
            self.active_color,
            self.castling,
            self.en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// The repetition key: everything but the move counters.
    pub fn position_key(&self) -> String {
        format!(
            "{} {} {} {}",
            self.placement, self.active_color, self.castling, self.en_passant
        )
    }
}

impl Default for Fen {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
