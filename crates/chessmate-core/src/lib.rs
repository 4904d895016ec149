//! Core types for the chessmate rules kernel.
//!
//! This crate provides the fundamental value types the rules engine
//! operates on:
//! - [`Side`] for the two players
//! - [`Position`] and [`Square`] for board coordinates and occupancy
//! - [`Piece`] and [`PieceKind`] with per-piece eligibility flags
//! - [`Move`] and [`SideEffect`] for proposed/committed moves
//! - [`Fen`] for board-state string fields

mod fen;
mod mov;
mod piece;
mod position;
mod side;
mod square;

pub use fen::{Fen, FenError};
pub use mov::{Move, SideEffect};
pub use piece::{Piece, PieceKind, Wing};
pub use position::Position;
pub use side::Side;
pub use square::Square;
