//! Chess rules engine.
//!
//! This crate decides whether a proposed move is legal, applies legal
//! moves to a board, and derives the overall game status:
//! - [`Board`] - 8x8 square grid with turn, counters, and history
//! - [`Board::attempt_move`] - the legality engine (geometry, path
//!   blocking, special moves, king safety)
//! - [`Board::commit`] - applies a verified move and produces notation
//! - [`game_status`] - derives the coarse outcome state on demand
//!
//! # Architecture
//!
//! Boards are values: every what-if computation (king safety, attacker
//! enumeration, mate/stalemate scans) clones the board and mutates the
//! clone, so the authoritative state changes only in
//! [`Board::commit`], after full verification.
//!
//! # Example
//!
//! ```
//! use chessmate_core::{Move, Side};
//! use chessmate_rules::{game_status, Board, GameStatus, StatusSignals};
//!
//! let mut board = Board::starting();
//! let mut mv = Move::from_coords(Side::White, "e2e4").unwrap();
//! let captured = board.attempt_move(&mut mv, true).unwrap();
//! board.commit(&mut mv, captured);
//!
//! assert_eq!(mv.machine_notation.as_deref(), Some("e4"));
//! assert_eq!(game_status(&board, StatusSignals::default()), GameStatus::Active);
//! ```

mod board;
mod commit;
mod legality;
mod status;

pub use board::Board;
pub use legality::MoveError;
pub use status::{game_status, GameStatus, StatusSignals};
