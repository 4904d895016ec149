//! Game status derivation.
//!
//! Status is never stored: it is recomputed from the board plus the
//! session's external signals on every query. The evaluation order is
//! part of the contract, first match wins.

use crate::Board;
use chessmate_core::{Fen, PieceKind, Position, Side};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The coarse outcome state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    #[default]
    Unknown,
    NotYetStarted,
    Active,
    Paused,
    Mate,
    Resign,
    Timeout,
    DrawByRepetition,
    DrawByMoves,
    DrawByInsufficientMaterial,
    Stalemate,
    TapDisabled,
}

/// External signals owned by the surrounding game session.
///
/// Resignation and timeout ride on the last move instead; see
/// [`Board::last_move_mut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StatusSignals {
    pub tap_enabled: bool,
    pub user_paused: bool,
}

impl Default for StatusSignals {
    fn default() -> Self {
        StatusSignals {
            tap_enabled: true,
            user_paused: false,
        }
    }
}

/// Derives the current game status. First match wins.
pub fn game_status(board: &Board, signals: StatusSignals) -> GameStatus {
    if !signals.tap_enabled {
        return GameStatus::TapDisabled;
    }

    if board.last_move().is_none() && board.to_fen() == Fen::STARTPOS {
        return GameStatus::NotYetStarted;
    }

    if let Some(last) = board.last_move() {
        if last.timed_out {
            return GameStatus::Timeout;
        }
        if last.resigned {
            return GameStatus::Resign;
        }
    }

    let side = board.playing_side();
    let has_move = board.has_any_legal_move(side);
    if !has_move {
        if board.is_in_check(side) {
            return GameStatus::Mate;
        }
        return GameStatus::Stalemate;
    }

    if board.fifty_moves_count() >= 50 {
        return GameStatus::DrawByMoves;
    }

    if board.repetition_count() >= 3 {
        return GameStatus::DrawByRepetition;
    }

    if is_insufficient_material(board) {
        return GameStatus::DrawByInsufficientMaterial;
    }

    if signals.user_paused {
        return GameStatus::Paused;
    }

    GameStatus::Active
}

/// True when neither side can force mate with the remaining material:
/// bare kings, a single minor piece in total, or one bishop each on
/// same-colored squares.
fn is_insufficient_material(board: &Board) -> bool {
    let mut minors: Vec<(Side, bool, Position)> = Vec::new();
    for pos in Board::all_positions() {
        let Some(piece) = board.piece_at(pos) else {
            continue;
        };
        match piece.kind {
            PieceKind::Pawn { .. } | PieceKind::Rook { .. } | PieceKind::Queen => return false,
            PieceKind::Knight => minors.push((piece.side, false, pos)),
            PieceKind::Bishop => minors.push((piece.side, true, pos)),
            PieceKind::King { .. } => {}
        }
    }
    match minors.as_slice() {
        [] | [_] => true,
        [(side_a, true, pos_a), (side_b, true, pos_b)] => {
            side_a != side_b
                && (pos_a.file + pos_a.rank) % 2 == (pos_b.file + pos_b.rank) % 2
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmate_core::Move;

    fn status(board: &Board) -> GameStatus {
        game_status(board, StatusSignals::default())
    }

    fn play(board: &mut Board, side: Side, coords: &str) {
        let mut mv = Move::from_coords(side, coords).unwrap();
        let captured = board.attempt_move(&mut mv, true).unwrap();
        board.commit(&mut mv, captured);
    }

    #[test]
    fn tap_disabled_wins_over_everything() {
        let board = Board::starting();
        let signals = StatusSignals {
            tap_enabled: false,
            user_paused: true,
        };
        assert_eq!(game_status(&board, signals), GameStatus::TapDisabled);
    }

    #[test]
    fn untouched_starting_position_is_not_yet_started() {
        let board = Board::starting();
        assert_eq!(status(&board), GameStatus::NotYetStarted);
    }

    #[test]
    fn first_move_makes_the_game_active() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        assert_eq!(status(&board), GameStatus::Active);
    }

    #[test]
    fn custom_position_without_moves_is_active() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&board), GameStatus::Active);
    }

    #[test]
    fn timeout_and_resign_ride_on_the_last_move() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");

        board.last_move_mut().unwrap().resigned = true;
        assert_eq!(status(&board), GameStatus::Resign);

        // Timeout outranks resignation.
        board.last_move_mut().unwrap().timed_out = true;
        assert_eq!(status(&board), GameStatus::Timeout);
    }

    #[test]
    fn back_rank_mate() {
        // Black king h8 boxed by its own pawns, white rook on e8.
        let board = Board::from_fen("4R2k/6pp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(status(&board), GameStatus::Mate);
    }

    #[test]
    fn stalemate_when_no_move_and_no_check() {
        let board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(status(&board), GameStatus::Stalemate);
    }

    #[test]
    fn fifty_move_boundary() {
        let at_49 = Board::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 49 40").unwrap();
        assert_eq!(status(&at_49), GameStatus::Active);

        let at_50 = Board::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 50 40").unwrap();
        assert_eq!(status(&at_50), GameStatus::DrawByMoves);
    }

    #[test]
    fn threefold_repetition() {
        let mut board = Board::starting();
        for _ in 0..2 {
            play(&mut board, Side::White, "g1f3");
            play(&mut board, Side::Black, "g8f6");
            play(&mut board, Side::White, "f3g1");
            play(&mut board, Side::Black, "f6g8");
        }
        // Starting position has now occurred three times, but the
        // knights moved, so it is no longer "not yet started".
        assert_eq!(board.repetition_count(), 3);
        assert_eq!(status(&board), GameStatus::DrawByRepetition);
    }

    #[test]
    fn insufficient_material_cases() {
        let kings = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&kings), GameStatus::DrawByInsufficientMaterial);

        let lone_knight = Board::from_fen("4k3/8/8/8/8/8/5N2/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&lone_knight), GameStatus::DrawByInsufficientMaterial);

        // d2 and e7 are both dark squares.
        let same_color_bishops =
            Board::from_fen("4k3/4b3/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
        assert_eq!(
            status(&same_color_bishops),
            GameStatus::DrawByInsufficientMaterial
        );

        let opposite_color_bishops =
            Board::from_fen("4k3/5b2/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&opposite_color_bishops), GameStatus::Active);

        let rook_left = Board::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&rook_left), GameStatus::Active);

        let two_knights = Board::from_fen("4k3/8/8/8/8/8/3NN3/4K3 w - - 0 1").unwrap();
        assert_eq!(status(&two_knights), GameStatus::Active);
    }

    #[test]
    fn paused_only_when_nothing_else_matches() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        let signals = StatusSignals {
            tap_enabled: true,
            user_paused: true,
        };
        assert_eq!(game_status(&board, signals), GameStatus::Paused);
    }

    #[test]
    fn mate_outranks_draw_counters() {
        // Checkmate position with the fifty counter already expired.
        let board = Board::from_fen("4R2k/6pp/8/8/8/8/8/4K3 b - - 50 40").unwrap();
        assert_eq!(status(&board), GameStatus::Mate);
    }
}
