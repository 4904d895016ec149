//! Applying a verified move to the board.
//!
//! Commit is the only place the authoritative board mutates. Its
//! preconditions are programming contracts, not recoverable failures:
//! the caller must have run the move through the legality engine first.

use crate::Board;
use chessmate_core::{Move, Piece, Side, SideEffect};

impl Board {
    /// Applies a verified move and records its notation.
    ///
    /// `captured` is the piece returned by
    /// [`attempt_move`](Board::attempt_move) for this move.
    ///
    /// # Panics
    ///
    /// Panics when the move is unverified, the start square is empty,
    /// or the mover is out of turn. Continuing past any of these would
    /// make every subsequent legality answer meaningless.
    pub fn commit(&mut self, mv: &mut Move, captured: Option<Piece>) {
        assert!(mv.verified, "commit called with an unverified move");
        let piece = self
            .piece_at(mv.from)
            .expect("commit called with an empty start square");
        assert_eq!(
            piece.side, self.playing_side,
            "commit called out of turn"
        );

        // Default promotion: a pawn reaching its farthest rank with no
        // explicit side effect becomes a queen.
        if mv.side_effect == SideEffect::None
            && piece.is_pawn()
            && mv.to.rank == piece.side.farthest_rank()
        {
            mv.side_effect = SideEffect::Promotion {
                new_piece: Piece::queen(piece.side),
            };
        }

        self.apply_move_squares(mv);

        let landed = self
            .piece_at(mv.to)
            .expect("moved piece missing after relocation");
        let is_capture = captured.is_some();
        mv.display_notation = Some(display_notation(landed, mv, is_capture));
        mv.machine_notation = Some(machine_notation(landed, mv, is_capture));

        if is_capture || piece.is_pawn() {
            self.fifty_moves_count = 0;
        } else {
            self.fifty_moves_count += 1;
        }
        if self.playing_side == Side::Black {
            self.fullmove_number += 1;
        }
        self.playing_side = self.playing_side.opposite();
        self.last_move = Some(mv.clone());
        let key = self.position_key();
        self.repetition_log.push(key);
    }

    /// The square-level mutation shared by commit and king-safety
    /// trials: side-effect squares first, then the generic relocation.
    pub(crate) fn apply_move_squares(&mut self, mv: &Move) {
        match mv.side_effect {
            SideEffect::Castling {
                rook_square,
                rook_destination,
            } => {
                if let Some(mut rook) = self.square_mut(rook_square).clear() {
                    rook.mark_moved();
                    self.square_mut(rook_destination).piece = Some(rook);
                }
            }
            // The trespasser is a third square; the generic relocation
            // below only clears the start square.
            SideEffect::EnPassantCapture { trespasser, .. } => {
                self.square_mut(trespasser).clear();
            }
            _ => {}
        }

        if let Some(mut piece) = self.square_mut(mv.from).clear() {
            piece.mark_moved();
            if let SideEffect::Promotion { new_piece } = mv.side_effect {
                piece = new_piece;
            }
            self.square_mut(mv.to).piece = Some(piece);
        }
    }
}

/// Figurine form: Unicode glyphs, e.g. "♞xf3", "e4", "O-O", "e8=♕".
fn display_notation(landed: Piece, mv: &Move, is_capture: bool) -> String {
    notation(landed, mv, is_capture, true)
}

/// Interchange form: SAN letters, e.g. "Nxf3", "e4", "O-O", "e8=Q".
fn machine_notation(landed: Piece, mv: &Move, is_capture: bool) -> String {
    notation(landed, mv, is_capture, false)
}

fn notation(landed: Piece, mv: &Move, is_capture: bool, figurine: bool) -> String {
    match mv.side_effect {
        SideEffect::Castling { rook_square, .. } => {
            if rook_square.file > mv.from.file {
                "O-O".to_string()
            } else {
                "O-O-O".to_string()
            }
        }
        SideEffect::Promotion { new_piece } => {
            let target = if figurine {
                new_piece.glyph().to_string()
            } else {
                new_piece.san_letter().unwrap_or('Q').to_string()
            };
            format!("{}{}={}", capture_prefix(mv, is_capture, true), mv.to, target)
        }
        _ => {
            let pawnish = landed.is_pawn();
            let mut out = String::new();
            if !pawnish {
                if figurine {
                    out.push(landed.glyph());
                } else if let Some(letter) = landed.san_letter() {
                    out.push(letter);
                }
            }
            out.push_str(&capture_prefix(mv, is_capture, pawnish));
            out.push_str(&mv.to.to_string());
            out
        }
    }
}

fn capture_prefix(mv: &Move, is_capture: bool, include_file: bool) -> String {
    if !is_capture {
        return String::new();
    }
    if include_file {
        format!("{}x", mv.from.file_char())
    } else {
        "x".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmate_core::{Fen, PieceKind, Position};

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn play(board: &mut Board, side: Side, coords: &str) -> Move {
        let mut mv = Move::from_coords(side, coords).unwrap();
        let captured = board
            .attempt_move(&mut mv, true)
            .unwrap_or_else(|e| panic!("{coords} should be legal: {e}"));
        board.commit(&mut mv, captured);
        mv
    }

    #[test]
    fn plain_relocation() {
        let mut board = Board::starting();
        let mv = play(&mut board, Side::White, "g1f3");

        assert!(board.piece_at(pos("g1")).is_none());
        assert!(board.piece_at(pos("f3")).is_some());
        assert_eq!(board.playing_side(), Side::Black);
        assert_eq!(mv.machine_notation.as_deref(), Some("Nf3"));
        assert_eq!(mv.display_notation.as_deref(), Some("♘f3"));
    }

    #[test]
    fn commit_round_trips_through_fen() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
        let reloaded = Board::from_fen(&board.to_fen()).unwrap();
        assert_eq!(reloaded.to_fen(), board.to_fen());
    }

    #[test]
    #[should_panic(expected = "unverified")]
    fn committing_an_unverified_move_panics() {
        let mut board = Board::starting();
        let mut mv = Move::from_coords(Side::White, "e2e4").unwrap();
        board.commit(&mut mv, None);
    }

    #[test]
    #[should_panic(expected = "empty start square")]
    fn committing_from_an_empty_square_panics() {
        let mut board = Board::starting();
        let mut mv = Move::from_coords(Side::White, "e4e5").unwrap();
        mv.verified = true;
        board.commit(&mut mv, None);
    }

    #[test]
    fn capture_notation_and_counter_reset() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2")
                .unwrap();
        let mv = play(&mut board, Side::White, "e4d5");
        assert_eq!(mv.machine_notation.as_deref(), Some("exd5"));
        assert_eq!(mv.display_notation.as_deref(), Some("exd5"));
        assert_eq!(board.fifty_moves_count(), 0);
    }

    #[test]
    fn quiet_piece_move_increments_fifty_counter() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "g1f3");
        assert_eq!(board.fifty_moves_count(), 1);
        play(&mut board, Side::Black, "g8f6");
        assert_eq!(board.fifty_moves_count(), 2);
        play(&mut board, Side::White, "e2e4");
        assert_eq!(board.fifty_moves_count(), 0);
    }

    #[test]
    fn fullmove_number_increments_after_black() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        assert_eq!(board.fullmove_number(), 1);
        play(&mut board, Side::Black, "e7e5");
        assert_eq!(board.fullmove_number(), 2);
    }

    #[test]
    fn castling_relocates_the_rook() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let mv = play(&mut board, Side::White, "e1g1");

        assert!(board.piece_at(pos("e1")).is_none());
        assert!(board.piece_at(pos("h1")).is_none());
        assert!(board.piece_at(pos("g1")).unwrap().is_king());
        assert!(matches!(
            board.piece_at(pos("f1")).unwrap().kind,
            PieceKind::Rook { has_moved: true, .. }
        ));
        assert_eq!(mv.machine_notation.as_deref(), Some("O-O"));
        assert_eq!(mv.display_notation.as_deref(), Some("O-O"));
    }

    #[test]
    fn queenside_castling_notation() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let mv = play(&mut board, Side::Black, "e8c8");
        assert_eq!(mv.machine_notation.as_deref(), Some("O-O-O"));
        assert!(board.piece_at(pos("d8")).is_some());
        assert!(board.piece_at(pos("a8")).is_none());
    }

    #[test]
    fn en_passant_capture_clears_the_trespasser() {
        let mut board =
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .unwrap();
        let mv = play(&mut board, Side::White, "e5f6");

        assert!(board.piece_at(pos("f5")).is_none(), "trespasser cleared");
        assert!(board.piece_at(pos("e5")).is_none());
        assert!(board.piece_at(pos("f6")).unwrap().is_pawn());
        assert_eq!(mv.machine_notation.as_deref(), Some("exf6"));
        assert_eq!(board.fifty_moves_count(), 0);
    }

    #[test]
    fn en_passant_window_lasts_one_ply() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        assert!(board.en_passant_territory().is_some());
        play(&mut board, Side::Black, "g8f6");
        assert!(board.en_passant_territory().is_none());
    }

    #[test]
    fn default_promotion_to_queen() {
        let mut board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let mv = play(&mut board, Side::White, "e7e8");

        let landed = board.piece_at(pos("e8")).unwrap();
        assert_eq!(landed.kind, PieceKind::Queen);
        assert_eq!(landed.side, Side::White);
        assert_eq!(mv.machine_notation.as_deref(), Some("e8=Q"));
        assert_eq!(mv.display_notation.as_deref(), Some("e8=♕"));
    }

    #[test]
    fn explicit_promotion_side_effect_is_respected() {
        let mut board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let mut mv = Move::from_coords(Side::White, "e7e8").unwrap();
        let captured = board.attempt_move(&mut mv, true).unwrap();
        mv.side_effect = SideEffect::Promotion {
            new_piece: Piece::new(Side::White, PieceKind::Knight),
        };
        board.commit(&mut mv, captured);
        assert_eq!(board.piece_at(pos("e8")).unwrap().kind, PieceKind::Knight);
        assert_eq!(mv.machine_notation.as_deref(), Some("e8=N"));
    }

    #[test]
    fn pawn_move_marks_has_moved() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e3");
        assert!(board.piece_at(pos("e3")).unwrap().has_moved());
    }

    #[test]
    fn last_move_carries_session_flags() {
        let mut board = Board::starting();
        play(&mut board, Side::White, "e2e4");
        board.last_move_mut().unwrap().resigned = true;
        assert!(board.last_move().unwrap().resigned);
    }

    #[test]
    fn repetition_log_grows_per_commit() {
        let mut board = Board::starting();
        assert_eq!(board.repetition_count(), 1);
        play(&mut board, Side::White, "g1f3");
        play(&mut board, Side::Black, "g8f6");
        play(&mut board, Side::White, "f3g1");
        play(&mut board, Side::Black, "f6g8");
        // Knights returned home: same placement, side and rights.
        assert_eq!(board.repetition_count(), 2);
        assert_eq!(board.position_key(), Fen::default().position_key());
    }
}
