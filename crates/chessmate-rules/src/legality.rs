//! The move legality engine.
//!
//! [`Board::attempt_move`] is the single entry point. It is pure over
//! the board: all what-if analysis happens on clones. The
//! `check_king_safety` parameter makes the recursion contract explicit:
//! king safety re-enters the engine through [`Board::all_squares_attacking`]
//! with the flag off, bounding recursion to exactly one level.

use crate::Board;
use chessmate_core::{Move, Piece, PieceKind, Position, Side, SideEffect, Wing};
use thiserror::Error;

/// Why a proposed move was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("there is no piece on the start square")]
    NoPieceToMove,

    #[error("the destination is already occupied by the same side")]
    SameSideAlreadyOccupiesDestination,

    #[error("the piece cannot move that way")]
    InvalidMoveForPiece,

    #[error("the piece cannot attack that way")]
    InvalidAttackForPiece,

    #[error("the king would be under attack after the move")]
    KingWouldBeUnderAttackAfterMove,

    #[error("it is not that side's turn")]
    NotYourTurn,

    #[error("the move failed for an unknown reason")]
    Unknown,
}

impl Board {
    /// Validates a proposed move.
    ///
    /// On success the move is annotated with its side effect, marked
    /// verified, and the piece it would capture is returned (read
    /// before any mutation; for en-passant captures this is the
    /// trespasser pawn, not the destination occupant). The board itself
    /// is never mutated here.
    pub fn attempt_move(
        &self,
        mv: &mut Move,
        check_king_safety: bool,
    ) -> Result<Option<Piece>, MoveError> {
        self.prepare_move(mv)?;
        if check_king_safety {
            self.ensure_king_safe(mv)?;
        }
        let captured = match mv.side_effect {
            SideEffect::EnPassantCapture { trespasser, .. } => self.piece_at(trespasser),
            _ => self.piece_at(mv.to),
        };
        mv.verified = true;
        Ok(captured)
    }

    /// Shape check plus geometric dispatch.
    fn prepare_move(&self, mv: &mut Move) -> Result<(), MoveError> {
        let piece = self.piece_at(mv.from).ok_or(MoveError::NoPieceToMove)?;
        if piece.side != mv.side || mv.side != self.playing_side {
            return Err(MoveError::NotYourTurn);
        }

        match self.piece_at(mv.to) {
            Some(target) if target.side == mv.side => {
                Err(MoveError::SameSideAlreadyOccupiesDestination)
            }
            Some(_) => {
                if self.can_piece_attack(piece, mv) {
                    Ok(())
                } else {
                    Err(MoveError::InvalidAttackForPiece)
                }
            }
            None => {
                if self.can_piece_move(piece, mv) {
                    Ok(())
                } else {
                    Err(MoveError::InvalidMoveForPiece)
                }
            }
        }
    }

    /// Geometric legality onto an empty destination. Records en-passant
    /// and castling side effects on the move as it validates them.
    fn can_piece_move(&self, piece: Piece, mv: &mut Move) -> bool {
        match piece.kind {
            PieceKind::Pawn { has_moved } => self.can_pawn_move(piece.side, has_moved, mv),
            PieceKind::Knight => is_knight_jump(mv),
            PieceKind::Bishop => mv.file_distance() == mv.rank_distance()
                && mv.rank_distance() > 0
                && self.is_move_path_open(mv),
            PieceKind::Rook { .. } => {
                ((mv.file_distance() == 0) != (mv.rank_distance() == 0))
                    && self.is_move_path_open(mv)
            }
            PieceKind::Queen => {
                let straight = (mv.file_distance() == 0) != (mv.rank_distance() == 0);
                let diagonal =
                    mv.file_distance() == mv.rank_distance() && mv.rank_distance() > 0;
                (straight || diagonal) && self.is_move_path_open(mv)
            }
            PieceKind::King { has_moved } => self.can_king_move(piece.side, has_moved, mv),
        }
    }

    /// Geometric legality onto an enemy-occupied destination.
    fn can_piece_attack(&self, piece: Piece, mv: &mut Move) -> bool {
        match piece.kind {
            PieceKind::Pawn { .. } => {
                mv.file_distance() == 1
                    && mv.to.rank - mv.from.rank == piece.side.forward()
            }
            // A king attacks only adjacent squares; no castling onto a capture.
            PieceKind::King { .. } => mv.rank_distance() < 2 && mv.file_distance() < 2,
            // Knights and sliders attack exactly where they move.
            _ => self.can_piece_move(piece, mv),
        }
    }

    fn can_pawn_move(&self, side: Side, has_moved: bool, mv: &mut Move) -> bool {
        let forward = side.forward();
        let advance = mv.to.rank - mv.from.rank;

        if mv.file_distance() == 0 {
            if advance == forward {
                return true;
            }
            if advance == 2 * forward && !has_moved {
                let Some(territory) = mv.from.offset(0, forward) else {
                    return false;
                };
                if self.square(territory).is_empty() {
                    mv.side_effect = SideEffect::EnPassantInvade {
                        territory,
                        invader: mv.to,
                    };
                    return true;
                }
            }
            return false;
        }

        // Diagonal step onto an empty square: only the en-passant capture.
        if mv.file_distance() == 1 && advance == forward {
            if let Some((territory, trespasser)) = self.en_passant_territory() {
                if mv.to == territory {
                    mv.side_effect = SideEffect::EnPassantCapture {
                        attack: mv.to,
                        trespasser,
                    };
                    return true;
                }
            }
        }
        false
    }

    fn can_king_move(&self, side: Side, has_moved: bool, mv: &mut Move) -> bool {
        if mv.rank_distance() < 2 && mv.file_distance() < 2 {
            return true;
        }

        // A two-file, zero-rank step is only legal as castling.
        if has_moved || mv.rank_distance() != 0 || mv.file_distance() != 2 {
            return false;
        }
        let direction = mv.file_direction();
        let wing = if direction > 0 { Wing::King } else { Wing::Queen };
        let rook_square = Position::raw(wing.rook_file(), mv.from.rank);
        let rook_home = matches!(
            self.piece_at(rook_square),
            Some(rook) if rook.side == side
                && matches!(
                    rook.kind,
                    PieceKind::Rook { has_moved: false, wing: w } if w == wing
                )
        );
        if !rook_home {
            return false;
        }
        let Some(pass_over) = mv.from.offset(direction, 0) else {
            return false;
        };
        if !self.square(pass_over).is_empty() {
            return false;
        }
        mv.side_effect = SideEffect::Castling {
            rook_square,
            rook_destination: pass_over,
        };
        true
    }

    /// Square-by-square walk between the endpoints, exclusive.
    fn is_move_path_open(&self, mv: &Move) -> bool {
        let (df, dr) = (mv.file_direction(), mv.rank_direction());
        let mut pos = mv.from;
        loop {
            pos = match pos.offset(df, dr) {
                Some(next) => next,
                None => return false,
            };
            if pos == mv.to {
                return true;
            }
            if !self.square(pos).is_empty() {
                return false;
            }
        }
    }

    /// Rejects a move that would leave the mover's own king attacked.
    ///
    /// Policy: zero attackers is safe; a sole attacker is tolerated
    /// only when the move captures it on its own square; two or more
    /// attackers always reject. The sole-attacker rule deliberately
    /// does not analyze interpositions or the king's own departure
    /// square.
    fn ensure_king_safe(&self, mv: &Move) -> Result<(), MoveError> {
        let mut trial = self.clone();
        trial.apply_move_squares(mv);

        // Simulations without a king on the board skip the check.
        let Some(king) = trial.find_optional_king(mv.side) else {
            return Ok(());
        };

        let attackers = trial.all_squares_attacking(king, mv.side.opposite(), false);
        if attackers.is_empty() {
            return Ok(());
        }
        if attackers.len() >= 2 {
            return Err(MoveError::KingWouldBeUnderAttackAfterMove);
        }
        // An attacked king implies at least one attacker.
        let sole = attackers.first().ok_or(MoveError::Unknown)?;
        if *sole == mv.to {
            Ok(())
        } else {
            Err(MoveError::KingWouldBeUnderAttackAfterMove)
        }
    }

    /// Enumerates the squares from which `side` could legally reach
    /// `target`: a brute-force scan running a trial move from every
    /// candidate square on a fresh clone with `side` to move.
    pub fn all_squares_attacking(
        &self,
        target: Position,
        side: Side,
        check_king_safety: bool,
    ) -> Vec<Position> {
        let mut attackers = Vec::new();
        for pos in Self::all_positions() {
            let Some(piece) = self.piece_at(pos) else {
                continue;
            };
            if piece.side != side || pos == target {
                continue;
            }
            let mut trial_board = self.clone();
            trial_board.playing_side = side;
            let mut trial = Move::new(side, pos, target);
            if trial_board.attempt_move(&mut trial, check_king_safety).is_ok() {
                attackers.push(pos);
            }
        }
        attackers
    }

    /// Returns true if the given side's king is currently attacked.
    pub fn is_in_check(&self, side: Side) -> bool {
        match self.find_optional_king(side) {
            Some(king) => !self
                .all_squares_attacking(king, side.opposite(), false)
                .is_empty(),
            None => false,
        }
    }

    /// Returns true if the given side has at least one legal move.
    ///
    /// Tries every origin/destination pair through the engine; worst
    /// case 64x64, which only runs on status queries.
    pub fn has_any_legal_move(&self, side: Side) -> bool {
        let mut board = self.clone();
        board.playing_side = side;
        for from in Self::all_positions() {
            match board.piece_at(from) {
                Some(piece) if piece.side == side => {}
                _ => continue,
            }
            for to in Self::all_positions() {
                let mut mv = Move::new(side, from, to);
                if board.attempt_move(&mut mv, true).is_ok() {
                    return true;
                }
            }
        }
        false
    }
}

fn is_knight_jump(mv: &Move) -> bool {
    (mv.file_distance() == 1 && mv.rank_distance() == 2)
        || (mv.file_distance() == 2 && mv.rank_distance() == 1)
}
