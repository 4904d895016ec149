//! The 8x8 board and its bookkeeping.
//!
//! A [`Board`] is a value: cloning yields an independent deep copy, so
//! trial computations (king safety, attacker enumeration, stalemate
//! scans) mutate throwaway clones and can never corrupt the
//! authoritative game state.

use chessmate_core::{Fen, FenError, Move, Piece, PieceKind, Position, Side, SideEffect, Square, Wing};

/// Full game state: squares, turn, last move, and draw counters.
#[derive(Debug, Clone)]
pub struct Board {
    /// Indexed `squares[rank][file]`.
    squares: [[Square; 8]; 8],
    pub(crate) playing_side: Side,
    pub(crate) last_move: Option<Move>,
    /// Plies since the last capture or pawn move.
    pub(crate) fifty_moves_count: u32,
    pub(crate) fullmove_number: u32,
    /// Canonical position keys seen so far, initial position included.
    pub(crate) repetition_log: Vec<String>,
}

impl Board {
    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        let squares = std::array::from_fn(|rank| {
            std::array::from_fn(|file| {
                Square::empty(Position::raw(file as i8, rank as i8))
            })
        });
        Board {
            squares,
            playing_side: Side::White,
            last_move: None,
            fifty_moves_count: 0,
            fullmove_number: 1,
            repetition_log: Vec::new(),
        }
    }

    /// Creates the standard starting position.
    pub fn starting() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Reconstructs a board from a board-state string.
    ///
    /// Grammar checking is thin by design; only structurally unusable
    /// strings are rejected.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;
        let mut board = Board::empty();

        for (rank_idx, rank_str) in parsed.placement.split('/').enumerate() {
            let rank = 7 - rank_idx as i8;
            let mut file = 0i8;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as i8;
                } else if let Some(mut piece) = Piece::from_fen_char(c, file) {
                    let pos = Position::raw(file, rank);
                    if pos.is_valid() {
                        if piece.is_pawn() && rank != piece.side.pawn_rank() {
                            piece.mark_moved();
                        }
                        board.square_mut(pos).piece = Some(piece);
                    }
                    file += 1;
                }
            }
        }

        board.playing_side = match parsed.active_color {
            'b' => Side::Black,
            _ => Side::White,
        };

        board.apply_castling_rights(Side::White, &parsed.castling);
        board.apply_castling_rights(Side::Black, &parsed.castling);

        if let Some(territory) = Position::from_algebraic(&parsed.en_passant) {
            board.synthesize_invade(territory);
        }

        board.fifty_moves_count = parsed.halfmove_clock;
        board.fullmove_number = parsed.fullmove_number;
        board.repetition_log.push(board.position_key());
        Ok(board)
    }

    /// Maps the castling-rights field onto king/rook eligibility flags.
    fn apply_castling_rights(&mut self, side: Side, castling: &str) {
        let (king_char, queen_char) = match side {
            Side::White => ('K', 'Q'),
            Side::Black => ('k', 'q'),
        };
        let kingside = castling.contains(king_char);
        let queenside = castling.contains(queen_char);
        let home = side.home_rank();

        for (wing, right) in [(Wing::King, kingside), (Wing::Queen, queenside)] {
            let pos = Position::raw(wing.rook_file(), home);
            if let Some(piece) = &mut self.square_mut(pos).piece {
                if let PieceKind::Rook {
                    has_moved,
                    wing: rook_wing,
                } = &mut piece.kind
                {
                    if piece.side == side {
                        *rook_wing = wing;
                        *has_moved = !right;
                    }
                }
            }
        }

        if !kingside && !queenside {
            let king_home = Position::raw(4, home);
            if let Some(piece) = &mut self.square_mut(king_home).piece {
                if piece.side == side && piece.is_king() {
                    piece.mark_moved();
                }
            }
        }
    }

    /// Reconstructs the double-step implied by a FEN en-passant target,
    /// so territory derivation works uniformly after a load.
    fn synthesize_invade(&mut self, territory: Position) {
        let invading_side = self.playing_side.opposite();
        let forward = invading_side.forward();
        let (Some(from), Some(invader)) = (
            territory.offset(0, -forward),
            territory.offset(0, forward),
        ) else {
            return;
        };
        let mut mv = Move::new(invading_side, from, invader);
        mv.side_effect = SideEffect::EnPassantInvade { territory, invader };
        mv.verified = true;
        self.last_move = Some(mv);
    }

    /// Serializes the board back to its canonical board-state string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.placement_string(),
            self.playing_side.to_fen_char(),
            self.castling_string(),
            self.en_passant_string(),
            self.fifty_moves_count,
            self.fullmove_number
        )
    }

    /// The repetition key: placement, side to move, rights, and target.
    pub fn position_key(&self) -> String {
        format!(
            "{} {} {} {}",
            self.placement_string(),
            self.playing_side.to_fen_char(),
            self.castling_string(),
            self.en_passant_string()
        )
    }

    fn placement_string(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut run = 0;
            for file in 0..8 {
                match self.squares[rank as usize][file as usize].piece {
                    Some(piece) => {
                        if run > 0 {
                            out.push(char::from_digit(run, 10).expect("run fits one digit"));
                            run = 0;
                        }
                        out.push(piece.to_fen_char());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push(char::from_digit(run, 10).expect("run fits one digit"));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    fn castling_string(&self) -> String {
        let mut out = String::new();
        for side in [Side::White, Side::Black] {
            for wing in [Wing::King, Wing::Queen] {
                if self.can_yet_castle(side, wing) {
                    let c = match wing {
                        Wing::King => 'k',
                        Wing::Queen => 'q',
                    };
                    out.push(match side {
                        Side::White => c.to_ascii_uppercase(),
                        Side::Black => c,
                    });
                }
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    /// True while both the king and the wing rook sit unmoved on their
    /// home squares.
    fn can_yet_castle(&self, side: Side, wing: Wing) -> bool {
        let home = side.home_rank();
        let king_ok = matches!(
            self.piece_at(Position::raw(4, home)),
            Some(piece) if piece.side == side
                && matches!(piece.kind, PieceKind::King { has_moved: false })
        );
        let rook_ok = matches!(
            self.piece_at(Position::raw(wing.rook_file(), home)),
            Some(piece) if piece.side == side
                && matches!(
                    piece.kind,
                    PieceKind::Rook { has_moved: false, wing: w } if w == wing
                )
        );
        king_ok && rook_ok
    }

    fn en_passant_string(&self) -> String {
        match self.en_passant_territory() {
            Some((territory, _)) => territory.to_string(),
            None => "-".to_string(),
        }
    }

    /// The currently capturable en-passant territory, derived from the
    /// last move: `(territory, trespasser)`. Expires after one ply
    /// because it only ever reads the most recent move.
    pub fn en_passant_territory(&self) -> Option<(Position, Position)> {
        match self.last_move.as_ref()?.side_effect {
            SideEffect::EnPassantInvade { territory, invader } => Some((territory, invader)),
            _ => None,
        }
    }

    /// Returns the square at the given position.
    #[inline]
    pub fn square(&self, pos: Position) -> &Square {
        &self.squares[pos.rank as usize][pos.file as usize]
    }

    #[inline]
    pub(crate) fn square_mut(&mut self, pos: Position) -> &mut Square {
        &mut self.squares[pos.rank as usize][pos.file as usize]
    }

    /// Returns the piece at the given position, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.square(pos).piece
    }

    /// Places a piece, replacing any occupant. Test/setup helper.
    pub fn place(&mut self, pos: Position, piece: Piece) {
        self.square_mut(pos).piece = Some(piece);
    }

    /// Iterates over all 64 positions, a1 first.
    pub fn all_positions() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|rank| (0..8).map(move |file| Position::raw(file, rank)))
    }

    /// Locates the given side's king, tolerating its absence.
    pub fn find_optional_king(&self, side: Side) -> Option<Position> {
        Self::all_positions().find(|&pos| {
            matches!(self.piece_at(pos), Some(piece) if piece.side == side && piece.is_king())
        })
    }

    /// Locates the given side's king.
    ///
    /// # Panics
    ///
    /// Panics when the king is absent; a board without it cannot answer
    /// legality questions and continuing would corrupt the game.
    pub fn find_king(&self, side: Side) -> Position {
        self.find_optional_king(side)
            .unwrap_or_else(|| panic!("no {side} king on the board"))
    }

    /// Whose turn it is.
    #[inline]
    pub fn playing_side(&self) -> Side {
        self.playing_side
    }

    /// The last committed move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// Mutable access to the last move, for the session to flag
    /// resignation or timeout.
    #[inline]
    pub fn last_move_mut(&mut self) -> Option<&mut Move> {
        self.last_move.as_mut()
    }

    /// Plies since the last capture or pawn move.
    #[inline]
    pub fn fifty_moves_count(&self) -> u32 {
        self.fifty_moves_count
    }

    /// Current fullmove number.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let key = self.position_key();
        self.repetition_log.iter().filter(|k| **k == key).count()
    }
}
