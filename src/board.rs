//! Board state, move execution, and check/checkmate detection.
//!
//! All mutation funnels through one make/unmake pair so that every trial
//! move — the self-check gate in [`Board::apply_move`] as well as the
//! exhaustive search in [`Board::is_checkmate`] — is undone exactly,
//! including the king-location cache.

use log::debug;
use thiserror::Error;

use crate::piece::{Color, Piece, PieceKind};
use crate::rules;
use crate::square::Square;

/// Why a proposed move was rejected. All variants are non-fatal: the board
/// is unchanged from the caller's perspective.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("no piece at {0}")]
    NoPiece(Square),
    #[error("the piece at {square} does not belong to {turn}")]
    NotYourPiece { square: Square, turn: Color },
    #[error("the piece at {from} cannot move to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("{0} would be left in check")]
    WouldLeaveKingInCheck(Color),
}

/// Snapshot of the squares touched by a trial move, for exact rollback.
struct Undo {
    from: Square,
    to: Square,
    captured: Option<Piece>,
}

/// The 8×8 occupancy grid, owning all pieces, plus a cached king location
/// per color so check detection never scans for the king.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    white_king: Option<Square>,
    black_king: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board with the standard initial position: pawns on ranks
    /// 2 and 7, back ranks R N B Q K B N R, king cache seeded to e1/e8.
    pub fn new() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for file in 0..8 {
            for (color, pawn_rank, back_rank) in
                [(Color::White, 1, 0), (Color::Black, 6, 7)]
            {
                if let Some(square) = Square::new(pawn_rank, file) {
                    board.place(square, Piece::new(color, PieceKind::Pawn));
                }
                if let Some(square) = Square::new(back_rank, file) {
                    board.place(square, Piece::new(color, BACK_RANK[file as usize]));
                }
            }
        }
        board
    }

    /// Creates a board with no pieces, for constructing test positions.
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
            white_king: None,
            black_king: None,
        }
    }

    /// Places a piece, replacing whatever occupied the square. Keeps the
    /// king cache in sync when a king is placed.
    pub fn place(&mut self, square: Square, piece: Piece) {
        *self.slot_mut(square) = Some(piece);
        if piece.kind == PieceKind::King {
            self.set_king(piece.color, Some(square));
        }
    }

    /// Removes and returns the piece on `square`, if any. Clears the king
    /// cache when a king is removed.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.slot_mut(square).take();
        if let Some(p) = piece
            && p.kind == PieceKind::King
        {
            self.set_king(p.color, None);
        }
        piece
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    /// The cached location of `color`'s king, if one is on the board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Validates and executes a move for `turn`.
    ///
    /// On success the mover stands on `to`, any opposing occupant of `to`
    /// has been captured, and the mover's `moved` flag is set. On any error
    /// the board compares equal to its pre-call state; in the self-check
    /// case the move is fully applied and then fully reverted, with the
    /// would-be captured piece restored.
    pub fn apply_move(&mut self, turn: Color, from: Square, to: Square) -> Result<(), MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != turn {
            return Err(MoveError::NotYourPiece { square: from, turn });
        }
        if !rules::is_valid_move(self, piece, from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let undo = self.make_move(from, to);
        if self.is_in_check(turn) {
            self.unmake_move(undo);
            debug!("rejected {from}{to}: {turn} king would be attacked");
            return Err(MoveError::WouldLeaveKingInCheck(turn));
        }

        // Commit: the capture becomes permanent and the mover is marked
        // as having moved (the pawn's double-step consults this).
        if let Some(p) = self.slot_mut(to) {
            p.moved = true;
        }
        debug!("committed {from}{to} for {turn}");
        Ok(())
    }

    /// Is `color`'s king square attacked by any opposing piece?
    ///
    /// Only geometry and path-clearance matter; a pinned attacker still
    /// attacks. A board without a `color` king is trivially not in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king_square(color) else {
            return false;
        };
        Square::all().any(|square| {
            self.piece_at(square)
                .is_some_and(|p| p.color != color && rules::is_valid_move(self, p, square, king))
        })
    }

    /// Is `color` checkmated?
    ///
    /// False when not in check (a stalemated side is therefore also
    /// reported as not checkmated). Otherwise every pseudo-legal move for
    /// every piece of `color` is tried and reverted; only if none escapes
    /// the check is the side checkmated.
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        if !self.is_in_check(color) {
            return false;
        }

        for from in Square::all() {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            if piece.color != color {
                continue;
            }
            for to in Square::all() {
                if !rules::is_valid_move(self, piece, from, to) {
                    continue;
                }
                let undo = self.make_move(from, to);
                let escaped = !self.is_in_check(color);
                self.unmake_move(undo);
                if escaped {
                    debug!("{color} escapes check with {from}{to}");
                    return false;
                }
            }
        }
        true
    }

    /// Relocates the piece on `from` to `to`, retaining any occupant of
    /// `to` in the returned [`Undo`] and tracking the king cache. The sole
    /// writer of the grid during move execution; paired with
    /// [`Self::unmake_move`].
    fn make_move(&mut self, from: Square, to: Square) -> Undo {
        let mover = self.slot_mut(from).take();
        let captured = std::mem::replace(self.slot_mut(to), mover);
        if let Some(p) = mover
            && p.kind == PieceKind::King
        {
            self.set_king(p.color, Some(to));
        }
        Undo { from, to, captured }
    }

    /// Restores both squares and the king cache to their pre-move state.
    fn unmake_move(&mut self, undo: Undo) {
        let mover = std::mem::replace(self.slot_mut(undo.to), undo.captured);
        *self.slot_mut(undo.from) = mover;
        if let Some(p) = mover
            && p.kind == PieceKind::King
        {
            self.set_king(p.color, Some(undo.from));
        }
    }

    #[inline]
    fn slot_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.grid[square.rank() as usize][square.file() as usize]
    }

    #[inline]
    fn set_king(&mut self, color: Color, square: Option<Square>) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }
}
