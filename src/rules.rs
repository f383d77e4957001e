//! Movement geometry for each piece kind.
//!
//! Every predicate here is pure with respect to the board: it reads
//! occupancy and never writes. A move is *pseudo-legal* when it satisfies
//! its piece's geometry and path-clearance rules, without regard to whether
//! it would leave the mover's own king in check; that gate lives in
//! [`Board::apply_move`](crate::board::Board::apply_move).

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Tests whether `piece`, standing on `from`, can move to `to` under the
/// current occupancy.
///
/// A destination held by a piece of the mover's own color is rejected for
/// every kind. Check detection probes the opposing king's square, which can
/// never be the attacker's own color, so that rule only ever constrains
/// real moves and look-ahead trials.
pub fn is_valid_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    if board.piece_at(to).is_some_and(|p| p.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece, from, to),
        PieceKind::Rook => straight_move(board, from, to),
        PieceKind::Knight => knight_move(from, to),
        PieceKind::Bishop => diagonal_move(board, from, to),
        PieceKind::Queen => straight_move(board, from, to) || diagonal_move(board, from, to),
        PieceKind::King => king_move(from, to),
    }
}

/// Forward advance into empty squares, or a one-square diagonal capture.
///
/// The two-square opening advance requires the pawn to be unmoved and both
/// the intermediate and destination squares to be empty. No en passant.
fn pawn_move(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    let dir: i8 = match piece.color {
        Color::White => 1,
        Color::Black => -1,
    };
    let d_rank = to.rank() as i8 - from.rank() as i8;
    let d_file = to.file() as i8 - from.file() as i8;

    // Advance: straight ahead into an empty square.
    if d_file == 0 && board.piece_at(to).is_none() {
        if d_rank == dir {
            return true;
        }
        return d_rank == 2 * dir
            && !piece.moved
            && from
                .offset(dir, 0)
                .is_some_and(|mid| board.piece_at(mid).is_none());
    }

    // Capture: one square diagonally forward onto an opposing piece.
    d_rank == dir
        && d_file.abs() == 1
        && board.piece_at(to).is_some_and(|p| p.color != piece.color)
}

/// Rook geometry: same rank or same file, with a clear path.
fn straight_move(board: &Board, from: Square, to: Square) -> bool {
    (from.rank() == to.rank() || from.file() == to.file()) && path_clear(board, from, to)
}

/// Bishop geometry: equal rank and file deltas, with a clear path.
fn diagonal_move(board: &Board, from: Square, to: Square) -> bool {
    let d_rank = (to.rank() as i8 - from.rank() as i8).abs();
    let d_file = (to.file() as i8 - from.file() as i8).abs();
    d_rank == d_file && path_clear(board, from, to)
}

/// Knight geometry: a (1,2) or (2,1) jump; intervening occupancy is ignored.
fn knight_move(from: Square, to: Square) -> bool {
    let d_rank = (to.rank() as i8 - from.rank() as i8).abs();
    let d_file = (to.file() as i8 - from.file() as i8).abs();
    (d_rank == 2 && d_file == 1) || (d_rank == 1 && d_file == 2)
}

/// King geometry: one square in any direction.
fn king_move(from: Square, to: Square) -> bool {
    let d_rank = (to.rank() as i8 - from.rank() as i8).abs();
    let d_file = (to.file() as i8 - from.file() as i8).abs();
    d_rank <= 1 && d_file <= 1
}

/// Walks the line from `from` towards `to`, requiring every square strictly
/// between them to be empty. Callers guarantee the squares are aligned on a
/// rank, file, or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let d_rank = (to.rank() as i8 - from.rank() as i8).signum();
    let d_file = (to.file() as i8 - from.file() as i8).signum();

    let mut current = from;
    while let Some(next) = current.offset(d_rank, d_file) {
        if next == to {
            return true;
        }
        if board.piece_at(next).is_some() {
            return false;
        }
        current = next;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should be valid")
    }

    fn piece(color: Color, kind: PieceKind) -> Piece {
        Piece::new(color, kind)
    }

    /// Empty board with a single piece placed on `on`.
    fn lone(on: &str, p: Piece) -> Board {
        let mut board = Board::empty();
        board.place(sq(on), p);
        board
    }

    fn valid(board: &Board, from: &str, to: &str) -> bool {
        let p = board
            .piece_at(sq(from))
            .expect("test setup should place a piece on the start square");
        is_valid_move(board, p, sq(from), sq(to))
    }

    #[test]
    fn null_move_is_invalid() {
        let board = lone("e4", piece(Color::White, PieceKind::Queen));
        assert!(!valid(&board, "e4", "e4"));
    }

    #[test_case("e3"; "single advance")]
    #[test_case("e4"; "double advance")]
    fn unmoved_white_pawn_advances(to: &str) {
        let board = lone("e2", piece(Color::White, PieceKind::Pawn));
        assert!(valid(&board, "e2", to));
    }

    #[test_case("e7", "e6"; "single advance")]
    #[test_case("e7", "e5"; "double advance")]
    fn unmoved_black_pawn_advances_down(from: &str, to: &str) {
        let board = lone(from, piece(Color::Black, PieceKind::Pawn));
        assert!(valid(&board, from, to));
    }

    #[test_case("e1"; "backward")]
    #[test_case("e5"; "triple advance")]
    #[test_case("d3"; "diagonal without capture")]
    #[test_case("d2"; "sideways")]
    fn white_pawn_rejects_bad_geometry(to: &str) {
        let board = lone("e2", piece(Color::White, PieceKind::Pawn));
        assert!(!valid(&board, "e2", to));
    }

    #[test]
    fn moved_pawn_cannot_double_advance() {
        let mut moved_pawn = piece(Color::White, PieceKind::Pawn);
        moved_pawn.moved = true;
        let board = lone("e3", moved_pawn);
        assert!(valid(&board, "e3", "e4"));
        assert!(!valid(&board, "e3", "e5"));
    }

    #[test_case("e3"; "blocker on intermediate")]
    #[test_case("e4"; "blocker on destination")]
    fn pawn_double_advance_blocked(blocker: &str) {
        let mut board = lone("e2", piece(Color::White, PieceKind::Pawn));
        board.place(sq(blocker), piece(Color::Black, PieceKind::Knight));
        assert!(!valid(&board, "e2", "e4"));
    }

    #[test]
    fn pawn_cannot_advance_onto_occupied_square() {
        let mut board = lone("e2", piece(Color::White, PieceKind::Pawn));
        board.place(sq("e3"), piece(Color::Black, PieceKind::Rook));
        assert!(!valid(&board, "e2", "e3"));
    }

    #[test_case("d3"; "capture left")]
    #[test_case("f3"; "capture right")]
    fn pawn_captures_diagonally(to: &str) {
        let mut board = lone("e2", piece(Color::White, PieceKind::Pawn));
        board.place(sq(to), piece(Color::Black, PieceKind::Knight));
        assert!(valid(&board, "e2", to));
    }

    #[test]
    fn pawn_cannot_capture_empty_diagonal() {
        let board = lone("e2", piece(Color::White, PieceKind::Pawn));
        assert!(!valid(&board, "e2", "d3"));
    }

    #[test]
    fn pawn_cannot_capture_own_color() {
        let mut board = lone("e2", piece(Color::White, PieceKind::Pawn));
        board.place(sq("d3"), piece(Color::White, PieceKind::Knight));
        assert!(!valid(&board, "e2", "d3"));
    }

    #[test_case("d8"; "up the file")]
    #[test_case("d1"; "down the file")]
    #[test_case("a4"; "across the rank")]
    #[test_case("h4"; "across the rank right")]
    fn rook_moves_along_lines(to: &str) {
        let board = lone("d4", piece(Color::White, PieceKind::Rook));
        assert!(valid(&board, "d4", to));
    }

    #[test_case("e5"; "diagonal")]
    #[test_case("c6"; "knight jump")]
    fn rook_rejects_off_line(to: &str) {
        let board = lone("d4", piece(Color::White, PieceKind::Rook));
        assert!(!valid(&board, "d4", to));
    }

    #[test]
    fn rook_blocked_by_intermediate_piece() {
        let mut board = lone("d4", piece(Color::White, PieceKind::Rook));
        board.place(sq("d6"), piece(Color::Black, PieceKind::Pawn));
        assert!(valid(&board, "d4", "d5"));
        assert!(valid(&board, "d4", "d6")); // capture of the blocker itself
        assert!(!valid(&board, "d4", "d7"));
        assert!(!valid(&board, "d4", "d8"));
    }

    #[test]
    fn rook_blocked_by_own_piece_at_destination() {
        let mut board = lone("d4", piece(Color::White, PieceKind::Rook));
        board.place(sq("d6"), piece(Color::White, PieceKind::Pawn));
        assert!(!valid(&board, "d4", "d6"));
    }

    #[test_case("a1"; "down-left")]
    #[test_case("h8"; "up-right")]
    #[test_case("a7"; "up-left")]
    #[test_case("g1"; "down-right")]
    fn bishop_moves_diagonally(to: &str) {
        let board = lone("d4", piece(Color::White, PieceKind::Bishop));
        assert!(valid(&board, "d4", to));
    }

    #[test]
    fn bishop_rejects_straight_lines() {
        let board = lone("d4", piece(Color::White, PieceKind::Bishop));
        assert!(!valid(&board, "d4", "d8"));
        assert!(!valid(&board, "d4", "h4"));
    }

    #[test]
    fn bishop_blocked_by_intermediate_piece() {
        let mut board = lone("d4", piece(Color::White, PieceKind::Bishop));
        board.place(sq("f6"), piece(Color::Black, PieceKind::Pawn));
        assert!(valid(&board, "d4", "e5"));
        assert!(valid(&board, "d4", "f6"));
        assert!(!valid(&board, "d4", "g7"));
        assert!(!valid(&board, "d4", "h8"));
    }

    #[test_case("a3"; "long left")]
    #[test_case("c3"; "short left")]
    fn knight_reaches_its_jumps(to: &str) {
        let board = lone("b1", piece(Color::White, PieceKind::Knight));
        assert!(valid(&board, "b1", to));
    }

    #[test]
    fn knight_cannot_move_straight() {
        let board = lone("b1", piece(Color::White, PieceKind::Knight));
        assert!(!valid(&board, "b1", "b3"));
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let mut board = lone("b1", piece(Color::White, PieceKind::Knight));
        // Surround the knight; jumps ignore intervening occupancy.
        for blocker in ["a2", "b2", "c2", "a1", "c1"] {
            board.place(sq(blocker), piece(Color::White, PieceKind::Pawn));
        }
        assert!(valid(&board, "b1", "a3"));
        assert!(valid(&board, "b1", "c3"));
    }

    #[test_case("d8"; "rook line")]
    #[test_case("h8"; "bishop line")]
    #[test_case("a4"; "rank")]
    #[test_case("a1"; "down diagonal")]
    fn queen_combines_rook_and_bishop(to: &str) {
        let board = lone("d4", piece(Color::White, PieceKind::Queen));
        assert!(valid(&board, "d4", to));
    }

    #[test]
    fn queen_rejects_knight_jump() {
        let board = lone("d4", piece(Color::White, PieceKind::Queen));
        assert!(!valid(&board, "d4", "e6"));
    }

    #[test]
    fn queen_blocked_on_both_line_kinds() {
        let mut board = lone("d4", piece(Color::White, PieceKind::Queen));
        board.place(sq("d6"), piece(Color::Black, PieceKind::Pawn));
        board.place(sq("f6"), piece(Color::Black, PieceKind::Pawn));
        assert!(!valid(&board, "d4", "d8"));
        assert!(!valid(&board, "d4", "h8"));
    }

    #[test_case("d3")]
    #[test_case("d4")]
    #[test_case("d5")]
    #[test_case("e3")]
    #[test_case("e5")]
    #[test_case("f3")]
    #[test_case("f4")]
    #[test_case("f5")]
    fn king_moves_one_square(to: &str) {
        let board = lone("e4", piece(Color::White, PieceKind::King));
        assert!(valid(&board, "e4", to));
    }

    #[test_case("e6"; "two up")]
    #[test_case("g4"; "two right")]
    #[test_case("g6"; "two diagonal")]
    fn king_rejects_distant_squares(to: &str) {
        let board = lone("e4", piece(Color::White, PieceKind::King));
        assert!(!valid(&board, "e4", to));
    }

    #[test_case(PieceKind::Rook, "d5")]
    #[test_case(PieceKind::Knight, "e6")]
    #[test_case(PieceKind::Bishop, "e5")]
    #[test_case(PieceKind::Queen, "d5")]
    #[test_case(PieceKind::King, "d5")]
    fn own_color_destination_rejected(kind: PieceKind, to: &str) {
        // The destination is otherwise reachable for each kind.
        let mut board = lone("d4", piece(Color::White, kind));
        assert!(valid(&board, "d4", to));

        board.place(sq(to), piece(Color::White, PieceKind::Pawn));
        assert!(
            !valid(&board, "d4", to),
            "{kind:?} should not land on its own pawn"
        );
    }
}
