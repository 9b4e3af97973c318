//! Move legality on a single player's view
//!
//! The check only knows what the board shows. Hidden pieces are invisible to
//! it, so a move can pass here and still be rejected by the oracle.
//! No check, castling, en passant or promotion: the oracle owns the full rules.

use fog_types::{Board, Color, MoveRequest, PieceKind, Square};

/// Is moving the piece on `from` to `to` legal on `board`
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };

    if let Some(target) = board.get(to) {
        if target.color == piece.color {
            return false;
        }
    }

    let dr = to.row() as i8 - from.row() as i8;
    let dc = to.col() as i8 - from.col() as i8;

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece.color, from, to, dr, dc),
        PieceKind::Knight => knight_move(dr, dc),
        PieceKind::Bishop => diagonal_clear(board, from, to, dr, dc),
        PieceKind::Rook => straight_clear(board, from, to, dr, dc),
        PieceKind::Queen => {
            diagonal_clear(board, from, to, dr, dc) || straight_clear(board, from, to, dr, dc)
        }
        PieceKind::King => king_move(dr, dc),
    }
}

/// Convenience wrapper over [`is_legal`]
pub fn is_legal_move(board: &Board, mv: &MoveRequest) -> bool {
    is_legal(board, mv.from(), mv.to())
}

fn pawn_move(board: &Board, color: Color, from: Square, to: Square, dr: i8, dc: i8) -> bool {
    let dir = color.forward();

    if dc == 0 {
        if !board.is_empty_at(to) {
            return false;
        }
        if dr == dir {
            return true;
        }
        if dr == 2 * dir && from.row() == color.pawn_start_row() {
            return Square::from_signed(from.row() as i8 + dir, from.col() as i8)
                .is_some_and(|mid| board.is_empty_at(mid));
        }
        return false;
    }

    // Diagonal step only as a capture; own pieces were already excluded
    dc.abs() == 1 && dr == dir && !board.is_empty_at(to)
}

fn knight_move(dr: i8, dc: i8) -> bool {
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

fn king_move(dr: i8, dc: i8) -> bool {
    dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
}

fn diagonal_clear(board: &Board, from: Square, to: Square, dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs() && path_clear(board, from, to, dr.signum(), dc.signum())
}

fn straight_clear(board: &Board, from: Square, to: Square, dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0) && path_clear(board, from, to, dr.signum(), dc.signum())
}

/// Every square strictly between `from` and `to` is empty.
/// The destination itself is never part of the scan.
fn path_clear(board: &Board, from: Square, to: Square, step_r: i8, step_c: i8) -> bool {
    let mut r = from.row() as i8 + step_r;
    let mut c = from.col() as i8 + step_c;
    while (r, c) != (to.row() as i8, to.col() as i8) {
        match Square::from_signed(r, c) {
            Some(sq) if board.is_empty_at(sq) => {}
            _ => return false,
        }
        r += step_r;
        c += step_c;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use fog_types::PieceRef;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn lone(piece: PieceRef, at: Square) -> Board {
        Board::empty().with_piece(at, Some(piece))
    }

    #[test]
    fn test_initial_pawn_double_step() {
        let board = Board::starting_position();
        assert!(is_legal(&board, sq(6, 4), sq(4, 4)));
        assert!(is_legal(&board, sq(6, 4), sq(5, 4)));
        assert!(is_legal(&board, sq(1, 3), sq(3, 3)));
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let board = Board::starting_position()
            .with_piece(sq(5, 4), Some(PieceRef::black(PieceKind::Knight)));
        assert!(!is_legal(&board, sq(6, 4), sq(4, 4)));
    }

    #[test]
    fn test_pawn_double_step_only_from_start_rank() {
        let board = lone(PieceRef::white(PieceKind::Pawn), sq(5, 2));
        assert!(is_legal(&board, sq(5, 2), sq(4, 2)));
        assert!(!is_legal(&board, sq(5, 2), sq(3, 2)));
    }

    #[test]
    fn test_pawn_direction_and_captures() {
        let board = lone(PieceRef::white(PieceKind::Pawn), sq(4, 4))
            .with_piece(sq(3, 5), Some(PieceRef::black(PieceKind::Rook)))
            .with_piece(sq(3, 4), Some(PieceRef::black(PieceKind::Pawn)));

        // blocked straight ahead, capture to the right, nothing to the left
        assert!(!is_legal(&board, sq(4, 4), sq(3, 4)));
        assert!(is_legal(&board, sq(4, 4), sq(3, 5)));
        assert!(!is_legal(&board, sq(4, 4), sq(3, 3)));
        // backward and sideways
        assert!(!is_legal(&board, sq(4, 4), sq(5, 4)));
        assert!(!is_legal(&board, sq(4, 4), sq(4, 5)));
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let board = Board::starting_position();
        assert!(is_legal(&board, sq(1, 0), sq(2, 0)));
        assert!(!is_legal(&board, sq(1, 0), sq(0, 0)));
    }

    #[test]
    fn test_knight() {
        let board = Board::starting_position();
        assert!(is_legal(&board, sq(7, 1), sq(5, 2)));
        assert!(is_legal(&board, sq(7, 1), sq(5, 0)));
        // own pawn on d2
        assert!(!is_legal(&board, sq(7, 1), sq(6, 3)));

        let lone_knight = lone(PieceRef::black(PieceKind::Knight), sq(3, 3));
        for to in Square::all() {
            let dr = (to.row() as i8 - 3).abs();
            let dc = (to.col() as i8 - 3).abs();
            let expected = matches!((dr, dc), (1, 2) | (2, 1));
            assert_eq!(is_legal(&lone_knight, sq(3, 3), to), expected, "knight to {}", to);
        }
    }

    #[test]
    fn test_rook_blocked_by_own_pawn() {
        let board = Board::starting_position();
        assert!(!is_legal(&board, sq(7, 0), sq(5, 0)));
    }

    #[test]
    fn test_sliders_stop_at_interior_blockers() {
        let rook = lone(PieceRef::white(PieceKind::Rook), sq(4, 0))
            .with_piece(sq(4, 3), Some(PieceRef::black(PieceKind::Pawn)));
        assert!(is_legal(&rook, sq(4, 0), sq(4, 2)));
        // the blocker itself can be captured
        assert!(is_legal(&rook, sq(4, 0), sq(4, 3)));
        assert!(!is_legal(&rook, sq(4, 0), sq(4, 4)));
        assert!(!is_legal(&rook, sq(4, 0), sq(3, 1)));

        let bishop = lone(PieceRef::white(PieceKind::Bishop), sq(7, 2))
            .with_piece(sq(5, 4), Some(PieceRef::white(PieceKind::Pawn)));
        assert!(is_legal(&bishop, sq(7, 2), sq(6, 3)));
        assert!(!is_legal(&bishop, sq(7, 2), sq(5, 4)));
        assert!(!is_legal(&bishop, sq(7, 2), sq(4, 5)));
        assert!(is_legal(&bishop, sq(7, 2), sq(5, 0)));
    }

    #[test]
    fn test_queen_is_union_of_bishop_and_rook() {
        let board = lone(PieceRef::black(PieceKind::Queen), sq(3, 3));
        assert!(is_legal(&board, sq(3, 3), sq(0, 0)));
        assert!(is_legal(&board, sq(3, 3), sq(3, 7)));
        assert!(is_legal(&board, sq(3, 3), sq(7, 3)));
        assert!(!is_legal(&board, sq(3, 3), sq(5, 4)));
    }

    #[test]
    fn test_king_single_steps() {
        let board = lone(PieceRef::white(PieceKind::King), sq(4, 4));
        assert!(is_legal(&board, sq(4, 4), sq(3, 3)));
        assert!(is_legal(&board, sq(4, 4), sq(5, 4)));
        assert!(!is_legal(&board, sq(4, 4), sq(2, 4)));
        assert!(!is_legal(&board, sq(4, 4), sq(4, 4)));
    }

    #[test]
    fn test_empty_source_and_determinism() {
        let board = Board::starting_position();
        assert!(!is_legal(&board, sq(4, 4), sq(3, 4)));

        let before = board;
        for from in Square::all() {
            for to in Square::all() {
                assert_eq!(is_legal(&board, from, to), is_legal(&board, from, to));
            }
        }
        assert_eq!(board, before);
    }
}
