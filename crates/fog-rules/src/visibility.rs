//! Vision on the true board
//!
//! A color sees the squares its own pieces stand on plus every square one of
//! them could legally move to.

use crate::validator::is_legal;
use fog_types::{Board, Color, Square};

/// Squares the piece on `from` can legally move to
pub fn reachable_squares(board: &Board, from: Square) -> impl Iterator<Item = Square> + '_ {
    Square::all().filter(move |to| is_legal(board, from, *to))
}

/// Every square visible to `color`, in row-major order
pub fn visible_squares(board: &Board, color: Color) -> Vec<Square> {
    let own: Vec<Square> = board
        .pieces()
        .filter(|(_, piece)| piece.color == color)
        .map(|(sq, _)| sq)
        .collect();

    Square::all()
        .filter(|target| {
            own.iter()
                .any(|from| from == target || is_legal(board, *from, *target))
        })
        .collect()
}
