//! Board projection from revealed piece records
//!
//! The oracle reveals a list of `(id, player_id, position)` records. Each
//! owner has its own id table; some ids are placeholders that mean the square
//! is empty or hidden. A square without a record is not visible and stays empty.

use crate::error::ProjectionError;
use fog_types::{Board, Color, PieceKind, PieceRecord, PieceRef, PlayerRole, Square, SQUARE_COUNT};

/// Piece ids owned by white. Index = id.
const WHITE_IDS: [Option<PieceKind>; 8] = [
    None,
    Some(PieceKind::Pawn),
    None,
    Some(PieceKind::Knight),
    Some(PieceKind::Bishop),
    Some(PieceKind::Rook),
    Some(PieceKind::Queen),
    Some(PieceKind::King),
];

/// Piece ids owned by black. Pawns use id 2 instead of 1.
const BLACK_IDS: [Option<PieceKind>; 8] = [
    None,
    None,
    Some(PieceKind::Pawn),
    Some(PieceKind::Knight),
    Some(PieceKind::Bishop),
    Some(PieceKind::Rook),
    Some(PieceKind::Queen),
    Some(PieceKind::King),
];

/// Decode a `(player_id, id)` pair. `Ok(None)` is a placeholder.
pub fn decode_piece(player_id: u32, id: u32) -> Result<Option<PieceRef>, ProjectionError> {
    let role = PlayerRole::from_id(player_id).ok_or(ProjectionError::UnknownPlayer { player_id })?;
    let table = match role.color() {
        Color::White => &WHITE_IDS,
        Color::Black => &BLACK_IDS,
    };
    let kind = table
        .get(id as usize)
        .ok_or(ProjectionError::UnknownPiece { player_id, id })?;
    Ok(kind.map(|kind| PieceRef::new(role.color(), kind)))
}

/// Encode a piece as `(player_id, id)`, the inverse of [`decode_piece`]
pub fn encode_piece(piece: PieceRef) -> (u32, u32) {
    let table = match piece.color {
        Color::White => &WHITE_IDS,
        Color::Black => &BLACK_IDS,
    };
    let id = table
        .iter()
        .position(|kind| *kind == Some(piece.kind))
        .unwrap_or_default();
    (PlayerRole::from(piece.color).id() as u32, id as u32)
}

/// Build a fresh board for `viewer` from the records.
///
/// Never looks at the viewer's previous board.
pub fn project(records: &[PieceRecord], viewer: PlayerRole) -> Result<Board, ProjectionError> {
    let mut seen = [false; SQUARE_COUNT];
    let mut board = Board::empty();

    for record in records {
        let square = Square::from_position(record.position).ok_or(ProjectionError::PositionOutOfRange {
            position: record.position,
        })?;
        let slot = &mut seen[record.position as usize];
        if *slot {
            return Err(ProjectionError::DuplicatePosition {
                position: record.position,
            });
        }
        *slot = true;

        let piece = decode_piece(record.player_id, record.id)?;
        board = board.with_piece(square, piece);
    }

    tracing::debug!(
        "Projected {} view: {} records, {} pieces visible",
        viewer,
        records.len(),
        board.piece_count()
    );

    Ok(board)
}
