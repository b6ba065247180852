// Ficheiro: src/moves/mod.rs
// Descrição: Geração de destinos por conjunto de lances (nativo ou poder).

pub mod pawn;
pub mod knight;
pub mod sliding;
pub mod queen;
pub mod king;

use crate::{board::Board, types::{Piece, PieceKind, Position}};
use pawn::PawnTarget;

/// Destinos de `piece` em `from` usando o conjunto de lances de `kind`.
/// `kind` pode ser o tipo nativo da peça ou o seu poder; o roque não entra aqui.
pub fn targets_for_kind(
    board: &Board,
    from: Position,
    piece: &Piece,
    kind: PieceKind,
    en_passant: Option<Position>,
    premove: bool,
) -> Vec<PawnTarget> {
    let color = piece.color;
    let plain = |squares: Vec<Position>| -> Vec<PawnTarget> {
        squares
            .into_iter()
            .map(|to| PawnTarget { to, en_passant: false, double_step: false })
            .collect()
    };

    match kind {
        PieceKind::Pawn => pawn::pawn_moves(board, from, piece, en_passant, premove),
        PieceKind::Knight => plain(knight::stepping_moves(board, from, &knight::KNIGHT_OFFSETS, color, premove)),
        PieceKind::Bishop => plain(sliding::sliding_moves(board, from, &sliding::BISHOP_DIRECTIONS, color, premove)),
        PieceKind::Rook => plain(sliding::sliding_moves(board, from, &sliding::ROOK_DIRECTIONS, color, premove)),
        PieceKind::Queen => plain(queen::queen_moves(board, from, color, premove)),
        PieceKind::King => plain(king::king_steps(board, from, color, premove)),
    }
}

/// Casas atacadas por `piece` via o conjunto de `kind` (peões: só as diagonais).
pub fn attacks_for_kind(board: &Board, from: Position, piece: &Piece, kind: PieceKind) -> Vec<Position> {
    match kind {
        PieceKind::Pawn => pawn::pawn_attacks(from, piece),
        _ => targets_for_kind(board, from, piece, kind, None, false)
            .into_iter()
            .map(|t| t.to)
            .collect(),
    }
}
