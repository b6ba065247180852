// Ficheiro: src/rules/execute.rs
// Descrição: Aplicação pura de um lance completo sobre um tabuleiro.

use crate::core::*;
use crate::moves::king::castle_rook_squares;

/// Devolve o tabuleiro resultante; não revalida a legalidade.
///
/// # Panics
/// Se a casa de origem estiver vazia (registo de lance malformado).
pub fn execute_move(board: &Board, mv: &Move) -> Board {
    let mut next = *board;
    let mut piece = next
        .take(mv.from)
        .unwrap_or_else(|| panic!("execute_move: no piece at {}", mv.from));

    if let Some(victim) = mv.en_passant_victim() {
        next.set(victim, None);
    }

    if mv.is_castling {
        let (rook_from, rook_to) = castle_rook_squares(mv.from, mv.to);
        if let Some(rook) = next.take(rook_from) {
            next.set(rook_to, Some(rook.moved()));
        }
    }

    if let Some(kind) = mv.promotion {
        piece.kind = kind;
        piece.original_kind = kind;
    }
    piece.power = mv.after_power;
    piece.has_moved = true;
    next.set(mv.to, Some(piece));
    next
}

/// Alvo de en passant criado pelo lance: a casa saltada num avanço duplo.
pub fn en_passant_after(mv: &Move) -> Option<Position> {
    if mv.is_double_step {
        Some(Position::new((mv.from.row + mv.to.row) / 2, mv.from.col))
    } else {
        None
    }
}
