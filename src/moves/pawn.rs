// Ficheiro: src/moves/pawn.rs
// Descrição: Lógica para gerar os lances dos peões (e de peças com poder de peão).

use crate::{board::Board, types::{Piece, Position}};

/// Um destino do conjunto de peão, com a informação de que tipo de lance é.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnTarget {
    pub to: Position,
    pub en_passant: bool,
    pub double_step: bool,
}

/// Gera avanços, capturas diagonais e en passant para `piece` em `from`
/// usando o conjunto de lances de peão da sua cor.
pub fn pawn_moves(
    board: &Board,
    from: Position,
    piece: &Piece,
    en_passant: Option<Position>,
    premove: bool,
) -> Vec<PawnTarget> {
    let mut moves = Vec::with_capacity(4);
    let color = piece.color;
    let dir = color.pawn_direction();

    // Avanço simples e duplo
    if let Some(one) = from.offset(dir, 0) {
        if premove || board.is_empty(one) {
            moves.push(PawnTarget { to: one, en_passant: false, double_step: false });

            if from.row == color.pawn_start_row() && !piece.has_moved {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if premove || board.is_empty(two) {
                        moves.push(PawnTarget { to: two, en_passant: false, double_step: true });
                    }
                }
            }
        }
    }

    // Capturas diagonais e en passant
    for dc in [-1i8, 1] {
        if let Some(diag) = from.offset(dir, dc) {
            match board.color_at(diag) {
                Some(other) if other != color => {
                    moves.push(PawnTarget { to: diag, en_passant: false, double_step: false });
                }
                None if en_passant == Some(diag) && is_en_passant_victim(board, from, diag, piece) => {
                    moves.push(PawnTarget { to: diag, en_passant: true, double_step: false });
                }
                _ if premove => {
                    moves.push(PawnTarget { to: diag, en_passant: false, double_step: false });
                }
                _ => {}
            }
        }
    }
    moves
}

/// Casas atacadas pelo conjunto de peão: as duas diagonais, ocupadas ou não.
pub fn pawn_attacks(from: Position, piece: &Piece) -> Vec<Position> {
    let dir = piece.color.pawn_direction();
    [-1i8, 1].iter().filter_map(|&dc| from.offset(dir, dc)).collect()
}

fn is_en_passant_victim(board: &Board, from: Position, target: Position, piece: &Piece) -> bool {
    let victim = Position::new(from.row, target.col);
    matches!(board.get(victim), Some(p) if p.color != piece.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_pawn_double_step_from_start() {
        let board = Board::new();
        let pawn = board.get(pos("e2")).unwrap();
        let moves = pawn_moves(&board, pos("e2"), &pawn, None, false);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|m| m.to == pos("e4") && m.double_step));
    }

    #[test]
    fn test_blocked_pawn_has_no_forward_move() {
        let board = Board::from_placement("4k3/8/8/8/4p3/4P3/8/4K3").unwrap();
        let pawn = board.get(pos("e3")).unwrap();
        assert!(pawn_moves(&board, pos("e3"), &pawn, None, false).is_empty());
    }

    #[test]
    fn test_en_passant_target() {
        let board = Board::from_placement("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        let pawn = board.get(pos("e5")).unwrap();
        let moves = pawn_moves(&board, pos("e5"), &pawn, Some(pos("d6")), false);
        assert!(moves.iter().any(|m| m.to == pos("d6") && m.en_passant));
    }

    #[test]
    fn test_power_holder_uses_its_own_direction() {
        let knight = Piece::new(PieceKind::Knight, Color::Black).with_power(PieceKind::Pawn).moved();
        let board = Board::empty();
        let moves = pawn_moves(&board, pos("d5"), &knight, None, false);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, pos("d4"));
        assert_eq!(pawn_attacks(pos("d5"), &knight).len(), 2);
    }
}
