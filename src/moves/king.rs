// Ficheiro: src/moves/king.rs
// Descrição: Lógica para gerar os lances do Rei e a geometria do roque.

use super::knight::stepping_moves;
use crate::{board::Board, types::{Color, Piece, PieceKind, Position}};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    (0, 1), (1, -1), (1, 0), (1, 1),
];

#[inline]
pub fn king_steps(board: &Board, from: Position, color: Color, premove: bool) -> Vec<Position> {
    stepping_moves(board, from, &KING_OFFSETS, color, premove)
}

/// Um roque possível: destino do rei, torre de origem/destino e casas que o rei atravessa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleCandidate {
    pub king_to: Position,
    pub rook_from: Position,
    pub rook_to: Position,
    /// Casa intermédia do rei (a que ele cruza).
    pub king_crosses: Position,
}

/// Torre de origem e destino para um rei que roca de `king_from` para `king_to`.
pub fn castle_rook_squares(king_from: Position, king_to: Position) -> (Position, Position) {
    let row = king_from.row;
    if king_to.col > king_from.col {
        (Position::new(row, 7), Position::new(row, 5))
    } else {
        (Position::new(row, 0), Position::new(row, 3))
    }
}

/// Roques geometricamente possíveis: rei e torre nunca se moveram e as casas entre eles estão vazias.
/// A verificação de casas atacadas fica com o motor de legalidade.
pub fn castle_candidates(board: &Board, from: Position, king: &Piece, premove: bool) -> Vec<CastleCandidate> {
    let mut candidates = Vec::with_capacity(2);
    if !king.is_king || king.has_moved || from != Position::new(king.color.back_row(), 4) {
        return candidates;
    }

    let row = from.row;
    for (rook_col, between, king_col, cross_col, rook_to_col) in
        [(7u8, &[5u8, 6][..], 6u8, 5u8, 5u8), (0u8, &[1u8, 2, 3][..], 2u8, 3u8, 3u8)]
    {
        let rook_from = Position::new(row, rook_col);
        let rook_ok = matches!(
            board.get(rook_from),
            Some(p) if p.kind == PieceKind::Rook && p.color == king.color && !p.has_moved
        );
        if !rook_ok {
            continue;
        }
        let clear = premove || between.iter().all(|&c| board.is_empty(Position::new(row, c)));
        if clear {
            candidates.push(CastleCandidate {
                king_to: Position::new(row, king_col),
                rook_from,
                rook_to: Position::new(row, rook_to_col),
                king_crosses: Position::new(row, cross_col),
            });
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castle_candidates_need_empty_squares() {
        let board = Board::new();
        let e1 = Position::from_algebraic("e1").unwrap();
        let king = board.get(e1).unwrap();
        assert!(castle_candidates(&board, e1, &king, false).is_empty());
        assert_eq!(castle_candidates(&board, e1, &king, true).len(), 2);
    }

    #[test]
    fn test_castle_candidates_open_back_rank() {
        let board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let e1 = Position::from_algebraic("e1").unwrap();
        let king = board.get(e1).unwrap();
        let c = castle_candidates(&board, e1, &king, false);
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].king_to, Position::from_algebraic("g1").unwrap());
        assert_eq!(c[1].rook_to, Position::from_algebraic("d1").unwrap());
    }

    #[test]
    fn test_rook_squares_for_long_castle() {
        let e8 = Position::from_algebraic("e8").unwrap();
        let c8 = Position::from_algebraic("c8").unwrap();
        let (rf, rt) = castle_rook_squares(e8, c8);
        assert_eq!(rf.to_string(), "a8");
        assert_eq!(rt.to_string(), "d8");
    }
}
