// Ficheiro: src/moves/sliding.rs
// Descrição: Lógica para gerar os lances de peças deslizantes (Torres, Bispos e Dama).

use crate::{board::Board, types::{Color, Position}};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Percorre cada raio a partir de `from` e para na primeira casa ocupada.
/// A casa ocupada só entra se tiver uma peça adversária.
/// Em modo premove o raio atravessa as peças e inclui todas as casas.
pub fn sliding_moves(
    board: &Board,
    from: Position,
    directions: &[(i8, i8)],
    color: Color,
    premove: bool,
) -> Vec<Position> {
    let mut moves = Vec::with_capacity(14);

    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            current = next;
            match board.color_at(next) {
                None => moves.push(next),
                Some(_) if premove => moves.push(next),
                Some(other) => {
                    if other != color {
                        moves.push(next);
                    }
                    break;
                }
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_rook_stops_at_blockers() {
        let board = Board::from_placement("4k3/8/8/8/1p1R2P1/8/8/4K3").unwrap();
        let moves = sliding_moves(&board, pos("d4"), &ROOK_DIRECTIONS, Color::White, false);
        assert!(moves.contains(&pos("b4")), "captura o peão preto");
        assert!(!moves.contains(&pos("a4")), "raio para no peão");
        assert!(moves.contains(&pos("f4")));
        assert!(!moves.contains(&pos("g4")), "não captura a própria peça");
        assert_eq!(moves.len(), 2 + 2 + 4 + 3);
    }

    #[test]
    fn test_premove_passes_through_pieces() {
        let board = Board::from_placement("4k3/8/8/8/1p1R2P1/8/8/4K3").unwrap();
        let moves = sliding_moves(&board, pos("d4"), &ROOK_DIRECTIONS, Color::White, true);
        assert!(moves.contains(&pos("a4")));
        assert!(moves.contains(&pos("h4")));
        assert!(moves.contains(&pos("g4")));
    }
}
