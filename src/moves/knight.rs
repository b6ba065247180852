// Ficheiro: src/moves/knight.rs
// Descrição: Lances de passo único (cavalo e, via king.rs, rei).

use crate::{board::Board, types::{Color, Position}};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

/// Gera os destinos de um passo para cada deslocamento.
/// Casas da própria cor ficam de fora, exceto em modo premove.
pub fn stepping_moves(
    board: &Board,
    from: Position,
    offsets: &[(i8, i8)],
    color: Color,
    premove: bool,
) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| premove || board.color_at(to) != Some(color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_in_corner_has_two_moves() {
        let board = Board::empty();
        let moves = stepping_moves(&board, Position::new(7, 7), &KNIGHT_OFFSETS, Color::White, false);
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_knight_skips_own_pieces() {
        let board = Board::new();
        let g1 = Position::from_algebraic("g1").unwrap();
        let moves = stepping_moves(&board, g1, &KNIGHT_OFFSETS, Color::White, false);
        assert_eq!(moves.len(), 2, "e2 está ocupada pelo próprio peão");
        let premoves = stepping_moves(&board, g1, &KNIGHT_OFFSETS, Color::White, true);
        assert_eq!(premoves.len(), 3);
    }
}
