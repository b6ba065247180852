// Ficheiro: src/moves/queen.rs
// Descrição: Lógica para gerar os lances da Dama (torre + bispo).

use super::sliding::{sliding_moves, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use crate::{board::Board, types::{Color, Position}};

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    ROOK_DIRECTIONS[0], ROOK_DIRECTIONS[1], ROOK_DIRECTIONS[2], ROOK_DIRECTIONS[3],
    BISHOP_DIRECTIONS[0], BISHOP_DIRECTIONS[1], BISHOP_DIRECTIONS[2], BISHOP_DIRECTIONS[3],
];

#[inline]
pub fn queen_moves(board: &Board, from: Position, color: Color, premove: bool) -> Vec<Position> {
    sliding_moves(board, from, &QUEEN_DIRECTIONS, color, premove)
}
