// Perft: contagem de nós da árvore de lances, para validar o gerador

use rayon::prelude::*;

use crate::core::*;
use crate::search::{generate_moves, MutableBoard};

/// Número de folhas a `depth` meios-lances.
pub fn perft(board: &Board, turn: Color, en_passant: Option<Position>, depth: u8) -> u64 {
    let mut mb = MutableBoard::new(*board, turn, en_passant);
    perft_inner(&mut mb, depth)
}

fn perft_inner(mb: &mut MutableBoard, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_moves(mb);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        let undo = mb.make_move(mv);
        nodes += perft_inner(mb, depth - 1);
        mb.unmake_move(undo);
    }
    nodes
}

/// Contagem por lance da raiz; cada subárvore corre numa tarefa rayon.
pub fn perft_divide(board: &Board, turn: Color, en_passant: Option<Position>, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let root = MutableBoard::new(*board, turn, en_passant);
    let moves = generate_moves(&mut root.clone());

    let mut divided: Vec<(Move, u64)> = moves
        .into_par_iter()
        .map(|mv| {
            let mut mb = root.clone();
            mb.make_move(&mv);
            let nodes = perft_inner(&mut mb, depth - 1);
            (mv, nodes)
        })
        .collect();
    divided.sort_by_key(|(mv, _)| mv.to_string());
    divided
}

/// Perft com a raiz dividida em paralelo.
pub fn perft_parallel(board: &Board, turn: Color, en_passant: Option<Position>, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    perft_divide(board, turn, en_passant, depth).iter().map(|(_, n)| n).sum()
}
