// Zobrist hashing para detecção de repetições e para a transposition table
use crate::board::Board;
use crate::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Semente fixa: as chaves são iguais em todas as execuções.
const ZOBRIST_SEED: u64 = 0x5EED_CAFE_F00D_0001;

pub struct ZobristKeys {
    pub pieces: [[[[u64; 64]; 7]; 6]; 2], // [cor][tipo][poder ou nenhum][casa]
    pub en_passant: [u64; 8],             // Para en passant por coluna
    pub side_to_move: u64,                // Para quem joga
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut keys = ZobristKeys {
            pieces: [[[[0; 64]; 7]; 6]; 2],
            en_passant: [0; 8],
            side_to_move: 0,
        };

        for color in keys.pieces.iter_mut() {
            for kind in color.iter_mut() {
                for power in kind.iter_mut() {
                    for square in power.iter_mut() {
                        *square = rng.gen();
                    }
                }
            }
        }

        for key in keys.en_passant.iter_mut() {
            *key = rng.gen();
        }
        keys.side_to_move = rng.gen();

        keys
    }

    /// Chave de uma peça (com o seu poder) numa casa.
    #[inline]
    pub fn piece(&self, piece: &Piece, pos: Position) -> u64 {
        self.pieces[piece.color.index()][piece.kind.index()][power_to_index(piece.power)][pos.index()]
    }

    #[inline]
    pub fn en_passant_file(&self, pos: Position) -> u64 {
        self.en_passant[pos.col as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

// Instância global das chaves Zobrist
lazy_static::lazy_static! {
    pub static ref ZOBRIST_KEYS: ZobristKeys = ZobristKeys::new();
}

/// Índice do poder: 0 = sem poder, 1..=6 = tipo.
#[inline]
pub fn power_to_index(power: Option<PieceKind>) -> usize {
    match power {
        None => 0,
        Some(kind) => kind.index() + 1,
    }
}

/// Calcula o hash completo de uma posição (usado na criação; depois é incremental).
pub fn compute_hash(board: &Board, turn: Color, en_passant: Option<Position>) -> u64 {
    let mut hash = 0u64;

    for (pos, piece) in board.occupied() {
        hash ^= ZOBRIST_KEYS.piece(&piece, pos);
    }

    if let Some(ep) = en_passant {
        hash ^= ZOBRIST_KEYS.en_passant_file(ep);
    }

    if turn == Color::Black {
        hash ^= ZOBRIST_KEYS.side_to_move;
    }

    hash
}
