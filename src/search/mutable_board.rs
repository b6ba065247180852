// Tabuleiro mutável da busca: make/unmake com hash Zobrist incremental

use crate::core::*;
use crate::moves::king::castle_rook_squares;
use crate::rules::en_passant_after;

/// Estado necessário para desfazer exatamente um `make_move`.
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    from: Position,
    to: Position,
    moved: Piece,
    captured: Option<(Position, Piece)>,
    rook: Option<(Position, Position, Piece)>, // origem, destino, torre antes do roque
    hash: u64,
    en_passant: Option<Position>,
}

/// Tabuleiro exclusivo de uma busca.
#[derive(Debug, Clone)]
pub struct MutableBoard {
    pub board: Board,
    pub hash: u64,
    pub turn: Color,
    pub en_passant: Option<Position>,
}

impl MutableBoard {
    pub fn new(board: Board, turn: Color, en_passant: Option<Position>) -> Self {
        MutableBoard {
            board,
            hash: compute_hash(&board, turn, en_passant),
            turn,
            en_passant,
        }
    }

    /// Aplica o lance e atualiza o hash por XOR.
    ///
    /// # Panics
    /// Se a casa de origem estiver vazia.
    pub fn make_move(&mut self, mv: &Move) -> Undo {
        let keys = &*ZOBRIST_KEYS;
        let prior_hash = self.hash;
        let prior_ep = self.en_passant;

        let moved = self
            .board
            .take(mv.from)
            .unwrap_or_else(|| panic!("make_move: no piece at {}", mv.from));
        self.hash ^= keys.piece(&moved, mv.from);

        let capture_square = mv.en_passant_victim().unwrap_or(mv.to);
        let captured = self.board.take(capture_square).map(|p| (capture_square, p));
        if let Some((square, piece)) = captured {
            self.hash ^= keys.piece(&piece, square);
        }

        let mut rook = None;
        if mv.is_castling {
            let (rook_from, rook_to) = castle_rook_squares(mv.from, mv.to);
            if let Some(piece) = self.board.take(rook_from) {
                let placed = piece.moved();
                self.board.set(rook_to, Some(placed));
                self.hash ^= keys.piece(&piece, rook_from) ^ keys.piece(&placed, rook_to);
                rook = Some((rook_from, rook_to, piece));
            }
        }

        let mut placed = moved;
        if let Some(kind) = mv.promotion {
            placed.kind = kind;
            placed.original_kind = kind;
        }
        placed.power = mv.after_power;
        placed.has_moved = true;
        self.board.set(mv.to, Some(placed));
        self.hash ^= keys.piece(&placed, mv.to);

        if let Some(ep) = prior_ep {
            self.hash ^= keys.en_passant_file(ep);
        }
        self.en_passant = en_passant_after(mv);
        if let Some(ep) = self.en_passant {
            self.hash ^= keys.en_passant_file(ep);
        }

        self.turn = !self.turn;
        self.hash ^= keys.side_to_move;

        Undo {
            from: mv.from,
            to: mv.to,
            moved,
            captured,
            rook,
            hash: prior_hash,
            en_passant: prior_ep,
        }
    }

    pub fn unmake_move(&mut self, undo: Undo) {
        self.board.set(undo.to, None);
        self.board.set(undo.from, Some(undo.moved));
        if let Some((square, piece)) = undo.captured {
            self.board.set(square, Some(piece));
        }
        if let Some((rook_from, rook_to, piece)) = undo.rook {
            self.board.set(rook_to, None);
            self.board.set(rook_from, Some(piece));
        }
        self.hash = undo.hash;
        self.en_passant = undo.en_passant;
        self.turn = !self.turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{execute_move, generate_legal_moves};

    fn roundtrip_all(board: Board, turn: Color, ep: Option<Position>) {
        let mut mb = MutableBoard::new(board, turn, ep);
        for mv in generate_legal_moves(&board, turn, ep) {
            let undo = mb.make_move(&mv);
            assert_eq!(mb.board, execute_move(&board, &mv), "{}", mv.notation);
            assert_eq!(mb.hash, compute_hash(&mb.board, mb.turn, mb.en_passant), "{}", mv.notation);
            mb.unmake_move(undo);
            assert_eq!(mb.board, board);
            assert_eq!(mb.hash, compute_hash(&board, turn, ep));
        }
    }

    #[test]
    fn test_make_unmake_start_position() {
        roundtrip_all(Board::new(), Color::White, None);
    }

    #[test]
    fn test_make_unmake_castling_en_passant_and_powers() {
        let setup = Board::from_fen("r3k2r/8/8/3pP3/2N(q)5/8/8/R3K2R w KQkq d6").unwrap();
        roundtrip_all(setup.board, setup.turn, setup.en_passant);
    }

    #[test]
    fn test_make_unmake_promotions() {
        let board = Board::from_placement("1r2k3/P7/8/8/8/8/8/4K3").unwrap();
        roundtrip_all(board, Color::White, None);
    }
}
