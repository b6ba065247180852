use crate::core::*;

use super::alpha_beta::Engine;
use super::evaluation::{evaluate, MATE};
use super::move_ordering::mvv_lva_score;
use super::movegen::generate_captures;
use super::mutable_board::MutableBoard;

impl Engine {
    /// Busca Quiescente - explora só capturas além da profundidade limite
    pub(super) fn quiescence(&mut self, mb: &mut MutableBoard, mut alpha: i32, beta: i32, qs_depth: u8) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.qnodes += 1;

        if mb.board.king_position(mb.turn).is_none() {
            return -MATE;
        }

        // Stand-pat: avaliação estática
        let stand_pat = evaluate(&mb.board, mb.turn);
        if qs_depth == 0 || stand_pat >= beta {
            return stand_pat;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut captures = generate_captures(mb);
        captures.sort_by_cached_key(|mv| {
            std::cmp::Reverse(mv.captured.map_or(0, |victim| mvv_lva_score(victim, mv.piece)))
        });

        let mut best_score = stand_pat;
        for mv in &captures {
            let undo = mb.make_move(mv);
            let score = -self.quiescence(mb, -beta, -alpha, qs_depth - 1);
            mb.unmake_move(undo);

            if self.should_stop() {
                return 0;
            }
            if score > best_score {
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
            if score >= beta {
                break;
            }
        }

        best_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;

    #[test]
    fn test_quiet_position_returns_stand_pat() {
        let mut engine = Engine::new(SearchConfig::default());
        let mut mb = MutableBoard::new(Board::new(), Color::White, None);
        assert_eq!(engine.quiescence(&mut mb, -1000, 1000, 6), 0);
    }

    #[test]
    fn test_sees_defended_piece() {
        // Dama branca captura peão defendido: a troca é má
        let board = Board::from_placement("4k3/2p5/3p4/8/8/8/8/3QK3").unwrap();
        let mut engine = Engine::new(SearchConfig::default());
        let mut mb = MutableBoard::new(board, Color::White, None);
        let stand_pat = evaluate(&board, Color::White);
        assert_eq!(engine.quiescence(&mut mb, -100_000, 100_000, 6), stand_pat);
        assert!(engine.qnodes > 1);
    }
}
