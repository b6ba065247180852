// Geração de lances da busca: pseudo-legais + make/unmake para filtrar auto-xeque

use crate::core::*;
use crate::rules::{generate_pseudo_moves, is_king_in_check};

use super::mutable_board::MutableBoard;

/// Lances legais do lado a jogar. Sem rei não há lances.
pub fn generate_moves(mb: &mut MutableBoard) -> Vec<Move> {
    legal_subset(mb, |_| true)
}

/// Só capturas (incluindo en passant), para a busca quiescente.
pub fn generate_captures(mb: &mut MutableBoard) -> Vec<Move> {
    legal_subset(mb, Move::is_capture)
}

fn legal_subset(mb: &mut MutableBoard, keep: impl Fn(&Move) -> bool) -> Vec<Move> {
    let color = mb.turn;
    if mb.board.king_position(color).is_none() {
        return Vec::new();
    }

    let pseudo = generate_pseudo_moves(&mb.board, color, mb.en_passant);
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo.into_iter().filter(|mv| keep(mv)) {
        if mv.captured == Some(PieceKind::King) && !mv.is_en_passant {
            legal.push(mv);
            continue;
        }
        let undo = mb.make_move(&mv);
        let safe = !is_king_in_check(&mb.board, color);
        mb.unmake_move(undo);
        if safe {
            legal.push(mv);
        }
    }
    legal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::generate_legal_moves;

    #[test]
    fn test_matches_rules_generator() {
        let setup = Board::from_fen("r3k2r/pp3ppp/8/3pP3/2N(q)5/8/PP3PPP/R3K2R w KQkq d6").unwrap();
        let mut mb = MutableBoard::new(setup.board, setup.turn, setup.en_passant);
        let mut ours: Vec<String> = generate_moves(&mut mb).iter().map(|m| m.to_string()).collect();
        let mut rules: Vec<String> = generate_legal_moves(&setup.board, setup.turn, setup.en_passant)
            .iter()
            .map(|m| m.to_string())
            .collect();
        ours.sort();
        rules.sort();
        assert_eq!(ours, rules);
    }

    #[test]
    fn test_captures_only() {
        let board = Board::from_placement("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let mut mb = MutableBoard::new(board, Color::White, None);
        let captures = generate_captures(&mut mb);
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to_string(), "e4d5");
    }

    #[test]
    fn test_no_king_no_moves() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R3K3").unwrap();
        let mut mb = MutableBoard::new(board, Color::Black, None);
        assert!(generate_moves(&mut mb).is_empty());
    }
}
