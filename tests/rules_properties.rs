// Propriedades das regras sobre partidas aleatórias e cenários fixos

use pelanca_power::rules::*;
use pelanca_power::search::MutableBoard;
use pelanca_power::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn pos(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

fn propose(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
    game.propose(pos(from), pos(to)).unwrap()
}

/// Verifica as invariantes de todos os lances de uma posição.
fn check_position(board: &Board, turn: Color, ep: Option<Position>) -> Vec<Move> {
    let moves = generate_legal_moves(board, turn, ep);
    let mut mb = MutableBoard::new(*board, turn, ep);
    let hash = compute_hash(board, turn, ep);

    for mv in &moves {
        let next = execute_move(board, mv);
        if next.king_position(!turn).is_some() {
            assert!(!is_king_in_check(&next, turn), "{} leaves own king in check", mv.notation);
        }

        let undo = mb.make_move(mv);
        assert_eq!(mb.board, next, "make_move differs from execute_move for {}", mv.notation);
        assert_eq!(mb.hash, compute_hash(&next, !turn, en_passant_after(mv)));
        mb.unmake_move(undo);
        assert_eq!(mb.board, *board);
        assert_eq!(mb.hash, hash);
    }

    // Cada destino de valid_moves corresponde a pelo menos um lance gerado
    for (from, _) in board.pieces(turn) {
        for to in valid_moves(board, from, ep, false) {
            assert!(moves.iter().any(|m| m.from == from && m.to == to), "{}{} not generated", from, to);
        }
    }
    moves
}

fn random_playout(fen: &str, seed: u64, plies: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let setup = Board::from_fen(fen).unwrap();
    let (mut board, mut turn, mut ep) = (setup.board, setup.turn, setup.en_passant);

    for _ in 0..plies {
        if board.king_position(turn).is_none() {
            break;
        }
        let moves = check_position(&board, turn, ep);
        let Some(mv) = moves.choose(&mut rng) else { break };
        board = execute_move(&board, mv);
        ep = en_passant_after(mv);
        turn = !turn;
    }
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..6 {
        random_playout("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", seed, 80);
    }
}

#[test]
fn random_games_from_power_position_keep_invariants() {
    for seed in 10..14 {
        random_playout("r3k2r/pp1n(q)1ppp/2n5/3pP3/2N(q)2b(p)2/5B(r)2/PP3PPP/R3K2R w KQkq d6 0 1", seed, 60);
    }
}

#[test]
fn knight_shuffle_repeats_key_and_draws() {
    let mut game = Game::new();
    let start_key = game.position_key();
    assert_eq!(start_key, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR|w|-");

    for round in 1..=2 {
        propose(&mut game, "g1", "f3");
        propose(&mut game, "g8", "f6");
        propose(&mut game, "f3", "g1");
        propose(&mut game, "f6", "g8");
        assert_eq!(game.position_key(), start_key);
        assert_eq!(game.repetitions(&start_key), round + 1);
    }
    assert_eq!(game.status(), GameStatus::DrawThreefold);
}

#[test]
fn fifty_quiet_moves_draw() {
    let white = ["a1", "a2", "b3", "b2", "b1"];
    let black = ["h8", "h7", "h6", "g6", "g7", "g8"];
    let mut game = Game::from_fen("7k/8/8/8/8/8/8/K7 w - - 0 1").unwrap();

    for i in 0..50 {
        assert_eq!(game.status(), GameStatus::Ongoing, "ended early at move {}", i);
        propose(&mut game, white[i % 5], white[(i + 1) % 5]);
        if i < 49 {
            assert_eq!(game.status(), GameStatus::Ongoing);
        }
        propose(&mut game, black[i % 6], black[(i + 1) % 6]);
    }
    assert_eq!(game.halfmove_clock(), 100);
    assert_eq!(game.status(), GameStatus::DrawFiftyMove);
}

#[test]
fn knight_takes_rook_then_spends_the_power() {
    let mut game = Game::from_fen("4k3/8/8/3r4/8/4N3/8/4K3 w - - 0 1").unwrap();

    let MoveOutcome::Finalized(capture) = propose(&mut game, "e3", "d5") else { panic!("capture should finalize") };
    assert_eq!(capture.captured, Some(PieceKind::Rook));
    assert_eq!(capture.notation, "Ne3xd5");
    let knight = game.board().get(pos("d5")).unwrap();
    assert_eq!(knight.kind, PieceKind::Knight);
    assert_eq!(knight.power, Some(PieceKind::Rook));

    propose(&mut game, "e8", "f8");

    assert!(is_power_move(game.board(), pos("d5"), pos("d2"), game.en_passant()));
    let MoveOutcome::Finalized(slide) = propose(&mut game, "d5", "d2") else { panic!("power move should finalize") };
    assert!(slide.power_consumed);
    assert_eq!(game.board().get(pos("d2")).unwrap().power, None);
}

#[test]
fn pawn_with_bishop_power_needs_disambiguation() {
    // Peão branco em e5 com poder de bispo; d7-d5 acabou de ser jogado
    let mut game = Game::from_fen("4k3/8/8/3pP(b)3/8/8/8/4K3 w - d6 0 1").unwrap();
    let before = game.position_key();

    assert!(is_ambiguous_move(game.board(), pos("e5"), pos("d6"), game.en_passant()));
    assert_eq!(
        propose(&mut game, "e5", "d6"),
        MoveOutcome::NeedsDisambiguation(Ambiguity::EnPassant)
    );
    assert_eq!(game.position_key(), before);
    assert_eq!(game.turn(), Color::White);

    // Poder declarado: deslize de bispo, sem captura, poder gasto
    let MoveOutcome::Finalized(mv) = game.resolve_ambiguity(Resolution::Power).unwrap() else {
        panic!("resolution should finalize")
    };
    assert!(!mv.is_en_passant && mv.is_force_power);
    assert!(game.board().get(pos("d5")).is_some());
    assert_eq!(game.board().get(pos("d6")).unwrap().power, None);
}

#[test]
fn pawn_ambiguity_native_choice_captures_en_passant() {
    let mut game = Game::from_fen("4k3/8/8/3pP(b)3/8/8/8/4K3 w - d6 0 1").unwrap();
    propose(&mut game, "e5", "d6");
    let MoveOutcome::Finalized(mv) = game.resolve_ambiguity(Resolution::Native).unwrap() else {
        panic!("resolution should finalize")
    };
    assert!(mv.is_en_passant);
    assert!(game.board().is_empty(pos("d5")));
    assert_eq!(game.board().get(pos("d6")).unwrap().power, Some(PieceKind::Pawn));
}

#[test]
fn pawn_with_king_power_forward_step_is_plain_ambiguity() {
    let board = Board::from_placement("4k3/8/8/8/8/4P(k)3/8/4K3").unwrap();
    assert_eq!(ambiguity(&board, pos("e3"), pos("e4"), None), Some(Ambiguity::Plain));
    let variants: Vec<Move> = generate_legal_moves(&board, Color::White, None)
        .into_iter()
        .filter(|m| m.from == pos("e3") && m.to == pos("e4"))
        .collect();
    assert_eq!(variants.len(), 2);
}

#[test]
fn king_capture_is_legal_and_ends_game() {
    let mut game = Game::from_fen("k7/8/8/8/8/8/4q3/R3K3 w - - 0 1").unwrap();
    assert!(is_king_in_check(game.board(), Color::White));
    assert!(can_capture_king(game.board(), Color::White, None));
    propose(&mut game, "a1", "a8");
    assert_eq!(game.status(), GameStatus::KingCaptured { winner: Color::White });
}
