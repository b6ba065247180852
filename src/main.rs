// Motor de Xadrez de Poder - demonstração das regras e da busca
use pelanca_power::engine::perft;
use pelanca_power::rules::{Game, GameStatus};
use pelanca_power::search::*;
use pelanca_power::*;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== PERFT ===\n");

    // Posições de teste
    let test_positions = [
        ("Posição inicial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("Peças com poder", "r3k2r/pp3ppp/2n5/3pP3/2N(q)5/5B(r)2/PP3PPP/R3K2R w KQkq d6 0 1"),
        ("Final de jogo", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
    ];

    for (name, fen) in test_positions.iter() {
        test_position(name, fen);
        println!();
    }

    println!("\n=== PARTIDA MOTOR CONTRA MOTOR ===");
    self_play(12, 3);
}

fn test_position(name: &str, fen: &str) {
    println!("{}", name);
    println!("FEN: {}", fen);

    let setup = match Board::from_fen(fen) {
        Ok(setup) => setup,
        Err(e) => {
            println!("Erro ao carregar FEN: {}", e);
            return;
        }
    };
    println!("Chave: {}", position_key(&setup.board, setup.turn, setup.en_passant));

    for depth in 1..=3 {
        let start = Instant::now();
        let nodes = perft(&setup.board, setup.turn, setup.en_passant, depth);
        println!("  perft({}) = {:>8}  ({:.2?})", depth, nodes, start.elapsed());
    }

    let mut engine = Engine::new(SearchConfig::default());
    let outcome = engine.search(&setup.board, setup.turn, setup.en_passant, 4, |mv, depth| {
        println!("  depth {} -> {}", depth, mv.notation);
    });
    if let Some(mv) = outcome.best_move {
        println!(
            "  Melhor: {} (score {}, nós {}, {} nps, TT hits {}, hashfull {})",
            mv.notation,
            describe_score(outcome.score),
            outcome.stats.nodes,
            outcome.stats.nps(),
            outcome.stats.tt_hits,
            outcome.stats.hashfull
        );
    }
}

fn self_play(max_plies: usize, depth: u8) {
    let mut game = Game::new();
    let mut engine = Engine::new(SearchConfig { max_depth: depth, ..SearchConfig::default() });

    for ply in 0..max_plies {
        if game.status() != GameStatus::Ongoing {
            break;
        }
        let outcome = engine.search(game.board(), game.turn(), game.en_passant(), depth, |_, _| {});
        let Some(mv) = outcome.best_move else { break };
        if let Err(e) = game.play(&mv) {
            println!("Lance rejeitado {}: {}", mv, e);
            break;
        }
        println!("{:>3}. {}", ply + 1, mv.notation);
    }

    println!("Estado final: {:?}", game.status());
    println!("Chave: {}", game.position_key());
}

/// Scores acima do limiar são capturas de rei ou mates forçados
fn describe_score(score: i32) -> String {
    if score >= MATE_THRESHOLD {
        "ganha o rei".to_string()
    } else if score <= -MATE_THRESHOLD {
        "perde o rei".to_string()
    } else {
        score.to_string()
    }
}
