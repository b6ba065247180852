// Interface de texto estilo UCI para o motor de xadrez de poder

use std::io::{self, BufRead};
use std::thread;

use crossbeam::channel;
use crossbeam::select;
use tracing_subscriber::EnvFilter;

use pelanca_power::engine::perft_divide;
use pelanca_power::rules::Game;
use pelanca_power::search::*;
use pelanca_power::*;

struct Driver {
    game: Game,
    service: SearchService,
    config: SearchConfig,
    current: Option<u64>,
    last_update: Option<Move>,
}

impl Driver {
    fn new(config: SearchConfig) -> io::Result<Self> {
        Ok(Driver {
            game: Game::new(),
            service: SearchService::spawn(config.clone())?,
            config,
            current: None,
            last_update: None,
        })
    }

    /// Devolve false em `quit`
    fn handle_line(&mut self, input: &str) -> bool {
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            return true;
        }

        match parts[0] {
            "uci" => self.handle_uci(),
            "isready" => println!("readyok"),
            "ucinewgame" => self.game = Game::new(),
            "position" => self.handle_position(&parts),
            "go" => self.handle_go(&parts),
            "stop" => self.service.stop(),
            "d" => self.handle_display(),
            "perft" => self.handle_perft(&parts),
            "quit" => return false,
            _ => {} // Ignora comandos desconhecidos
        }
        true
    }

    fn handle_uci(&self) {
        println!("id name Pelanca Power");
        println!("id author Pedro Contessoto");
        println!("option name Hash type spin default {} min 1 max 67108864", self.config.tt_capacity);
        println!("uciok");
    }

    fn handle_position(&mut self, parts: &[&str]) {
        if parts.len() < 2 {
            return;
        }

        let mut idx = 1;
        match parts[idx] {
            "startpos" => {
                self.game = Game::new();
                idx += 1;
            }
            "fen" => {
                idx += 1;
                let mut fen_parts = Vec::new();
                // Coleta partes do FEN até "moves" ou fim
                while idx < parts.len() && parts[idx] != "moves" {
                    fen_parts.push(parts[idx]);
                    idx += 1;
                }
                match Game::from_fen(&fen_parts.join(" ")) {
                    Ok(game) => self.game = game,
                    Err(e) => {
                        println!("info string Invalid FEN: {}", e);
                        return;
                    }
                }
            }
            _ => return,
        }

        if idx < parts.len() && parts[idx] == "moves" {
            for text in &parts[idx + 1..] {
                let found = self.game.legal_moves().into_iter().find(|m| m.to_string() == *text);
                let played = match found {
                    Some(mv) => self.game.play(&mv).map_err(|e| e.to_string()),
                    None => Err("not a legal move".to_string()),
                };
                if let Err(e) = played {
                    println!("info string Invalid move {}: {}", text, e);
                    return;
                }
            }
        }
    }

    fn handle_go(&mut self, parts: &[&str]) {
        let mut depth = self.config.max_depth;
        let mut idx = 1;
        while idx < parts.len() {
            match parts[idx] {
                "depth" => {
                    if let Some(d) = parts.get(idx + 1).and_then(|s| s.parse::<u8>().ok()) {
                        depth = d.max(1);
                    }
                    idx += 2;
                }
                "infinite" => {
                    depth = 64;
                    idx += 1;
                }
                _ => idx += 1,
            }
        }

        self.last_update = None;
        match self.service.start(*self.game.board(), self.game.turn(), self.game.en_passant(), depth) {
            Ok(id) => self.current = Some(id),
            Err(e) => println!("info string {}", e),
        }
    }

    fn handle_display(&self) {
        println!("info string key {}", self.game.position_key());
        println!("info string status {:?}", self.game.status());
        let moves: Vec<String> = self.game.legal_moves().iter().map(|m| m.notation.clone()).collect();
        println!("info string moves {}", moves.join(" "));
    }

    fn handle_perft(&self, parts: &[&str]) {
        let depth = parts.get(1).and_then(|s| s.parse::<u8>().ok()).unwrap_or(1);
        let divided = perft_divide(self.game.board(), self.game.turn(), self.game.en_passant(), depth);
        let mut total = 0;
        for (mv, nodes) in &divided {
            println!("{}: {}", mv, nodes);
            total += nodes;
        }
        println!("\nNodes searched: {}", total);
    }

    fn handle_response(&mut self, response: Response) {
        if self.current != Some(response.request_id()) {
            return;
        }
        match response {
            Response::Update { mv, depth, .. } => {
                println!("info depth {} pv {}", depth, mv);
                self.last_update = Some(mv);
            }
            Response::Done { mv, .. } => {
                println!("bestmove {}", mv);
                self.current = None;
            }
            Response::Stopped { .. } => {
                match self.last_update.take() {
                    Some(mv) => println!("bestmove {}", mv),
                    None => println!("bestmove 0000"),
                }
                self.current = None;
            }
            Response::Error { error, .. } => {
                println!("info string {}", error);
                println!("bestmove 0000");
                self.current = None;
            }
        }
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut driver = Driver::new(SearchConfig::default())?;
    let responses = driver.service.responses();

    let (line_tx, line_rx) = channel::unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        select! {
            recv(line_rx) -> line => match line {
                Ok(line) => {
                    if !driver.handle_line(line.trim()) {
                        break;
                    }
                }
                Err(_) => break,
            },
            recv(responses) -> response => match response {
                Ok(response) => driver.handle_response(response),
                Err(_) => break,
            },
        }
    }

    Ok(())
}
