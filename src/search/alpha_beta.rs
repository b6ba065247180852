use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::*;
use crate::engine::{TTFlag, TranspositionTable};
use crate::rules::is_king_in_check;

use super::evaluation::{INF, MATE};
use super::move_ordering::{order_moves, KillerTable, OrderingContext};
use super::movegen::generate_moves;
use super::mutable_board::MutableBoard;

/// Parâmetros da busca
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub tt_capacity: usize,
    pub quiescence_depth: u8,
    pub power_move_bonus: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 4,
            tt_capacity: 1 << 20,
            quiescence_depth: 6,
            power_move_bonus: 50,
        }
    }
}

/// Estatísticas da última busca
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    pub nodes: u64,
    pub qnodes: u64,
    pub tt_hits: u64,
    pub tt_misses: u64,
    pub hashfull: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn nps(&self) -> u64 {
        let millis = self.elapsed.as_millis() as u64;
        if millis == 0 { 0 } else { (self.nodes + self.qnodes) * 1000 / millis }
    }
}

/// Resultado da busca iterativa
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Última profundidade completa
    pub depth: u8,
    pub stopped: bool,
    pub stats: SearchStats,
}

/// Motor Alpha-Beta: TT, killers e flag de paragem pertencem à instância
pub struct Engine {
    pub(super) config: SearchConfig,
    pub(super) tt: TranspositionTable,
    killers: KillerTable,
    stop: Arc<AtomicBool>,
    pub(super) nodes: u64,
    pub(super) qnodes: u64,
}

impl Engine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_stop(config, Arc::new(AtomicBool::new(false)))
    }

    pub fn with_stop(config: SearchConfig, stop: Arc<AtomicBool>) -> Self {
        Engine {
            tt: TranspositionTable::with_capacity(config.tt_capacity),
            killers: KillerTable::new(usize::from(config.max_depth).max(1) + 1),
            config,
            stop,
            nodes: 0,
            qnodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Flag partilhada: outra thread pode pará-la com `store(true)`
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Rearma a flag antes de uma nova busca
    pub fn reset_stop(&self) {
        self.stop.store(false, Ordering::SeqCst);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Nova partida: esquece TT e killers
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Aprofundamento iterativo de 1 até `max_depth`.
    /// `on_depth` recebe o melhor lance de cada profundidade completa;
    /// uma profundidade interrompida é descartada.
    pub fn search<F>(
        &mut self,
        board: &Board,
        turn: Color,
        en_passant: Option<Position>,
        max_depth: u8,
        mut on_depth: F,
    ) -> SearchOutcome
    where
        F: FnMut(&Move, u8),
    {
        let start = Instant::now();
        self.nodes = 0;
        self.qnodes = 0;
        let hits_before = self.tt.hits();
        let misses_before = self.tt.misses();
        if self.killers.len() <= usize::from(max_depth) {
            self.killers = KillerTable::new(usize::from(max_depth) + 1);
        }

        let mut mb = MutableBoard::new(*board, turn, en_passant);
        let mut best: Option<(Move, i32)> = None;
        let mut completed = 0;

        for depth in 1..=max_depth.max(1) {
            if self.should_stop() {
                break;
            }
            match self.search_root(&mut mb, depth) {
                Some((mv, score)) => {
                    debug!(depth, score, best = %mv, nodes = self.nodes, "depth completed");
                    best = Some((mv, score));
                    completed = depth;
                }
                None => break,
            }

            thread::yield_now();
            if let Some((mv, _)) = &best {
                on_depth(mv, completed);
            }
            if self.should_stop() {
                break;
            }
        }

        let stats = SearchStats {
            nodes: self.nodes,
            qnodes: self.qnodes,
            tt_hits: self.tt.hits() - hits_before,
            tt_misses: self.tt.misses() - misses_before,
            hashfull: self.tt.hashfull(),
            elapsed: start.elapsed(),
        };

        SearchOutcome {
            score: best.as_ref().map_or(0, |(_, s)| *s),
            best_move: best.map(|(mv, _)| mv),
            depth: completed,
            stopped: self.should_stop(),
            stats,
        }
    }

    /// Raiz: devolve None se a profundidade foi interrompida ou não há lances.
    fn search_root(&mut self, mb: &mut MutableBoard, depth: u8) -> Option<(Move, i32)> {
        let mut moves = generate_moves(mb);
        if moves.is_empty() {
            return None;
        }
        let ctx = OrderingContext {
            tt_move: self.tt.get_best_move(mb.hash),
            killers: &self.killers,
            depth,
            power_move_bonus: self.config.power_move_bonus,
        };
        order_moves(&mut moves, &ctx);

        let mut alpha = -INF;
        let beta = INF;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let undo = mb.make_move(&mv);
            let score = -self.negamax(mb, depth - 1, -beta, -alpha);
            mb.unmake_move(undo);

            if self.should_stop() {
                return None;
            }
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        if let Some((mv, score)) = &best {
            self.tt.store(mb.hash, depth, *score, TTFlag::Exact, Some(mv.key()));
        }
        best
    }

    /// Negamax com poda alpha-beta e TT
    fn negamax(&mut self, mb: &mut MutableBoard, depth: u8, mut alpha: i32, beta: i32) -> i32 {
        if self.should_stop() {
            return 0;
        }
        self.nodes += 1;

        if mb.board.king_position(mb.turn).is_none() {
            return -(MATE + i32::from(depth));
        }

        let original_alpha = alpha;
        if let Some(score) = self.tt.probe(mb.hash, depth, alpha, beta) {
            return score;
        }

        if depth == 0 {
            return self.quiescence(mb, alpha, beta, self.config.quiescence_depth);
        }

        let mut moves = generate_moves(mb);
        if moves.is_empty() {
            return if is_king_in_check(&mb.board, mb.turn) {
                -(MATE + i32::from(depth))
            } else {
                0
            };
        }

        let ctx = OrderingContext {
            tt_move: self.tt.get_best_move(mb.hash),
            killers: &self.killers,
            depth,
            power_move_bonus: self.config.power_move_bonus,
        };
        order_moves(&mut moves, &ctx);

        let mut best_score = -INF;
        let mut best_move = None;

        for mv in &moves {
            let undo = mb.make_move(mv);
            let score = -self.negamax(mb, depth - 1, -beta, -alpha);
            mb.unmake_move(undo);

            if self.should_stop() {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv.key());
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                if !mv.is_capture() {
                    self.killers.store(depth, mv.key());
                }
                break;
            }
        }

        let flag = if best_score <= original_alpha {
            TTFlag::UpperBound
        } else if best_score >= beta {
            TTFlag::LowerBound
        } else {
            TTFlag::Exact
        };
        self.tt.store(mb.hash, depth, best_score, flag, best_move);

        best_score
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
