use fxhash::FxHashMap as HashMap;

use crate::core::MoveKey;

/// Tipo de limite guardado numa entrada
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound,
    UpperBound,
}

/// Entry para Transposition Table de busca Alpha-Beta
#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub score: i32,
    pub flag: TTFlag,
    pub depth: u8,
    pub best_move: Option<MoveKey>,
}

/// Transposition Table: cache por hash Zobrist (FxHash, a chave já é aleatória)
pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>, // zobrist_hash -> TTEntry
    hits: u64,
    misses: u64,
    max_capacity: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_capacity(1 << 20)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(16);
        TranspositionTable {
            table: HashMap::with_capacity_and_hasher(capacity.min(1 << 16), Default::default()),
            hits: 0,
            misses: 0,
            max_capacity: capacity,
        }
    }

    /// Busca entrada na TT; devolve um score utilizável para esta janela
    pub fn probe(&mut self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        if let Some(&entry) = self.table.get(&hash) {
            self.hits += 1;

            // Só usa se a profundidade for igual ou maior
            if entry.depth >= depth {
                match entry.flag {
                    TTFlag::Exact => return Some(entry.score),
                    TTFlag::UpperBound if entry.score <= alpha => return Some(alpha),
                    TTFlag::LowerBound if entry.score >= beta => return Some(beta),
                    _ => {}
                }
            }
            None
        } else {
            self.misses += 1;
            None
        }
    }

    /// Armazena entrada na TT (substitui só com profundidade igual ou maior)
    pub fn store(&mut self, hash: u64, depth: u8, score: i32, flag: TTFlag, best_move: Option<MoveKey>) {
        if self.table.len() >= (self.max_capacity * 9) / 10 {
            self.clear_old_entries();
        }

        let entry = TTEntry { score, flag, depth, best_move };

        match self.table.get(&hash) {
            Some(existing) if depth < existing.depth => {}
            _ => {
                self.table.insert(hash, entry);
            }
        }
    }

    /// Melhor lance guardado para ordenação
    pub fn get_best_move(&self, hash: u64) -> Option<MoveKey> {
        self.table.get(&hash).and_then(|entry| entry.best_move)
    }

    /// Remove o quarto de entradas mais rasas
    fn clear_old_entries(&mut self) {
        let mut entries_by_depth: Vec<(u64, u8)> = self
            .table
            .iter()
            .map(|(&hash, entry)| (hash, entry.depth))
            .collect();
        entries_by_depth.sort_by_key(|(_, depth)| *depth);

        let remove_count = (self.table.len() / 4).max(1);
        for (hash, _) in entries_by_depth.into_iter().take(remove_count) {
            self.table.remove(&hash);
        }
    }

    /// Limpa toda a TT
    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_capacity
    }

    /// Hashfull: percentual de ocupação da TT (0-1000)
    pub fn hashfull(&self) -> u64 {
        (self.size() as u64 * 1000) / self.capacity() as u64
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
