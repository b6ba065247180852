use crate::core::*;

pub const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE: i32 = 100_000;
const PROMOTION_BASE: i32 = 50_000;
const KILLER_SCORE: i32 = 9_000;

/// Dois killer moves por profundidade
pub struct KillerTable {
    slots: Vec<[Option<MoveKey>; 2]>,
}

impl KillerTable {
    pub fn new(max_depth: usize) -> Self {
        KillerTable { slots: vec![[None; 2]; max_depth + 1] }
    }

    /// Guarda um lance quieto que provocou corte
    pub fn store(&mut self, depth: u8, key: MoveKey) {
        if let Some(slot) = self.slots.get_mut(depth as usize) {
            if slot[0] != Some(key) {
                slot[1] = slot[0];
                slot[0] = Some(key);
            }
        }
    }

    pub fn is_killer(&self, depth: u8, key: MoveKey) -> bool {
        self.slots
            .get(depth as usize)
            .map_or(false, |slot| slot.contains(&Some(key)))
    }

    /// Número de profundidades com espaço
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = [None; 2]);
    }
}

/// Contexto de ordenação de um nó
pub struct OrderingContext<'a> {
    pub tt_move: Option<MoveKey>,
    pub killers: &'a KillerTable,
    pub depth: u8,
    pub power_move_bonus: i32,
}

/// Ordena: lance da TT, capturas MVV-LVA, promoções, killers, bónus de poder
pub fn order_moves(moves: &mut [Move], ctx: &OrderingContext<'_>) {
    moves.sort_by_cached_key(|mv| std::cmp::Reverse(score_move(mv, ctx)));
}

/// Pontua movimento para ordenação (quanto maior, melhor)
pub fn score_move(mv: &Move, ctx: &OrderingContext<'_>) -> i32 {
    let key = mv.key();
    if ctx.tt_move == Some(key) {
        return TT_MOVE_SCORE;
    }

    let mut score = 0;
    if let Some(victim) = mv.captured {
        score += CAPTURE_BASE + mvv_lva_score(victim, mv.piece);
    }
    if let Some(promotion) = mv.promotion {
        score += PROMOTION_BASE + promotion.value();
    }
    if score == 0 && ctx.killers.is_killer(ctx.depth, key) {
        score += KILLER_SCORE;
    }
    if mv.power_consumed || mv.is_force_power {
        score += ctx.power_move_bonus;
    }
    if mv.is_castling {
        score += 200;
    }
    score
}

/// MVV-LVA: vítima mais valiosa primeiro, atacante mais barato primeiro
#[inline]
pub fn mvv_lva_score(victim: PieceKind, attacker: PieceKind) -> i32 {
    const MVV_LVA: [[i32; 6]; 6] = [
        // Vítima: Pawn, Knight, Bishop, Rook, Queen, King
        [105, 205, 305, 405, 505, 5005], // Atacante: Pawn
        [104, 204, 304, 404, 504, 5004], // Atacante: Knight
        [103, 203, 303, 403, 503, 5003], // Atacante: Bishop
        [102, 202, 302, 402, 502, 5002], // Atacante: Rook
        [101, 201, 301, 401, 501, 5001], // Atacante: Queen
        [100, 200, 300, 400, 500, 5000], // Atacante: King
    ];

    MVV_LVA[attacker.index()][victim.index()]
}
