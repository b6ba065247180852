// Ficheiro: src/rules/game.rs
// Descrição: Estado de uma partida: vez, relógio dos 50 lances, histórico de
// posições e a máquina de estados proposta -> desambiguação/promoção -> lance final.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::core::*;

use super::execute::{en_passant_after, execute_move};
use super::legality::*;

/// Resultado da partida depois de cada meio-lance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    DrawThreefold,
    DrawFiftyMove,
    KingCaptured { winner: Color },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// Resposta a uma proposta de lance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Finalized(Move),
    NeedsDisambiguation(Ambiguity),
    NeedsPromotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Disambiguation,
    Promotion,
}

/// Lance suspenso à espera de uma escolha do jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub from: Position,
    pub to: Position,
    resolution: Option<Resolution>,
    awaiting: Awaiting,
}

/// Partida completa. Só avança (vez, relógio, histórico) quando um lance é finalizado.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    en_passant: Option<Position>,
    halfmove_clock: u16,
    history: HashMap<String, u32>,
    moves: Vec<Move>,
    status: GameStatus,
    pending: Option<PendingMove>,
}

impl Game {
    pub fn new() -> Self {
        Self::from_setup(FenSetup {
            board: Board::new(),
            turn: Color::White,
            en_passant: None,
            halfmove_clock: 0,
        })
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_setup(Board::from_fen(fen)?))
    }

    pub fn from_setup(setup: FenSetup) -> Self {
        let mut history = HashMap::new();
        history.insert(position_key(&setup.board, setup.turn, setup.en_passant), 1);
        let mut game = Game {
            board: setup.board,
            turn: setup.turn,
            en_passant: setup.en_passant,
            halfmove_clock: setup.halfmove_clock,
            history,
            moves: Vec::new(),
            status: GameStatus::Ongoing,
            pending: None,
        };
        game.status = game.evaluate_status();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn pending(&self) -> Option<PendingMove> {
        self.pending
    }

    pub fn position_key(&self) -> String {
        position_key(&self.board, self.turn, self.en_passant)
    }

    /// Quantas vezes uma chave de posição já ocorreu.
    pub fn repetitions(&self, key: &str) -> u32 {
        self.history.get(key).copied().unwrap_or(0)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_legal_moves(&self.board, self.turn, self.en_passant)
    }

    /// Primeira fase: origem e destino escolhidos pelo jogador.
    pub fn propose(&mut self, from: Position, to: Position) -> GameResult<MoveOutcome> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::MovePending("a choice"));
        }
        if self.board.color_at(from) != Some(self.turn) {
            return Err(GameError::NotYourPiece(from));
        }
        if !valid_moves(&self.board, from, self.en_passant, false).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        if let Some(kind) = ambiguity(&self.board, from, to, self.en_passant) {
            debug!(%from, %to, ?kind, "move needs disambiguation");
            self.pending = Some(PendingMove { from, to, resolution: None, awaiting: Awaiting::Disambiguation });
            return Ok(MoveOutcome::NeedsDisambiguation(kind));
        }

        self.continue_with(from, to, None)
    }

    /// Segunda fase de um lance ambíguo.
    pub fn resolve_ambiguity(&mut self, resolution: Resolution) -> GameResult<MoveOutcome> {
        match self.pending {
            Some(p) if p.awaiting == Awaiting::Disambiguation => {
                self.pending = None;
                self.continue_with(p.from, p.to, Some(resolution))
            }
            _ => Err(GameError::NothingPending("disambiguation")),
        }
    }

    /// Escolha da peça de promoção.
    pub fn choose_promotion(&mut self, kind: PieceKind) -> GameResult<MoveOutcome> {
        let pending = match self.pending {
            Some(p) if p.awaiting == Awaiting::Promotion => p,
            _ => return Err(GameError::NothingPending("promotion")),
        };
        if !PieceKind::PROMOTIONS.contains(&kind) {
            return Err(GameError::InvalidPromotion);
        }
        self.pending = None;
        let resolution = pending.resolution.unwrap_or(Resolution::Native);
        let mv = self.build(pending.from, pending.to, resolution, Some(kind))?;
        self.finalize(mv)
    }

    /// Abandona o lance suspenso; nada do estado da partida muda.
    pub fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            debug!(from = %p.from, to = %p.to, "pending move cancelled");
        }
    }

    /// Joga um lance já completo (por exemplo, vindo da busca), se for legal.
    pub fn play(&mut self, mv: &Move) -> GameResult<()> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            return Err(GameError::MovePending("a choice"));
        }
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|m| m.key() == mv.key())
            .ok_or(GameError::IllegalMove { from: mv.from, to: mv.to })?;
        self.finalize(legal).map(|_| ())
    }

    fn continue_with(&mut self, from: Position, to: Position, resolution: Option<Resolution>) -> GameResult<MoveOutcome> {
        let reach = self.reach(from, to)?;
        let resolution = resolution.unwrap_or_else(|| default_resolution(&reach));
        let piece = self.board.get(from).ok_or(GameError::NotYourPiece(from))?;

        if reach.target(resolution).is_none() {
            return Err(GameError::IllegalMove { from, to });
        }
        if needs_promotion(&piece, to, resolution) {
            self.pending = Some(PendingMove { from, to, resolution: Some(resolution), awaiting: Awaiting::Promotion });
            return Ok(MoveOutcome::NeedsPromotion);
        }

        let mv = self.build(from, to, resolution, None)?;
        self.finalize(mv)
    }

    fn reach(&self, from: Position, to: Position) -> GameResult<Reach> {
        reaches(&self.board, from, self.en_passant, false)
            .into_iter()
            .find(|r| r.to == to)
            .ok_or(GameError::IllegalMove { from, to })
    }

    fn build(&self, from: Position, to: Position, resolution: Resolution, promotion: Option<PieceKind>) -> GameResult<Move> {
        let reach = self.reach(from, to)?;
        let mv = build_move(&self.board, from, &reach, resolution, promotion)
            .ok_or(GameError::IllegalMove { from, to })?;
        // A rota escolhida pode ser a única que deixa o rei em xeque
        let mut scratch = self.board;
        if !is_move_safe(&mut scratch, &mv) {
            return Err(GameError::IllegalMove { from, to });
        }
        Ok(mv)
    }

    fn finalize(&mut self, mv: Move) -> GameResult<MoveOutcome> {
        self.board = execute_move(&self.board, &mv);
        self.en_passant = en_passant_after(&mv);
        // Lance de peão (com qualquer conjunto) ou com o poder de peão zera o relógio
        self.halfmove_clock = if mv.is_capture() || mv.piece == PieceKind::Pawn || mv.via_pawn {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        self.turn = !self.turn;
        *self.history.entry(self.position_key()).or_insert(0) += 1;

        debug!(notation = %mv.notation, clock = self.halfmove_clock, "move finalized");
        self.moves.push(mv.clone());

        let status = self.evaluate_status();
        if status != self.status {
            info!(?status, "game status changed");
        }
        self.status = status;
        Ok(MoveOutcome::Finalized(mv))
    }

    /// Ordem: rei capturado, 50 lances, repetição tripla, mate/afogamento.
    fn evaluate_status(&self) -> GameStatus {
        for color in [Color::White, Color::Black] {
            if self.board.king_position(color).is_none() {
                return GameStatus::KingCaptured { winner: !color };
            }
        }
        if self.halfmove_clock >= 100 {
            return GameStatus::DrawFiftyMove;
        }
        if self.repetitions(&self.position_key()) >= 3 {
            return GameStatus::DrawThreefold;
        }
        if !has_legal_moves(&self.board, self.turn, self.en_passant)
            && !can_capture_king(&self.board, self.turn, self.en_passant)
        {
            return if is_king_in_check(&self.board, self.turn) {
                GameStatus::Checkmate { winner: !self.turn }
            } else {
                GameStatus::Stalemate
            };
        }
        GameStatus::Ongoing
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
        game.propose(pos(from), pos(to)).unwrap()
    }

    #[test]
    fn test_simple_move_finalizes_and_flips_turn() {
        let mut game = Game::new();
        let outcome = play(&mut game, "e2", "e4");
        assert!(matches!(outcome, MoveOutcome::Finalized(ref m) if m.notation == "e2-e4"));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.en_passant(), Some(pos("e3")));
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn test_wrong_side_and_illegal_targets() {
        let mut game = Game::new();
        assert_eq!(game.propose(pos("e7"), pos("e5")), Err(GameError::NotYourPiece(pos("e7"))));
        assert_eq!(
            game.propose(pos("e2"), pos("e5")),
            Err(GameError::IllegalMove { from: pos("e2"), to: pos("e5") })
        );
    }

    #[test]
    fn test_disambiguation_flow() {
        let mut game = Game::from_fen("4k3/8/8/8/3R(k)4/8/8/K7 w - -").unwrap();
        let before = game.position_key();
        assert_eq!(play(&mut game, "d4", "d5"), MoveOutcome::NeedsDisambiguation(Ambiguity::Plain));
        // Nada avança enquanto o lance está suspenso
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.position_key(), before);
        assert!(game.propose(pos("a1"), pos("a2")).is_err());

        let outcome = game.resolve_ambiguity(Resolution::Power).unwrap();
        let MoveOutcome::Finalized(mv) = outcome else { panic!("expected a final move") };
        assert!(mv.is_force_power);
        assert!(mv.notation.ends_with('*'));
        assert_eq!(game.board().get(pos("d5")).unwrap().power, None);
    }

    #[test]
    fn test_cancel_pending_restores_idle_state() {
        let mut game = Game::from_fen("4k3/8/8/8/3R(k)4/8/8/K7 w - -").unwrap();
        play(&mut game, "d4", "d5");
        game.cancel_pending();
        assert!(game.pending().is_none());
        assert!(game.resolve_ambiguity(Resolution::Native).is_err());
        assert!(matches!(play(&mut game, "a1", "a2"), MoveOutcome::Finalized(_)));
    }

    #[test]
    fn test_promotion_flow() {
        let mut game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(play(&mut game, "a7", "a8"), MoveOutcome::NeedsPromotion);
        assert_eq!(game.choose_promotion(PieceKind::King), Err(GameError::InvalidPromotion));
        let outcome = game.choose_promotion(PieceKind::Queen).unwrap();
        assert!(matches!(outcome, MoveOutcome::Finalized(ref m) if m.promotion == Some(PieceKind::Queen)));
        assert_eq!(game.board().get(pos("a8")).unwrap().kind, PieceKind::Queen);
    }

    #[test]
    fn test_back_rank_mate() {
        let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - -").unwrap();
        play(&mut game, "a1", "a8");
        assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
        assert_eq!(game.propose(pos("g8"), pos("h8")), Err(GameError::GameOver));
    }

    #[test]
    fn test_stalemate() {
        let mut game = Game::from_fen("k7/8/1Q6/8/8/8/8/7K w - -").unwrap();
        play(&mut game, "h1", "g1");
        // a7, b7 e b8 controladas pela dama; o rei preto não está em xeque
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_pawn_promotes_when_sliding_with_rook_power() {
        let mut game = Game::from_fen("7k/8/8/P(r)7/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(is_power_move(game.board(), pos("a5"), pos("a8"), None));
        assert_eq!(play(&mut game, "a5", "a8"), MoveOutcome::NeedsPromotion);

        let MoveOutcome::Finalized(mv) = game.choose_promotion(PieceKind::Queen).unwrap() else {
            panic!("expected a final move")
        };
        assert!(mv.power_consumed);
        let queen = game.board().get(pos("a8")).unwrap();
        assert_eq!((queen.kind, queen.original_kind, queen.power), (PieceKind::Queen, PieceKind::Queen, None));
        assert!(!valid_moves(game.board(), pos("a8"), None, false).is_empty());
    }

    #[test]
    fn test_native_promotion_keeps_non_pawn_power() {
        let mut game = Game::from_fen("7k/P(n)7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(play(&mut game, "a7", "a8"), MoveOutcome::NeedsPromotion);
        game.choose_promotion(PieceKind::Rook).unwrap();
        let rook = game.board().get(pos("a8")).unwrap();
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.power, Some(PieceKind::Knight));
    }

    #[test]
    fn test_promotion_with_pawn_power_drops_power() {
        let mut game = Game::from_fen("7k/1N(p)6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(play(&mut game, "b7", "b8"), MoveOutcome::NeedsPromotion);
        game.choose_promotion(PieceKind::Bishop).unwrap();
        let bishop = game.board().get(pos("b8")).unwrap();
        assert_eq!((bishop.kind, bishop.power), (PieceKind::Bishop, None));
    }

    #[test]
    fn test_pawn_move_with_power_resets_clock() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/P(r)7/4K3 w - - 40 1").unwrap();
        play(&mut game, "a2", "b2");
        assert_eq!(game.halfmove_clock(), 0);
        play(&mut game, "e8", "d8");
        assert_eq!(game.halfmove_clock(), 1);
    }

    #[test]
    fn test_king_capture_ends_game() {
        let mut game = Game::from_fen("k7/8/8/8/8/8/4q3/R3K3 w - -").unwrap();
        play(&mut game, "a1", "a8");
        assert_eq!(game.status(), GameStatus::KingCaptured { winner: Color::White });
    }
}
