// Ficheiro: src/rules/legality.rs
// Descrição: Motor de legalidade: união dos conjuntos nativo e de poder,
// filtro de auto-xeque, ambiguidade, xeque e geração de lances completos.

use crate::core::*;
use crate::moves::king::{castle_candidates, CastleCandidate};
use crate::moves::pawn::PawnTarget;
use crate::moves::{attacks_for_kind, targets_for_kind};

use super::power::resolve_power;

/// Tipo de ambiguidade de um destino alcançável pelos dois conjuntos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ambiguity {
    /// Casa vazia alcançável pelos dois conjuntos.
    Plain,
    /// Um conjunto captura en passant, o outro só avança para a casa.
    EnPassant,
}

/// Escolha do jogador para um lance ambíguo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Native,
    Power,
}

/// Como uma peça chega a um destino: por cada conjunto e/ou por roque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reach {
    pub to: Position,
    pub native: Option<PawnTarget>,
    pub power: Option<PawnTarget>,
    pub castle: Option<CastleCandidate>,
}

impl Reach {
    fn new(to: Position) -> Self {
        Reach { to, native: None, power: None, castle: None }
    }

    /// Rotas possíveis, nativa primeiro. O roque conta como rota nativa.
    pub fn routes(&self) -> impl Iterator<Item = (Resolution, PawnTarget)> + '_ {
        let castle = self
            .castle
            .filter(|_| self.native.is_none())
            .map(|c| (Resolution::Native, PawnTarget { to: c.king_to, en_passant: false, double_step: false }));
        self.native
            .map(|t| (Resolution::Native, t))
            .into_iter()
            .chain(castle)
            .chain(self.power.map(|t| (Resolution::Power, t)))
    }

    pub fn target(&self, resolution: Resolution) -> Option<PawnTarget> {
        self.routes().find(|(r, _)| *r == resolution).map(|(_, t)| t)
    }
}

/// Todos os destinos de uma peça agrupados por casa.
/// Com `premove` a ocupação é ignorada e o roque não verifica casas atacadas.
pub fn reaches(board: &Board, from: Position, en_passant: Option<Position>, premove: bool) -> Vec<Reach> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut out: Vec<Reach> = Vec::with_capacity(16);
    let entry = |out: &mut Vec<Reach>, to: Position| -> usize {
        match out.iter().position(|r| r.to == to) {
            Some(i) => i,
            None => {
                out.push(Reach::new(to));
                out.len() - 1
            }
        }
    };

    for target in targets_for_kind(board, from, &piece, piece.kind, en_passant, premove) {
        let i = entry(&mut out, target.to);
        out[i].native = Some(target);
    }

    // Poder igual ao tipo não acrescenta rota própria
    if let Some(power) = piece.power.filter(|&p| p != piece.kind) {
        for target in targets_for_kind(board, from, &piece, power, en_passant, premove) {
            let i = entry(&mut out, target.to);
            out[i].power = Some(target);
        }
    }

    if piece.kind == PieceKind::King {
        for candidate in castle_candidates(board, from, &piece, premove) {
            if premove || castling_is_safe(board, from, piece.color, &candidate) {
                let i = entry(&mut out, candidate.king_to);
                out[i].castle = Some(candidate);
            }
        }
    }

    out
}

fn castling_is_safe(board: &Board, from: Position, color: Color, candidate: &CastleCandidate) -> bool {
    let enemy = !color;
    !is_square_attacked(board, from, enemy)
        && !is_square_attacked(board, candidate.king_crosses, enemy)
        && !is_square_attacked(board, candidate.king_to, enemy)
}

/// Destinos legais de uma peça: união dos dois conjuntos mais roque,
/// sem auto-xeque (a não ser com `allow_self_check`).
/// Lances que capturam o rei adversário nunca são filtrados.
pub fn valid_moves(board: &Board, pos: Position, en_passant: Option<Position>, allow_self_check: bool) -> Vec<Position> {
    let color = match board.color_at(pos) {
        Some(c) => c,
        None => return Vec::new(),
    };
    let all = reaches(board, pos, en_passant, false);
    if allow_self_check {
        return all.into_iter().map(|r| r.to).collect();
    }

    let mut scratch = *board;
    all.into_iter()
        .filter(|reach| {
            reach
                .routes()
                .any(|(_, target)| route_is_safe(&mut scratch, pos, target, color))
        })
        .map(|r| r.to)
        .collect()
}

/// Destinos de pré-lance: ocupação ignorada, sem filtro de xeque.
pub fn premove_targets(board: &Board, pos: Position) -> Vec<Position> {
    reaches(board, pos, None, true).into_iter().map(|r| r.to).collect()
}

/// Aplica a rota no tabuleiro de rascunho e verifica o próprio rei; desfaz sempre.
fn route_is_safe(scratch: &mut Board, from: Position, target: PawnTarget, color: Color) -> bool {
    if captures_king(scratch, from, target) {
        return true;
    }
    let victim = target.en_passant.then(|| Position::new(from.row, target.to.col));
    let displaced = scratch.displace(from, target.to, victim);
    let safe = !is_king_in_check(scratch, color);
    scratch.restore(displaced);
    safe
}

fn captures_king(board: &Board, from: Position, target: PawnTarget) -> bool {
    !target.en_passant
        && matches!(
            (board.get(from), board.get(target.to)),
            (Some(mover), Some(victim)) if victim.is_king && victim.color != mover.color
        )
}

/// Verdadeiro quando `to` só é alcançável pelo conjunto de poder.
pub fn is_power_move(board: &Board, from: Position, to: Position, en_passant: Option<Position>) -> bool {
    reaches(board, from, en_passant, false)
        .iter()
        .find(|r| r.to == to)
        .map_or(false, |r| r.power.is_some() && r.native.is_none() && r.castle.is_none())
}

/// Verdadeiro quando o lance precisa de desambiguação.
pub fn is_ambiguous_move(board: &Board, from: Position, to: Position, en_passant: Option<Position>) -> bool {
    ambiguity(board, from, to, en_passant).is_some()
}

/// Classifica a ambiguidade de um destino, se existir.
pub fn ambiguity(board: &Board, from: Position, to: Position, en_passant: Option<Position>) -> Option<Ambiguity> {
    let reach = reaches(board, from, en_passant, false).into_iter().find(|r| r.to == to)?;
    classify(board, &reach)
}

fn classify(board: &Board, reach: &Reach) -> Option<Ambiguity> {
    let (native, power) = (reach.native?, reach.power?);
    if !board.is_empty(reach.to) {
        return None;
    }
    if native.en_passant != power.en_passant {
        Some(Ambiguity::EnPassant)
    } else {
        Some(Ambiguity::Plain)
    }
}

/// Alguma peça de `attacker` ataca `square` (nativo + poder, peões só em diagonal)?
pub fn is_square_attacked(board: &Board, square: Position, attacker: Color) -> bool {
    board.pieces(attacker).any(|(from, piece)| {
        let native = attacks_for_kind(board, from, &piece, piece.kind).contains(&square);
        native
            || piece
                .power
                .filter(|&p| p != piece.kind)
                .map_or(false, |p| attacks_for_kind(board, from, &piece, p).contains(&square))
    })
}

/// O rei de `color` está atacado? Sem rei não há xeque.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.king_position(color) {
        Some(king) => is_square_attacked(board, king, !color),
        None => false,
    }
}

/// `attacker` tem algum lance (mesmo deixando o próprio rei em xeque) que caia no rei adversário?
pub fn can_capture_king(board: &Board, attacker: Color, en_passant: Option<Position>) -> bool {
    let target = match board.king_position(!attacker) {
        Some(k) => k,
        None => return false,
    };
    board
        .pieces(attacker)
        .any(|(from, _)| valid_moves(board, from, en_passant, true).contains(&target))
}

pub fn has_legal_moves(board: &Board, color: Color, en_passant: Option<Position>) -> bool {
    board
        .pieces(color)
        .any(|(from, _)| !valid_moves(board, from, en_passant, false).is_empty())
}

/// O lance termina em promoção? Um peão promove na última fila qualquer que seja
/// o conjunto usado; outra peça só promove quando lá chega com o poder de peão.
pub fn needs_promotion(piece: &Piece, to: Position, resolution: Resolution) -> bool {
    if to.row != piece.color.promotion_row() {
        return false;
    }
    let set = match resolution {
        Resolution::Native => Some(piece.kind),
        Resolution::Power => piece.power,
    };
    piece.kind == PieceKind::Pawn || set == Some(PieceKind::Pawn)
}

/// Rota padrão de um destino não ambíguo: nativa quando existir.
pub fn default_resolution(reach: &Reach) -> Resolution {
    if reach.native.is_some() || reach.castle.is_some() {
        Resolution::Native
    } else {
        Resolution::Power
    }
}

/// Constrói o registo completo do lance para a rota escolhida.
/// Devolve None quando a rota não existe ou falta a peça de promoção.
pub fn build_move(
    board: &Board,
    from: Position,
    reach: &Reach,
    resolution: Resolution,
    promotion: Option<PieceKind>,
) -> Option<Move> {
    let piece = board.get(from)?;
    let target = reach.target(resolution)?;
    let to = reach.to;

    let is_castling = resolution == Resolution::Native && reach.native.is_none() && reach.castle.is_some();
    let ambiguous = classify(board, reach).is_some();
    let is_power_move = resolution == Resolution::Power;

    let captured_piece = if target.en_passant {
        board.get(Position::new(from.row, to.col))
    } else {
        board.get(to).filter(|p| p.color != piece.color)
    };

    let promotion = if needs_promotion(&piece, to, resolution) {
        Some(promotion.filter(|p| PieceKind::PROMOTIONS.contains(p))?)
    } else {
        None
    };

    let via_kind = match resolution {
        Resolution::Native => piece.kind,
        Resolution::Power => piece.power?,
    };

    let after_power = resolve_power(
        piece.power,
        captured_piece.map(|p| p.original_kind),
        is_power_move,
        promotion.is_some(),
    );
    let is_force_power = ambiguous && is_power_move;
    let captured = captured_piece.map(|p| p.kind);

    Some(Move {
        from,
        to,
        piece: piece.kind,
        color: piece.color,
        captured,
        promotion,
        is_force_power,
        power_consumed: is_power_move && captured.is_none(),
        after_power,
        notation: notate(board, from, to, piece.kind, captured, promotion, is_force_power),
        is_castling,
        is_en_passant: target.en_passant,
        is_double_step: target.double_step,
        via_pawn: via_kind == PieceKind::Pawn,
    })
}

/// Todas as variantes (resolução × promoção) de um destino, sem verificar xeque.
pub fn expand_reach(board: &Board, from: Position, reach: &Reach, out: &mut Vec<Move>) {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return,
    };
    let resolutions: &[Resolution] = if classify(board, reach).is_some() {
        &[Resolution::Native, Resolution::Power]
    } else {
        match default_resolution(reach) {
            Resolution::Native => &[Resolution::Native],
            Resolution::Power => &[Resolution::Power],
        }
    };

    for &resolution in resolutions {
        if needs_promotion(&piece, reach.to, resolution) {
            for promo in PieceKind::PROMOTIONS {
                out.extend(build_move(board, from, reach, resolution, Some(promo)));
            }
        } else {
            out.extend(build_move(board, from, reach, resolution, None));
        }
    }
}

/// Lances pseudo-legais de uma cor (roque já filtrado por casas atacadas).
pub fn generate_pseudo_moves(board: &Board, color: Color, en_passant: Option<Position>) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, _) in board.pieces(color) {
        for reach in reaches(board, from, en_passant, false) {
            expand_reach(board, from, &reach, &mut moves);
        }
    }
    moves
}

/// O lance deixa o próprio rei fora de xeque? Capturar o rei é sempre permitido.
pub fn is_move_safe(scratch: &mut Board, mv: &Move) -> bool {
    if mv.captured == Some(PieceKind::King) && !mv.is_en_passant {
        return true;
    }
    let displaced = scratch.displace(mv.from, mv.to, mv.en_passant_victim());
    let safe = !is_king_in_check(scratch, mv.color);
    scratch.restore(displaced);
    safe
}

/// Lances legais completos: destinos ambíguos geram as duas resoluções,
/// promoções geram um lance por peça.
pub fn generate_legal_moves(board: &Board, color: Color, en_passant: Option<Position>) -> Vec<Move> {
    let mut scratch = *board;
    generate_pseudo_moves(board, color, en_passant)
        .into_iter()
        .filter(|mv| is_move_safe(&mut scratch, mv))
        .collect()
}
