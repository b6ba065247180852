// Ficheiro: src/rules/power.rs
// Descrição: Regras de transferência e consumo do poder.

use crate::types::PieceKind;

/// Poder da peça depois de um lance.
///
/// * captura: o poder passa a ser o tipo original da peça capturada
///   (na promoção, capturar um peão não dá poder);
/// * sem captura: mantém-se, exceto num lance de poder, que o gasta;
/// * promoção sem captura: um poder de peão também se perde.
pub fn resolve_power(
    before: Option<PieceKind>,
    captured: Option<PieceKind>,
    is_power_move: bool,
    promoted: bool,
) -> Option<PieceKind> {
    match (captured, promoted) {
        (Some(PieceKind::Pawn), true) => None,
        (Some(kind), _) => Some(kind),
        (None, true) if before == Some(PieceKind::Pawn) || is_power_move => None,
        (None, _) if is_power_move => None,
        (None, _) => before,
    }
}
