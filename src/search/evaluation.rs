use crate::core::*;

/// Score de mate; mates mais cedo valem mais (`MATE + profundidade restante`)
pub const MATE: i32 = 100_000;
pub const INF: i32 = 1_000_000;
pub const MATE_THRESHOLD: i32 = MATE - 1_000;

/// Bónus por combinação (tipo nativo, poder). Linhas = nativo, colunas = poder,
/// ordem Pawn, Knight, Bishop, Rook, Queen, King.
/// Poderes que não acrescentam casas (dama com torre/bispo) valem pouco.
const POWER_PAIR_BONUS: [[i32; 6]; 6] = [
    // P    N    B    R    Q    K
    [  0,  60,  70,  90, 120,  40], // Pawn
    [ 15,   0,  60,  80, 110,  20], // Knight
    [ 15,  50,   0,  70,  90,  25], // Bishop
    [ 15,  50,  60,   0,  80,  25], // Rook
    [  5,  40,   5,   5,   0,  10], // Queen
    [ 10,  60,  70,  90, 120,   0], // King
];

#[inline]
pub fn power_bonus(native: PieceKind, power: PieceKind) -> i32 {
    POWER_PAIR_BONUS[native.index()][power.index()]
}

/// Valor de uma peça: material (rei fora) + bónus do poder.
#[inline]
pub fn piece_score(piece: &Piece) -> i32 {
    let material = if piece.is_king { 0 } else { piece.kind.value() };
    material + piece.power.map_or(0, |p| power_bonus(piece.kind, p))
}

/// Avaliação estática do ponto de vista de `side`.
pub fn evaluate(board: &Board, side: Color) -> i32 {
    let mut score = 0;
    for (_, piece) in board.occupied() {
        if piece.color == Color::White {
            score += piece_score(&piece);
        } else {
            score -= piece_score(&piece);
        }
    }
    if side == Color::White { score } else { -score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(evaluate(&Board::new(), Color::White), 0);
        assert_eq!(evaluate(&Board::new(), Color::Black), 0);
    }

    #[test]
    fn test_power_adds_to_material() {
        let plain = Board::from_placement("4k3/8/8/8/3N4/8/8/4K3").unwrap();
        let powered = Board::from_placement("4k3/8/8/8/3N(r)4/8/8/4K3").unwrap();
        assert_eq!(evaluate(&plain, Color::White), 320);
        assert_eq!(evaluate(&powered, Color::White), 320 + power_bonus(PieceKind::Knight, PieceKind::Rook));
        assert_eq!(evaluate(&powered, Color::Black), -evaluate(&powered, Color::White));
    }
}
