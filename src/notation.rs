// Ficheiro: src/notation.rs
// Descrição: Notação dos lances e chave canónica de posição (repetições).

use crate::board::Board;
use crate::types::*;

/// Chave canónica: colocação (linha 0 primeiro, `/` entre filas), poderes como `N(r)`,
/// seguida de `|w` ou `|b` e da casa de en passant ou `-`.
/// Duas posições com a mesma colocação, poderes, vez e en passant dão sempre a mesma chave.
pub fn position_key(board: &Board, turn: Color, en_passant: Option<Position>) -> String {
    let mut key = placement(board);
    key.push('|');
    key.push(turn.letter());
    key.push('|');
    match en_passant {
        Some(ep) => key.push_str(&ep.to_string()),
        None => key.push('-'),
    }
    key
}

/// Só a colocação das peças, no formato aceite por `Board::from_placement`.
pub fn placement(board: &Board) -> String {
    let mut out = String::with_capacity(80);
    for row in 0..8u8 {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for col in 0..8u8 {
            match board.get(Position::new(row, col)) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece.letter());
                    if let Some(power) = piece.power {
                        out.push('(');
                        out.push(power.letter().to_ascii_lowercase());
                        out.push(')');
                    }
                }
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
    }
    out
}

/// Notação legível: letra do tipo original (vazia para peão), origem, `x` ou `-`,
/// destino, `=<letra>` na promoção e `*` quando o poder foi declarado.
pub fn notate(
    board: &Board,
    from: Position,
    to: Position,
    piece: PieceKind,
    captured: Option<PieceKind>,
    promotion: Option<PieceKind>,
    is_force_power: bool,
) -> String {
    let original = board.get(from).map(|p| p.original_kind).unwrap_or(piece);

    let mut out = String::with_capacity(10);
    if original != PieceKind::Pawn {
        out.push(original.letter());
    }
    out.push_str(&from.to_string());
    out.push(if captured.is_some() { 'x' } else { '-' });
    out.push_str(&to.to_string());
    if let Some(p) = promotion {
        out.push('=');
        out.push(p.letter());
    }
    if is_force_power {
        out.push('*');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_start_position_key() {
        assert_eq!(
            position_key(&Board::new(), Color::White, None),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR|w|-"
        );
    }

    #[test]
    fn test_key_includes_power_and_en_passant() {
        let board = Board::from_placement("4k3/8/8/3N(r)4/8/8/8/4K3").unwrap();
        assert_eq!(position_key(&board, Color::Black, Some(pos("e3"))), "4k3/8/8/3N(r)4/8/8/8/4K3|b|e3");
    }

    #[test]
    fn test_placement_roundtrips_through_parser() {
        let text = "r3k2r/1b(q)6/8/8/8/8/8/R3K2R";
        let board = Board::from_placement(text).unwrap();
        assert_eq!(placement(&board), text);
    }

    #[test]
    fn test_notation_forms() {
        let board = Board::new();
        assert_eq!(notate(&board, pos("e2"), pos("e4"), PieceKind::Pawn, None, None, false), "e2-e4");
        assert_eq!(notate(&board, pos("g1"), pos("f3"), PieceKind::Knight, None, None, false), "Ng1-f3");
        assert_eq!(
            notate(&board, pos("a2"), pos("b1"), PieceKind::Pawn, Some(PieceKind::Knight), Some(PieceKind::Queen), true),
            "a2xb1=Q*"
        );
    }
}
