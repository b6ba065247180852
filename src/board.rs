// Ficheiro: src/board.rs
// Descrição: Módulo que contém a struct Board e os seus métodos principais.

use super::types::*;
use crate::error::FenError;

/// Verifica se a coordenada está dentro do tabuleiro 8x8.
#[inline]
pub fn in_bounds(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

// O tabuleiro: 64 casas, cada uma com uma peça ou explicitamente vazia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

/// Estado trocado por `displace`, para o `restore` desfazer exatamente.
#[derive(Debug, Clone, Copy)]
pub struct Displaced {
    from: Position,
    to: Position,
    moved: Piece,
    captured: Option<(Position, Piece)>,
}

/// Posição completa lida de uma FEN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenSetup {
    pub board: Board,
    pub turn: Color,
    pub en_passant: Option<Position>,
    pub halfmove_clock: u16,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Tabuleiro vazio.
    pub fn empty() -> Self {
        Board { squares: [[None; 8]; 8] }
    }

    /// Cria um novo tabuleiro na posição inicial padrão.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Position::new(0, col), Some(Piece::new(kind, Color::Black)));
            board.set(Position::new(1, col), Some(Piece::new(PieceKind::Pawn, Color::Black)));
            board.set(Position::new(6, col), Some(Piece::new(PieceKind::Pawn, Color::White)));
            board.set(Position::new(7, col), Some(Piece::new(kind, Color::White)));
        }
        board
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize]
    }

    #[inline]
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        self.squares[pos.row as usize][pos.col as usize] = piece;
    }

    #[inline]
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        self.squares[pos.row as usize][pos.col as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// Cor da peça na casa, se houver.
    #[inline]
    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.get(pos).map(|p| p.color)
    }

    /// Itera todas as peças de uma cor com as suas casas.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// Itera todas as casas ocupadas, linha a linha.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                let pos = Position::new(row, col);
                self.get(pos).map(|p| (pos, p))
            })
        })
    }

    /// Casa do rei de uma cor. None quando o rei foi capturado.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces(color).find(|(_, p)| p.is_king).map(|(pos, _)| pos)
    }

    /// Move uma peça sem validar nada; usado para testar xeque sem clonar o tabuleiro.
    pub fn displace(&mut self, from: Position, to: Position, en_passant_victim: Option<Position>) -> Displaced {
        let moved = self.take(from).expect("displace from an empty square");
        let captured = match en_passant_victim {
            Some(victim) => self.take(victim).map(|p| (victim, p)),
            None => self.take(to).map(|p| (to, p)),
        };
        self.set(to, Some(moved));
        Displaced { from, to, moved, captured }
    }

    /// Desfaz um `displace`.
    pub fn restore(&mut self, displaced: Displaced) {
        self.set(displaced.to, None);
        self.set(displaced.from, Some(displaced.moved));
        if let Some((pos, piece)) = displaced.captured {
            self.set(pos, Some(piece));
        }
    }

    /// Lê apenas a parte de colocação das peças (linha 0 = oitava fila).
    /// Um poder é escrito entre parênteses logo após a letra: `N(r)`.
    pub fn from_placement(placement: &str) -> Result<Self, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::WrongRowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;
            let mut chars = text.chars().peekable();
            while let Some(ch) = chars.next() {
                if let Some(digit) = ch.to_digit(10) {
                    col += digit as usize; // Casas vazias
                    continue;
                }
                let kind = PieceKind::from_letter(ch).ok_or(FenError::InvalidPiece(ch))?;
                let color = if ch.is_ascii_uppercase() { Color::White } else { Color::Black };
                let mut piece = Piece::new(kind, color);

                if chars.peek() == Some(&'(') {
                    chars.next();
                    let power = chars
                        .next()
                        .and_then(PieceKind::from_letter)
                        .ok_or(FenError::InvalidPower { row })?;
                    if chars.next() != Some(')') {
                        return Err(FenError::InvalidPower { row });
                    }
                    // Só se ganha poder capturando, portanto a peça já se moveu
                    piece = piece.with_power(power).moved();
                }

                if col >= 8 {
                    return Err(FenError::BadRowLength { row });
                }
                board.set(Position::new(row as u8, col as u8), Some(piece));
                col += 1;
            }
            if col != 8 {
                return Err(FenError::BadRowLength { row });
            }
        }

        board.infer_moved_flags();
        Ok(board)
    }

    /// Lê uma FEN: `<colocação> [w|b] [roques] [en passant] [meio-lances]`.
    pub fn from_fen(fen: &str) -> Result<FenSetup, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let placement = parts.first().ok_or(FenError::Empty)?;
        let mut board = Board::from_placement(placement)?;

        let turn = match parts.get(1).copied().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidTurn(other.to_string())),
        };

        if let Some(castling) = parts.get(2) {
            board.apply_castling_field(castling)?;
        }

        let en_passant = match parts.get(3).copied().unwrap_or("-") {
            "-" => None,
            sq => Some(Position::from_algebraic(sq).ok_or_else(|| FenError::InvalidEnPassant(sq.to_string()))?),
        };

        let halfmove_clock = parts.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);

        Ok(FenSetup { board, turn, en_passant, halfmove_clock })
    }

    /// Peões fora da casa inicial e reis/torres fora das casas de origem já se moveram.
    fn infer_moved_flags(&mut self) {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let pos = Position::new(row, col);
                if let Some(mut piece) = self.get(pos) {
                    let home = match piece.kind {
                        PieceKind::Pawn => row == piece.color.pawn_start_row(),
                        PieceKind::King => row == piece.color.back_row() && col == 4,
                        PieceKind::Rook => row == piece.color.back_row() && (col == 0 || col == 7),
                        _ => true,
                    };
                    if !home {
                        piece.has_moved = true;
                        self.set(pos, Some(piece));
                    }
                }
            }
        }
    }

    /// Sem direito de roque, o rei (ou a torre) correspondente conta como já movido.
    fn apply_castling_field(&mut self, field: &str) -> Result<(), FenError> {
        if field != "-" && !field.chars().all(|c| "KQkq".contains(c)) {
            return Err(FenError::InvalidCastling(field.to_string()));
        }
        for color in [Color::White, Color::Black] {
            let (short, long) = match color {
                Color::White => ('K', 'Q'),
                Color::Black => ('k', 'q'),
            };
            let has_short = field.contains(short);
            let has_long = field.contains(long);
            let row = color.back_row();
            for (col, allowed) in [(7u8, has_short), (0u8, has_long)] {
                let pos = Position::new(row, col);
                if let Some(mut rook) = self.get(pos) {
                    if rook.kind == PieceKind::Rook && rook.color == color && !allowed {
                        rook.has_moved = true;
                        self.set(pos, Some(rook));
                    }
                }
            }
            if !has_short && !has_long {
                let king_pos = Position::new(row, 4);
                if let Some(mut king) = self.get(king_pos) {
                    if king.is_king && king.color == color {
                        king.has_moved = true;
                        self.set(king_pos, Some(king));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
