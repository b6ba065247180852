// Ficheiro: src/types.rs
// Descrição: Módulo para as definições de tipos de dados fundamentais do jogo.

use std::fmt;

// Enum para representar a cor de uma peça ou de um jogador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl Color {
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Direção de avanço dos peões (linha 0 = oitava fila).
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Última fila: onde os peões desta cor são promovidos.
    pub fn promotion_row(self) -> u8 {
        (!self).back_row()
    }

    pub fn letter(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

// Enum para representar o tipo de uma peça de xadrez.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Peças disponíveis para promoção, da mais forte para a mais fraca.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn value(&self) -> i32 {
        match self {
            PieceKind::Pawn   => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook   => 500,
            PieceKind::Queen  => 900,
            PieceKind::King   => 20000, // Valor alto para evitar trocas
        }
    }

    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Letra maiúscula da peça (notação inglesa).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

// Struct para representar uma peça no tabuleiro.
// `kind` é a identidade atual, `power` o segundo conjunto de lances ganho ao capturar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub power: Option<PieceKind>,
    pub original_kind: PieceKind,
    pub is_king: bool,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            power: None,
            original_kind: kind,
            is_king: kind == PieceKind::King,
            has_moved: false,
        }
    }

    pub fn with_power(mut self, power: PieceKind) -> Self {
        self.power = Some(power);
        self
    }

    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    /// Letra da peça: maiúscula para as brancas, minúscula para as pretas.
    pub fn letter(&self) -> char {
        let ch = self.kind.letter();
        match self.color {
            Color::White => ch,
            Color::Black => ch.to_ascii_lowercase(),
        }
    }
}

// Casa do tabuleiro. Linha 0 = oitava fila (lado das pretas), coluna 0 = coluna 'a'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    /// Desloca a casa; devolve None se sair do tabuleiro.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Position> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if crate::board::in_bounds(row, col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Índice 0..64, usado pelas tabelas Zobrist.
    pub fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    pub fn from_algebraic(s: &str) -> Option<Position> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Position::new(7 - rank, file))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = (b'8' - self.row) as char;
        write!(f, "{}{}", file, rank)
    }
}

// Struct para representar um lance completo.
// Um Move é auto-suficiente: com o tabuleiro anterior basta para reproduzir o seguinte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: PieceKind,
    pub color: Color,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub is_force_power: bool,
    pub power_consumed: bool,
    /// Poder da peça depois do lance (None = sem poder).
    pub after_power: Option<PieceKind>,
    pub notation: String,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub is_double_step: bool,
    /// Lance feito com o conjunto de peão (zera o relógio dos 50 lances).
    pub via_pawn: bool,
}

impl Move {
    pub fn key(&self) -> MoveKey {
        MoveKey {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
            force_power: self.is_force_power,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Casa do peão capturado en passant (mesma linha da origem, coluna do destino).
    pub fn en_passant_victim(&self) -> Option<Position> {
        if self.is_en_passant {
            Some(Position::new(self.from.row, self.to.col))
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.letter().to_ascii_lowercase())?;
        }
        if self.is_force_power {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// Identificação compacta de um lance para TT e killer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveKey {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
    pub force_power: bool,
}
