//! Tipos de erro do motor
//!
//! Erros recuperáveis nas fronteiras públicas: preparação de posições,
//! máquina de estados do jogo e falhas internas da busca.

use crate::types::Position;

/// Erros ao interpretar uma string FEN (com a extensão de poderes `N(r)`)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Invalid FEN: wrong number of rows ({0})")]
    WrongRowCount(usize),

    #[error("Invalid FEN: row {row} does not have 8 squares")]
    BadRowLength { row: usize },

    #[error("Invalid piece letter: {0}")]
    InvalidPiece(char),

    #[error("Invalid power annotation in row {row}")]
    InvalidPower { row: usize },

    #[error("Invalid turn: {0}")]
    InvalidTurn(String),

    #[error("Invalid castling field: {0}")]
    InvalidCastling(String),

    #[error("Invalid en passant square: {0}")]
    InvalidEnPassant(String),

    #[error("Invalid FEN: empty string")]
    Empty,
}

/// Erros da máquina de estados de um lance
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Invalid move: {from} -> {to}")]
    IllegalMove { from: Position, to: Position },

    #[error("No piece of the side to move at {0}")]
    NotYourPiece(Position),

    #[error("A move is already waiting for {0}")]
    MovePending(&'static str),

    #[error("No move is waiting for {0}")]
    NothingPending(&'static str),

    #[error("Invalid promotion piece")]
    InvalidPromotion,

    #[error("Game is over")]
    GameOver,
}

/// Falhas internas da busca, reportadas pelo protocolo como `Response::Error`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Search panicked: {0}")]
    Panicked(String),

    #[error("No legal move available")]
    NoLegalMove,

    #[error("Search worker is gone")]
    WorkerGone,
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
