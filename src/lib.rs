// Motor Xadrez de Poder - regras e busca

pub mod types;
pub mod board;
pub mod error;
pub mod zobrist;
pub mod notation;
pub mod core;
pub mod moves;
pub mod rules;
pub mod engine;
pub mod search;

pub use core::*;
