// Regras do xadrez de poder: legalidade, poder, execução e estado do jogo

pub mod legality;
pub mod power;
pub mod execute;
pub mod game;

pub use execute::*;
pub use game::*;
pub use legality::*;
pub use power::*;
