pub mod alpha_beta;
pub mod evaluation;
pub mod move_ordering;
pub mod movegen;
pub mod mutable_board;
pub mod protocol;
pub mod quiescence;
pub mod search_thread;

pub use alpha_beta::*;
pub use evaluation::*;
pub use move_ordering::*;
pub use movegen::*;
pub use mutable_board::*;
pub use protocol::*;
pub use search_thread::*;
