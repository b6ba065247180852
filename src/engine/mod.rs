pub mod perft;
pub mod tt;

pub use perft::*;
pub use tt::*;
