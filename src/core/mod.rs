// Reexporta os tipos base para `use crate::core::*`

pub use crate::board::*;
pub use crate::error::*;
pub use crate::notation::*;
pub use crate::types::*;
pub use crate::zobrist::*;
