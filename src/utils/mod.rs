pub mod date;
pub mod fuzzy;
pub mod text;

pub use date::*;
pub use text::*;
