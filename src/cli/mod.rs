pub mod commands;
pub mod commands_auth;
pub mod commands_status;
pub mod error;
pub mod output;
pub mod parser;
pub mod abbrev;

pub use commands::*;
pub use parser::*;
pub use output::*;
pub use error::*;
