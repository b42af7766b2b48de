//! Configuration types
//!
//! Board configuration and the parser for its TOML text form.

pub mod board;
pub mod parse;

pub use board::*;
pub use parse::{parse_config, ParseError};
