mod core;
mod lexer;

pub use self::core::*;
