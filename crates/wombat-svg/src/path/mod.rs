//! The path data mini-language.
//!
//! [SVG 1.1 § 8 Paths](https://www.w3.org/TR/SVG11/paths.html)

mod interpreter;
mod lexer;

pub use interpreter::{PathCommand, PathInterpreter, draw_path, parse_path};
pub use lexer::{PathLexer, Token};
