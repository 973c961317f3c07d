//! SQL lexer.
//!
//! A hand-written lexer that turns Doris SQL text into the token stream the
//! recognizer consumes.

mod span;
mod token;
mod tokenizer;

pub use span::{LineColumn, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
