//! Doris SQL recognizer.
//!
//! A hand-written recursive descent parser. Expression productions are
//! collected as flat operand/operator sequences and handed to the precedence
//! climber in [`pratt`].

mod expr;
#[allow(clippy::module_inception)]
mod parser;
pub mod pratt;
mod query;

pub use parser::Parser;
