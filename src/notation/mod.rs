//! Text notation for vectors and matrices
//!
//! A vector is six counts in parentheses, rings first: `(0, 0, 6, 2, 2, 2)`.
//! A matrix is nine cells in brackets, one row per ring separated by `/` or
//! `;`: `[0 0 0 / 0 0 0 / 2 2 2]`. The nested form `[[0,0,0],[0,0,0],[2,2,2]]`
//! is accepted too. Commas are optional and `//` starts a comment.

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::Occupancy;
pub use grammar::{parse, parse_matrix, parse_vector};
