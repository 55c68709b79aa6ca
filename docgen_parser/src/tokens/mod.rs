//! Tokens and the document cursor the parser reads them from

pub mod cursor;
pub mod token;

pub use cursor::{DocumentCursor, Position};
pub use token::TokenKind;
