//! Template grammar: tag keywords, AST, error messages and builders

pub mod ast;
pub mod builders;
pub mod keywords;
pub mod messages;

pub use ast::*;
pub use builders::{classify, parse_compound, read_tag, TemplateParser};
pub use keywords::match_keyword;
pub use messages::ParsingErrorMessage;
