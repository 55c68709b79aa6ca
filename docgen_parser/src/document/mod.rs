//! Document body provider
//!
//! The parser never sees a word-processing file directly; it reads this
//! owned model, either loaded from a JSON export or built in code.

mod builder;
mod loader;
mod model;

pub use builder::{BodyBuilder, CellBuilder, ParagraphBuilder, RowBuilder, TableBuilder};
pub use loader::{from_json, load_file, DocumentError, DocumentResult};
pub use model::{
    Body, BodyElement, FieldChar, Paragraph, Run, RunId, Table, TableCell, TableId, TableRow,
};
