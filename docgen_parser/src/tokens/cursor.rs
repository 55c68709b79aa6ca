//! Forward-only cursor over the positions of a document body
//!
//! A position is either a paragraph run or a whole table; paragraph
//! boundaries are flattened away and table contents are not visited.

use crate::document::{Body, BodyElement, Run, Table};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position<'a> {
    Run(&'a Run),
    Table(&'a Table),
}

impl<'a> Position<'a> {
    pub fn as_run(self) -> Option<&'a Run> {
        match self {
            Position::Run(run) => Some(run),
            Position::Table(_) => None,
        }
    }

    pub fn as_table(self) -> Option<&'a Table> {
        match self {
            Position::Table(table) => Some(table),
            Position::Run(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentCursor<'a> {
    positions: Vec<Position<'a>>,
    /// Index of the next position to be returned
    index: usize,
}

impl<'a> DocumentCursor<'a> {
    pub fn new(body: &'a Body) -> Self {
        let positions = body
            .elements
            .iter()
            .flat_map(|element| -> Box<dyn Iterator<Item = Position<'a>> + 'a> {
                match element {
                    BodyElement::Paragraph(paragraph) => {
                        Box::new(paragraph.runs.iter().map(Position::Run))
                    }
                    BodyElement::Table(table) => Box::new(std::iter::once(Position::Table(table))),
                }
            })
            .collect();

        Self {
            positions,
            index: 0,
        }
    }

    /// The position `n` steps ahead without consuming; `lookahead(1)` is
    /// what the next call to `next()` returns. `lookahead(0)` is `None`.
    pub fn lookahead(&self, n: usize) -> Option<Position<'a>> {
        if n == 0 {
            return None;
        }
        self.positions.get(self.index + n - 1).copied()
    }

    pub fn has_next(&self) -> bool {
        self.index < self.positions.len()
    }

    /// Number of positions already consumed
    pub fn consumed(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.positions.len() - self.index
    }
}

impl<'a> Iterator for DocumentCursor<'a> {
    type Item = Position<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.get(self.index).copied()?;
        self.index += 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BodyBuilder;

    fn sample() -> Body {
        BodyBuilder::new()
            .paragraph(|p| {
                p.text("a").text("b");
            })
            .table(|t| {
                t.row(|r| {
                    r.cell(|c| {
                        c.paragraph(|p| {
                            p.text("inside");
                        });
                    });
                });
            })
            .paragraph(|p| {
                p.text("c");
            })
            .build()
    }

    fn text(position: Option<Position<'_>>) -> Option<&str> {
        position.and_then(Position::as_run).map(|run| run.text.as_str())
    }

    #[test]
    fn test_flattens_paragraphs_and_skips_table_contents() {
        let body = sample();
        let cursor = DocumentCursor::new(&body);

        assert_eq!(cursor.remaining(), 4);
        assert_eq!(text(cursor.lookahead(1)), Some("a"));
        assert_eq!(text(cursor.lookahead(2)), Some("b"));
        assert!(cursor.lookahead(3).and_then(Position::as_table).is_some());
        assert_eq!(text(cursor.lookahead(4)), Some("c"));
        assert!(cursor.lookahead(5).is_none());
    }

    #[test]
    fn test_lookahead_is_side_effect_free() {
        let body = sample();
        let mut cursor = DocumentCursor::new(&body);

        let peeked = cursor.lookahead(1);
        assert_eq!(cursor.lookahead(1), peeked);
        assert_eq!(cursor.consumed(), 0);
        assert_eq!(cursor.next(), peeked);
        assert_eq!(text(cursor.lookahead(1)), Some("b"));
        assert!(cursor.lookahead(0).is_none());
    }

    #[test]
    fn test_exhaustion() {
        let body = sample();
        let mut cursor = DocumentCursor::new(&body);

        assert_eq!(cursor.by_ref().count(), 4);
        assert!(!cursor.has_next());
        assert!(cursor.next().is_none());
        assert!(cursor.lookahead(1).is_none());
    }

    #[test]
    fn test_empty_body() {
        let body = Body::default();
        let cursor = DocumentCursor::new(&body);
        assert!(!cursor.has_next());
        assert!(cursor.lookahead(1).is_none());
    }
}
