//! Fluent construction of document bodies
//!
//! Ids are handed out in document order, so a built body looks exactly
//! like a loaded one after [`Body::assign_ids`].
//!
//! ```
//! use docgen_parser::document::BodyBuilder;
//!
//! let body = BodyBuilder::new()
//!     .paragraph(|p| {
//!         p.text("Dear ").field("m:self.name").text(",");
//!     })
//!     .build();
//! assert_eq!(body.run_count(), 5);
//! ```

use super::model::{
    Body, BodyElement, FieldChar, Paragraph, Run, RunId, Table, TableCell, TableId, TableRow,
};

#[derive(Debug, Default)]
struct IdAllocator {
    next_run: usize,
    next_table: usize,
}

impl IdAllocator {
    fn run(&mut self) -> RunId {
        let id = RunId::new(self.next_run);
        self.next_run += 1;
        id
    }

    fn table(&mut self) -> TableId {
        let id = TableId::new(self.next_table);
        self.next_table += 1;
        id
    }
}

#[derive(Debug, Default)]
pub struct BodyBuilder {
    ids: IdAllocator,
    elements: Vec<BodyElement>,
}

impl BodyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, build: impl FnOnce(&mut ParagraphBuilder<'_>)) -> Self {
        let element = build_paragraph(&mut self.ids, build);
        self.elements.push(element);
        self
    }

    pub fn table(mut self, build: impl FnOnce(&mut TableBuilder<'_>)) -> Self {
        let element = build_table(&mut self.ids, build);
        self.elements.push(element);
        self
    }

    pub fn build(self) -> Body {
        Body::new(self.elements)
    }
}

fn build_paragraph(
    ids: &mut IdAllocator,
    build: impl FnOnce(&mut ParagraphBuilder<'_>),
) -> BodyElement {
    let mut paragraph = ParagraphBuilder {
        ids,
        runs: Vec::new(),
    };
    build(&mut paragraph);
    BodyElement::Paragraph(Paragraph {
        runs: paragraph.runs,
    })
}

fn build_table(ids: &mut IdAllocator, build: impl FnOnce(&mut TableBuilder<'_>)) -> BodyElement {
    let id = ids.table();
    let mut table = TableBuilder {
        ids,
        rows: Vec::new(),
    };
    build(&mut table);
    BodyElement::Table(Table {
        id,
        rows: table.rows,
    })
}

pub struct ParagraphBuilder<'a> {
    ids: &'a mut IdAllocator,
    runs: Vec<Run>,
}

impl ParagraphBuilder<'_> {
    fn push(&mut self, text: &str, instr_text: Vec<String>, field_char: Option<FieldChar>) -> &mut Self {
        let id = self.ids.run();
        self.runs.push(Run {
            id,
            text: text.to_string(),
            instr_text,
            field_char,
        });
        self
    }

    /// Plain visible text
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.push(text, Vec::new(), None)
    }

    /// A complete field: begin marker, one instruction run, end marker
    pub fn field(&mut self, instruction: &str) -> &mut Self {
        self.field_parts(&[instruction])
    }

    /// A complete field whose instruction text is split over several runs
    pub fn field_parts(&mut self, parts: &[&str]) -> &mut Self {
        self.begin();
        for part in parts {
            self.instruction(part);
        }
        self.end()
    }

    pub fn begin(&mut self) -> &mut Self {
        self.push("", Vec::new(), Some(FieldChar::Begin))
    }

    pub fn separate(&mut self) -> &mut Self {
        self.push("", Vec::new(), Some(FieldChar::Separate))
    }

    pub fn end(&mut self) -> &mut Self {
        self.push("", Vec::new(), Some(FieldChar::End))
    }

    /// One run carrying a single instruction fragment
    pub fn instruction(&mut self, fragment: &str) -> &mut Self {
        self.push("", vec![fragment.to_string()], None)
    }
}

pub struct TableBuilder<'a> {
    ids: &'a mut IdAllocator,
    rows: Vec<TableRow>,
}

impl TableBuilder<'_> {
    pub fn row(&mut self, build: impl FnOnce(&mut RowBuilder<'_>)) -> &mut Self {
        let mut row = RowBuilder {
            ids: &mut *self.ids,
            cells: Vec::new(),
        };
        build(&mut row);
        let cells = row.cells;
        self.rows.push(TableRow { cells });
        self
    }
}

pub struct RowBuilder<'a> {
    ids: &'a mut IdAllocator,
    cells: Vec<TableCell>,
}

impl RowBuilder<'_> {
    pub fn cell(&mut self, build: impl FnOnce(&mut CellBuilder<'_>)) -> &mut Self {
        let mut cell = CellBuilder {
            ids: &mut *self.ids,
            elements: Vec::new(),
        };
        build(&mut cell);
        let elements = cell.elements;
        self.cells.push(TableCell {
            body: Body::new(elements),
        });
        self
    }
}

pub struct CellBuilder<'a> {
    ids: &'a mut IdAllocator,
    elements: Vec<BodyElement>,
}

impl CellBuilder<'_> {
    pub fn paragraph(&mut self, build: impl FnOnce(&mut ParagraphBuilder<'_>)) -> &mut Self {
        let element = build_paragraph(self.ids, build);
        self.elements.push(element);
        self
    }

    pub fn table(&mut self, build: impl FnOnce(&mut TableBuilder<'_>)) -> &mut Self {
        let element = build_table(self.ids, build);
        self.elements.push(element);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_expands_to_three_runs() {
        let body = BodyBuilder::new()
            .paragraph(|p| {
                p.field("m:if x");
            })
            .build();

        let BodyElement::Paragraph(paragraph) = &body.elements[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.runs.len(), 3);
        assert!(paragraph.runs[0].is_field_begin());
        assert_eq!(paragraph.runs[1].instruction_text(), "m:if x");
        assert!(paragraph.runs[2].is_field_end());
    }

    #[test]
    fn test_ids_match_assign_ids() {
        let built = BodyBuilder::new()
            .paragraph(|p| {
                p.text("a");
            })
            .table(|t| {
                t.row(|r| {
                    r.cell(|c| {
                        c.paragraph(|p| {
                            p.text("b").field("m:x");
                        });
                    })
                    .cell(|c| {
                        c.table(|t| {
                            t.row(|r| {
                                r.cell(|_| {});
                            });
                        });
                    });
                });
            })
            .paragraph(|p| {
                p.text("c");
            })
            .build();

        let mut renumbered = built.clone();
        renumbered.assign_ids();
        assert_eq!(built, renumbered);
        assert_eq!(built.run_count(), 6);
    }
}
