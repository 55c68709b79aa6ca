//! Owned model of a document body
//!
//! A body is an ordered list of paragraphs and tables. Paragraph runs carry
//! either visible text, instruction-text fragments, or a field marker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a run within one document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RunId(usize);

impl RunId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run #{}", self.0)
    }
}

/// Stable identity of a table within one document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TableId(usize);

impl TableId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table #{}", self.0)
    }
}

/// Field marker carried by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldChar {
    Begin,
    Separate,
    End,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Assigned by [`Body::assign_ids`]; ignored on input
    #[serde(default)]
    pub id: RunId,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    /// Instruction-text fragments, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instr_text: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_char: Option<FieldChar>,
}

impl Run {
    pub fn is_field_begin(&self) -> bool {
        self.field_char == Some(FieldChar::Begin)
    }

    pub fn is_field_end(&self) -> bool {
        self.field_char == Some(FieldChar::End)
    }

    /// All instruction fragments of this run concatenated
    pub fn instruction_text(&self) -> String {
        self.instr_text.concat()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub id: TableId,

    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

/// A table cell holds a full nested body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BodyElement {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub elements: Vec<BodyElement>,
}

impl Body {
    pub fn new(elements: Vec<BodyElement>) -> Self {
        Self { elements }
    }

    /// Number the runs and tables of this body and every nested cell in
    /// document order. Returns the number of runs.
    pub fn assign_ids(&mut self) -> usize {
        let mut next_run = 0;
        let mut next_table = 0;
        assign_body_ids(self, &mut next_run, &mut next_table);
        next_run
    }

    /// Total runs, including those inside table cells
    pub fn run_count(&self) -> usize {
        self.elements
            .iter()
            .map(|element| match element {
                BodyElement::Paragraph(paragraph) => paragraph.runs.len(),
                BodyElement::Table(table) => table
                    .rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .map(|cell| cell.body.run_count())
                    .sum(),
            })
            .sum()
    }

    /// Look a run up by id anywhere in the body
    pub fn find_run(&self, id: RunId) -> Option<&Run> {
        self.elements.iter().find_map(|element| match element {
            BodyElement::Paragraph(paragraph) => paragraph.runs.iter().find(|run| run.id == id),
            BodyElement::Table(table) => table
                .rows
                .iter()
                .flat_map(|row| row.cells.iter())
                .find_map(|cell| cell.body.find_run(id)),
        })
    }
}

fn assign_body_ids(body: &mut Body, next_run: &mut usize, next_table: &mut usize) {
    for element in &mut body.elements {
        match element {
            BodyElement::Paragraph(paragraph) => {
                for run in &mut paragraph.runs {
                    run.id = RunId::new(*next_run);
                    *next_run += 1;
                }
            }
            BodyElement::Table(table) => {
                table.id = TableId::new(*next_table);
                *next_table += 1;
                for cell in table.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                    assign_body_ids(&mut cell.body, next_run, next_table);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Run {
        Run {
            text: text.to_string(),
            ..Run::default()
        }
    }

    fn paragraph(texts: &[&str]) -> BodyElement {
        BodyElement::Paragraph(Paragraph {
            runs: texts.iter().map(|t| run(t)).collect(),
        })
    }

    #[test]
    fn test_assign_ids_in_document_order() {
        let cell = TableCell {
            body: Body::new(vec![paragraph(&["c"])]),
        };
        let mut body = Body::new(vec![
            paragraph(&["a", "b"]),
            BodyElement::Table(Table {
                id: TableId::default(),
                rows: vec![TableRow { cells: vec![cell] }],
            }),
            paragraph(&["d"]),
        ]);

        assert_eq!(body.assign_ids(), 4);
        assert_eq!(body.run_count(), 4);
        assert_eq!(body.find_run(RunId::new(2)).map(|r| r.text.as_str()), Some("c"));
        assert_eq!(body.find_run(RunId::new(3)).map(|r| r.text.as_str()), Some("d"));
        assert!(body.find_run(RunId::new(9)).is_none());
    }

    #[test]
    fn test_instruction_text_concatenates_fragments() {
        let run = Run {
            instr_text: vec!["m:i".to_string(), "f x".to_string()],
            ..Run::default()
        };
        assert_eq!(run.instruction_text(), "m:if x");
        assert!(!run.is_field_begin());
    }

    #[test]
    fn test_display_ids() {
        assert_eq!(RunId::new(3).to_string(), "run #3");
        assert_eq!(TableId::new(1).to_string(), "table #1");
    }
}
