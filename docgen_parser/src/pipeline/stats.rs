use crate::grammar::ast::{Construct, Template};
use serde::Serialize;
use std::collections::BTreeMap;

/// Construct and error counts of a parsed template
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateStats {
    /// Constructs by kind, nested bodies and table cells included
    pub constructs: BTreeMap<&'static str, usize>,
    /// `m:elseif` links across all conditionals
    pub elseif_branches: usize,
    pub table_cells: usize,
    pub errors: usize,
}

impl TemplateStats {
    pub fn collect(template: &Template) -> Self {
        let mut stats = Self {
            errors: template.errors().len(),
            ..Self::default()
        };

        template.walk(&mut |construct| {
            *stats.constructs.entry(construct.kind_name()).or_insert(0) += 1;
            match construct {
                Construct::Conditional(conditional) => {
                    stats.elseif_branches += conditional.chain_length();
                }
                Construct::Table(table) => {
                    stats.table_cells += table.rows.iter().map(|row| row.cells.len()).sum::<usize>();
                }
                _ => {}
            }
        });

        stats
    }

    pub fn total_constructs(&self) -> usize {
        self.constructs.values().sum()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.constructs.get(kind).copied().unwrap_or(0)
    }
}
