//! Template tree and traversal helpers

pub mod nodes;

pub use nodes::*;

impl Template {
    /// Every recoverable error in the tree, parents before children
    pub fn errors(&self) -> Vec<&ParsingError> {
        let mut errors: Vec<&ParsingError> = self.tag.errors.iter().collect();
        for construct in &self.body {
            construct.collect_errors(&mut errors);
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Visit every construct, including those in nested bodies and cells
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Construct)) {
        walk_body(&self.body, visit);
    }
}

impl Construct {
    pub fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ParsingError>) {
        if let Some(tag) = self.tag() {
            errors.extend(tag.errors.iter());
        }
        match self {
            Construct::Repetition(repetition) => collect_body(&repetition.body, errors),
            Construct::Conditional(conditional) => conditional.collect_branch_errors(errors),
            Construct::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| row.cells.iter()) {
                    errors.extend(cell.template.errors());
                }
            }
            Construct::Static(_)
            | Construct::Query(_)
            | Construct::Image(_)
            | Construct::Representation(_) => {}
        }
    }
}

impl Conditional {
    fn collect_branch_errors<'a>(&'a self, errors: &mut Vec<&'a ParsingError>) {
        collect_body(&self.body, errors);
        match &self.alternative {
            Some(Alternative::ElseIf(next)) => {
                errors.extend(next.tag.errors.iter());
                next.collect_branch_errors(errors);
            }
            Some(Alternative::Else(branch)) => {
                errors.extend(branch.tag.errors.iter());
                collect_body(&branch.body, errors);
            }
            None => {}
        }
    }

    /// Number of `m:elseif` links chained after this conditional
    pub fn chain_length(&self) -> usize {
        match &self.alternative {
            Some(Alternative::ElseIf(next)) => 1 + next.chain_length(),
            _ => 0,
        }
    }
}

fn collect_body<'a>(body: &'a [Construct], errors: &mut Vec<&'a ParsingError>) {
    for construct in body {
        construct.collect_errors(errors);
    }
}

fn walk_body<'a>(body: &'a [Construct], visit: &mut dyn FnMut(&'a Construct)) {
    for construct in body {
        visit(construct);
        match construct {
            Construct::Repetition(repetition) => walk_body(&repetition.body, visit),
            Construct::Conditional(conditional) => walk_conditional(conditional, visit),
            Construct::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| row.cells.iter()) {
                    walk_body(&cell.template.body, visit);
                }
            }
            Construct::Static(_)
            | Construct::Query(_)
            | Construct::Image(_)
            | Construct::Representation(_) => {}
        }
    }
}

fn walk_conditional<'a>(conditional: &'a Conditional, visit: &mut dyn FnMut(&'a Construct)) {
    walk_body(&conditional.body, visit);
    match &conditional.alternative {
        Some(Alternative::ElseIf(next)) => walk_conditional(next, visit),
        Some(Alternative::Else(branch)) => walk_body(&branch.body, visit),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::RunId;
    use crate::grammar::messages::ParsingErrorMessage;
    use crate::tokens::TokenKind;

    fn tag_with_error(run: usize) -> TagInfo {
        let mut tag = TagInfo::default();
        tag.push_error(
            ParsingErrorMessage::UnexpectedTag(TokenKind::EndIf),
            Some(RunId::new(run)),
        );
        tag
    }

    fn nested_template() -> Template {
        let inner = Template {
            tag: tag_with_error(3),
            body: vec![Construct::Static(StaticFragment::default())],
        };
        let conditional = Conditional {
            tag: tag_with_error(1),
            alternative: Some(Alternative::ElseIf(Box::new(Conditional {
                tag: tag_with_error(2),
                alternative: Some(Alternative::Else(ElseBranch {
                    tag: TagInfo::default(),
                    body: vec![Construct::Query(Query::default())],
                })),
                ..Conditional::default()
            }))),
            ..Conditional::default()
        };

        Template {
            tag: tag_with_error(0),
            body: vec![
                Construct::Conditional(conditional),
                Construct::Table(Table {
                    rows: vec![Row {
                        cells: vec![Cell { template: inner }],
                    }],
                    ..Table::default()
                }),
            ],
        }
    }

    #[test]
    fn test_errors_are_collected_through_every_branch() {
        let template = nested_template();
        let runs: Vec<Option<RunId>> = template.errors().iter().map(|e| e.run).collect();

        assert_eq!(
            runs,
            vec![
                Some(RunId::new(0)),
                Some(RunId::new(1)),
                Some(RunId::new(2)),
                Some(RunId::new(3)),
            ]
        );
        assert!(!template.is_valid());
    }

    #[test]
    fn test_walk_reaches_nested_constructs() {
        let template = nested_template();
        let mut kinds = Vec::new();
        template.walk(&mut |construct| kinds.push(construct.kind_name()));

        assert_eq!(kinds, vec!["conditional", "query", "table", "static"]);
    }

    #[test]
    fn test_anchor_prefers_second_run() {
        let tag = TagInfo {
            runs: vec![RunId::new(4), RunId::new(5), RunId::new(6)],
            ..TagInfo::default()
        };
        assert_eq!(tag.anchor(), Some(RunId::new(5)));
        assert_eq!(TagInfo::default().anchor(), None);
    }

    #[test]
    fn test_chain_length() {
        let template = nested_template();
        let Construct::Conditional(conditional) = &template.body[0] else {
            panic!("expected conditional");
        };
        assert_eq!(conditional.chain_length(), 1);
    }

    #[test]
    fn test_serializes_with_kind_tags() {
        let template = nested_template();
        let json = serde_json::to_value(&template).unwrap();

        assert_eq!(json["body"][0]["kind"], "conditional");
        assert_eq!(json["body"][0]["alternative"]["kind"], "else_if");
        assert_eq!(json["body"][1]["kind"], "table");
        assert_eq!(json["tag"]["errors"][0]["code"], "W100");
    }
}
