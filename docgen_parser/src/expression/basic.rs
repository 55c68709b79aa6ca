//! Structural checks standing in for a full expression language
//!
//! Rejects empty input, unbalanced brackets and unterminated string
//! literals. Anything else compiles.

use super::{Compilation, Expression, ExpressionCompiler};

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicExpressionCompiler;

impl BasicExpressionCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionCompiler for BasicExpressionCompiler {
    fn compile(&self, text: &str) -> Compilation {
        let source = text.trim();
        Compilation {
            expression: Expression::new(source),
            errors: check(source),
        }
    }
}

fn check(source: &str) -> Vec<String> {
    if source.is_empty() {
        return vec!["missing expression".to_string()];
    }

    let mut errors = Vec::new();
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (index, c) in source.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '\'' => in_string = true,
            '(' | '[' | '{' => open.push((c, index)),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match open.pop() {
                    Some((opening, _)) if opening == expected => {}
                    Some((opening, at)) => errors.push(format!(
                        "'{}' at {} closes '{}' opened at {}",
                        c, index, opening, at
                    )),
                    None => errors.push(format!("unbalanced '{}' at {}", c, index)),
                }
            }
            _ => {}
        }
    }

    if in_string {
        errors.push("unterminated string literal".to_string());
    }
    for (opening, at) in open {
        errors.push(format!("unclosed '{}' opened at {}", opening, at));
    }

    errors
}
