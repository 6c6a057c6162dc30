// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The parsed representation of the config grammar:
//!
//! ```text
//! config     := statement*
//! statement  := token+ ( ';' | '{' config '}' )
//! ```

/// A single statement: a non-empty sequence of tokens, optionally followed
/// by a child block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statement {
    pub tokens: Vec<String>,
    pub child: Option<ConfigAst>,
}

impl Statement {
    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }
}

/// An ordered sequence of statements — either the whole config (top level)
/// or the body of a `{ ... }` block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigAst {
    pub statements: Vec<Statement>,
}

impl ConfigAst {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-serializes the AST back to config text. Quoting is applied only
    /// when a token contains whitespace, a quote, or a block delimiter,
    /// which is sufficient for the parser round-trip property: reparsing
    /// this output yields an AST equal to `self`.
    pub fn to_config_text(&self, depth: usize) -> String {
        let indent = "  ".repeat(depth);
        let mut out = String::new();
        for stmt in &self.statements {
            out.push_str(&indent);
            out.push_str(
                &stmt
                    .tokens
                    .iter()
                    .map(|t| quote_if_needed(t))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            match &stmt.child {
                Some(child) => {
                    out.push_str(" {\n");
                    out.push_str(&child.to_config_text(depth + 1));
                    out.push_str(&indent);
                    out.push_str("}\n");
                },
                None => out.push_str(";\n"),
            }
        }
        out
    }
}

fn quote_if_needed(token: &str) -> String {
    let needs_quoting = token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | '{' | '}' | '"' | '#' | '\''));
    if !needs_quoting {
        return token.to_string();
    }
    let mut out = String::with_capacity(token.len() + 2);
    out.push('"');
    for c in token.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
