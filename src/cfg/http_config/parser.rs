// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The recursive-descent config parser. Any lexical or structural error
//! aborts parsing; there is no partial AST.

use crate::{
    cfg::http_config::{
        ast::{ConfigAst, Statement},
        lexer::{LexToken, Lexer},
    },
    error::ConfigError,
};

pub struct ConfigParser;

impl ConfigParser {
    pub fn parse(input: &[u8]) -> Result<ConfigAst, ConfigError> {
        let mut lexer = Lexer::new(input);
        parse_block(&mut lexer, true)
    }
}

fn parse_block(lexer: &mut Lexer<'_>, is_top: bool) -> Result<ConfigAst, ConfigError> {
    let mut ast = ConfigAst::new();
    let mut current: Vec<String> = Vec::new();
    // Mirrors "previous token was ';', '}', or '{'"; true on entry since we
    // just consumed the block's opening delimiter (or, at the top level,
    // have consumed nothing yet — the empty-input case).
    let mut prev_closer = true;

    loop {
        let pos = lexer.position();
        match lexer.next_token()? {
            LexToken::Token(t) => {
                current.push(t);
                prev_closer = false;
            },
            LexToken::StatementEnd => {
                if current.is_empty() {
                    return Err(ConfigError::UnexpectedStatementEnd(pos));
                }
                ast.statements.push(Statement {
                    tokens: std::mem::take(&mut current),
                    child: None,
                });
                prev_closer = true;
            },
            LexToken::BlockStart => {
                if current.is_empty() {
                    return Err(ConfigError::UnexpectedBlockStart(pos));
                }
                let child = parse_block(lexer, false)?;
                ast.statements.push(Statement {
                    tokens: std::mem::take(&mut current),
                    child: Some(child),
                });
                prev_closer = true;
            },
            LexToken::BlockEnd => {
                if is_top {
                    return Err(ConfigError::UnexpectedBlockEnd(pos));
                }
                if !current.is_empty() || !prev_closer {
                    return Err(ConfigError::UnexpectedBlockEnd(pos));
                }
                return Ok(ast);
            },
            LexToken::Eof => {
                if !is_top {
                    return Err(ConfigError::UnexpectedEof);
                }
                if !current.is_empty() || (!prev_closer && !ast.statements.is_empty()) {
                    return Err(ConfigError::UnexpectedEof);
                }
                return Ok(ast);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_example_config() {
        let ast = ConfigParser::parse(
            b"listen 8080;\nlocation /echo EchoHandler {}\n\
              location /static StaticHandler { root ./files; }",
        )
        .expect("valid config should parse");
        assert_eq!(ast.statements.len(), 3);
        assert_eq!(ast.statements[0].tokens, vec!["listen", "8080"]);
        assert_eq!(
            ast.statements[2].tokens,
            vec!["location", "/static", "StaticHandler"]
        );
        let child = ast.statements[2].child.as_ref().expect("has a block");
        assert_eq!(child.statements[0].tokens, vec!["root", "./files"]);
    }

    #[test]
    fn empty_input_is_valid() {
        let ast = ConfigParser::parse(b"").expect("empty input parses");
        assert!(ast.statements.is_empty());
    }

    #[test]
    fn rejects_a_semicolon_with_no_preceding_token() {
        let err = ConfigParser::parse(b";").unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedStatementEnd(_)));
    }

    #[test]
    fn rejects_an_unmatched_closing_brace() {
        let err = ConfigParser::parse(b"}").unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedBlockEnd(_)));
    }

    #[test]
    fn rejects_a_dangling_token_before_end_of_input() {
        let err = ConfigParser::parse(b"listen 8080").unwrap_err();
        assert!(matches!(err, ConfigError::UnexpectedEof));
    }

    #[test]
    fn round_trips_through_to_config_text() {
        let original =
            b"listen 8080;\nlocation /api ApiHandler { mount /api; data_path ./data; }\n"
                as &[u8];
        let ast = ConfigParser::parse(original).expect("parses");
        let text = ast.to_config_text(0);
        let reparsed = ConfigParser::parse(text.as_bytes()).expect("reparses");
        assert_eq!(ast, reparsed);
    }
}
