// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The error taxonomy mapped onto HTTP outcomes.
//!
//! Handler-level errors never escape a handler: they are converted to an
//! [`crate::http::response::HttpResponse`] at the point of handling. Startup
//! errors (bad config, bind failure) propagate as [`anyhow::Error`] up to
//! `main`.

use thiserror::Error;

/// Lexical/structural/semantic failures while parsing the server config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unterminated quoted token starting at byte {0}")]
    UnterminatedQuote(usize),

    #[error("quoted token at byte {0} must be followed by whitespace or one of ';{{}}'")]
    QuoteNotDelimited(usize),

    #[error("unexpected ';' at byte {0}: no token precedes it")]
    UnexpectedStatementEnd(usize),

    #[error("unexpected '{{' at byte {0}: no token precedes it")]
    UnexpectedBlockStart(usize),

    #[error("unexpected '}}' at byte {0}")]
    UnexpectedBlockEnd(usize),

    #[error("unexpected end of input inside a statement")]
    UnexpectedEof,

    #[error("'listen' statement is missing a port argument")]
    MissingListenPort,

    #[error("invalid port number {0:?}")]
    InvalidPort(String),

    #[error("location prefix {0:?} must not end in '/'")]
    TrailingSlash(String),

    #[error("duplicate location prefix {0:?}")]
    DuplicatePrefix(String),

    #[error("unknown handler {0:?} for location {1:?}")]
    UnknownHandler(String, String),

    #[error("location statement {0:?} is missing a prefix or handler name")]
    MalformedLocation(String),
}

/// Errors surfaced while reading the HTTP/1.1 request head.
#[derive(Debug, Error)]
pub enum RequestParseError {
    #[error("request head is missing the method, path, or version token")]
    MalformedRequestLine,

    #[error("HTTP version token {0:?} does not start with 'HTTP/'")]
    UnsupportedVersion(String),
}
