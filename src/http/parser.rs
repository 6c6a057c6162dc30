// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The hand-written HTTP/1.1 request-head parser.
//!
//! Splits a raw byte buffer on the first `CRLF CRLF`, parses the request
//! line (`METHOD SP PATH SP VERSION`), then parses `Name: Value` header
//! lines until a blank line or the end of the head. No chunked encoding, no
//! multi-request pipelining: this is run once per accepted connection.

use crate::{
    error::RequestParseError,
    http::request::{HeaderList, HttpRequest},
    session::context::SessionContext,
};

/// Requests larger than this are rejected before parsing is attempted; the
/// spec requires only that the limit be at least 8 KiB.
pub const MAX_REQUEST_LEN: usize = 64 * 1024;

pub struct RequestParser;

impl RequestParser {
    /// Parses `buf` into an [`HttpRequest`], preserving `buf` verbatim in
    /// `raw` and recording `client_ip` as provided by the caller.
    pub fn parse(buf: &[u8], client_ip: &str) -> Result<HttpRequest, RequestParseError> {
        let head_end = find_crlf_crlf(buf);
        let (head, body) = match head_end {
            Some(idx) => (&buf[..idx], &buf[idx + 4..]),
            None => (buf, &buf[buf.len()..]),
        };

        let mut lines = head.split(|&b| b == b'\n');
        let request_line = lines.next().unwrap_or(&[]);
        let request_line = strip_cr(request_line);
        let (method, path, version) = parse_request_line(request_line)?;

        if !version.starts_with("HTTP/") {
            return Err(RequestParseError::UnsupportedVersion(version));
        }

        let mut headers = HeaderList::new();
        for line in lines {
            let line = strip_cr(line);
            if line.is_empty() {
                break;
            }
            let Some(colon) = line.find(':') else {
                continue;
            };
            let name = &line[..colon];
            let mut value = &line[colon + 1..];
            if let Some(stripped) = value.strip_prefix(' ') {
                value = stripped;
            }
            headers.push(name, value);
        }

        Ok(HttpRequest {
            method,
            path,
            headers,
            body: body.to_vec(),
            raw: buf.to_vec(),
            client_ip: client_ip.to_string(),
            session_context: SessionContext::default(),
        })
    }
}

fn find_crlf_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn strip_cr(line: &[u8]) -> &str {
    let line = if line.last() == Some(&b'\r') {
        &line[..line.len() - 1]
    } else {
        line
    };
    std::str::from_utf8(line).unwrap_or("")
}

fn parse_request_line(line: &str) -> Result<(String, String, String), RequestParseError> {
    let mut parts = line.split(' ').filter(|s| !s.is_empty());
    let method = parts.next();
    let path = parts.next();
    let version = parts.next();
    match (method, path, version) {
        (Some(m), Some(p), Some(v)) => Ok((m.to_string(), p.to_string(), v.to_string())),
        _ => Err(RequestParseError::MalformedRequestLine),
    }
}
