// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::http::request::HeaderList;

/// An HTTP/1.1 response under construction by a handler.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HeaderList,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HeaderList::new(),
            body: Vec::new(),
        }
    }

    pub fn with_text_body(status_code: u16, body: impl Into<String>) -> Self {
        let body = body.into().into_bytes();
        let mut resp = Self::new(status_code);
        resp.headers.set("Content-Type", "text/plain");
        resp.finalize_content_length(body);
        resp
    }

    pub fn with_json_body(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        let mut resp = Self::new(status_code);
        resp.headers.set("Content-Type", "application/json");
        resp.finalize_content_length(body.into());
        resp
    }

    /// Sets `body` and, when non-empty, stamps an accurate `Content-Length`
    /// per the response invariant in the data model.
    fn finalize_content_length(&mut self, body: Vec<u8>) {
        if !body.is_empty() {
            self.headers.set("Content-Length", body.len().to_string());
        }
        self.body = body;
    }

    pub fn set_body(&mut self, body: Vec<u8>) {
        self.finalize_content_length(body);
    }

    pub fn push_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push(name, value);
    }

    pub fn reason_phrase(code: u16) -> &'static str {
        match code {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    /// Serializes the response as `HTTP/1.1 <code> <reason>\r\n<headers>\r\n\r\n<body>`,
    /// ensuring `Content-Length` is present and accurate regardless of
    /// whether the handler set it.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(128 + self.body.len());
        out.extend_from_slice(
            format!(
                "HTTP/1.1 {} {}\r\n",
                self.status_code,
                Self::reason_phrase(self.status_code)
            )
            .as_bytes(),
        );

        let has_content_length = self.headers.get_ci("Content-Length").is_some();
        for (name, value) in self.headers.iter() {
            out.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
        }
        if !has_content_length {
            out.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(&self.body);
        out
    }
}
