// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::session::context::SessionContext;

/// An ordered, case-preserving list of header name/value pairs.
///
/// A `Vec` rather than a map: the wire protocol allows repeated header names
/// (`Set-Cookie` on the response side) and the spec requires request headers
/// to be preserved "as received", including order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderList(Vec<(String, String)>);

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value for `name`, matched case-sensitively as received.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value for `name`, matched case-insensitively (header names are
    /// case-insensitive on the wire even though this type preserves the
    /// bytes as received).
    pub fn get_ci(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replaces every existing entry for `name` with a single new one, or
    /// appends it if `name` is not present. Used by handlers that set a
    /// well-known header (`Content-Type`, `Content-Length`) rather than
    /// emit duplicates.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if let Some(entry) = self.0.iter_mut().find(|(n, _)| n == &name) {
            entry.1 = value.into();
        } else {
            self.0.push((name, value.into()));
        }
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type IntoIter = std::slice::Iter<'a, (String, String)>;
    type Item = &'a (String, String);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A parsed HTTP/1.1 request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Uppercase method token, e.g. `"GET"`.
    pub method: String,
    /// Absolute URI-path, e.g. `"/api/Shoes/3"`.
    pub path: String,
    pub headers: HeaderList,
    pub body: Vec<u8>,
    /// The original bytes the request was parsed from, verbatim.
    pub raw: Vec<u8>,
    pub client_ip: String,
    pub session_context: SessionContext,
}

impl HttpRequest {
    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns a copy of this request with a cleared [`SessionContext`],
    /// used by the session middleware so the inbound request is never
    /// mutated through a shared reference.
    pub fn with_cleared_session(&self) -> Self {
        let mut cloned = self.clone();
        cloned.session_context.clear();
        cloned
    }
}
