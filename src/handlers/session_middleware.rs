// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Wraps whatever handler the dispatcher selects: reads the inbound
//! session token, populates the request's [`SessionContext`], and
//! rewrites the outbound response to set/clear the session cookie on
//! `/login`/`/logout`. Applied to every request, not registered as a named
//! handler.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
    session::SessionStore,
};

static COOKIE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"session=([^;]+)").expect("valid regex"));

const BEARER_PREFIX: &str = "Bearer ";

pub struct SessionMiddleware {
    sessions: Arc<SessionStore>,
}

impl SessionMiddleware {
    pub fn new(sessions: Arc<SessionStore>) -> Self {
        Self { sessions }
    }

    fn extract_token(request: &HttpRequest) -> Option<String> {
        if let Some(cookie) = request.headers.get_ci("Cookie")
            && let Some(captures) = COOKIE_TOKEN.captures(cookie)
        {
            return Some(captures[1].to_string());
        }
        request
            .headers
            .get_ci("Authorization")
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .map(str::to_string)
    }

    /// Runs `inner` with a session-populated copy of `request`, then
    /// post-processes the response per the `/login`/`/logout` rules.
    pub fn wrap(&self, inner: &dyn RequestHandler, request: &HttpRequest) -> HttpResponse {
        let mut scoped = request.with_cleared_session();
        let token = Self::extract_token(request);

        if let Some(token) = &token
            && let Some(record) = self.sessions.get_session(token)
        {
            scoped.session_context.session_token = Some(token.clone());
            scoped.session_context.user_id = Some(record.user_id);
            scoped.session_context.data = record.data;
        }

        let mut response = inner.handle(&scoped);

        if request.path == "/login" && response.status_code == 200 {
            let user_id = String::from_utf8_lossy(&response.body).to_string();
            let new_token = self.sessions.create_session(user_id);
            response.push_header(
                "Set-Cookie",
                format!("session={new_token}; HttpOnly; Path=/;"),
            );
        } else if request.path == "/logout" {
            if let Some(token) = &token {
                self.sessions.invalidate_session(token);
            }
            response.push_header("Set-Cookie", "session=; HttpOnly; Path=/; Max-Age=0");
        }

        response
    }
}
