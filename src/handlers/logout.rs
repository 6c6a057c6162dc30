// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
};

/// Always succeeds; the session middleware does the actual invalidation
/// and cookie-clearing once it sees a `/logout` path.
pub struct LogoutHandler;

impl RequestHandler for LogoutHandler {
    fn handle(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::with_text_body(200, "Logged out")
    }
}
