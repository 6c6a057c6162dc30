// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
};

/// The dispatcher's shared fallback for any path no registered prefix
/// matches.
pub struct NotFoundHandler;

impl RequestHandler for NotFoundHandler {
    fn handle(&self, _request: &HttpRequest) -> HttpResponse {
        HttpResponse::with_text_body(404, "Not Found")
    }
}
