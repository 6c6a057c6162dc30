// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
};

/// Returns the exact bytes the request was parsed from.
pub struct EchoHandler;

impl RequestHandler for EchoHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut resp = HttpResponse::new(200);
        resp.headers.set("Content-Type", "text/plain");
        resp.set_body(request.raw.clone());
        resp
    }
}
