// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
};

/// The health probe endpoint. GET-only; always reports healthy once the
/// server has accepted the connection.
pub struct HealthHandler;

impl RequestHandler for HealthHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.method != "GET" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "GET");
            return resp;
        }
        HttpResponse::with_text_body(200, "OK")
    }
}
