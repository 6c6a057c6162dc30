// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
    users::UserStore,
};

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

/// Returns the username as the body on success; the session middleware
/// reads that body to mint a session, so no cookies are set here.
pub struct LoginHandler {
    users: Arc<UserStore>,
}

impl LoginHandler {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }
}

impl RequestHandler for LoginHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.method != "POST" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "POST");
            return resp;
        }

        let Ok(body) = serde_json::from_slice::<LoginBody>(&request.body) else {
            return HttpResponse::with_text_body(400, "Bad Request");
        };

        match self.users.verify(&body.username, &body.password) {
            Ok(true) => {
                debug!(username = %body.username, "login succeeded");
                HttpResponse::with_text_body(200, body.username)
            },
            Ok(false) => HttpResponse::with_text_body(401, "Unauthorized"),
            Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
        }
    }
}
