// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
    users::UserStore,
};

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    password: String,
}

pub struct RegisterHandler {
    users: Arc<UserStore>,
}

impl RegisterHandler {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }
}

impl RequestHandler for RegisterHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.method != "POST" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "POST");
            return resp;
        }

        let Ok(body) = serde_json::from_slice::<RegisterBody>(&request.body) else {
            return HttpResponse::with_text_body(400, "Bad Request");
        };

        match self.users.register(&body.username, &body.password) {
            Ok(Ok(())) => {
                info!(username = %body.username, "registered new user");
                HttpResponse::with_text_body(200, "Registration successful")
            },
            Ok(Err(())) => HttpResponse::with_text_body(400, "Bad Request"),
            Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
        }
    }
}
