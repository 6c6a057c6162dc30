// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{path::PathBuf, sync::Arc};

use serde::Deserialize;

use crate::{
    http::{HttpRequest, HttpResponse},
    messages::MessageLog,
    registry::RequestHandler,
};

#[derive(Deserialize)]
struct PostMessageBody {
    content: String,
}

pub struct PostMessageHandler {
    messages_path: PathBuf,
    log: Arc<MessageLog>,
}

impl PostMessageHandler {
    pub fn new(messages_path: impl Into<PathBuf>, log: Arc<MessageLog>) -> Self {
        Self {
            messages_path: messages_path.into(),
            log,
        }
    }
}

impl RequestHandler for PostMessageHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.method != "POST" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "POST");
            return resp;
        }
        let Some(user_id) = &request.session_context.user_id else {
            return HttpResponse::with_text_body(401, "Unauthorized");
        };
        let Ok(body) = serde_json::from_slice::<PostMessageBody>(&request.body) else {
            return HttpResponse::with_text_body(400, "Bad Request");
        };

        self.log.add(user_id.clone(), body.content);
        if self.log.persist_to_directory(&self.messages_path).is_err() {
            return HttpResponse::with_text_body(500, "Internal Server Error");
        }
        HttpResponse::with_text_body(201, "Created")
    }
}
