// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Composes [`PostMessageHandler`] and [`GetMessagesHandler`] behind a
//! single registry entry.
//!
//! The routing table's prefixes are pairwise distinct (§3 `Route`
//! invariant), so `POST <mount>` and `GET <mount>` cannot be two separate
//! `location` statements sharing one prefix. This handler is the single
//! route mounted at `<mount>`; it dispatches to the posting or listing
//! logic by method, the same shape `EntityApi` uses to fan a single mount
//! out across `POST`/`GET`/`PUT`/`DELETE`.

use std::sync::Arc;

use crate::{
    handlers::{get_messages::GetMessagesHandler, post_message::PostMessageHandler},
    http::{HttpRequest, HttpResponse},
    messages::MessageLog,
    registry::RequestHandler,
};

pub struct MessagesHandler {
    post: PostMessageHandler,
    get: GetMessagesHandler,
}

impl MessagesHandler {
    pub fn new(
        mount: impl Into<String>,
        messages_path: impl Into<std::path::PathBuf>,
        log: Arc<MessageLog>,
    ) -> Self {
        let mount = mount.into();
        let messages_path = messages_path.into();
        Self {
            post: PostMessageHandler::new(messages_path.clone(), log),
            get: GetMessagesHandler::new(mount, Some(messages_path)),
        }
    }
}

impl RequestHandler for MessagesHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match request.method.as_str() {
            "POST" => self.post.handle(request),
            "GET" => self.get.handle(request),
            _ => {
                let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
                resp.push_header("Allow", "GET, POST");
                resp
            },
        }
    }
}
