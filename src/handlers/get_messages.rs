// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! Lists posted messages by enumerating the messages directory through a
//! [`BlobStore`], grounded in `original_source/src/get_messages_handler.cc`:
//! a `None` store (no `messages_path` configured for this route) always
//! answers 500, the way the original's `store_ == nullptr` check does,
//! before the method or path is even inspected.

use std::path::PathBuf;

use serde_json::Value;

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
    storage::{BlobStore, MessageFileStore},
};

pub struct GetMessagesHandler {
    mount: String,
    store: Option<Box<dyn BlobStore>>,
}

impl GetMessagesHandler {
    pub fn new(mount: impl Into<String>, messages_path: Option<PathBuf>) -> Self {
        Self {
            mount: mount.into(),
            store: messages_path.map(|path| Box::new(MessageFileStore::new(path)) as Box<dyn BlobStore>),
        }
    }
}

impl RequestHandler for GetMessagesHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let Some(store) = &self.store else {
            return HttpResponse::with_text_body(500, "Internal Server Error");
        };

        if request.method != "GET" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "GET");
            return resp;
        }
        if request.path.strip_prefix(self.mount.as_str()) != Some("") {
            return HttpResponse::with_text_body(404, "Not Found");
        }

        let ids = match store.list("") {
            Ok(Some(ids)) => ids,
            Ok(None) => Vec::new(),
            Err(_) => return HttpResponse::with_text_body(500, "Internal Server Error"),
        };

        let mut messages: Vec<Value> = Vec::with_capacity(ids.len());
        for id in ids {
            let Ok(Some(bytes)) = store.read("", id) else {
                continue;
            };
            if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
                messages.push(value);
            }
        }
        messages.sort_by(|a, b| timestamp_of(a).cmp(timestamp_of(b)));

        HttpResponse::with_json_body(
            200,
            serde_json::to_vec(&messages).expect("serialize messages"),
        )
    }
}

fn timestamp_of(message: &Value) -> &str {
    message.get("timestamp").and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::session::SessionContext;

    fn req(method: &str, path: &str) -> HttpRequest {
        HttpRequest {
            method: method.to_string(),
            path: path.to_string(),
            headers: Default::default(),
            body: Vec::new(),
            raw: Vec::new(),
            client_ip: "unknown".to_string(),
            session_context: SessionContext::default(),
        }
    }

    fn write_message(dir: &std::path::Path, id: u64, username: &str, content: &str, timestamp: &str) {
        let body = serde_json::json!({ "username": username, "content": content, "timestamp": timestamp });
        fs::write(dir.join(format!("{id}.json")), serde_json::to_vec(&body).expect("serialize"))
            .expect("write message file");
    }

    #[test]
    fn lists_messages_sorted_by_timestamp_regardless_of_file_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_message(dir.path(), 1, "alice", "second", "2024-01-01T00:00:02Z");
        write_message(dir.path(), 2, "alice", "first", "2024-01-01T00:00:01Z");

        let handler = GetMessagesHandler::new("/messages", Some(dir.path().to_path_buf()));
        let resp = handler.handle(&req("GET", "/messages"));
        assert_eq!(resp.status_code, 200);
        let body: Vec<Value> = serde_json::from_slice(&resp.body).expect("json body");
        let contents: Vec<&str> = body.iter().map(|m| m["content"].as_str().expect("content")).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn skips_malformed_files_and_keeps_the_rest() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("1.json"), b"not json").expect("write");
        write_message(dir.path(), 2, "bob", "hi", "2024-01-01T00:00:00Z");

        let handler = GetMessagesHandler::new("/messages", Some(dir.path().to_path_buf()));
        let resp = handler.handle(&req("GET", "/messages"));
        assert_eq!(resp.status_code, 200);
        let body: Vec<Value> = serde_json::from_slice(&resp.body).expect("json body");
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn an_empty_directory_returns_an_empty_array() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(dir.path()).expect("mkdir");
        let handler = GetMessagesHandler::new("/messages", Some(dir.path().to_path_buf()));
        let resp = handler.handle(&req("GET", "/messages"));
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, b"[]");
    }

    #[test]
    fn mismatched_path_is_404() {
        let dir = tempfile::tempdir().expect("temp dir");
        let handler = GetMessagesHandler::new("/messages", Some(dir.path().to_path_buf()));
        let resp = handler.handle(&req("GET", "/messages/extra"));
        assert_eq!(resp.status_code, 404);
    }

    #[test]
    fn non_get_is_405() {
        let dir = tempfile::tempdir().expect("temp dir");
        let handler = GetMessagesHandler::new("/messages", Some(dir.path().to_path_buf()));
        let resp = handler.handle(&req("POST", "/messages"));
        assert_eq!(resp.status_code, 405);
        assert_eq!(resp.headers.get("Allow"), Some("GET"));
    }

    #[test]
    fn an_unconfigured_store_is_500() {
        let handler = GetMessagesHandler::new("/messages", None);
        let resp = handler.handle(&req("GET", "/messages"));
        assert_eq!(resp.status_code, 500);
    }
}
