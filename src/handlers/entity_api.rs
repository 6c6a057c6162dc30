// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The entity-CRUD handler: `<mount>/<Entity>` and `<mount>/<Entity>/<id>`
//! over an abstract [`BlobStore`], serialized by a handler-local mutex so
//! concurrent creates against the same entity receive distinct ids.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
    storage::{BlobStore, DiskStore},
};

static ENTITY_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([^/]+)(?:/(\d+))?$").expect("valid regex"));

pub struct EntityApi {
    mount: String,
    store: Mutex<Box<dyn BlobStore>>,
}

impl EntityApi {
    pub fn new(mount: impl Into<String>, data_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            mount: mount.into(),
            store: Mutex::new(Box::new(DiskStore::new(data_path))),
        }
    }

    fn relative_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(&self.mount)
    }
}

impl RequestHandler for EntityApi {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let Some(rest) = self.relative_path(&request.path) else {
            return HttpResponse::with_text_body(404, "Not Found");
        };
        let Some(captures) = ENTITY_PATH.captures(rest) else {
            return HttpResponse::with_text_body(404, "Not Found");
        };
        let entity = &captures[1];
        let id = captures.get(2).and_then(|m| m.as_str().parse::<u64>().ok());

        let store = self.store.lock().expect("entity store lock poisoned");

        match (request.method.as_str(), id) {
            ("POST", None) => handle_create(store.as_ref(), entity, &request.body),
            ("GET", Some(id)) => handle_read(store.as_ref(), entity, id),
            ("GET", None) => handle_list(store.as_ref(), entity),
            ("PUT", Some(id)) => handle_update(store.as_ref(), entity, id, &request.body),
            ("DELETE", Some(id)) => handle_delete(store.as_ref(), entity, id),
            _ => HttpResponse::with_text_body(400, "Bad Request"),
        }
    }
}

fn handle_create(store: &dyn BlobStore, entity: &str, body: &[u8]) -> HttpResponse {
    let Ok(id) = store.next_id(entity) else {
        return HttpResponse::with_text_body(500, "Internal Server Error");
    };
    match store.write(entity, id, body) {
        Ok(()) => HttpResponse::with_json_body(
            201,
            serde_json::to_vec(&json!({ "id": id })).expect("serialize id"),
        ),
        Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
    }
}

fn handle_read(store: &dyn BlobStore, entity: &str, id: u64) -> HttpResponse {
    match store.read(entity, id) {
        Ok(Some(bytes)) => {
            let mut resp = HttpResponse::new(200);
            resp.headers.set("Content-Type", "application/json");
            resp.set_body(bytes);
            resp
        },
        Ok(None) => HttpResponse::with_text_body(404, "Not Found"),
        Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
    }
}

fn handle_list(store: &dyn BlobStore, entity: &str) -> HttpResponse {
    match store.list(entity) {
        Ok(Some(ids)) => HttpResponse::with_json_body(
            200,
            serde_json::to_vec(&json!({ "id": ids })).expect("serialize ids"),
        ),
        Ok(None) => HttpResponse::with_text_body(404, "Not Found"),
        Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
    }
}

fn handle_update(store: &dyn BlobStore, entity: &str, id: u64, body: &[u8]) -> HttpResponse {
    if serde_json::from_slice::<serde_json::Value>(body).is_err() {
        return HttpResponse::with_text_body(400, "Bad Request");
    }
    match store.write(entity, id, body) {
        Ok(()) => HttpResponse::with_json_body(
            200,
            serde_json::to_vec(&json!({ "success": true, "id": id })).expect("serialize"),
        ),
        Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
    }
}

fn handle_delete(store: &dyn BlobStore, entity: &str, id: u64) -> HttpResponse {
    match store.read(entity, id) {
        Ok(Some(_)) => {},
        Ok(None) => return HttpResponse::with_text_body(404, "Not Found"),
        Err(_) => return HttpResponse::with_text_body(500, "Internal Server Error"),
    }
    match store.remove(entity, id) {
        Ok(()) => HttpResponse::with_json_body(
            200,
            serde_json::to_vec(&json!({ "success": true })).expect("serialize"),
        ),
        Err(_) => HttpResponse::with_text_body(500, "Internal Server Error"),
    }
}
