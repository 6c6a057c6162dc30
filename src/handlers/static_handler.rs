// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! A minimal static-file handler. Out of scope for detailed semantics per
//! the purpose statement; implemented only as far as the external
//! interface requires — serve a file under `root` named by the request
//! path, or 404.

use std::path::{Path, PathBuf};

use crate::{
    http::{HttpRequest, HttpResponse},
    registry::RequestHandler,
};

pub struct StaticHandler {
    root: PathBuf,
}

impl StaticHandler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let relative = path.trim_start_matches('/');
        self.root.join(relative)
    }
}

impl RequestHandler for StaticHandler {
    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        if request.method != "GET" {
            let mut resp = HttpResponse::with_text_body(405, "Method Not Allowed");
            resp.push_header("Allow", "GET");
            return resp;
        }

        let target = self.resolve(&request.path);
        if !is_within_root(&self.root, &target) {
            return HttpResponse::with_text_body(404, "Not Found");
        }

        match std::fs::read(&target) {
            Ok(bytes) => {
                let mut resp = HttpResponse::new(200);
                resp.headers.set("Content-Type", guess_content_type(&target));
                resp.set_body(bytes);
                resp
            },
            Err(_) => HttpResponse::with_text_body(404, "Not Found"),
        }
    }
}

/// Rejects `..`-escapes out of `root` before touching the filesystem.
fn is_within_root(root: &Path, target: &Path) -> bool {
    !target
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
        && target.starts_with(root)
}

fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
