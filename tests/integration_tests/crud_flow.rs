// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::integration_tests::common::{send_request, spawn_server, split_response};

fn config(data_path: &std::path::Path) -> String {
    format!(
        "listen 0;\nlocation /api ApiHandler {{ mount /api; data_path {}; }}\n",
        data_path.display()
    )
}

#[tokio::test]
async fn posting_then_reading_an_entity_round_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(dir.path());
    let addr = spawn_server(&config, dir.path()).await.expect("spawn server");

    let body = br#"{"name":"sneaker"}"#;
    let request = format!(
        "POST /api/Shoes HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\n\r\n",
        body.len()
    );
    let mut raw_request = request.into_bytes();
    raw_request.extend_from_slice(body);

    let raw = send_request(addr, &raw_request).await.expect("post");
    let (status, _head, post_body) = split_response(&raw);
    assert_eq!(status, 201);
    assert!(String::from_utf8_lossy(&post_body).contains("\"id\":0"));

    let raw = send_request(addr, b"GET /api/Shoes/0 HTTP/1.1\r\nHost: x\r\n\r\n")
        .await
        .expect("get");
    let (status, _head, get_body) = split_response(&raw);
    assert_eq!(status, 200);
    assert_eq!(get_body, body);
}

#[tokio::test]
async fn reading_an_entity_with_no_directory_is_404() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(dir.path());
    let addr = spawn_server(&config, dir.path()).await.expect("spawn server");

    let raw = send_request(addr, b"GET /api/Widgets/99 HTTP/1.1\r\nHost: x\r\n\r\n")
        .await
        .expect("get");
    let (status, _head, _body) = split_response(&raw);
    assert_eq!(status, 404);
}
