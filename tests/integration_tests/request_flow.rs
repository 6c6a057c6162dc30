// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::integration_tests::common::{send_request, spawn_server, split_response};

const CONFIG: &str = "listen 0;\nlocation /echo EchoHandler {}\n";

#[tokio::test]
async fn a_well_formed_request_is_echoed_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let addr = spawn_server(CONFIG, dir.path()).await.expect("spawn server");

    let raw = send_request(addr, b"GET /echo HTTP/1.1\r\nHost: x\r\n\r\n")
        .await
        .expect("request");
    let (status, _head, body) = split_response(&raw);
    assert_eq!(status, 200);
    assert_eq!(body, b"GET /echo HTTP/1.1\r\nHost: x\r\n\r\n");
}

#[tokio::test]
async fn a_malformed_request_line_gets_a_400() {
    let dir = tempfile::tempdir().expect("temp dir");
    let addr = spawn_server(CONFIG, dir.path()).await.expect("spawn server");

    let raw = send_request(addr, b"BAD /x\r\n\r\n").await.expect("request");
    let (status, _head, body) = split_response(&raw);
    assert_eq!(status, 400);
    assert_eq!(body, b"Bad Request");
}

#[tokio::test]
async fn an_unmatched_path_falls_back_to_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let addr = spawn_server(CONFIG, dir.path()).await.expect("spawn server");

    let raw = send_request(addr, b"GET /nowhere HTTP/1.1\r\n\r\n")
        .await
        .expect("request");
    let (status, _head, _body) = split_response(&raw);
    assert_eq!(status, 404);
}

#[tokio::test]
async fn the_server_refuses_to_start_with_a_duplicate_prefix() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = "listen 0;\nlocation /echo EchoHandler {}\nlocation /echo EchoHandler {}\n";
    assert!(spawn_server(config, dir.path()).await.is_err());
}
