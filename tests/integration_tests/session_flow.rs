// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::integration_tests::common::{send_request, spawn_server, split_response};

fn config(messages_path: &std::path::Path) -> String {
    format!(
        "listen 0;\nlocation /messages MessagesHandler {{ mount /messages; messages_path {}; }}\nlocation /register RegisterHandler {{}}\nlocation /login LoginHandler {{}}\nlocation /logout LogoutHandler {{}}\n",
        messages_path.display()
    )
}

async fn post(addr: std::net::SocketAddr, path: &str, body: &[u8], cookie: Option<&str>) -> (u16, String, Vec<u8>) {
    let cookie_line = cookie.map(|c| format!("Cookie: session={c}\r\n")).unwrap_or_default();
    let request = format!(
        "POST {path} HTTP/1.1\r\nHost: x\r\n{cookie_line}Content-Length: {}\r\n\r\n",
        body.len()
    );
    let mut raw = request.into_bytes();
    raw.extend_from_slice(body);
    let raw = send_request(addr, &raw).await.expect("request");
    split_response(&raw)
}

fn cookie_token(head: &str) -> String {
    head.lines()
        .find_map(|line| line.strip_prefix("Set-Cookie: "))
        .and_then(|cookie| cookie.strip_prefix("session="))
        .and_then(|rest| rest.split(';').next())
        .expect("session cookie")
        .to_string()
}

#[tokio::test]
async fn login_then_authenticated_posting_then_logout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(&dir.path().join("messages"));
    let addr = spawn_server(&config, dir.path()).await.expect("spawn server");

    let (status, ..) = post(
        addr,
        "/register",
        br#"{"username":"alice","password":"secret"}"#,
        None,
    )
    .await;
    assert_eq!(status, 200);

    let (status, head, body) = post(
        addr,
        "/login",
        br#"{"username":"alice","password":"secret"}"#,
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, b"alice");
    let token = cookie_token(&head);

    let (status, ..) = post(addr, "/messages", br#"{"content":"hi"}"#, Some(&token)).await;
    assert_eq!(status, 201);

    let (status, ..) = post(addr, "/messages", br#"{"content":"hi"}"#, None).await;
    assert_eq!(status, 401);

    let (status, head, ..) = post(addr, "/logout", b"", Some(&token)).await;
    assert_eq!(status, 200);
    assert!(head.contains("Max-Age=0"));

    let (status, ..) = post(addr, "/messages", br#"{"content":"hi"}"#, Some(&token)).await;
    assert_eq!(status, 401);
}
