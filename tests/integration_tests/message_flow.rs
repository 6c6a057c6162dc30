// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use crate::integration_tests::common::{send_request, spawn_server, split_response};

fn config(messages_path: &std::path::Path) -> String {
    format!(
        "listen 0;\nlocation /messages MessagesHandler {{ mount /messages; messages_path {}; }}\nlocation /register RegisterHandler {{}}\nlocation /login LoginHandler {{}}\n",
        messages_path.display()
    )
}

fn post_message(body: &str, token: &str) -> Vec<u8> {
    let request = format!(
        "POST /messages HTTP/1.1\r\nHost: x\r\nCookie: session={token}\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    );
    request.into_bytes()
}

#[tokio::test]
async fn two_posts_then_a_listing_return_both_in_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = config(&dir.path().join("messages"));
    let addr = spawn_server(&config, dir.path()).await.expect("spawn server");

    // The session middleware looks up the cookie token against a live
    // session before it populates `user_id`; without a registered session
    // this token resolves to no user and the handler would answer 401, so
    // the flow logs in through the real handler chain first.
    let register = br#"{"username":"alice","password":"secret"}"#;
    let request = format!(
        "POST /register HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\n\r\n",
        register.len()
    );
    let mut raw = request.into_bytes();
    raw.extend_from_slice(register);
    let raw = send_request(addr, &raw).await.expect("register");
    let (status, ..) = split_response(&raw);
    assert_eq!(status, 200);

    let login_body = br#"{"username":"alice","password":"secret"}"#;
    let request = format!(
        "POST /login HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\n\r\n",
        login_body.len()
    );
    let mut raw = request.into_bytes();
    raw.extend_from_slice(login_body);
    let raw = send_request(addr, &raw).await.expect("login");
    let (status, head, _body) = split_response(&raw);
    assert_eq!(status, 200);
    let cookie = head
        .lines()
        .find_map(|line| line.strip_prefix("Set-Cookie: "))
        .expect("set-cookie header");
    let token = cookie
        .strip_prefix("session=")
        .and_then(|rest| rest.split(';').next())
        .expect("token")
        .to_string();

    let raw = send_request(addr, &post_message(r#"{"content":"a"}"#, &token))
        .await
        .expect("post a");
    assert_eq!(split_response(&raw).0, 201);
    let raw = send_request(addr, &post_message(r#"{"content":"b"}"#, &token))
        .await
        .expect("post b");
    assert_eq!(split_response(&raw).0, 201);

    let raw = send_request(addr, b"GET /messages HTTP/1.1\r\nHost: x\r\n\r\n")
        .await
        .expect("list");
    let (status, _head, body) = split_response(&raw);
    assert_eq!(status, 200);
    let parsed: serde_json::Value = serde_json::from_slice(&body).expect("json");
    let contents: Vec<&str> = parsed
        .as_array()
        .expect("array")
        .iter()
        .map(|m| m["content"].as_str().expect("content"))
        .collect();
    assert_eq!(contents, vec!["a", "b"]);
}
