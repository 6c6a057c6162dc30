// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::{Context, Result};
use httpd_rs::{
    cfg::http_config::{ConfigParser, routes_from_ast},
    handlers::{SharedState, not_found::NotFoundHandler, register_all_handlers, session_middleware::SessionMiddleware},
    messages::MessageLog,
    registry::{Dispatcher, HandlerRegistry},
    session::SessionStore,
    users::UserStore,
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

/// Parses `config_text`, builds the full handler/dispatcher graph rooted at
/// `data_root`, and serves it on an ephemeral loopback port. Returns the
/// bound address; the acceptor loop runs for the remainder of the test
/// process (tests do not tear it down explicitly, mirroring how the
/// teacher's integration suite dials a single long-lived target).
pub async fn spawn_server(config_text: &str, data_root: &Path) -> Result<SocketAddr> {
    let ast = ConfigParser::parse(config_text.as_bytes()).context("parse config")?;
    let parsed = routes_from_ast(&ast).context("extract routes")?;

    let session_store = Arc::new(SessionStore::new());
    let message_log = Arc::new(MessageLog::new());
    let user_store = Arc::new(UserStore::new(data_root.join("users.json")));

    let shared = SharedState {
        session_store: Arc::clone(&session_store),
        message_log: Arc::clone(&message_log),
        user_store: Arc::clone(&user_store),
    };

    let mut registry = HandlerRegistry::new();
    register_all_handlers(&mut registry, &shared);

    let mut dispatcher = Dispatcher::new(Arc::new(NotFoundHandler));
    for route in &parsed.routes {
        let handler = registry
            .build(&route.handler_name, &route.args)
            .with_context(|| format!("unknown handler {:?}", route.handler_name))?;
        dispatcher.add_route(route.prefix.clone(), Arc::from(handler));
    }
    let dispatcher = Arc::new(dispatcher);
    let session_middleware = Arc::new(SessionMiddleware::new(session_store));

    let listener = TcpListener::bind("127.0.0.1:0").await.context("bind")?;
    let addr = listener.local_addr().context("local_addr")?;

    tokio::spawn(async move {
        loop {
            let Ok((stream, _peer)) = listener.accept().await else {
                return;
            };
            let dispatcher = Arc::clone(&dispatcher);
            let session_middleware = Arc::clone(&session_middleware);
            tokio::spawn(async move {
                let _ = httpd_rs::connection::handle_connection(
                    stream,
                    dispatcher,
                    session_middleware,
                )
                .await;
            });
        }
    });

    Ok(addr)
}

/// Sends `request` over a fresh TCP connection to `addr` and reads the
/// response until the peer closes its end (the server shuts down after
/// exactly one response, so a read-to-end is always complete).
pub async fn send_request(addr: SocketAddr, request: &[u8]) -> Result<Vec<u8>> {
    let mut stream = TcpStream::connect(addr).await.context("connect")?;
    stream.write_all(request).await.context("write request")?;
    stream.shutdown().await.ok();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.context("read response")?;
    Ok(response)
}

/// Splits a raw HTTP/1.1 response into `(status_code, headers_text, body)`.
pub fn split_response(raw: &[u8]) -> (u16, String, Vec<u8>) {
    let text = raw;
    let head_end = text
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .unwrap_or(text.len());
    let head = String::from_utf8_lossy(&text[..head_end]).to_string();
    let body = if head_end + 4 <= text.len() { text[head_end + 4..].to_vec() } else { Vec::new() };
    let status_code = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .unwrap_or(0);
    (status_code, head, body)
}
