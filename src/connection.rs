// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The per-connection session: read → parse → dispatch → respond → close.
//!
//! Grounded in the shape of the teacher's `ClientConnection` (an async task
//! over a `TcpStream`, `AsyncReadExt`/`AsyncWriteExt` framing, a read that
//! tolerates the peer going away) but drastically simpler: one request is
//! read, dispatched, and answered, then the socket is shut down in both
//! directions. No PDU demultiplexing, no keep-alive.

use std::sync::Arc;

use anyhow::Result;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::debug;

use crate::{
    handlers::session_middleware::SessionMiddleware,
    http::{
        parser::{MAX_REQUEST_LEN, RequestParser},
        response::HttpResponse,
    },
    registry::Dispatcher,
};

/// Reads one request, dispatches it through the session middleware, writes
/// one response, then shuts the socket down for both directions. A
/// connection that reads zero bytes is closed silently.
pub async fn handle_connection(
    mut stream: TcpStream,
    dispatcher: Arc<Dispatcher>,
    session_middleware: Arc<SessionMiddleware>,
) -> Result<()> {
    let client_ip = stream
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    let mut buf = vec![0u8; MAX_REQUEST_LEN];
    let n = stream.read(&mut buf).await?;
    if n == 0 {
        return Ok(());
    }
    buf.truncate(n);

    let response = match RequestParser::parse(&buf, &client_ip) {
        Ok(request) => {
            let handler = dispatcher.dispatch(&request.path);
            session_middleware.wrap(handler.as_ref(), &request)
        },
        Err(e) => {
            debug!("request parse failed: {e}");
            HttpResponse::with_text_body(400, "Bad Request")
        },
    };

    stream.write_all(&response.serialize()).await?;
    stream.shutdown().await?;
    Ok(())
}
