// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The TCP acceptor: binds the configured port and spawns one
//! [`crate::connection::handle_connection`] task per accepted socket. The
//! tokio multi-thread runtime's worker pool (sized by `main`, default 4) is
//! the "bounded pool of worker threads" the concurrency model calls for; no
//! additional admission control is layered on top.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{connection::handle_connection, handlers::session_middleware::SessionMiddleware, registry::Dispatcher};

pub struct Server {
    listen_port: u16,
    dispatcher: Arc<Dispatcher>,
    session_middleware: Arc<SessionMiddleware>,
}

impl Server {
    pub fn new(
        listen_port: u16,
        dispatcher: Arc<Dispatcher>,
        session_middleware: Arc<SessionMiddleware>,
    ) -> Self {
        Self { listen_port, dispatcher, session_middleware }
    }

    /// Binds the listen port and serves connections until `accept` returns
    /// a fatal error or the process is killed. Each connection is handled
    /// on its own spawned task; a single slow request never blocks the
    /// acceptor or any other in-flight connection.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(("0.0.0.0", self.listen_port))
            .await
            .with_context(|| format!("failed to bind port {}", self.listen_port))?;
        info!(port = self.listen_port, "listening");

        loop {
            let (stream, _peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("accept failed: {e}");
                    continue;
                },
            };
            let dispatcher = Arc::clone(&self.dispatcher);
            let session_middleware = Arc::clone(&self.session_middleware);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, dispatcher, session_middleware).await {
                    error!("connection error: {e}");
                }
            });
        }
    }
}
