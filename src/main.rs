// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use httpd_rs::{
    cfg::{
        cli::resolve_config_path,
        http_config::{ConfigParser, routes_from_ast},
        logger,
    },
    error::ConfigError,
    handlers::{SharedState, not_found::NotFoundHandler, register_all_handlers, session_middleware::SessionMiddleware},
    messages::MessageLog,
    registry::{Dispatcher, HandlerRegistry},
    server::Server,
    session::SessionStore,
    users::UserStore,
};
use tracing::info;

const WORKER_THREADS: usize = 4;

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: httpd <config-file>"))?;

    let resolved =
        resolve_config_path(&config_path).context("failed to resolve config file path")?;

    // A `logger.yaml` sitting next to the server config opts into the
    // teacher's structured JSON logging; its absence falls back to a plain
    // stdout subscriber rather than refusing to start.
    let logger_config = resolved.with_file_name("logger.yaml");
    let _guard = if logger_config.is_file() {
        logger::init_logger(
            logger_config
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("logger config path is not valid UTF-8"))?,
        )?
    } else {
        logger::init_default_logger()?
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(WORKER_THREADS)
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(resolved))
}

async fn run(resolved: PathBuf) -> Result<()> {
    let bytes = std::fs::read(&resolved)
        .with_context(|| format!("failed to read config file {resolved:?}"))?;

    let ast = ConfigParser::parse(&bytes).context("failed to parse config file")?;
    let parsed = routes_from_ast(&ast).context("failed to extract routes from config")?;
    if parsed.routes.is_empty() {
        bail!("config declares no location routes");
    }

    let data_path = default_data_path(&parsed.routes);
    let session_store = Arc::new(SessionStore::new());
    let message_log = Arc::new(MessageLog::new());
    let user_store = Arc::new(UserStore::new(data_path.join("users.json")));

    if let Some(messages_path) = default_messages_path(&parsed.routes) {
        message_log
            .load_from_directory(&messages_path)
            .with_context(|| format!("failed to load persisted messages from {messages_path:?}"))?;
    }

    let shared = SharedState {
        session_store: Arc::clone(&session_store),
        message_log: Arc::clone(&message_log),
        user_store: Arc::clone(&user_store),
    };

    let mut registry = HandlerRegistry::new();
    register_all_handlers(&mut registry, &shared);

    let mut dispatcher = Dispatcher::new(Arc::new(NotFoundHandler));
    for route in &parsed.routes {
        let Some(handler) = registry.build(&route.handler_name, &route.args) else {
            return Err(ConfigError::UnknownHandler(
                route.handler_name.clone(),
                route.prefix.clone(),
            )
            .into());
        };
        dispatcher.add_route(route.prefix.clone(), Arc::from(handler));
    }

    let session_middleware = Arc::new(SessionMiddleware::new(session_store));
    let server = Server::new(parsed.listen_port, Arc::new(dispatcher), session_middleware);

    info!(routes = parsed.routes.len(), "configuration loaded");
    server.run().await
}

/// The user store's backing file lives under the same `data_path` an
/// `ApiHandler` route was configured with, matching the on-disk layout's
/// `data_path/users.json`. Falls back to `./data` when no route declares
/// one (e.g. a config with only `EchoHandler`/`StaticHandler` routes).
fn default_data_path(routes: &[httpd_rs::cfg::http_config::RouteDef]) -> PathBuf {
    routes
        .iter()
        .find_map(|route| {
            route
                .args
                .iter()
                .find(|(key, _)| key == "data_path")
                .map(|(_, value)| PathBuf::from(value))
        })
        .unwrap_or_else(|| PathBuf::from("./data"))
}

/// The first `messages_path` declared on a `PostMessageHandler` or
/// `MessagesHandler` route, if any route configures one.
fn default_messages_path(routes: &[httpd_rs::cfg::http_config::RouteDef]) -> Option<PathBuf> {
    routes.iter().find_map(|route| {
        route
            .args
            .iter()
            .find(|(key, _)| key == "messages_path")
            .map(|(_, value)| PathBuf::from(value))
    })
}
