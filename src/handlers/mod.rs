// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The concrete handlers and the explicit builder that registers their
//! factories. Replaces the source's global static-initializer
//! registration with a function called once from `main`.

pub mod echo;
pub mod entity_api;
pub mod get_messages;
pub mod health;
pub mod login;
pub mod logout;
pub mod messages_handler;
pub mod not_found;
pub mod post_message;
pub mod register;
pub mod session_middleware;
pub mod static_handler;

use std::sync::Arc;

use crate::{
    messages::MessageLog,
    registry::{HandlerRegistry, RequestHandler},
    session::SessionStore,
    users::UserStore,
};

/// Resources shared by more than one handler factory, constructed once in
/// `main` and handed down by reference instead of kept as process-global
/// statics.
pub struct SharedState {
    pub session_store: Arc<SessionStore>,
    pub message_log: Arc<MessageLog>,
    pub user_store: Arc<UserStore>,
}

fn arg(args: &[(String, String)], key: &str) -> Option<String> {
    args.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

/// Registers every built-in handler factory. Later calls to
/// [`HandlerRegistry::register`] for the same name would overwrite these;
/// this function is expected to run exactly once at startup.
pub fn register_all_handlers(registry: &mut HandlerRegistry, shared: &SharedState) {
    registry.register(
        "EchoHandler",
        Box::new(|_args| Box::new(echo::EchoHandler) as Box<dyn RequestHandler>),
    );

    registry.register(
        "StaticHandler",
        Box::new(|args| {
            let root = arg(args, "root").unwrap_or_else(|| ".".to_string());
            Box::new(static_handler::StaticHandler::new(root)) as Box<dyn RequestHandler>
        }),
    );

    registry.register(
        "HealthHandler",
        Box::new(|_args| Box::new(health::HealthHandler) as Box<dyn RequestHandler>),
    );

    registry.register(
        "NotFoundHandler",
        Box::new(|_args| Box::new(not_found::NotFoundHandler) as Box<dyn RequestHandler>),
    );

    registry.register("ApiHandler", {
        Box::new(move |args| {
            let mount = arg(args, "mount").unwrap_or_else(|| "/api".to_string());
            let data_path = arg(args, "data_path").unwrap_or_else(|| "./data".to_string());
            Box::new(entity_api::EntityApi::new(mount, data_path)) as Box<dyn RequestHandler>
        })
    });

    registry.register("PostMessageHandler", {
        let message_log = Arc::clone(&shared.message_log);
        Box::new(move |args| {
            let messages_path =
                arg(args, "messages_path").unwrap_or_else(|| "./data/messages".to_string());
            Box::new(post_message::PostMessageHandler::new(
                messages_path,
                Arc::clone(&message_log),
            )) as Box<dyn RequestHandler>
        })
    });

    registry.register(
        "GetMessagesHandler",
        Box::new(|args| {
            let mount = arg(args, "mount").unwrap_or_else(|| "/messages".to_string());
            let messages_path = arg(args, "messages_path").map(std::path::PathBuf::from);
            Box::new(get_messages::GetMessagesHandler::new(mount, messages_path))
                as Box<dyn RequestHandler>
        }),
    );

    registry.register("MessagesHandler", {
        let message_log = Arc::clone(&shared.message_log);
        Box::new(move |args| {
            let mount = arg(args, "mount").unwrap_or_else(|| "/messages".to_string());
            let messages_path =
                arg(args, "messages_path").unwrap_or_else(|| "./data/messages".to_string());
            Box::new(messages_handler::MessagesHandler::new(
                mount,
                messages_path,
                Arc::clone(&message_log),
            )) as Box<dyn RequestHandler>
        })
    });

    registry.register("RegisterHandler", {
        let user_store = Arc::clone(&shared.user_store);
        Box::new(move |_args| {
            Box::new(register::RegisterHandler::new(Arc::clone(&user_store)))
                as Box<dyn RequestHandler>
        })
    });

    registry.register("LoginHandler", {
        let user_store = Arc::clone(&shared.user_store);
        Box::new(move |_args| {
            Box::new(login::LoginHandler::new(Arc::clone(&user_store))) as Box<dyn RequestHandler>
        })
    });

    registry.register(
        "LogoutHandler",
        Box::new(|_args| Box::new(logout::LogoutHandler) as Box<dyn RequestHandler>),
    );
}
