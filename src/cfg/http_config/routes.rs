// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! High-level route extraction from a parsed [`ConfigAst`].

use std::collections::HashSet;

use crate::{cfg::http_config::ast::ConfigAst, error::ConfigError};

/// One `location <prefix> <handler> { ... }` statement, already validated
/// for a non-trailing-slash, unique prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub prefix: String,
    pub handler_name: String,
    /// The block's `<key> <value>` pairs, in declaration order. Extra
    /// tokens on a child statement beyond the first two are ignored, per
    /// spec.
    pub args: Vec<(String, String)>,
}

/// The listen port plus the ordered list of extracted routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedServerConfig {
    pub listen_port: u16,
    pub routes: Vec<RouteDef>,
}

pub fn routes_from_ast(ast: &ConfigAst) -> Result<ParsedServerConfig, ConfigError> {
    let listen_port = extract_listen_port(ast)?;
    let routes = extract_routes(ast)?;
    Ok(ParsedServerConfig { listen_port, routes })
}

fn extract_listen_port(ast: &ConfigAst) -> Result<u16, ConfigError> {
    let listen_stmt = ast
        .statements
        .iter()
        .find(|s| s.first_token() == Some("listen"));
    let Some(stmt) = listen_stmt else {
        return Err(ConfigError::MissingListenPort);
    };
    let port_token = stmt
        .tokens
        .get(1)
        .ok_or(ConfigError::MissingListenPort)?;
    port_token
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(port_token.clone()))
}

fn extract_routes(ast: &ConfigAst) -> Result<Vec<RouteDef>, ConfigError> {
    let mut seen_prefixes: HashSet<String> = HashSet::new();
    let mut routes = Vec::new();

    for stmt in &ast.statements {
        if stmt.first_token() != Some("location") {
            continue;
        }
        let prefix = stmt
            .tokens
            .get(1)
            .ok_or_else(|| ConfigError::MalformedLocation(stmt.tokens.join(" ")))?;
        let handler_name = stmt
            .tokens
            .get(2)
            .ok_or_else(|| ConfigError::MalformedLocation(stmt.tokens.join(" ")))?;

        if prefix.ends_with('/') {
            return Err(ConfigError::TrailingSlash(prefix.clone()));
        }
        if !seen_prefixes.insert(prefix.clone()) {
            return Err(ConfigError::DuplicatePrefix(prefix.clone()));
        }

        let args = stmt
            .child
            .as_ref()
            .map(|child| {
                child
                    .statements
                    .iter()
                    .filter_map(|kv| {
                        let key = kv.tokens.first()?;
                        let value = kv.tokens.get(1)?;
                        Some((key.clone(), value.clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        routes.push(RouteDef {
            prefix: prefix.clone(),
            handler_name: handler_name.clone(),
            args,
        });
    }

    Ok(routes)
}
