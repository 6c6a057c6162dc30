// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The routing table and its longest-prefix-match lookup. Built once at
//! startup from the parsed config; read-only thereafter.

use std::sync::Arc;

use crate::registry::RequestHandler;

struct Route {
    prefix: String,
    handler: Arc<dyn RequestHandler>,
}

/// Holds the routing table plus the single shared fallback handler used
/// for any path no prefix matches.
pub struct Dispatcher {
    routes: Vec<Route>,
    not_found: Arc<dyn RequestHandler>,
}

impl Dispatcher {
    pub fn new(not_found: Arc<dyn RequestHandler>) -> Self {
        Self { routes: Vec::new(), not_found }
    }

    /// Adds a route. Prefixes are assumed pairwise distinct (enforced at
    /// config-extraction time).
    pub fn add_route(&mut self, prefix: impl Into<String>, handler: Arc<dyn RequestHandler>) {
        self.routes.push(Route { prefix: prefix.into(), handler });
    }

    /// Returns the handler whose registered prefix is the longest string
    /// such that `path` begins with it, or the shared fallback if none
    /// matches.
    pub fn dispatch(&self, path: &str) -> Arc<dyn RequestHandler> {
        self.routes
            .iter()
            .filter(|route| path.starts_with(route.prefix.as_str()))
            .max_by_key(|route| route.prefix.len())
            .map(|route| Arc::clone(&route.handler))
            .unwrap_or_else(|| Arc::clone(&self.not_found))
    }
}
