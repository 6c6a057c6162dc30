// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The handler registry (name → factory) and the longest-prefix-match
//! dispatcher built from it.

pub mod dispatcher;

pub use dispatcher::Dispatcher;

use std::collections::HashMap;

use crate::http::{HttpRequest, HttpResponse};

/// A leaf or middleware value that serves a matched request.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, request: &HttpRequest) -> HttpResponse;
}

/// Constructs a [`RequestHandler`] from a `location` block's `<key>
/// <value>` pairs.
pub type HandlerFactory =
    Box<dyn Fn(&[(String, String)]) -> Box<dyn RequestHandler> + Send + Sync>;

/// `name → factory` map, built once at startup. A later registration for
/// the same name overwrites the earlier one.
#[derive(Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: HandlerFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Builds the handler named `name`, or `None` if no factory is
    /// registered under that name.
    pub fn build(&self, name: &str, args: &[(String, String)]) -> Option<Box<dyn RequestHandler>> {
        self.factories.get(name).map(|factory| factory(args))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echoing(&'static str);

    impl RequestHandler for Echoing {
        fn handle(&self, _request: &HttpRequest) -> HttpResponse {
            HttpResponse::with_text_body(200, self.0)
        }
    }

    #[test]
    fn a_later_registration_overwrites_an_earlier_one() {
        let mut registry = HandlerRegistry::new();
        registry.register("greet", Box::new(|_args| Box::new(Echoing("first"))));
        registry.register("greet", Box::new(|_args| Box::new(Echoing("second"))));
        assert!(registry.contains("greet"));
        assert_eq!(registry.factories.len(), 1);
    }

    #[test]
    fn build_returns_none_for_an_unknown_name() {
        let registry = HandlerRegistry::new();
        assert!(registry.build("missing", &[]).is_none());
    }
}
