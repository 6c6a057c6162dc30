// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::collections::HashMap;

/// Per-request view of the caller's session, populated by the session
/// middleware before a handler runs.
///
/// Invariant: if `user_id` is `Some`, `session_token` is also `Some`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub session_token: Option<String>,
    pub user_id: Option<String>,
    pub data: HashMap<String, String>,
}

impl SessionContext {
    pub fn clear(&mut self) {
        self.session_token = None;
        self.user_id = None;
        self.data.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_token.is_some() && self.user_id.is_some()
    }
}
