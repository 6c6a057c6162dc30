// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The process-wide session table: a shared/exclusive lock over a token
//! map, linearizable per token.

use std::{collections::HashMap, sync::RwLock, time::Duration};

use chrono::{DateTime, Utc};
use rand::Rng;

const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub data: HashMap<String, String>,
}

impl SessionRecord {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh 32-lowercase-hex-digit token and inserts a new
    /// record for it with a 24h expiry. Exclusive lock.
    pub fn create_session(&self, user_id: impl Into<String>) -> String {
        let token = generate_token();
        let now = Utc::now();
        let record = SessionRecord {
            user_id: user_id.into(),
            created_at: now,
            expires_at: now + SESSION_TTL,
            data: HashMap::new(),
        };
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.insert(token.clone(), record);
        token
    }

    /// Looks up a live record for `token`. Lazily evicts it first if it has
    /// expired, upgrading to an exclusive lock only in that case.
    pub fn get_session(&self, token: &str) -> Option<SessionRecord> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().expect("session store lock poisoned");
            match sessions.get(token) {
                Some(record) if !record.is_expired(now) => return Some(record.clone()),
                None => return None,
                Some(_) => {},
            }
        }
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        if let Some(record) = sessions.get(token)
            && record.is_expired(now)
        {
            sessions.remove(token);
        }
        None
    }

    /// Idempotent exclusive erase.
    pub fn invalidate_session(&self, token: &str) {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.remove(token);
    }

    /// Sets `record.data[key] = value` if the session is present; no-op
    /// otherwise.
    pub fn update_session_data(
        &self,
        token: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        if let Some(record) = sessions.get_mut(token) {
            record.data.insert(key.into(), value.into());
        }
    }

    /// Removes every record past its expiry.
    pub fn cleanup_expired_sessions(&self) {
        let now = Utc::now();
        let mut sessions = self.sessions.write().expect("session store lock poisoned");
        sessions.retain(|_, record| !record.is_expired(now));
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}
