// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The process-wide message log: an append-only list with a numbered-file
//! directory mirror.

use std::{fs, io, path::Path, sync::Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub username: String,
    pub content: String,
    /// ISO-8601 UTC, second precision, `Z` suffix.
    pub timestamp: String,
}

impl Message {
    fn now(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

#[derive(Default)]
pub struct MessageLog {
    messages: Mutex<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `{username, content, timestamp=now}` under an exclusive
    /// lock.
    pub fn add(&self, username: impl Into<String>, content: impl Into<String>) {
        let message = Message::now(username, content);
        let mut messages = self.messages.lock().expect("message log lock poisoned");
        messages.push(message);
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages
            .lock()
            .expect("message log lock poisoned")
            .clone()
    }

    /// Clears the in-memory log, then loads every `<n>.json` file under
    /// `dir` in ascending numeric order, skipping anything that does not
    /// parse as a [`Message`].
    pub fn load_from_directory(&self, dir: &Path) -> io::Result<()> {
        let mut loaded = Vec::new();
        let mut entries = match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| {
                    let stem = entry.path().file_stem()?.to_str()?.parse::<u64>().ok()?;
                    Some((stem, entry.path()))
                })
                .collect::<Vec<_>>(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        entries.sort_by_key(|(n, _)| *n);

        for (_, path) in entries {
            let Ok(bytes) = fs::read(&path) else { continue };
            if let Ok(message) = serde_json::from_slice::<Message>(&bytes) {
                loaded.push(message);
            }
        }

        *self.messages.lock().expect("message log lock poisoned") = loaded;
        Ok(())
    }

    /// Creates `dir` if absent, deletes every regular file already in it,
    /// then writes the current in-memory messages as `1.json ... N.json`
    /// in insertion order.
    pub fn persist_to_directory(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        for entry in fs::read_dir(dir)?.filter_map(|e| e.ok()) {
            if entry.file_type().is_ok_and(|ft| ft.is_file()) {
                fs::remove_file(entry.path())?;
            }
        }

        let messages = self.messages.lock().expect("message log lock poisoned");
        for (idx, message) in messages.iter().enumerate() {
            let path = dir.join(format!("{}.json", idx + 1));
            let bytes = serde_json::to_vec(message)?;
            fs::write(path, bytes)?;
        }
        Ok(())
    }
}
