// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! The on-disk user store: a single `{username -> password hash}` JSON
//! object, serialized behind a single-writer lock so concurrent
//! registrations cannot race on a read-modify-write of the file.

use std::{collections::HashMap, fs, io, path::PathBuf, sync::Mutex};

use sha2::{Digest, Sha256};

/// Hashes `password` into a one-way, equality-comparable hex digest. Not
/// reversible; implementation-defined beyond that contract.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode(digest)
}

pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> io::Result<HashMap<String, String>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_default()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, users: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec(users)?;
        fs::write(&self.path, bytes)
    }

    /// Returns `Err` if `username` already exists; otherwise inserts
    /// `username -> hash_password(password)`.
    pub fn register(&self, username: &str, password: &str) -> io::Result<Result<(), ()>> {
        let _guard = self.write_lock.lock().expect("user store lock poisoned");
        let mut users = self.read_all()?;
        if users.contains_key(username) {
            return Ok(Err(()));
        }
        users.insert(username.to_string(), hash_password(password));
        self.write_all(&users)?;
        Ok(Ok(()))
    }

    /// `true` iff `username` exists and its stored hash equals
    /// `hash_password(password)`.
    pub fn verify(&self, username: &str, password: &str) -> io::Result<bool> {
        let users = self.read_all()?;
        Ok(users.get(username).is_some_and(|stored| *stored == hash_password(password)))
    }
}
