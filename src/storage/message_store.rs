// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

//! A [`BlobStore`] rooted directly at the messages directory, for
//! [`crate::handlers::get_messages::GetMessagesHandler`] to enumerate and
//! read through rather than reaching into the in-process
//! [`crate::messages::MessageLog`]. Unlike [`crate::storage::DiskStore`],
//! records live as `root/<id>.json` (the `entity` argument is unused — the
//! directory is already scoped to one collection, matching the on-disk
//! layout's `data_path/messages/<n>.json`).

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::storage::BlobStore;

pub struct MessageFileStore {
    root: PathBuf,
}

impl MessageFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, id: u64) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Parses the `<id>` out of every `<id>.json` filename under `root`,
    /// ignoring anything else.
    fn numeric_ids(dir: &Path) -> io::Result<Vec<u64>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str())
                && let Ok(id) = stem.parse::<u64>()
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl BlobStore for MessageFileStore {
    fn next_id(&self, _entity: &str) -> io::Result<u64> {
        match Self::numeric_ids(&self.root) {
            Ok(ids) => Ok(ids.into_iter().max().map_or(0, |max| max + 1)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&self, _entity: &str, id: u64, data: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.record_path(id), data)
    }

    fn read(&self, _entity: &str, id: u64) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.record_path(id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn remove(&self, _entity: &str, id: u64) -> io::Result<()> {
        fs::remove_file(self.record_path(id))
    }

    fn list(&self, _entity: &str) -> io::Result<Option<Vec<u64>>> {
        match Self::numeric_ids(&self.root) {
            Ok(mut ids) => {
                ids.sort_unstable();
                Ok(Some(ids))
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
