// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::storage::BlobStore;

/// A [`BlobStore`] rooted at a directory: `root/<entity>/<id>` is one file
/// per record.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entity_dir(&self, entity: &str) -> PathBuf {
        self.root.join(entity)
    }

    fn record_path(&self, entity: &str, id: u64) -> PathBuf {
        self.entity_dir(entity).join(id.to_string())
    }

    /// Parses the numeric filenames under `dir`, ignoring anything that
    /// isn't a bare non-negative integer (e.g. stray `.tmp` files left
    /// behind by a crashed write).
    fn numeric_entries(dir: &Path) -> io::Result<Vec<u64>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str()
                && let Ok(id) = name.parse::<u64>()
            {
                ids.push(id);
            }
        }
        Ok(ids)
    }
}

impl BlobStore for DiskStore {
    fn next_id(&self, entity: &str) -> io::Result<u64> {
        let dir = self.entity_dir(entity);
        match Self::numeric_entries(&dir) {
            Ok(ids) => Ok(ids.into_iter().max().map_or(0, |max| max + 1)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    fn write(&self, entity: &str, id: u64, data: &[u8]) -> io::Result<()> {
        let dir = self.entity_dir(entity);
        fs::create_dir_all(&dir)?;
        let target = self.record_path(entity, id);
        let tmp = dir.join(format!(".{id}.tmp"));
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &target)
    }

    fn read(&self, entity: &str, id: u64) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.record_path(entity, id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn remove(&self, entity: &str, id: u64) -> io::Result<()> {
        fs::remove_file(self.record_path(entity, id))
    }

    fn list(&self, entity: &str) -> io::Result<Option<Vec<u64>>> {
        let dir = self.entity_dir(entity);
        match Self::numeric_entries(&dir) {
            Ok(mut ids) => {
                ids.sort_unstable();
                Ok(Some(ids))
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
