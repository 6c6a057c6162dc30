// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{collections::HashMap, io, sync::Mutex};

use crate::storage::BlobStore;

/// An in-memory [`BlobStore`], used by tests and by fixtures that would
/// otherwise need a scratch directory.
#[derive(Default)]
pub struct MemoryStore {
    entities: Mutex<HashMap<String, HashMap<u64, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn next_id(&self, entity: &str) -> io::Result<u64> {
        let entities = self.entities.lock().expect("memory store lock poisoned");
        Ok(entities
            .get(entity)
            .and_then(|records| records.keys().max().copied())
            .map_or(0, |max| max + 1))
    }

    fn write(&self, entity: &str, id: u64, data: &[u8]) -> io::Result<()> {
        let mut entities = self.entities.lock().expect("memory store lock poisoned");
        entities
            .entry(entity.to_string())
            .or_default()
            .insert(id, data.to_vec());
        Ok(())
    }

    fn read(&self, entity: &str, id: u64) -> io::Result<Option<Vec<u8>>> {
        let entities = self.entities.lock().expect("memory store lock poisoned");
        Ok(entities.get(entity).and_then(|records| records.get(&id)).cloned())
    }

    fn remove(&self, entity: &str, id: u64) -> io::Result<()> {
        let mut entities = self.entities.lock().expect("memory store lock poisoned");
        let removed = entities
            .get_mut(entity)
            .and_then(|records| records.remove(&id));
        match removed {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "record not found")),
        }
    }

    fn list(&self, entity: &str) -> io::Result<Option<Vec<u64>>> {
        let entities = self.entities.lock().expect("memory store lock poisoned");
        Ok(entities.get(entity).map(|records| {
            let mut ids: Vec<u64> = records.keys().copied().collect();
            ids.sort_unstable();
            ids
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_starts_at_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.next_id("Shoes").expect("next_id"), 0);
    }

    #[test]
    fn write_then_read_round_trips() {
        let store = MemoryStore::new();
        store.write("Shoes", 0, b"sneaker").expect("write");
        assert_eq!(
            store.read("Shoes", 0).expect("read"),
            Some(b"sneaker".to_vec())
        );
    }

    #[test]
    fn list_is_none_for_an_entity_never_written() {
        let store = MemoryStore::new();
        assert_eq!(store.list("Widgets").expect("list"), None);
    }

    #[test]
    fn remove_of_an_absent_record_is_an_error() {
        let store = MemoryStore::new();
        assert!(store.remove("Shoes", 0).is_err());
    }
}
