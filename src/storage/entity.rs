//! Entity Store
//!
//! A slotted data file plus its sorted index, typed by record.

use std::marker::PhantomData;
use std::path::Path;

use super::{SlottedStore, SortedIndex};
use crate::error::{DealerError, Result};
use crate::record::{decode, encode, Record};

/// Typed store for one entity (models, cars or sales)
pub struct EntityStore<R: Record> {
    store: SlottedStore,
    index: SortedIndex,
    _record: PhantomData<R>,
}

impl<R: Record> EntityStore<R> {
    /// Open or create `{dir}/{name}.txt` and `{dir}/{name}_index.txt`
    pub fn open(dir: &Path, name: &str) -> Result<Self> {
        let store = SlottedStore::open(&dir.join(format!("{}.txt", name)))?;
        let index = SortedIndex::open(&dir.join(format!("{}_index.txt", name)), R::ENTITY)?;

        Ok(Self {
            store,
            index,
            _record: PhantomData,
        })
    }

    /// Append a record and index its key
    ///
    /// Fails with `DuplicateKey` before touching either file if the key is
    /// already indexed.
    pub fn add(&mut self, record: &R) -> Result<u64> {
        let key = record.key();
        if self.index.contains(&key)? {
            return Err(DealerError::DuplicateKey {
                entity: R::ENTITY,
                key,
            });
        }

        let line = encode(record)?;
        let slot = self.store.append(&line)?;
        self.index.upsert(&key, slot)?;

        Ok(slot)
    }

    /// Fetch the record indexed under `key`
    pub fn get_by_key(&self, key: &str) -> Result<R> {
        let slot = self.index.lookup(key)?;
        self.get_at(slot)
    }

    /// Fetch the record stored at `slot`
    pub fn get_at(&self, slot: u64) -> Result<R> {
        decode(&self.store.read(slot)?)
    }

    /// Slot holding the record indexed under `key`
    pub fn slot_of(&self, key: &str) -> Result<u64> {
        self.index.lookup(key)
    }

    /// Rewrite the record under `key` in place
    ///
    /// When `record` carries a different key the index entry is renamed;
    /// the slot never moves.
    pub fn replace_by_key(&mut self, key: &str, record: &R) -> Result<u64> {
        let slot = self.index.lookup(key)?;
        let new_key = record.key();
        let renamed = new_key != key;

        if renamed && self.index.contains(&new_key)? {
            return Err(DealerError::DuplicateKey {
                entity: R::ENTITY,
                key: new_key,
            });
        }

        let line = encode(record)?;
        self.store.write_at(slot, &line)?;

        if renamed {
            if let Err(e) = self.index.rename(key, &new_key) {
                tracing::warn!(
                    entity = R::ENTITY,
                    slot,
                    old_key = key,
                    new_key = %new_key,
                    "data rewritten but index rename failed: {}",
                    e
                );
                return Err(e);
            }
        }

        Ok(slot)
    }

    /// Check that `record` encodes into one line without writing anything
    pub fn validate(&self, record: &R) -> Result<()> {
        encode(record).map(|_| ())
    }

    /// Every record in slot order
    pub fn scan(&self) -> Result<Vec<(u64, R)>> {
        self.store
            .scan()?
            .into_iter()
            .map(|(slot, line)| -> Result<(u64, R)> { Ok((slot, decode(&line)?)) })
            .collect()
    }

    /// Number of records written
    pub fn len(&self) -> u64 {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn index(&self) -> &SortedIndex {
        &self.index
    }

    pub fn store(&self) -> &SlottedStore {
        &self.store
    }
}
