//! Sorted Index
//!
//! Key→slot table persisted as fixed-width `"key slot"` lines, ascending by key.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{DealerError, Result};
use crate::record::{decode_fields, encode_fields, parse_field, RECORD_STRIDE};

/// One line of an index file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: String,
    pub slot: u64,
}

/// Sorted key→slot index for one entity
///
/// The file is the source of truth: every call reads it, and every mutation
/// rewrites the whole file in sorted order.
pub struct SortedIndex {
    /// Backing index file
    path: PathBuf,
    /// Entity name for error messages
    entity: &'static str,
}

impl SortedIndex {
    /// Open or create an index file
    pub fn open(path: &Path, entity: &'static str) -> Result<Self> {
        OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            entity,
        })
    }

    /// All entries in ascending key order
    pub fn entries(&self) -> Result<Vec<IndexEntry>> {
        let bytes = fs::read(&self.path)?;

        if bytes.len() % RECORD_STRIDE != 0 {
            return Err(DealerError::Corruption(format!(
                "{}: length {} is not a multiple of {}",
                self.path.display(),
                bytes.len(),
                RECORD_STRIDE
            )));
        }

        bytes
            .chunks_exact(RECORD_STRIDE)
            .map(|line| -> Result<IndexEntry> {
                let fields = decode_fields(line, 2)?;
                Ok(IndexEntry {
                    key: fields[0].to_string(),
                    slot: parse_field("index slot", fields[1])?,
                })
            })
            .collect()
    }

    /// Slot for `key`, or `NotFound`
    pub fn lookup(&self, key: &str) -> Result<u64> {
        let entries = self.entries()?;

        entries
            .binary_search_by(|entry| entry.key.as_str().cmp(key))
            .map(|pos| entries[pos].slot)
            .map_err(|_| DealerError::not_found(self.entity, key))
    }

    /// Whether `key` has an entry
    pub fn contains(&self, key: &str) -> Result<bool> {
        match self.lookup(key) {
            Ok(_) => Ok(true),
            Err(DealerError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Insert `key → slot`, or repoint an existing key, then rewrite sorted
    pub fn upsert(&mut self, key: &str, slot: u64) -> Result<()> {
        let mut entries = self.entries()?;

        match entries.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.slot = slot,
            None => entries.push(IndexEntry {
                key: key.to_string(),
                slot,
            }),
        }

        self.write_sorted(entries)?;
        tracing::debug!(index = %self.path.display(), key, slot, "upserted index entry");
        Ok(())
    }

    /// Replace the text of `old_key` with `new_key`, keeping its slot
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<()> {
        let mut entries = self.entries()?;

        if entries.iter().any(|entry| entry.key == new_key) {
            return Err(DealerError::DuplicateKey {
                entity: self.entity,
                key: new_key.to_string(),
            });
        }

        let entry = entries
            .iter_mut()
            .find(|entry| entry.key == old_key)
            .ok_or_else(|| DealerError::not_found(self.entity, old_key))?;
        entry.key = new_key.to_string();
        let slot = entry.slot;

        self.write_sorted(entries)?;
        tracing::debug!(
            index = %self.path.display(),
            old_key,
            new_key,
            slot,
            "renamed index entry"
        );
        Ok(())
    }

    /// Number of entries
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Sort by key and replace the file contents
    fn write_sorted(&self, mut entries: Vec<IndexEntry>) -> Result<()> {
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let mut buf = Vec::with_capacity(entries.len() * RECORD_STRIDE);
        for entry in &entries {
            buf.extend_from_slice(&encode_fields(&[entry.key.clone(), entry.slot.to_string()])?);
        }

        fs::write(&self.path, buf)?;
        Ok(())
    }
}
