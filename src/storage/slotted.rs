//! Slotted Store
//!
//! Append-by-slot file of fixed-width lines.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{DealerError, Result};
use crate::record::{RECORD_STRIDE, RECORD_WIDTH};

/// A data file addressed by zero-based slot number
///
/// Slot `i` occupies bytes `[i * RECORD_STRIDE, (i + 1) * RECORD_STRIDE)`.
/// Every call opens the file, does its work and drops the handle.
pub struct SlottedStore {
    /// Backing data file
    path: PathBuf,
    /// Number of allocated slots (also the next free slot)
    count: u64,
}

impl SlottedStore {
    /// Open or create a store
    ///
    /// The record count is recovered from the file length so reopening an
    /// existing directory continues appending after the last record.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let file_len = file.metadata()?.len();

        if file_len % RECORD_STRIDE as u64 != 0 {
            return Err(DealerError::Corruption(format!(
                "{}: length {} is not a multiple of {}",
                path.display(),
                file_len,
                RECORD_STRIDE
            )));
        }

        let count = file_len / RECORD_STRIDE as u64;
        tracing::debug!(path = %path.display(), count, "opened slotted store");

        Ok(Self {
            path: path.to_path_buf(),
            count,
        })
    }

    /// Write a line at the next free slot and return that slot
    pub fn append(&mut self, line: &[u8]) -> Result<u64> {
        Self::check_line(line)?;

        let slot = self.count;
        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(Self::offset(slot)))?;
        file.write_all(line)?;

        self.count += 1;
        tracing::debug!(path = %self.path.display(), slot, "appended record");

        Ok(slot)
    }

    /// Read the padded content (without terminator) stored at `slot`
    pub fn read(&self, slot: u64) -> Result<Vec<u8>> {
        self.check_slot(slot)?;

        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(Self::offset(slot)))?;

        let mut content = vec![0u8; RECORD_WIDTH];
        file.read_exact(&mut content)?;

        Ok(content)
    }

    /// Overwrite an already allocated slot in place
    pub fn write_at(&mut self, slot: u64, line: &[u8]) -> Result<()> {
        self.check_slot(slot)?;
        Self::check_line(line)?;

        let mut file = OpenOptions::new().write(true).open(&self.path)?;
        file.seek(SeekFrom::Start(Self::offset(slot)))?;
        file.write_all(line)?;

        tracing::debug!(path = %self.path.display(), slot, "rewrote record");
        Ok(())
    }

    /// Read every allocated slot in slot order
    pub fn scan(&self) -> Result<Vec<(u64, Vec<u8>)>> {
        let bytes = fs::read(&self.path)?;

        Ok(bytes
            .chunks_exact(RECORD_STRIDE)
            .take(self.count as usize)
            .enumerate()
            .map(|(slot, chunk)| (slot as u64, chunk[..RECORD_WIDTH].to_vec()))
            .collect())
    }

    /// Number of allocated slots
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn offset(slot: u64) -> u64 {
        slot * RECORD_STRIDE as u64
    }

    fn check_slot(&self, slot: u64) -> Result<()> {
        if slot >= self.count {
            return Err(DealerError::OutOfRange {
                slot,
                count: self.count,
            });
        }
        Ok(())
    }

    fn check_line(line: &[u8]) -> Result<()> {
        if line.len() != RECORD_STRIDE {
            return Err(DealerError::Encode(format!(
                "line must be {} bytes, got {}",
                RECORD_STRIDE,
                line.len()
            )));
        }
        Ok(())
    }
}
