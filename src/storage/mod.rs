//! Storage Module
//!
//! Slot-addressed data files plus sorted key→slot index files.
//!
//! ## Responsibilities
//! - Map slot numbers to byte offsets in a data file
//! - Keep one sorted index file per entity
//! - Compose both into typed entity stores
//!
//! ## Directory Layout
//! ```text
//! {data_dir}/
//!   ├── models.txt        models_index.txt
//!   ├── cars.txt          cars_index.txt
//!   └── sales.txt         sales_index.txt
//!
//! data file:   [slot 0: 502 bytes][slot 1: 502 bytes]...
//! index file:  ["key slot" padded to 502 bytes]... ascending by key
//! ```

mod entity;
mod index;
mod slotted;

pub use entity::EntityStore;
pub use index::{IndexEntry, SortedIndex};
pub use slotted::SlottedStore;
