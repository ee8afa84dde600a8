//! Record Module
//!
//! Fixed-width line format shared by every data and index file.
//!
//! ## Line Format
//! ```text
//! ┌──────────────────────────────────────────────┬────────┐
//! │ field field field ...   (space padded, 500)  │ \r\n   │
//! └──────────────────────────────────────────────┴────────┘
//!   ◄──────────────── RECORD_WIDTH ──────────────►
//!   ◄──────────────────── RECORD_STRIDE (502) ───────────►
//! ```
//!
//! Fields are whitespace separated tokens in a fixed order per entity.
//! No escaping exists, so a field may never contain whitespace.

mod codec;
mod entities;
mod status;

pub use codec::{decode, decode_fields, encode, encode_fields, parse_field};
pub use entities::{Car, CarFullInfo, Model, ModelSaleStats, Sale};
pub use status::CarStatus;

use crate::error::Result;

/// Content bytes per line, excluding the terminator
pub const RECORD_WIDTH: usize = 500;

/// Line terminator appended after the padded content
pub const LINE_TERMINATOR: &[u8; 2] = b"\r\n";

/// Bytes occupied by one line on disk
pub const RECORD_STRIDE: usize = RECORD_WIDTH + LINE_TERMINATOR.len();

/// A logical record that can live in a slotted store
///
/// Implementors describe their field layout; the codec handles padding,
/// separator validation and arity checks.
pub trait Record: Sized {
    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// Number of whitespace separated fields in the encoded line
    const ARITY: usize;

    /// Natural key stored in the sorted index
    fn key(&self) -> String;

    /// Fields in on-disk order
    fn to_fields(&self) -> Vec<String>;

    /// Rebuild from exactly `ARITY` tokens
    fn from_fields(fields: &[&str]) -> Result<Self>;
}
