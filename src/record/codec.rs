//! Record codec
//!
//! Encoding and decoding between typed records and fixed-width lines.

use std::str::FromStr;

use super::{Record, LINE_TERMINATOR, RECORD_STRIDE, RECORD_WIDTH};
use crate::error::{DealerError, Result};

// =============================================================================
// Field-Level Encoding/Decoding
// =============================================================================

/// Encode raw fields into one padded line (content + terminator)
///
/// Rejects empty fields, fields containing whitespace, and content wider
/// than `RECORD_WIDTH`.
pub fn encode_fields<S: AsRef<str>>(fields: &[S]) -> Result<Vec<u8>> {
    for field in fields {
        let field = field.as_ref();
        if field.is_empty() {
            return Err(DealerError::Encode("empty field".to_string()));
        }
        if field.chars().any(char::is_whitespace) {
            return Err(DealerError::Encode(format!(
                "field contains whitespace: {:?}",
                field
            )));
        }
    }

    let content = fields
        .iter()
        .map(|field| field.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");

    if content.len() > RECORD_WIDTH {
        return Err(DealerError::Encode(format!(
            "line too wide: {} bytes (max {})",
            content.len(),
            RECORD_WIDTH
        )));
    }

    let mut line = Vec::with_capacity(RECORD_STRIDE);
    line.extend_from_slice(content.as_bytes());
    line.resize(RECORD_WIDTH, b' ');
    line.extend_from_slice(LINE_TERMINATOR);

    Ok(line)
}

/// Split a line into its whitespace separated tokens
///
/// Accepts the padded content with or without the terminator.
/// Fails unless exactly `arity` tokens are present.
pub fn decode_fields(line: &[u8], arity: usize) -> Result<Vec<&str>> {
    let text = std::str::from_utf8(line)
        .map_err(|e| DealerError::Decode(format!("line is not valid UTF-8: {}", e)))?;

    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != arity {
        return Err(DealerError::Decode(format!(
            "expected {} fields, got {}",
            arity,
            fields.len()
        )));
    }

    Ok(fields)
}

/// Parse a single token into a typed value
pub fn parse_field<T>(name: &str, token: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    token
        .parse()
        .map_err(|e| DealerError::Decode(format!("invalid {} {:?}: {}", name, token, e)))
}

// =============================================================================
// Record-Level Encoding/Decoding
// =============================================================================

/// Encode a record into one stride-sized line
pub fn encode<R: Record>(record: &R) -> Result<Vec<u8>> {
    encode_fields(&record.to_fields())
}

/// Decode a record from a line read out of its store
pub fn decode<R: Record>(line: &[u8]) -> Result<R> {
    let fields = decode_fields(line, R::ARITY)
        .map_err(|e| DealerError::Decode(format!("{}: {}", R::ENTITY, e)))?;
    R::from_fields(&fields)
}
