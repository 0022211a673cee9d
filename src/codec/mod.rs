//! Cursor codec: the opaque-string <-> typed-value-tuple boundary.
//!
//! This module is the only place in the crate allowed to reach for
//! `serde_cbor` or `base64` directly. Everything above it works with
//! [`Value`]/[`TypeTag`] and plain `String` tokens.

pub mod cursor;
mod tuple;

pub use cursor::CursorDecodeError;

use crate::value::{TypeTag, Value};

/// Encode a sequence of boundary values into one opaque, URL-safe cursor
/// token (§4.1 Encode).
#[must_use]
pub fn encode(values: &[Value]) -> String {
    cursor::encode_token(&tuple::encode_tuple(values))
}

/// Decode a cursor token into typed boundary values, guided by the caller's
/// type-tag vector (§4.1 Decode).
///
/// An empty or absent token decodes to `Ok(None)` ("no cursor"), distinct
/// from a tuple of `n` nulls.
///
/// # Errors
///
/// Returns [`CursorDecodeError`] if the token fails to base64-decode, fails
/// to binary-decode, or decodes to a tuple whose length does not match
/// `expected_tags`.
pub fn decode(token: &str, expected_tags: &[TypeTag]) -> Result<Option<Vec<Value>>, CursorDecodeError> {
    let Some(bytes) = cursor::decode_token(token)? else {
        return Ok(None);
    };

    tuple::decode_tuple(&bytes, expected_tags).map(Some)
}
