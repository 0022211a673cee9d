use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use thiserror::Error as ThisError;

/// Defensive decode bound on untrusted cursor token input, checked before any
/// base64 or binary decode work happens.
const MAX_CURSOR_TOKEN_LEN: usize = 8 * 1024;

///
/// CursorDecodeError
///
/// Every way a cursor token can fail to decode. All variants ultimately
/// surface to the caller as [`crate::error::PaginationError::CursorCorrupt`];
/// this type stays narrow and codec-local so the wire format can evolve
/// without touching the crate-wide error enum.
///

#[derive(Debug, Eq, ThisError, PartialEq)]
pub enum CursorDecodeError {
    #[error("cursor token exceeds max length: {len} chars (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("cursor token is not valid base64url: {0}")]
    InvalidBase64(String),

    #[error("cursor payload is not a valid encoded value tuple: {0}")]
    InvalidPayload(String),

    #[error("cursor decodes to {actual} value(s) but {expected} field(s) were expected")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Encode raw cursor bytes as a URL-safe, unpadded base64 token.
#[must_use]
pub fn encode_token(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a base64url cursor token into raw bytes.
///
/// An empty or whitespace-only token decodes to `None` ("no cursor"), which
/// is distinct from a successfully decoded empty byte sequence — the latter
/// cannot occur from [`encode_token`] but the caller-facing distinction is
/// between "cursor absent" and "cursor present but corrupt".
///
/// # Errors
///
/// Returns [`CursorDecodeError::TooLong`] if the token exceeds the defensive
/// length bound, or [`CursorDecodeError::InvalidBase64`] if the token is not
/// valid URL-safe base64.
pub fn decode_token(token: &str) -> Result<Option<Vec<u8>>, CursorDecodeError> {
    let token = token.trim();

    if token.is_empty() {
        return Ok(None);
    }

    if token.len() > MAX_CURSOR_TOKEN_LEN {
        return Err(CursorDecodeError::TooLong {
            len: token.len(),
            max: MAX_CURSOR_TOKEN_LEN,
        });
    }

    URL_SAFE_NO_PAD
        .decode(token)
        .map(Some)
        .map_err(|err| CursorDecodeError::InvalidBase64(err.to_string()))
}
