use crate::codec::cursor::CursorDecodeError;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// PaginationError
///
/// Stable, structured failure surface for the whole engine. All errors are
/// synchronous; the engine never retries and never returns a partial page.
///
/// No `InvalidDirection` variant: unlike the stringly-typed options map this
/// engine's request shape was distilled from, `FieldInput`'s direction is a
/// statically-typed `Direction` enum (§4.2) — there is no code path that
/// could ever produce a direction string to reject, so the variant would be
/// dead on arrival.
///

#[derive(Debug, ThisError)]
pub enum PaginationError {
    /// `fields` was absent or empty.
    #[error("options.fields is required and must be non-empty")]
    MissingFields,

    /// A field referenced a join alias not declared on the query.
    #[error("unknown binding `{name}` (known bindings: {})", format_known(.known))]
    UnknownBinding { name: String, known: BTreeSet<String> },

    /// A cursor token failed to base64-decode, failed to binary-decode, or
    /// decoded to a tuple whose length did not match `fields`.
    #[error("cursor is corrupt: {0}")]
    CursorCorrupt(#[from] CursorDecodeError),

    /// Transparently re-surfaced from the executor. Not wrapped or
    /// reclassified: the caller's own error type is preserved.
    #[error("executor error: {0}")]
    ExecutorError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PaginationError {
    /// Construct an [`Self::UnknownBinding`] from a name and the sorted set
    /// of known binding names, matching §7's diagnostic shape.
    #[must_use]
    pub fn unknown_binding(name: impl Into<String>, known: BTreeSet<String>) -> Self {
        Self::UnknownBinding {
            name: name.into(),
            known,
        }
    }

    /// Wrap an executor-supplied error without reclassifying it.
    pub fn from_executor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ExecutorError(Box::new(err))
    }
}

fn format_known(known: &BTreeSet<String>) -> String {
    if known.is_empty() {
        return "<none>".to_string();
    }
    known.iter().cloned().collect::<Vec<_>>().join(", ")
}
