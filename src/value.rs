use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// TypeTag
///
/// Closed set of semantic types used for cursor round-tripping.
///
/// Temporal tags distinguish precision because cursors store integer epoch
/// values: the tag tells the codec which epoch unit (seconds vs. microseconds)
/// a given boundary value was serialized with, and which calendar type to
/// rebuild on decode.
///
/// IMPORTANT: tag identity is part of the stable wire contract once a cursor
/// has been handed to a caller. Do not renumber or repurpose a variant.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TypeTag {
    Id,
    Integer,
    String,
    Boolean,
    Float,
    UtcDatetimeSeconds,
    UtcDatetimeMicros,
    NaiveDatetime,
    Date,
    Binary,
    Null,
}

impl TypeTag {
    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::UtcDatetimeSeconds => "utc_datetime_seconds",
            Self::UtcDatetimeMicros => "utc_datetime_micros",
            Self::NaiveDatetime => "naive_datetime",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Null => "null",
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// Value
///
/// A boundary value pulled off a row by the value extractor, or a literal
/// embedded into a seek predicate. `Null` is a first-class variant rather
/// than `Option<Value>`: a null boundary value carries meaning on its own
/// (see the predicate synthesizer's null-handling rule) and is distinct from
/// "no value was supplied".
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Id(i64),
    Integer(i64),
    String(String),
    Boolean(bool),
    Float(f64),
    UtcDatetimeSeconds(DateTime<Utc>),
    UtcDatetimeMicros(DateTime<Utc>),
    NaiveDatetime(NaiveDateTime),
    Date(NaiveDate),
    Binary(Vec<u8>),
    Null,
}

impl Value {
    /// The [`TypeTag`] this value was constructed under.
    #[must_use]
    pub const fn tag(&self) -> TypeTag {
        match self {
            Self::Id(_) => TypeTag::Id,
            Self::Integer(_) => TypeTag::Integer,
            Self::String(_) => TypeTag::String,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Float(_) => TypeTag::Float,
            Self::UtcDatetimeSeconds(_) => TypeTag::UtcDatetimeSeconds,
            Self::UtcDatetimeMicros(_) => TypeTag::UtcDatetimeMicros,
            Self::NaiveDatetime(_) => TypeTag::NaiveDatetime,
            Self::Date(_) => TypeTag::Date,
            Self::Binary(_) => TypeTag::Binary,
            Self::Null => TypeTag::Null,
        }
    }

    /// True for the `Null` variant. Drives the predicate synthesizer's
    /// null-handling rule (a null boundary value drops out of the seek chain).
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Total order over same-typed values, used only by the in-memory reference
/// [`crate::memory::MemoryQuery`] executor to evaluate seek predicates and
/// sort rows. Real SQL executors never call this: ordering there is the
/// database's job.
///
/// Values of *different* variants are incomparable (`None`) except that
/// `Null` compares equal only to itself and orders before every other value,
/// matching SQL's usual `NULLS FIRST` convention for the reference executor.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        use std::cmp::Ordering;

        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Null, _) => Some(Ordering::Less),
            (_, Self::Null) => Some(Ordering::Greater),
            (Self::Id(a), Self::Id(b)) | (Self::Integer(a), Self::Integer(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::UtcDatetimeSeconds(a), Self::UtcDatetimeSeconds(b))
            | (Self::UtcDatetimeMicros(a), Self::UtcDatetimeMicros(b)) => a.partial_cmp(b),
            (Self::NaiveDatetime(a), Self::NaiveDatetime(b)) => a.partial_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.partial_cmp(b),
            (Self::Binary(a), Self::Binary(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}
