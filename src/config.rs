use crate::{
    codec,
    error::PaginationError,
    field::{FieldInput, FieldSpec, SchemaReflect, normalize_fields},
    value::{TypeTag, Value},
};

/// Default `limit` when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Default `limit_max` when the caller does not specify one.
pub const DEFAULT_LIMIT_MAX: u32 = 100;

/// Floor `limit` is clamped to. §9's open question on `limit_min` is
/// resolved in favor of `0`: it lets `limit: 0, total: true` return only the
/// total with an empty page, which a floor of `1` would forbid.
pub const LIMIT_MIN: u32 = 0;

///
/// Options
///
/// Caller-facing pagination request (§6). Plain data: building the
/// normalized, type-resolved [`Config`] from this is [`Config::build`]'s job.
///

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub fields: Vec<FieldInput>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub limit: Option<u32>,
    pub limit_max: Option<u32>,
    pub total: bool,
}

impl Options {
    #[must_use]
    pub fn new(fields: Vec<FieldInput>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn limit_max(mut self, limit_max: u32) -> Self {
        self.limit_max = Some(limit_max);
        self
    }

    #[must_use]
    pub const fn total(mut self, total: bool) -> Self {
        self.total = total;
        self
    }
}

///
/// Config
///
/// Immutable, per-call, fully-resolved pagination request (§3). Cursors have
/// already been decoded into typed boundary values against `fields`' type
/// tags; `limit` has already been clamped.
///

#[derive(Clone, Debug)]
pub struct Config {
    pub fields: Vec<FieldSpec>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub after_values: Option<Vec<Value>>,
    pub before_values: Option<Vec<Value>>,
    pub limit: u32,
    pub limit_max: u32,
    pub total: bool,
}

impl Config {
    /// Build and validate a [`Config`] from caller [`Options`].
    ///
    /// # Errors
    ///
    /// [`PaginationError::MissingFields`] if `options.fields` is empty,
    /// [`PaginationError::UnknownBinding`] if a field's binding/column is
    /// unknown to `schema`, or [`PaginationError::CursorCorrupt`] if `after`
    /// or `before` fails to decode.
    pub fn build(options: &Options, schema: &dyn SchemaReflect) -> Result<Self, PaginationError> {
        let fields = normalize_fields(&options.fields, schema)?;
        let type_tags: Vec<TypeTag> = fields.iter().map(|f| f.type_tag).collect();

        let after_values = decode_side(options.after.as_deref(), &type_tags)?;
        let before_values = decode_side(options.before.as_deref(), &type_tags)?;

        let limit_max = options.limit_max.unwrap_or(DEFAULT_LIMIT_MAX).max(1);
        let limit = options
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(LIMIT_MIN, limit_max);

        Ok(Self {
            fields,
            after: options.after.clone(),
            before: options.before.clone(),
            after_values,
            before_values,
            limit,
            limit_max,
            total: options.total,
        })
    }
}

fn decode_side(token: Option<&str>, type_tags: &[TypeTag]) -> Result<Option<Vec<Value>>, PaginationError> {
    match token {
        None => Ok(None),
        Some(token) => Ok(codec::decode(token, type_tags)?),
    }
}
