use crate::{direction::Direction, error::PaginationError, value::TypeTag};
use std::collections::BTreeSet;

///
/// FieldRef
///
/// A reference to one column, optionally qualified by a join binding. This is
/// the shape carried at runtime once a user's field input has been parsed;
/// it is also what [`SchemaReflect`] and value extractors key their lookups
/// on.
///

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum FieldRef {
    /// A column on the query's root entity.
    Plain(String),
    /// A column reached through a named join binding/alias.
    Bound(String, String),
}

impl FieldRef {
    /// The join binding this field is qualified by, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Bound(binding, _) => Some(binding),
        }
    }

    /// The column name, independent of binding.
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Plain(column) | Self::Bound(_, column) => column,
        }
    }
}

///
/// SchemaReflect
///
/// The out-of-scope "relational schema / row-type reflection layer"
/// collaborator: answers "what column type does field F have?" Implemented
/// once per entity by the host application; the engine never guesses types.
///

pub trait SchemaReflect {
    /// Resolve the semantic type of a field, or `None` if the field's
    /// binding/column is not known to this schema.
    fn resolve_type(&self, field: &FieldRef) -> Option<TypeTag>;

    /// The full set of join bindings this schema knows about, used only to
    /// build the diagnostic on [`PaginationError::UnknownBinding`].
    fn known_bindings(&self) -> BTreeSet<String>;
}

///
/// FieldInput
///
/// The three shapes a caller may supply a field in (§4.2): a bare column, a
/// column with an explicit direction, or a bound (joined) column with a
/// direction. Default direction for the first two is [`Direction::Asc`].
///

#[derive(Clone, Debug)]
pub enum FieldInput {
    Column(String),
    ColumnDir(String, Direction),
    Bound(String, String, Direction),
}

impl FieldInput {
    /// A root-entity column, ascending.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::ColumnDir(column.into(), Direction::Asc)
    }

    /// A root-entity column, descending.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::ColumnDir(column.into(), Direction::Desc)
    }

    /// A column reached through a join binding.
    pub fn bound(binding: impl Into<String>, column: impl Into<String>, direction: Direction) -> Self {
        Self::Bound(binding.into(), column.into(), direction)
    }

    const fn direction(&self) -> Direction {
        match self {
            Self::Column(_) => Direction::Asc,
            Self::ColumnDir(_, direction) | Self::Bound(_, _, direction) => *direction,
        }
    }

    fn field_ref(&self) -> FieldRef {
        match self {
            Self::Column(column) | Self::ColumnDir(column, _) => FieldRef::Plain(column.clone()),
            Self::Bound(binding, column, _) => FieldRef::Bound(binding.clone(), column.clone()),
        }
    }
}

impl From<&str> for FieldInput {
    fn from(column: &str) -> Self {
        Self::Column(column.to_string())
    }
}

///
/// FieldSpec
///
/// The normalized four-field record described by §3. Order within the slice
/// the descriptor returns is significant: it is the lexicographic ordering
/// key used by the predicate synthesizer and the page assembler alike.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
    pub field: FieldRef,
    pub direction: Direction,
    pub type_tag: TypeTag,
}

impl FieldSpec {
    #[must_use]
    pub const fn binding(&self) -> Option<&String> {
        match &self.field {
            FieldRef::Plain(_) => None,
            FieldRef::Bound(binding, _) => Some(binding),
        }
    }

    #[must_use]
    pub fn column(&self) -> &str {
        self.field.column()
    }
}

/// Normalize a list of [`FieldInput`] into [`FieldSpec`]s by resolving each
/// field's type through `schema`.
///
/// # Errors
///
/// Returns [`PaginationError::MissingFields`] if `inputs` is empty, or
/// [`PaginationError::UnknownBinding`] if a field's binding/column is not
/// known to `schema`.
pub fn normalize_fields(
    inputs: &[FieldInput],
    schema: &dyn SchemaReflect,
) -> Result<Vec<FieldSpec>, PaginationError> {
    if inputs.is_empty() {
        return Err(PaginationError::MissingFields);
    }

    inputs
        .iter()
        .map(|input| {
            let field = input.field_ref();
            let type_tag = schema.resolve_type(&field).ok_or_else(|| {
                let name = field
                    .binding()
                    .map_or_else(|| field.column().to_string(), |binding| format!("{binding}.{}", field.column()));
                PaginationError::unknown_binding(name, schema.known_bindings())
            })?;

            Ok(FieldSpec {
                field,
                direction: input.direction(),
                type_tag,
            })
        })
        .collect()
}
