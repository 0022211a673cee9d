//! Seekset: a schema-agnostic keyset pagination engine for ordered
//! relational queries — cursor codec, seek predicate synthesis, and the
//! `count(*)` driver, wired over a caller-supplied query and executor.

pub mod access;
pub mod codec;
pub mod config;
pub mod count;
pub mod direction;
pub mod error;
pub mod field;
pub mod memory;
pub mod page;
pub mod paginate;
pub mod predicate;
pub mod query;
pub mod value;

pub use config::{Config, Options, DEFAULT_LIMIT, DEFAULT_LIMIT_MAX, LIMIT_MIN};
pub use error::PaginationError;
pub use page::{Metadata, Page};
pub use paginate::paginate;

///
/// Prelude
///
/// Domain vocabulary only: the types a host application names when wiring
/// up its own `OrderedQuery`/`Executor`/`SchemaReflect`/`ValueExtractor`
/// impls. Errors and the internal codec stay out of it.
///

pub mod prelude {
    pub use crate::{
        access::{DefaultExtractor, RowAccess, ValueExtractor},
        direction::Direction,
        field::{FieldInput, FieldRef, FieldSpec, SchemaReflect},
        query::{CountShape, Executor, OrderedQuery, StrippableClause},
        value::{TypeTag, Value},
        Config, Options, Page, PaginationError,
    };
}
