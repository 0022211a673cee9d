use crate::{direction::Direction, field::FieldRef, predicate::SeekPredicate};
use std::collections::BTreeSet;

///
/// StrippableClause
///
/// The clauses the count driver (§4.7) may need removed from a copy of the
/// input query before issuing it as a scalar count.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrippableClause {
    Preload,
    OrderBy,
    Select,
}

///
/// CountShape
///
/// How the count driver should finish shaping a query for a scalar count
/// (§4.7 steps 2-4). The host's [`OrderedQuery`] implementation classifies
/// its own query this way because recognizing "nontrivial DISTINCT" or
/// "GROUP BY on column c of source s" is inherently specific to the query
/// representation the host application already has (see `DESIGN.md` for the
/// open question this resolves).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CountShape {
    /// No DISTINCT, no GROUP BY: replace SELECT with `count(*)`.
    Plain,
    /// A nontrivial DISTINCT expression: wrap the (SELECT-intact) query in a
    /// subquery and `count(*)` the outer query.
    Distinct,
    /// GROUP BY on `column` of `source`: rewrite SELECT to
    /// `struct(source, [column])`, then `count(*)` the grouped result.
    GroupBy { source: String, column: String },
}

///
/// OrderedQuery
///
/// The out-of-scope "query-expression library" collaborator (§1c, §9): the
/// five primitives the engine needs on the caller's own query representation
/// plus the host-specific count-shape classification (§4.7). Concrete
/// drivers exist per SQL builder; the engine never constructs SQL text.
///

pub trait OrderedQuery {
    type Error: std::error::Error + Send + Sync + 'static;

    /// AND-join `predicate` onto the query's existing WHERE clause.
    fn append_where(&mut self, predicate: &SeekPredicate) -> Result<(), Self::Error>;

    /// Set (override) the query's row limit.
    fn set_limit(&mut self, limit: u32);

    /// Read the query's current ORDER BY, in clause order.
    fn order_by(&self) -> Vec<(FieldRef, Direction)>;

    /// Replace the query's ORDER BY wholesale.
    fn set_order_by(&mut self, order_by: Vec<(FieldRef, Direction)>);

    /// Remove one clause kind from the query entirely.
    fn strip_clause(&mut self, clause: StrippableClause);

    /// Resolve a join binding name to confirm it is declared on the query.
    fn lookup_alias(&self, binding: &str) -> bool;

    /// Every join binding this query declares, for the
    /// [`crate::error::PaginationError::UnknownBinding`] diagnostic.
    fn known_aliases(&self) -> BTreeSet<String>;

    /// Classify how a count query should be shaped (§4.7).
    fn count_shape(&self) -> CountShape;

    /// Rewrite SELECT to `struct(source, columns)` (§4.7 step 3, GROUP BY).
    fn select_struct(&mut self, source: &str, columns: &[String]);
}

///
/// Executor
///
/// The out-of-scope "SQL execution engine" collaborator (§1a, §6): accepts a
/// modified, ordered-and-limited query and returns rows, or a scalar count.
/// The engine never talks to a connection pool directly.
///

pub trait Executor<Q, R> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(&self, query: &Q) -> Result<Vec<R>, Self::Error>;
    fn execute_scalar(&self, query: &Q) -> Result<i64, Self::Error>;
}

/// Flip every field's direction in the query's ORDER BY in place (§4.4,
/// invoked when `before` is supplied alone).
pub fn reverse_order_by<Q: OrderedQuery + ?Sized>(query: &mut Q) {
    let flipped: Vec<(FieldRef, Direction)> = query
        .order_by()
        .into_iter()
        .map(|(field, direction)| (field, direction.flip()))
        .collect();
    query.set_order_by(flipped);
}
