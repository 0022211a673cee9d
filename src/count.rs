use crate::query::{CountShape, OrderedQuery, StrippableClause};

/// Shape `query` into the auxiliary count query described by §4.7, in place.
///
/// The caller is responsible for handing the mutated query to
/// `executor.execute_scalar` and is expected to have cloned the original
/// query first — this function does not clone, matching `OrderedQuery`'s
/// in-place mutation style used elsewhere in the engine (§4.5).
pub fn prepare_count_query<Q: OrderedQuery + ?Sized>(query: &mut Q) {
    query.strip_clause(StrippableClause::Preload);
    query.strip_clause(StrippableClause::OrderBy);

    match query.count_shape() {
        CountShape::Plain => query.strip_clause(StrippableClause::Select),
        CountShape::Distinct => {
            // SELECT stays intact; the executor wraps this query in a
            // subquery and counts the outer result (§9 open question).
        }
        CountShape::GroupBy { source, column } => query.select_struct(&source, &[column]),
    }
}
