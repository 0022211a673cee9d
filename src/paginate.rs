use crate::{
    access::ValueExtractor,
    config::{Config, Options},
    count,
    error::PaginationError,
    field::SchemaReflect,
    page::{self, Page},
    predicate::{self, SeekPredicate, Side},
    query::{Executor, OrderedQuery, reverse_order_by},
    value::Value,
};

/// Paginate `query` per `options` (§6 entry point).
///
/// `query` is mutated in place into the page request (seek predicate,
/// possibly-reversed ORDER BY, `limit + 1`) and handed to `executor`. When
/// `options.total` is set, a second, independently-shaped query (§4.7) is
/// run first against a clone of the *original*, unmutated `query`.
///
/// # Errors
///
/// [`PaginationError::MissingFields`], [`PaginationError::UnknownBinding`],
/// or [`PaginationError::CursorCorrupt`] on malformed input (§7);
/// [`PaginationError::ExecutorError`] transparently re-surfaced from
/// `executor`.
pub fn paginate<Q, R, E>(
    query: &mut Q,
    options: &Options,
    schema: &dyn SchemaReflect,
    extractor: &dyn ValueExtractor<R>,
    executor: &E,
) -> Result<Page<R>, PaginationError>
where
    Q: OrderedQuery + Clone,
    E: Executor<Q, R>,
{
    let config = Config::build(options, schema)?;
    validate_bindings(&config, query)?;

    let total = if config.total {
        let mut count_query = query.clone();
        count::prepare_count_query(&mut count_query);
        let scalar = executor
            .execute_scalar(&count_query)
            .map_err(PaginationError::from_executor)?;
        Some(u64::try_from(scalar).unwrap_or(0))
    } else {
        None
    };

    if let Some(predicate) = build_predicate(&config) {
        query
            .append_where(&predicate)
            .map_err(PaginationError::from_executor)?;
    }

    let reversed = config.before.is_some() && config.after.is_none();
    if reversed {
        reverse_order_by(query);
    }

    query.set_limit(config.limit + 1);

    let rows = executor.execute(query).map_err(PaginationError::from_executor)?;

    Ok(page::assemble(rows, &config, extractor, reversed, total))
}

/// Produce the cursor one record would contribute as a page boundary (§6
/// `cursor_for_record`), without running a query.
#[must_use]
pub fn cursor_for_record<R>(
    row: &R,
    fields: &[crate::field::FieldSpec],
    extractor: &dyn ValueExtractor<R>,
) -> String {
    page::cursor_for_record(row, fields, extractor)
}

fn validate_bindings<Q: OrderedQuery>(config: &Config, query: &Q) -> Result<(), PaginationError> {
    for field in &config.fields {
        if let Some(binding) = field.binding() {
            if !query.lookup_alias(binding) {
                return Err(PaginationError::unknown_binding(
                    binding.clone(),
                    query.known_aliases(),
                ));
            }
        }
    }
    Ok(())
}

fn build_predicate(config: &Config) -> Option<SeekPredicate> {
    let after = config
        .after_values
        .as_ref()
        .map(|values: &Vec<Value>| predicate::synthesize(&config.fields, values, Side::After));
    let before = config
        .before_values
        .as_ref()
        .map(|values: &Vec<Value>| predicate::synthesize(&config.fields, values, Side::Before));

    match (after, before) {
        (Some(after), Some(before)) => Some(predicate::combine_both(after, before)),
        (Some(after), None) => Some(after),
        (None, Some(before)) => Some(before),
        (None, None) => None,
    }
}
