use crate::{access::ValueExtractor, codec, config::Config, field::FieldSpec, value::Value};

///
/// Metadata
///
/// Continuation cursors plus the limit actually applied and, when
/// requested, the total row count (§3).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Metadata {
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: u32,
    pub total: Option<u64>,
}

///
/// Page
///
/// The result of one `paginate` call: the truncated row slice plus its
/// [`Metadata`] (§3).
///

#[derive(Clone, Debug)]
pub struct Page<R> {
    pub entries: Vec<R>,
    pub metadata: Metadata,
}

/// Encode the cursor a page boundary row would produce for `fields`, using
/// `extractor` to pull each field's value off the row (§6
/// `cursor_for_record`).
#[must_use]
pub fn cursor_for_record<R>(row: &R, fields: &[FieldSpec], extractor: &dyn ValueExtractor<R>) -> String {
    let values: Vec<Value> = fields
        .iter()
        .map(|field| extractor.extract(row, &field.field).1)
        .collect();
    codec::encode(&values)
}

/// Assemble a [`Page`] from up-to-`limit + 1` executor rows (§4.6).
///
/// `reversed` is `true` when the query mutator inverted ORDER BY because
/// `before` was supplied alone; the assembler then re-reverses `entries` so
/// the caller observes the query's natural sort direction.
#[must_use]
pub fn assemble<R>(
    rows: Vec<R>,
    config: &Config,
    extractor: &dyn ValueExtractor<R>,
    reversed: bool,
    total: Option<u64>,
) -> Page<R> {
    let limit = config.limit as usize;
    let has_more = rows.len() > limit;

    let mut entries: Vec<R> = rows.into_iter().take(limit).collect();
    if reversed {
        entries.reverse();
    }

    let after_input = config.after.is_some();
    let before_input = config.before.is_some();

    let (before, after) = match (entries.first(), entries.last()) {
        (Some(first), Some(last)) => {
            let first = cursor_for_record(first, &config.fields, extractor);
            let last = cursor_for_record(last, &config.fields, extractor);

            match (after_input, before_input) {
                (true, true) => (Some(first), Some(last)),
                (true, false) => (Some(first), has_more.then_some(last)),
                (false, true) => (has_more.then_some(first), Some(last)),
                (false, false) => (None, has_more.then_some(last)),
            }
        }
        _ => (None, None),
    };

    Page {
        entries,
        metadata: Metadata {
            before,
            after,
            limit: config.limit,
            total,
        },
    }
}
