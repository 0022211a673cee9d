//! End-to-end scenarios against the in-memory reference executor: twelve
//! payments walked forward, backward, with totals, and under a mixed-
//! direction sort. Canonical order (`charged_at` ascending, `id` ascending)
//! is `[p5, p4, p1, p6, p7, p3, p10, p2, p12, p8, p9, p11]`.

use chrono::{DateTime, TimeZone, Utc};
use seekset::{
    memory::{MemoryExecutor, MemoryQuery},
    paginate,
    prelude::*,
};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Payment {
    id: i64,
    charged_at: DateTime<Utc>,
    amount: i64,
}

struct PaymentSchema;

impl SchemaReflect for PaymentSchema {
    fn resolve_type(&self, field: &FieldRef) -> Option<TypeTag> {
        if field.binding().is_some() {
            return None;
        }
        match field.column() {
            "id" => Some(TypeTag::Id),
            "charged_at" => Some(TypeTag::UtcDatetimeSeconds),
            "amount" => Some(TypeTag::Integer),
            _ => None,
        }
    }

    fn known_bindings(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

fn payment_extractor() -> impl Fn(&Payment, &FieldRef) -> (TypeTag, Value) + Clone {
    |row: &Payment, field: &FieldRef| match field.column() {
        "id" => (TypeTag::Id, Value::Id(row.id)),
        "charged_at" => (TypeTag::UtcDatetimeSeconds, Value::UtcDatetimeSeconds(row.charged_at)),
        "amount" => (TypeTag::Integer, Value::Integer(row.amount)),
        other => panic!("unexpected field {other}"),
    }
}

fn minute(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(offset)
}

/// Twelve payments whose `charged_at` ordering matches the canonical order
/// `[p5, p4, p1, p6, p7, p3, p10, p2, p12, p8, p9, p11]`, every amount equal
/// so `amount` never discriminates rows on its own.
fn payments() -> Vec<Payment> {
    let canonical_ids = [5, 4, 1, 6, 7, 3, 10, 2, 12, 8, 9, 11];
    canonical_ids
        .into_iter()
        .enumerate()
        .map(|(index, id)| Payment {
            id,
            charged_at: minute(index as i64 * 10),
            amount: 100,
        })
        .collect()
}

/// A fresh in-memory query over all twelve payments, with `order_by` already
/// set to match `fields` — the engine only ever flips an existing ORDER BY
/// (§4.5), it never derives one from scratch.
fn query_ordered_by(
    fields: &[(&str, Direction)],
) -> MemoryQuery<Payment, impl Fn(&Payment, &FieldRef) -> (TypeTag, Value) + Clone> {
    let order_by = fields
        .iter()
        .map(|(column, direction)| (FieldRef::Plain((*column).to_string()), *direction))
        .collect();
    MemoryQuery::new(payments(), payment_extractor(), order_by)
}

fn ids(page: &seekset::Page<Payment>) -> Vec<i64> {
    page.entries.iter().map(|p| p.id).collect()
}

const CHARGED_AT_ID_ASC: [(&str, Direction); 2] = [("charged_at", Direction::Asc), ("id", Direction::Asc)];

#[test]
fn s1_forward_walk_limit_4() {
    let mut query = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")]).limit(4);
    let page = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    assert_eq!(ids(&page), vec![5, 4, 1, 6]);
    assert!(page.metadata.after.is_some());
    assert_eq!(page.metadata.before, None);
}

#[test]
fn s2_continuation_from_s1() {
    let mut first_query = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")]).limit(4);
    let first = paginate(&mut first_query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    let mut second_query = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")])
        .limit(4)
        .after(first.metadata.after.clone().unwrap());
    let second = paginate(&mut second_query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    assert_eq!(ids(&second), vec![7, 3, 10, 2]);
    assert!(second.metadata.after.is_some());
}

#[test]
fn s3_last_page_has_no_after() {
    let mut query1 = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")]).limit(4);
    let page1 = paginate(&mut query1, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    let mut query2 = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")])
        .limit(4)
        .after(page1.metadata.after.clone().unwrap());
    let page2 = paginate(&mut query2, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    let mut query3 = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")])
        .limit(4)
        .after(page2.metadata.after.clone().unwrap());
    let page3 = paginate(&mut query3, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    assert_eq!(ids(&page3), vec![12, 8, 9, 11]);
    assert_eq!(page3.metadata.after, None);
}

#[test]
fn s4_backward_from_p11() {
    let fields = seekset::field::normalize_fields(
        &[FieldInput::asc("charged_at"), FieldInput::asc("id")],
        &PaymentSchema,
    )
    .unwrap();
    let p11 = payments().into_iter().find(|p| p.id == 11).unwrap();
    let before = seekset::paginate::cursor_for_record(&p11, &fields, &payment_extractor());

    let mut query = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")])
        .limit(4)
        .before(before);
    let page = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    assert_eq!(ids(&page), vec![2, 12, 8, 9]);
    assert!(page.metadata.before.is_some());
}

#[test]
fn s5_totals_with_nonzero_and_zero_limit() {
    let mut query = query_ordered_by(&[("id", Direction::Asc)]);
    let options = Options::new(vec![FieldInput::asc("id")]).limit(3).total(true);
    let page = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();
    assert_eq!(page.metadata.total, Some(12));
    assert_eq!(page.entries.len(), 3);

    let mut query = query_ordered_by(&[("id", Direction::Asc)]);
    let options = Options::new(vec![FieldInput::asc("id")]).limit(0).total(true);
    let page = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();
    assert_eq!(page.metadata.total, Some(12));
    assert!(page.entries.is_empty());
}

#[test]
fn s6_mixed_direction_after_p4() {
    let mixed_fields = [
        ("amount", Direction::Asc),
        ("charged_at", Direction::Desc),
        ("id", Direction::Asc),
    ];
    let fields = seekset::field::normalize_fields(
        &[
            FieldInput::asc("amount"),
            FieldInput::desc("charged_at"),
            FieldInput::asc("id"),
        ],
        &PaymentSchema,
    )
    .unwrap();
    let p4 = payments().into_iter().find(|p| p.id == 4).unwrap();
    let after = seekset::paginate::cursor_for_record(&p4, &fields, &payment_extractor());

    let mut query = query_ordered_by(&mixed_fields);
    let options = Options::new(vec![
        FieldInput::asc("amount"),
        FieldInput::desc("charged_at"),
        FieldInput::asc("id"),
    ])
    .limit(3)
    .after(after);
    let page = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap();

    // every amount is equal, so the chain degenerates to charged_at desc, id
    // asc; p4 sits second-to-last in that order, leaving only p5 after it.
    // (the predicate's exact >, <, > operator chain is covered directly in
    // predicate.rs's tests against this same field/direction/side triple)
    assert_eq!(ids(&page), vec![5]);
    assert_eq!(page.metadata.after, None);
}

#[test]
fn s7_hostile_cursor_length_mismatch_is_rejected() {
    // encoded for a single-field cursor, presented against a two-field query
    let hostile = seekset::codec::encode(&[Value::Id(1)]);

    let mut query = query_ordered_by(&CHARGED_AT_ID_ASC);
    let options = Options::new(vec![FieldInput::asc("charged_at"), FieldInput::asc("id")])
        .limit(4)
        .after(hostile);
    let err = paginate(&mut query, &options, &PaymentSchema, &payment_extractor(), &MemoryExecutor).unwrap_err();

    assert!(matches!(err, PaginationError::CursorCorrupt(_)));
}
