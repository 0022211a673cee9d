use crate::{direction::Direction, field::{FieldRef, FieldSpec}, value::Value};

///
/// Side
///
/// Which cursor a seek predicate is being synthesized for. Determines which
/// column of the per-field operator table (§4.4) applies.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    After,
    Before,
}

///
/// CompareOp
///
/// The three comparisons a seek predicate leaf can carry. There is no `Ne`,
/// `Gte`, `Lte`, `In`: the seek method only ever needs strict inequality on
/// the terminal field of a clause and equality on every field before it.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
}

///
/// SeekPredicate
///
/// The lexicographic seek predicate (§4.4): a disjunction of prefix-equality
/// clauses, each terminated by one strict comparison. This tree is handed to
/// [`crate::query::OrderedQuery::append_where`] for translation into the
/// host query representation — the engine never renders SQL text itself.
///

#[derive(Clone, Debug, PartialEq)]
pub enum SeekPredicate {
    /// No boundary values survived null-filtering; matches every row.
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Compare {
        field: FieldRef,
        op: CompareOp,
        value: Value,
    },
}

/// Choose the comparison operator for one field, per §4.4's table.
#[must_use]
const fn operator_for(direction: Direction, side: Side) -> CompareOp {
    match (direction, side) {
        (Direction::Asc, Side::After) | (Direction::Desc, Side::Before) => CompareOp::Gt,
        (Direction::Asc, Side::Before) | (Direction::Desc, Side::After) => CompareOp::Lt,
    }
}

/// Synthesize the seek predicate for one cursor side from its decoded
/// boundary values.
///
/// Fields whose boundary value is null are dropped from the sort chain
/// entirely (§4.4 Null handling) — both the column and the value are
/// omitted, rather than compared with SQL's three-valued `IS NULL` logic.
///
/// `fields` and `values` must be the same length (an invariant enforced by
/// [`crate::config::Config`] construction, not re-checked here).
#[must_use]
pub fn synthesize(fields: &[FieldSpec], values: &[Value], side: Side) -> SeekPredicate {
    let chain: Vec<(&FieldSpec, &Value)> = fields
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| !value.is_null())
        .collect();

    if chain.is_empty() {
        return SeekPredicate::True;
    }

    let clauses: Vec<SeekPredicate> = (0..chain.len())
        .map(|i| {
            let mut conjuncts: Vec<SeekPredicate> = chain[..i]
                .iter()
                .map(|(field, value)| SeekPredicate::Compare {
                    field: field.field.clone(),
                    op: CompareOp::Eq,
                    value: (*value).clone(),
                })
                .collect();

            let (field, value) = chain[i];
            conjuncts.push(SeekPredicate::Compare {
                field: field.field.clone(),
                op: operator_for(field.direction, side),
                value: value.clone(),
            });

            and(conjuncts)
        })
        .collect();

    or(clauses)
}

/// AND-combine the `after` and `before` predicates when both cursors are
/// present (§4.4 "Both cursors").
#[must_use]
pub fn combine_both(after: SeekPredicate, before: SeekPredicate) -> SeekPredicate {
    and(vec![after, before])
}

fn and(mut clauses: Vec<SeekPredicate>) -> SeekPredicate {
    if clauses.len() == 1 {
        clauses.pop().expect("len checked above")
    } else {
        SeekPredicate::And(clauses)
    }
}

fn or(mut clauses: Vec<SeekPredicate>) -> SeekPredicate {
    if clauses.len() == 1 {
        clauses.pop().expect("len checked above")
    } else {
        SeekPredicate::Or(clauses)
    }
}
