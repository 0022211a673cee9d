//! A reference [`OrderedQuery`]/[`Executor`] pair operating over an
//! in-memory `Vec<R>`.
//!
//! This is the engine's own test harness, not a production SQL driver (see
//! §10.4): it exists so the pagination flow can be exercised end-to-end
//! without a real database, the same way the scenarios in §8 are stated
//! against an abstract ordered sequence of rows.

use crate::{
    access::ValueExtractor,
    direction::Direction,
    field::FieldRef,
    predicate::{CompareOp, SeekPredicate},
    query::{CountShape, Executor, OrderedQuery, StrippableClause},
};
use std::{cmp::Ordering, collections::BTreeSet, convert::Infallible, rc::Rc};

///
/// MemoryQuery
///
/// An ordered, optionally pre-filtered row set plus the mutable state the
/// pagination engine grafts onto it (seek predicates, ORDER BY, limit).
///

#[derive(Clone)]
pub struct MemoryQuery<R, X> {
    rows: Rc<Vec<R>>,
    extractor: X,
    base_filter: Option<Rc<dyn Fn(&R) -> bool>>,
    order_by: Vec<(FieldRef, Direction)>,
    known_aliases: BTreeSet<String>,
    wheres: Vec<SeekPredicate>,
    limit: Option<u32>,
    distinct: bool,
    group_by: Option<(String, String)>,
    preload_stripped: bool,
    order_by_stripped: bool,
    select_stripped: bool,
}

impl<R, X> MemoryQuery<R, X>
where
    X: ValueExtractor<R>,
{
    #[must_use]
    pub fn new(rows: Vec<R>, extractor: X, order_by: Vec<(FieldRef, Direction)>) -> Self {
        Self {
            rows: Rc::new(rows),
            extractor,
            base_filter: None,
            order_by,
            known_aliases: BTreeSet::new(),
            wheres: Vec::new(),
            limit: None,
            distinct: false,
            group_by: None,
            preload_stripped: false,
            order_by_stripped: false,
            select_stripped: false,
        }
    }

    /// Declare a join binding as present on this query, so
    /// [`OrderedQuery::lookup_alias`] recognizes it.
    #[must_use]
    pub fn with_alias(mut self, binding: impl Into<String>) -> Self {
        self.known_aliases.insert(binding.into());
        self
    }

    /// Graft a pre-existing filter onto the query, composed (AND) with any
    /// seek predicate the engine appends later.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Fn(&R) -> bool + 'static) -> Self {
        self.base_filter = Some(Rc::new(filter));
        self
    }

    /// Mark this query as having a nontrivial `DISTINCT`, for
    /// [`OrderedQuery::count_shape`].
    #[must_use]
    pub const fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Mark this query as grouped by `column` of `source`, for
    /// [`OrderedQuery::count_shape`].
    #[must_use]
    pub fn group_by(mut self, source: impl Into<String>, column: impl Into<String>) -> Self {
        self.group_by = Some((source.into(), column.into()));
        self
    }

    fn matches(&self, row: &R) -> bool {
        self.base_filter.as_ref().is_none_or(|filter| filter(row))
            && self
                .wheres
                .iter()
                .all(|predicate| eval_predicate(predicate, row, &self.extractor))
    }
}

impl<R, X> OrderedQuery for MemoryQuery<R, X>
where
    X: ValueExtractor<R>,
{
    type Error = Infallible;

    fn append_where(&mut self, predicate: &SeekPredicate) -> Result<(), Self::Error> {
        self.wheres.push(predicate.clone());
        Ok(())
    }

    fn set_limit(&mut self, limit: u32) {
        self.limit = Some(limit);
    }

    fn order_by(&self) -> Vec<(FieldRef, Direction)> {
        self.order_by.clone()
    }

    fn set_order_by(&mut self, order_by: Vec<(FieldRef, Direction)>) {
        self.order_by = order_by;
    }

    fn strip_clause(&mut self, clause: StrippableClause) {
        match clause {
            StrippableClause::Preload => self.preload_stripped = true,
            StrippableClause::OrderBy => self.order_by_stripped = true,
            StrippableClause::Select => self.select_stripped = true,
        }
    }

    fn lookup_alias(&self, binding: &str) -> bool {
        self.known_aliases.contains(binding)
    }

    fn known_aliases(&self) -> BTreeSet<String> {
        self.known_aliases.clone()
    }

    fn count_shape(&self) -> CountShape {
        if let Some((source, column)) = &self.group_by {
            CountShape::GroupBy {
                source: source.clone(),
                column: column.clone(),
            }
        } else if self.distinct {
            CountShape::Distinct
        } else {
            CountShape::Plain
        }
    }

    fn select_struct(&mut self, _source: &str, _columns: &[String]) {
        self.select_stripped = true;
    }
}

fn eval_predicate<R>(predicate: &SeekPredicate, row: &R, extractor: &impl ValueExtractor<R>) -> bool {
    match predicate {
        SeekPredicate::True => true,
        SeekPredicate::And(clauses) => clauses.iter().all(|c| eval_predicate(c, row, extractor)),
        SeekPredicate::Or(clauses) => clauses.iter().any(|c| eval_predicate(c, row, extractor)),
        SeekPredicate::Compare { field, op, value } => {
            let (_, actual) = extractor.extract(row, field);
            match op {
                CompareOp::Eq => actual == *value,
                CompareOp::Gt => actual.partial_cmp(value) == Some(Ordering::Greater),
                CompareOp::Lt => actual.partial_cmp(value) == Some(Ordering::Less),
            }
        }
    }
}

///
/// MemoryExecutor
///
/// Evaluates a [`MemoryQuery`]'s accumulated filter/order-by/limit against
/// its row set.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryExecutor;

impl<R, X> Executor<MemoryQuery<R, X>, R> for MemoryExecutor
where
    R: Clone,
    X: ValueExtractor<R>,
{
    type Error = Infallible;

    fn execute(&self, query: &MemoryQuery<R, X>) -> Result<Vec<R>, Self::Error> {
        let mut matched: Vec<R> = query.rows.iter().filter(|row| query.matches(row)).cloned().collect();

        matched.sort_by(|a, b| compare_by_order(a, b, &query.order_by, &query.extractor));

        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }

        Ok(matched)
    }

    fn execute_scalar(&self, query: &MemoryQuery<R, X>) -> Result<i64, Self::Error> {
        let count = query.rows.iter().filter(|row| query.matches(row)).count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}

fn compare_by_order<R>(
    a: &R,
    b: &R,
    order_by: &[(FieldRef, Direction)],
    extractor: &impl ValueExtractor<R>,
) -> Ordering {
    for (field, direction) in order_by {
        let (_, va) = extractor.extract(a, field);
        let (_, vb) = extractor.extract(b, field);
        let cmp = va.partial_cmp(&vb).unwrap_or(Ordering::Equal);
        let cmp = match direction {
            Direction::Asc => cmp,
            Direction::Desc => cmp.reverse(),
        };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}
