//! Filter predicates

use super::column::{Column, ColumnValue};

/// Comparison applied to a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOp {
    Eq(ColumnValue),
    NotEq(ColumnValue),
    Gt(ColumnValue),
    Gte(ColumnValue),
    Lt(ColumnValue),
    Lte(ColumnValue),
    In(Vec<ColumnValue>),
    IsNull,
    IsNotNull,
}

/// One predicate binding a column to a test. Filters in a set are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<C> {
    pub column: C,
    pub op: FilterOp,
}

impl<C: Column> Filter<C> {
    pub fn new(column: C, op: FilterOp) -> Self {
        Self { column, op }
    }

    pub fn equals(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::Eq(value.into()))
    }

    pub fn not_equals(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::NotEq(value.into()))
    }

    pub fn gt(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::Gt(value.into()))
    }

    pub fn gte(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::Gte(value.into()))
    }

    pub fn lt(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::Lt(value.into()))
    }

    pub fn lte(column: C, value: impl Into<ColumnValue>) -> Self {
        Self::new(column, FilterOp::Lte(value.into()))
    }

    pub fn is_in<I, V>(column: C, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ColumnValue>,
    {
        Self::new(column, FilterOp::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn is_null(column: C) -> Self {
        Self::new(column, FilterOp::IsNull)
    }

    pub fn is_not_null(column: C) -> Self {
        Self::new(column, FilterOp::IsNotNull)
    }

    /// Evaluate against a record with SQL semantics (NULL never compares)
    pub fn matches(&self, record: &C::Record) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        let actual = self.column.value(record);
        match &self.op {
            FilterOp::IsNull => actual.is_null(),
            FilterOp::IsNotNull => !actual.is_null(),
            FilterOp::Eq(v) => actual.compare(v) == Some(Equal),
            FilterOp::NotEq(v) => matches!(actual.compare(v), Some(Less | Greater)),
            FilterOp::Gt(v) => actual.compare(v) == Some(Greater),
            FilterOp::Gte(v) => matches!(actual.compare(v), Some(Greater | Equal)),
            FilterOp::Lt(v) => actual.compare(v) == Some(Less),
            FilterOp::Lte(v) => matches!(actual.compare(v), Some(Less | Equal)),
            FilterOp::In(values) => values.iter().any(|v| actual.compare(v) == Some(Equal)),
        }
    }
}
