//! Column metadata for query-able entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A value bound to a filter or read from a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Null,
    Int(i64),
    Timestamp(DateTime<Utc>),
}

impl ColumnValue {
    /// SQL-style comparison: NULL and mismatched kinds are incomparable
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<DateTime<Utc>> for ColumnValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// A column of an entity's table
pub trait Column: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Row type the column belongs to
    type Record;

    /// Column name in storage
    fn name(self) -> &'static str;

    /// Read the column from a materialized record
    fn value(self, record: &Self::Record) -> ColumnValue;
}

/// A single-table entity with compile-time column tables
pub trait Entity: Sized {
    type Column: Column<Record = Self>;

    /// Table name in storage
    const TABLE: &'static str;

    /// Every column, in storage order
    const COLUMNS: &'static [Self::Column];

    /// Primary key columns
    const KEY: &'static [Self::Column];

    /// Columns a default update never writes (key and creation time)
    const IMMUTABLE: &'static [Self::Column];

    /// Sort applied when the caller supplies none
    fn default_sort() -> Vec<super::SortField<Self::Column>>;
}
