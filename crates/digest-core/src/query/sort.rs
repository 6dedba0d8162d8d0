//! Sort orders

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::column::Column;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One `(column, direction)` pair of a sort set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: Column> SortField<C> {
    pub fn new(column: C, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    pub fn asc(column: C) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: C) -> Self {
        Self::new(column, SortDirection::Desc)
    }

    /// Compare two records on this field. NULLs sort last in both directions.
    pub fn compare(&self, a: &C::Record, b: &C::Record) -> Ordering {
        let (va, vb) = (self.column.value(a), self.column.value(b));
        match (va.is_null(), vb.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = va.compare(&vb).unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        }
    }
}

/// Compare two records on a whole sort set
pub fn compare_by<C: Column>(sort: &[SortField<C>], a: &C::Record, b: &C::Record) -> Ordering {
    sort.iter()
        .map(|field| field.compare(a, b))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}
