//! Pagination

use serde::{Deserialize, Serialize};

/// Controls how many rows a query returns and from where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pager {
    /// `size` rows starting at page `number` (1-based)
    Page { size: i64, number: i64 },
    /// No limit
    #[default]
    All,
    /// Fetch at most two rows so a second match can be reported as an error
    ExactlyOne,
    /// Fetch nothing; only the count is wanted
    CountOnly,
}

impl Pager {
    /// Page `number` of `size` rows, normalized
    pub fn new(size: i64, number: i64) -> Self {
        Self::Page { size, number }.normalized()
    }

    /// First page of `size` rows
    pub fn first(size: i64) -> Self {
        Self::new(size, 1)
    }

    /// Replace malformed values: a non-positive size means no limit and a
    /// page number below 1 means the first page.
    pub fn normalized(self) -> Self {
        match self {
            Self::Page { size, .. } if size <= 0 => Self::All,
            Self::Page { size, number } => Self::Page {
                size,
                number: number.max(1),
            },
            other => other,
        }
    }

    /// Row limit, `None` for unlimited
    pub fn limit(self) -> Option<i64> {
        match self.normalized() {
            Self::Page { size, .. } => Some(size),
            Self::All => None,
            Self::ExactlyOne => Some(2),
            Self::CountOnly => Some(0),
        }
    }

    /// Rows to skip, `None` when zero
    pub fn offset(self) -> Option<i64> {
        match self.normalized() {
            Self::Page { size, number } if number > 1 => Some((number - 1).saturating_mul(size)),
            _ => None,
        }
    }
}
