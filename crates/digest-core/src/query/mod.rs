//! Storage-agnostic query model
//!
//! A query against one entity is composed from four independent parts:
//! filters, sort order, projection and pager. [`QueryConfig`] layers the
//! per-entity defaults under the per-call parts and produces a [`Select`],
//! which backends either render to SQL or evaluate in memory. Building a
//! `Select` never touches storage.

mod column;
mod filter;
mod pager;
mod reaction;
mod select;
mod sort;

pub use column::{Column, ColumnValue, Entity};
pub use filter::{Filter, FilterOp};
pub use pager::Pager;
pub use reaction::{ReactionColumn, ReactionQueryConfig, ReactionSearch, ReactionSelect};
pub use select::{Projection, QueryConfig, QueryOptions, Select};
pub use sort::{SortDirection, SortField};
