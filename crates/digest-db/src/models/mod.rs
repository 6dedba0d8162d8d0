//! Database models
//!
//! Row types with SQLx `FromRow` derives, one per result shape.

mod reaction;

pub use reaction::{DigestEntryModel, MessageReactionModel};
