//! Entity <-> Model mappers

mod reaction;

pub use reaction::ReactionInsert;
