//! Domain entities

mod digest;
mod reaction;

pub use digest::{DigestEntry, DigestPeriod, CALLBACK_PREFIX};
pub use reaction::{NewReactionRecord, ReactionKey, ReactionRecord};
