//! Inbound events delivered by the chat platform collaborator

mod reaction_event;

pub use reaction_event::{ChatKind, DigestRequested, ReactionChanged};
