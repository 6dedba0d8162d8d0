//! Repository traits (ports)

mod repositories;

pub use repositories::{ReactionRepository, ReactionStore, ReactionTransaction, RepoResult};
