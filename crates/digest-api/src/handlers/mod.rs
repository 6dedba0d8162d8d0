//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod digest;
pub mod health;
pub mod reactions;
