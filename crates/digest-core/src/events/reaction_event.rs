//! Reaction and digest request events
//!
//! Reaction lists are sets: a duplicated emoji in one payload counts once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::entities::ReactionKey;
use crate::value_objects::{ChatId, MessageId};

/// A message's reaction set changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionChanged {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    #[serde(default, alias = "old_reaction")]
    pub old_reactions: BTreeSet<String>,
    #[serde(default, alias = "new_reaction")]
    pub new_reactions: BTreeSet<String>,
}

impl ReactionChanged {
    /// Create an event from reaction lists
    pub fn new<I, J, S, T>(message_id: MessageId, chat_id: ChatId, old: I, new: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            message_id,
            chat_id,
            old_reactions: old.into_iter().map(Into::into).collect(),
            new_reactions: new.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn key(&self) -> ReactionKey {
        ReactionKey::new(self.message_id, self.chat_id)
    }

    /// Count to store when this is the first event seen for the key.
    ///
    /// The platform may batch several simultaneous reactions into the first
    /// update, so the whole new set is counted.
    pub fn initial_count(&self) -> i32 {
        saturating_len(&self.new_reactions)
    }

    /// Signed change implied by the two sets
    pub fn delta(&self) -> i32 {
        saturating_len(&self.new_reactions) - saturating_len(&self.old_reactions)
    }
}

fn saturating_len(set: &BTreeSet<String>) -> i32 {
    i32::try_from(set.len()).unwrap_or(i32::MAX)
}

/// Kind of conversation, needed to build message links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    #[default]
    Group,
    Supergroup,
    Channel,
}

/// A user asked for the digest of a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRequested {
    pub chat_id: ChatId,
    /// Raw selector as received (`week`, `digest:week`, ...)
    pub period: String,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub chat_kind: ChatKind,
    /// Public username of the chat, used for group links
    #[serde(default)]
    pub username: Option<String>,
    /// Forum topic the request came from
    #[serde(default)]
    pub thread_id: Option<i64>,
}
