//! Column table and search criteria of the reaction entity

use chrono::{DateTime, Utc};

use super::column::{Column, ColumnValue, Entity};
use super::filter::Filter;
use super::select::{QueryConfig, Select};
use super::sort::SortField;
use crate::entities::{ReactionKey, ReactionRecord};
use crate::value_objects::{ChatId, MessageId};

/// Columns of the `message_reactions` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionColumn {
    MessageId,
    ChatId,
    ReactionsCount,
    CreatedAt,
}

impl Column for ReactionColumn {
    type Record = ReactionRecord;

    fn name(self) -> &'static str {
        match self {
            Self::MessageId => "message_id",
            Self::ChatId => "chat_id",
            Self::ReactionsCount => "reactions_count",
            Self::CreatedAt => "created_at",
        }
    }

    fn value(self, record: &ReactionRecord) -> ColumnValue {
        match self {
            Self::MessageId => record.message_id.into_inner().into(),
            Self::ChatId => record.chat_id.into_inner().into(),
            Self::ReactionsCount => record.reactions_count.into(),
            Self::CreatedAt => record.created_at.into(),
        }
    }
}

impl Entity for ReactionRecord {
    type Column = ReactionColumn;

    const TABLE: &'static str = "message_reactions";

    const COLUMNS: &'static [ReactionColumn] = &[
        ReactionColumn::MessageId,
        ReactionColumn::ChatId,
        ReactionColumn::ReactionsCount,
        ReactionColumn::CreatedAt,
    ];

    const KEY: &'static [ReactionColumn] = &[ReactionColumn::MessageId, ReactionColumn::ChatId];

    const IMMUTABLE: &'static [ReactionColumn] = &[
        ReactionColumn::MessageId,
        ReactionColumn::ChatId,
        ReactionColumn::CreatedAt,
    ];

    fn default_sort() -> Vec<SortField<ReactionColumn>> {
        vec![SortField::desc(ReactionColumn::CreatedAt)]
    }
}

/// Filter registry and default sort for reactions
pub type ReactionQueryConfig = QueryConfig<ReactionRecord>;

/// Composed reaction query
pub type ReactionSelect = Select<ReactionRecord>;

/// Search criteria for reaction records; unset fields do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSearch {
    pub message_id: Option<MessageId>,
    pub chat_id: Option<ChatId>,
    /// Only records created at or after this instant
    pub created_since: Option<DateTime<Utc>>,
}

impl ReactionSearch {
    /// Exact key lookup
    pub fn by_key(key: ReactionKey) -> Self {
        Self {
            message_id: Some(key.message_id),
            chat_id: Some(key.chat_id),
            created_since: None,
        }
    }

    /// All records of one chat
    pub fn by_chat(chat_id: ChatId) -> Self {
        Self {
            chat_id: Some(chat_id),
            ..Self::default()
        }
    }

    pub fn created_since(mut self, since: DateTime<Utc>) -> Self {
        self.created_since = Some(since);
        self
    }

    /// Translate the set fields into predicates
    pub fn to_filters(&self) -> Vec<Filter<ReactionColumn>> {
        let mut filters = Vec::with_capacity(3);
        if let Some(message_id) = self.message_id {
            filters.push(Filter::equals(ReactionColumn::MessageId, message_id.into_inner()));
        }
        if let Some(chat_id) = self.chat_id {
            filters.push(Filter::equals(ReactionColumn::ChatId, chat_id.into_inner()));
        }
        if let Some(since) = self.created_since {
            filters.push(Filter::gte(ReactionColumn::CreatedAt, since));
        }
        filters
    }
}
