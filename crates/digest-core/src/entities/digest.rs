//! Digest period selectors and ranked digest entries

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::ReactionRecord;
use crate::error::DomainError;
use crate::value_objects::{ChatId, MessageId};

/// Prefix used by the inline keyboard callback data (`digest:week`)
pub const CALLBACK_PREFIX: &str = "digest:";

/// Time window of a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestPeriod {
    Hour,
    Day,
    Week,
    Month,
    AllTime,
}

impl DigestPeriod {
    /// Every selector, in keyboard order
    pub const ALL: [Self; 5] = [Self::Hour, Self::Day, Self::Week, Self::Month, Self::AllTime];

    /// Window length, `None` for all-time
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::Hour => Some(Duration::hours(1)),
            Self::Day => Some(Duration::hours(24)),
            Self::Week => Some(Duration::hours(24 * 7)),
            Self::Month => Some(Duration::hours(24 * 30)),
            Self::AllTime => None,
        }
    }

    /// Oldest `created_at` included in the digest
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.duration() {
            Some(window) => now - window,
            None => DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    /// Canonical selector name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::AllTime => "all",
        }
    }

    /// Human readable window name used in the digest title
    pub fn title(self) -> &'static str {
        match self {
            Self::Hour => "the last hour",
            Self::Day => "the last day",
            Self::Week => "the last week",
            Self::Month => "the last month",
            Self::AllTime => "all time",
        }
    }

    /// Callback payload for the period keyboard button
    pub fn callback_data(self) -> String {
        format!("{CALLBACK_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for DigestPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestPeriod {
    type Err = DomainError;

    /// Accepts the bare selector (`week`) and the callback form (`digest:week`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();
        let name = selector.strip_prefix(CALLBACK_PREFIX).unwrap_or(selector);

        match name.to_ascii_lowercase().as_str() {
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" | "all_time" | "all-time" => Ok(Self::AllTime),
            _ => Err(DomainError::InvalidPeriod(selector.to_string())),
        }
    }
}

/// One ranked row of a digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestEntry {
    pub reactions_count: i32,
    pub message_id: MessageId,
    pub chat_id: ChatId,
}

impl From<&ReactionRecord> for DigestEntry {
    fn from(record: &ReactionRecord) -> Self {
        Self {
            reactions_count: record.count(),
            message_id: record.message_id,
            chat_id: record.chat_id,
        }
    }
}
