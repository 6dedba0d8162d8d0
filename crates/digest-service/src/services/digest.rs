//! Digest service
//!
//! Resolves a period selector into a ranked, time-windowed report of the
//! most-reacted messages of a chat.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use digest_core::{
    ChatId, DigestEntry, DigestPeriod, DigestRequested, Pager, QueryOptions, ReactionColumn,
    ReactionSearch, SortField,
};

use crate::dto::{message_link, DigestItem, DigestResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Digest service
pub struct DigestService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DigestService<'a> {
    /// Create a new DigestService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the digest for a request, as of now
    pub async fn resolve(&self, request: &DigestRequested) -> ServiceResult<DigestResponse> {
        self.resolve_at(request, Utc::now()).await
    }

    /// Build the digest for a request, as of `now`.
    ///
    /// An unknown selector fails with `InvalidPeriod` before any query runs.
    #[instrument(skip(self))]
    pub async fn resolve_at(
        &self,
        request: &DigestRequested,
        now: DateTime<Utc>,
    ) -> ServiceResult<DigestResponse> {
        let period: DigestPeriod = request.period.parse()?;
        let page_size = self.page_size(request.page_size);

        let search = Self::search(request.chat_id, period, now);
        let entries = self.query(&search, page_size).await?;
        let total = self
            .ctx
            .reaction_repo()
            .count(&search, QueryOptions::new())
            .await?;

        info!(
            chat_id = %request.chat_id,
            period = %period,
            returned = entries.len(),
            total,
            "Digest resolved"
        );

        let items = entries
            .into_iter()
            .map(|entry| DigestItem {
                reactions_count: entry.reactions_count,
                message_id: entry.message_id,
                link: message_link(
                    request.chat_kind,
                    entry.chat_id,
                    entry.message_id,
                    request.username.as_deref(),
                    request.thread_id,
                ),
            })
            .collect();

        Ok(DigestResponse {
            chat_id: request.chat_id,
            period,
            title: DigestResponse::title_for(period),
            total,
            items,
        })
    }

    /// Ranked entries of one chat within `period`, at most `page_size` of them
    #[instrument(skip(self))]
    pub async fn entries(
        &self,
        chat_id: ChatId,
        period: DigestPeriod,
        page_size: i64,
        now: DateTime<Utc>,
    ) -> ServiceResult<Vec<DigestEntry>> {
        let search = Self::search(chat_id, period, now);
        self.query(&search, self.page_size(Some(page_size))).await
    }

    fn search(chat_id: ChatId, period: DigestPeriod, now: DateTime<Utc>) -> ReactionSearch {
        ReactionSearch::by_chat(chat_id).created_since(period.cutoff(now))
    }

    async fn query(&self, search: &ReactionSearch, page_size: i64) -> ServiceResult<Vec<DigestEntry>> {
        let options = QueryOptions::new().sort_by(SortField::desc(ReactionColumn::ReactionsCount));
        let entries = self
            .ctx
            .reaction_repo()
            .find_entries(search, Pager::first(page_size), options)
            .await?;
        Ok(entries)
    }

    /// Requested size, or the default, within `1..=max_page_size`
    fn page_size(&self, requested: Option<i64>) -> i64 {
        let config = self.ctx.digest_config();
        requested
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1))
    }
}
