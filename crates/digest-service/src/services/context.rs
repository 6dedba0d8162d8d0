//! Service context - dependency container for services
//!
//! Holds the reaction store and the settings services need.

use std::sync::Arc;

use digest_common::{CounterConfig, DigestConfig};
use digest_core::traits::{ReactionRepository, ReactionStore};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn ReactionStore>,
    counter: CounterConfig,
    digest: DigestConfig,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(store: Arc<dyn ReactionStore>, counter: CounterConfig, digest: DigestConfig) -> Self {
        Self {
            store,
            counter,
            digest,
        }
    }

    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the reaction store (transactions, health)
    pub fn store(&self) -> &dyn ReactionStore {
        self.store.as_ref()
    }

    /// Get the reaction repository outside any transaction
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.store.reactions()
    }

    pub fn counter_config(&self) -> &CounterConfig {
        &self.counter
    }

    pub fn digest_config(&self) -> &DigestConfig {
        &self.digest
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("counter", &self.counter)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn ReactionStore>>,
    counter: CounterConfig,
    digest: DigestConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn ReactionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn counter_config(mut self, config: CounterConfig) -> Self {
        self.counter = config;
        self
    }

    pub fn digest_config(mut self, config: DigestConfig) -> Self {
        self.digest = config;
        self
    }

    /// Build the ServiceContext
    ///
    /// Returns an error if the store is missing.
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        let store = self
            .store
            .ok_or_else(|| super::error::ServiceError::validation("store is required"))?;
        Ok(ServiceContext::new(store, self.counter, self.digest))
    }
}
