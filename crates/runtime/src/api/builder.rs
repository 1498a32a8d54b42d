//! Builder for [`MatchService`] with flexible configuration.
use std::sync::Arc;

use tracing::info;

use super::errors::Result;
use super::service::MatchService;
use crate::config::RuntimeConfig;
use crate::repository::{FileMatchRepository, InMemoryMatchRepo, MatchRepository, MatchStore};

#[derive(Default)]
pub struct ServiceBuilder {
    config: RuntimeConfig,
    repository: Option<Arc<dyn MatchRepository>>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific repository instead of the one implied by the config.
    pub fn repository(mut self, repository: impl MatchRepository + 'static) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Builds the service.
    ///
    /// Without an explicit repository, matches are kept under
    /// `config.data_dir` when set and in memory otherwise.
    pub fn build(self) -> Result<MatchService> {
        let repository: Arc<dyn MatchRepository> = match (self.repository, &self.config.data_dir) {
            (Some(repository), _) => repository,
            (None, Some(dir)) => {
                info!(target: "werewolf::service", dir = %dir.display(), "using file-backed store");
                Arc::new(FileMatchRepository::new(dir)?)
            }
            (None, None) => Arc::new(InMemoryMatchRepo::new()),
        };

        let store = Arc::new(MatchStore::from_shared(repository));
        Ok(MatchService::new(store, self.config))
    }
}

impl MatchService {
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }
}
