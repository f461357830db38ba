//! Retrieval strategy selection.

use std::fmt;
use url::Url;

use crate::types::config::{host_matches, ScraperConfig};

/// How a listing page is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStrategy {
    /// Delegate the whole scrape to the job-execution service.
    ActorJob,
    /// Fetch HTML (proxy when configured, then direct) and extract locally.
    Html,
}

impl fmt::Display for RetrievalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalStrategy::ActorJob => f.write_str("actor-job"),
            RetrievalStrategy::Html => f.write_str("html"),
        }
    }
}

/// Picks a [`RetrievalStrategy`] per URL.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    actor_hosts: Vec<String>,
    actor_enabled: bool,
}

impl StrategySelector {
    pub fn new(actor_hosts: Vec<String>, actor_enabled: bool) -> Self {
        Self {
            actor_hosts,
            actor_enabled,
        }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.actor_hosts.clone(), config.actor.is_some())
    }

    /// Actor path only when the host needs browser automation *and* a job
    /// service is configured.
    pub fn select(&self, url: &Url) -> RetrievalStrategy {
        if !self.actor_enabled {
            return RetrievalStrategy::Html;
        }
        let host = url.host_str().unwrap_or_default();
        if self
            .actor_hosts
            .iter()
            .any(|pattern| host_matches(host, pattern))
        {
            RetrievalStrategy::ActorJob
        } else {
            RetrievalStrategy::Html
        }
    }
}
