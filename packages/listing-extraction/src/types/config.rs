//! Configuration types for retrieval and job polling.
//!
//! Credentials are passed in explicitly; nothing in the library reads the
//! process environment.

use std::time::Duration;

use crate::security::SecretString;

pub const DEFAULT_PROXY_BASE_URL: &str = "https://api.scraperapi.com/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; ListingScraper/1.0; +https://example.com/bot)";

/// Top-level configuration for [`crate::ListingScraper`].
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Rendering proxy. `None` means every page is fetched directly.
    pub proxy: Option<ProxyConfig>,

    /// Browser-automation job service. `None` disables the actor path.
    pub actor: Option<ActorConfig>,

    /// Hosts that need full browser automation (exact host or subdomain).
    ///
    /// Only consulted when `actor` is configured.
    pub actor_hosts: Vec<String>,

    /// Polling cadence and deadline for actor jobs.
    pub poll: PollConfig,

    /// User-Agent for the direct (unrendered) fetch.
    pub user_agent: String,

    /// Timeout applied to every outbound HTTP request.
    pub request_timeout: Duration,

    /// Reject listing URLs that point at loopback, private, or link-local
    /// addresses.
    pub block_private_networks: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            actor: None,
            actor_hosts: vec!["zillow.com".to_string()],
            poll: PollConfig::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(60),
            block_private_networks: true,
        }
    }
}

impl ScraperConfig {
    /// Create a new config with default values (direct fetch only).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_actor(mut self, actor: ActorConfig) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_actor_hosts(mut self, hosts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.actor_hosts = hosts.into_iter().map(|h| h.into()).collect();
        self
    }

    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_block_private_networks(mut self, block: bool) -> Self {
        self.block_private_networks = block;
        self
    }
}

/// Rendering-capable HTTP proxy (ScraperAPI-style query interface).
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub country_code: String,
    /// Ask the proxy to execute JavaScript before returning HTML.
    pub render: bool,
    /// Hosts that get `premium=true` (residential pool).
    pub premium_hosts: Vec<String>,
}

impl ProxyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key),
            base_url: DEFAULT_PROXY_BASE_URL.to_string(),
            country_code: "us".to_string(),
            render: true,
            premium_hosts: vec![
                "zillow.com".to_string(),
                "realtor.com".to_string(),
                "redfin.com".to_string(),
            ],
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = country_code.into();
        self
    }

    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    pub fn with_premium_hosts(
        mut self,
        hosts: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.premium_hosts = hosts.into_iter().map(|h| h.into()).collect();
        self
    }
}

/// Job-execution service credentials and the actor that scrapes listings.
#[derive(Debug, Clone)]
pub struct ActorConfig {
    pub token: SecretString,
    pub actor_id: String,
    /// Override for the service's API root.
    pub base_url: Option<String>,
}

impl ActorConfig {
    pub fn new(token: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token),
            actor_id: actor_id.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Polling cadence for actor jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between status checks.
    pub interval: Duration,
    /// Wall-clock deadline measured from the first status check.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(300),
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

/// True when `host` equals `pattern` or is a subdomain of it.
pub fn host_matches(host: &str, pattern: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let pattern = pattern.trim().trim_start_matches('.').to_ascii_lowercase();
    if pattern.is_empty() {
        return false;
    }
    host == pattern || host.ends_with(&format!(".{}", pattern))
}
