use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use listing_extraction::{ActorConfig, PollConfig, ProxyConfig, ScraperConfig, SecretString};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scraper_api_key: Option<SecretString>,
    pub scraper_api_base_url: Option<String>,
    pub premium_proxy_hosts: Option<Vec<String>>,
    pub apify_api_token: Option<SecretString>,
    pub apify_actor_id: Option<String>,
    pub apify_base_url: Option<String>,
    pub actor_hosts: Option<Vec<String>>,
    pub poll_interval_secs: Option<u64>,
    pub poll_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let list = |name: &str| {
            var(name).map(|v| {
                v.split(',')
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect::<Vec<_>>()
            })
        };
        let secs = |name: &str| -> Result<Option<u64>> {
            var(name)
                .map(|v| {
                    v.parse::<u64>()
                        .with_context(|| format!("{name} must be a whole number of seconds"))
                })
                .transpose()
        };
        let positive_secs = |name: &str| -> Result<Option<u64>> {
            match secs(name)? {
                Some(0) => bail!("{name} must be at least 1 second"),
                other => Ok(other),
            }
        };

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            scraper_api_key: var("SCRAPER_API_KEY").map(SecretString::new),
            scraper_api_base_url: var("SCRAPER_API_BASE_URL"),
            premium_proxy_hosts: list("PREMIUM_PROXY_HOSTS"),
            apify_api_token: var("APIFY_API_TOKEN").map(SecretString::new),
            apify_actor_id: var("APIFY_ACTOR_ID"),
            apify_base_url: var("APIFY_BASE_URL"),
            actor_hosts: list("ACTOR_HOSTS"),
            poll_interval_secs: positive_secs("POLL_INTERVAL_SECS")?,
            poll_timeout_secs: secs("POLL_TIMEOUT_SECS")?,
            request_timeout_secs: positive_secs("REQUEST_TIMEOUT_SECS")?,
            user_agent: var("SCRAPER_USER_AGENT"),
        })
    }

    /// Actor automation needs both a token and an actor id.
    pub fn actor_enabled(&self) -> bool {
        self.apify_api_token.is_some() && self.apify_actor_id.is_some()
    }

    /// Library configuration for [`listing_extraction::ListingScraper`].
    pub fn to_scraper_config(&self) -> ScraperConfig {
        let mut config = ScraperConfig::new();

        if let Some(key) = &self.scraper_api_key {
            let mut proxy = ProxyConfig::new(key.expose());
            if let Some(base_url) = &self.scraper_api_base_url {
                proxy = proxy.with_base_url(base_url.as_str());
            }
            if let Some(hosts) = &self.premium_proxy_hosts {
                proxy = proxy.with_premium_hosts(hosts.iter().cloned());
            }
            config = config.with_proxy(proxy);
        }

        if let (Some(token), Some(actor_id)) = (&self.apify_api_token, &self.apify_actor_id) {
            let mut actor = ActorConfig::new(token.expose(), actor_id.as_str());
            if let Some(base_url) = &self.apify_base_url {
                actor = actor.with_base_url(base_url.as_str());
            }
            config = config.with_actor(actor);
        }

        if let Some(hosts) = &self.actor_hosts {
            config = config.with_actor_hosts(hosts.iter().cloned());
        }

        let defaults = PollConfig::default();
        config = config.with_poll(PollConfig::new(
            self.poll_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.interval),
            self.poll_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        ));

        if let Some(secs) = self.request_timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }

        config
    }
}
