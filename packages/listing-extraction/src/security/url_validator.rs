//! Input URL validation (SSRF protection).
//!
//! Listing URLs arrive from untrusted callers and are fetched server-side,
//! so anything that is not a public http(s) address is rejected up front.
//! IP literals are checked directly (IPv4-mapped IPv6 included); hostnames
//! are checked against their resolved addresses by
//! [`UrlValidator::check_resolved`] when DNS checking is enabled, and
//! redirect targets by [`crate::fetchers::build_guarded_client`].

use std::collections::HashSet;
use std::net::IpAddr;
use url::{Host, Url};

use crate::error::{ScrapeError, ScrapeResult};

/// URL validator for SSRF protection.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Allowed URL schemes
    allowed_schemes: HashSet<String>,

    /// Blocked hostnames
    blocked_hosts: HashSet<String>,

    /// Blocked CIDR ranges
    blocked_cidrs: Vec<ipnet::IpNet>,

    /// Additional allowed hosts (bypass normal validation)
    allowed_hosts: HashSet<String>,

    /// Resolve hostnames and check every address
    check_dns: bool,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a new URL validator with default security rules.
    pub fn new() -> Self {
        let blocked_cidrs = [
            "10.0.0.0/8",
            "172.16.0.0/12",
            "192.168.0.0/16",
            "169.254.0.0/16", // Link-local / cloud metadata
            "127.0.0.0/8",    // Loopback
            "0.0.0.0/8",
            "::1/128",   // IPv6 loopback
            "fc00::/7",  // IPv6 private
            "fe80::/10", // IPv6 link-local
        ]
        .into_iter()
        .filter_map(|cidr| cidr.parse().ok())
        .collect();

        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            blocked_hosts: [
                "localhost",
                "metadata.google.internal",
                "metadata.gke.internal",
                "instance-data",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            blocked_cidrs,
            allowed_hosts: HashSet::new(),
            check_dns: false,
        }
    }

    /// Validator that only checks URL shape and scheme.
    ///
    /// For deployments that scrape intranet listing mirrors.
    pub fn allow_private_networks() -> Self {
        Self {
            blocked_hosts: HashSet::new(),
            blocked_cidrs: Vec::new(),
            ..Self::new()
        }
    }

    /// Add an allowed host (bypasses validation).
    pub fn allow_host(mut self, host: impl Into<String>) -> Self {
        self.allowed_hosts.insert(host.into());
        self
    }

    /// Also resolve hostnames in [`Self::validate_with_dns`] and reject
    /// those pointing at blocked ranges (DNS rebinding).
    pub fn with_dns_check(mut self) -> Self {
        self.check_dns = true;
        self
    }

    /// True when `ip` falls in a blocked range. IPv4-mapped IPv6 addresses
    /// are checked as their IPv4 form.
    pub fn is_blocked_ip(&self, ip: IpAddr) -> bool {
        let ip = match ip {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
            v4 => v4,
        };
        self.blocked_cidrs.iter().any(|cidr| cidr.contains(&ip))
    }

    /// Parse and validate a caller-supplied URL.
    pub fn validate(&self, raw: &str) -> ScrapeResult<Url> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(invalid("URL is required"));
        }

        let parsed = Url::parse(raw).map_err(|e| invalid(format!("malformed URL: {}", e)))?;

        if !self.allowed_schemes.contains(parsed.scheme()) {
            return Err(invalid(format!("disallowed URL scheme: {}", parsed.scheme())));
        }

        let host = parsed.host().ok_or_else(|| invalid("URL has no host"))?;
        let host_str = parsed.host_str().unwrap_or_default().to_ascii_lowercase();

        if self.allowed_hosts.contains(&host_str) {
            return Ok(parsed);
        }

        if self.blocked_hosts.contains(&host_str) {
            return Err(invalid(format!("blocked host: {}", host_str)));
        }

        let ip = match host {
            Host::Ipv4(ip) => Some(IpAddr::V4(ip)),
            Host::Ipv6(ip) => Some(IpAddr::V6(ip)),
            Host::Domain(_) => None,
        };
        if let Some(ip) = ip {
            if self.is_blocked_ip(ip) {
                return Err(invalid(format!("blocked IP range: {}", ip)));
            }
        }

        Ok(parsed)
    }

    /// [`Self::validate`], then [`Self::check_resolved`].
    pub async fn validate_with_dns(&self, raw: &str) -> ScrapeResult<Url> {
        let parsed = self.validate(raw)?;
        self.check_resolved(&parsed).await?;
        Ok(parsed)
    }

    /// With DNS checking enabled, resolve the host of an already validated
    /// URL and reject it if any address is blocked.
    pub async fn check_resolved(&self, url: &Url) -> ScrapeResult<()> {
        if !self.check_dns || self.blocked_cidrs.is_empty() {
            return Ok(());
        }

        let host = match url.host() {
            Some(Host::Domain(domain)) => domain.to_ascii_lowercase(),
            // IP literals were checked by validate
            _ => return Ok(()),
        };
        if self.allowed_hosts.contains(&host) {
            return Ok(());
        }

        let port = url.port_or_known_default().unwrap_or(80);
        let addrs = tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(|e| invalid(format!("could not resolve {}: {}", host, e)))?;

        for addr in addrs {
            if self.is_blocked_ip(addr.ip()) {
                return Err(invalid(format!(
                    "{} resolves to blocked IP {}",
                    host,
                    addr.ip()
                )));
            }
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ScrapeError {
    ScrapeError::InvalidInput {
        reason: reason.into(),
    }
}
