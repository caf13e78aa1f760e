//! Client configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | ERP_API_URL | resolved from ERP_HOSTNAME | explicit API base URL |
//! | ERP_HOSTNAME | localhost | hostname the console is served from |
//! | ERP_PRODUCT_DOMAIN | erp.example | product's primary domain |
//! | ERP_REQUEST_TIMEOUT_SECS | 30 | HTTP request timeout |
//! | ERP_CACHE_MAX_AGE_SECS | unset | age after which cached lists are refetched |
//! | ERP_LOG_LEVEL | info | default log filter |

use std::time::Duration;

/// Port the API listens on next to the console host
pub const API_PORT: u16 = 8000;

/// Base URL used when the hostname does not belong to the product
pub const FALLBACK_API_BASE: &str = "http://localhost:8000";

/// Resolve the API base URL from the hostname the console is served from.
///
/// `*.local` development hosts and tenant subdomains of the product domain
/// talk to the API on the same host, port 8000. Anything else falls back to
/// `localhost:8000`.
pub fn resolve_api_base(hostname: &str, product_domain: &str) -> String {
    let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
    let domain = product_domain.trim().trim_start_matches('.').to_ascii_lowercase();

    let is_local = host.ends_with(".local");
    let is_product = !domain.is_empty() && host.ends_with(&format!(".{domain}"));

    if is_local || is_product {
        format!("http://{host}:{API_PORT}")
    } else {
        FALLBACK_API_BASE.to_string()
    }
}

/// Client configuration for connecting to the ERP API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://acme.erp.example:8000")
    pub base_url: String,

    /// Product's primary (marketing) domain
    pub product_domain: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Cached entries older than this are refetched on read
    pub cache_max_age: Option<Duration>,

    /// Default log filter
    pub log_level: String,
}

impl ClientConfig {
    /// Create a configuration for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            product_domain: "erp.example".to_string(),
            token: None,
            timeout: 30,
            cache_max_age: None,
            log_level: "info".to_string(),
        }
    }

    /// Create a configuration whose base URL is resolved from a hostname
    pub fn for_host(hostname: &str, product_domain: impl Into<String>) -> Self {
        let product_domain = product_domain.into();
        let mut config = Self::new(resolve_api_base(hostname, &product_domain));
        config.product_domain = product_domain;
        config
    }

    /// Load configuration from the environment (and `.env`, if present)
    ///
    /// Unset or unparsable values use their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let product_domain =
            std::env::var("ERP_PRODUCT_DOMAIN").unwrap_or_else(|_| "erp.example".into());
        let hostname = std::env::var("ERP_HOSTNAME").unwrap_or_else(|_| "localhost".into());

        let mut config = match std::env::var("ERP_API_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let mut config = Self::new(url.trim());
                config.product_domain = product_domain;
                config
            }
            _ => Self::for_host(&hostname, product_domain),
        };

        config.timeout = std::env::var("ERP_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        config.cache_max_age = std::env::var("ERP_CACHE_MAX_AGE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);
        config.log_level = std::env::var("ERP_LOG_LEVEL").unwrap_or_else(|_| "info".into());
        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the cache staleness bound
    pub fn with_cache_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = Some(max_age);
        self
    }

    /// Set the product's primary domain
    pub fn with_product_domain(mut self, domain: impl Into<String>) -> Self {
        self.product_domain = domain.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(FALLBACK_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hosts_keep_their_name() {
        assert_eq!(
            resolve_api_base("acme.local", "erp.example"),
            "http://acme.local:8000"
        );
    }

    #[test]
    fn tenant_subdomains_keep_their_name() {
        assert_eq!(
            resolve_api_base("Acme.ERP.example", "erp.example"),
            "http://acme.erp.example:8000"
        );
    }

    #[test]
    fn foreign_hosts_fall_back_to_localhost() {
        assert_eq!(resolve_api_base("example.com", "erp.example"), FALLBACK_API_BASE);
        assert_eq!(resolve_api_base("localhost", "erp.example"), FALLBACK_API_BASE);
        // suffix match must be on a label boundary
        assert_eq!(resolve_api_base("notERP.example", "erp.example"), FALLBACK_API_BASE);
        assert_eq!(resolve_api_base("acme.com", ""), FALLBACK_API_BASE);
    }

    #[test]
    fn for_host_records_the_domain() {
        let config = ClientConfig::for_host("acme.erp.example", "erp.example").with_timeout(5);
        assert_eq!(config.base_url, "http://acme.erp.example:8000");
        assert_eq!(config.product_domain, "erp.example");
        assert_eq!(config.timeout, 5);
        assert!(config.cache_max_age.is_none());
    }
}
