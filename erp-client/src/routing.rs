//! Route guard for the console's client-side routes
//!
//! Decides whether a navigation may proceed. Protected sections need an
//! authenticated session and are never served from the product's primary
//! (marketing) domain.

/// Public landing route
pub const LANDING_ROUTE: &str = "/";
/// Login route
pub const LOGIN_ROUTE: &str = "/login";

/// Sections that require an authenticated session
pub const PROTECTED_SECTIONS: [&str; 4] = ["/inventario", "/ventas", "/configuracion", "/dashboard"];

/// Outcome of a navigation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLanding,
}

/// Whether `path` falls under a protected section.
pub fn is_protected(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    PROTECTED_SECTIONS.iter().any(|section| {
        path.strip_prefix(section)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// Navigation guard bound to the product's primary domain
#[derive(Debug, Clone)]
pub struct RouteGuard {
    primary_domain: String,
}

impl RouteGuard {
    pub fn new(primary_domain: impl Into<String>) -> Self {
        Self {
            primary_domain: primary_domain.into().trim().to_ascii_lowercase(),
        }
    }

    /// Whether `host` (optionally with `:port`) is the marketing domain itself.
    pub fn is_primary_domain(&self, host: &str) -> bool {
        let host = host.split(':').next().unwrap_or(host).trim().to_ascii_lowercase();
        !self.primary_domain.is_empty()
            && (host == self.primary_domain
                || host.strip_prefix("www.") == Some(self.primary_domain.as_str()))
    }

    pub fn decide(&self, host: &str, path: &str, authenticated: bool) -> RouteDecision {
        if !is_protected(path) {
            return RouteDecision::Allow;
        }
        if self.is_primary_domain(host) {
            tracing::debug!(host, path, "protected path on primary domain");
            return RouteDecision::RedirectToLanding;
        }
        if !authenticated {
            tracing::debug!(path, "unauthenticated access to protected path");
            return RouteDecision::RedirectToLanding;
        }
        RouteDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_sections_match_on_segment_boundary() {
        assert!(is_protected("/inventario"));
        assert!(is_protected("/inventario/productos/4"));
        assert!(is_protected("/dashboard?tab=ventas"));
        assert!(!is_protected("/inventarios"));
        assert!(!is_protected("/"));
        assert!(!is_protected(LOGIN_ROUTE));
    }

    #[test]
    fn anonymous_users_are_sent_to_landing() {
        let guard = RouteGuard::new("erp.example");
        assert_eq!(
            guard.decide("acme.erp.example", "/ventas/nueva", false),
            RouteDecision::RedirectToLanding
        );
        assert_eq!(
            guard.decide("acme.erp.example", "/ventas/nueva", true),
            RouteDecision::Allow
        );
        assert_eq!(guard.decide("acme.erp.example", "/login", false), RouteDecision::Allow);
    }

    #[test]
    fn primary_domain_never_serves_protected_paths() {
        let guard = RouteGuard::new("ERP.example");
        for host in ["erp.example", "www.erp.example", "erp.example:443"] {
            assert_eq!(
                guard.decide(host, "/configuracion/roles", true),
                RouteDecision::RedirectToLanding,
                "{host}"
            );
            assert_eq!(guard.decide(host, LANDING_ROUTE, false), RouteDecision::Allow);
        }
        assert!(!guard.is_primary_domain("acme.erp.example"));
    }
}
