//! The static method + path table that gates every API route.

use tirehub_entity::Role;

/// What a route requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in principal.
    Authenticated,
    /// A signed-in principal holding one of these roles.
    Roles(&'static [Role]),
}

/// One entry of the table. An empty `methods` list matches every method.
///
/// In `pattern`, `*` matches exactly one path segment and a trailing `**`
/// matches all remaining segments (including none).
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    /// HTTP methods the rule applies to.
    pub methods: &'static [&'static str],
    /// Path pattern.
    pub pattern: &'static str,
    /// Requirement when the rule matches.
    pub access: Access,
}

const ANY_ROLE: &[Role] = &[Role::User, Role::Manager, Role::Tto];
const MANAGER: &[Role] = &[Role::Manager];
const DECIDERS: &[Role] = &[Role::Manager, Role::Tto];

const fn rule(
    methods: &'static [&'static str],
    pattern: &'static str,
    access: Access,
) -> RouteRule {
    RouteRule {
        methods,
        pattern,
        access,
    }
}

/// Ordered route table; the first matching rule wins and unmatched routes
/// require authentication.
const DEFAULT_RULES: &[RouteRule] = &[
    rule(&["POST"], "/api/auth/login", Access::Public),
    rule(&["POST"], "/api/auth/register", Access::Public),
    rule(&["GET"], "/api/health", Access::Public),
    rule(&["GET"], "/api/tire-requests/images/**", Access::Public),
    rule(&["GET"], "/api/employees", Access::Roles(MANAGER)),
    rule(&["POST"], "/api/employees", Access::Roles(MANAGER)),
    rule(&["PUT", "DELETE"], "/api/employees/**", Access::Roles(MANAGER)),
    rule(&["GET"], "/api/employees/**", Access::Roles(ANY_ROLE)),
    rule(&["POST"], "/api/tire-requests", Access::Roles(ANY_ROLE)),
    rule(&["PUT"], "/api/tire-requests/*/status", Access::Roles(DECIDERS)),
    rule(&["GET"], "/api/tire-requests", Access::Roles(DECIDERS)),
    rule(&["GET"], "/api/tire-requests/status/**", Access::Roles(DECIDERS)),
    rule(&["GET"], "/api/tire-requests/vehicle/**", Access::Roles(DECIDERS)),
    rule(&["GET"], "/api/tire-requests/user/**", Access::Roles(ANY_ROLE)),
    rule(&["GET"], "/api/tire-requests/*", Access::Roles(ANY_ROLE)),
    rule(
        &["DELETE"],
        "/api/tire-requests/*/images/*",
        Access::Roles(ANY_ROLE),
    ),
];

/// The route table consulted by the authorization middleware.
#[derive(Debug, Clone)]
pub struct RoutePolicies {
    rules: Vec<RouteRule>,
}

impl RoutePolicies {
    /// Creates the default table.
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Requirement for `method` on `path`.
    pub fn resolve(&self, method: &str, path: &str) -> Access {
        self.rules
            .iter()
            .find(|r| {
                (r.methods.is_empty() || r.methods.iter().any(|m| m.eq_ignore_ascii_case(method)))
                    && path_matches(r.pattern, path)
            })
            .map(|r| r.access)
            .unwrap_or(Access::Authenticated)
    }
}

impl Default for RoutePolicies {
    fn default() -> Self {
        Self::new()
    }
}

/// Segment-wise glob match of `path` against `pattern`.
fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.split('/').filter(|s| !s.is_empty());
    let mut path_segments = path.split('/').filter(|s| !s.is_empty());

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (Some("**"), _) => return true,
            (Some("*"), Some(_)) => {}
            (Some(expected), Some(actual)) if expected == actual => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}
