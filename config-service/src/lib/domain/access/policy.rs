/// Decision for a single request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Reject,
}

const STATIC_ASSET_PREFIXES: &[&str] = &["/css/", "/js/", "/images/", "/assets/"];

const STATIC_ASSET_SUFFIXES: &[&str] = &[
    ".css", ".js", ".png", ".jpg", ".ico", ".svg", ".woff", ".woff2", ".ttf",
];

const API_DOC_PREFIXES: &[&str] = &["/swagger", "/rapidoc", "/redoc", "/openapi"];

/// Public-path rules, evaluated top to bottom; first match wins.
///
/// Order matters: some prefixes overlap (`/api/auth/` sits under the
/// otherwise-protected `/api/` space).
const PUBLIC_RULES: &[fn(&str) -> bool] = &[
    // Root path
    |path| path.is_empty() || path == "/",
    // Public page shells; the panel checks auth client-side, the policy
    // only protects the API
    |path| path == "/login" || path == "/register" || path == "/panel",
    // Static folder
    |path| path.starts_with("/static/"),
    // Registration and login must be reachable without a token
    |path| path.starts_with("/api/auth/"),
    // Static assets by location or extension
    |path| {
        STATIC_ASSET_PREFIXES.iter().any(|p| path.starts_with(p))
            || STATIC_ASSET_SUFFIXES.iter().any(|s| path.ends_with(s))
    },
    // API documentation endpoints
    |path| API_DOC_PREFIXES.iter().any(|p| path.starts_with(p)),
];

/// Pure path-based access decision.
///
/// Total over all inputs: every path reaches exactly one terminal decision.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether a request may proceed.
    ///
    /// Public rules are checked in order first; any other path is allowed
    /// only when the caller presented valid claims.
    pub fn decide(path: &str, has_valid_claims: bool) -> Access {
        for rule in PUBLIC_RULES {
            if rule(path) {
                return Access::Allow;
            }
        }

        if has_valid_claims {
            Access::Allow
        } else {
            Access::Reject
        }
    }
}
