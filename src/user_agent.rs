//! Shared User-Agent strings for checker HTTP traffic.
//!
//! Audited hosts frequently reject obviously synthetic clients outright,
//! which would misreport working links as broken. The default identity is
//! therefore a mainstream browser string; operators who prefer an honest
//! tool identity can override it per run.

/// Default browser-like User-Agent for probe requests.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Tool-identifying User-Agent (opt-in alternative to the browser default).
#[must_use]
pub fn tool_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("linkaudit/{version} (link-hygiene-audit)")
}
