//! Default values for `ExportConfig` fields.

// ── Endpoint ───────────────────────────────────────────────────────────────

pub const ENDPOINT: &str = "https://mermaid.ink/img";

pub fn endpoint() -> String {
    ENDPOINT.to_string()
}

pub fn image_type() -> String {
    "png".to_string()
}

pub fn background_color() -> String {
    "white".to_string()
}

// ── HTTP ───────────────────────────────────────────────────────────────────

/// Some rendering hosts reject requests without a browser-like agent.
pub fn user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

pub const MIN_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 60;

pub fn timeout_secs() -> u64 {
    MIN_TIMEOUT_SECS
}

// ── Workers ────────────────────────────────────────────────────────────────

pub const MAX_JOBS: usize = 16;

pub fn jobs() -> usize {
    1
}
