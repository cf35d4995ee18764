use thiserror::Error;

/// Failure of a single history page fetch.
///
/// Every failure the fetcher can hit collapses into one of these variants, so the
/// pagination state machine only ever has to record a cause and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(String),
    /// Non-2xx status from the history service
    #[error("History service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// Body did not match the expected shape or carried unparseable counts
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Explorer link could not be built. Callers must not navigate on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("No explorer configured for network '{0}'")]
    UnknownNetwork(String),
    #[error("Nothing to open: the hash or address is empty")]
    EmptyValue,
    #[error("Unknown explorer path kind '{0}' (expected 'tx' or 'address')")]
    UnknownPathKind(String),
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
    #[error("Failed to load explorer table from {path}: {reason}")]
    ExplorerTable { path: String, reason: String },
}

/// Pull a readable message out of an error body.
///
/// JSON bodies of the form `{"message": "..."}` or `{"error": "..."}` are reduced to the
/// message; anything else is trimmed and cut to a sane length for display.
pub fn extract_clean_error(body: &str) -> String {
    const MAX_LEN: usize = 200;

    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let message = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str());
        if let Some(message) = message {
            return message.trim().to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_LEN {
        let cut: String = trimmed.chars().take(MAX_LEN).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
