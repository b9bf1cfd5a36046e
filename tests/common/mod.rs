//! Shared helpers for integration tests.

use std::io::Write;

use tempfile::{Builder, NamedTempFile};

pub const DEVELOPMENT_TOML: &str = r#"
production = false
apiServerUrl = "http://127.0.0.1:5000"

[auth0]
url = "dev-w83e009q.us"
audience = "https://localhost:5000"
clientId = "X5bU0An6GS9epNRHN7OUSayz1QhklFBv"
callbackURL = "http://localhost:8100"
"#;

/// Write `content` to a temporary file with the given extension.
pub fn config_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("env-config-")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// `DEVELOPMENT_TOML` with every line mentioning `key` removed.
pub fn without_key(key: &str) -> String {
    DEVELOPMENT_TOML
        .lines()
        .filter(|line| !line.trim_start().starts_with(key))
        .collect::<Vec<_>>()
        .join("\n")
}
