/// Parse and validate a `--env` entry.
///
/// Accepts `KEY=VALUE` or a bare `KEY`. The key must be non-empty and may not
/// contain whitespace.
///
/// # Errors
///
/// Returns an error message if the entry is malformed.
pub fn parse_env_pair(s: &str) -> Result<String, String> {
    let key = s.split_once('=').map_or(s, |(key, _)| key);

    if key.is_empty() {
        return Err(format!("Environment entry has an empty key: '{s}'"));
    }

    if key.chars().any(char::is_whitespace) {
        return Err(format!(
            "Environment key cannot contain whitespace: '{key}'"
        ));
    }

    Ok(s.to_string())
}
