//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time.

/// Validate an engine version argument.
///
/// Versions are passed to the eligibility check verbatim, so only
/// surrounding whitespace is removed.
pub fn validate_version(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Version cannot be empty".to_string());
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("Version cannot contain whitespace: '{trimmed}'"));
    }
    Ok(trimmed.to_string())
}
