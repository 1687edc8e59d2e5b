//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time.

/// Validate a package import path argument.
///
/// Import paths are opaque, but they are never empty and never contain
/// whitespace, so either is almost certainly a quoting mistake.
pub fn validate_package(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Package import path cannot be empty".to_string());
    }

    if s.chars().any(char::is_whitespace) {
        return Err(format!(
            "Invalid package import path: '{s}'. Import paths cannot contain whitespace"
        ));
    }

    Ok(s.to_string())
}
