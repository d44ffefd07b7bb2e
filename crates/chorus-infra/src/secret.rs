//! Environment credential resolution.
//!
//! Agent credentials are referenced by name in the agents file and resolved
//! from the process environment at startup (the binary loads `.env` first).
//! Resolved values are wrapped in [`SecretString`] and never logged.

use secrecy::SecretString;

/// Environment variable holding the AI completion API key.
pub const AI_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Resolve a credential by environment variable name.
///
/// Unset, empty, and non-unicode values all resolve to `None`; credentials
/// must be non-empty valid strings.
pub fn resolve_credential(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

/// Resolve the AI completion API key, if configured.
pub fn resolve_ai_key() -> Option<SecretString> {
    resolve_credential(AI_API_KEY_VAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_resolve_existing_credential() {
        // SAFETY: tests in this module use distinct variable names and
        // remove them before returning.
        unsafe { std::env::set_var("CHORUS_TEST_TOKEN_A", "token-value-123") };

        let resolved = resolve_credential("CHORUS_TEST_TOKEN_A").unwrap();
        assert_eq!(resolved.expose_secret(), "token-value-123");

        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("CHORUS_TEST_TOKEN_A") };
    }

    #[test]
    fn test_resolve_missing_credential() {
        assert!(resolve_credential("CHORUS_TEST_TOKEN_MISSING").is_none());
    }

    #[test]
    fn test_empty_value_is_treated_as_missing() {
        // SAFETY: distinct variable name, removed before returning.
        unsafe { std::env::set_var("CHORUS_TEST_TOKEN_B", "") };
        assert!(resolve_credential("CHORUS_TEST_TOKEN_B").is_none());
        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("CHORUS_TEST_TOKEN_B") };
    }
}
