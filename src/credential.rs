use std::env;
use crate::error::GitgenError;

/// Keeps printable ASCII (space through `~`) and trims the ends, which removes
/// the padding and line breaks that sneak in when keys are pasted into `.env` files.
pub fn sanitize(raw: &str) -> String {
    let printable: String = raw.chars().filter(|c| matches!(c, ' '..='~')).collect();
    printable.trim().to_string()
}

/// Reads and sanitizes the API key stored in `var`.
pub fn api_key_from_env(var: &str) -> Result<String, GitgenError> {
    let raw = env::var_os(var)
        .ok_or_else(|| GitgenError::Credential(format!("{} is not set", var)))?;

    let key = sanitize(&raw.to_string_lossy());
    if key.is_empty() {
        return Err(GitgenError::Credential(format!(
            "{} is blank once non-printable characters are removed",
            var
        )));
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_non_printable() {
        assert_eq!(sanitize("sk-abc123"), "sk-abc123");
        assert_eq!(sanitize(" sk-abc\r\n"), "sk-abc");
        assert_eq!(sanitize("sk-\u{feff}abc\u{7f}"), "sk-abc");
        assert_eq!(sanitize("\t\n"), "");
    }

    #[test]
    fn test_sanitize_keeps_inner_spaces() {
        assert_eq!(sanitize("Bearer sk-abc"), "Bearer sk-abc");
        assert_eq!(sanitize("sk-a\u{200b} b\n"), "sk-a b");
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_missing_variable() {
        let err = api_key_from_env("GITGEN_TEST_KEY_THAT_IS_NEVER_SET").unwrap_err();
        assert!(matches!(err, GitgenError::Credential(_)));
        assert!(err.to_string().contains("GITGEN_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_variable_with_only_garbage() {
        env::set_var("GITGEN_TEST_KEY_GARBAGE", " \u{200b}\n");
        let err = api_key_from_env("GITGEN_TEST_KEY_GARBAGE").unwrap_err();
        assert!(matches!(err, GitgenError::Credential(_)));
    }

    #[test]
    fn test_variable_is_sanitized() {
        env::set_var("GITGEN_TEST_KEY_PADDED", "  sk-live-42\n");
        assert_eq!(api_key_from_env("GITGEN_TEST_KEY_PADDED").unwrap(), "sk-live-42");
    }
}
