//! Utility functions for abogus

use std::env;

/// Check if an environment variable is set to a truthy value
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_env_true(key: &str) -> bool {
    env::var(key).map(|val| is_truthy(&val)).unwrap_or(false)
}

/// Truthiness rule shared by env flags
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "on" | "yes" | "t"
    )
}

/// Split a `key=value` pair given on the command line
pub fn split_pair(raw: &str) -> Option<(&str, &str)> {
    let (key, value) = raw.split_once('=')?;
    (!key.is_empty()).then_some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for v in ["1", "TRUE", "on", "Yes", "t"] {
            assert!(is_truthy(v), "{v}");
        }
        for v in ["0", "false", "", "nope"] {
            assert!(!is_truthy(v), "{v}");
        }
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("aid=6383"), Some(("aid", "6383")));
        assert_eq!(split_pair("q=a=b"), Some(("q", "a=b")));
        assert_eq!(split_pair("empty="), Some(("empty", "")));
        assert_eq!(split_pair("=x"), None);
        assert_eq!(split_pair("novalue"), None);
    }
}
