//! Version information for abogus binaries

/// Current version, stamped by build.rs (ABOGUS_VERSION or the package version)
pub const VERSION: &str = env!("ABOGUS_VERSION");

/// Git commit hash (set at compile time)
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Get full version string with optional build information
pub fn full_version() -> String {
    let mut version = VERSION.to_string();

    if let Some(commit) = GIT_COMMIT {
        version.push_str(&format!(" ({})", short_commit(commit)));
    }

    version
}

// First 8 characters, never splitting a multibyte character
fn short_commit(commit: &str) -> String {
    commit.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commit() {
        assert_eq!(short_commit("0123456789abcdef"), "01234567");
        assert_eq!(short_commit("abc"), "abc");
        assert_eq!(short_commit("ééééééééé"), "éééééééé");
    }

    #[test]
    fn test_full_version_starts_with_version() {
        assert!(full_version().starts_with(VERSION));
    }
}
