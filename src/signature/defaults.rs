// src/signature/defaults.rs
// Centralized default values; every one of these can be overridden per call

// =================================
// Signing defaults
// =================================
pub const DEFAULT_SUFFIX: &str = "cus";
pub const DEFAULT_ARGUMENTS: [u8; 3] = [0, 1, 14];

// =================================
// Request defaults
// =================================
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";
pub const DEFAULT_TOKEN_PARAM: &str = "a_bogus";
pub const DEFAULT_MS_TOKEN_LENGTH: usize = 120;

// Symbol set for generated msToken values (carried verbatim, duplicates included)
pub const MS_TOKEN_ALPHABET: &str =
    "ABCDEFGHIGKLMNOPQRSTUVWXYZabcdefghigklmnopqrstuvwxyz0123456789=";

// =================================
// Environment variables
// =================================
pub const ENV_SUFFIX: &str = "ABOGUS_SUFFIX";
pub const ENV_ARGUMENTS: &str = "ABOGUS_ARGUMENTS";
pub const ENV_USER_AGENT: &str = "ABOGUS_USER_AGENT";
pub const ENV_LOG_LEVEL: &str = "ABOGUS_LOG_LEVEL";
pub const ENV_LOG_PATH: &str = "ABOGUS_LOG_PATH";
pub const ENV_JSON_OUTPUT: &str = "ABOGUS_JSON_OUTPUT";
