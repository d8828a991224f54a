//! Canonical web-client query parameters and the signed query they produce

use crate::exceptions::Result;
use crate::signature::defaults::{DEFAULT_MS_TOKEN_LENGTH, DEFAULT_TOKEN_PARAM, MS_TOKEN_ALPHABET};
use log::{debug, trace};
use rand::Rng;
use serde::Serialize;
use std::io::Write;
use url::form_urlencoded;

/// Parameters every web API request carries, in send order
pub const CANONICAL_PARAMS: &[(&str, &str)] = &[
    ("device_platform", "webapp"),
    ("aid", "6383"),
    ("channel", "channel_pc_web"),
    ("publish_video_strategy_type", "2"),
    ("source", "channel_pc_web"),
    ("personal_center_strategy", "1"),
    ("profile_other_record_enable", "1"),
    ("land_to", "1"),
    ("update_version_code", "170400"),
    ("pc_client_type", "1"),
    ("pc_libra_divert", "Windows"),
    ("support_h265", "1"),
    ("support_dash", "1"),
    ("cpu_core_num", "8"),
    ("version_code", "170400"),
    ("version_name", "17.4.0"),
    ("cookie_enabled", "true"),
    ("screen_width", "1920"),
    ("screen_height", "1080"),
    ("browser_language", "zh-CN"),
    ("browser_platform", "Win32"),
    ("browser_name", "Chrome"),
    ("browser_version", "132.0.0.0"),
    ("browser_online", "true"),
    ("engine_name", "Blink"),
    ("engine_version", "132.0.0.0"),
    ("os_name", "Windows"),
    ("os_version", "10"),
    ("device_memory", "8"),
    ("platform", "PC"),
    ("downlink", "10"),
    ("effective_type", "4g"),
    ("round_trip_time", "100"),
];

/// Extract the Chrome version from a user agent (`... Chrome/132.0.0.0 Safari/...`)
pub fn chrome_version(user_agent: &str) -> Option<&str> {
    let (_, rest) = user_agent.split_once(" Chrome/")?;
    let version = rest.split(' ').next().unwrap_or(rest);
    (!version.is_empty()).then_some(version)
}

/// Random msToken drawn from the client's token alphabet
pub fn generate_ms_token<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let symbols = MS_TOKEN_ALPHABET.as_bytes();
    (0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())] as char)
        .collect()
}

/// Ordered query parameters; setting an existing key replaces it in place
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded with [`CANONICAL_PARAMS`]
    pub fn canonical() -> Self {
        let mut builder = Self::new();
        for (key, value) in CANONICAL_PARAMS {
            builder.set(*key, *value);
        }
        builder
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Align browser and engine versions with a Chrome user agent.
    /// Non-Chrome agents leave the parameters untouched.
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        match chrome_version(user_agent) {
            Some(version) => {
                trace!("🌐 browser version from user agent: {version}");
                self.set("browser_version", version);
                self.set("engine_version", version);
            }
            None => debug!("user agent carries no Chrome version, keeping defaults"),
        }
        self
    }

    /// Fill `msToken` with a random value unless the caller already set one
    pub fn ensure_ms_token<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        if self.get("msToken").is_none() {
            let token = generate_ms_token(rng, DEFAULT_MS_TOKEN_LENGTH);
            self.set("msToken", token);
        }
        self
    }

    /// URL-encoded `key=value&...` in insertion order
    pub fn build(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish()
    }
}

/// How a [`SignedQuery`] is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `{"query": ..., "a_bogus": ...}`
    Json,
    /// The bare token
    Token,
    /// The query with `a_bogus` appended
    Query,
}

/// A query string together with its signature token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedQuery {
    pub query: String,
    #[serde(rename = "a_bogus")]
    pub token: String,
}

impl SignedQuery {
    /// The query with `a_bogus=<token>` appended as the last parameter
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::for_suffix(self.query.clone(), 0)
            .append_pair(DEFAULT_TOKEN_PARAM, &self.token)
            .finish()
    }

    /// Write one line in `format`. Failed writes surface as `SignError::IoError`.
    pub fn write_to<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<()> {
        let line = match format {
            OutputFormat::Json => serde_json::to_string(self)?,
            OutputFormat::Token => self.token.clone(),
            OutputFormat::Query => self.to_query_string(),
        };
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}
