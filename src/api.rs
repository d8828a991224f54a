//! High-level API for signing operations

use crate::exceptions::{Result, SignError};
use crate::request::{QueryBuilder, SignedQuery};
use crate::signature::defaults::{DEFAULT_ARGUMENTS, DEFAULT_SUFFIX, ENV_ARGUMENTS, ENV_SUFFIX};
use crate::signature::{Clock, Signer};
use log::debug;
use std::env;

/// Options for computing a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOptions {
    /// Appended to the query before hashing, and hashed on its own
    pub suffix: String,
    /// Key-derivation arguments: two option bytes, then the user-agent key byte
    pub arguments: [u8; 3],
}

impl Default for SignOptions {
    fn default() -> Self {
        SignOptions {
            suffix: DEFAULT_SUFFIX.to_string(),
            arguments: DEFAULT_ARGUMENTS,
        }
    }
}

impl SignOptions {
    /// Defaults overridden by `ABOGUS_SUFFIX` and `ABOGUS_ARGUMENTS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`SignOptions::from_env`] with a caller-supplied variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(suffix) = lookup(ENV_SUFFIX) {
            debug!("Using suffix from {ENV_SUFFIX}");
            options.suffix = suffix;
        }

        if let Some(raw) = lookup(ENV_ARGUMENTS) {
            options.arguments = parse_arguments(&raw)
                .map_err(|e| SignError::config(format!("{ENV_ARGUMENTS}: {e}")))?;
            debug!("Using arguments from {ENV_ARGUMENTS}: {:?}", options.arguments);
        }

        Ok(options)
    }
}

/// Parse `"a,b,c"` into three key-derivation bytes
pub fn parse_arguments(raw: &str) -> Result<[u8; 3]> {
    let values = raw
        .split(',')
        .map(str::trim)
        .map(|part| {
            part.parse::<u8>().map_err(|e| {
                SignError::invalid_arguments(format!("'{part}' is not a byte value: {e}"))
            })
        })
        .collect::<Result<Vec<u8>>>()?;

    <[u8; 3]>::try_from(values).map_err(|values| {
        SignError::invalid_arguments(format!("expected 3 values, got {}", values.len()))
    })
}

/// Sign a query string with default options and the system clock
pub fn sign(query: &str, user_agent: &str) -> Result<String> {
    Signer::new().sign(query, user_agent)
}

/// Sign a query string with explicit options and the system clock
pub fn sign_with_options(query: &str, user_agent: &str, options: &SignOptions) -> Result<String> {
    Signer::new().sign_with(query, user_agent, options)
}

/// Render the builder's query and sign it
pub fn sign_params<C: Clock>(
    builder: &QueryBuilder,
    user_agent: &str,
    options: &SignOptions,
    clock: C,
) -> Result<SignedQuery> {
    let query = builder.build();
    debug!("📝 Signing query with {} parameters", builder.len());

    let token = Signer::with_clock(clock).sign_with(&query, user_agent, options)?;
    Ok(SignedQuery { query, token })
}
