//! Caller-side helpers: canonical parameters and signed query assembly

pub mod params;

pub use params::{
    CANONICAL_PARAMS, OutputFormat, QueryBuilder, SignedQuery, chrome_version, generate_ms_token,
};
