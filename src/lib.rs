//! abogus - deterministic `a_bogus` request-signature engine
//!
//! The signature is built from SM3 digests of the query, a fixed suffix,
//! the RC4-encrypted user agent and a serialized descriptor block, each
//! encrypted under a timestamp-derived RC4 key and encoded with a custom
//! 64-symbol alphabet.
//!
//! ```
//! use abogus::signature::{FixedClock, Signer};
//!
//! let signer = Signer::with_clock(FixedClock::start_end(1_700_000_000_000, 1_700_000_000_456));
//! let token = signer.sign("device_platform=webapp&aid=6383", "UA-STRING").unwrap();
//! assert_eq!(token.len(), 172);
//! ```

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::too_many_arguments,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::single_match_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod exceptions;
pub mod exit_codes;
pub mod logger;
pub mod request;
pub mod signature;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{SignOptions, parse_arguments, sign, sign_params, sign_with_options};
pub use exceptions::{Result, SignError};
pub use request::{OutputFormat, QueryBuilder, SignedQuery};
pub use signature::{Clock, FixedClock, Signer, SystemClock};
