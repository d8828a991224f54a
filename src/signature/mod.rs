//! a_bogus signature pipeline

pub mod clock;
pub mod constants;
pub mod defaults;
pub mod descriptor;
pub mod encoder;
pub mod rc4;
pub mod signer;
pub mod sm3;

// Re-export the pipeline types
pub use clock::{Clock, FixedClock, SystemClock};
pub use descriptor::{DescriptorBlock, EnvironmentDescriptor, FieldValue};
pub use encoder::{Alphabet, encode};
pub use rc4::{Rc4, rc4_encrypt};
pub use signer::{Signer, derive_key};
pub use sm3::{Digest, Sm3, sm3_twice};
