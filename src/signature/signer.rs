//! Signature orchestrator: composes hash, cipher, descriptor and encoder
//! into the final `a_bogus` token.

use super::clock::{Clock, SystemClock};
use super::constants::{KEY_MASK_EVEN, KEY_MASK_ODD, KEY_TIMESTAMP_MODULUS};
use super::descriptor::DescriptorBlock;
use super::encoder::{Alphabet, encode};
use super::rc4::rc4_encrypt;
use super::sm3::{sm3, sm3_twice};
use crate::api::SignOptions;
use crate::exceptions::Result;
use log::{debug, info, trace};

/// Derive the 4-byte cipher key.
///
/// Each timestamp byte keeps one bit-parity half (`0xAA` or `0x55`) and
/// takes the complementary half from the caller's option byte.
pub fn derive_key(seed: u16, options: [u8; 2]) -> [u8; 4] {
    let [low, high] = seed.to_le_bytes();
    [
        (low & KEY_MASK_EVEN) | (options[0] & KEY_MASK_ODD),
        (low & KEY_MASK_ODD) | (options[0] & KEY_MASK_EVEN),
        (high & KEY_MASK_EVEN) | (options[1] & KEY_MASK_ODD),
        (high & KEY_MASK_ODD) | (options[1] & KEY_MASK_EVEN),
    ]
}

/// Produces signature tokens, reading time from `C`
#[derive(Debug, Clone, Default)]
pub struct Signer<C = SystemClock> {
    clock: C,
}

impl Signer<SystemClock> {
    pub fn new() -> Self {
        Signer { clock: SystemClock }
    }
}

impl<C: Clock> Signer<C> {
    pub fn with_clock(clock: C) -> Self {
        Signer { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Sign with the default suffix and key-derivation arguments
    pub fn sign(&self, query: &str, user_agent: &str) -> Result<String> {
        self.sign_with(query, user_agent, &SignOptions::default())
    }

    /// Sign with explicit options. The clock is read twice: once before
    /// any hashing (start) and once before the descriptor block is built (end).
    pub fn sign_with(&self, query: &str, user_agent: &str, options: &SignOptions) -> Result<String> {
        let suffix = options.suffix.as_str();
        let [option_low, option_high, agent_key_byte] = options.arguments;

        let start = self.clock.now_millis();
        trace!("⏱️ sign start: {start}");

        let digest_query = sm3_twice(format!("{query}{suffix}").as_bytes());
        let digest_suffix = sm3_twice(suffix.as_bytes());

        let agent_cipher = rc4_encrypt(user_agent.as_bytes(), &[0, 1, agent_key_byte])?;
        let digest_agent = sm3(encode(&agent_cipher, Alphabet::S3).as_bytes());
        debug!(
            "🔐 digests: query={} suffix={} agent={}",
            hex::encode(digest_query),
            hex::encode(digest_suffix),
            hex::encode(digest_agent)
        );

        let end = self.clock.now_millis();
        trace!("⏱️ sign end: {end}");

        let block = DescriptorBlock::standard(start, end);
        let digest_block = sm3_twice(block.serialize()?.as_bytes());
        debug!("🧾 descriptor digest: {}", hex::encode(digest_block));

        let seed = (end % KEY_TIMESTAMP_MODULUS) as u16;
        let key = derive_key(seed, [option_low, option_high]);
        trace!("🔑 key: seed={seed} bytes={key:?}");

        // prefix is the first two derived key bytes
        let mut payload = Vec::with_capacity(2 + 4 * digest_query.len());
        payload.extend_from_slice(&key[..2]);
        for digest in [digest_query, digest_suffix, digest_agent, digest_block] {
            payload.extend(rc4_encrypt(&digest, &key)?);
        }

        let token = encode(&payload, Alphabet::S4);
        info!(
            "✅ signature generated: query_len={} token_len={}",
            query.len(),
            token.len()
        );
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::clock::FixedClock;

    const QUERY: &str = "device_platform=webapp&aid=6383";
    const START: u64 = 1_700_000_000_000;
    const END: u64 = 1_700_000_000_456;
    const PINNED: &str = "xgDAGURP1bYstC/5pBE1D7dt64UBJ7hvRe-ZmxMs9eP7BgBcywqz8VONierfW00okIR6a19xnWFwsg5i/lUdVy7Wr8eoxu6HG/HpsY1Bl1X2BRVY/WD/N8QjeQT6092FbTy5UTwXZaPgnwgCTqK0kygrRurp-NaALQa02Dxahxu1";

    fn signer() -> Signer<FixedClock> {
        Signer::with_clock(FixedClock::start_end(START, END))
    }

    #[test]
    fn test_derive_key_masks() {
        assert_eq!(derive_key(0x1234, [0, 1]), [32, 20, 3, 16]);
        assert_eq!(derive_key(456, [0, 1]), [136, 64, 1, 1]);
        assert_eq!(derive_key(0, [0xFF, 0xFF]), [0x55, 0xAA, 0x55, 0xAA]);
        assert_eq!(derive_key(0xFFFF, [0, 0]), [0xAA, 0x55, 0xAA, 0x55]);
    }

    #[test]
    fn test_prefix_carries_derived_key_bytes() {
        // end = 1_700_000_000_456, end mod 65536 = 27080
        let key = derive_key((END % KEY_TIMESTAMP_MODULUS) as u16, [0, 1]);
        assert_eq!(key, [136, 64, 41, 65]);

        let expected = encode(&[key[0], key[1], 0], Alphabet::S4);
        let token = signer().sign(QUERY, "UA-STRING").unwrap();
        assert_eq!(&token[..2], &expected[..2]);
        assert!(token.starts_with("xgDAGURP1b"));
    }

    #[test]
    fn test_pinned_token() {
        assert_eq!(signer().sign(QUERY, "UA-STRING").unwrap(), PINNED);
    }

    #[test]
    fn test_repeatable_under_fixed_clock() {
        let signer = signer();
        let first = signer.sign(QUERY, "UA-STRING").unwrap();
        signer.clock().rewind();
        let second = signer.sign(QUERY, "UA-STRING").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_token_length() {
        // 2-byte prefix + 4 digests = 130 bytes, one trailing byte dropped
        assert_eq!(signer().sign(QUERY, "UA-STRING").unwrap().len(), 172);
        assert_eq!(signer().sign("", "").unwrap().len(), 172);
    }

    #[test]
    fn test_query_changes_token() {
        let a = signer().sign(QUERY, "UA-STRING").unwrap();
        let b = signer().sign("device_platform=webapp&aid=6384", "UA-STRING").unwrap();
        assert_ne!(a, b);
        assert_eq!(
            b,
            "xgpjKfZ4Hc6lbIjFiQwPcfLlIaZwFwFjtMssIu3-pqm9t6Bcywqz8VONierfW00okIR6a19xnWFwsg5i/lUdVy7Wr8eoxu6HG/HpsY1Bl1X2BRVY/WD/N8QjeQT6092FbTy5UTwXZaPgnwgCTqK0kygrRurp-NaALQa02Dxahxu1"
        );
    }

    #[test]
    fn test_inputs_change_token() {
        let base = signer().sign(QUERY, "UA-STRING").unwrap();

        assert_ne!(signer().sign(QUERY, "UA-OTHER").unwrap(), base);

        let later = Signer::with_clock(FixedClock::start_end(START, END + 1));
        assert_ne!(later.sign(QUERY, "UA-STRING").unwrap(), base);

        let options = SignOptions {
            arguments: [1, 0, 14],
            ..SignOptions::default()
        };
        assert_ne!(signer().sign_with(QUERY, "UA-STRING", &options).unwrap(), base);
    }

    #[test]
    fn test_parallel_signers_agree() {
        let tokens: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| signer().sign(QUERY, "UA-STRING").unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(tokens.iter().all(|t| t == PINNED));
    }
}
