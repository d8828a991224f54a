//! SM3 hash engine (GB/T 32905-2016).
//!
//! Each [`Sm3`] owns its registers, pending buffer and byte counter, so a
//! fresh instance per computation is all the isolation callers need.
//! Finalizing with [`Sm3::sum`] resets the instance to the initial vector.

use super::constants::{
    SM3_BLOCK_SIZE, SM3_DIGEST_SIZE, SM3_IV, SM3_SCHEDULE_WORDS, SM3_T_HIGH, SM3_T_LOW,
};
use log::trace;

/// Raw SM3 digest
pub type Digest = [u8; SM3_DIGEST_SIZE];

/// Streaming SM3 state
#[derive(Debug, Clone)]
pub struct Sm3 {
    reg: [u32; 8],
    chunk: Vec<u8>,
    size: u64,
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm3 {
    pub fn new() -> Self {
        Sm3 {
            reg: SM3_IV,
            chunk: Vec::with_capacity(SM3_BLOCK_SIZE),
            size: 0,
        }
    }

    /// Return to the initial vector with an empty buffer and zero length
    pub fn reset(&mut self) {
        self.reg = SM3_IV;
        self.chunk.clear();
        self.size = 0;
    }

    /// Append bytes, compressing every completed 64-byte block
    pub fn write(&mut self, data: &[u8]) {
        self.size = self.size.wrapping_add(data.len() as u64);
        let mut input = data;

        if !self.chunk.is_empty() {
            let take = (SM3_BLOCK_SIZE - self.chunk.len()).min(input.len());
            self.chunk.extend_from_slice(&input[..take]);
            input = &input[take..];
            if self.chunk.len() < SM3_BLOCK_SIZE {
                return;
            }
            let mut block = std::mem::take(&mut self.chunk);
            self.compress(&block);
            block.clear();
            self.chunk = block;
        }

        let mut blocks = input.chunks_exact(SM3_BLOCK_SIZE);
        for block in &mut blocks {
            self.compress(block);
        }
        self.chunk.extend_from_slice(blocks.remainder());
    }

    /// Finalize and return the raw 32-byte digest.
    ///
    /// `data`, when given, is written first. The instance is reset before
    /// returning, so it cannot be used to continue the same message.
    pub fn sum(&mut self, data: Option<&[u8]>) -> Digest {
        if let Some(data) = data {
            self.write(data);
        }

        let bit_len = self.size.wrapping_mul(8);
        let mut tail = std::mem::take(&mut self.chunk);
        tail.push(0x80);
        while tail.len() % SM3_BLOCK_SIZE != SM3_BLOCK_SIZE - 8 {
            tail.push(0);
        }
        tail.extend_from_slice(&bit_len.to_be_bytes());

        for block in tail.chunks_exact(SM3_BLOCK_SIZE) {
            self.compress(block);
        }

        let mut digest = [0u8; SM3_DIGEST_SIZE];
        for (out, word) in digest.chunks_exact_mut(4).zip(self.reg.iter()) {
            out.copy_from_slice(&word.to_be_bytes());
        }

        self.reset();
        digest
    }

    /// Finalize and return the digest as 64 lowercase hex characters
    pub fn sum_hex(&mut self, data: Option<&[u8]>) -> String {
        hex::encode(self.sum(data))
    }

    fn compress(&mut self, block: &[u8]) {
        assert_eq!(
            block.len(),
            SM3_BLOCK_SIZE,
            "SM3 compresses exactly one 64-byte block"
        );

        let w = expand(block);
        let mut v = self.reg;

        for j in 0..64 {
            let a12 = rotl(v[0], 12);
            let ss1 = rotl(
                a12.wrapping_add(v[4]).wrapping_add(rotl(t(j), j as u32)),
                7,
            );
            let ss2 = ss1 ^ a12;
            let tt1 = ff(j, v[0], v[1], v[2])
                .wrapping_add(v[3])
                .wrapping_add(ss2)
                .wrapping_add(w[j + 68]);
            let tt2 = gg(j, v[4], v[5], v[6])
                .wrapping_add(v[7])
                .wrapping_add(ss1)
                .wrapping_add(w[j]);

            v[3] = v[2];
            v[2] = rotl(v[1], 9);
            v[1] = v[0];
            v[0] = tt1;
            v[7] = v[6];
            v[6] = rotl(v[5], 19);
            v[5] = v[4];
            v[4] = p0(tt2);
        }

        for (reg, word) in self.reg.iter_mut().zip(v) {
            *reg ^= word;
        }
    }
}

/// One-shot SM3 over a fresh engine
pub fn sm3(data: &[u8]) -> Digest {
    Sm3::new().sum(Some(data))
}

/// SM3 applied twice: `sm3(sm3(data))`
pub fn sm3_twice(data: &[u8]) -> Digest {
    let mut engine = Sm3::new();
    let inner = engine.sum(Some(data));
    let outer = engine.sum(Some(inner.as_slice()));
    trace!("🔐 sm3 twice: len={} digest={}", data.len(), hex::encode(outer));
    outer
}

/// Message expansion: W[0..68] followed by W'[0..64]
fn expand(block: &[u8]) -> [u32; SM3_SCHEDULE_WORDS] {
    let mut w = [0u32; SM3_SCHEDULE_WORDS];

    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ rotl(w[j - 3], 15)) ^ rotl(w[j - 13], 7) ^ w[j - 6];
    }
    for j in 0..64 {
        w[j + 68] = w[j] ^ w[j + 4];
    }

    w
}

#[inline]
fn rotl(x: u32, n: u32) -> u32 {
    x.rotate_left(n % 32)
}

#[inline]
fn t(j: usize) -> u32 {
    if j < 16 { SM3_T_LOW } else { SM3_T_HIGH }
}

#[inline]
fn ff(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline]
fn gg(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 { x ^ y ^ z } else { (x & y) | (!x & z) }
}

#[inline]
fn p0(x: u32) -> u32 {
    x ^ rotl(x, 9) ^ rotl(x, 17)
}

#[inline]
fn p1(x: u32) -> u32 {
    x ^ rotl(x, 15) ^ rotl(x, 23)
}
