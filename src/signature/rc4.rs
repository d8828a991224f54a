//! RC4-compatible stream cipher.

use crate::exceptions::{Result, SignError};
use log::trace;

/// RC4 keystream generator; the S-box lives only as long as this value
#[derive(Debug, Clone)]
pub struct Rc4 {
    sbox: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Run the key schedule. Empty keys are rejected before any mixing.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(SignError::EmptyKey);
        }

        let mut sbox = [0u8; 256];
        for (index, slot) in sbox.iter_mut().enumerate() {
            *slot = index as u8;
        }

        let mut j: u8 = 0;
        for i in 0..256 {
            j = j.wrapping_add(sbox[i]).wrapping_add(key[i % key.len()]);
            sbox.swap(i, j as usize);
        }

        Ok(Rc4 { sbox, i: 0, j: 0 })
    }

    /// Next keystream byte
    pub fn next_byte(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.sbox[self.i as usize]);
        self.sbox.swap(self.i as usize, self.j as usize);
        let t = self.sbox[self.i as usize].wrapping_add(self.sbox[self.j as usize]);
        self.sbox[t as usize]
    }

    /// XOR `data` with the keystream, advancing the cipher
    pub fn apply(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|&b| b ^ self.next_byte()).collect()
    }
}

/// Encrypt (or decrypt, the operation is its own inverse) under `key`
pub fn rc4_encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let mut cipher = Rc4::new(key)?;
    if plaintext.is_empty() {
        return Ok(Vec::new());
    }
    trace!("🔒 rc4: len={} key={}", plaintext.len(), hex::encode(key));
    Ok(cipher.apply(plaintext))
}
