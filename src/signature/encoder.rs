//! Variable-alphabet byte-to-text encoder.
//!
//! Input is consumed in 3-byte groups, each emitting four symbols from the
//! selected table. A trailing partial group (1 or 2 bytes) is dropped, not
//! padded; the remote verifier expects exactly `floor(n / 3) * 4` symbols.

use super::constants::{
    ALPHABET_S0, ALPHABET_S1, ALPHABET_S2, ALPHABET_S3, ALPHABET_S4, ENCODE_MASK_0,
    ENCODE_MASK_1, ENCODE_MASK_2, ENCODE_MASK_3,
};
use crate::exceptions::{Result, SignError};
use std::fmt;
use std::str::FromStr;

/// The five fixed symbol tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    S0,
    S1,
    S2,
    S3,
    S4,
}

impl Alphabet {
    pub const ALL: [Alphabet; 5] = [
        Alphabet::S0,
        Alphabet::S1,
        Alphabet::S2,
        Alphabet::S3,
        Alphabet::S4,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Alphabet::S0 => ALPHABET_S0,
            Alphabet::S1 => ALPHABET_S1,
            Alphabet::S2 => ALPHABET_S2,
            Alphabet::S3 => ALPHABET_S3,
            Alphabet::S4 => ALPHABET_S4,
        }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::S0 => write!(f, "s0"),
            Alphabet::S1 => write!(f, "s1"),
            Alphabet::S2 => write!(f, "s2"),
            Alphabet::S3 => write!(f, "s3"),
            Alphabet::S4 => write!(f, "s4"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = SignError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "s0" => Ok(Alphabet::S0),
            "s1" => Ok(Alphabet::S1),
            "s2" => Ok(Alphabet::S2),
            "s3" => Ok(Alphabet::S3),
            "s4" => Ok(Alphabet::S4),
            other => Err(SignError::UnknownAlphabet(other.to_string())),
        }
    }
}

/// Encode `data` with `alphabet`, six bits per symbol
pub fn encode(data: &[u8], alphabet: Alphabet) -> String {
    let symbols = alphabet.table().as_bytes();
    let mut out = String::with_capacity(data.len() / 3 * 4);

    for group in data.chunks_exact(3) {
        let n = (group[0] as u32) << 16 | (group[1] as u32) << 8 | group[2] as u32;
        for index in [
            (n & ENCODE_MASK_0) >> 18,
            (n & ENCODE_MASK_1) >> 12,
            (n & ENCODE_MASK_2) >> 6,
            n & ENCODE_MASK_3,
        ] {
            out.push(symbols[index as usize] as char);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_matches_base64() {
        assert_eq!(encode(b"Man", Alphabet::S0), "TWFu");
        // trailing "ld" is a partial group and is dropped
        assert_eq!(encode(b"hello world", Alphabet::S0), "aGVsbG8gd29y");
    }

    #[test]
    fn test_custom_table() {
        assert_eq!(encode(b"abcd", Alphabet::S4), "RIsN");
    }

    #[test]
    fn test_output_length_truncates() {
        for n in 0..20usize {
            let data = vec![0xA5u8; n];
            assert_eq!(encode(&data, Alphabet::S3).len(), n / 3 * 4, "n={n}");
        }
    }

    #[test]
    fn test_symbols_from_selected_table() {
        let data: Vec<u8> = (0..=255u8).collect();
        for alphabet in Alphabet::ALL {
            let encoded = encode(&data, alphabet);
            let table = &alphabet.table()[..64];
            assert!(encoded.chars().all(|c| table.contains(c)), "{alphabet}");
        }
    }

    #[test]
    fn test_tables_are_distinct_symbols() {
        for alphabet in Alphabet::ALL {
            let table = alphabet.table();
            assert!(table.len() == 64 || table.len() == 65);
            let mut chars: Vec<char> = table.chars().collect();
            chars.sort_unstable();
            chars.dedup();
            assert_eq!(chars.len(), table.len(), "{alphabet}");
        }
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("s3".parse::<Alphabet>().unwrap(), Alphabet::S3);
        assert_eq!("s4".parse::<Alphabet>().unwrap(), Alphabet::S4);
        assert!(matches!(
            "s5".parse::<Alphabet>(),
            Err(SignError::UnknownAlphabet(ref s)) if s == "s5"
        ));
        assert!("S3".parse::<Alphabet>().is_err());
    }
}
