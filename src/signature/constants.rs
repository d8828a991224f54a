// src/signature/constants.rs
// Algorithm constants that never change
// For overridable values, see defaults.rs

// SM3 initial vector
pub const SM3_IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

// SM3 round constants: T_j for rounds 0..16, then 16..64
pub const SM3_T_LOW: u32 = 0x79cc4519;
pub const SM3_T_HIGH: u32 = 0x7a879d8a;

pub const SM3_BLOCK_SIZE: usize = 64;
pub const SM3_DIGEST_SIZE: usize = 32;
pub const SM3_SCHEDULE_WORDS: usize = 132; // W[0..68] + W'[0..64]

// Encoder 6-bit masks over a 24-bit group
pub const ENCODE_MASK_0: u32 = 0xFC0000; // 16515072
pub const ENCODE_MASK_1: u32 = 0x03F000; // 258048
pub const ENCODE_MASK_2: u32 = 0x000FC0; // 4032
pub const ENCODE_MASK_3: u32 = 0x00003F; // 63

// Alphabet tables, symbol at position v encodes the 6-bit value v
pub const ALPHABET_S0: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";
pub const ALPHABET_S1: &str = "Dkdpgh4ZKsQB80/Mfvw36XI1R25+WUAlEi7NLboqYTOPuzmFjJnryx9HVGcaStCe=";
pub const ALPHABET_S2: &str = "Dkdpgh4ZKsQB80/Mfvw36XI1R25-WUAlEi7NLboqYTOPuzmFjJnryx9HVGcaStCe=";
pub const ALPHABET_S3: &str = "ckdp1h4ZKsUB80/Mfvw36XIgR25+WQAlEi7NLboqYTOPuzmFjJnryx9HVGDaStCe";
pub const ALPHABET_S4: &str = "Dkdpgh2ZmsQB80/MfvV36XI1R45-WUAlEixNLwoqYTOPuzKFjJnry79HbGcaStCe";

// Key derivation bit-parity masks
pub const KEY_MASK_EVEN: u8 = 0xAA; // 170
pub const KEY_MASK_ODD: u8 = 0x55; // 85
pub const KEY_TIMESTAMP_MODULUS: u64 = 65536;

// Descriptor block field identifiers
pub const FIELD_TAG: u32 = 8;
pub const FIELD_END_TIME: u32 = 10;
pub const FIELD_ENVIRONMENT: u32 = 15;
pub const FIELD_START_TIME: u32 = 16;
pub const FIELD_CONSTANT: u32 = 18;
pub const FIELD_FLAGS: u32 = 19;

// Descriptor block literal values
pub const DESCRIPTOR_TAG: u32 = 3;
pub const DESCRIPTOR_CONSTANT: u32 = 44;
pub const DESCRIPTOR_FLAGS: [u32; 4] = [1, 0, 1, 5];

// Environment descriptor (field 15) literal values
pub const ENV_AID: u32 = 6383;
pub const ENV_PAGE_ID: u32 = 6241;
pub const ENV_BOE: bool = false;
pub const ENV_DDRT: u32 = 7;
pub const ENV_INCLUDE_PATHS: usize = 7;
pub const ENV_TRACK_MODE: u32 = 0;
pub const ENV_TRACK_DELAY: u32 = 300;
pub const ENV_DUMP: bool = true;
pub const ENV_RPU: &str = "";
