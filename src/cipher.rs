//! Keyed byte cipher for the grade column.
//!
//! A self-inverse XOR of the input with the key, key cycled to input length.
//! This obfuscates grades at rest in the SQLite backend; it is explicitly
//! NOT a confidentiality boundary. Anyone needing real at-rest encryption
//! should use an authenticated cipher instead.

use crate::error::{Result, RosterError};

#[derive(Debug, Clone)]
pub struct XorCipher {
    key: Vec<u8>,
}

impl XorCipher {
    /// Build a cipher from a key. Empty keys are rejected since there is
    /// nothing to cycle.
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(RosterError::Cipher("cipher key must not be empty".into()));
        }
        Ok(Self { key })
    }

    /// Encode and decode are the same operation.
    pub fn apply(&self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .zip(self.key.iter().cycle())
            .map(|(b, k)| b ^ k)
            .collect()
    }

    /// Decode a grade blob back to a string. A wrong key usually surfaces
    /// here as invalid UTF-8.
    pub fn decode_str(&self, blob: &[u8]) -> Result<String> {
        String::from_utf8(self.apply(blob)).map_err(|_| {
            RosterError::Cipher("grade blob did not decode to UTF-8 (wrong key?)".into())
        })
    }
}
