//! Unpadded base32 with a configurable alphabet.
//!
//! Encoding packs the input MSB-first into 5-bit groups and zero fills the
//! last group. Decoding accepts (and drops) trailing `=` padding and throws
//! away bits that do not complete a byte, so several strings can decode to
//! the same bytes. Callers that need a canonical form must re-encode.

use crate::error::{Error, Result};

/// Alphabet used by Filecoin address strings.
pub const FILECOIN_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

const PADDING: char = '=';

/// Marks characters outside of the alphabet in the lookup table.
const INVALID: u8 = 0xff;

/// A base32 alphabet together with its reverse lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base32 {
    alphabet: [u8; 32],
    lookup: [u8; 128],
}

impl Base32 {
    /// Build a codec for `alphabet`. Every character must be ASCII, distinct,
    /// and different from the `=` padding character.
    pub fn new(alphabet: &[u8; 32]) -> Result<Self> {
        let mut lookup = [INVALID; 128];
        for (value, &character) in alphabet.iter().enumerate() {
            if !character.is_ascii() || character == PADDING as u8 {
                return Err(Error::InvalidAlphabet);
            }
            let slot = &mut lookup[character as usize];
            if *slot != INVALID {
                return Err(Error::InvalidAlphabet);
            }
            *slot = value as u8;
        }

        Ok(Self {
            alphabet: *alphabet,
            lookup,
        })
    }

    /// Length of the string [`Base32::encode`] produces for `len` bytes.
    pub const fn encoded_len(len: usize) -> usize {
        (len * 8).div_ceil(5)
    }

    pub fn encode(&self, data: &[u8]) -> String {
        let mut encoded = String::with_capacity(Self::encoded_len(data.len()));
        let mut buffer = 0u16;
        let mut bits = 0u32;

        for &byte in data {
            buffer = (buffer << 8) | byte as u16;
            bits += 8;
            while bits >= 5 {
                bits -= 5;
                encoded.push(self.symbol(buffer >> bits));
            }
            // Only the unconsumed bits need to survive the next shift.
            buffer &= (1 << bits) - 1;
        }

        if bits > 0 {
            encoded.push(self.symbol(buffer << (5 - bits)));
        }

        encoded
    }

    /// Decode `input`, rejecting it before any bit is processed if a
    /// character falls outside of the alphabet.
    pub fn decode(&self, input: &str) -> Result<Vec<u8>> {
        let input = input.trim_end_matches(PADDING);

        let values = input
            .chars()
            .map(|character| self.value(character))
            .collect::<Result<Vec<u8>>>()?;

        let mut decoded = Vec::with_capacity(values.len() * 5 / 8);
        let mut buffer = 0u16;
        let mut bits = 0u32;

        for value in values {
            buffer = (buffer << 5) | value as u16;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                decoded.push((buffer >> bits) as u8);
                buffer &= (1 << bits) - 1;
            }
        }

        Ok(decoded)
    }

    fn symbol(&self, group: u16) -> char {
        self.alphabet[(group & 0b1_1111) as usize] as char
    }

    fn value(&self, character: char) -> Result<u8> {
        let value = if character.is_ascii() {
            self.lookup[character as usize]
        } else {
            INVALID
        };

        if value == INVALID {
            return Err(Error::InvalidBase32Character(character));
        }
        Ok(value)
    }
}

impl Default for Base32 {
    fn default() -> Self {
        Self::new(FILECOIN_ALPHABET).expect("the Filecoin alphabet is valid")
    }
}
