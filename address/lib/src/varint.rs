//! Unsigned LEB128 varints over arbitrary precision integers.
//!
//! Actor IDs are bounded by 64 bits on chain, but the string form allows
//! up to 20 decimal digits, so the value is kept as a [`BigUint`] until it
//! is rendered.

use num_bigint::BigUint;

use crate::error::{Error, Result};

/// Most-significant bit, == 0x80
const MSB: u8 = 0b1000_0000;

/// Groups are 7 bits wide.
const GROUP_RADIX: u32 = 128;

/// Encode `value` as an unsigned LEB128 varint, least significant group first.
pub fn encode(value: &BigUint) -> Vec<u8> {
    // `to_radix_le` returns `[0]` for zero, which is exactly the encoding of zero.
    let mut groups = value.to_radix_le(GROUP_RADIX);
    let last = groups.len() - 1;
    for group in &mut groups[..last] {
        *group |= MSB;
    }
    groups
}

/// Decode a single varint from the front of `bytes`.
///
/// Returns the value and the number of bytes it spanned. Empty input, or
/// input that ends on a byte with the continuation bit set, is malformed.
pub fn decode(bytes: &[u8]) -> Result<(BigUint, usize)> {
    let end = bytes
        .iter()
        .position(|byte| byte & MSB == 0)
        .ok_or(Error::MalformedVarint)?;

    let groups: Vec<u8> = bytes[..=end].iter().map(|byte| byte & !MSB).collect();
    let value = BigUint::from_radix_le(&groups, GROUP_RADIX).ok_or(Error::MalformedVarint)?;

    Ok((value, end + 1))
}

/// Decode a varint that must span the whole of `bytes`.
pub fn decode_exact(bytes: &[u8]) -> Result<BigUint> {
    let (value, read) = decode(bytes)?;
    if read != bytes.len() {
        return Err(Error::MalformedVarint);
    }
    Ok(value)
}
