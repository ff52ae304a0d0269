//! Address checksums, computed over `[protocol] || payload`.

use crate::hash::{AddressHasher, CHECKSUM_LEN};

/// Compute the checksum of `ingest`.
pub fn compute<H: AddressHasher>(hasher: &H, ingest: &[u8]) -> [u8; CHECKSUM_LEN] {
    hasher.checksum(ingest)
}

/// Check that `expected` is the checksum of `ingest`.
///
/// Checksums are public, the comparison does not need to be constant time.
pub fn validate<H: AddressHasher>(hasher: &H, ingest: &[u8], expected: &[u8]) -> bool {
    compute(hasher, ingest) == expected
}

/// Assemble the checksum ingest for `protocol` and `payload`.
pub(crate) fn ingest(protocol: u8, payload: &[u8]) -> Vec<u8> {
    let mut ingest = Vec::with_capacity(1 + payload.len());
    ingest.push(protocol);
    ingest.extend_from_slice(payload);
    ingest
}
