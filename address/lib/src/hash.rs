//! Hashing collaborator used to derive payloads and checksums.

/// Length of the SECP256K1 and Actor payload digests.
pub const PAYLOAD_HASH_LEN: usize = 20;

/// Length of the checksum embedded in address strings.
pub const CHECKSUM_LEN: usize = 4;

/// Digest functions an address codec depends on.
///
/// Filecoin uses unkeyed BLAKE2b for both, see [`Blake2b`]. Other
/// implementations only produce addresses that are valid among themselves.
pub trait AddressHasher {
    /// Digest of a public key or actor seed, used as the payload of
    /// SECP256K1 and Actor addresses.
    fn payload_hash(&self, data: &[u8]) -> [u8; PAYLOAD_HASH_LEN];

    /// Digest of `[protocol] || payload`.
    fn checksum(&self, ingest: &[u8]) -> [u8; CHECKSUM_LEN];
}

/// BLAKE2b with a 20 byte output for payloads and a 4 byte output for checksums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2b;

impl Blake2b {
    fn digest<const N: usize>(data: &[u8]) -> [u8; N] {
        let hash = blake2b_simd::Params::new().hash_length(N).hash(data);
        let mut digest = [0; N];
        digest.copy_from_slice(hash.as_bytes());
        digest
    }
}

impl AddressHasher for Blake2b {
    fn payload_hash(&self, data: &[u8]) -> [u8; PAYLOAD_HASH_LEN] {
        Self::digest(data)
    }

    fn checksum(&self, ingest: &[u8]) -> [u8; CHECKSUM_LEN] {
        Self::digest(ingest)
    }
}

impl<H: AddressHasher + ?Sized> AddressHasher for &H {
    fn payload_hash(&self, data: &[u8]) -> [u8; PAYLOAD_HASH_LEN] {
        (**self).payload_hash(data)
    }

    fn checksum(&self, ingest: &[u8]) -> [u8; CHECKSUM_LEN] {
        (**self).checksum(ingest)
    }
}
