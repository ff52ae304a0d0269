use crate::address::Protocol;

/// Errors produced while building, encoding or decoding addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no input to decode")]
    MissingInput,

    #[error("address string is too short, {0} characters")]
    TooShort(usize),

    #[error("invalid {protocol} address string length {length}")]
    InvalidLength { protocol: Protocol, length: usize },

    #[error("unknown address network {0:?}, expected 'f' or 't'")]
    InvalidNetworkPrefix(char),

    /// The protocol digit of an address string is not one of `0..=4`.
    #[error("unknown address protocol {0:?}")]
    InvalidProtocol(char),

    /// The leading byte of a binary address is not a known discriminant.
    #[error("unknown address protocol byte {0}")]
    InvalidProtocolByte(u8),

    #[error("invalid base32 character {0:?}")]
    InvalidBase32Character(char),

    #[error("base32 alphabet must hold 32 distinct ASCII characters other than '='")]
    InvalidAlphabet,

    #[error("address checksum does not match its payload")]
    ChecksumMismatch,

    /// The decoded address does not encode back to the input string, the
    /// input was not in canonical form.
    #[error("address {0:?} is not canonically encoded")]
    ReEncodeMismatch(String),

    #[error("malformed varint")]
    MalformedVarint,

    #[error("invalid actor id {0:?}")]
    InvalidId(String),

    #[error("expected an ID address, got a {0} address")]
    NotIdAddress(Protocol),

    #[error("actor id does not fit in 64 bits")]
    IdOutOfRange,

    #[error("invalid delegated address namespace {0:?}")]
    InvalidNamespace(String),

    #[error("expected a delegated address in namespace {expected}")]
    NamespaceMismatch { expected: u64 },

    #[error("invalid {protocol} payload length {length}")]
    InvalidPayloadLength { protocol: Protocol, length: usize },

    #[error("invalid ethereum address {0:?}")]
    InvalidEthAddress(String),
}

/// Result type with the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
