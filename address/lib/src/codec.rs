//! String encoding of addresses.
//!
//! An address string is `[network][protocol digit][body]`:
//!
//! * ID: the actor ID in decimal.
//! * SECP256K1, Actor and BLS: `base32(payload || checksum)`.
//! * Delegated: `[namespace in decimal]f[base32(subaddress || checksum)]`.
//!
//! The checksum always covers the whole binary form, `[protocol] || payload`.
//!
//! <https://spec.filecoin.io/appendix/address/#section-appendix.address.string>

use integer_encoding::VarInt;
use num_bigint::BigUint;

use crate::{
    address::{Address, Network, Protocol, MAX_SUBADDRESS_LEN},
    base32::Base32,
    checksum,
    error::{Error, Result},
    hash::{AddressHasher, Blake2b, CHECKSUM_LEN},
};

/// Longest accepted ID address string, `f0` followed by 20 digits.
pub const MAX_ID_STRING_LEN: usize = 22;

/// Length of SECP256K1 and Actor address strings.
pub const HASH_ADDRESS_STRING_LEN: usize = 2 + Base32::encoded_len(20 + CHECKSUM_LEN);

/// Length of BLS address strings.
pub const BLS_ADDRESS_STRING_LEN: usize = 2 + Base32::encoded_len(48 + CHECKSUM_LEN);

/// Longest accepted delegated address string.
pub const MAX_DELEGATED_STRING_LEN: usize =
    2 + MAX_NAMESPACE_DIGITS + 1 + Base32::encoded_len(MAX_SUBADDRESS_LEN + CHECKSUM_LEN);

/// `u64::MAX` has 20 decimal digits.
const MAX_NAMESPACE_DIGITS: usize = 20;

/// Separates the namespace from the sub-address in delegated address strings.
const DELEGATED_SEPARATOR: char = 'f';

/// Converts addresses to and from their string form.
///
/// The default codec uses the Filecoin base32 alphabet and BLAKE2b; both can
/// be swapped for testing or for other networks.
#[derive(Debug, Clone)]
pub struct AddressCodec<H = Blake2b> {
    base32: Base32,
    hasher: H,
}

impl Default for AddressCodec {
    fn default() -> Self {
        Self::new(Base32::default(), Blake2b)
    }
}

impl<H: AddressHasher> AddressCodec<H> {
    pub fn new(base32: Base32, hasher: H) -> Self {
        Self { base32, hasher }
    }

    /// Render `address` as a string on `network`.
    pub fn encode(&self, network: Network, address: &Address) -> String {
        let protocol = address.protocol();

        let mut encoded = String::with_capacity(MAX_DELEGATED_STRING_LEN);
        encoded.push(network.prefix());
        encoded.push(protocol.digit());

        match protocol {
            Protocol::Id => {
                let id = address
                    .id()
                    .expect("ID payloads are validated on construction");
                encoded.push_str(&id.to_string());
            }
            Protocol::Secp256k1 | Protocol::Actor | Protocol::Bls => {
                encoded.push_str(&self.encode_body(address, address.payload()));
            }
            Protocol::Delegated => {
                let (namespace, subaddress) = address
                    .delegated_parts()
                    .expect("delegated payloads are validated on construction");
                encoded.push_str(&namespace.to_string());
                encoded.push(DELEGATED_SEPARATOR);
                encoded.push_str(&self.encode_body(address, subaddress));
            }
        }

        encoded
    }

    /// Parse an address string.
    ///
    /// Besides the syntax and checksum, the result is re-encoded and must
    /// match the input exactly, rejecting strings that only decode through
    /// leniency of the base32 or decimal parsers.
    #[tracing::instrument(level = "trace", skip(self), err(level = "debug"))]
    pub fn decode(&self, address: &str) -> Result<Address> {
        check_address_string(address)?;
        let (network, protocol, raw) = split_prefix(address)?;

        let decoded = match protocol {
            Protocol::Id => Address::new_id(parse_id(raw)?, network)?,
            Protocol::Secp256k1 | Protocol::Actor | Protocol::Bls => {
                let payload = self.decode_body(protocol, &[], raw)?;
                Address::new(protocol, &payload, network)?
            }
            Protocol::Delegated => {
                let (namespace, body) = split_delegated(raw)?;
                let namespace = namespace
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidNamespace(namespace.to_string()))?;
                let subaddress = self.decode_body(protocol, &namespace.encode_var_vec(), body)?;
                Address::new_delegated(namespace, &subaddress, network)?
            }
        };

        if self.encode(network, &decoded) != address {
            return Err(Error::ReEncodeMismatch(address.to_string()));
        }

        Ok(decoded)
    }

    /// SECP256K1 address of `public_key`, using this codec's hasher.
    pub fn secp256k1_address(&self, public_key: &[u8], network: Network) -> Address {
        Address::new_secp256k1_with(&self.hasher, public_key, network)
    }

    /// Actor address of `data`, using this codec's hasher.
    pub fn actor_address(&self, data: &[u8], network: Network) -> Address {
        Address::new_actor_with(&self.hasher, data, network)
    }

    fn encode_body(&self, address: &Address, body: &[u8]) -> String {
        let checksum = checksum::compute(&self.hasher, address.as_bytes());

        let mut data = Vec::with_capacity(body.len() + CHECKSUM_LEN);
        data.extend_from_slice(body);
        data.extend_from_slice(&checksum);
        self.base32.encode(&data)
    }

    /// Decode a base32 body and verify its checksum. `payload_prefix` is the
    /// part of the payload that is not carried in the body.
    fn decode_body(&self, protocol: Protocol, payload_prefix: &[u8], body: &str) -> Result<Vec<u8>> {
        let mut decoded = self.base32.decode(body)?;
        if decoded.len() < CHECKSUM_LEN {
            return Err(Error::InvalidPayloadLength {
                protocol,
                length: decoded.len(),
            });
        }
        let expected = decoded.split_off(decoded.len() - CHECKSUM_LEN);

        let mut payload = payload_prefix.to_vec();
        payload.extend_from_slice(&decoded);
        let ingest = checksum::ingest(protocol.byte(), &payload);

        if !checksum::validate(&self.hasher, &ingest, &expected) {
            return Err(Error::ChecksumMismatch);
        }

        Ok(decoded)
    }
}

/// Check the syntax of an address string without decoding it.
///
/// Covers the network prefix, the protocol digit and the length expected for
/// the protocol. Passing the check does not mean the string decodes.
pub fn check_address_string(address: &str) -> Result<()> {
    if address.is_empty() {
        return Err(Error::MissingInput);
    }
    if address.len() < 3 {
        return Err(Error::TooShort(address.len()));
    }

    let (_, protocol, raw) = split_prefix(address)?;
    let length = address.len();

    let valid_length = match protocol {
        Protocol::Id => length <= MAX_ID_STRING_LEN,
        Protocol::Secp256k1 | Protocol::Actor => length == HASH_ADDRESS_STRING_LEN,
        Protocol::Bls => length == BLS_ADDRESS_STRING_LEN,
        Protocol::Delegated => {
            let (_, body) = split_delegated(raw)?;
            !body.is_empty() && length <= MAX_DELEGATED_STRING_LEN
        }
    };

    if !valid_length {
        return Err(Error::InvalidLength { protocol, length });
    }

    Ok(())
}

/// Like [`check_address_string`], for callers that only need a yes or no.
pub fn validate_address_string(address: &str) -> bool {
    check_address_string(address).is_ok()
}

/// Parse a decimal actor ID. Only ASCII digits are accepted and the value
/// must fit in a `u64`.
pub fn parse_id(id: &str) -> Result<BigUint> {
    if id.is_empty() || !id.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(Error::InvalidId(id.to_string()));
    }
    let parsed =
        BigUint::parse_bytes(id.as_bytes(), 10).ok_or_else(|| Error::InvalidId(id.to_string()))?;
    u64::try_from(&parsed).map_err(|_| Error::IdOutOfRange)?;
    Ok(parsed)
}

fn split_prefix(address: &str) -> Result<(Network, Protocol, &str)> {
    let mut chars = address.chars();
    let network = chars.next().ok_or(Error::MissingInput)?;
    let protocol = chars.next().ok_or(Error::TooShort(address.len()))?;

    let network = Network::from_prefix(network)?;
    let protocol = Protocol::from_digit(protocol)?;

    // Both leading characters are ASCII at this point.
    Ok((network, protocol, &address[2..]))
}

/// Split the raw part of a delegated address string into namespace digits
/// and the base32 body.
fn split_delegated(raw: &str) -> Result<(&str, &str)> {
    let (namespace, body) = raw
        .split_once(DELEGATED_SEPARATOR)
        .ok_or_else(|| Error::InvalidNamespace(raw.to_string()))?;

    if namespace.is_empty()
        || namespace.len() > MAX_NAMESPACE_DIGITS
        || !namespace.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err(Error::InvalidNamespace(namespace.to_string()));
    }

    Ok((namespace, body))
}
