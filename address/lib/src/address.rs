use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};

use integer_encoding::VarInt;
use num_bigint::BigUint;

use crate::{
    error::{Error, Result},
    hash::{AddressHasher, Blake2b, PAYLOAD_HASH_LEN},
    varint,
};

/// Length of a BLS public key, the payload of a BLS address.
pub const BLS_PUBLIC_KEY_LEN: usize = 48;

/// Maximum length of the sub-address carried by a delegated address.
pub const MAX_SUBADDRESS_LEN: usize = 54;

/// Address protocol, the first byte of the binary form.
///
/// <https://spec.filecoin.io/appendix/address/#section-appendix.address.protocol-indicator>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Protocol {
    /// Numeric actor ID, encoded as a varint.
    Id = 0,
    /// BLAKE2b-160 of a secp256k1 public key.
    Secp256k1 = 1,
    /// BLAKE2b-160 of the data an actor was created from.
    Actor = 2,
    /// Raw BLS public key.
    Bls = 3,
    /// Namespaced sub-address, see [FIP-0048](https://github.com/filecoin-project/FIPs/blob/master/FIPS/fip-0048.md).
    Delegated = 4,
}

impl Protocol {
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// The digit representing the protocol in address strings.
    pub const fn digit(self) -> char {
        match self {
            Protocol::Id => '0',
            Protocol::Secp256k1 => '1',
            Protocol::Actor => '2',
            Protocol::Bls => '3',
            Protocol::Delegated => '4',
        }
    }

    pub fn from_digit(digit: char) -> Result<Self> {
        match digit {
            '0' => Ok(Protocol::Id),
            '1' => Ok(Protocol::Secp256k1),
            '2' => Ok(Protocol::Actor),
            '3' => Ok(Protocol::Bls),
            '4' => Ok(Protocol::Delegated),
            other => Err(Error::InvalidProtocol(other)),
        }
    }
}

impl TryFrom<u8> for Protocol {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Protocol::Id),
            1 => Ok(Protocol::Secp256k1),
            2 => Ok(Protocol::Actor),
            3 => Ok(Protocol::Bls),
            4 => Ok(Protocol::Delegated),
            other => Err(Error::InvalidProtocolByte(other)),
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::Id => "ID",
            Protocol::Secp256k1 => "SECP256K1",
            Protocol::Actor => "actor",
            Protocol::Bls => "BLS",
            Protocol::Delegated => "delegated",
        };
        f.write_str(name)
    }
}

/// Network an address string belongs to. It is only part of the string
/// form, the binary form is the same on every network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Network {
    #[default]
    Main,
    Test,
}

impl Network {
    /// The leading character of address strings on this network.
    pub const fn prefix(self) -> char {
        match self {
            Network::Main => 'f',
            Network::Test => 't',
        }
    }

    pub fn from_prefix(prefix: char) -> Result<Self> {
        match prefix {
            'f' => Ok(Network::Main),
            't' => Ok(Network::Test),
            other => Err(Error::InvalidNetworkPrefix(other)),
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl FromStr for Network {
    type Err = Error;

    /// Accepts the prefix character or the network name.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "f" | "main" | "mainnet" => Ok(Network::Main),
            "t" | "test" | "testnet" => Ok(Network::Test),
            other => Err(Error::InvalidNetworkPrefix(
                other.chars().next().unwrap_or_default(),
            )),
        }
    }
}

/// A Filecoin address.
///
/// Holds the binary form, `[protocol] || payload`, and the network used when
/// rendering it as a string. Two addresses are equal when their binary forms
/// are, regardless of network.
#[derive(Debug, Clone)]
pub struct Address {
    protocol: Protocol,
    bytes: Vec<u8>,
    network: Network,
}

impl Address {
    /// Build an address from a protocol and its payload, checking that the
    /// payload is well formed for the protocol.
    pub fn new(protocol: Protocol, payload: &[u8], network: Network) -> Result<Self> {
        validate_payload(protocol, payload)?;
        Ok(Self::new_unchecked(protocol, payload, network))
    }

    /// Parse the binary form of an address.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self> {
        let (&protocol, payload) = bytes.split_first().ok_or(Error::MissingInput)?;
        Self::new(Protocol::try_from(protocol)?, payload, network)
    }

    /// Address of the actor `id`. IDs above `u64::MAX` are rejected with
    /// [`Error::IdOutOfRange`].
    pub fn new_id(id: impl Into<BigUint>, network: Network) -> Result<Self> {
        Self::new(Protocol::Id, &varint::encode(&id.into()), network)
    }

    /// Address of the secp256k1 public key `public_key`, hashed with BLAKE2b.
    pub fn new_secp256k1(public_key: &[u8], network: Network) -> Self {
        Self::new_secp256k1_with(&Blake2b, public_key, network)
    }

    pub fn new_secp256k1_with<H: AddressHasher>(
        hasher: &H,
        public_key: &[u8],
        network: Network,
    ) -> Self {
        Self::from_hash(Protocol::Secp256k1, hasher.payload_hash(public_key), network)
    }

    /// Address of an actor created from `data`, hashed with BLAKE2b.
    pub fn new_actor(data: &[u8], network: Network) -> Self {
        Self::new_actor_with(&Blake2b, data, network)
    }

    pub fn new_actor_with<H: AddressHasher>(hasher: &H, data: &[u8], network: Network) -> Self {
        Self::from_hash(Protocol::Actor, hasher.payload_hash(data), network)
    }

    /// Address of the BLS public key `public_key`, which is used verbatim.
    pub fn new_bls(public_key: &[u8], network: Network) -> Result<Self> {
        Self::new(Protocol::Bls, public_key, network)
    }

    /// Address of `subaddress` within the actor namespace `namespace`.
    pub fn new_delegated(namespace: u64, subaddress: &[u8], network: Network) -> Result<Self> {
        if subaddress.len() > MAX_SUBADDRESS_LEN {
            return Err(Error::InvalidPayloadLength {
                protocol: Protocol::Delegated,
                length: subaddress.len(),
            });
        }

        let mut payload = namespace.encode_var_vec();
        payload.extend_from_slice(subaddress);
        Ok(Self::new_unchecked(Protocol::Delegated, &payload, network))
    }

    fn from_hash(protocol: Protocol, hash: [u8; PAYLOAD_HASH_LEN], network: Network) -> Self {
        Self::new_unchecked(protocol, &hash, network)
    }

    fn new_unchecked(protocol: Protocol, payload: &[u8], network: Network) -> Self {
        let mut bytes = Vec::with_capacity(1 + payload.len());
        bytes.push(protocol.byte());
        bytes.extend_from_slice(payload);
        Self {
            protocol,
            bytes,
            network,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// The same address, rendered on `network`.
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// The payload, the binary form without the protocol byte.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// The binary form, `[protocol] || payload`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The actor ID of an ID address.
    pub fn id(&self) -> Result<BigUint> {
        match self.protocol {
            Protocol::Id => varint::decode_exact(self.payload()),
            other => Err(Error::NotIdAddress(other)),
        }
    }

    /// Namespace and sub-address of a delegated address, `None` for any
    /// other protocol.
    pub fn delegated_parts(&self) -> Option<(u64, &[u8])> {
        match self.protocol {
            Protocol::Delegated => {
                let (namespace, read) = u64::decode_var(self.payload())?;
                Some((namespace, &self.payload()[read..]))
            }
            _ => None,
        }
    }
}

/// Payload rules per protocol. Varints must be minimally encoded so that
/// every address has a single binary form.
fn validate_payload(protocol: Protocol, payload: &[u8]) -> Result<()> {
    let invalid_length = || Error::InvalidPayloadLength {
        protocol,
        length: payload.len(),
    };

    match protocol {
        Protocol::Id => {
            let id = varint::decode_exact(payload)?;
            if varint::encode(&id).len() != payload.len() {
                return Err(Error::MalformedVarint);
            }
            u64::try_from(&id).map_err(|_| Error::IdOutOfRange)?;
        }
        Protocol::Secp256k1 | Protocol::Actor => {
            if payload.len() != PAYLOAD_HASH_LEN {
                return Err(invalid_length());
            }
        }
        Protocol::Bls => {
            if payload.len() != BLS_PUBLIC_KEY_LEN {
                return Err(invalid_length());
            }
        }
        Protocol::Delegated => {
            let (namespace, read) = u64::decode_var(payload).ok_or(Error::MalformedVarint)?;
            if namespace.encode_var_vec() != payload[..read] {
                return Err(Error::MalformedVarint);
            }
            if payload.len() - read > MAX_SUBADDRESS_LEN {
                return Err(invalid_length());
            }
        }
    }

    Ok(())
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.bytes.hash(state);
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode(self.network, self))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::decode(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;
        address.parse().map_err(serde::de::Error::custom)
    }
}
