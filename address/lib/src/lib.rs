//! Filecoin addresses.
//!
//! An [`Address`] is a protocol byte followed by a protocol specific payload.
//! Its string form adds a network prefix and, for every protocol but ID, a
//! base32 body protected by a 4-byte BLAKE2b checksum.
//!
//! ```
//! use fil_address::{Address, BigUint, Network};
//!
//! let address: Address = "t01138".parse().unwrap();
//! assert_eq!(address.id().unwrap(), BigUint::from(1138u32));
//! assert_eq!(Address::new_id(1138u32, Network::Test).unwrap(), address);
//! ```
mod address;
pub mod base32;
pub mod checksum;
mod codec;
mod error;
pub mod eth;
pub mod hash;
pub mod varint;

pub use address::{Address, Network, Protocol, BLS_PUBLIC_KEY_LEN, MAX_SUBADDRESS_LEN};
pub use codec::{
    check_address_string, parse_id, validate_address_string, AddressCodec, BLS_ADDRESS_STRING_LEN,
    HASH_ADDRESS_STRING_LEN, MAX_DELEGATED_STRING_LEN, MAX_ID_STRING_LEN,
};
pub use error::{Error, Result};
pub use eth::{
    delegated_from_eth_address, eth_address_from_delegated, eth_address_from_id, EthAddress,
};
pub use num_bigint::BigUint;

/// Render `address` on `network` with the Filecoin codec.
pub fn encode(network: Network, address: &Address) -> String {
    AddressCodec::default().encode(network, address)
}

/// Parse an address string with the Filecoin codec.
pub fn decode(address: &str) -> Result<Address> {
    AddressCodec::default().decode(address)
}

/// Same as [`decode`].
pub fn new_from_string(address: &str) -> Result<Address> {
    decode(address)
}

/// The actor ID of an ID address.
pub fn id_from_address(address: &Address) -> Result<BigUint> {
    address.id()
}
