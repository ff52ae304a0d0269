//! Conversions between Filecoin addresses and Ethereum (EVM) addresses.
//!
//! EVM accounts live in the delegated namespace of the Ethereum Address
//! Manager, with the 20 raw address bytes as sub-address. ID addresses have a
//! fixed EVM form as well, the "masked ID": `0xff`, zero padding, and the
//! big-endian ID in the last 8 bytes.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{
    address::{Address, Network, Protocol},
    error::{Error, Result},
};

/// Namespace of the Ethereum Address Manager actor.
pub const EAM_NAMESPACE: u64 = 10;

/// Length of an Ethereum address.
pub const ETH_ADDRESS_LEN: usize = 20;

/// First byte of a masked ID address.
const MASKED_ID_PREFIX: u8 = 0xff;

/// A 20-byte Ethereum address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EthAddress([u8; ETH_ADDRESS_LEN]);

impl EthAddress {
    pub fn new(bytes: [u8; ETH_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// The masked ID form of actor `id`.
    pub fn from_masked_id(id: u64) -> Self {
        let mut bytes = [0; ETH_ADDRESS_LEN];
        bytes[0] = MASKED_ID_PREFIX;
        bytes[ETH_ADDRESS_LEN - 8..].copy_from_slice(&id.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ETH_ADDRESS_LEN] {
        &self.0
    }

    /// The delegated Filecoin address of this account.
    pub fn to_delegated(&self, network: Network) -> Address {
        Address::new_delegated(EAM_NAMESPACE, &self.0, network)
            .expect("20 bytes fit in a delegated sub-address")
    }
}

impl TryFrom<&Address> for EthAddress {
    type Error = Error;

    /// Delegated addresses in the EAM namespace map to their sub-address, ID
    /// addresses map to their masked ID form.
    fn try_from(address: &Address) -> Result<Self> {
        match address.protocol() {
            Protocol::Id => {
                let id = u64::try_from(address.id()?).map_err(|_| Error::IdOutOfRange)?;
                Ok(Self::from_masked_id(id))
            }
            Protocol::Delegated => match address.delegated_parts() {
                Some((EAM_NAMESPACE, subaddress)) => {
                    let bytes = subaddress.try_into().map_err(|_| {
                        Error::InvalidPayloadLength {
                            protocol: Protocol::Delegated,
                            length: subaddress.len(),
                        }
                    })?;
                    Ok(Self(bytes))
                }
                _ => Err(Error::NamespaceMismatch {
                    expected: EAM_NAMESPACE,
                }),
            },
            _ => Err(Error::NamespaceMismatch {
                expected: EAM_NAMESPACE,
            }),
        }
    }
}

impl FromStr for EthAddress {
    type Err = Error;

    /// Parse a hex string, with or without the `0x` prefix, in any letter
    /// case. Mixed case checksums are not verified.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        let mut bytes = [0; ETH_ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| Error::InvalidEthAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Encode the Ethereum address `eth_address` as a delegated Filecoin address string.
pub fn delegated_from_eth_address(eth_address: &str, network: Network) -> Result<String> {
    let eth_address: EthAddress = eth_address.parse()?;
    Ok(crate::encode(network, &eth_address.to_delegated(network)))
}

/// Recover the Ethereum address from a delegated address string in the EAM namespace.
pub fn eth_address_from_delegated(address: &str) -> Result<String> {
    let address = crate::decode(address)?;
    if address.protocol() != Protocol::Delegated {
        return Err(Error::NamespaceMismatch {
            expected: EAM_NAMESPACE,
        });
    }
    Ok(EthAddress::try_from(&address)?.to_string())
}

/// The masked ID Ethereum address of an ID address string.
pub fn eth_address_from_id(address: &str) -> Result<String> {
    let address = crate::decode(address)?;
    if address.protocol() != Protocol::Id {
        return Err(Error::NotIdAddress(address.protocol()));
    }
    Ok(EthAddress::try_from(&address)?.to_string())
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use rstest::rstest;

    use super::{
        delegated_from_eth_address, eth_address_from_delegated, eth_address_from_id, EthAddress,
        EAM_NAMESPACE,
    };
    use crate::{
        address::{Address, Network, Protocol},
        error::Error,
    };

    const ETH: &str = "0x52963EF50e27e06D72D59fcB4F3c2a687BE3cfEf";
    const DELEGATED: &str = "t410fkkld55ioe7qg24wvt7fu6pbknb56ht7pt4zamxa";

    #[test]
    fn delegated_from_eth() {
        assert_eq!(
            delegated_from_eth_address(ETH, Network::Test).unwrap(),
            DELEGATED
        );
        assert_eq!(
            delegated_from_eth_address(&ETH[2..], Network::Main).unwrap(),
            DELEGATED.replacen('t', "f", 1)
        );
    }

    #[test]
    fn eth_from_delegated() {
        let eth = eth_address_from_delegated(DELEGATED).unwrap();
        assert_eq!(eth, ETH.to_lowercase());
        assert!(eth.eq_ignore_ascii_case(ETH));
    }

    #[rstest]
    #[case("t01", "0xff00000000000000000000000000000000000001")]
    #[case("f01138", "0xff00000000000000000000000000000000000472")]
    #[case("t018446744073709551615", "0xff0000000000000000000000ffffffffffffffff")]
    fn eth_from_id(#[case] address: &str, #[case] expected: &str) {
        assert_eq!(eth_address_from_id(address).unwrap(), expected);
    }

    #[test]
    fn eth_from_id_requires_id() {
        assert_eq!(
            eth_address_from_id(DELEGATED),
            Err(Error::NotIdAddress(Protocol::Delegated))
        );
        assert_eq!(
            eth_address_from_id("t018446744073709551616"),
            Err(Error::IdOutOfRange)
        );
    }

    #[test]
    fn eth_from_delegated_requires_eam_namespace() {
        let other = Address::new_delegated(32, &[1; 20], Network::Test).unwrap();
        assert_eq!(
            eth_address_from_delegated(&other.to_string()),
            Err(Error::NamespaceMismatch {
                expected: EAM_NAMESPACE
            })
        );
        assert_eq!(
            eth_address_from_delegated("t01"),
            Err(Error::NamespaceMismatch {
                expected: EAM_NAMESPACE
            })
        );

        let short = Address::new_delegated(EAM_NAMESPACE, &[1; 19], Network::Test).unwrap();
        assert_eq!(
            eth_address_from_delegated(&short.to_string()),
            Err(Error::InvalidPayloadLength {
                protocol: Protocol::Delegated,
                length: 19
            })
        );
    }

    #[rstest]
    #[case("0x52963ef50e27e06d72d59fcb4f3c2a687be3cf")]
    #[case("0x52963ef50e27e06d72d59fcb4f3c2a687be3cfefaa")]
    #[case("0xzz963ef50e27e06d72d59fcb4f3c2a687be3cfef")]
    #[case("")]
    fn rejects_malformed_eth_addresses(#[case] input: &str) {
        assert_eq!(
            input.parse::<EthAddress>(),
            Err(Error::InvalidEthAddress(input.to_string()))
        );
        assert!(delegated_from_eth_address(input, Network::Main).is_err());
    }

    #[test]
    fn typed_round_trip() {
        let eth = EthAddress::new(hex!("52963ef50e27e06d72d59fcb4f3c2a687be3cfef"));
        let address = eth.to_delegated(Network::Test);

        assert_eq!(address.to_string(), DELEGATED);
        assert_eq!(EthAddress::try_from(&address).unwrap(), eth);
    }

    #[test]
    fn masked_id_layout() {
        let eth = EthAddress::from_masked_id(1);
        assert_eq!(eth.as_bytes()[0], 0xff);
        assert_eq!(eth.as_bytes()[1..19], [0; 18]);
        assert_eq!(eth.as_bytes()[19], 1);

        let address = Address::new_id(1u32, Network::Main).unwrap();
        assert_eq!(EthAddress::try_from(&address).unwrap(), eth);
    }
}
