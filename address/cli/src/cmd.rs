use std::{
    fmt::{self, Write},
    str::FromStr,
};

use clap::Subcommand;
use fil_address::{
    delegated_from_eth_address, parse_id, validate_address_string, Address, EthAddress, Network,
    Protocol,
};

use crate::error::Error;

/// Bytes given on the command line as hex, with or without `0x`.
#[derive(Debug, Clone)]
pub(crate) struct HexBytes(Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s.strip_prefix("0x").unwrap_or(s)).map(Self)
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Decode an address string and print its parts
    Decode { address: String },
    /// Check the syntax of an address string
    Validate {
        address: String,

        /// Fully decode the address, verifying its checksum
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Encode an ID address
    Id { id: String },
    /// Encode the SECP256K1 address of a hex encoded public key
    Secp256k1 { public_key: HexBytes },
    /// Encode the actor address of hex encoded actor creation data
    Actor { data: HexBytes },
    /// Encode the BLS address of a hex encoded public key
    Bls { public_key: HexBytes },
    /// Encode a delegated address from a namespace and a hex encoded sub-address
    Delegated {
        namespace: u64,
        subaddress: HexBytes,
    },
    /// Encode an address from its hex encoded binary form
    FromBytes { bytes: HexBytes },
    /// Convert an Ethereum address to its delegated address
    FromEth { eth_address: String },
    /// Convert a delegated or ID address to an Ethereum address
    ToEth { address: String },
}

impl Command {
    /// Run the command, returning what should be printed.
    #[tracing::instrument(level = "debug", skip(self))]
    pub(crate) fn run(self, network: Network) -> Result<String, Error> {
        let output = match self {
            Command::Decode { address } => describe(&fil_address::decode(&address)?)?,
            Command::Validate { address, strict } => {
                let valid = if strict {
                    fil_address::decode(&address).is_ok()
                } else {
                    validate_address_string(&address)
                };
                if !valid {
                    return Err(Error::InvalidAddress(address));
                }
                format!("{address} is valid")
            }
            Command::Id { id } => Address::new_id(parse_id(&id)?, network)?.to_string(),
            Command::Secp256k1 { public_key } => {
                Address::new_secp256k1(&public_key.0, network).to_string()
            }
            Command::Actor { data } => Address::new_actor(&data.0, network).to_string(),
            Command::Bls { public_key } => Address::new_bls(&public_key.0, network)?.to_string(),
            Command::Delegated {
                namespace,
                subaddress,
            } => Address::new_delegated(namespace, &subaddress.0, network)?.to_string(),
            Command::FromBytes { bytes } => Address::from_bytes(&bytes.0, network)?.to_string(),
            Command::FromEth { eth_address } => delegated_from_eth_address(&eth_address, network)?,
            Command::ToEth { address } => {
                EthAddress::try_from(&fil_address::decode(&address)?)?.to_string()
            }
        };

        tracing::debug!("{output}");
        Ok(output)
    }
}

/// Multi-line description of `address`.
fn describe(address: &Address) -> Result<String, fmt::Error> {
    let mut description = format!(
        "address:  {address}\nnetwork:  {}\nprotocol: {}\npayload:  {}\nbytes:    {}",
        address.network(),
        address.protocol(),
        hex::encode(address.payload()),
        hex::encode(address.as_bytes()),
    );

    match address.protocol() {
        Protocol::Id => {
            if let Ok(id) = address.id() {
                write!(description, "\nid:       {id}")?;
            }
        }
        Protocol::Delegated => {
            if let Some((namespace, subaddress)) = address.delegated_parts() {
                write!(
                    description,
                    "\nnamespace:  {namespace}\nsubaddress: {}",
                    hex::encode(subaddress)
                )?;
            }
        }
        Protocol::Secp256k1 | Protocol::Actor | Protocol::Bls => {}
    }

    if let Ok(eth_address) = EthAddress::try_from(address) {
        write!(description, "\neth:      {eth_address}")?;
    }

    Ok(description)
}
