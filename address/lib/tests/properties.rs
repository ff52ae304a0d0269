use fil_address::{
    base32::FILECOIN_ALPHABET, check_address_string, decode, encode, id_from_address,
    validate_address_string, Address, BigUint, Error, Network, Protocol,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ROUNDS: usize = 64;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0x0f11_ec01)
}

fn random_address(rng: &mut StdRng, network: Network) -> Address {
    match rng.gen_range(0..5) {
        0 => Address::new_id(rng.gen::<u64>(), network).unwrap(),
        1 => Address::new_secp256k1(&rng.gen::<[u8; 32]>(), network),
        2 => Address::new_actor(&rng.gen::<[u8; 32]>(), network),
        3 => {
            let mut public_key = [0u8; 48];
            rng.fill(&mut public_key[..]);
            Address::new_bls(&public_key, network).unwrap()
        }
        _ => {
            let mut subaddress = vec![0u8; rng.gen_range(0..=54)];
            rng.fill(&mut subaddress[..]);
            Address::new_delegated(rng.gen(), &subaddress, network).unwrap()
        }
    }
}

#[test]
fn round_trip() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        for network in [Network::Main, Network::Test] {
            let address = random_address(&mut rng, network);
            let encoded = encode(network, &address);
            let decoded = decode(&encoded).unwrap();

            assert_eq!(decoded, address);
            assert_eq!(decoded.network(), network);
            // Canonical strings are stable.
            assert_eq!(encode(network, &decoded), encoded);
            // Binary form round trips too.
            assert_eq!(
                Address::from_bytes(address.as_bytes(), network).unwrap(),
                address
            );
        }
    }
}

#[test]
fn payload_is_network_independent() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let address = random_address(&mut rng, Network::Main);
        let main = encode(Network::Main, &address);
        let test = format!("t{}", &main[1..]);

        assert_eq!(
            decode(&main).unwrap().as_bytes(),
            decode(&test).unwrap().as_bytes()
        );
    }
}

const DELEGATED: &str = "t410fkkld55ioe7qg24wvt7fu6pbknb56ht7pt4zamxa";

/// Replace the character at `position` with `replacement`.
fn corrupt(encoded: &str, position: usize, replacement: u8) -> String {
    let mut corrupted = encoded.as_bytes().to_vec();
    corrupted[position] = replacement;
    String::from_utf8(corrupted).unwrap()
}

/// Any character of the base32 alphabet other than `original`.
fn other_base32_character(rng: &mut StdRng, original: u8) -> u8 {
    loop {
        let candidate = FILECOIN_ALPHABET[rng.gen_range(0..32)];
        if candidate != original {
            break candidate;
        }
    }
}

#[test]
fn single_character_changes_are_rejected() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let address = loop {
            let address = random_address(&mut rng, Network::Test);
            if address.protocol() != Protocol::Id {
                break address;
            }
        };
        let encoded = encode(Network::Test, &address);

        // Only the base32 body, delegated namespaces are covered below.
        let body_start = match address.protocol() {
            Protocol::Delegated => encoded.find('f').unwrap() + 1,
            _ => 2,
        };
        let position = rng.gen_range(body_start..encoded.len());
        let replacement = other_base32_character(&mut rng, encoded.as_bytes()[position]);
        let corrupted = corrupt(&encoded, position, replacement);

        match decode(&corrupted) {
            Err(Error::ChecksumMismatch) | Err(Error::ReEncodeMismatch(_)) => {}
            other => panic!("{corrupted} decoded to {other:?}"),
        }
    }
}

#[test]
fn delegated_namespace_changes_are_rejected() {
    let mut rng = rng();
    for _ in 0..ROUNDS {
        let address = loop {
            let address = random_address(&mut rng, Network::Test);
            if address.protocol() == Protocol::Delegated {
                break address;
            }
        };
        let encoded = encode(Network::Test, &address);

        // Namespace digits and the separator that follows them.
        let separator = encoded.find('f').unwrap();
        let position = rng.gen_range(2..=separator);
        let original = encoded.as_bytes()[position];
        let replacement = loop {
            let candidate = b"0123456789abcdefghijklmnopqrstuvwxyz"[rng.gen_range(0..36)];
            if candidate != original {
                break candidate;
            }
        };
        let corrupted = corrupt(&encoded, position, replacement);

        assert!(
            decode(&corrupted).is_err(),
            "{corrupted} decoded from {encoded}"
        );
    }
}

#[test]
fn every_single_character_change_to_a_delegated_address_fails() {
    assert!(decode(DELEGATED).is_ok());

    // Position 0 is the network prefix, swapping it is a valid address.
    for position in 1..DELEGATED.len() {
        for replacement in b"0123456789abcdefghijklmnopqrstuvwxyz" {
            if DELEGATED.as_bytes()[position] == *replacement {
                continue;
            }
            let corrupted = corrupt(DELEGATED, position, *replacement);
            assert!(decode(&corrupted).is_err(), "{corrupted} decoded");
        }
    }
}

#[test]
fn binary_forms_survive_string_round_trips() {
    let mut rng = rng();
    for _ in 0..ROUNDS * 16 {
        let mut bytes = vec![0u8; rng.gen_range(1..=16)];
        rng.fill(&mut bytes[1..]);
        bytes[0] = rng.gen_range(0..5);

        // Whatever is accepted as binary must come back from its string.
        if let Ok(address) = Address::from_bytes(&bytes, Network::Main) {
            assert_eq!(decode(&address.to_string()), Ok(address));
        }
    }
}

#[test]
fn id_bounds() {
    let max: BigUint = BigUint::from(1u8) << 63u32;
    for id in [BigUint::from(0u8), max.clone(), BigUint::from(u64::MAX)] {
        let address = Address::new_id(id.clone(), Network::Main).unwrap();
        let decoded = decode(&encode(Network::Main, &address)).unwrap();
        assert_eq!(id_from_address(&decoded).unwrap(), id);
    }

    assert_eq!(
        id_from_address(&Address::new_id(1138u32, Network::Main).unwrap()).unwrap(),
        BigUint::from(1138u32)
    );
    assert_eq!(
        encode(Network::Main, &Address::new_id(max, Network::Main).unwrap()),
        "f09223372036854775808"
    );

    let beyond = BigUint::from(u64::MAX) + 1u32;
    assert_eq!(
        Address::new_id(beyond, Network::Main),
        Err(Error::IdOutOfRange)
    );
    assert_eq!(decode("f018446744073709551616"), Err(Error::IdOutOfRange));
}

#[test]
fn length_enforcement() {
    let mut rng = rng();
    let hash = encode(Network::Test, &Address::new_actor(b"actor", Network::Test));
    let bls = encode(
        Network::Test,
        &Address::new_bls(&rng.gen::<[u8; 32]>().repeat(2)[..48], Network::Test).unwrap(),
    );

    for (encoded, protocol) in [(hash, Protocol::Actor), (bls, Protocol::Bls)] {
        let length = encoded.len();
        assert!(validate_address_string(&encoded));

        let shorter = &encoded[..length - 1];
        assert_eq!(
            check_address_string(shorter),
            Err(Error::InvalidLength {
                protocol,
                length: length - 1
            })
        );

        let longer = format!("{encoded}a");
        assert_eq!(
            check_address_string(&longer),
            Err(Error::InvalidLength {
                protocol,
                length: length + 1
            })
        );
    }
}

#[test]
fn alphabet_rejection() {
    let encoded = encode(Network::Test, &Address::new_actor(b"actor", Network::Test));
    for foreign in ['A', 'Z', '0', '1', '8', '9', '-'] {
        let mut corrupted = encoded.clone();
        corrupted.replace_range(10..11, &foreign.to_string());
        assert_eq!(
            decode(&corrupted),
            Err(Error::InvalidBase32Character(foreign))
        );
    }
}

#[test]
fn short_strings() {
    assert!(!validate_address_string("t0"));
    assert!(validate_address_string("t099"));
}
