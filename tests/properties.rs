//! Round-trip properties of the text and binary codecs

use proptest::prelude::*;

use xrpl_codec::constant::XRPL_ALPHABET;
use xrpl_codec::st::{decode_variable_length, encode_variable_length, MAX_LENGTH_VALUE};
use xrpl_codec::{base16, base58, rfc1751, Currency, FieldId, XrpError};

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn base16_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let text = base16::encode(&bytes);
        prop_assert_eq!(base16::decode(&text.to_lowercase()).unwrap(), bytes);
    }

    /// Leading zero bytes survive as leading `r` characters
    #[test]
    fn base58_round_trip(
        zeros in 0usize..4,
        tail in prop::collection::vec(any::<u8>(), 0..48),
    ) {
        let mut bytes = vec![0u8; zeros];
        bytes.extend(tail);
        let text = base58::encode(&bytes);
        prop_assert_eq!(base58::decode(&text).unwrap(), bytes);
    }

    #[test]
    fn base58check_round_trip_and_corruption(
        bytes in prop::collection::vec(any::<u8>(), 1..40),
        position in any::<prop::sample::Index>(),
        replacement in 0usize..58,
    ) {
        let text = base58::check_encode(&bytes);
        prop_assert_eq!(base58::check_decode(&text).unwrap(), bytes);

        let mut chars: Vec<u8> = text.into_bytes();
        let i = position.index(chars.len());
        let new = XRPL_ALPHABET[replacement];
        prop_assume!(chars[i] != new);
        chars[i] = new;
        let corrupted = String::from_utf8(chars).unwrap();
        prop_assert!(base58::check_decode(&corrupted).is_err());
    }

    #[test]
    fn rfc1751_block_round_trip(block in any::<u64>()) {
        let words = rfc1751::encode_block(block);
        prop_assert_eq!(rfc1751::decode_block(&words).unwrap(), (block, false));
    }

    #[test]
    fn rfc1751_bytes_round_trip(blocks in prop::collection::vec(any::<[u8; 8]>(), 1..4)) {
        let bytes = blocks.concat();
        let decoded = rfc1751::decode(&rfc1751::encode(&bytes).unwrap()).unwrap();
        prop_assert!(!decoded.parity_error);
        prop_assert_eq!(decoded.bytes, bytes);
    }

    #[test]
    fn variable_length_round_trip(length in 0usize..=MAX_LENGTH_VALUE) {
        let prefix = encode_variable_length(length).unwrap();
        let expected_len = match length {
            0..=192 => 1,
            193..=12_480 => 2,
            _ => 3,
        };
        prop_assert_eq!(prefix.len(), expected_len);
        prop_assert_eq!(decode_variable_length(&prefix).unwrap(), (length, expected_len));
    }

    #[test]
    fn field_id_round_trip(type_code in 1u8..=255, field_code in 1u8..=255) {
        let id = FieldId::new(type_code, field_code);
        let bytes = id.to_bytes().unwrap();
        prop_assert_eq!(FieldId::decode(&bytes).unwrap(), (id, bytes.len()));
    }

    #[test]
    fn currency_text_round_trip(
        negative in any::<bool>(),
        mantissa in Currency::MIN_MANTISSA..=Currency::MAX_MANTISSA,
        exponent in Currency::MIN_EXPONENT..=Currency::MAX_EXPONENT,
    ) {
        let value = Currency::new(negative, mantissa, exponent).unwrap();
        let text = value.to_string();
        prop_assert_eq!(text.parse::<Currency>().unwrap(), value);
        prop_assert_eq!(Currency::from_bits(value.to_bits()).unwrap(), value);
    }
}

#[test]
fn length_above_three_byte_tier_overflows() {
    assert!(matches!(
        encode_variable_length(MAX_LENGTH_VALUE + 1),
        Err(XrpError::Overflow(_))
    ));
}
