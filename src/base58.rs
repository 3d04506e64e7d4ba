//! Base58 and Base58Check over Ripple's alphabet
//!
//! Leading zero bytes map to leading `r` characters and back. Base58Check
//! appends the four-byte double-SHA256 checksum before encoding and verifies
//! it on the way back.

use bs58::Alphabet;

use crate::constant::CHECKSUM_LENGTH;
use crate::error::{Result, XrpError};
use crate::hashing::checksum;

fn alphabet() -> &'static Alphabet {
    Alphabet::RIPPLE
}

pub fn encode(bytes: &[u8]) -> String {
    bs58::encode(bytes).with_alphabet(alphabet()).into_string()
}

/// Fails with [`XrpError::InvalidBase58`] on characters outside the alphabet
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(bs58::decode(text).with_alphabet(alphabet()).into_vec()?)
}

/// Base58 of `data` followed by its checksum
pub fn check_encode(data: &[u8]) -> String {
    let checked = [data, &checksum(data)].concat();
    encode(&checked)
}

pub fn check_decode(text: &str) -> Result<Vec<u8>> {
    let mut decoded = decode(text)?;
    if decoded.len() < CHECKSUM_LENGTH {
        return Err(XrpError::InvalidLength {
            expected: CHECKSUM_LENGTH,
            actual: decoded.len(),
        });
    }
    let check = decoded.split_off(decoded.len() - CHECKSUM_LENGTH);
    if checksum(&decoded)[..] != check[..] {
        return Err(XrpError::ChecksumMismatch);
    }
    Ok(decoded)
}

/// Decode into a caller-sized buffer, returning the number of bytes written
pub fn check_decode_into(text: &str, dst: &mut [u8]) -> Result<usize> {
    let decoded = check_decode(text)?;
    if dst.len() < decoded.len() {
        return Err(XrpError::DestinationTooSmall {
            needed: decoded.len(),
            available: dst.len(),
        });
    }
    dst[..decoded.len()].copy_from_slice(&decoded);
    Ok(decoded.len())
}

pub fn encode_versioned(version: &[u8], payload: &[u8]) -> String {
    check_encode(&[version, payload].concat())
}

/// Decode a Base58Check string and strip an expected version prefix
pub fn decode_versioned(text: &str, version: &[u8], payload_len: usize) -> Result<Vec<u8>> {
    let decoded = check_decode(text)?;
    if !decoded.starts_with(version) {
        return Err(XrpError::InvalidVersion(hex::encode_upper(
            &decoded[..version.len().min(decoded.len())],
        )));
    }
    let payload = &decoded[version.len()..];
    if payload.len() != payload_len {
        return Err(XrpError::InvalidLength {
            expected: payload_len,
            actual: payload.len(),
        });
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constant::{ACCOUNT_ID_PREFIX, XRPL_ALPHABET};

    #[test]
    fn leading_zeros_become_first_alphabet_char() {
        let encoded = encode(&[0, 0, 1]);
        assert!(encoded.starts_with("rr"));
        assert_eq!(encoded.as_bytes()[0], XRPL_ALPHABET[0]);
        assert_eq!(decode(&encoded).unwrap(), vec![0, 0, 1]);
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // '0', 'O', 'I' and 'l' are not part of the alphabet
        for bad in ["r0", "rO", "rI", "rl"] {
            assert!(matches!(decode(bad), Err(XrpError::InvalidBase58(_))));
        }
    }

    #[test]
    fn detects_checksum_mismatch() {
        let text = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
        assert!(check_decode(text).is_ok());
        let corrupted = text.replacen('9', "8", 1);
        assert_eq!(check_decode(&corrupted), Err(XrpError::ChecksumMismatch));
    }

    #[test]
    fn decode_into_caller_buffer() {
        let text = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
        let mut buf = [0u8; 21];
        assert_eq!(check_decode_into(text, &mut buf).unwrap(), 21);
        assert_eq!(buf[0], 0x00);

        let mut small = [0u8; 20];
        assert_eq!(
            check_decode_into(text, &mut small),
            Err(XrpError::DestinationTooSmall {
                needed: 21,
                available: 20
            })
        );
    }

    #[test]
    fn versioned_decode_checks_prefix_and_length() {
        let text = encode_versioned(ACCOUNT_ID_PREFIX, &[7u8; 20]);
        assert_eq!(decode_versioned(&text, ACCOUNT_ID_PREFIX, 20).unwrap(), vec![7u8; 20]);
        assert!(matches!(
            decode_versioned(&text, &[0x21], 20),
            Err(XrpError::InvalidVersion(_))
        ));
        assert!(matches!(
            decode_versioned(&text, ACCOUNT_ID_PREFIX, 16),
            Err(XrpError::InvalidLength { .. })
        ));
    }
}
