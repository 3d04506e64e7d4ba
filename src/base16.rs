//! Base16 (hex) codec
//!
//! Decoding is case-insensitive, encoding always emits uppercase. The
//! buffer variants report an [`OperationStatus`] instead of failing so callers
//! can size a destination and retry.

use crate::error::Result;

const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Outcome of a buffer-to-buffer codec call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Done,
    InvalidData,
    DestinationTooSmall,
}

/// Status plus how far the call got in each buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub status: OperationStatus,
    pub consumed: usize,
    pub written: usize,
}

impl Progress {
    fn new(status: OperationStatus, consumed: usize, written: usize) -> Self {
        Self {
            status,
            consumed,
            written,
        }
    }
}

pub fn encode(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text)?)
}

pub fn encoded_len(byte_len: usize) -> usize {
    byte_len * 2
}

/// Decoded length of `text_len` hex characters, or `None` when odd
pub fn decoded_len(text_len: usize) -> Option<usize> {
    (text_len % 2 == 0).then_some(text_len / 2)
}

/// Encode `src` as uppercase UTF-8 hex into `dst`
pub fn encode_to_utf8(src: &[u8], dst: &mut [u8]) -> Progress {
    let needed = encoded_len(src.len());
    if dst.len() < needed {
        return Progress::new(OperationStatus::DestinationTooSmall, 0, 0);
    }
    for (byte, pair) in src.iter().zip(dst.chunks_exact_mut(2)) {
        pair[0] = UPPER_HEX[(byte >> 4) as usize];
        pair[1] = UPPER_HEX[(byte & 0x0F) as usize];
    }
    Progress::new(OperationStatus::Done, src.len(), needed)
}

/// Decode UTF-8 hex from `src` into `dst`
pub fn decode_from_utf8(src: &[u8], dst: &mut [u8]) -> Progress {
    let needed = match decoded_len(src.len()) {
        Some(n) => n,
        None => return Progress::new(OperationStatus::InvalidData, 0, 0),
    };
    if dst.len() < needed {
        return Progress::new(OperationStatus::DestinationTooSmall, 0, 0);
    }
    match hex::decode_to_slice(src, &mut dst[..needed]) {
        Ok(()) => Progress::new(OperationStatus::Done, src.len(), needed),
        Err(_) => Progress::new(OperationStatus::InvalidData, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_uppercase_and_decode_ignores_case() {
        assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "DEADBEEF");
        assert_eq!(decode("deadBEEF").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn decode_rejects_odd_and_non_hex() {
        assert!(decode("ABC").is_err());
        assert!(decode("ZZ").is_err());
    }

    #[test]
    fn buffer_variants_report_status() {
        let mut small = [0u8; 3];
        let p = encode_to_utf8(&[1, 2], &mut small);
        assert_eq!(p.status, OperationStatus::DestinationTooSmall);

        let mut out = [0u8; 4];
        let p = encode_to_utf8(&[0xab, 0x01], &mut out);
        assert_eq!(p, Progress::new(OperationStatus::Done, 2, 4));
        assert_eq!(&out, b"AB01");

        let mut bytes = [0u8; 8];
        let p = decode_from_utf8(b"ab01", &mut bytes);
        assert_eq!(p, Progress::new(OperationStatus::Done, 4, 2));
        assert_eq!(&bytes[..2], &[0xab, 0x01]);

        assert_eq!(
            decode_from_utf8(b"abc", &mut bytes).status,
            OperationStatus::InvalidData
        );
        assert_eq!(
            decode_from_utf8(b"zz", &mut bytes).status,
            OperationStatus::InvalidData
        );
        assert_eq!(
            decode_from_utf8(b"abcd", &mut bytes[..1]).status,
            OperationStatus::DestinationTooSmall
        );
    }
}
