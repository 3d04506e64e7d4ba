use byteorder::{BigEndian, ByteOrder};

use crate::constant::{LEDGER_HEADER_PREFIX, RIPPLE_EPOCH_OFFSET};
use crate::error::{Result, XrpError};
use crate::hashing::sha512_half_parts;
use crate::types::Hash256;

// byte offsets of the fixed layout
const SEQUENCE: usize = 0;
const TOTAL_COINS: usize = 4;
const PARENT_HASH: usize = 12;
const TRANSACTION_HASH: usize = 44;
const ACCOUNT_HASH: usize = 76;
const PARENT_CLOSE_TIME: usize = 108;
const CLOSE_TIME: usize = 112;
const CLOSE_TIME_RESOLUTION: usize = 116;
const CLOSE_FLAGS: usize = 117;

/// Ledger header in its fixed 118-byte layout
///
/// Times are seconds since the Ripple epoch (2000-01-01T00:00:00Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerHeader {
    pub sequence: u32,
    /// Drops in existence
    pub total_coins: u64,
    pub parent_hash: Hash256,
    pub transaction_hash: Hash256,
    pub account_hash: Hash256,
    pub parent_close_time: u32,
    pub close_time: u32,
    pub close_time_resolution: u8,
    pub close_flags: u8,
}

impl LedgerHeader {
    pub const LEN: usize = 118;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(XrpError::InvalidLedgerHeader(format!(
                "expected {} bytes, got {}",
                Self::LEN,
                bytes.len()
            )));
        }
        let hash_at = |offset: usize| Hash256::from_slice(&bytes[offset..offset + Hash256::LEN]);
        Ok(Self {
            sequence: BigEndian::read_u32(&bytes[SEQUENCE..]),
            total_coins: BigEndian::read_u64(&bytes[TOTAL_COINS..]),
            parent_hash: hash_at(PARENT_HASH)?,
            transaction_hash: hash_at(TRANSACTION_HASH)?,
            account_hash: hash_at(ACCOUNT_HASH)?,
            parent_close_time: BigEndian::read_u32(&bytes[PARENT_CLOSE_TIME..]),
            close_time: BigEndian::read_u32(&bytes[CLOSE_TIME..]),
            close_time_resolution: bytes[CLOSE_TIME_RESOLUTION],
            close_flags: bytes[CLOSE_FLAGS],
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        BigEndian::write_u32(&mut out[SEQUENCE..], self.sequence);
        BigEndian::write_u64(&mut out[TOTAL_COINS..], self.total_coins);
        out[PARENT_HASH..TRANSACTION_HASH].copy_from_slice(self.parent_hash.as_bytes());
        out[TRANSACTION_HASH..ACCOUNT_HASH].copy_from_slice(self.transaction_hash.as_bytes());
        out[ACCOUNT_HASH..PARENT_CLOSE_TIME].copy_from_slice(self.account_hash.as_bytes());
        BigEndian::write_u32(&mut out[PARENT_CLOSE_TIME..], self.parent_close_time);
        BigEndian::write_u32(&mut out[CLOSE_TIME..], self.close_time);
        out[CLOSE_TIME_RESOLUTION] = self.close_time_resolution;
        out[CLOSE_FLAGS] = self.close_flags;
        out
    }

    /// Ledger hash: SHA512-half of `LWR\0` and the header
    pub fn hash(&self) -> Hash256 {
        Hash256::new(sha512_half_parts(&[&LEDGER_HEADER_PREFIX, &self.to_bytes()]))
    }

    pub fn close_time_unix(&self) -> u64 {
        u64::from(self.close_time) + RIPPLE_EPOCH_OFFSET
    }

    pub fn parent_close_time_unix(&self) -> u64 {
        u64::from(self.parent_close_time) + RIPPLE_EPOCH_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "005B67A60163457208228EB9A30FEB3CDEE53046B4CEB0A1532E516F93AAFA3125A7E66A0379299D4B30F6C0091C395D8B5CD6FD89594AEF8FDF7DF8F70E73CB5600D542B8A469697AE3AC86C3174C83546BABA662B8612D6175EE7AD7E23FB4FC25CECFC9B10DE0E8C0A807247D659E247D65A80A00";

    #[test]
    fn decodes_fixed_offsets() {
        let header = LedgerHeader::decode(&hex::decode(HEADER).unwrap()).unwrap();
        assert_eq!(header.sequence, 5_990_310);
        assert_eq!(header.total_coins, 99_999_972_797_353_657);
        assert_eq!(
            header.parent_hash.to_string(),
            "A30FEB3CDEE53046B4CEB0A1532E516F93AAFA3125A7E66A0379299D4B30F6C0"
        );
        assert_eq!(
            header.account_hash.to_string(),
            "C3174C83546BABA662B8612D6175EE7AD7E23FB4FC25CECFC9B10DE0E8C0A807"
        );
        assert_eq!(header.parent_close_time, 612_197_790);
        assert_eq!(header.close_time, 612_197_800);
        assert_eq!(header.close_time_unix(), 1_558_882_600);
        assert_eq!(header.close_time_resolution, 10);
        assert_eq!(header.close_flags, 0);
    }

    #[test]
    fn hash_and_reencode() {
        let bytes = hex::decode(HEADER).unwrap();
        let header = LedgerHeader::decode(&bytes).unwrap();
        assert_eq!(header.to_bytes().to_vec(), bytes);
        assert_eq!(
            header.hash().to_string(),
            "CEAD2BC39424CB00A549B68800A5B1D4FE2F43A538B6DFD96E217A0267A1674F"
        );
    }

    #[test]
    fn rejects_wrong_length() {
        let bytes = hex::decode(HEADER).unwrap();
        assert!(matches!(
            LedgerHeader::decode(&bytes[..117]),
            Err(XrpError::InvalidLedgerHeader(_))
        ));
    }
}
