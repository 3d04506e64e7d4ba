use std::fmt;
use std::str::FromStr;

use crate::base58;
use crate::constant::ACCOUNT_ID_PREFIX;
use crate::error::{Result, XrpError};
use crate::hashing::hash160;

/// 20-byte account identifier, RIPEMD160(SHA256(public key))
///
/// The text form is Base58Check with version byte `0x00`, the familiar
/// `r...` address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 20]);

impl AccountId {
    pub const LEN: usize = 20;

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 20] = bytes.try_into().map_err(|_| XrpError::InvalidLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Account id of a canonical 33-byte public key
    pub fn from_public_key(public_key: &[u8]) -> Self {
        Self(hash160(public_key))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_address(&self) -> String {
        base58::encode_versioned(ACCOUNT_ID_PREFIX, &self.0)
    }

    pub fn from_address(address: &str) -> Result<Self> {
        let payload = base58::decode_versioned(address, ACCOUNT_ID_PREFIX, Self::LEN)
            .map_err(|e| match e {
                XrpError::InvalidVersion(_) | XrpError::InvalidLength { .. } => {
                    XrpError::InvalidAddress(address.to_string())
                }
                other => other,
            })?;
        Self::from_slice(&payload)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_address())
    }
}

impl FromStr for AccountId {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_address(s)
    }
}

serde_via_str!(AccountId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_round_trip() {
        for address in [
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "rJgzgUKLw6dUoDFXgbHNb2euXdMcNn6ioh",
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp",
        ] {
            let id: AccountId = address.parse().unwrap();
            assert_eq!(id.to_string(), address);
        }
    }

    #[test]
    fn from_public_key_vector() {
        let key = hex::decode("0330E7FC9D56BB25D6893BA3F317AE5BCF33B3291BD63DB32654A313222F7FD020")
            .unwrap();
        assert_eq!(
            AccountId::from_public_key(&key).to_string(),
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"
        );
    }

    #[test]
    fn seed_text_is_not_an_address() {
        assert_eq!(
            "shHHvEhCC6WdkJNV1AfBmqw3XJ3Uv".parse::<AccountId>(),
            Err(XrpError::InvalidAddress(
                "shHHvEhCC6WdkJNV1AfBmqw3XJ3Uv".to_string()
            ))
        );
    }

    #[test]
    fn serde_uses_address_text() {
        let id: AccountId = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh\"");
        assert_eq!(serde_json::from_str::<AccountId>(&json).unwrap(), id);
    }
}
