//! Seeds: 16 bytes of entropy tagged with the key type they derive

use std::fmt;
use std::str::FromStr;

use ring::rand::{SecureRandom, SystemRandom};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::base58;
use crate::constant::{ED25519_SEED_PREFIX, SECP256K1_SEED_PREFIX};
use crate::error::{Result, XrpError};
use crate::keypair::KeyPair;
use crate::rfc1751;

pub const SEED_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secp256k1,
    Ed25519,
}

impl KeyType {
    fn seed_prefix(self) -> &'static [u8] {
        match self {
            KeyType::Secp256k1 => SECP256K1_SEED_PREFIX,
            KeyType::Ed25519 => ED25519_SEED_PREFIX,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Secp256k1 => f.write_str("secp256k1"),
            KeyType::Ed25519 => f.write_str("ed25519"),
        }
    }
}

impl FromStr for KeyType {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(KeyType::Secp256k1),
            "ed25519" => Ok(KeyType::Ed25519),
            _ => Err(XrpError::InvalidSeed(format!("unknown key type {}", s))),
        }
    }
}

/// Seed entropy, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    #[zeroize(skip)]
    key_type: KeyType,
    entropy: [u8; SEED_LEN],
}

impl Seed {
    pub fn new(key_type: KeyType, entropy: [u8; SEED_LEN]) -> Self {
        Self { key_type, entropy }
    }

    /// Fresh entropy from the operating system
    pub fn random(key_type: KeyType) -> Result<Self> {
        let mut entropy = [0u8; SEED_LEN];
        SystemRandom::new()
            .fill(&mut entropy)
            .map_err(|_| XrpError::Random)?;
        let seed = Self::new(key_type, entropy);
        entropy.zeroize();
        Ok(seed)
    }

    pub fn from_bytes(key_type: KeyType, bytes: &[u8]) -> Result<Self> {
        let entropy: [u8; SEED_LEN] = bytes.try_into().map_err(|_| XrpError::InvalidLength {
            expected: SEED_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self::new(key_type, entropy))
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.entropy
    }

    /// `s...` for secp256k1, `sEd...` for Ed25519
    pub fn to_base58(&self) -> String {
        base58::encode_versioned(self.key_type.seed_prefix(), &self.entropy)
    }

    /// The key type is recognized from the version prefix
    pub fn from_base58(text: &str) -> Result<Self> {
        let decoded = Zeroizing::new(base58::check_decode(text)?);
        for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
            let prefix = key_type.seed_prefix();
            if decoded.len() == prefix.len() + SEED_LEN && decoded.starts_with(prefix) {
                return Self::from_bytes(key_type, &decoded[prefix.len()..]);
            }
        }
        Err(XrpError::InvalidSeed(
            "unrecognized seed version or length".to_string(),
        ))
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.entropy)
    }

    pub fn from_hex(key_type: KeyType, text: &str) -> Result<Self> {
        let bytes = Zeroizing::new(hex::decode(text)?);
        Self::from_bytes(key_type, &bytes)
    }

    /// Twelve-word mnemonic, entropy taken in little-endian byte order
    pub fn to_rfc1751(&self) -> Result<String> {
        let mut reversed = Zeroizing::new(self.entropy);
        reversed.reverse();
        rfc1751::encode(&reversed[..])
    }

    /// Parse a mnemonic; a parity failure is rejected
    pub fn from_rfc1751(key_type: KeyType, phrase: &str) -> Result<Self> {
        let decoded = rfc1751::decode(phrase)?;
        if decoded.parity_error {
            return Err(XrpError::InvalidSeed("RFC1751 parity check failed".to_string()));
        }
        let mut bytes = Zeroizing::new(decoded.bytes);
        bytes.reverse();
        Self::from_bytes(key_type, &bytes)
    }

    pub fn derive_keypair(&self) -> Result<KeyPair> {
        KeyPair::from_seed(self)
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("key_type", &self.key_type)
            .finish_non_exhaustive()
    }
}

impl FromStr for Seed {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}
