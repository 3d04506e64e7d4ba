//! Key derivation from seeds, signing and signature verification

use std::fmt;
use std::str::FromStr;

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, NonZeroScalar};
use ring::signature::{Ed25519KeyPair, KeyPair as _, UnparsedPublicKey, ED25519};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::base58;
use crate::constant::{ACCOUNT_PUBLIC_PREFIX, ED25519_KEY_PREFIX, NODE_PUBLIC_PREFIX};
use crate::error::{Result, XrpError};
use crate::hashing::{sha512_half, sha512_half_parts};
use crate::seed::{KeyType, Seed};
use crate::types::{serde_via_str, AccountId};

pub const PUBLIC_KEY_LEN: usize = 33;

/// Canonical 33-byte public key
///
/// Secp256k1 keys are SEC1-compressed (`02`/`03` prefix); Ed25519 keys are
/// the 32-byte point behind an `ED` marker byte.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; PUBLIC_KEY_LEN] =
            bytes.try_into().map_err(|_| XrpError::InvalidLength {
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            })?;
        match array[0] {
            ED25519_KEY_PREFIX => {}
            0x02 | 0x03 => {
                VerifyingKey::from_sec1_bytes(&array)
                    .map_err(|_| XrpError::InvalidPublicKey(hex::encode_upper(array)))?;
            }
            _ => return Err(XrpError::InvalidPublicKey(hex::encode_upper(array))),
        }
        Ok(Self(array))
    }

    pub fn key_type(&self) -> KeyType {
        if self.0[0] == ED25519_KEY_PREFIX {
            KeyType::Ed25519
        } else {
            KeyType::Secp256k1
        }
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn account_id(&self) -> AccountId {
        AccountId::from_public_key(&self.0)
    }

    /// `a...` account public key text
    pub fn to_account_public(&self) -> String {
        base58::encode_versioned(ACCOUNT_PUBLIC_PREFIX, &self.0)
    }

    pub fn from_account_public(text: &str) -> Result<Self> {
        Self::from_slice(&base58::decode_versioned(
            text,
            ACCOUNT_PUBLIC_PREFIX,
            PUBLIC_KEY_LEN,
        )?)
    }

    /// `n...` node (validator) public key text
    pub fn to_node_public(&self) -> String {
        base58::encode_versioned(NODE_PUBLIC_PREFIX, &self.0)
    }

    pub fn from_node_public(text: &str) -> Result<Self> {
        Self::from_slice(&base58::decode_versioned(
            text,
            NODE_PUBLIC_PREFIX,
            PUBLIC_KEY_LEN,
        )?)
    }

    /// Verify `signature` over `message`
    ///
    /// Secp256k1 signatures cover SHA512-half of the message and must be DER
    /// with a low S; Ed25519 signatures cover the message itself.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        match self.key_type() {
            KeyType::Secp256k1 => {
                let key = VerifyingKey::from_sec1_bytes(&self.0)
                    .map_err(|_| XrpError::InvalidPublicKey(self.to_string()))?;
                let signature =
                    Signature::from_der(signature).map_err(|_| XrpError::InvalidSignature)?;
                if signature.normalize_s().is_some() {
                    return Err(XrpError::InvalidSignature);
                }
                key.verify_prehash(&sha512_half(message), &signature)
                    .map_err(|_| XrpError::InvalidSignature)
            }
            KeyType::Ed25519 => UnparsedPublicKey::new(&ED25519, &self.0[1..])
                .verify(message, signature)
                .map_err(|_| XrpError::InvalidSignature),
        }
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl FromStr for PublicKey {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(s)?)
    }
}

serde_via_str!(PublicKey);

/// Signing key derived from a seed
///
/// For secp256k1 this is the account key (root + tweak); the root public
/// key is kept for the node-public form. For Ed25519 root and account keys
/// coincide.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)]
    key_type: KeyType,
    private_key: [u8; 32],
    #[zeroize(skip)]
    public_key: PublicKey,
    #[zeroize(skip)]
    root_public_key: PublicKey,
}

impl KeyPair {
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let keypair = match seed.key_type() {
            KeyType::Secp256k1 => derive_secp256k1(seed.as_bytes())?,
            KeyType::Ed25519 => derive_ed25519(seed.as_bytes())?,
        };
        debug!(
            key_type = %keypair.key_type,
            account = %keypair.account_id(),
            "derived key pair"
        );
        Ok(keypair)
    }

    /// Shortcut for a Base58 seed such as `sEd...`
    pub fn from_secret(secret: &str) -> Result<Self> {
        Self::from_seed(&secret.parse()?)
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Account public key, the one that goes into `SigningPubKey`
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn root_public_key(&self) -> &PublicKey {
        &self.root_public_key
    }

    pub fn account_id(&self) -> AccountId {
        self.public_key.account_id()
    }

    pub fn address(&self) -> String {
        self.account_id().to_address()
    }

    /// Sign a message (normally the prefixed signing data of a transaction)
    ///
    /// Secp256k1 signs SHA512-half of the message with an RFC6979 nonce and
    /// returns a low-S DER signature. Ed25519 returns the 64-byte signature
    /// of the message.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        match self.key_type {
            KeyType::Secp256k1 => {
                let key = SigningKey::from_bytes(&FieldBytes::from(self.private_key))
                    .map_err(|_| XrpError::InvalidSignature)?;
                let signature: Signature = key
                    .sign_prehash(&sha512_half(message))
                    .map_err(|_| XrpError::InvalidSignature)?;
                let signature = signature.normalize_s().unwrap_or(signature);
                Ok(signature.to_der().as_bytes().to_vec())
            }
            KeyType::Ed25519 => {
                let key = Ed25519KeyPair::from_seed_unchecked(&self.private_key)
                    .map_err(|_| XrpError::InvalidSignature)?;
                Ok(key.sign(message).as_ref().to_vec())
            }
        }
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        self.public_key.verify(message, signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_type", &self.key_type)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

fn derive_ed25519(seed: &[u8]) -> Result<KeyPair> {
    let mut private_key = sha512_half(seed);
    let ring_key = Ed25519KeyPair::from_seed_unchecked(&private_key).map_err(|_| {
        private_key.zeroize();
        XrpError::InvalidSeed("ed25519 key rejected".to_string())
    })?;
    let mut public = [0u8; PUBLIC_KEY_LEN];
    public[0] = ED25519_KEY_PREFIX;
    public[1..].copy_from_slice(ring_key.public_key().as_ref());
    let public_key = PublicKey(public);
    Ok(KeyPair {
        key_type: KeyType::Ed25519,
        private_key,
        public_key,
        root_public_key: public_key,
    })
}

fn derive_secp256k1(seed: &[u8]) -> Result<KeyPair> {
    let root = derive_scalar(seed, None)?;
    let root_public = compressed_public(&root)?;

    let tweak = derive_scalar(root_public.as_bytes(), Some(0))?;
    let account = Option::<NonZeroScalar>::from(NonZeroScalar::new(*root + *tweak))
        .ok_or_else(|| XrpError::InvalidSeed("account key is zero".to_string()))?;
    let public_key = compressed_public(&account)?;

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&account.to_bytes());
    Ok(KeyPair {
        key_type: KeyType::Secp256k1,
        private_key,
        public_key,
        root_public_key: root_public,
    })
}

/// SHA512-half of `prefix ‖ [discriminator] ‖ counter`, retried with the
/// next counter until the result is a valid nonzero scalar below the order
fn derive_scalar(prefix: &[u8], discriminator: Option<u32>) -> Result<NonZeroScalar> {
    let discriminator = discriminator.map(u32::to_be_bytes);
    for counter in 0..=u32::MAX {
        let counter_bytes = counter.to_be_bytes();
        let mut candidate = match &discriminator {
            Some(d) => sha512_half_parts(&[prefix, d, &counter_bytes]),
            None => sha512_half_parts(&[prefix, &counter_bytes]),
        };
        let scalar = NonZeroScalar::from_repr(FieldBytes::from(candidate));
        candidate.zeroize();
        if let Some(scalar) = Option::<NonZeroScalar>::from(scalar) {
            return Ok(scalar);
        }
        trace!(counter, "scalar candidate out of range, retrying");
    }
    Err(XrpError::InvalidSeed("no valid scalar".to_string()))
}

fn compressed_public(scalar: &NonZeroScalar) -> Result<PublicKey> {
    let point = k256::PublicKey::from_secret_scalar(scalar).to_encoded_point(true);
    PublicKey::from_slice(point.as_bytes())
}
