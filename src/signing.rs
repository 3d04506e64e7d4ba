//! Single-signing of transactions and transaction ids
//!
//! The signing data is the `STX\0` prefix followed by the canonical encoding
//! of every signing field. After signing, the tree is re-encoded with
//! `TxnSignature` to form the blob; the transaction id is SHA512-half of
//! `TXN\0` and that blob.

use tracing::debug;

use crate::constant::{TRANSACTION_ID_PREFIX, TRANSACTION_SIGN_PREFIX};
use crate::error::{Result, XrpError};
use crate::hashing::sha512_half_parts;
use crate::keypair::{KeyPair, PublicKey};
use crate::seed::Seed;
use crate::st::{StObject, StValue};
use crate::types::Hash256;

/// Serialized, signed transaction and its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub blob: Vec<u8>,
    pub hash: Hash256,
}

impl SignedTransaction {
    /// Uppercase hex, the form `submit` takes
    pub fn blob_hex(&self) -> String {
        hex::encode_upper(&self.blob)
    }
}

/// Bytes a single signature covers
pub fn signing_data(tx: &StObject) -> Result<Vec<u8>> {
    let mut data = TRANSACTION_SIGN_PREFIX.to_vec();
    data.extend(tx.encode_signing()?);
    Ok(data)
}

/// Id of a signed transaction blob
pub fn transaction_hash(blob: &[u8]) -> Hash256 {
    Hash256::new(sha512_half_parts(&[&TRANSACTION_ID_PREFIX, blob]))
}

/// Sign a transaction field tree
///
/// `SigningPubKey` is filled in from the key pair when absent; a tree that
/// already names a different key is rejected. Any previous signature is
/// replaced.
pub fn sign(tx: &StObject, keypair: &KeyPair) -> Result<SignedTransaction> {
    let mut tx = tx.clone();
    let public_key = keypair.public_key();
    match tx.get_as("SigningPubKey", StValue::as_blob)? {
        Some(existing) if existing != public_key.as_bytes() => {
            return Err(XrpError::InvalidPublicKey(format!(
                "SigningPubKey {} does not belong to the signing key {}",
                hex::encode_upper(existing),
                public_key
            )));
        }
        Some(_) => {}
        None => tx.set("SigningPubKey", public_key.as_bytes().to_vec())?,
    }
    tx.remove("TxnSignature");

    let signature = keypair.sign(&signing_data(&tx)?)?;
    tx.set("TxnSignature", signature)?;

    let blob = tx.encode()?;
    let hash = transaction_hash(&blob);
    debug!(
        account = %keypair.account_id(),
        hash = %hash,
        size = blob.len(),
        "signed transaction"
    );
    Ok(SignedTransaction { blob, hash })
}

/// Derive the key pair from `seed` and sign
pub fn sign_with_seed(tx: &StObject, seed: &Seed) -> Result<SignedTransaction> {
    sign(tx, &seed.derive_keypair()?)
}

/// Sign a transaction given in its JSON form
pub fn sign_json(tx_json: &serde_json::Value, seed: &Seed) -> Result<SignedTransaction> {
    sign_with_seed(&StObject::from_json(tx_json)?, seed)
}

/// Decode a signed blob and check its signature against its `SigningPubKey`
pub fn verify(blob: &[u8]) -> Result<StObject> {
    let tx = StObject::decode(blob)?;
    let public_key = PublicKey::from_slice(tx.require("SigningPubKey", StValue::as_blob)?)?;
    let signature = tx.require("TxnSignature", StValue::as_blob)?;
    public_key.verify(&signing_data(&tx)?, signature)?;
    Ok(tx)
}
