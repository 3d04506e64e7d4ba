//! XRP Ledger codec library
//!
//! Client-side encodings of the XRP Ledger: Base16, Base58Check and RFC1751
//! text forms, the canonical binary (ST) format of transactions and ledger
//! entries, key derivation from family seeds, and offline transaction signing.
//!
//! # Example
//!
//! ```rust,no_run
//! use xrpl_codec::{KeyPair, Transaction, XrpAmount};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let keypair = KeyPair::from_secret("sEdTM1uX8pu2do5XvTnutH6HsouMaM2")?;
//! let tx = Transaction::payment(
//!     keypair.account_id(),
//!     "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse()?,
//!     XrpAmount::from_drops(1_000_000)?.into(),
//!     XrpAmount::from_drops(12)?,
//!     1,
//! );
//! let signed = tx.sign(&keypair)?;
//! println!("{} {}", signed.hash, signed.blob_hex());
//! # Ok(())
//! # }
//! ```

pub mod base16;
pub mod base58;
pub mod constant;
pub mod definitions;
pub mod error;
pub mod hashing;
pub mod keypair;
pub mod ledger;
pub mod rfc1751;
pub mod seed;
pub mod signing;
pub mod st;
pub mod transaction;
pub mod types;

pub use error::{Result, XrpError};
pub use keypair::{KeyPair, PublicKey};
pub use ledger::{AccountRoot, LedgerEntry, LedgerHeader};
pub use seed::{KeyType, Seed};
pub use signing::{sign, sign_with_seed, transaction_hash, verify, SignedTransaction};
pub use st::{FieldId, StObject, StValue};
pub use transaction::{Memo, Transaction, TransactionKind};
pub use types::{
    AccountId, Amount, Currency, CurrencyCode, Hash128, Hash160, Hash256, IssuedAmount, XrpAmount,
};
