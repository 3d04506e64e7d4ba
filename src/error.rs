//! Error types for the XRPL codec library

use thiserror::Error;

/// Main error type for the XRPL codec library
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XrpError {
    #[error("Invalid base58 data: {0}")]
    InvalidBase58(#[from] bs58::decode::Error),

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid version prefix: {0}")]
    InvalidVersion(String),

    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Destination too small: need {needed} bytes, have {available}")]
    DestinationTooSmall { needed: usize, available: usize },

    #[error("Hex decode error: {0}")]
    HexDecode(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Word not in RFC1751 dictionary: {0}")]
    UnknownWord(String),

    #[error("RFC1751 input must be a multiple of {0}")]
    InvalidWordCount(usize),

    #[error("Unexpected end of buffer: need {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("Invalid field id: {0}")]
    InvalidFieldId(String),

    #[error("Field order violation: {previous} must precede {next}")]
    FieldOrder { previous: String, next: String },

    #[error("Objects and arrays nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Type mismatch for {field}: expected {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Value out of range: {0}")]
    Overflow(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),

    #[error("Unknown ledger entry type: {0}")]
    UnknownLedgerEntryType(String),

    #[error("Invalid ledger header: {0}")]
    InvalidLedgerHeader(String),

    #[error("Parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Random source failure")]
    Random,
}

impl From<serde_json::Error> for XrpError {
    fn from(err: serde_json::Error) -> Self {
        XrpError::Json(err.to_string())
    }
}

impl From<hex::FromHexError> for XrpError {
    fn from(err: hex::FromHexError) -> Self {
        XrpError::HexDecode(err.to_string())
    }
}

impl From<std::io::Error> for XrpError {
    fn from(err: std::io::Error) -> Self {
        XrpError::Io(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, XrpError>;
