//! Protocol constants shared across the codec

/// Ripple's Base58 alphabet (no `0`, `O`, `I`, `l`)
pub const XRPL_ALPHABET: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

pub const CHECKSUM_LENGTH: usize = 4;

// Base58Check version prefixes
pub const ACCOUNT_ID_PREFIX: &[u8] = &[0x00];
pub const SECP256K1_SEED_PREFIX: &[u8] = &[0x21];
pub const ED25519_SEED_PREFIX: &[u8] = &[0x01, 0xE1, 0x4B];
pub const NODE_PUBLIC_PREFIX: &[u8] = &[0x1C];
pub const ACCOUNT_PUBLIC_PREFIX: &[u8] = &[0x23];

/// Marker byte in front of a 32-byte Ed25519 public key
pub const ED25519_KEY_PREFIX: u8 = 0xED;

// Hash prefixes, each the ASCII tag followed by a zero byte
/// Unsigned single-signing transaction prefix (`STX\0`)
pub const TRANSACTION_SIGN_PREFIX: [u8; 4] = [0x53, 0x54, 0x58, 0x00];
/// Signed transaction id prefix (`TXN\0`)
pub const TRANSACTION_ID_PREFIX: [u8; 4] = [0x54, 0x58, 0x4E, 0x00];
/// Ledger header hash prefix (`LWR\0`)
pub const LEDGER_HEADER_PREFIX: [u8; 4] = [0x4C, 0x57, 0x52, 0x00];

/// Ledger space key for account roots (`a`)
pub const ACCOUNT_SPACE: u16 = 0x0061;

/// Seconds between the Unix epoch and the Ripple epoch (2000-01-01T00:00:00Z)
pub const RIPPLE_EPOCH_OFFSET: u64 = 946_684_800;

pub const DROPS_PER_XRP: u64 = 1_000_000;
/// 100 billion XRP
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;
