//! Digest helpers used by addresses, checksums and signing

use ring::digest::{digest, SHA256, SHA512};
use ripemd::{Digest, Ripemd160};

use crate::constant::CHECKSUM_LENGTH;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(digest(&SHA256, data).as_ref());
    out
}

pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(digest(&SHA512, data).as_ref());
    out
}

/// First 32 bytes of SHA-512, the protocol's general 256-bit hash
pub fn sha512_half(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest(&SHA512, data).as_ref()[..32]);
    out
}

/// SHA512-half over several slices without concatenating them first
pub fn sha512_half_parts(parts: &[&[u8]]) -> [u8; 32] {
    let mut ctx = ring::digest::Context::new(&SHA512);
    for part in parts {
        ctx.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&ctx.finish().as_ref()[..32]);
    out
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Base58Check checksum: first four bytes of SHA256(SHA256(payload))
pub fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&sha256(&sha256(bytes))[..CHECKSUM_LENGTH]);
    out
}
