//! Ed25519 signing, SHA3-256/RIPEMD-160 address derivation, and the
//! zeroized key-material types the session wraps around them.
//!
//! BIP32 path *derivation itself* is modeled as a [`SigningBackend`] trait
//! rather than a single concrete implementation: on real hardware the
//! derivation is a secure-element syscall this crate never sees, so the
//! boundary here mirrors the one the teacher draws around its own hardware
//! signer — a transport-shaped trait, not a reimplementation of the device's
//! internals. [`Slip10Ed25519`] is a software reference implementation of
//! that trait, useful in tests and on platforms with no secure element of
//! their own.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![no_std]

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::Sha512;
use sha3::{Digest, Sha3_256};
use thiserror_no_std::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length in bytes of a SHA3-256 digest.
pub const HASH256_LEN: usize = 32;
/// Length in bytes of an Ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;
/// Length in bytes of an Ed25519 signature.
pub const SIGNATURE_LEN: usize = 64;
/// Length in bytes of a Symbol account address: 1 network byte + 20-byte
/// ripemd160 hash + 3-byte checksum.
pub const ADDRESS_LEN: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("bip32 path is empty")]
    EmptyPath,
    #[error("bip32 path is longer than this backend supports")]
    PathTooLong,
    #[error("signing key material was invalid")]
    InvalidKey,
}

/// A 32-byte Ed25519 seed, zeroized on drop. Never implements `Debug` or
/// `Clone` — the raw bytes never leave this type, only [`PublicKey`] and
/// [`Signature`] values derived from them.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyMaterial([u8; 32]);

impl PrivateKeyMaterial {
    pub const fn from_seed(seed: [u8; 32]) -> Self {
        PrivateKeyMaterial(seed)
    }

    fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.0)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key().verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key().sign(message).to_bytes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LEN]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl PublicKey {
    /// Verify a signature produced by the matching private key. Exposed so
    /// callers can self-check a signing round trip before releasing a
    /// signed payload; the device itself never needs to verify its own
    /// signatures in normal operation.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let key = VerifyingKey::from_bytes(&self.0).map_err(|_| CryptoError::InvalidKey)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        key.verify_strict(message, &sig).map_err(|_| CryptoError::InvalidKey)
    }
}

/// Derives a Symbol account address from a public key: `network_byte ||
/// ripemd160(sha3_256(pubkey)) || checksum`, where `checksum` is the
/// leading 3 bytes of `sha3_256(network_byte || ripemd160(...))`.
pub fn address_from_public_key(public_key: &PublicKey, network_byte: u8) -> [u8; ADDRESS_LEN] {
    let pubkey_hash = Sha3_256::digest(public_key.0);
    let ripemd = Ripemd160::digest(pubkey_hash);

    let mut versioned = [0u8; 21];
    versioned[0] = network_byte;
    versioned[1..].copy_from_slice(&ripemd);

    let checksum = Sha3_256::digest(versioned);

    let mut address = [0u8; ADDRESS_LEN];
    address[..21].copy_from_slice(&versioned);
    address[21..].copy_from_slice(&checksum[..3]);
    address
}

/// A backend that turns a BIP32 derivation path into signing key material
/// and uses it to sign. Derivation and signing are kept on one trait
/// because on hardware both steps happen inside the same secure-element
/// call; a software backend is free to split them internally.
pub trait SigningBackend {
    fn derive(&self, path: &[u32]) -> Result<PrivateKeyMaterial, CryptoError>;
}

const HARDENED: u32 = 1 << 31;
const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// SLIP-0010 Ed25519 derivation over a path of hardened-only components
/// (Ed25519 has no defined non-hardened derivation, so every index is
/// forced hardened regardless of whether the caller already set the bit).
pub struct Slip10Ed25519 {
    master_seed: PrivateSeed,
}

/// The BIP32 master seed the device is personalized with, zeroized on
/// drop like any other key material it derives from.
struct PrivateSeed(heapless::Vec<u8, 64>);

impl Drop for PrivateSeed {
    fn drop(&mut self) {
        for byte in self.0.iter_mut() {
            *byte = 0;
        }
    }
}

impl Slip10Ed25519 {
    pub fn new(master_seed: &[u8]) -> Self {
        let mut buf = heapless::Vec::new();
        let _ = buf.extend_from_slice(master_seed);
        Slip10Ed25519 { master_seed: PrivateSeed(buf) }
    }
}

impl SigningBackend for Slip10Ed25519 {
    fn derive(&self, path: &[u32]) -> Result<PrivateKeyMaterial, CryptoError> {
        if path.is_empty() {
            return Err(CryptoError::EmptyPath);
        }

        let mut mac = Hmac::<Sha512>::new_from_slice(ED25519_SEED_KEY).map_err(|_| CryptoError::InvalidKey)?;
        mac.update(&self.master_seed.0);
        let i = mac.finalize().into_bytes();
        let (mut key, mut chain_code) = split_i(&i);

        for &raw_index in path {
            let index = raw_index | HARDENED;
            let mut mac = Hmac::<Sha512>::new_from_slice(&chain_code).map_err(|_| CryptoError::InvalidKey)?;
            mac.update(&[0u8]);
            mac.update(&key);
            mac.update(&index.to_be_bytes());
            let i = mac.finalize().into_bytes();
            let (next_key, next_chain_code) = split_i(&i);
            key = next_key;
            chain_code = next_chain_code;
        }

        chain_code.zeroize();
        Ok(PrivateKeyMaterial::from_seed(key))
    }
}

fn split_i(i: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    (left, right)
}

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_then_sign_then_verify_round_trips() {
        let backend = Slip10Ed25519::new(b"correct horse battery staple, and then some more entropy");
        let key = backend.derive(&[44, 4343, 0]).unwrap();
        let public = key.public_key();
        let signature = key.sign(b"aggregate hash to sign");
        assert!(public.verify(b"aggregate hash to sign", &signature).is_ok());
    }

    #[test]
    fn different_paths_derive_different_keys() {
        let backend = Slip10Ed25519::new(b"correct horse battery staple, and then some more entropy");
        let a = backend.derive(&[44, 4343, 0]).unwrap();
        let b = backend.derive(&[44, 4343, 1]).unwrap();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn empty_path_is_rejected() {
        let backend = Slip10Ed25519::new(b"seed");
        assert_eq!(backend.derive(&[]).unwrap_err(), CryptoError::EmptyPath);
    }

    #[test]
    fn address_from_public_key_is_24_bytes_with_the_network_byte_leading() {
        let key = Slip10Ed25519::new(b"seed material long enough for hmac").derive(&[44, 4343, 0]).unwrap();
        let address = address_from_public_key(&key.public_key(), 0x98);
        assert_eq!(address.len(), ADDRESS_LEN);
        assert_eq!(address[0], 0x98);
    }
}
