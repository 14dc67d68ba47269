//! Hash functions recommended in RFC 8017 for OAEP and PSS encoding.

use digest::{Digest, DynDigest};
use hex_literal::hex;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

/// Digest of the empty string per algorithm. OAEP hashes an optional label
/// which is always empty in RFC 8017, so the label hash is a constant.
const SHA1_EMPTY: [u8; 20] = hex!("da39a3ee5e6b4b0d3255bfef95601890afd80709");
const SHA256_EMPTY: [u8; 32] =
    hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
const SHA384_EMPTY: [u8; 48] =
    hex!("38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b");
const SHA512_EMPTY: [u8; 64] = hex!(
    "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce"
    "47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
);
const SHA512_224_EMPTY: [u8; 28] =
    hex!("6ed0dd02806fa89e25de060c19d3ac86cabb87d6a0ddd05c333b84f4");
const SHA512_256_EMPTY: [u8; 32] =
    hex!("c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a");

/// Supported hash algorithms, named after the FIPS 180-4 scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl HashAlgorithm {
    /// Length in octets of a digest produced by this algorithm (`hLen`).
    pub fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
            HashAlgorithm::Sha512_224 => 28,
            HashAlgorithm::Sha512_256 => 32,
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
            HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
            HashAlgorithm::Sha512_224 => Sha512_224::digest(data).to_vec(),
            HashAlgorithm::Sha512_256 => Sha512_256::digest(data).to_vec(),
        }
    }

    /// Fresh incremental hasher for streaming uses (MGF1 counters, PSS M').
    pub(crate) fn new_digest(self) -> Box<dyn DynDigest> {
        match self {
            HashAlgorithm::Sha1 => Box::new(Sha1::new()),
            HashAlgorithm::Sha256 => Box::new(Sha256::new()),
            HashAlgorithm::Sha384 => Box::new(Sha384::new()),
            HashAlgorithm::Sha512 => Box::new(Sha512::new()),
            HashAlgorithm::Sha512_224 => Box::new(Sha512_224::new()),
            HashAlgorithm::Sha512_256 => Box::new(Sha512_256::new()),
        }
    }

    /// Digest of the empty label L.
    pub fn empty_label_hash(self) -> &'static [u8] {
        match self {
            HashAlgorithm::Sha1 => &SHA1_EMPTY,
            HashAlgorithm::Sha256 => &SHA256_EMPTY,
            HashAlgorithm::Sha384 => &SHA384_EMPTY,
            HashAlgorithm::Sha512 => &SHA512_EMPTY,
            HashAlgorithm::Sha512_224 => &SHA512_224_EMPTY,
            HashAlgorithm::Sha512_256 => &SHA512_256_EMPTY,
        }
    }
}
