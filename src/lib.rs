//! RSA cryptography per PKCS #1 v2.2 ([RFC 8017](https://datatracker.ietf.org/doc/html/rfc8017)):
//! OAEP encryption, PSS signatures, two-prime CRT key generation under the
//! Carmichael or Euler reduction domain, and DER serialization of PKCS #1 /
//! PKCS #8 key schemas.
//!
//! Private-key operations are blinded against timing attacks and padding
//! checks avoid data-dependent early exits; stronger guarantees (constant
//! time big-integer arithmetic) depend on the underlying bignum library and
//! are not provided.
//!
//! # OAEP encryption
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsakit::{Crypt, ExponentPolicy, HashAlgorithm, KeyFactory};
//!
//! # fn main() -> rsakit::Result<()> {
//! let mut rng = ChaCha8Rng::from_seed([42; 32]); // use a secure seed source
//! let pair = KeyFactory::Carmichael.generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)?;
//!
//! let crypt = Crypt::new(HashAlgorithm::Sha256);
//! let ciphertext = crypt.encrypt(&mut rng, pair.public_key(), b"hello world")?;
//! let plaintext = crypt.decrypt(pair.private_key(), &ciphertext)?;
//! assert_eq!(plaintext, b"hello world");
//! # Ok(())
//! # }
//! ```
//!
//! # PSS signatures
//!
//! ```
//! use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
//! use rsakit::{ExponentPolicy, HashAlgorithm, KeyFactory, Signature, SignatureParams};
//!
//! # fn main() -> rsakit::Result<()> {
//! let mut rng = ChaCha8Rng::from_seed([42; 32]); // use a secure seed source
//! let pair = KeyFactory::Carmichael.generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)?;
//!
//! let signature = Signature::new(SignatureParams::Pss {
//!     pss_hash: HashAlgorithm::Sha256,
//!     mgf_hash: HashAlgorithm::Sha256,
//!     salt_len: 32,
//! });
//! let sig = signature.sign(&mut rng, pair.private_key(), b"hello world")?;
//! assert!(signature.verify(pair.public_key(), b"hello world", &sig)?);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod der;
pub mod errors;

mod algorithms;
mod blinding;
mod crypt;
mod encoding;
mod hash;
mod key;
mod keygen;
mod signature;

pub use crate::algorithms::mgf::generate_mask;
pub use crate::crypt::Crypt;
pub use crate::encoding::{PrivateKeyEncodingScheme, PublicKeyEncodingScheme};
pub use crate::errors::{Error, Result};
pub use crate::hash::HashAlgorithm;
pub use crate::key::{CrtComponents, KeyPair, PublicKeyParts, RsaPrivateKey, RsaPublicKey};
pub use crate::keygen::{ExponentPolicy, KeyFactory};
pub use crate::signature::{Signature, SignatureParams};
