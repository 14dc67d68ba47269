//! RSAES-OAEP encryption and decryption ([RFC 8017 § 7.1](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1)).

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::oaep::{oaep_decode, oaep_encode};
use crate::algorithms::rsa::{rsadp, rsaep};
use crate::convert::{i2osp, os2ip};
use crate::errors::Result;
use crate::hash::HashAlgorithm;
use crate::key::{PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// OAEP-padded RSA encryption.
///
/// - `label_hash` hashes the optional label L, which is always the empty
///   string here; the maximum plaintext length is `k - 2 * hLen - 2` octets
///   for a `k`-octet modulus.
/// - `mgf_hash` drives MGF1 and defaults to SHA-1.
///
/// The two hash functions can, but don't need to be the same.
#[derive(Debug, Clone, Copy)]
pub struct Crypt {
    label_hash: HashAlgorithm,
    mgf_hash: HashAlgorithm,
}

impl Crypt {
    /// OAEP with the given label hash and the default MGF1-SHA1 mask
    /// generation function.
    pub fn new(label_hash: HashAlgorithm) -> Crypt {
        Crypt::with_mgf_hash(label_hash, HashAlgorithm::Sha1)
    }

    /// OAEP with explicit label and MGF1 hash functions.
    pub fn with_mgf_hash(label_hash: HashAlgorithm, mgf_hash: HashAlgorithm) -> Crypt {
        Crypt {
            label_hash,
            mgf_hash,
        }
    }

    /// Encrypt `msg` with the public key, producing a `k`-octet ciphertext.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        pub_key: &RsaPublicKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let k = pub_key.size();

        let em = oaep_encode(rng, msg, self.label_hash, self.mgf_hash, k)?;
        let m = os2ip(&em);
        let c = rsaep(pub_key, &m)?;
        i2osp(&c, k)
    }

    /// Decrypt a `k`-octet ciphertext with the private key.
    ///
    /// The ciphertext representative is blinded before and unblinded after
    /// the CRT exponentiation; failures surface as a uniform
    /// [`Error::Decryption`](crate::Error::Decryption).
    pub fn decrypt(&self, priv_key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let k = priv_key.size();

        let c = os2ip(ciphertext);
        let m = priv_key.blinded_op(&c, |blinded| rsadp(priv_key, blinded))?;
        let mut em = Zeroizing::new(i2osp(&m, k)?);
        oaep_decode(&mut em, self.label_hash, self.mgf_hash, k)
    }
}
