//! RSASSA-PSS signing and verification ([RFC 8017 § 8.1](https://datatracker.ietf.org/doc/html/rfc8017#section-8.1)).

use rand_core::CryptoRngCore;

use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::algorithms::rsa::{rsasp1, rsavp1};
use crate::convert::{i2osp, os2ip};
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::key::{PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// Signature scheme parameters.
///
/// PSS is the only scheme carried today; the sum type leaves room for
/// further schemes without changing the façade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SignatureParams {
    /// Probabilistic Signature Scheme.
    Pss {
        /// Hash for the message and the `M'` block.
        pss_hash: HashAlgorithm,
        /// Hash driving MGF1.
        mgf_hash: HashAlgorithm,
        /// Salt length in octets.
        salt_len: usize,
    },
}

/// RSA signing and verification façade.
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    params: SignatureParams,
}

impl Signature {
    pub fn new(params: SignatureParams) -> Signature {
        Signature { params }
    }

    /// Sign `msg` with the private key, producing a `k`-octet signature.
    ///
    /// The message representative is blinded before and unblinded after the
    /// CRT exponentiation.
    pub fn sign<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        priv_key: &RsaPrivateKey,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let SignatureParams::Pss {
            pss_hash,
            mgf_hash,
            salt_len,
        } = self.params;

        let m_hash = pss_hash.digest(msg);
        let em_bits = priv_key.n().bits() - 1;
        let em = emsa_pss_encode(rng, &m_hash, em_bits, salt_len, pss_hash, mgf_hash)?;

        let m = os2ip(&em);
        let s = priv_key.blinded_op(&m, |blinded| rsasp1(priv_key, blinded))?;
        i2osp(&s, priv_key.size())
    }

    /// Verify a `k`-octet signature over `msg`.
    ///
    /// Returns `Ok(false)` for well-formed but inconsistent signatures;
    /// inputs that cannot be processed at all (representative out of range,
    /// encoded message too large) fail with
    /// [`Error::InvalidSignature`](crate::Error::InvalidSignature).
    pub fn verify(&self, pub_key: &RsaPublicKey, msg: &[u8], sig: &[u8]) -> Result<bool> {
        let SignatureParams::Pss {
            pss_hash,
            mgf_hash,
            salt_len,
        } = self.params;

        if sig.len() != pub_key.size() {
            return Ok(false);
        }

        let s = os2ip(sig);
        let m = rsavp1(pub_key, &s)?;

        let em_bits = pub_key.n().bits() - 1;
        let em_len = (em_bits + 7) / 8;
        let mut em = i2osp(&m, em_len).map_err(|_| Error::InvalidSignature)?;

        let m_hash = pss_hash.digest(msg);
        Ok(emsa_pss_verify(
            &m_hash, &mut em, em_bits, salt_len, pss_hash, mgf_hash,
        ))
    }
}
