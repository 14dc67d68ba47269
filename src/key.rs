use std::sync::Mutex;

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_traits::{One, Zero};
use zeroize::Zeroize;

use crate::blinding::Blinding;
use crate::errors::{Error, Result};

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the octet length `k` of the modulus, the size of raw
    /// ciphertexts and signatures for this key.
    ///
    /// Computed as `bitlen(n) / 8` rounding down. For generated keys the
    /// modulus length is a multiple of 8 and this equals the usual
    /// `ceil(bitlen(n) / 8)`; for imported keys with a stray bit length the
    /// floor is kept for wire compatibility with the scheme this crate
    /// interoperates with.
    fn size(&self) -> usize {
        self.n().bits() / 8
    }
}

/// RSA public key `(n, e)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

impl RsaPublicKey {
    /// Create a public key from its components. Both must be non-zero and
    /// the modulus must be at least one octet long.
    pub fn new(n: BigUint, e: BigUint) -> Result<RsaPublicKey> {
        check_modulus(&n)?;
        if e.is_zero() {
            return Err(Error::InvalidKey);
        }
        Ok(RsaPublicKey { n, e })
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

/// Precomputed CRT components of a private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrtComponents {
    /// d mod (p - 1)
    dp: BigUint,
    /// d mod (q - 1)
    dq: BigUint,
    /// q^-1 mod p
    qinv: BigUint,
}

impl CrtComponents {
    pub fn dp(&self) -> &BigUint {
        &self.dp
    }

    pub fn dq(&self) -> &BigUint {
        &self.dq
    }

    pub fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl Zeroize for CrtComponents {
    fn zeroize(&mut self) {
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

/// RSA private key over a two-prime modulus.
///
/// The public exponent stays inside the private key: serialization emits it
/// and the blinding setup exponentiates with it.
#[derive(Debug)]
pub struct RsaPrivateKey {
    n: BigUint,
    e: BigUint,
    d: BigUint,
    p: BigUint,
    q: BigUint,
    crt: Option<CrtComponents>,
    /// Created on first private-key use, then squared on every use after;
    /// the lock spans whole blind/exponentiate/unblind sequences.
    blinding: Mutex<Option<Blinding>>,
}

impl RsaPrivateKey {
    /// Create a private key from its base components, completing the CRT
    /// set `dP = d mod (p-1)`, `dQ = d mod (q-1)`, `qInv = q^-1 mod p`.
    pub fn from_components(
        d: BigUint,
        e: BigUint,
        n: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        check_base_components(&d, &e, &n, &p, &q)?;

        let p_one = &p - BigUint::one();
        let q_one = &q - BigUint::one();
        let dp = &d % p_one;
        let dq = &d % q_one;
        let qinv = q
            .clone()
            .mod_inverse(&p)
            .and_then(IntoBigUint::into_biguint)
            .ok_or(Error::InvalidKey)?;

        Self::from_crt_components(d, e, n, p, q, dp, dq, qinv)
    }

    /// Create a private key from the full two-prime CRT component set.
    /// Every component must be non-zero.
    #[allow(clippy::too_many_arguments)]
    pub fn from_crt_components(
        d: BigUint,
        e: BigUint,
        n: BigUint,
        p: BigUint,
        q: BigUint,
        dp: BigUint,
        dq: BigUint,
        qinv: BigUint,
    ) -> Result<RsaPrivateKey> {
        check_base_components(&d, &e, &n, &p, &q)?;
        if dp.is_zero() || dq.is_zero() || qinv.is_zero() {
            return Err(Error::InvalidKey);
        }

        Ok(RsaPrivateKey {
            n,
            e,
            d,
            p,
            q,
            crt: Some(CrtComponents { dp, dq, qinv }),
            blinding: Mutex::new(None),
        })
    }

    /// Returns the private exponent of the key.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Returns the first prime factor of the modulus.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the second prime factor of the modulus.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the CRT components, when present.
    pub fn crt(&self) -> Option<&CrtComponents> {
        self.crt.as_ref()
    }

    /// Get the public key embedded in this private key, cloning `n` and
    /// `e`.
    ///
    /// Note this uses the stored exponent; deriving the public key from `d`
    /// under a specific reduction domain is the key factory's job.
    pub fn to_public_key(&self) -> RsaPublicKey {
        // n and e were validated at construction.
        RsaPublicKey::new(self.n.clone(), self.e.clone()).expect("validated components")
    }

    /// Performs basic sanity checks on the key:
    /// `p * q == n` and `d * e == 1 mod (p-1)` as well as `mod (q-1)`.
    pub fn validate(&self) -> Result<()> {
        if &self.p * &self.q != self.n {
            return Err(Error::InvalidKey);
        }

        let de = &self.d * &self.e;
        for prime in [&self.p, &self.q] {
            let congruence = &de % (prime - BigUint::one());
            if !congruence.is_one() {
                return Err(Error::InvalidKey);
            }
        }

        Ok(())
    }

    /// Run a private-key operation on a blinded representative.
    ///
    /// The blinding state is created lazily and the lock is held across the
    /// whole blind/operate/unblind sequence so that concurrent users of a
    /// shared key each consume one refresh cycle.
    pub(crate) fn blinded_op<F>(&self, x: &BigUint, op: F) -> Result<BigUint>
    where
        F: FnOnce(&BigUint) -> Result<BigUint>,
    {
        let mut guard = self.blinding.lock().expect("blinding state poisoned");
        let blinding = guard.get_or_insert_with(|| Blinding::new(self));

        let blinded = blinding.blind(x);
        let result = op(&blinded)?;
        Ok(blinding.unblind(&result))
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl Clone for RsaPrivateKey {
    fn clone(&self) -> RsaPrivateKey {
        RsaPrivateKey {
            n: self.n.clone(),
            e: self.e.clone(),
            d: self.d.clone(),
            p: self.p.clone(),
            q: self.q.clone(),
            crt: self.crt.clone(),
            blinding: Mutex::new(None),
        }
    }
}

impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.n == other.n
            && self.e == other.e
            && self.d == other.d
            && self.p == other.p
            && self.q == other.q
    }
}

impl Eq for RsaPrivateKey {}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        if let Some(crt) = self.crt.as_mut() {
            crt.zeroize();
        }
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> RsaPublicKey {
        private_key.to_public_key()
    }
}

/// RSA key pair.
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl KeyPair {
    pub fn new(private: RsaPrivateKey, public: RsaPublicKey) -> KeyPair {
        KeyPair { private, public }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Split the pair into its parts.
    pub fn into_parts(self) -> (RsaPrivateKey, RsaPublicKey) {
        (self.private, self.public)
    }
}

fn check_modulus(n: &BigUint) -> Result<()> {
    if n.is_zero() || n.bits() / 8 == 0 {
        return Err(Error::InvalidKey);
    }
    Ok(())
}

fn check_base_components(
    d: &BigUint,
    e: &BigUint,
    n: &BigUint,
    p: &BigUint,
    q: &BigUint,
) -> Result<()> {
    check_modulus(n)?;
    if d.is_zero() || e.is_zero() || p.is_zero() || q.is_zero() {
        return Err(Error::InvalidKey);
    }
    Ok(())
}
