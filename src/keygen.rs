//! RSA key generation under two alternative reduction domains.
//!
//! The Carmichael factory derives exponents modulo `lambda(n) =
//! lcm(p-1, q-1)` as prescribed by RFC 8017; the Euler factory substitutes
//! the totient `phi(n) = (p-1)(q-1)` familiar from textbook RSA. Both
//! produce interchangeable keys at runtime.

use num_bigint::{BigUint, IntoBigUint, ModInverse, RandBigInt, RandPrime};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::errors::{Error, Result};
use crate::key::{KeyPair, PublicKeyParts, RsaPrivateKey, RsaPublicKey};

/// Minimum length in bits of the RSA modulus for generated keys.
const NLEN_MIN: usize = 1024;

/// Modulus lengths permitted under [`ExponentPolicy::RandomStrict`].
const STRICT_LENGTHS: [usize; 4] = [1024, 2048, 3072, 4096];

/// Public exponent selection policy.
///
/// | Policy | Exponent e |
/// |---|---|
/// | `Default` | Fixed `e = 65537` |
/// | `Random` | Random odd e with `2^16 < e < n - 1`, coprime to the reduction |
/// | `RandomStrict` | Random odd e with `2^16 < e < 2^256`, coprime to the reduction; modulus length restricted |
///
/// Every policy additionally regenerates the key until `d > 2^(nlen/2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentPolicy {
    Default,
    Random,
    RandomStrict,
}

/// Key factory selecting the modular-reduction domain for exponent
/// derivation. Stateless; the variants are value descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFactory {
    /// `lambda(n) = lcm(p-1, q-1)`, as specified in RFC 8017.
    Carmichael,
    /// `phi(n) = (p-1)(q-1)`. `RandomStrict` is not supported here.
    Euler,
}

impl KeyFactory {
    /// Generate a new key pair of `nlen` modulus bits.
    pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(
        self,
        rng: &mut R,
        nlen: usize,
        policy: ExponentPolicy,
    ) -> Result<KeyPair> {
        if nlen < NLEN_MIN {
            return Err(Error::InvalidArguments);
        }
        if policy == ExponentPolicy::RandomStrict {
            match self {
                KeyFactory::Carmichael if !STRICT_LENGTHS.contains(&nlen) => {
                    return Err(Error::InvalidArguments)
                }
                KeyFactory::Euler => return Err(Error::InvalidArguments),
                _ => {}
            }
        }

        let d_lower_bound = BigUint::one() << (nlen / 2);

        loop {
            let (p, q, n) = generate_modulus(rng, nlen);
            let reduction = self.reduction(&p, &q);

            let e = match policy {
                ExponentPolicy::Default => BigUint::from(65537u32),
                ExponentPolicy::Random => match self {
                    KeyFactory::Carmichael => select_random_exponent(rng, &n, &reduction),
                    KeyFactory::Euler => select_random_exponent_euler(rng, &reduction),
                },
                ExponentPolicy::RandomStrict => select_strict_exponent(rng, &reduction),
            };

            // The random policies guarantee gcd(e, reduction) = 1; for the
            // fixed exponent an uninvertible draw regenerates the primes.
            let d = match e.clone().mod_inverse(&reduction).and_then(IntoBigUint::into_biguint) {
                Some(d) => d,
                None => continue,
            };

            if d <= d_lower_bound {
                continue;
            }

            let private = RsaPrivateKey::from_components(d, e.clone(), n.clone(), p, q)?;
            let public = RsaPublicKey::new(n, e)?;
            return Ok(KeyPair::new(private, public));
        }
    }

    /// Derive the public key from a private key.
    ///
    /// The same private exponent d may yield different public exponents
    /// depending on the reduction domain, so the factory must match the one
    /// that produced the key.
    pub fn derive_public_key(self, key: &RsaPrivateKey) -> Result<RsaPublicKey> {
        let reduction = self.reduction(key.p(), key.q());
        let e = key
            .d()
            .clone()
            .mod_inverse(&reduction)
            .and_then(IntoBigUint::into_biguint)
            .ok_or(Error::InvalidKey)?;
        RsaPublicKey::new(key.n().clone(), e)
    }

    /// Create a private key from base components, completing the CRT set.
    pub fn create_private_key(
        self,
        d: BigUint,
        e: BigUint,
        n: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<RsaPrivateKey> {
        RsaPrivateKey::from_components(d, e, n, p, q)
    }

    fn reduction(self, p: &BigUint, q: &BigUint) -> BigUint {
        let p_one = p - BigUint::one();
        let q_one = q - BigUint::one();
        match self {
            KeyFactory::Carmichael => p_one.lcm(&q_one),
            KeyFactory::Euler => p_one * q_one,
        }
    }
}

/// Draw two probable primes of `nlen / 2` bits until their product has
/// exactly `nlen` bits.
fn generate_modulus<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    nlen: usize,
) -> (BigUint, BigUint, BigUint) {
    loop {
        let p = rng.gen_prime(nlen / 2);
        let q = rng.gen_prime(nlen / 2);
        if p == q {
            continue;
        }
        let n = &p * &q;
        if n.bits() == nlen {
            return (p, q, n);
        }
    }
}

/// Random odd e with `2^16 < e <= n - 1` and `gcd(e, reduction) = 1`.
fn select_random_exponent<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    n: &BigUint,
    reduction: &BigUint,
) -> BigUint {
    let lower = BigUint::from(65536u32);
    let upper = n - BigUint::one();
    let bits = upper.bits();
    loop {
        let e = rng.gen_biguint(bits);
        if e.is_odd() && e > lower && e <= upper && e.gcd(reduction).is_one() {
            return e;
        }
    }
}

/// Random e with `2^16 <= e < phi` and `gcd(e, phi) = 1`. The coprimality
/// requirement against the even totient forces e odd.
fn select_random_exponent_euler<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    phi: &BigUint,
) -> BigUint {
    let lower = BigUint::from(65536u32);
    let bits = phi.bits();
    loop {
        let e = rng.gen_biguint(bits);
        if e >= lower && &e < phi && e.gcd(phi).is_one() {
            return e;
        }
    }
}

/// Random odd e with `2^16 < e < 2^256` and `gcd(e, reduction) = 1`.
fn select_strict_exponent<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    reduction: &BigUint,
) -> BigUint {
    let lower = BigUint::from(65536u32);
    let upper = BigUint::one() << 256;
    loop {
        let e = rng.gen_biguint(257);
        if e.is_odd() && e > lower && e < upper && e.gcd(reduction).is_one() {
            return e;
        }
    }
}
