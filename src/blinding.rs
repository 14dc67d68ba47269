//! Blinding of private-key operations against timing attacks, after Paul
//! Kocher, "Timing Attacks on Implementations of Diffie-Hellman, RSA, DSS,
//! and Other Systems".

use num_bigint::{BigUint, IntoBigUint, ModInverse, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand_core::OsRng;
use zeroize::Zeroize;

use crate::key::{PublicKeyParts, RsaPrivateKey};

/// Per-key blinding pair. `vf` unblinds results, `vi` blinds inputs, and
/// the invariant `vi = (vf^-1)^e mod n` holds across refreshes.
#[derive(Debug)]
pub(crate) struct Blinding {
    vf: BigUint,
    vi: BigUint,
    n: BigUint,
    /// Set once the pair has blinded an input; the next use squares both
    /// values instead of deriving a fresh pair.
    dirty: bool,
}

impl Blinding {
    /// Set up blinding for a private key.
    ///
    /// `vf` is drawn odd in `[1, n - 1]` and coprime to lambda(n), which
    /// guarantees a modular inverse for every valid two-prime key; the draw
    /// is retried in the negligible case where `vf` shares a factor with n.
    pub(crate) fn new(key: &RsaPrivateKey) -> Blinding {
        let n = key.n().clone();
        let p_one = key.p() - BigUint::one();
        let q_one = key.q() - BigUint::one();
        let lambda = p_one.lcm(&q_one);

        let upper = &n - BigUint::one();
        let bits = upper.bits();
        let mut rng = OsRng;

        loop {
            let vf = rng.gen_biguint(bits);
            if !vf.is_odd() || vf > upper || !vf.gcd(&lambda).is_one() {
                continue;
            }
            let inverse = match vf.clone().mod_inverse(&n).and_then(IntoBigUint::into_biguint) {
                Some(inverse) => inverse,
                None => continue,
            };

            // vi = (vf^-1)^e mod n
            let vi = inverse.modpow(key.e(), &n);
            return Blinding {
                vf,
                vi,
                n,
                dirty: false,
            };
        }
    }

    /// Blind an input representative: `x * vi mod n`.
    ///
    /// A used pair is refreshed first by squaring both values, which
    /// commutes with inversion and exponentiation mod n and is cheaper than
    /// a fresh inverse.
    pub(crate) fn blind(&mut self, x: &BigUint) -> BigUint {
        if self.dirty {
            let two = BigUint::from(2u32);
            self.vf = self.vf.modpow(&two, &self.n);
            self.vi = self.vi.modpow(&two, &self.n);
            self.dirty = false;
        }

        let blinded = (x * &self.vi) % &self.n;
        self.dirty = true;
        blinded
    }

    /// Unblind an output representative: `y * vf mod n`.
    pub(crate) fn unblind(&self, y: &BigUint) -> BigUint {
        (y * &self.vf) % &self.n
    }
}

impl Zeroize for Blinding {
    fn zeroize(&mut self) {
        self.vf.zeroize();
        self.vi.zeroize();
    }
}

impl Drop for Blinding {
    fn drop(&mut self) {
        self.zeroize();
    }
}
