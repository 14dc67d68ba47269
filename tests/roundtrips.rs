//! End-to-end encrypt/decrypt and sign/verify round trips.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use rsakit::{
    Crypt, ExponentPolicy, HashAlgorithm, KeyFactory, PublicKeyParts, Signature, SignatureParams,
};

fn pss(pss_hash: HashAlgorithm, mgf_hash: HashAlgorithm, salt_len: usize) -> Signature {
    Signature::new(SignatureParams::Pss {
        pss_hash,
        mgf_hash,
        salt_len,
    })
}

#[test]
fn carmichael_2048_oaep_sha256_round_trip() {
    let mut rng = ChaCha8Rng::from_seed([1; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 2048, ExponentPolicy::Default)
        .expect("failed to generate key");
    assert_eq!(pair.public_key().n().bits(), 2048);

    let crypt = Crypt::new(HashAlgorithm::Sha256);
    let ciphertext = crypt
        .encrypt(&mut rng, pair.public_key(), b"hello world")
        .unwrap();
    assert_eq!(ciphertext.len(), 256);

    let plaintext = crypt.decrypt(pair.private_key(), &ciphertext).unwrap();
    assert_eq!(plaintext, b"hello world");
}

#[test]
fn euler_2048_random_exponent_round_trip() {
    let mut rng = ChaCha8Rng::from_seed([2; 32]);
    let pair = KeyFactory::Euler
        .generate_key_pair(&mut rng, 2048, ExponentPolicy::Random)
        .expect("failed to generate key");

    let crypt = Crypt::new(HashAlgorithm::Sha256);
    let ciphertext = crypt
        .encrypt(&mut rng, pair.public_key(), b"hello world")
        .unwrap();
    let plaintext = crypt.decrypt(pair.private_key(), &ciphertext).unwrap();
    assert_eq!(plaintext, b"hello world");
}

#[test]
fn pss_sha1_signature_has_modulus_length() {
    let mut rng = ChaCha8Rng::from_seed([3; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 2048, ExponentPolicy::Default)
        .expect("failed to generate key");

    let signature = pss(HashAlgorithm::Sha1, HashAlgorithm::Sha1, 20);
    let sig = signature
        .sign(&mut rng, pair.private_key(), b"hello world")
        .unwrap();
    assert_eq!(sig.len(), 256);
    assert!(signature
        .verify(pair.public_key(), b"hello world", &sig)
        .unwrap());
}

#[test]
fn oaep_round_trip_over_label_hashes() {
    let mut rng = ChaCha8Rng::from_seed([4; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)
        .expect("failed to generate key");

    // SHA-512 needs 2 * 64 + 2 octets of overhead and cannot fit a 128
    // octet modulus; it is exercised through the MessageTooLong path in the
    // unit tests instead.
    let hashes = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512_224,
        HashAlgorithm::Sha512_256,
    ];
    for label_hash in hashes {
        let crypt = Crypt::new(label_hash);
        let ciphertext = crypt
            .encrypt(&mut rng, pair.public_key(), b"per-hash payload")
            .unwrap();
        let plaintext = crypt.decrypt(pair.private_key(), &ciphertext).unwrap();
        assert_eq!(plaintext, b"per-hash payload", "{:?}", label_hash);
    }
}

#[test]
fn oaep_mgf_hash_may_differ_from_label_hash() {
    let mut rng = ChaCha8Rng::from_seed([5; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)
        .expect("failed to generate key");

    let crypt = Crypt::with_mgf_hash(HashAlgorithm::Sha256, HashAlgorithm::Sha256);
    let ciphertext = crypt
        .encrypt(&mut rng, pair.public_key(), b"mgf-sha256")
        .unwrap();
    assert_eq!(
        crypt.decrypt(pair.private_key(), &ciphertext).unwrap(),
        b"mgf-sha256"
    );
}

#[test]
fn repeated_decryption_is_stable() {
    let mut rng = ChaCha8Rng::from_seed([6; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)
        .expect("failed to generate key");

    let crypt = Crypt::new(HashAlgorithm::Sha256);
    let ciphertext = crypt
        .encrypt(&mut rng, pair.public_key(), b"blinded ten times")
        .unwrap();

    // Each decryption refreshes the blinding pair; the plaintext must not
    // drift.
    for _ in 0..10 {
        let plaintext = crypt.decrypt(pair.private_key(), &ciphertext).unwrap();
        assert_eq!(plaintext, b"blinded ten times");
    }
}

#[test]
fn strict_random_exponent_bounds() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 1024, ExponentPolicy::RandomStrict)
        .expect("failed to generate key");
    let private = pair.private_key();

    assert_eq!(private.n().bits(), 1024);
    assert!(private.e().is_odd());
    assert!(private.e() > &(BigUint::one() << 16));
    assert!(private.e() < &(BigUint::one() << 256));
    assert!(private.d() > &(BigUint::one() << 512));

    let lambda = (private.p() - BigUint::one()).lcm(&(private.q() - BigUint::one()));
    assert!(private.e().gcd(&lambda).is_one());

    // The generated exponents still drive a working pipeline.
    let signature = pss(HashAlgorithm::Sha256, HashAlgorithm::Sha256, 32);
    let sig = signature.sign(&mut rng, private, b"strict").unwrap();
    assert!(signature.verify(pair.public_key(), b"strict", &sig).unwrap());
}

#[test]
fn signing_key_can_be_shared_between_threads() {
    let mut rng = ChaCha8Rng::from_seed([8; 32]);
    let pair = KeyFactory::Carmichael
        .generate_key_pair(&mut rng, 1024, ExponentPolicy::Default)
        .expect("failed to generate key");
    let (private, public) = pair.into_parts();

    let private = std::sync::Arc::new(private);
    let signature = pss(HashAlgorithm::Sha256, HashAlgorithm::Sha256, 32);

    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let private = private.clone();
            std::thread::spawn(move || {
                let mut rng = ChaCha8Rng::from_seed([100 + i; 32]);
                signature.sign(&mut rng, &private, b"shared key").unwrap()
            })
        })
        .collect();

    for handle in handles {
        let sig = handle.join().unwrap();
        assert!(signature.verify(&public, b"shared key", &sig).unwrap());
    }
}
