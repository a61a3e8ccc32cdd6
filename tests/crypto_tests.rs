//! Integration tests for the PassKeeper crypto module.

use passkeeper::crypto::{decrypt, derive_key, encrypt, VaultKey, IV_LEN, TAG_LEN};
use passkeeper::errors::PassKeeperError;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = derive_key("correct horse battery staple").expect("derive");
    let plaintext = b"0\x05\x31\x03\x80\x01a".to_vec();

    let blob = encrypt(&key, plaintext.clone()).expect("encrypt should succeed");

    // Ciphertext is as long as the plaintext, then IV and tag.
    assert_eq!(blob.len(), plaintext.len() + IV_LEN + TAG_LEN);

    let recovered = decrypt(&key, blob).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = VaultKey::new([0xCD; 32]);
    let plaintext = b"same input".to_vec();

    let ct1 = encrypt(&key, plaintext.clone()).expect("encrypt 1");
    let ct2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Each call draws a fresh IV.
    assert_ne!(ct1, ct2, "two encryptions of the same plaintext must differ");
}

#[test]
fn decrypt_with_wrong_passphrase_fails() {
    let key = derive_key("right").unwrap();
    let wrong = derive_key("wrong").unwrap();

    let blob = encrypt(&key, b"secret".to_vec()).unwrap();
    assert!(matches!(
        decrypt(&wrong, blob),
        Err(PassKeeperError::DecryptionFailure)
    ));
}

#[test]
fn decrypt_with_truncated_data_fails() {
    let key = VaultKey::new([0xAA; 32]);
    for len in [0, 5, IV_LEN + TAG_LEN] {
        assert!(matches!(
            decrypt(&key, vec![0u8; len]),
            Err(PassKeeperError::DecryptionFailure)
        ));
    }
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn key_derivation_is_deterministic() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, derive_key("Passphrase").unwrap());
}

#[test]
fn empty_passphrase_still_derives_a_key() {
    let key = derive_key("").unwrap();
    assert_ne!(key.as_bytes(), &[0u8; 32]);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_plaintext_round_trips(plaintext in prop::collection::vec(any::<u8>(), 1..512), seed in any::<[u8; 32]>()) {
        let key = VaultKey::new(seed);
        let blob = encrypt(&key, plaintext.clone()).unwrap();
        prop_assert_eq!(decrypt(&key, blob).unwrap(), plaintext);
    }

    #[test]
    fn any_single_bit_flip_is_detected(
        plaintext in prop::collection::vec(any::<u8>(), 1..128),
        bit in any::<prop::sample::Index>(),
    ) {
        let key = VaultKey::new([0x42; 32]);
        let mut blob = encrypt(&key, plaintext).unwrap();
        let bit = bit.index(blob.len() * 8);
        blob[bit / 8] ^= 1 << (bit % 8);

        prop_assert!(matches!(
            decrypt(&key, blob),
            Err(PassKeeperError::DecryptionFailure)
        ));
    }
}
