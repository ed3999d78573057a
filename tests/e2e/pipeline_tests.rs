//! End-to-end tests for the secret key -> envelope -> secret key flow.
//!
//! Exercises the codec and the envelope together the way the `kedqr`
//! binary composes them:
//!
//! 1. bech32 text -> raw key bytes
//! 2. raw key bytes -> sealed envelope
//! 3. sealed envelope -> raw key bytes -> identical bech32 text
//!
//! Run with: cargo test -p kedqr-e2e --test pipeline_tests

use kedqr_bech32::{convert_and_encode, convert_bits, decode, decode_and_convert, encode};
use kedqr_core::envelope::{open, seal, MIN_ENVELOPE_LEN};

/// `jcli key to-bytes` sample for an ed25519 extended secret key
const SAMPLE_SK: &str = "ed25519e_sk14rwkgpmmg5s29e4k8m4mny324lj4rv8x9tqg0tn5khlfqzgjt9ftj90u642j2skwraddf2qd88eqv8wv3a463mshgmz9dxtvthjswgqvcdwty";
const SAMPLE_SK_HEX: &str = "a8dd64077b4520a2e6b63eebb9922aafe551b0e62ac087ae74b5fe9009125952b915fcd5552542ce1f5ad4a80d39f2061dcc8f6ba8ee1746c456996c5de50720";
const KEY_HRP: &str = "ed25519e_sk";

const PIN: [u8; 4] = [1, 2, 3, 4];

#[test]
fn test_sample_key_full_pipeline() {
    let (hrp, key) = decode_and_convert(SAMPLE_SK).unwrap();
    assert_eq!(hrp, KEY_HRP);
    assert_eq!(hex::encode(&key), SAMPLE_SK_HEX);

    let blob = seal(&PIN, &key).unwrap();
    assert_eq!(blob.len(), MIN_ENVELOPE_LEN + 64);

    // QR codes carry the hex text
    let qr_text = hex::encode(&blob);
    let scanned = hex::decode(&qr_text).unwrap();

    let recovered = open(&PIN, &scanned).unwrap();
    assert_eq!(convert_and_encode(KEY_HRP, &recovered).unwrap(), SAMPLE_SK);
}

#[test]
fn test_uppercase_key_roundtrips_to_lowercase() {
    let upper = SAMPLE_SK.to_ascii_uppercase();
    let (hrp, key) = decode_and_convert(&upper).unwrap();
    assert_eq!(hrp, KEY_HRP);

    let recovered = open(&PIN, &seal(&PIN, &key).unwrap()).unwrap();
    assert_eq!(convert_and_encode(&hrp, &recovered).unwrap(), SAMPLE_SK);
}

#[test]
fn test_groups_roundtrip_through_encode_decode() {
    for len in [0usize, 1, 5, 32, 64, 100] {
        let bytes: Vec<u8> = (0..len).map(|i| (i * 131 + 7) as u8).collect();
        let groups = convert_bits(&bytes, 8, 5, true).unwrap();

        let (hrp, decoded) = decode(&encode("kedqr", &groups).unwrap()).unwrap();
        assert_eq!(hrp, "kedqr");
        assert_eq!(decoded, groups);
    }
}

#[test]
fn test_random_payloads_full_pipeline() {
    use rand::{Rng, RngCore};

    let mut rng = rand::thread_rng();
    for _ in 0..4 {
        let len = rng.gen_range(0..128);
        let mut key = vec![0u8; len];
        rng.fill_bytes(&mut key);
        let pin: Vec<u8> = (0..4).map(|_| rng.gen_range(0..10)).collect();

        let text = convert_and_encode(KEY_HRP, &key).unwrap();
        let (_, decoded) = decode_and_convert(&text).unwrap();
        let recovered = open(&pin, &seal(&pin, &decoded).unwrap()).unwrap();

        assert_eq!(recovered.as_slice(), key.as_slice());
    }
}

#[test]
fn test_concurrent_seal_open() {
    let (_, key) = decode_and_convert(SAMPLE_SK).unwrap();

    let blobs: Vec<Vec<u8>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let key = &key;
                s.spawn(move || {
                    let pin = [i, i, i, i];
                    let blob = seal(&pin, key).unwrap();
                    assert_eq!(open(&pin, &blob).unwrap().as_slice(), key.as_slice());
                    blob
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, a) in blobs.iter().enumerate() {
        for b in &blobs[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
