//! Secret key <-> sealed envelope flows
//!
//! `ed25519e_sk1...` text -> bech32 decode -> seal under PIN -> envelope bytes,
//! and the reverse for recovery and self-checks.

use anyhow::{Context, Result};
use kedqr_bech32::{convert_and_encode, decode_and_convert};
use kedqr_core::envelope;
use std::path::Path;
use zeroize::Zeroizing;

use crate::config::KeySection;
use crate::pin::Pin;

/// Read a bech32 secret key from a file, trimming surrounding whitespace
pub fn read_secret_key(path: &Path) -> Result<Zeroizing<String>> {
    let contents = Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("Error reading file {}", path.display()))?,
    );
    Ok(Zeroizing::new(contents.trim().to_string()))
}

/// Decode a bech32 secret key, check it against `key` and seal it under `pin`
pub fn seal_secret_key(key: &KeySection, secret_key: &str, pin: &Pin) -> Result<Vec<u8>> {
    let (hrp, data) = decode_and_convert(secret_key).context("bech32 decode failed")?;
    let data = Zeroizing::new(data);

    anyhow::ensure!(hrp == key.hrp, "HRP: expected {}, got {}", key.hrp, hrp);
    anyhow::ensure!(
        data.len() == key.length,
        "KEY: expected length {}, got {}",
        key.length,
        data.len()
    );
    log::info!("decoded {} secret key ({} bytes)", hrp, data.len());

    envelope::seal(pin.as_bytes(), &data).context("Encryption failed")
}

/// Open an envelope with `pin` and re-encode the secret key as bech32
pub fn recover_secret_key(
    key: &KeySection,
    envelope_bytes: &[u8],
    pin: &Pin,
) -> Result<Zeroizing<String>> {
    let data = envelope::open(pin.as_bytes(), envelope_bytes).context("Decryption failed")?;

    anyhow::ensure!(
        data.len() == key.length,
        "KEY: expected length {}, got {}",
        key.length,
        data.len()
    );

    let encoded = convert_and_encode(&key.hrp, &data).context("bech32 encode failed")?;
    Ok(Zeroizing::new(encoded))
}

/// Parse the hex text carried by a QR code back into envelope bytes
pub fn parse_qr_payload(text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim()).context("QR payload is not valid hex")
}

/// Check that the rendered QR payload recovers the original key
pub fn verify_roundtrip(
    key: &KeySection,
    qr_payload: &str,
    pin: &Pin,
    original: &str,
) -> Result<()> {
    let envelope_bytes = parse_qr_payload(qr_payload)?;
    let recovered = recover_secret_key(key, &envelope_bytes, pin)?;

    // bech32 output is lowercase; an uppercase input key is the same key
    if !recovered.eq_ignore_ascii_case(original) {
        anyhow::bail!(
            "Encryption - Decryption checks resulted in mismatch error. The outputs may be corrupted/wrong"
        );
    }
    log::debug!("round-trip check passed");
    Ok(())
}
