//! Password-sealed envelope
//!
//! Password-based encryption for secret keys using PBKDF2-HMAC-SHA512 +
//! ChaCha20-Poly1305.
//!
//! # Format
//!
//! ```text
//! | 0x01 | salt (16) | nonce (12) | ciphertext (N) | tag (16) |
//! ```
//!
//! Total: 45 + N bytes, 109 bytes for a 64-byte extended secret key.
//!
//! # Security Notes
//!
//! - Salt and nonce are drawn from the OS CSPRNG on every seal
//! - The derived key only lives inside a single seal/open call and is zeroized
//! - A wrong password and a corrupted envelope fail identically
//! - HMAC zero-pads short keys, so passwords differing only by trailing zero
//!   bytes derive the same key (`[]`, `[0]` and `[0, 0, 0, 0]` are equivalent)

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use hmac::Hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use thiserror::Error;
use zeroize::Zeroizing;

/// Only envelope version understood by this implementation
pub const ENVELOPE_VERSION: u8 = 0b0000_0001;

/// Salt length for PBKDF2
pub const SALT_LEN: usize = 16;

/// Nonce length for ChaCha20-Poly1305
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length
pub const TAG_LEN: usize = 16;

/// ChaCha20 key length
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Fixed: changing it requires a new envelope version.
pub const PBKDF2_ITERATIONS: u32 = 12_983;

/// version + salt + nonce
pub const HEADER_LEN: usize = 1 + SALT_LEN + NONCE_LEN;

/// Header plus an empty ciphertext and its tag
pub const MIN_ENVELOPE_LEN: usize = HEADER_LEN + TAG_LEN;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("Envelope too short: {0} bytes, need at least 45")]
    TooShort(usize),
    #[error("Unsupported envelope version {0:#04x}")]
    UnsupportedVersion(u8),
    #[error("Invalid password or corrupted data")]
    Authentication,
    #[error("Secure random source unavailable")]
    Randomness,
    #[error("Encryption failed")]
    Encryption,
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
}

/// A parsed envelope
///
/// Parsing only checks structure (length and version); authenticity is
/// established by [`SealedEnvelope::open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEnvelope {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    /// Encrypted payload + authentication tag
    ciphertext: Vec<u8>,
}

impl SealedEnvelope {
    /// Seal `plaintext` under `password` with a fresh salt and nonce
    pub fn seal(password: &[u8], plaintext: &[u8]) -> Result<Self, EnvelopeError> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|_| EnvelopeError::Randomness)?;
        OsRng
            .try_fill_bytes(&mut nonce)
            .map_err(|_| EnvelopeError::Randomness)?;

        Self::seal_with(password, plaintext, salt, nonce)
    }

    fn seal_with(
        password: &[u8],
        plaintext: &[u8],
        salt: [u8; SALT_LEN],
        nonce: [u8; NONCE_LEN],
    ) -> Result<Self, EnvelopeError> {
        let key = derive_key(password, &salt)?;

        let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_slice()));
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| EnvelopeError::Encryption)?;

        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Open the envelope with `password`
    ///
    /// # Errors
    /// [`EnvelopeError::Authentication`] if the password is wrong or any byte
    /// of the envelope was altered.
    pub fn open(&self, password: &[u8]) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
        let key = derive_key(password, &self.salt)?;
        open_with_key(&key, &self.nonce, &self.ciphertext)
    }

    /// Serialize to bytes: version || salt || nonce || ciphertext || tag
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        bytes.push(ENVELOPE_VERSION);
        bytes.extend_from_slice(&self.salt);
        bytes.extend_from_slice(&self.nonce);
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Deserialize from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(EnvelopeError::TooShort(bytes.len()));
        }
        if bytes[0] != ENVELOPE_VERSION {
            return Err(EnvelopeError::UnsupportedVersion(bytes[0]));
        }

        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        salt.copy_from_slice(&bytes[1..1 + SALT_LEN]);
        nonce.copy_from_slice(&bytes[1 + SALT_LEN..HEADER_LEN]);

        Ok(Self {
            salt,
            nonce,
            ciphertext: bytes[HEADER_LEN..].to_vec(),
        })
    }

    /// Length of the payload this envelope decrypts to
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len() - TAG_LEN
    }
}

/// Derive the envelope key from a password using PBKDF2-HMAC-SHA512
fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
) -> Result<Zeroizing<[u8; KEY_LEN]>, EnvelopeError> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, PBKDF2_ITERATIONS, key.as_mut_slice())
        .map_err(|e| EnvelopeError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

fn open_with_key(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| EnvelopeError::Authentication)
}

/// Seal `plaintext` under `password`, returning the envelope bytes
///
/// Each call generates a new random salt and nonce, so sealing the same
/// input twice gives different envelopes.
///
/// # Example
/// ```
/// use kedqr_core::envelope::{open, seal};
///
/// let pin = [1u8, 2, 3, 4];
/// let blob = seal(&pin, b"secret").unwrap();
/// assert_eq!(blob.len(), 45 + 6);
/// assert_eq!(open(&pin, &blob).unwrap().as_slice(), b"secret");
/// ```
pub fn seal(password: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let envelope = SealedEnvelope::seal(password, plaintext)?;
    log::debug!(
        "sealed {} bytes into {} byte envelope",
        plaintext.len(),
        HEADER_LEN + envelope.ciphertext.len()
    );
    Ok(envelope.to_bytes())
}

/// Open envelope bytes produced by [`seal`]
pub fn open(password: &[u8], blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, EnvelopeError> {
    SealedEnvelope::from_bytes(blob)?.open(password)
}
