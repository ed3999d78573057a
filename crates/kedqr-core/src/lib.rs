//! KedQR Core
//!
//! Password-sealed envelopes for ed25519 extended secret keys.
//!
//! # Encrypted Envelope
//!
//! Keys are sealed with PBKDF2-HMAC-SHA512 + ChaCha20-Poly1305 into a
//! versioned binary layout, see [`envelope`].
//!
//! The envelope is independent of how the key was encoded; pair it with
//! `kedqr-bech32` to go from `ed25519e_sk1...` text to a sealed blob.

pub mod envelope;
pub mod memory;

pub use envelope::{open, seal, EnvelopeError, SealedEnvelope};
