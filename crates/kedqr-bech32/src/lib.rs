//! KedQR Bech32
//!
//! BIP-173 bech32 encoding for secret keys exported by `jcli key to-bytes`
//! style tooling (e.g. `ed25519e_sk1...`).
//!
//! # Format
//!
//! `<hrp>1<data><checksum>`
//!
//! - `hrp`: 1-83 printable ASCII characters, never mixed case
//! - `1`: separator (the last `1` in the string)
//! - `data`: 5-bit groups in the bech32 alphabet
//! - `checksum`: 6 groups
//!
//! Only the original bech32 checksum constant is supported (no bech32m).
//!
//! # Example
//!
//! ```
//! use kedqr_bech32::{convert_and_encode, decode_and_convert};
//!
//! let encoded = convert_and_encode("abc", &[0x00, 0x01, 0x02]).unwrap();
//! assert_eq!(encoded, "abc1qqqsyseas9w");
//!
//! let (hrp, bytes) = decode_and_convert(&encoded).unwrap();
//! assert_eq!(hrp, "abc");
//! assert_eq!(bytes, vec![0x00, 0x01, 0x02]);
//! ```

pub mod checksum;
pub mod codec;
pub mod convert;

pub use codec::{convert_and_encode, decode, decode_and_convert, encode};
pub use convert::convert_bits;

use thiserror::Error;

/// A value carrying 5 significant bits (one bech32 character)
#[allow(non_camel_case_types)]
pub type u5 = u8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Bech32Error {
    /// Format: string shorter than hrp + separator + checksum
    #[error("Invalid bech32 string length {0}")]
    InvalidLength(usize),
    /// Format: no separator, or separator at position 0
    #[error("Invalid bech32 string separator position")]
    InvalidSeparator,
    /// Format: fewer than 6 characters after the separator
    #[error("Invalid bech32 string data length {0}")]
    InvalidDataLength(usize),
    /// Format: hrp length outside 1-83
    #[error("Invalid hrp length {0}")]
    InvalidHrp(usize),
    /// Format: character outside [33, 126] or outside the bech32 alphabet
    #[error("Invalid character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
    /// Format
    #[error("Mixed-case strings not allowed")]
    MixedCase,
    /// Format: trailing bits that are not a zero padding
    #[error("Invalid incomplete group")]
    InvalidIncompleteGroup,
    /// Checksum mismatch
    #[error("Checksum failed: expected {expected}, got {actual}")]
    Checksum { expected: String, actual: String },
    /// Argument: bit widths must be 1-8
    #[error("Only bit groups between 1 and 8 allowed (got {from_bits} -> {to_bits})")]
    InvalidBitWidth { from_bits: u8, to_bits: u8 },
    /// Argument: 5-bit group holds a value of 32 or more
    #[error("Invalid data group value {0}")]
    InvalidGroupValue(u8),
}
