//! Numeric PIN used as the envelope password
//!
//! Each digit becomes its numeric value (`'7'` -> `7`), not its ASCII code,
//! so the password for PIN `1234` is `[1, 2, 3, 4]`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use zeroize::Zeroizing;

/// Digits in a Catalyst PIN
pub const DEFAULT_PIN_LENGTH: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The PIN must consist of {0} digits.")]
pub struct BadPinError(pub usize);

/// A parsed PIN, zeroized on drop
#[derive(Clone)]
pub struct Pin(Zeroizing<Vec<u8>>);

impl Pin {
    /// Parse a PIN of exactly `length` ASCII digits, ignoring surrounding whitespace
    pub fn parse(s: &str, length: usize) -> Result<Self, BadPinError> {
        let s = s.trim();
        if s.len() != length {
            return Err(BadPinError(length));
        }

        let digits = s
            .bytes()
            .map(|b| {
                if b.is_ascii_digit() {
                    Ok(b - b'0')
                } else {
                    Err(BadPinError(length))
                }
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Ok(Self(Zeroizing::new(digits)))
    }

    /// The raw password bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pin {
    type Err = BadPinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_PIN_LENGTH)
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pin([REDACTED; {}])", self.0.len())
    }
}
