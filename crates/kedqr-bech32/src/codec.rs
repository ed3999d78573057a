//! Bech32 string encoding and decoding

use crate::checksum::{create_checksum, verify_checksum, CHECKSUM_LEN};
use crate::convert::convert_bits;
use crate::{u5, Bech32Error};

/// The bech32 alphabet, indexed by 5-bit value
const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const SEPARATOR: u8 = b'1';

const HRP_MIN_LEN: usize = 1;
const HRP_MAX_LEN: usize = 83;

/// Printable ASCII bounds for every character of the string
const CHAR_MIN: u8 = 33;
const CHAR_MAX: u8 = 126;

/// hrp + separator + checksum
const MIN_ENCODED_LEN: usize = HRP_MIN_LEN + 1 + CHECKSUM_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Upper,
    Lower,
    /// No cased characters at all (digits and symbols only)
    Neutral,
}

/// Validate the human-readable part and report its case
fn check_hrp(hrp: &str) -> Result<Case, Bech32Error> {
    if hrp.len() < HRP_MIN_LEN || hrp.len() > HRP_MAX_LEN {
        return Err(Bech32Error::InvalidHrp(hrp.len()));
    }

    let mut has_lower = false;
    let mut has_upper = false;

    for (position, &b) in hrp.as_bytes().iter().enumerate() {
        if !(CHAR_MIN..=CHAR_MAX).contains(&b) {
            return Err(Bech32Error::InvalidChar {
                ch: b as char,
                position,
            });
        }
        has_lower |= b.is_ascii_lowercase();
        has_upper |= b.is_ascii_uppercase();
        if has_lower && has_upper {
            return Err(Bech32Error::MixedCase);
        }
    }

    Ok(match (has_upper, has_lower) {
        (true, _) => Case::Upper,
        (_, true) => Case::Lower,
        _ => Case::Neutral,
    })
}

fn to_groups(chars: &[u8], offset: usize) -> Result<Vec<u5>, Bech32Error> {
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            CHARSET
                .iter()
                .position(|&x| x == c)
                .map(|index| index as u5)
                .ok_or(Bech32Error::InvalidChar {
                    ch: c as char,
                    position: offset + i,
                })
        })
        .collect()
}

fn to_chars(groups: &[u5]) -> Result<String, Bech32Error> {
    groups
        .iter()
        .map(|&g| {
            CHARSET
                .get(g as usize)
                .map(|&c| c as char)
                .ok_or(Bech32Error::InvalidGroupValue(g))
        })
        .collect()
}

/// Decode a bech32 string
///
/// Returns the human-readable part (lowercased if it was uppercase) and the
/// 5-bit data groups without the checksum.
///
/// Validation runs in a fixed order: length, separator, hrp (including its
/// own case check), data characters, then case across the whole string.
pub fn decode(bech: &str) -> Result<(String, Vec<u5>), Bech32Error> {
    let bytes = bech.as_bytes();
    if bytes.len() < MIN_ENCODED_LEN {
        return Err(Bech32Error::InvalidLength(bytes.len()));
    }

    let sep = match bytes.iter().rposition(|&b| b == SEPARATOR) {
        Some(pos) if pos >= HRP_MIN_LEN => pos,
        _ => return Err(Bech32Error::InvalidSeparator),
    };
    let data_len = bytes.len() - sep - 1;
    if data_len < CHECKSUM_LEN {
        return Err(Bech32Error::InvalidDataLength(data_len));
    }

    let hrp = match check_hrp(&bech[..sep])? {
        Case::Upper => bech[..sep].to_ascii_lowercase(),
        Case::Lower | Case::Neutral => bech[..sep].to_string(),
    };

    for (position, &b) in bytes.iter().enumerate().skip(sep + 1) {
        if !(CHAR_MIN..=CHAR_MAX).contains(&b) {
            return Err(Bech32Error::InvalidChar {
                ch: b as char,
                position,
            });
        }
    }

    // Everything is printable ASCII from here on
    let lower = bech.to_ascii_lowercase();
    if bech != lower && bech != bech.to_ascii_uppercase() {
        return Err(Bech32Error::MixedCase);
    }

    let data_chars = &lower.as_bytes()[sep + 1..];
    let mut groups = to_groups(data_chars, sep + 1)?;

    if !verify_checksum(&hrp, &groups) {
        let payload_len = groups.len() - CHECKSUM_LEN;
        let expected = to_chars(&create_checksum(&hrp, &groups[..payload_len]))?;
        let actual = lower[lower.len() - CHECKSUM_LEN..].to_string();
        log::debug!("bech32 checksum mismatch for hrp {}", hrp);
        return Err(Bech32Error::Checksum { expected, actual });
    }

    groups.truncate(groups.len() - CHECKSUM_LEN);
    Ok((hrp, groups))
}

/// Encode 5-bit groups into a bech32 string with the given hrp
///
/// An uppercase hrp is written lowercase, so the output always decodes.
pub fn encode(hrp: &str, data: &[u5]) -> Result<String, Bech32Error> {
    if let Some(&bad) = data.iter().find(|&&g| g >= 32) {
        return Err(Bech32Error::InvalidGroupValue(bad));
    }

    let hrp = match check_hrp(hrp)? {
        Case::Upper => hrp.to_ascii_lowercase(),
        Case::Lower | Case::Neutral => hrp.to_string(),
    };

    let checksum = create_checksum(&hrp, data);

    let mut encoded = String::with_capacity(hrp.len() + 1 + data.len() + CHECKSUM_LEN);
    encoded.push_str(&hrp);
    encoded.push(SEPARATOR as char);
    encoded.push_str(&to_chars(data)?);
    encoded.push_str(&to_chars(&checksum)?);
    Ok(encoded)
}

/// Decode a bech32 string and regroup its data into bytes
pub fn decode_and_convert(bech: &str) -> Result<(String, Vec<u8>), Bech32Error> {
    let (hrp, groups) = decode(bech)?;
    let bytes = convert_bits(&groups, 5, 8, false)?;
    Ok((hrp, bytes))
}

/// Regroup bytes into 5-bit groups and encode them with the given hrp
pub fn convert_and_encode(hrp: &str, data: &[u8]) -> Result<String, Bech32Error> {
    let groups = convert_bits(data, 8, 5, true)?;
    encode(hrp, &groups)
}
