//! BIP-173 checksum
//!
//! A BCH code over GF(32) that guarantees detection of any error affecting
//! at most 4 characters and has less than 1 in 10^9 chance of failing to
//! detect more errors.
//!
//! Reference: https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki

use crate::u5;

/// Generator polynomial coefficients for the bech32 checksum
const GEN: [u32; 5] = [0x3b6a57b2, 0x26508e6d, 0x1ea119fa, 0x3d4233dd, 0x2a1462b3];

/// Number of 5-bit groups in a checksum
pub const CHECKSUM_LEN: usize = 6;

/// Compute the bech32 polymod over a sequence of 5-bit values
fn polymod(values: &[u5]) -> u32 {
    let mut chk: u32 = 1;

    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x1ffffff) << 5) ^ (v as u32);
        for (i, g) in GEN.iter().enumerate() {
            if (top >> i) & 1 != 0 {
                chk ^= g;
            }
        }
    }

    chk
}

/// Expand the human-readable part into 5-bit values for checksumming
///
/// High bits of every character, a zero separator, then the low bits.
pub(crate) fn expand_hrp(hrp: &str) -> Vec<u5> {
    let bytes = hrp.as_bytes();
    let mut expanded = Vec::with_capacity(bytes.len() * 2 + 1);
    expanded.extend(bytes.iter().map(|b| b >> 5));
    expanded.push(0);
    expanded.extend(bytes.iter().map(|b| b & 31));
    expanded
}

fn checksummed_values(hrp: &str, data: &[u5], extra: usize) -> Vec<u5> {
    let mut values = expand_hrp(hrp);
    values.reserve(data.len() + extra);
    values.extend_from_slice(data);
    values
}

/// Create the six checksum groups for `hrp` and `data`
///
/// `hrp` must already be lowercase.
pub fn create_checksum(hrp: &str, data: &[u5]) -> [u5; CHECKSUM_LEN] {
    let mut values = checksummed_values(hrp, data, CHECKSUM_LEN);
    values.extend_from_slice(&[0; CHECKSUM_LEN]);

    let polymod = polymod(&values) ^ 1;

    let mut checksum: [u5; CHECKSUM_LEN] = [0; CHECKSUM_LEN];
    for (i, group) in checksum.iter_mut().enumerate() {
        *group = ((polymod >> (5 * (5 - i))) & 31) as u5;
    }
    checksum
}

/// Verify a checksum
///
/// `data` includes the six trailing checksum groups.
pub fn verify_checksum(hrp: &str, data: &[u5]) -> bool {
    polymod(&checksummed_values(hrp, data, 0)) == 1
}
