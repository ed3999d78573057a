//! Bit regrouping between base-256 bytes and base-32 groups

use crate::Bech32Error;

/// Largest leftover that may be dropped when not padding
const MAX_LEFTOVER_BITS: u32 = 4;

/// Regroup `data`, where each element carries `from_bits` bits, into a
/// sequence where each element carries `to_bits` bits.
///
/// Bits are consumed most significant first and carried across element
/// boundaries. Bits above `from_bits` in an input element are ignored.
///
/// With `pad`, a short trailing group is filled with zero bits. Without it,
/// a trailing group of at most 4 bits is dropped if it is all zeroes; any
/// other leftover is [`Bech32Error::InvalidIncompleteGroup`].
///
/// # Example
/// ```
/// use kedqr_bech32::convert_bits;
/// let groups = convert_bits(&[0xff], 8, 5, true).unwrap();
/// assert_eq!(groups, vec![31, 28]);
/// ```
pub fn convert_bits(
    data: &[u8],
    from_bits: u8,
    to_bits: u8,
    pad: bool,
) -> Result<Vec<u8>, Bech32Error> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(Bech32Error::InvalidBitWidth { from_bits, to_bits });
    }

    let from_bits = from_bits as u32;
    let to_bits = to_bits as u32;
    let from_mask: u32 = (1 << from_bits) - 1;
    let to_mask: u32 = (1 << to_bits) - 1;

    let capacity = (data.len() * from_bits as usize).div_ceil(to_bits as usize);
    let mut regrouped = Vec::with_capacity(capacity);

    // Never holds more than to_bits - 1 + from_bits <= 15 bits
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for &value in data {
        acc = (acc << from_bits) | (value as u32 & from_mask);
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            regrouped.push(((acc >> bits) & to_mask) as u8);
        }
        acc &= (1 << bits) - 1;
    }

    if bits > 0 {
        if pad {
            regrouped.push(((acc << (to_bits - bits)) & to_mask) as u8);
        } else if bits > MAX_LEFTOVER_BITS || acc != 0 {
            return Err(Bech32Error::InvalidIncompleteGroup);
        }
    }

    Ok(regrouped)
}
