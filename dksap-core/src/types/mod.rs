//! Domain types for DKSAP.
//!
//! This module provides the wire-level data structures of the protocol:
//!
//! - [`SecretKey`]: a secret scalar (`m` or `r`), zeroized on drop
//! - [`EncodedPoint`]: a curve point packed as the integer `x << 256 | y`
//! - [`MetaAddress`]: the recipient's published long-term public point
//! - [`StealthAddress`]: a one-time chain address for a specific payment
//! - [`Announcement`]: the ephemeral public key published with a payment
//! - [`HashToScalar`] / [`AddressFormat`]: protocol parameters both parties share

mod keys;
mod address;
mod announcement;
mod config;

pub use keys::*;
pub use address::*;
pub use announcement::*;
pub use config::*;

use zeroize::Zeroizing;

/// Left-pads a big-endian integer to `N` bytes.
///
/// Leading zero bytes are ignored, so minimal encodings (as printed by most
/// big-integer libraries) are accepted. Returns `None` when the value needs
/// more than `N` bytes.
pub(crate) fn left_pad<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[first..];
    if significant.len() > N {
        return None;
    }

    let mut out = [0u8; N];
    out[N - significant.len()..].copy_from_slice(significant);
    Some(out)
}

/// Decodes hex with an optional `0x` prefix and odd digit count.
///
/// The output may hold secret material and is wiped on drop. An odd leading
/// digit is decoded in place rather than by copying the input.
pub(crate) fn decode_hex(s: &str) -> crate::error::Result<Zeroizing<Vec<u8>>> {
    let s = s.trim();
    let digits = s.strip_prefix("0x").unwrap_or(s).as_bytes();
    let (head, rest) = digits.split_at(digits.len() % 2);

    let mut out = Zeroizing::new(vec![0u8; head.len() + rest.len() / 2]);
    if let [digit] = head {
        hex::decode_to_slice([b'0', *digit], &mut out[..1])?;
    }
    hex::decode_to_slice(rest, &mut out[head.len()..])?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_pad_short_input() {
        let padded: [u8; 4] = left_pad(&[0x01, 0x02]).unwrap();
        assert_eq!(padded, [0, 0, 0x01, 0x02]);
    }

    #[test]
    fn test_left_pad_ignores_leading_zeros() {
        let padded: [u8; 2] = left_pad(&[0, 0, 0, 0xAB, 0xCD]).unwrap();
        assert_eq!(padded, [0xAB, 0xCD]);
    }

    #[test]
    fn test_left_pad_overflow() {
        assert!(left_pad::<2>(&[1, 0, 0]).is_none());
    }

    #[test]
    fn test_decode_hex_variants() {
        assert_eq!(*decode_hex("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(*decode_hex("a0b").unwrap(), vec![0x0a, 0x0b]);
        assert_eq!(*decode_hex(" 0x7 ").unwrap(), vec![0x07]);
        assert!(decode_hex("").unwrap().is_empty());
        assert!(decode_hex("xyz").is_err());
        assert!(decode_hex("g0b").is_err());
        assert!(decode_hex("a0g").is_err());
    }
}
