//! # Bit Utilities
//!
//! Pure helpers over a 64-bit component mask.
//!
//! Every `index` must be in `0..64`. The registry never hands out an index
//! outside that range, so these functions do not check it.

/// Returns `mask` with bit `index` set.
#[inline]
#[must_use]
pub const fn set_bit(index: u8, mask: u64) -> u64 {
    mask | (1u64 << index)
}

/// Returns `true` if bit `index` is set in `mask`.
#[inline]
#[must_use]
pub const fn is_bit_on(index: u8, mask: u64) -> bool {
    mask & (1u64 << index) != 0
}

/// Returns `true` if every bit set in `required` is also set in `mask`.
///
/// An empty `required` mask is satisfied by any mask.
#[inline]
#[must_use]
pub const fn check_mask(mask: u64, required: u64) -> bool {
    mask & required == required
}

/// Folds a list of bit indices into a single mask.
#[inline]
#[must_use]
pub fn mask_of(indices: &[u8]) -> u64 {
    indices.iter().fold(0, |mask, &index| set_bit(index, mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_bit() {
        assert_eq!(set_bit(0, 0), 0b1);
        assert_eq!(set_bit(3, 0b1), 0b1001);
        // Already set: unchanged.
        assert_eq!(set_bit(3, 0b1001), 0b1001);
    }

    #[test]
    fn test_high_bits_do_not_overflow() {
        let mask = set_bit(63, 0);
        assert_eq!(mask, 1u64 << 63);
        assert!(is_bit_on(63, mask));
        assert!(!is_bit_on(31, mask));

        let mask = set_bit(32, mask);
        assert!(is_bit_on(32, mask));
    }

    #[test]
    fn test_is_bit_on() {
        let mask = 0b1010;
        assert!(!is_bit_on(0, mask));
        assert!(is_bit_on(1, mask));
        assert!(!is_bit_on(2, mask));
        assert!(is_bit_on(3, mask));
    }

    #[test]
    fn test_check_mask_superset() {
        assert!(check_mask(0b1111, 0b0101));
        assert!(check_mask(0b0101, 0b0101));
        assert!(!check_mask(0b0100, 0b0101));
        assert!(check_mask(0, 0));
        assert!(check_mask(0b1, 0));
        assert!(!check_mask(0, 0b1));
    }

    #[test]
    fn test_mask_of() {
        assert_eq!(mask_of(&[]), 0);
        assert_eq!(mask_of(&[0, 2, 2, 5]), 0b100101);
        assert_eq!(mask_of(&[63]), 1u64 << 63);
    }
}
