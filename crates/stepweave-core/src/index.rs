//! Signed index wrapping.

/// Wrap an arbitrary signed index into `[0, len)`.
///
/// Negative indices count backwards from the end, and magnitudes larger than
/// `len` wrap around, so `wrap_index(-1, 4)` is 3 and `wrap_index(6, 4)` is 2.
///
/// # Panics
/// Panics if `len` is 0; callers clamp lengths to at least 1 first.
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_index_in_range() {
        assert_eq!(wrap_index(0, 4), 0);
        assert_eq!(wrap_index(3, 4), 3);
    }

    #[test]
    fn test_wrap_index_negative() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(-5, 4), 3);
        assert_eq!(wrap_index(-4, 4), 0);
    }

    #[test]
    fn test_wrap_index_overflow() {
        assert_eq!(wrap_index(6, 4), 2);
        assert_eq!(wrap_index(8, 4), 0);
    }

    #[test]
    fn test_wrap_index_unit_length() {
        assert_eq!(wrap_index(123, 1), 0);
        assert_eq!(wrap_index(-123, 1), 0);
    }
}
