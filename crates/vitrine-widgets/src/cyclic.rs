#![forbid(unsafe_code)]

//! Wrap-around index arithmetic shared by the carousels and the stepper.
//!
//! All functions are total: a zero length yields `None` instead of dividing
//! by zero, and an out-of-range `index` is reduced first.

/// Index after `index` in a cycle of `len`.
#[must_use]
pub fn next(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + 1) % len)
}

/// Index before `index` in a cycle of `len`, wrapping `0` to `len - 1`.
#[must_use]
pub fn prev(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| (index % len + len - 1) % len)
}

/// `items` rotated left by `offset` (the element at `offset` comes first).
#[must_use]
pub fn rotate_left<T: Clone>(items: &[T], offset: usize) -> Vec<T> {
    if items.is_empty() {
        return Vec::new();
    }
    let offset = offset % items.len();
    items[offset..].iter().chain(&items[..offset]).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps() {
        assert_eq!(next(3, 4), Some(0));
        assert_eq!(next(0, 4), Some(1));
        assert_eq!(next(0, 1), Some(0));
    }

    #[test]
    fn prev_wraps() {
        assert_eq!(prev(0, 5), Some(4));
        assert_eq!(prev(4, 5), Some(3));
    }

    #[test]
    fn empty_cycle_has_no_neighbors() {
        assert_eq!(next(0, 0), None);
        assert_eq!(prev(0, 0), None);
    }

    #[test]
    fn out_of_range_index_is_reduced() {
        assert_eq!(next(9, 4), Some(2));
        assert_eq!(prev(9, 4), Some(0));
    }

    #[test]
    fn rotation() {
        assert_eq!(rotate_left(&[1, 2, 3, 4], 1), vec![2, 3, 4, 1]);
        assert_eq!(rotate_left(&[1, 2, 3], 3), vec![1, 2, 3]);
        assert!(rotate_left::<u8>(&[], 2).is_empty());
    }
}
