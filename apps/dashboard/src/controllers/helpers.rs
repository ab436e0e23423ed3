/// Index after `index` in a list of `len` items, wrapping to the front.
pub const fn cycle_next(index: usize, len: usize) -> usize {
    match len {
        0 => 0,
        _ => (index + 1) % len,
    }
}

/// Index before `index` in a list of `len` items, wrapping to the back.
pub const fn cycle_previous(index: usize, len: usize) -> usize {
    match (index, len) {
        (_, 0) => 0,
        (0, _) => len - 1,
        _ => (index - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_both_ends() {
        assert_eq!(cycle_previous(0, 5), 4);
        assert_eq!(cycle_next(4, 5), 0);
        assert_eq!(cycle_next(1, 5), 2);
    }

    #[test]
    fn empty_lists_stay_at_zero() {
        assert_eq!(cycle_previous(0, 0), 0);
        assert_eq!(cycle_next(3, 0), 0);
    }
}
