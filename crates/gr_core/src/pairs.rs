//! Unordered pair enumeration.
//!
//! Yields every index pair `(i, j)` with `i < j` over a sequence, in
//! row-major order: `(0, 1), (0, 2), ..., (1, 2), ...`.

/// Iterate over all index pairs `(i, j)` with `i < j < len`.
pub fn unordered_pairs(len: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..len).flat_map(move |i| (i + 1..len).map(move |j| (i, j)))
}

/// Call `action` once for every unordered pair of distinct elements.
pub fn for_each_pair<T>(items: &[T], mut action: impl FnMut(&T, &T)) {
    for (i, j) in unordered_pairs(items.len()) {
        action(&items[i], &items[j]);
    }
}

/// Call `action` once for every unordered pair, with mutable access to both.
pub fn for_each_pair_mut<T>(items: &mut [T], mut action: impl FnMut(&mut T, &mut T)) {
    for (i, j) in unordered_pairs(items.len()) {
        let (head, tail) = items.split_at_mut(j);
        action(&mut head[i], &mut tail[0]);
    }
}
