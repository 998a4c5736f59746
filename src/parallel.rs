//! Parallel/sequential index mapping.
//!
//! The `cfg` switch on the `parallel` feature lives here so call sites stay
//! the same either way. Output order always matches index order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Map `f` over `0..len`, in parallel when the feature is enabled and
/// `force_sequential` is false.
pub fn map_indices<F, R>(len: usize, f: F, force_sequential: bool) -> Vec<R>
where
    F: Fn(usize) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if force_sequential {
            (0..len).map(f).collect()
        } else {
            (0..len).into_par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = force_sequential;
        (0..len).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_index_order() {
        let par = map_indices(1_000, |i| i * 3, false);
        let seq = map_indices(1_000, |i| i * 3, true);
        assert_eq!(par, seq);
        assert_eq!(par[999], 2_997);
    }

    #[test]
    fn empty_range() {
        let out: Vec<usize> = map_indices(0, |i| i, false);
        assert!(out.is_empty());
    }
}
