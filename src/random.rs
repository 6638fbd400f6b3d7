//! Bounded random integer matrices.
//!
//! The random source is always passed in by the caller, so tests can use a
//! seeded `StdRng` and get the same matrices on every run.

use std::ops::RangeInclusive;

use ndarray::Array2;
use rand::distr::uniform::SampleUniform;
use rand::distr::{Distribution, Uniform};
use rand::Rng;

use crate::error::{GenError, Result};

/// Smallest 8-bit signed value.
pub const INT8_MIN: i16 = i8::MIN as i16;

/// Largest 8-bit signed value.
pub const INT8_MAX: i16 = i8::MAX as i16;

/// Fills a `rows x cols` matrix with independent uniform draws from `range`.
///
/// Elements are drawn in row-major order.
///
/// # Errors
///
/// Returns [`GenError::InvalidRange`] if the range is empty.
pub fn random_matrix<T, R>(
    rng: &mut R,
    shape: (usize, usize),
    range: RangeInclusive<T>,
) -> Result<Array2<T>>
where
    T: SampleUniform + PartialOrd + Copy + Into<i64>,
    R: Rng + ?Sized,
{
    let (lo, hi) = (*range.start(), *range.end());
    let dist = Uniform::new_inclusive(lo, hi).map_err(|_| GenError::InvalidRange {
        lo: lo.into(),
        hi: hi.into(),
    })?;

    Ok(Array2::from_shape_fn(shape, |_| dist.sample(rng)))
}

/// An `len x 1` column vector of uniform draws from `range`.
pub fn random_column<T, R>(rng: &mut R, len: usize, range: RangeInclusive<T>) -> Result<Array2<T>>
where
    T: SampleUniform + PartialOrd + Copy + Into<i64>,
    R: Rng + ?Sized,
{
    random_matrix(rng, (len, 1), range)
}

/// A `rows x cols` matrix of 8-bit signed values held in `i16`.
pub fn random_int8_matrix<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
) -> Result<Array2<i16>> {
    random_matrix(rng, (rows, cols), INT8_MIN..=INT8_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_shape_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = random_matrix(&mut rng, (5, 8), -3i16..=4).unwrap();
        assert_eq!(m.dim(), (5, 8));
        assert!(m.iter().all(|&x| (-3..=4).contains(&x)));
    }

    #[test]
    fn test_single_value_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = random_matrix(&mut rng, (3, 3), 42i32..=42).unwrap();
        assert!(m.iter().all(|&x| x == 42));
    }

    #[test]
    fn test_empty_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        #[allow(clippy::reversed_empty_ranges)]
        let err = random_matrix(&mut rng, (2, 2), 5i16..=-5).unwrap_err();
        assert_eq!(err, GenError::InvalidRange { lo: 5, hi: -5 });
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = random_int8_matrix(&mut StdRng::seed_from_u64(99), 4, 8).unwrap();
        let b = random_int8_matrix(&mut StdRng::seed_from_u64(99), 4, 8).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_int8_matrix_is_a_bounded_random_matrix() {
        let int8 = random_int8_matrix(&mut StdRng::seed_from_u64(5), 3, 8).unwrap();
        let general =
            random_matrix(&mut StdRng::seed_from_u64(5), (3, 8), INT8_MIN..=INT8_MAX).unwrap();
        assert_eq!(int8, general);
    }

    #[test]
    fn test_column_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let v = random_column(&mut rng, 8, INT8_MIN..=INT8_MAX).unwrap();
        assert_eq!(v.dim(), (8, 1));
    }

    #[test]
    fn test_int8_covers_both_bounds() {
        // 4096 draws over 256 values: both ends show up with overwhelming probability.
        let mut rng = StdRng::seed_from_u64(2024);
        let m = random_int8_matrix(&mut rng, 512, 8).unwrap();
        assert!(m.iter().all(|&x| (INT8_MIN..=INT8_MAX).contains(&x)));
        assert!(m.iter().any(|&x| x == INT8_MIN));
        assert!(m.iter().any(|&x| x == INT8_MAX));
    }
}
