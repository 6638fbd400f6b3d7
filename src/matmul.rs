//! # Widening Integer Matrix Multiplication
//!
//! Computes `C = L * R` for integer matrices whose elements are widened into
//! a larger accumulator type before multiplying. With 8-bit operands stored in
//! `i16` and an `i32` accumulator, the worst case over an inner dimension of 8
//! is `8 * 128 * 128 = 131072`, far inside the `i32` range, so the result is
//! exact.
//!
//! The loops are the plain i-j-p order: output element `(i, j)` is the dot
//! product of row `i` of the left operand and column `j` of the right one.
//! Matrices here are at most a few dozen elements on a side, so no blocking
//! or packing is done.
//!
//! Accumulation is checked. An accumulator that is too narrow for the data
//! produces [`GenError::AccumulatorOverflow`] instead of a wrapped value.

use ndarray::{Array2, ArrayView2};
use num::{CheckedAdd, CheckedMul, Zero};

use crate::error::{GenError, Result};

/// Multiplies `left` (`m x k`) by `right` (`k x n`) into an `m x n` matrix of
/// accumulator type `A`.
///
/// # Errors
///
/// - [`GenError::ShapeMismatch`] if the inner dimensions differ.
/// - [`GenError::AccumulatorOverflow`] if an intermediate sum does not fit `A`.
///
/// # Examples
///
/// ```
/// use ndarray::arr2;
/// use rtlvec::matmul::widening_matmul;
///
/// let l = arr2(&[[127i16, 127], [-128, 1]]);
/// let r = arr2(&[[127i16], [127]]);
/// let c = widening_matmul::<i16, i32>(l.view(), r.view()).unwrap();
/// assert_eq!(c, arr2(&[[32258], [-16129]]));
/// ```
pub fn widening_matmul<T, A>(left: ArrayView2<'_, T>, right: ArrayView2<'_, T>) -> Result<Array2<A>>
where
    T: Copy + Into<A>,
    A: Copy + Zero + CheckedAdd + CheckedMul,
{
    let (m, k) = left.dim();
    let (k_right, n) = right.dim();
    if k != k_right {
        return Err(GenError::ShapeMismatch {
            left: left.dim(),
            right: right.dim(),
        });
    }

    let mut out = Array2::<A>::zeros((m, n));
    for i in 0..m {
        for j in 0..n {
            let mut acc = A::zero();
            for p in 0..k {
                let l: A = left[[i, p]].into();
                let r: A = right[[p, j]].into();
                acc = l
                    .checked_mul(&r)
                    .and_then(|prod| acc.checked_add(&prod))
                    .ok_or(GenError::AccumulatorOverflow { row: i, col: j })?;
            }
            out[[i, j]] = acc;
        }
    }

    Ok(out)
}

/// Multiplies `matrix` (`m x k`) by the column vector `vector` (`k x 1`).
///
/// # Errors
///
/// Same as [`widening_matmul`]; a `vector` with more than one column is a
/// [`GenError::ShapeMismatch`].
pub fn widening_matvec<T, A>(matrix: ArrayView2<'_, T>, vector: ArrayView2<'_, T>) -> Result<Array2<A>>
where
    T: Copy + Into<A>,
    A: Copy + Zero + CheckedAdd + CheckedMul,
{
    if vector.ncols() != 1 {
        return Err(GenError::ShapeMismatch {
            left: matrix.dim(),
            right: vector.dim(),
        });
    }
    widening_matmul(matrix, vector)
}
