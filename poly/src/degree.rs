//! Degree types and the stateless helpers built on them: range sizes, range
//! iteration and the binary search over an ordered term list.

use ark_std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::Hash,
    iter,
};
use num_traits::{PrimInt, Signed};

use crate::{PolynomialError, Term};

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width signed integer usable as a polynomial degree.
///
/// Implemented for `i8`, `i16`, `i32` and `i64`. The width is picked once per
/// use site through the `D` parameter of [`Term`] and
/// [`Polynomial`](crate::Polynomial); unsigned and non-integer types are
/// rejected at compile time.
pub trait Degree:
    'static + PrimInt + Signed + Debug + Display + Hash + Default + Send + Sync + sealed::Sealed
{
    /// Lossless widening, used for range arithmetic that may overflow `Self`.
    fn widen(self) -> i128;

    /// Inverse of [`Degree::widen`], `None` when `value` does not fit.
    fn narrow(value: i128) -> Option<Self>;
}

macro_rules! impl_degree {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Degree for $t {
                #[inline]
                fn widen(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn narrow(value: i128) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_degree!(i8, i16, i32, i64);

/// Number of integer degrees in the inclusive range `[lower, upper]`, which is
/// `upper - lower + 1` whatever the signs of the bounds.
pub fn range_size<D: Degree>(lower: D, upper: D) -> Result<usize, PolynomialError<D>> {
    if lower > upper {
        return Err(PolynomialError::Bounds { lower, upper });
    }
    usize::try_from(upper.widen() - lower.widen() + 1).map_err(|_| PolynomialError::DegreeOverflow)
}

/// Every degree in `[lower, upper]` in ascending order; empty if `lower > upper`.
pub fn degrees<D: Degree>(lower: D, upper: D) -> impl Iterator<Item = D> {
    iter::successors((lower <= upper).then_some(lower), move |&d| {
        (d < upper).then(|| d + D::one())
    })
}

/// Position of `degree` relative to `lower`. Callers guarantee `lower <= degree`.
#[inline]
pub(crate) fn offset<D: Degree>(lower: D, degree: D) -> usize {
    debug_assert!(lower <= degree);
    (degree.widen() - lower.widen()) as usize
}

/// Index of the term with the given `degree`.
///
/// `terms` must be sorted by ascending degree without duplicates; this is not
/// re-checked here. Each step compares the low, high and middle entries of the
/// window and the window shrinks on every iteration, so the loop ends after
/// `O(log n)` steps.
pub fn binary_search<D: Degree>(terms: &[Term<D>], degree: D) -> Result<usize, PolynomialError<D>> {
    let not_found = PolynomialError::ExponentNotFound(degree);
    let Some(mut high) = terms.len().checked_sub(1) else {
        return Err(not_found);
    };
    let mut low = 0;

    while low <= high {
        if terms[low].degree == degree {
            return Ok(low);
        }
        if terms[high].degree == degree {
            return Ok(high);
        }
        let mid = low + (high - low) / 2;
        match terms[mid].degree.cmp(&degree) {
            Ordering::Equal => return Ok(mid),
            Ordering::Greater => match mid.checked_sub(1) {
                Some(h) => high = h,
                None => break,
            },
            Ordering::Less => low = mid + 1,
        }
    }

    Err(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::vec::*;

    fn terms(degrees: &[i32]) -> Vec<Term<i32>> {
        degrees.iter().map(|&d| Term::new(1.0, d)).collect()
    }

    #[test]
    fn test_range_size_any_sign() {
        assert_eq!(range_size(0, 0), Ok(1));
        assert_eq!(range_size(2, 7), Ok(6));
        assert_eq!(range_size(-7, -2), Ok(6));
        assert_eq!(range_size(-3, 4), Ok(8));
        assert_eq!(range_size(-1, 0), Ok(2));
        assert_eq!(range_size(0, 1), Ok(2));
    }

    #[test]
    fn test_range_size_full_width() {
        assert_eq!(range_size(i8::MIN, i8::MAX), Ok(256));
        assert_eq!(range_size(i16::MIN, i16::MAX), Ok(65536));
    }

    #[test]
    fn test_range_size_reversed_bounds() {
        assert_eq!(
            range_size(3, -3),
            Err(PolynomialError::Bounds { lower: 3, upper: -3 })
        );
    }

    #[test]
    fn test_degrees() {
        assert_eq!(degrees(-2, 2).collect::<Vec<i32>>(), vec![-2, -1, 0, 1, 2]);
        assert_eq!(degrees(5, 5).collect::<Vec<i32>>(), vec![5]);
        assert_eq!(degrees(1, 0).count(), 0);
        // must stop at the top of the type without overflowing
        assert_eq!(degrees(i8::MAX - 1, i8::MAX).count(), 2);
        assert_eq!(degrees(i8::MIN, i8::MAX).count(), 256);
    }

    #[test]
    fn test_binary_search() {
        let t = terms(&[-2, -1, 2, 3]);
        assert_eq!(binary_search(&t, 3), Ok(3));
        assert_eq!(binary_search(&t, -2), Ok(0));
        assert_eq!(binary_search(&t, 2), Ok(2));

        let t = terms(&[-20, -15, -10, -5, -1]);
        assert_eq!(binary_search(&t, -10), Ok(2));
        assert_eq!(binary_search(&t, -15), Ok(1));
        assert_eq!(binary_search(&t, -5), Ok(3));
    }

    #[test]
    fn test_binary_search_every_position() {
        let all: Vec<i32> = (-40..40).step_by(3).collect();
        let t = terms(&all);
        for (i, &d) in all.iter().enumerate() {
            assert_eq!(binary_search(&t, d), Ok(i));
        }
    }

    #[test]
    fn test_binary_search_missing() {
        let t = terms(&[-2, -1, 2, 3]);
        for d in [-5, 0, 1, 4, 100] {
            assert_eq!(binary_search(&t, d), Err(PolynomialError::ExponentNotFound(d)));
        }
        // degenerate windows
        assert_eq!(binary_search(&terms(&[]), 0), Err(PolynomialError::ExponentNotFound(0)));
        assert_eq!(binary_search(&terms(&[4]), 1), Err(PolynomialError::ExponentNotFound(1)));
        assert_eq!(binary_search(&terms(&[4, 6]), 5), Err(PolynomialError::ExponentNotFound(5)));
        assert_eq!(binary_search(&terms(&[4, 6]), 6), Ok(1));
    }
}
