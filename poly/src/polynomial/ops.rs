use ark_std::{
    iter::Sum,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use log::trace;
use num_traits::Zero;

use super::Polynomial;
use crate::{Degree, PolynomialError};

impl<D: Degree> Polynomial<D> {
    /// Dense result over the union of both ranges. Every stored term of `self`
    /// is added into its slot, then `f` folds in every stored term of `other`.
    fn union_with(&self, other: &Self, f: impl Fn(&mut f64, f64)) -> Self {
        let (a_lo, a_hi) = self.extent();
        let (b_lo, b_hi) = other.extent();
        let (lower, upper) = (a_lo.min(b_lo), a_hi.max(b_hi));
        if (lower, upper) != (self.trailing.min(other.trailing), self.leading.max(other.leading)) {
            trace!("stored terms outside declared bounds, widening to [{}, {}]", lower, upper);
        }

        let mut result = Self::zeroed(lower, upper);
        for t in &self.terms {
            let i = result.slot(t.degree);
            result.terms[i].coefficient += t.coefficient;
        }
        for t in &other.terms {
            let i = result.slot(t.degree);
            f(&mut result.terms[i].coefficient, t.coefficient);
        }
        result
    }

    /// Perform a naive n^2 multiplication of `self` by `other`.
    ///
    /// The product is dense over `[a.trailing + b.trailing, a.leading + b.leading]`
    /// and fails with [`PolynomialError::DegreeOverflow`] when those bounds do
    /// not fit in `D` or the range is too wide to allocate.
    pub fn naive_mul(&self, other: &Self) -> Result<Self, PolynomialError<D>> {
        let (a_lo, a_hi) = self.extent();
        let (b_lo, b_hi) = other.extent();
        let lower = a_lo.checked_add(&b_lo).ok_or(PolynomialError::DegreeOverflow)?;
        let upper = a_hi.checked_add(&b_hi).ok_or(PolynomialError::DegreeOverflow)?;

        let mut result = Self::try_zeroed(lower, upper)?;
        for a in &self.terms {
            for b in &other.terms {
                let i = (a.degree.widen() + b.degree.widen() - lower.widen()) as usize;
                result.terms[i].coefficient += a.coefficient * b.coefficient;
            }
        }
        Ok(result)
    }
}

impl<'a, D: Degree> Add<&'a Polynomial<D>> for &Polynomial<D> {
    type Output = Polynomial<D>;

    fn add(self, other: &'a Polynomial<D>) -> Polynomial<D> {
        self.union_with(other, |a, b| *a += b)
    }
}

impl<'a, D: Degree> Sub<&'a Polynomial<D>> for &Polynomial<D> {
    type Output = Polynomial<D>;

    #[inline]
    fn sub(self, other: &'a Polynomial<D>) -> Polynomial<D> {
        self.union_with(other, |a, b| *a -= b)
    }
}

impl<'a, D: Degree> AddAssign<&'a Self> for Polynomial<D> {
    fn add_assign(&mut self, other: &'a Self) {
        *self = &*self + other;
    }
}

impl<'a, D: Degree> SubAssign<&'a Self> for Polynomial<D> {
    #[inline]
    fn sub_assign(&mut self, other: &'a Self) {
        *self = &*self - other;
    }
}

impl<D: Degree> Neg for Polynomial<D> {
    type Output = Self;

    #[inline]
    fn neg(mut self) -> Self {
        self.terms.iter_mut().for_each(|t| {
            *t = -*t;
        });
        self
    }
}

impl<D: Degree> Neg for &Polynomial<D> {
    type Output = Polynomial<D>;

    #[inline]
    fn neg(self) -> Polynomial<D> {
        -self.clone()
    }
}

impl<D: Degree> MulAssign<f64> for Polynomial<D> {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.scale(|c| *c *= scalar);
    }
}

impl<D: Degree> Mul<f64> for &Polynomial<D> {
    type Output = Polynomial<D>;

    #[inline]
    fn mul(self, scalar: f64) -> Polynomial<D> {
        let mut result = self.clone();
        result *= scalar;
        result
    }
}

impl<D: Degree> Mul<f64> for Polynomial<D> {
    type Output = Self;

    #[inline]
    fn mul(mut self, scalar: f64) -> Self {
        self *= scalar;
        self
    }
}

macro_rules! impl_op {
    ($trait:ident, $method:ident) => {
        impl<D: Degree> $trait<Polynomial<D>> for Polynomial<D> {
            type Output = Polynomial<D>;

            #[inline]
            fn $method(self, other: Polynomial<D>) -> Polynomial<D> {
                (&self).$method(&other)
            }
        }

        impl<'a, D: Degree> $trait<&'a Polynomial<D>> for Polynomial<D> {
            type Output = Polynomial<D>;

            #[inline]
            fn $method(self, other: &'a Polynomial<D>) -> Polynomial<D> {
                (&self).$method(other)
            }
        }

        impl<'a, D: Degree> $trait<Polynomial<D>> for &'a Polynomial<D> {
            type Output = Polynomial<D>;

            #[inline]
            fn $method(self, other: Polynomial<D>) -> Polynomial<D> {
                self.$method(&other)
            }
        }
    };
}

impl_op!(Add, add);
impl_op!(Sub, sub);

impl<D: Degree> Zero for Polynomial<D> {
    /// Returns the canonical zero polynomial.
    fn zero() -> Self {
        Self::new()
    }

    /// True when every stored coefficient is zero, including when none is stored.
    fn is_zero(&self) -> bool {
        self.terms.iter().all(|t| t.is_zero())
    }
}

impl<D: Degree> Sum for Polynomial<D> {
    /// Folds with `+`; an empty iterator sums to the zero polynomial.
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|acc, p| &acc + &p).unwrap_or_default()
    }
}

impl<'a, D: Degree> Sum<&'a Polynomial<D>> for Polynomial<D> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.cloned().sum()
    }
}
