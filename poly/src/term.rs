use ark_std::ops::{Mul, MulAssign, Neg};
use serde::{Deserialize, Serialize};

use crate::{
    error::{DEGREE_MISMATCH, ZERO_DIVISION},
    Degree, PolynomialError,
};

/// A single `coefficient * x^degree` summand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Term<D: Degree = i16> {
    pub coefficient: f64,
    pub degree: D,
}

impl<D: Degree> Term<D> {
    pub fn new(coefficient: f64, degree: D) -> Self {
        Self {
            coefficient,
            degree,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient == 0.0
    }

    /// Divides the coefficient by `scalar`, failing on a zero divisor.
    pub fn try_div_assign(&mut self, scalar: f64) -> Result<(), PolynomialError<D>> {
        if scalar == 0.0 {
            return Err(PolynomialError::arithmetic("/=", ZERO_DIVISION));
        }
        self.coefficient /= scalar;
        Ok(())
    }

    pub fn checked_div(mut self, scalar: f64) -> Result<Self, PolynomialError<D>> {
        self.try_div_assign(scalar)?;
        Ok(self)
    }

    /// Adds `other` in place. Both terms must have the same degree.
    pub fn try_add_assign(&mut self, other: &Self) -> Result<(), PolynomialError<D>> {
        self.combine_assign(other, "+=", |a, b| *a += b)
    }

    /// Subtracts `other` in place. Both terms must have the same degree.
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<(), PolynomialError<D>> {
        self.combine_assign(other, "-=", |a, b| *a -= b)
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self, PolynomialError<D>> {
        let mut sum = *self;
        sum.combine_assign(other, "+", |a, b| *a += b)?;
        Ok(sum)
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self, PolynomialError<D>> {
        let mut diff = *self;
        diff.combine_assign(other, "-", |a, b| *a -= b)?;
        Ok(diff)
    }

    fn combine_assign(
        &mut self,
        other: &Self,
        op: &'static str,
        f: impl FnOnce(&mut f64, f64),
    ) -> Result<(), PolynomialError<D>> {
        if self.degree != other.degree {
            return Err(PolynomialError::arithmetic(op, DEGREE_MISMATCH));
        }
        f(&mut self.coefficient, other.coefficient);
        Ok(())
    }
}

impl<D: Degree> MulAssign<f64> for Term<D> {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.coefficient *= scalar;
    }
}

impl<D: Degree> Mul<f64> for Term<D> {
    type Output = Self;

    #[inline]
    fn mul(mut self, scalar: f64) -> Self {
        self *= scalar;
        self
    }
}

impl<D: Degree> Neg for Term<D> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.coefficient, self.degree)
    }
}

impl<D: Degree> From<(f64, D)> for Term<D> {
    fn from((coefficient, degree): (f64, D)) -> Self {
        Self::new(coefficient, degree)
    }
}
