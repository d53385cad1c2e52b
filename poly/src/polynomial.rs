use ark_std::{cfg_iter_mut, fmt, ops::Deref, vec::*};
use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    degree::{binary_search, degrees, offset, range_size},
    error::{NOT_CONSTANT, ZERO_DIVISION},
    Degree, PolynomialError, Term,
};

mod ops;

/// A Laurent polynomial with an inclusive `[trailing, leading]` degree range.
///
/// `terms` is kept in ascending degree order. It is either dense (one term for
/// each degree in the range, zeros included) or sparse (absent degrees are
/// zero). Equality is structural: two polynomials are equal when their stored
/// terms are, so a sparse and a dense form of the same value compare unequal
/// until both are brought to the same shape with [`Polynomial::densify`] or
/// [`Polynomial::simplify`]. The bounds take no part in equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawPolynomial<D>")]
pub struct Polynomial<D: Degree = i16> {
    terms: Vec<Term<D>>,
    trailing: D,
    leading: D,
}

#[derive(Deserialize)]
struct RawPolynomial<D: Degree> {
    terms: Vec<Term<D>>,
    trailing: D,
    leading: D,
}

impl<D: Degree> TryFrom<RawPolynomial<D>> for Polynomial<D> {
    type Error = PolynomialError<D>;

    fn try_from(raw: RawPolynomial<D>) -> Result<Self, Self::Error> {
        Self::from_terms_with_bounds(raw.terms, raw.trailing, raw.leading)
    }
}

impl<D: Degree> Polynomial<D> {
    /// The zero polynomial: a single `0 * x^0` term with bounds `(0, 0)`.
    pub fn new() -> Self {
        Self {
            terms: vec![Term::new(0.0, D::zero())],
            trailing: D::zero(),
            leading: D::zero(),
        }
    }

    /// Dense all-zero polynomial with one term per degree in `[lower, upper]`.
    pub fn with_range(lower: D, upper: D) -> Result<Self, PolynomialError<D>> {
        Self::try_zeroed(lower, upper)
    }

    /// Takes `terms` as given. The caller is responsible for them matching the
    /// declared range; nothing is sorted or filled in.
    pub fn from_terms_with_bounds(
        terms: Vec<Term<D>>,
        lower: D,
        upper: D,
    ) -> Result<Self, PolynomialError<D>> {
        if lower > upper {
            return Err(PolynomialError::Bounds { lower, upper });
        }
        Ok(Self {
            terms,
            trailing: lower,
            leading: upper,
        })
    }

    /// Sparse polynomial whose bounds are the smallest and largest degree in
    /// `terms`. An empty list gives the zero polynomial.
    pub fn from_terms(terms: Vec<Term<D>>) -> Self {
        match span(&terms) {
            Some((trailing, leading)) => Self {
                terms,
                trailing,
                leading,
            },
            None => Self::new(),
        }
    }

    /// Dense polynomial with `coeffs[i]` at degree `trailing + i`.
    pub fn from_coefficients_slice(trailing: D, coeffs: &[f64]) -> Result<Self, PolynomialError<D>> {
        if coeffs.is_empty() {
            return Ok(Self::new());
        }
        let leading = D::narrow(trailing.widen() + coeffs.len() as i128 - 1)
            .ok_or(PolynomialError::DegreeOverflow)?;
        let terms = degrees(trailing, leading)
            .zip(coeffs)
            .map(|(d, &c)| Term::new(c, d))
            .collect();
        Ok(Self {
            terms,
            trailing,
            leading,
        })
    }

    pub fn from_coefficients_vec(trailing: D, coeffs: Vec<f64>) -> Result<Self, PolynomialError<D>> {
        Self::from_coefficients_slice(trailing, &coeffs)
    }

    /// Dense all-zero polynomial over `[lower, upper]`, for ranges already
    /// known to be ordered and small enough to allocate.
    fn zeroed(lower: D, upper: D) -> Self {
        let mut terms = Vec::with_capacity(offset(lower, upper) + 1);
        terms.extend(degrees(lower, upper).map(|d| Term::new(0.0, d)));
        Self {
            terms,
            trailing: lower,
            leading: upper,
        }
    }

    /// Like [`Polynomial::zeroed`], but fails with
    /// [`PolynomialError::DegreeOverflow`] when the slots cannot be allocated.
    fn try_zeroed(lower: D, upper: D) -> Result<Self, PolynomialError<D>> {
        let len = range_size(lower, upper)?;
        let mut terms = Vec::new();
        terms
            .try_reserve_exact(len)
            .map_err(|_| PolynomialError::DegreeOverflow)?;
        terms.extend(degrees(lower, upper).map(|d| Term::new(0.0, d)));
        Ok(Self {
            terms,
            trailing: lower,
            leading: upper,
        })
    }

    pub fn term(&self, i: usize) -> Option<&Term<D>> {
        self.terms.get(i)
    }

    pub fn terms(&self) -> &[Term<D>] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term<D>> {
        self.terms
    }

    pub fn leading_degree(&self) -> D {
        self.leading
    }

    pub fn trailing_degree(&self) -> D {
        self.trailing
    }

    /// True iff exactly one term is stored, whatever its degree or coefficient.
    pub fn is_monomial(&self) -> bool {
        self.terms.len() == 1
    }

    /// Index of the stored term of degree `exponent`.
    ///
    /// The terms must be in ascending degree order; see [`Polynomial::check_order`].
    pub fn find_exponent(&self, exponent: D) -> Result<usize, PolynomialError<D>> {
        binary_search(&self.terms, exponent)
    }

    /// Coefficient of `x^degree`, zero when no such term is stored.
    pub fn coeff(&self, degree: D) -> f64 {
        self.find_exponent(degree)
            .map_or(0.0, |i| self.terms[i].coefficient)
    }

    /// Fails with [`PolynomialError::Representation`] at the first pair of
    /// neighbouring terms that is not strictly ascending by degree.
    pub fn check_order(&self) -> Result<(), PolynomialError<D>> {
        match self
            .terms
            .windows(2)
            .position(|w| w[0].degree >= w[1].degree)
        {
            Some(index) => Err(PolynomialError::Representation { index }),
            None => Ok(()),
        }
    }

    /// Drops every zero term and shrinks the bounds to the remaining ones.
    /// Never leaves the term list empty: an all-zero polynomial becomes the
    /// canonical zero polynomial.
    pub fn simplify(&mut self) {
        self.terms.retain(|t| !t.is_zero());
        match span(&self.terms) {
            Some((trailing, leading)) => {
                self.trailing = trailing;
                self.leading = leading;
            },
            None => {
                trace!("simplify: no non-zero terms left, resetting to zero polynomial");
                *self = Self::new();
            },
        }
    }

    /// Re-expands into one term per degree of the current bounds.
    pub fn densify(&mut self) -> Result<(), PolynomialError<D>> {
        self.densify_range(self.trailing, self.leading)
    }

    /// Re-windows into one term per degree of `[start, end]`, copying stored
    /// coefficients and zero-filling the rest.
    ///
    /// The window may be narrower than the current one: stored terms outside
    /// of it are dropped. On error `self` is left as it was.
    pub fn densify_range(&mut self, start: D, end: D) -> Result<(), PolynomialError<D>> {
        let len = range_size(start, end)?;
        self.check_order()?;

        let mut dense = Vec::with_capacity(len);
        let mut stored = self.terms.iter().peekable();
        let mut dropped = 0usize;
        for d in degrees(start, end) {
            let mut coefficient = 0.0;
            while let Some(t) = stored.next_if(|t| t.degree <= d) {
                if t.degree == d {
                    coefficient = t.coefficient;
                } else {
                    dropped += 1;
                }
            }
            dense.push(Term::new(coefficient, d));
        }
        dropped += stored.count();

        if dropped > 0 {
            debug!(
                "densify: dropped {} term(s) outside [{}, {}]",
                dropped, start, end
            );
        }

        self.terms = dense;
        self.trailing = start;
        self.leading = end;
        Ok(())
    }

    /// Adds `scalar` to the constant term, which must be stored.
    pub fn add_scalar_assign(&mut self, scalar: f64) -> Result<(), PolynomialError<D>> {
        let i = self.find_exponent(D::zero())?;
        self.terms[i].coefficient += scalar;
        Ok(())
    }

    /// Subtracts `scalar` from the constant term, which must be stored.
    pub fn sub_scalar_assign(&mut self, scalar: f64) -> Result<(), PolynomialError<D>> {
        let i = self.find_exponent(D::zero())?;
        self.terms[i].coefficient -= scalar;
        Ok(())
    }

    pub fn div_scalar_assign(&mut self, scalar: f64) -> Result<(), PolynomialError<D>> {
        if scalar == 0.0 {
            return Err(PolynomialError::arithmetic("/=", ZERO_DIVISION));
        }
        self.scale(|c| *c /= scalar);
        Ok(())
    }

    pub fn add_scalar(&self, scalar: f64) -> Result<Self, PolynomialError<D>> {
        let mut result = self.clone();
        result.add_scalar_assign(scalar)?;
        Ok(result)
    }

    pub fn sub_scalar(&self, scalar: f64) -> Result<Self, PolynomialError<D>> {
        let mut result = self.clone();
        result.sub_scalar_assign(scalar)?;
        Ok(result)
    }

    pub fn div_scalar(&self, scalar: f64) -> Result<Self, PolynomialError<D>> {
        if scalar == 0.0 {
            return Err(PolynomialError::arithmetic("/", ZERO_DIVISION));
        }
        let mut result = self.clone();
        result.scale(|c| *c /= scalar);
        Ok(result)
    }

    /// Compares against a constant. Only defined for a single stored term of
    /// degree zero.
    pub fn eq_scalar(&self, scalar: f64) -> Result<bool, PolynomialError<D>> {
        Ok(self.constant("==")? == scalar)
    }

    pub fn ne_scalar(&self, scalar: f64) -> Result<bool, PolynomialError<D>> {
        Ok(self.constant("!=")? != scalar)
    }

    fn constant(&self, op: &'static str) -> Result<f64, PolynomialError<D>> {
        match self.terms.as_slice() {
            [t] if t.degree.is_zero() => Ok(t.coefficient),
            _ => Err(PolynomialError::arithmetic(op, NOT_CONSTANT)),
        }
    }

    /// Evaluates the polynomial at `x`, reading negative degrees as powers of
    /// `1 / x`.
    pub fn evaluate(&self, x: f64) -> Result<f64, PolynomialError<D>> {
        let mut sum = 0.0;
        for t in &self.terms {
            let exp = t.degree.widen().unsigned_abs() as usize;
            if t.degree.is_negative() {
                if x == 0.0 {
                    if t.is_zero() {
                        continue;
                    }
                    return Err(PolynomialError::arithmetic("evaluate", ZERO_DIVISION));
                }
                sum += t.coefficient * num_traits::pow(1.0 / x, exp);
            } else {
                sum += t.coefficient * num_traits::pow(x, exp);
            }
        }
        Ok(sum)
    }

    /// Applies `f` to every stored coefficient.
    fn scale(&mut self, f: impl Fn(&mut f64) + Send + Sync) {
        cfg_iter_mut!(self.terms).for_each(|t| f(&mut t.coefficient));
    }

    /// Position of `degree` in a dense term list starting at `self.trailing`.
    fn slot(&self, degree: D) -> usize {
        offset(self.trailing, degree)
    }

    /// Smallest range holding both the declared bounds and every stored term.
    fn extent(&self) -> (D, D) {
        match span(&self.terms) {
            Some((lo, hi)) => (lo.min(self.trailing), hi.max(self.leading)),
            None => (self.trailing, self.leading),
        }
    }
}

/// Smallest and largest degree in `terms`, in any order.
fn span<D: Degree>(terms: &[Term<D>]) -> Option<(D, D)> {
    let first = terms.first()?.degree;
    Some(
        terms
            .iter()
            .fold((first, first), |(lo, hi), t| (lo.min(t.degree), hi.max(t.degree))),
    )
}

impl<D: Degree> Default for Polynomial<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Degree> PartialEq for Polynomial<D> {
    fn eq(&self, other: &Self) -> bool {
        self.terms == other.terms
    }
}

impl<D: Degree> Deref for Polynomial<D> {
    type Target = [Term<D>];

    fn deref(&self) -> &[Term<D>] {
        &self.terms
    }
}

impl<D: Degree> From<Vec<Term<D>>> for Polynomial<D> {
    fn from(terms: Vec<Term<D>>) -> Self {
        Self::from_terms(terms)
    }
}

impl<D: Degree> FromIterator<Term<D>> for Polynomial<D> {
    fn from_iter<I: IntoIterator<Item = Term<D>>>(iter: I) -> Self {
        Self::from_terms(iter.into_iter().collect())
    }
}

impl<D: Degree> fmt::Display for Polynomial<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("... + 0x^-1 + 0x^0 + 0x^1 + ...");
        }
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{:.6}x^{}", t.coefficient, t.degree)?;
        }
        Ok(())
    }
}
