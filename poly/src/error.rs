use thiserror::Error;

use crate::Degree;

pub(crate) const ZERO_DIVISION: &str = "zero division";
pub(crate) const DEGREE_MISMATCH: &str = "two terms of different degree cannot be combined";
pub(crate) const NOT_CONSTANT: &str = "polynomial must be a monomial with exponent 0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError<D: Degree> {
    /// A degree range was given with its lower bound above its upper bound.
    #[error("trailing degree {lower} must not exceed leading degree {upper}")]
    Bounds { lower: D, upper: D },
    /// `op` names the attempted operator, e.g. `"+="` or `"/"`.
    #[error("{op}: {reason}")]
    Arithmetic {
        op: &'static str,
        reason: &'static str,
    },
    #[error("{0} was not found in the polynomial")]
    ExponentNotFound(D),
    #[error("stored terms at indices {index} and {} are not in ascending degree order", .index + 1)]
    Representation { index: usize },
    /// A derived degree does not fit in `D`.
    #[error("degree range overflows the degree type")]
    DegreeOverflow,
}

impl<D: Degree> PolynomialError<D> {
    pub(crate) fn arithmetic(op: &'static str, reason: &'static str) -> Self {
        Self::Arithmetic { op, reason }
    }
}
