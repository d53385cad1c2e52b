#![cfg_attr(not(feature = "std"), no_std)]
//! Single-variable Laurent polynomials over `f64` with signed degrees.
//!
//! A [`Polynomial`] stores an ascending list of [`Term`]s together with an
//! inclusive `[trailing, leading]` degree range. The list can be *dense* (one
//! term per degree in the range) or *sparse* (absent degrees are zero);
//! [`Polynomial::densify`] and [`Polynomial::simplify`] move between the two.

#[macro_use]
extern crate ark_std;

pub mod degree;
mod error;
mod polynomial;
mod term;

pub use degree::Degree;
pub use error::PolynomialError;
pub use polynomial::Polynomial;
pub use term::Term;
