// bignum96: a 96-bit extreme-range numeric type
// 2024

// error.rs
//
// Fatal failure modes raised to the caller (see spec section on error
// handling design). Domain violations inside otherwise-total arithmetic
// and magnitude saturation are handled separately as value-encoded
// NaN/infinity/zero and never appear here.

use std::fmt;

/// A fatal error raised by a BN operation that has no sensible
/// value-encoded result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BnError {
    /// `%` with a zero right-hand side.
    DivisionByZero,
    /// `Factorial` called on a negative argument.
    FactorialDomain,
    /// A safe transcendental (`SafeLog2` and friends) called on a
    /// non-positive argument.
    LogDomain,
    /// `Parse` given a string that is neither a plain HPF literal nor a
    /// `<sig>e<exp>` scientific literal.
    ParseFormat(String),
}

impl fmt::Display for BnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BnError::DivisionByZero => write!(f, "division by zero"),
            BnError::FactorialDomain => write!(f, "factorial is undefined for negative arguments"),
            BnError::LogDomain => write!(f, "logarithm is undefined for non-positive arguments"),
            BnError::ParseFormat(s) => write!(f, "could not parse \"{s}\" as a number"),
        }
    }
}

impl std::error::Error for BnError {}
