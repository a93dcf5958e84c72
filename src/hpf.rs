// bignum96: a 96-bit extreme-range numeric type
// 2024

// hpf.rs
//
// The high-precision float substrate (HPF)
//
// BN is built on top of an IEEE-754 binary128-shaped float: 113 bits of
// mantissa, unbounded (for our purposes) exponent range. Rust has no
// native binary128, so this module realizes HPF as a thin, fixed-precision
// newtype over `rug::Float`, MPFR-backed the way the rest of this crate's
// `Rational` type already is (see `math.rs`/`mpfr.rs`). Everything above
// this module reaches HPF only through the boundary operations defined
// here -- arithmetic, `floor`/`round`/`abs`, `ilogb`/`scaleb`,
// fused-multiply-add, predicates, parsing/formatting, and the constants
// `0`, `1`, `e`, `pi`, `tau` -- never `rug::Float` directly.

use std::cmp::Ordering;
use std::fmt;

use rug::float::{Constant, Special};
use rug::ops::CompleteRound;
use rug::Float;

/// Mantissa precision of the HPF substrate, in bits: binary128's 113.
pub const PREC: u32 = 113;

/// A high-precision float: the external numeric substrate BN is encoded
/// and decoded against. Finite arithmetic, ordered comparison (NaN
/// compares unordered, per IEEE 754), and a handful of named operations.
#[derive(Clone, Debug)]
pub struct Hpf(Float);

impl Hpf {
    pub fn zero() -> Self {
        Hpf(Float::with_val(PREC, Special::Zero))
    }

    pub fn neg_zero() -> Self {
        Hpf(Float::with_val(PREC, Special::NegZero))
    }

    pub fn one() -> Self {
        Hpf(Float::with_val(PREC, 1))
    }

    pub fn nan() -> Self {
        Hpf(Float::with_val(PREC, Special::Nan))
    }

    pub fn infinity() -> Self {
        Hpf(Float::with_val(PREC, Special::Infinity))
    }

    pub fn neg_infinity() -> Self {
        Hpf(Float::with_val(PREC, Special::NegInfinity))
    }

    pub fn e() -> Self {
        Hpf(Float::with_val(PREC, 1u32).exp())
    }

    pub fn pi() -> Self {
        Hpf(Float::with_val(PREC, Constant::Pi))
    }

    pub fn tau() -> Self {
        Hpf(Float::with_val(PREC, Constant::Pi) * Float::with_val(PREC, 2u32))
    }

    pub fn from_f64(val: f64) -> Self {
        Hpf(Float::with_val(PREC, val))
    }

    pub fn from_i64(val: i64) -> Self {
        Hpf(Float::with_val(PREC, val))
    }

    pub fn from_u64(val: u64) -> Self {
        Hpf(Float::with_val(PREC, val))
    }

    /// Exact power of two, `2^exp`, for `exp` small enough to stay finite.
    pub fn exp2_int(exp: i32) -> Self {
        Hpf::one().scaleb(exp)
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }

    /// Exact conversion for a non-negative integral HPF value that fits in
    /// a `u128`. Used by the bit codec, which only ever calls this on
    /// values it has already floored.
    pub fn to_u128(&self) -> u128 {
        self.0
            .to_integer()
            .and_then(|i| u128::try_from(&i).ok())
            .expect("to_u128 called on a non-integral or out-of-range HPF value")
    }

    pub fn from_u128(val: u128) -> Self {
        Hpf(Float::with_val(PREC, rug::Integer::from(val)))
    }

    pub fn abs(&self) -> Self {
        Hpf(self.0.clone().abs())
    }

    pub fn floor(&self) -> Self {
        Hpf(self.0.clone().floor())
    }

    pub fn round(&self) -> Self {
        Hpf(self.0.clone().round())
    }

    /// `floor(log2(|x|))`. Well-defined only for finite, non-zero `x`.
    pub fn ilogb(&self) -> i32 {
        self.0.get_exp().expect("ilogb is only defined for finite, non-zero values") - 1
    }

    /// `x * 2^n`, computed exactly (subject to HPF's own exponent range).
    pub fn scaleb(&self, n: i32) -> Self {
        if n >= 0 {
            Hpf(self.0.clone() << (n as u32))
        } else {
            Hpf(self.0.clone() >> ((-n) as u32))
        }
    }

    /// `self * mul + add`, rounded once.
    pub fn fma(&self, mul: &Hpf, add: &Hpf) -> Self {
        Hpf(self.0.clone().mul_add(&mul.0, &add.0))
    }

    pub fn is_nan(&self) -> bool {
        self.0.is_nan()
    }

    pub fn is_infinite(&self) -> bool {
        self.0.is_infinite()
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        !self.is_nan() && self.0.is_sign_positive() && !self.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_nan() && self.0.is_sign_negative() && !self.is_zero()
    }

    pub fn is_sign_negative(&self) -> bool {
        self.0.is_sign_negative()
    }

    pub fn neg(&self) -> Self {
        Hpf(-self.0.clone())
    }

    pub fn parse(src: &str) -> Result<Self, String> {
        let incomplete = Float::parse(src.trim()).map_err(|e| e.to_string())?;
        Ok(Hpf(incomplete.complete(PREC)))
    }

    /// Decimal rendering rounded to `digits` significant figures, rather
    /// than `Display`'s full 113-bit expansion. Used wherever a value
    /// has passed through a lossy fixed-point encoding (the 96-bit
    /// word's 85-bit fraction) that carries far fewer significant
    /// digits than HPF itself: without rounding, the noise below that
    /// encoding's resolution shows up as a string of trailing 9s or 0s.
    pub fn to_significant_digits(&self, digits: usize) -> String {
        let s = self.0.to_string_radix(10, Some(digits));
        let (mantissa, rest) = match s.find(['e', 'E', '@']) {
            Some(pos) => (&s[..pos], &s[pos..]),
            None => (s.as_str(), ""),
        };
        if !mantissa.contains('.') {
            return s;
        }
        let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed}{rest}")
    }
}

impl fmt::Display for Hpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Hpf {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Hpf {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

macro_rules! bin_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl std::ops::$trait for &Hpf {
            type Output = Hpf;
            fn $method(self, rhs: &Hpf) -> Hpf {
                Hpf(Float::with_val(PREC, &self.0 $op &rhs.0))
            }
        }

        impl std::ops::$trait for Hpf {
            type Output = Hpf;
            fn $method(self, rhs: Hpf) -> Hpf {
                &self $op &rhs
            }
        }
    };
}

bin_op!(Add, add, +);
bin_op!(Sub, sub, -);
bin_op!(Mul, mul, *);
bin_op!(Div, div, /);

impl std::ops::Neg for &Hpf {
    type Output = Hpf;
    fn neg(self) -> Hpf {
        Hpf::neg(self)
    }
}

impl std::ops::Neg for Hpf {
    type Output = Hpf;
    fn neg(self) -> Hpf {
        Hpf::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Hpf::from_f64(2.0);
        let b = Hpf::from_f64(3.0);
        assert_eq!((&a + &b).to_f64(), 5.0);
        assert_eq!((&b - &a).to_f64(), 1.0);
        assert_eq!((&a * &b).to_f64(), 6.0);
        assert_eq!((&b / &a).to_f64(), 1.5);
    }

    #[test]
    fn scaleb_and_ilogb() {
        let a = Hpf::from_f64(3.0);
        assert_eq!(a.ilogb(), 1);
        let scaled = a.scaleb(4);
        assert_eq!(scaled.to_f64(), 48.0);
        assert_eq!(scaled.scaleb(-4).to_f64(), 3.0);
    }

    #[test]
    fn special_values() {
        assert!(Hpf::nan().is_nan());
        assert!(Hpf::infinity().is_infinite());
        assert!(Hpf::zero().is_zero());
        assert!(!Hpf::zero().is_positive());
        assert!(!Hpf::zero().is_negative());
    }

    #[test]
    fn constants() {
        assert!((Hpf::e().to_f64() - std::f64::consts::E).abs() < 1e-12);
        assert!((Hpf::pi().to_f64() - std::f64::consts::PI).abs() < 1e-12);
        assert!((Hpf::tau().to_f64() - std::f64::consts::TAU).abs() < 1e-12);
    }
}
