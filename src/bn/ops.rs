// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/ops.rs
//
// Full ordered-field arithmetic: + - * / %, reciprocal, negation,
// log/exp in bases 2/10/e, Pow, Floor, increment/decrement.
//
// Addition and subtraction work in log-space so they stay meaningful
// across every letter: `log10(a +/- b)` is recovered from
// `log10(a)`, `log10(b)`, and a correction term, then exponentiated
// back. Multiplication and division are log-space by construction
// (`log10(a*b) = log10(a) + log10(b)`).

use super::Bn;
use crate::error::BnError;
use crate::hpf::Hpf;

impl Bn {
    /// Flips the sign bit. Total: also negates NaN, `+-0`, and `+-inf`.
    pub fn neg(&self) -> Bn {
        let (n, r, l, i, f) = self.fields();
        Bn::from_word(super::codec::pack(!n, r, l, i, f))
    }

    pub fn abs(&self) -> Bn {
        if self.is_nan() {
            return *self;
        }
        let (_, r, l, i, f) = self.fields();
        Bn::from_word(super::codec::pack(false, r, l, i, f))
    }

    /// `1 / self`. Flips the reciprocal bit in place rather than
    /// re-deriving through HPF, so it is exact even past letter 7.
    pub fn reciprocal(&self) -> Bn {
        if self.is_nan() {
            return Bn::nan();
        }
        if self.is_zero() {
            let (n, ..) = self.fields();
            return if n { Bn::negative_infinity() } else { Bn::positive_infinity() };
        }
        if self.is_infinity() {
            let (n, ..) = self.fields();
            return if n { Bn::neg_zero() } else { Bn::zero() };
        }
        let (n, r, l, i, f) = self.fields();
        Bn::from_word(super::codec::pack(n, !r, l, i, f))
    }

    pub fn log10(&self) -> Bn {
        if self.is_nan() || self.is_negative() || self.is_zero() {
            return Bn::nan();
        }
        if self.is_negative_infinity() {
            // Spec-chosen: treat log10(-inf) as 0 rather than NaN; see
            // the design notes' open question on this exact behavior.
            return Bn::zero();
        }
        if self.is_positive_infinity() {
            return Bn::positive_infinity();
        }

        let (n, r, l, i, f) = self.fields();
        debug_assert!(!n);
        if r {
            return self.reciprocal().log10().neg();
        }

        if l < 5 {
            return Bn::from_hpf(&crate::stl::safe_log10_or_nan(&self.to_hpf()));
        }

        let o = super::codec::decode_operand(i, f);
        if l == 5 {
            return Bn::from_hpf(&o);
        }
        if l == 6 {
            let reduced = &o - &Hpf::one();
            if reduced < Hpf::from_i64(2) {
                return Bn::from_hpf(&crate::stl::safe_exp10(&(&reduced - &Hpf::one())));
            }
            let (ri, rf) = super::codec::encode_operand(&reduced);
            return Bn::from_word(super::codec::pack(false, false, 6, ri, rf));
        }

        // l == 7 (or an unassigned reserved letter): renormalize through
        // LetterJToLetterG, stepping down toward letter 6 when possible.
        let g = crate::htl::letter_j_to_letter_g(&o);
        if g < Hpf::from_i64(3) {
            let f_operand = crate::htl::letter_g_to_letter_j(&g);
            return Bn::from_hpf(&crate::htl::letter_f(&f_operand));
        }
        let renorm = crate::stl::safe_log10_or_nan(&crate::htl::super_log10(&g));
        let (ri, rf) = super::codec::encode_operand(&renorm);
        Bn::from_word(super::codec::pack(false, false, 7, ri, rf))
    }

    pub fn exp10(&self) -> Bn {
        if self.is_nan() {
            return Bn::nan();
        }
        if self.is_negative() {
            return self.neg().exp10().reciprocal();
        }
        if self.is_positive_infinity() {
            return Bn::positive_infinity();
        }
        if self.is_zero() {
            return Bn::one();
        }

        let (_, r, l, i, f) = self.fields();
        if l < 5 || r {
            return Bn::from_hpf(&crate::stl::safe_exp10(&self.to_hpf()));
        }

        let o = super::codec::decode_operand(i, f);
        if l == 5 {
            let next = &Hpf::from_i64(2) + &crate::stl::safe_log10_or_nan(&o);
            let (ri, rf) = super::codec::encode_operand(&next);
            return Bn::from_word(super::codec::pack(false, false, 6, ri, rf));
        }
        if l == 6 {
            if o < Hpf::from_i64(9) {
                let next = &o + &Hpf::one();
                let (ri, rf) = super::codec::encode_operand(&next);
                return Bn::from_word(super::codec::pack(false, false, 6, ri, rf));
            }
            let inner = crate::htl::super_log10(&(&o + &Hpf::one()));
            let j = &Hpf::from_i64(2) + &crate::stl::safe_log10_or_nan(&inner);
            let next = crate::htl::letter_g_to_letter_j(&j);
            let (ri, rf) = super::codec::encode_operand(&next);
            return Bn::from_word(super::codec::pack(false, false, 7, ri, rf));
        }

        // l == 7: push further up the tower; saturate if HPF can't hold
        // the intermediate LetterF value.
        let g = crate::htl::letter_j_to_letter_g(&o);
        let grown = &g + &Hpf::one();
        if !grown.is_finite() {
            return Bn::positive_infinity();
        }
        let next = crate::htl::letter_g_to_letter_j(&grown);
        let (ri, rf) = super::codec::encode_operand(&next);
        Bn::from_word(super::codec::pack(false, false, 7, ri, rf))
    }

    pub fn log2(&self) -> Bn {
        self.log10().mul(&Bn::from_hpf(&log2_10()))
    }

    pub fn exp2(&self) -> Bn {
        self.mul(&Bn::from_hpf(&log10_2())).exp10()
    }

    pub fn ln(&self) -> Bn {
        self.log10().mul(&Bn::from_hpf(&crate::hpf::Hpf::parse("2.302585092994045684017991454684364207601").unwrap()))
    }

    pub fn exp(&self) -> Bn {
        self.mul(&Bn::from_hpf(&crate::hpf::Hpf::parse("0.4342944819032518276511289189166050822944").unwrap())).exp10()
    }

    pub fn pow(&self, exponent: &Bn) -> Bn {
        if self.is_nan() || exponent.is_nan() {
            return Bn::nan();
        }
        if exponent.is_zero() {
            return Bn::one();
        }
        if self.is_zero() {
            return if exponent.is_positive() { Bn::zero() } else { Bn::positive_infinity() };
        }
        if self.is_negative() {
            // Only integer exponents keep the result real.
            if !exponent.is_integer() {
                return Bn::nan();
            }
            let mag = self.abs().pow(exponent);
            return if exponent.is_even_integer() { mag } else { mag.neg() };
        }
        self.log10().mul(exponent).exp10()
    }

    pub fn floor(&self) -> Bn {
        if !self.is_finite() {
            return *self;
        }
        Bn::from_hpf(&self.to_hpf().floor())
    }

    pub fn increment(&self) -> Bn {
        self.add(&Bn::one())
    }

    pub fn decrement(&self) -> Bn {
        self.add(&Bn::negative_one())
    }

    pub fn add(&self, other: &Bn) -> Bn {
        if self.is_nan() || other.is_nan() {
            return Bn::nan();
        }
        if self.is_infinity() || other.is_infinity() {
            return add_infinities(self, other);
        }
        if self.is_zero() && other.is_zero() {
            let (an, ..) = self.fields();
            let (bn, ..) = other.fields();
            return if an && bn { Bn::neg_zero() } else { Bn::zero() };
        }
        if self.is_zero() {
            return *other;
        }
        if other.is_zero() {
            return *self;
        }

        // Direct HPF arithmetic is the fast, common path and terminates
        // without any further BN-level recursion. Log-space only kicks
        // in once a direct sum would overflow HPF's own range, which in
        // practice means both operands are already near the letter 6/7
        // boundary.
        let a = self.to_hpf();
        let b = other.to_hpf();
        if a.is_finite() && b.is_finite() {
            let direct = &a + &b;
            if direct.is_finite() {
                return Bn::from_hpf(&direct);
            }
        }

        // Order so `big` has the larger magnitude.
        let (big, small) = if self.abs() >= other.abs() { (self, other) } else { (other, self) };
        let (bn_sign, ..) = big.fields();
        let (sm_sign, ..) = small.fields();

        if bn_sign != sm_sign {
            return subtract_magnitudes(big, small);
        }
        add_same_sign(big, small)
    }

    pub fn sub(&self, other: &Bn) -> Bn {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Bn) -> Bn {
        if self.is_nan() || other.is_nan() {
            return Bn::nan();
        }
        if (self.is_zero() && other.is_infinity()) || (self.is_infinity() && other.is_zero()) {
            return Bn::nan();
        }
        if self.is_zero() || other.is_zero() {
            return if self.is_negative() != other.is_negative() { Bn::neg_zero() } else { Bn::zero() };
        }
        if self.is_infinity() || other.is_infinity() {
            return if self.is_negative() != other.is_negative() { Bn::negative_infinity() } else { Bn::positive_infinity() };
        }

        let negative = self.is_negative() != other.is_negative();
        let sum_log = self.abs().log10().add(&other.abs().log10());
        let mag = sum_log.exp10();
        if negative { mag.neg() } else { mag }
    }

    pub fn div(&self, other: &Bn) -> Bn {
        if self.is_nan() || other.is_nan() {
            return Bn::nan();
        }
        if other.is_zero() {
            if self.is_zero() {
                return Bn::nan();
            }
            let (bn, ..) = other.fields();
            let negative = self.is_negative() != bn;
            return if negative { Bn::negative_infinity() } else { Bn::positive_infinity() };
        }
        if other.is_infinity() {
            return if self.is_infinity() { Bn::nan() } else { zero_signed(self.is_negative() != other.is_negative()) };
        }
        if self.is_zero() {
            return zero_signed(self.is_negative() != other.is_negative());
        }
        if self.is_infinity() {
            let negative = self.is_negative() != other.is_negative();
            return if negative { Bn::negative_infinity() } else { Bn::positive_infinity() };
        }
        if self == other {
            return Bn::one();
        }

        let negative = self.is_negative() != other.is_negative();
        let diff_log = self.abs().log10().sub(&other.abs().log10());
        let mag = diff_log.exp10();
        if negative { mag.neg() } else { mag }
    }

    pub fn rem(&self, other: &Bn) -> Result<Bn, BnError> {
        if other.is_zero() {
            return Err(BnError::DivisionByZero);
        }
        if self.is_nan() || other.is_nan() || self.is_infinity() {
            return Ok(Bn::nan());
        }
        let q = self.div(other).floor();
        Ok(self.sub(&other.mul(&q)))
    }
}

// Operator overloads, by value, delegating straight to the named
// methods above -- same pattern as the teacher's `Rational`
// (`rational/ops.rs`'s `impl Add/Sub/Mul/Neg for Rational`, each
// delegating to an `_exact` method). `%` is deliberately left off this
// list: its zero-divisor case is a fatal `BnError`, which doesn't fit
// `std::ops::Rem`'s infallible signature, so it stays a named method.
impl std::ops::Add for Bn {
    type Output = Bn;
    fn add(self, rhs: Bn) -> Bn {
        Bn::add(&self, &rhs)
    }
}

impl std::ops::Sub for Bn {
    type Output = Bn;
    fn sub(self, rhs: Bn) -> Bn {
        Bn::sub(&self, &rhs)
    }
}

impl std::ops::Mul for Bn {
    type Output = Bn;
    fn mul(self, rhs: Bn) -> Bn {
        Bn::mul(&self, &rhs)
    }
}

impl std::ops::Div for Bn {
    type Output = Bn;
    fn div(self, rhs: Bn) -> Bn {
        Bn::div(&self, &rhs)
    }
}

impl std::ops::Neg for Bn {
    type Output = Bn;
    fn neg(self) -> Bn {
        Bn::neg(&self)
    }
}

fn zero_signed(negative: bool) -> Bn {
    if negative { Bn::neg_zero() } else { Bn::zero() }
}

fn log2_10() -> Hpf {
    Hpf::parse("3.3219280948873623478703194294893901758649").unwrap()
}

fn log10_2() -> Hpf {
    Hpf::parse("0.3010299956639811952137388947244930267682").unwrap()
}

fn add_infinities(a: &Bn, b: &Bn) -> Bn {
    let a_inf = a.is_infinity();
    let b_inf = b.is_infinity();
    if a_inf && b_inf {
        return if a.is_negative() == b.is_negative() { *a } else { Bn::nan() };
    }
    if a_inf { *a } else { *b }
}

/// `log10(a + b)` for same-signed `big`/`small`, via
/// `log10(big) + log10(1 + 10^(log10(small) - log10(big)))`.
fn add_same_sign(big: &Bn, small: &Bn) -> Bn {
    let big_abs = big.abs();
    let small_abs = small.abs();
    let log_big = big_abs.log10();
    let log_small = small_abs.log10();
    let ratio_log = log_small.sub(&log_big).exp10();
    let correction = Bn::one().add(&ratio_log);
    if correction.is_infinity() || correction.is_nan() {
        return *big;
    }
    let log_sum = log_big.add(&correction.log10());
    let mag = log_sum.exp10();
    if big.is_negative() { mag.neg() } else { mag }
}

/// `log10(a - b)` for oppositely-signed `big`/`small` (`small` already
/// known smaller in magnitude), via
/// `log10(big) + log10(1 - 10^(log10(small) - log10(big)))`.
fn subtract_magnitudes(big: &Bn, small: &Bn) -> Bn {
    let big_abs = big.abs();
    let small_abs = small.abs();
    if big_abs == small_abs {
        return Bn::zero();
    }
    let log_big = big_abs.log10();
    let log_small = small_abs.log10();
    let ratio_log = log_small.sub(&log_big).exp10();
    let correction = Bn::one().sub(&ratio_log);
    if correction.is_infinity() || correction.is_nan() || correction.is_zero() {
        return if correction.is_zero() { Bn::zero() } else { *big };
    }
    let log_diff = log_big.add(&correction.log10());
    let mag = log_diff.exp10();
    if big.is_negative() { mag.neg() } else { mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: &Bn, expected: f64, tol: f64) {
        let got = a.to_f64();
        assert!((got - expected).abs() < tol, "expected {expected}, got {got}");
    }

    #[test]
    fn basic_arithmetic() {
        approx(&Bn::from_f64(2.0).add(&Bn::from_f64(3.0)), 5.0, 1e-6);
        approx(&Bn::from_f64(5.0).sub(&Bn::from_f64(2.0)), 3.0, 1e-6);
        approx(&Bn::from_f64(4.0).mul(&Bn::from_f64(5.0)), 20.0, 1e-6);
        approx(&Bn::from_f64(10.0).div(&Bn::from_f64(2.0)), 5.0, 1e-6);
    }

    #[test]
    fn signed_multiplication() {
        approx(&Bn::from_f64(-2.0).mul(&Bn::from_f64(-3.0)), 6.0, 1e-6);
        approx(&Bn::from_f64(-4.0).mul(&Bn::from_f64(5.0)), -20.0, 1e-6);
    }

    #[test]
    fn division_by_zero_and_identities() {
        assert!(Bn::from_f64(10.0).div(&Bn::zero()).is_positive_infinity());
        assert!(Bn::zero().div(&Bn::from_f64(5.0)).is_zero());
        approx(&Bn::from_f64(7.0).add(&Bn::zero()), 7.0, 1e-9);
    }

    #[test]
    fn infinity_arithmetic() {
        assert_eq!(Bn::positive_infinity().add(&Bn::one()), Bn::positive_infinity());
        assert!(Bn::positive_infinity().sub(&Bn::positive_infinity()).is_nan());
        assert!(Bn::positive_infinity().mul(&Bn::zero()).is_nan());
        assert!(Bn::nan().add(&Bn::from_f64(5.0)).is_nan());
    }

    #[test]
    fn log10_exp10_roundtrip() {
        approx(&Bn::from_f64(100.0).log10(), 2.0, 1e-6);
        approx(&Bn::from_f64(10.0).log10(), 1.0, 1e-6);
        approx(&Bn::from_f64(20.0).log10().exp10(), 20.0, 1e-4);
        approx(&Bn::from_f64(10.0).exp10(), 1e10, 1e6);
    }

    #[test]
    fn modulus() {
        let a = Bn::from_f64(10.0);
        let b = Bn::from_f64(3.0);
        let r = a.rem(&b).unwrap();
        approx(&r, 1.0, 1e-6);
        assert_eq!(Bn::from_f64(10.0).rem(&Bn::zero()), Err(BnError::DivisionByZero));
    }

    #[test]
    fn reciprocal_roundtrip() {
        let x = Bn::from_f64(7.0);
        approx(&x.reciprocal().reciprocal(), 7.0, 1e-9);
    }

    #[test]
    fn operator_overloads_match_named_methods() {
        let a = Bn::from_f64(4.0);
        let b = Bn::from_f64(5.0);
        approx(&(a + b), 9.0, 1e-9);
        approx(&(a - b), -1.0, 1e-9);
        approx(&(a * b), 20.0, 1e-9);
        approx(&(a / b), 0.8, 1e-9);
        approx(&(-a), -4.0, 1e-9);
    }
}
