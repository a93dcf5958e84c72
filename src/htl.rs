// bignum96: a 96-bit extreme-range numeric type
// 2024

// htl.rs
//
// Hyper-transcendentals layer (HTL): the piecewise super-logarithm and
// the LetterF/LetterG/LetterJ growth functions used to reach past
// ordinary iterated exponentiation, at letter 7 and in the boundary
// logic between letters. Built entirely on STL; never touches HPF's
// arithmetic directly.
//
// Inputs here are always "operand-like" scalars -- single- or
// low-double-digit magnitude -- never the astronomical quantities BN
// itself can represent. The towers these functions build (exp10 of
// exp10 of exp10...) stay inside HPF's own exponent range precisely
// because their arguments are kept small by construction.

use crate::hpf::Hpf;
use crate::stl::{safe_exp10, safe_log10_or_nan};

fn one() -> Hpf {
    Hpf::one()
}

fn two() -> Hpf {
    Hpf::from_i64(2)
}

fn ten() -> Hpf {
    Hpf::from_i64(10)
}

fn ten_e10() -> Hpf {
    // 1e10, the boundary between SuperLog10's two upper branches.
    Hpf::parse("1e10").expect("literal")
}

/// The piecewise super-logarithm: how many times `log10` must be
/// applied to bring `v` down into `[1, 10)`, fractionally interpolated
/// below 1.
pub fn super_log10(v: &Hpf) -> Hpf {
    if v.is_nan() {
        return Hpf::nan();
    }
    if *v < Hpf::zero() {
        return &safe_exp10(v) - &two();
    }
    if *v < one() {
        return v - &one();
    }
    if *v < ten() {
        return safe_log10_or_nan(v);
    }
    if *v < ten_e10() {
        return &one() + &safe_log10_or_nan(&safe_log10_or_nan(v));
    }
    &two() + &safe_log10_or_nan(&safe_log10_or_nan(&safe_log10_or_nan(v)))
}

/// Inverse-flavored growth function: one level of iterated
/// exponentiation above [`super_log10`]'s reduction.
pub fn letter_f(v: &Hpf) -> Hpf {
    if v.is_nan() {
        return Hpf::nan();
    }
    let neg_one = -one();
    if *v < neg_one {
        return safe_log10_or_nan(&(v + &two()));
    }
    if *v < Hpf::zero() {
        return v + &one();
    }
    if *v < one() {
        return safe_exp10(v);
    }
    if *v < two() {
        return safe_exp10(&safe_exp10(&(v - &one())));
    }
    safe_exp10(&safe_exp10(&safe_exp10(&(v - &two()))))
}

/// One tower level above [`letter_f`]: composes `letter_f` with itself
/// for the mid and high branches, and [`super_log10`] for the low one.
pub fn letter_g(v: &Hpf) -> Hpf {
    if v.is_nan() {
        return Hpf::nan();
    }
    let neg_one = -one();
    if *v < neg_one {
        return super_log10(&(v + &two()));
    }
    if *v < Hpf::zero() {
        return v + &one();
    }
    if *v < one() {
        return letter_f(v);
    }
    if *v < two() {
        return letter_f(&letter_f(&(v - &one())));
    }
    letter_f(&letter_f(&letter_f(&(v - &two()))))
}

/// Recursion depth guard for the approximate [`letter_j_to_letter_g`] /
/// [`letter_g_to_letter_j`] bijections: in practice these are only ever
/// called with single-digit operands, so a depth this deep means the
/// caller has handed us something pathological rather than a genuine
/// letter-7 boundary value.
const MAX_TOWER_DEPTH: u32 = 1024;

/// Approximate inverse of [`letter_g_to_letter_j`]. Exact below `v = 3`;
/// above that it composes through `letter_g`, one tower level per unit
/// of `v`, and is intentionally imprecise at scale (see design notes).
pub fn letter_j_to_letter_g(v: &Hpf) -> Hpf {
    letter_j_to_letter_g_rec(v, 0)
}

fn letter_j_to_letter_g_rec(v: &Hpf, depth: u32) -> Hpf {
    if v.is_nan() {
        return Hpf::nan();
    }
    if *v < two() {
        return v.clone();
    }
    if *v < Hpf::from_i64(3) {
        return &two() * &crate::stl::safe_pow(&Hpf::from_i64(5), &(v - &two())).unwrap_or_else(|_| Hpf::nan());
    }
    if depth >= MAX_TOWER_DEPTH {
        return Hpf::infinity();
    }
    let reduced = letter_j_to_letter_g_rec(&(v - &one()), depth + 1);
    letter_g(&(&reduced * &two()))
}

/// Approximate inverse of [`letter_j_to_letter_g`]. Exact below `v = 2`;
/// above that it peels one tower level per call via [`super_log10`],
/// which mirrors the `letter_g`-based construction on the way up.
pub fn letter_g_to_letter_j(v: &Hpf) -> Hpf {
    letter_g_to_letter_j_rec(v, 0)
}

fn letter_g_to_letter_j_rec(v: &Hpf, depth: u32) -> Hpf {
    if v.is_nan() {
        return Hpf::nan();
    }
    if *v < two() {
        return v.clone();
    }
    if *v < ten() {
        let ratio = v / &two();
        let log5 = safe_log10_or_nan(&ratio) / safe_log10_or_nan(&Hpf::from_i64(5));
        return &two() + &log5;
    }
    if depth >= MAX_TOWER_DEPTH {
        return Hpf::infinity();
    }
    &one() + &letter_g_to_letter_j_rec(&super_log10(v), depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_log10_matches_known_values() {
        assert!((super_log10(&Hpf::from_f64(5.0)).to_f64() - 5.0f64.log10()).abs() < 1e-9);
        assert!((super_log10(&Hpf::from_f64(0.5)).to_f64() - (-0.5)).abs() < 1e-9);
    }

    #[test]
    fn letter_f_and_super_log10_are_rough_inverses() {
        let v = Hpf::from_f64(0.5);
        let up = letter_f(&v);
        let back = super_log10(&up);
        assert!((back.to_f64() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn letter_g_matches_letter_f_below_one() {
        let v = Hpf::from_f64(0.3);
        assert!((letter_g(&v).to_f64() - letter_f(&v).to_f64()).abs() < 1e-12);
    }

    #[test]
    fn letter_j_to_letter_g_exact_below_three() {
        let v = Hpf::from_f64(1.0);
        assert_eq!(letter_j_to_letter_g(&v).to_f64(), 1.0);
        let v = Hpf::from_f64(2.5);
        let expect = 2.0 * 5f64.powf(0.5);
        assert!((letter_j_to_letter_g(&v).to_f64() - expect).abs() < 1e-6);
    }

    #[test]
    fn letter_g_to_letter_j_exact_below_two() {
        let v = Hpf::from_f64(1.5);
        assert_eq!(letter_g_to_letter_j(&v).to_f64(), 1.5);
    }
}
