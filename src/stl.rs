// bignum96: a 96-bit extreme-range numeric type
// 2024

// stl.rs
//
// Safe transcendentals layer (STL): log/exp primitives built entirely
// out of HPF's boundary contract -- arithmetic, floor/round/abs,
// ilogb/scaleb, and fused-multiply-add -- rather than delegating to a
// library transcendental. This is deliberate: HPF's contract (see
// `hpf.rs`) does not include log or exp, so anything above this layer
// that needs them goes through here.

use crate::error::BnError;
use crate::hpf::Hpf;

/// Machine epsilon for the 113-bit HPF mantissa: `2^-113`.
fn epsilon() -> Hpf {
    Hpf::exp2_int(-113)
}

/// `log(2)`, `log2(10)`, `log2(e)` to 40 decimal digits -- enough to
/// round correctly at 113 bits of precision, however the series/Newton
/// iterations below land.
fn ln2() -> Hpf {
    Hpf::parse("0.6931471805599453094172321214581765680755").unwrap()
}

fn log2_10() -> Hpf {
    Hpf::parse("3.3219280948873623478703194294893901758649").unwrap()
}

fn log2_e() -> Hpf {
    Hpf::parse("1.4426950408889634073599246810018921374266").unwrap()
}

/// `2^y` via Newton iteration, seeded from `2^floor(y)` and refined with
/// `x_{n+1} = x_n + x_n * ln2 * (y - log2(x_n))`, for up to 10 iterations.
pub fn safe_exp2(y: &Hpf) -> Hpf {
    if y.is_nan() {
        return Hpf::nan();
    }
    if y.is_infinite() {
        return if y.is_negative() { Hpf::zero() } else { Hpf::infinity() };
    }

    let y0 = y.floor().to_f64() as i32;
    let mut x = Hpf::exp2_int(y0);
    if !x.is_finite() {
        // `y` is finite but its floor already overflows HPF's
        // representable exponent range (or the `as i32` cast saturated
        // getting there) -- 2^y is always positive, so the only way
        // `exp2_int` lands non-finite here is overflow to +infinity,
        // never underflow or NaN. Saturate instead of seeding Newton
        // with an infinite `x`, which would compute `inf + (-inf)` on
        // the first iteration and return NaN.
        return Hpf::infinity();
    }
    let eps = epsilon();
    let ln2 = ln2();

    for _ in 0..10 {
        let log2x = match safe_log2(&x) {
            Ok(v) => v,
            Err(_) => return Hpf::zero(),
        };
        let delta_factor = &ln2 * &(y - &log2x);
        let delta = &x * &delta_factor;
        x = &x + &delta;
        if delta.abs() < eps {
            break;
        }
    }
    x
}

/// `log2(x)` for `x > 0`: decompose `x = m * 2^e` with `m` in `[0.5, 1)`,
/// then sum the natural-log series for `m` and convert to base 2.
pub fn safe_log2(x: &Hpf) -> Result<Hpf, BnError> {
    if x.is_nan() {
        return Ok(Hpf::nan());
    }
    if !x.is_positive() {
        return Err(BnError::LogDomain);
    }
    if x.is_infinite() {
        return Ok(Hpf::infinity());
    }

    let k = x.ilogb();
    let e = k + 1;
    let m = x.scaleb(-e);

    let eps = m.clone() - Hpf::one();
    let mut term = eps.clone();
    let mut sum = Hpf::zero();
    let mut k_term = 1i64;
    let threshold = Hpf::exp2_int(-120);

    loop {
        let contribution = &term / &Hpf::from_i64(k_term);
        sum = &sum + &contribution;
        if contribution.abs() < threshold || k_term > 200 {
            break;
        }
        term = &(-&term) * &eps;
        k_term += 1;
    }

    let ln_m = sum;
    let log2_m = &ln_m / &ln2();
    Ok(&Hpf::from_i64(e as i64) + &log2_m)
}

pub fn safe_log10(x: &Hpf) -> Result<Hpf, BnError> {
    Ok(&safe_log2(x)? / &log2_10())
}

pub fn safe_log(x: &Hpf) -> Result<Hpf, BnError> {
    Ok(&safe_log2(x)? / &log2_e())
}

pub fn safe_exp10(y: &Hpf) -> Hpf {
    safe_exp2(&(y * &log2_10()))
}

pub fn safe_exp(y: &Hpf) -> Hpf {
    safe_exp2(&(y * &log2_e()))
}

pub fn safe_pow(x: &Hpf, y: &Hpf) -> Result<Hpf, BnError> {
    Ok(safe_exp2(&(y * &safe_log2(x)?)))
}

/// Same as [`safe_log10`], but domain violations degrade to NaN rather
/// than a fatal error: for internal use by code that already reasons
/// about BN's own sign/zero special cases before reaching here.
pub(crate) fn safe_log10_or_nan(x: &Hpf) -> Hpf {
    safe_log10(x).unwrap_or_else(|_| Hpf::nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp2_matches_known_values() {
        assert!((safe_exp2(&Hpf::from_f64(10.0)).to_f64() - 1024.0).abs() < 1e-6);
        assert!((safe_exp2(&Hpf::zero()).to_f64() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn log2_matches_known_values() {
        assert!((safe_log2(&Hpf::from_f64(1024.0)).unwrap().to_f64() - 10.0).abs() < 1e-9);
        assert!((safe_log2(&Hpf::one()).unwrap().to_f64()).abs() < 1e-12);
    }

    #[test]
    fn log2_rejects_non_positive() {
        assert_eq!(safe_log2(&Hpf::zero()), Err(BnError::LogDomain));
        assert_eq!(safe_log2(&Hpf::from_f64(-1.0)), Err(BnError::LogDomain));
    }

    #[test]
    fn log_exp_roundtrip() {
        let x = Hpf::from_f64(42.0);
        let l = safe_log10(&x).unwrap();
        let back = safe_exp10(&l);
        assert!((back.to_f64() - 42.0).abs() < 1e-6);
    }

    #[test]
    fn exp2_saturates_on_finite_but_unrepresentable_exponent() {
        // Far beyond HPF's own representable exponent range, but still a
        // finite `y` -- must saturate to +infinity, not NaN.
        let y = Hpf::from_i64(10_000_000_000);
        let r = safe_exp2(&y);
        assert!(r.is_infinite());
        assert!(r.is_positive());
    }

    #[test]
    fn pow_matches_known_values() {
        let r = safe_pow(&Hpf::from_f64(2.0), &Hpf::from_f64(10.0)).unwrap();
        assert!((r.to_f64() - 1024.0).abs() < 1e-6);
    }
}
