// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/factorial.rs
//
// Factorial convenience helper: exact integer product up to 20!, the
// Lanczos approximation (g=7, 9 coefficients) beyond that, via HPF.

use super::Bn;
use crate::error::BnError;
use crate::hpf::Hpf;
use crate::stl;

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// `Factorial(x)`: exact for non-negative integers `<= 20`, Lanczos
/// gamma (`Gamma(x + 1)`) otherwise. Negative `x` is a domain error.
pub fn factorial(x: &Bn) -> Result<Bn, BnError> {
    if x.is_nan() {
        return Ok(Bn::nan());
    }
    if x.is_negative() {
        return Err(BnError::FactorialDomain);
    }
    if x.is_infinity() {
        return Ok(Bn::positive_infinity());
    }

    if x.is_integer() {
        if let Some(n) = x.to_u32() {
            if n <= 20 {
                let mut acc: u64 = 1;
                for k in 2..=n as u64 {
                    acc *= k;
                }
                return Ok(Bn::from_u64(acc));
            }
        }
    }

    let gamma_arg = x.to_hpf() + Hpf::one();
    Ok(Bn::from_hpf(&lanczos_gamma(&gamma_arg)))
}

/// `Gamma(z)` via the Lanczos approximation, reflecting `z < 0.5`
/// through `pi / (sin(pi*z) * Gamma(1-z))`.
fn lanczos_gamma(z: &Hpf) -> Hpf {
    let half = Hpf::from_f64(0.5);
    if *z < half {
        let pi = Hpf::pi();
        let one_minus_z = &Hpf::one() - z;
        let sin_pi_z = sin_via_series(&(&pi * z));
        return &pi / &(&sin_pi_z * &lanczos_gamma(&one_minus_z));
    }

    let z = z - &Hpf::one();
    let mut acc = Hpf::from_f64(LANCZOS_COEFFS[0]);
    for (k, coeff) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc = &acc + &(&Hpf::from_f64(*coeff) / &(&z + &Hpf::from_i64(k as i64)));
    }

    let g = Hpf::from_f64(LANCZOS_G);
    let t = &(&z + &g) + &half;
    let two_pi = Hpf::tau();
    let sqrt_2pi = sqrt_via_newton(&two_pi);

    let power_term = stl::safe_pow(&t, &(&z + &half)).unwrap_or_else(|_| Hpf::nan());
    let exp_term = stl::safe_exp(&(-&t));
    &(&sqrt_2pi * &power_term) * &(&exp_term * &acc)
}

/// `sqrt(x)` via Newton's method, seeded from `2^(ilogb(x)/2)`.
fn sqrt_via_newton(x: &Hpf) -> Hpf {
    if x.is_zero() {
        return Hpf::zero();
    }
    let mut guess = Hpf::exp2_int(x.ilogb() / 2);
    let two = Hpf::from_i64(2);
    for _ in 0..20 {
        guess = &(&guess + &(x / &guess)) / &two;
    }
    guess
}

/// `sin(x)` via its Taylor series, accurate for the small arguments
/// (`pi * z`, `|z| < 0.5`) the reflection formula calls this with.
fn sin_via_series(x: &Hpf) -> Hpf {
    let x2 = x * x;
    let mut term = x.clone();
    let mut sum = Hpf::zero();
    let mut k = 1i64;
    loop {
        sum = &sum + &term;
        let next_term = &(&(-&term) * &x2) / &Hpf::from_i64((2 * k) * (2 * k + 1));
        if next_term.abs() < Hpf::exp2_int(-120) {
            break;
        }
        term = next_term;
        k += 1;
        if k > 200 {
            break;
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_for_small_integers() {
        assert_eq!(factorial(&Bn::from_u64(0)).unwrap().to_f64(), 1.0);
        assert_eq!(factorial(&Bn::from_u64(5)).unwrap().to_f64(), 120.0);
        assert_eq!(factorial(&Bn::from_u64(10)).unwrap().to_f64(), 3628800.0);
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(factorial(&Bn::from_i64(-1)), Err(BnError::FactorialDomain));
    }

    #[test]
    fn lanczos_matches_known_values_past_twenty() {
        let f21 = factorial(&Bn::from_u64(21)).unwrap().to_f64();
        let expected = 5.109_094_217_170_944e19;
        assert!((f21 - expected).abs() / expected < 1e-6, "got {f21}");
    }

    #[test]
    fn half_integer_gamma() {
        // Factorial(0.5) = Gamma(1.5) = sqrt(pi)/2
        let f = factorial(&Bn::from_f64(0.5)).unwrap().to_f64();
        let expected = std::f64::consts::PI.sqrt() / 2.0;
        assert!((f - expected).abs() < 1e-6, "got {f}, expected {expected}");
    }
}
