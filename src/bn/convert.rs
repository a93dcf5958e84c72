// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/convert.rs
//
// BN <-> HPF, the hinge every other conversion and most of `ops.rs`
// goes through, plus the machine-numeric casts built on top of it.

use super::codec::{self, RESERVED_LETTER};
use super::Bn;
use crate::hpf::Hpf;
use crate::htl;
use crate::stl;

impl Bn {
    /// Decode to the signed HPF magnitude this word represents. Letter 7
    /// is decoded through the `LetterJ -> LetterG` bijection and
    /// [`htl::letter_g`]; like the rest of letter 7, this is only exact
    /// up to the coarse tolerance HTL documents.
    pub fn to_hpf(&self) -> Hpf {
        let (n, r, l, i, f) = self.fields();

        if l == RESERVED_LETTER {
            if i == 0 && f == 0 {
                return match (n, r) {
                    (false, false) => Hpf::infinity(),
                    (true, false) => Hpf::neg_infinity(),
                    (false, true) => Hpf::zero(),
                    (true, true) => Hpf::neg_zero(),
                };
            }
            return Hpf::nan();
        }

        let o = codec::decode_operand(i, f);
        let two = Hpf::from_i64(2);

        let m = match l {
            1 => &Hpf::one() + &(&(&o - &two) / &Hpf::from_i64(8)),
            2 => &two + &(&(&o - &two) / &Hpf::from_i64(4)),
            3 => &o * &two,
            4 => &o * &Hpf::from_i64(10),
            5 => stl::safe_exp10(&o),
            6 => htl::letter_f(&o),
            7 => htl::letter_g(&htl::letter_j_to_letter_g(&o)),
            _ => return Hpf::nan(),
        };

        let m = if r { &Hpf::one() / &m } else { m };
        if n { -m } else { m }
    }

    /// Construct from an HPF value, choosing the narrowest letter whose
    /// range covers the (possibly reciprocated) magnitude.
    pub fn from_hpf(x: &Hpf) -> Bn {
        if x.is_nan() {
            return Bn::nan();
        }
        if x.is_infinite() {
            return if x.is_sign_negative() { Bn::negative_infinity() } else { Bn::positive_infinity() };
        }
        if x.is_zero() {
            return if x.is_sign_negative() { Bn::neg_zero() } else { Bn::zero() };
        }

        let n = x.is_negative();
        let mut mag = x.abs();
        let r = mag < Hpf::one();
        if r {
            mag = &Hpf::one() / &mag;
        }

        let two = Hpf::from_i64(2);
        let ten_e10 = stl::safe_exp10(&Hpf::from_i64(10));

        let (l, o) = if mag < two {
            (1u8, &two + &(&Hpf::from_i64(8) * &(&mag - &Hpf::one())))
        } else if mag < Hpf::from_i64(4) {
            (2u8, &two + &(&Hpf::from_i64(4) * &(&mag - &two)))
        } else if mag < Hpf::from_i64(20) {
            (3u8, &mag / &two)
        } else if mag < Hpf::from_i64(100) {
            (4u8, &mag / &Hpf::from_i64(10))
        } else if mag < ten_e10 {
            (5u8, stl::safe_log10_or_nan(&mag))
        } else {
            (6u8, htl::super_log10(&mag))
        };

        let (i, f) = codec::encode_operand(&o);
        Bn::from_word(codec::pack(n, r, l, i, f))
    }

    pub fn from_f64(val: f64) -> Bn {
        Bn::from_hpf(&Hpf::from_f64(val))
    }

    pub fn from_i64(val: i64) -> Bn {
        Bn::from_hpf(&Hpf::from_i64(val))
    }

    pub fn from_u64(val: u64) -> Bn {
        Bn::from_hpf(&Hpf::from_u64(val))
    }

    pub fn to_f64(&self) -> f64 {
        self.to_hpf().to_f64()
    }
}

macro_rules! int_cast {
    ($from_name:ident, $to_name:ident, $ty:ty) => {
        impl Bn {
            pub fn $from_name(val: $ty) -> Bn {
                Bn::from_i64(val as i64)
            }

            pub fn $to_name(&self) -> Option<$ty> {
                let f = self.to_f64();
                if f.is_finite() && f >= <$ty>::MIN as f64 && f <= <$ty>::MAX as f64 {
                    Some(f as $ty)
                } else {
                    None
                }
            }
        }
    };
}

int_cast!(from_i32, to_i32, i32);
int_cast!(from_u32, to_u32, u32);

impl Bn {
    /// Checked conversion to `i64`: `None` if `self` is non-finite,
    /// non-integral rounding aside, or out of `i64`'s range.
    pub fn to_i64(&self) -> Option<i64> {
        let f = self.to_f64();
        if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }

    /// Checked conversion to `u64`: `None` if `self` is non-finite,
    /// negative, or out of `u64`'s range.
    pub fn to_u64(&self) -> Option<u64> {
        let f = self.to_f64();
        if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 {
            Some(f as u64)
        } else {
            None
        }
    }

    /// Saturating conversion to `i64`: out-of-range magnitudes clamp to
    /// `i64::MIN`/`i64::MAX` rather than failing, and `NaN` maps to `0`
    /// -- the same "checked / saturating / truncating" trio spec.md §6
    /// calls for on its generic-numeric conversion helpers, realized
    /// here as named methods rather than a generic trait since BN has
    /// only the one wide `HPF` substrate to convert through.
    pub fn to_i64_saturating(&self) -> i64 {
        if self.is_nan() {
            return 0;
        }
        let f = self.to_f64();
        if f.is_infinite() {
            return if f.is_sign_negative() { i64::MIN } else { i64::MAX };
        }
        f.clamp(i64::MIN as f64, i64::MAX as f64) as i64
    }

    /// Truncating conversion to `i64`: drops the fractional part (via
    /// `Floor`-toward-zero) without checking range; saturates the same
    /// way [`to_i64_saturating`](Self::to_i64_saturating) does on
    /// overflow or non-finite input, since a silent wraparound would be
    /// meaningless at BN's magnitude range.
    pub fn to_i64_truncating(&self) -> i64 {
        self.to_i64_saturating()
    }
}

/// `ToPrimitive`/`FromPrimitive` round out spec.md §6's generic-numeric
/// conversion helpers in the idiom the corpus actually uses: the
/// teacher imports `num_traits` directly in several modules
/// (`rational/number.rs`, `rational/ops.rs`) rather than hand-rolling a
/// `TryConvertFrom`-style interface, so BN's checked conversions are
/// exposed the same way instead of inventing a parallel trait.
impl num_traits::ToPrimitive for Bn {
    fn to_i64(&self) -> Option<i64> {
        Bn::to_i64(self)
    }

    fn to_u64(&self) -> Option<u64> {
        Bn::to_u64(self)
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Bn::to_f64(self))
    }
}

impl num_traits::FromPrimitive for Bn {
    fn from_i64(n: i64) -> Option<Bn> {
        Some(Bn::from_i64(n))
    }

    fn from_u64(n: u64) -> Option<Bn> {
        Some(Bn::from_u64(n))
    }

    fn from_f64(n: f64) -> Option<Bn> {
        Some(Bn::from_f64(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_small_integers() {
        for v in [1.0, 2.0, 3.5, 7.0, 19.9, 50.0, 99.9, 1000.0, -42.0] {
            let bn = Bn::from_f64(v);
            assert!((bn.to_f64() - v).abs() / v.abs() < 1e-9, "roundtrip failed for {v}");
        }
    }

    #[test]
    fn roundtrip_across_letter_boundaries() {
        for v in [1.5, 2.5, 5.0, 50.0, 1e5, 1e50] {
            let bn = Bn::from_f64(v);
            let back = bn.to_f64();
            assert!((back - v).abs() / v.abs() < 1e-6, "roundtrip failed for {v}: got {back}");
        }
    }

    #[test]
    fn roundtrip_past_f64_range_letter_6() {
        let x = Hpf::parse("1e9999").unwrap();
        let bn = Bn::from_hpf(&x);
        let back = bn.to_hpf();
        let ratio = &back / &x;
        assert!((ratio.to_f64() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn reciprocal_magnitudes_roundtrip() {
        for v in [0.5, 0.1, 1e-20, 1e-100] {
            let bn = Bn::from_f64(v);
            let back = bn.to_f64();
            assert!((back - v).abs() / v < 1e-6, "roundtrip failed for {v}: got {back}");
        }
    }

    #[test]
    fn special_values_roundtrip() {
        assert!(Bn::from_hpf(&Hpf::nan()).to_hpf().is_nan());
        assert!(Bn::from_hpf(&Hpf::infinity()).to_hpf().is_infinite());
        assert!(Bn::from_hpf(&Hpf::zero()).to_hpf().is_zero());
    }

    #[test]
    fn int32_casts() {
        assert_eq!(Bn::from_i32(42).to_i32(), Some(42));
        assert_eq!(Bn::from_i32(-7).to_i32(), Some(-7));
    }

    #[test]
    fn int64_checked_casts() {
        assert_eq!(Bn::from_i64(42).to_i64(), Some(42));
        assert_eq!(Bn::from_u64(42).to_u64(), Some(42));
        assert_eq!(Bn::negative_one().to_u64(), None);
        assert_eq!(Bn::positive_infinity().to_i64(), None);
    }

    #[test]
    fn int64_saturating_and_truncating_casts() {
        assert_eq!(Bn::positive_infinity().to_i64_saturating(), i64::MAX);
        assert_eq!(Bn::negative_infinity().to_i64_saturating(), i64::MIN);
        assert_eq!(Bn::nan().to_i64_saturating(), 0);
        assert_eq!(Bn::from_f64(3.9).to_i64_truncating(), 3);
    }

    #[test]
    fn num_traits_primitive_conversions() {
        use num_traits::{FromPrimitive, ToPrimitive};
        let bn = Bn::from_f64(123.0);
        assert_eq!(ToPrimitive::to_i64(&bn), Some(123));
        assert_eq!(ToPrimitive::to_f64(&Bn::from_f64(2.5)), Some(2.5));
        assert_eq!(Bn::from_f64(7.0), <Bn as FromPrimitive>::from_i64(7).unwrap());
    }
}
