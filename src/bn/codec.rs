// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/codec.rs
//
// The 96-bit word layout and the pack/unpack primitives everything else
// in `bn/` builds on. A word is carried as the low 96 bits of a `u128`:
//
//   bit  95      94  93..88  87..85  84..0
//        n       r   L       I       F

use crate::hpf::Hpf;

const F_BITS: u32 = 85;
const F_MASK: u128 = (1u128 << F_BITS) - 1;
const I_BITS: u32 = 3;
const I_SHIFT: u32 = F_BITS;
const I_MASK: u128 = (1u128 << I_BITS) - 1;
const L_BITS: u32 = 6;
const L_SHIFT: u32 = I_SHIFT + I_BITS;
const L_MASK: u128 = (1u128 << L_BITS) - 1;
const R_SHIFT: u32 = L_SHIFT + L_BITS;
const N_SHIFT: u32 = R_SHIFT + 1;

/// The reserved letter value: `L = 0x3F` encodes `NaN`, `±∞`, and `±0`.
pub const RESERVED_LETTER: u8 = 0x3F;

/// Tolerance for [`encode_operand`]'s integer-snap: an operand within
/// this distance of an integer is treated as exactly that integer, so
/// round-tripping `Log10(100)` lands on bit-exact `2` rather than a
/// fraction one ULP away from it.
pub fn integer_snap_tolerance() -> Hpf {
    Hpf::exp2_int(-40)
}

/// Pack the five logical fields into a 96-bit word (stored in the low 96
/// bits of a `u128`). `f` must already be `< 2^85` and `i` `< 8`.
pub fn pack(n: bool, r: bool, l: u8, i: u8, f: u128) -> u128 {
    debug_assert!(i < 8, "integer part out of range: {i}");
    debug_assert!(f <= F_MASK, "fraction out of range: {f}");
    let mut word = f & F_MASK;
    word |= (i as u128 & I_MASK) << I_SHIFT;
    word |= (l as u128 & L_MASK) << L_SHIFT;
    if r {
        word |= 1u128 << R_SHIFT;
    }
    if n {
        word |= 1u128 << N_SHIFT;
    }
    word
}

/// Unpack a 96-bit word into `(n, r, l, i, f)`.
pub fn unpack(word: u128) -> (bool, bool, u8, u8, u128) {
    let n = (word >> N_SHIFT) & 1 != 0;
    let r = (word >> R_SHIFT) & 1 != 0;
    let l = ((word >> L_SHIFT) & L_MASK) as u8;
    let i = ((word >> I_SHIFT) & I_MASK) as u8;
    let f = word & F_MASK;
    (n, r, l, i, f)
}

/// Encode an operand already known to lie in `[2, 10)` into `(I, F)`.
///
/// 1. Subtract 2 so the value sits in `[0, 8)`; snap to the nearest
///    integer within [`integer_snap_tolerance`], except `8` itself --
///    that's the one snap target outside the valid `I` range, reached
///    when a transcendental round-trip lands an operand a sliver under
///    its letter's upper edge. Leaving it unsnapped folds it back into
///    `I=7` with a fraction near `2^85`, which is the correct value and
///    costs nothing since the snap tolerance is already far looser than
///    these round-trips' actual error.
/// 2. Split into floor and fraction, clamping the fraction into
///    `[0, 1)` (carrying to the floor on an exact `1`).
/// 3. Scale the fraction by `2^85`, floor it, and carry once more if
///    that floor rounds up to exactly `2^85`.
pub fn encode_operand(operand: &Hpf) -> (u8, u128) {
    let mut y = operand - &Hpf::from_i64(2);

    let nearest = y.round();
    if nearest < Hpf::from_i64(8) && (&y - &nearest).abs() < integer_snap_tolerance() {
        y = nearest;
    }

    let mut floor = y.floor();
    let mut frac = &y - &floor;
    if frac >= Hpf::one() {
        frac = Hpf::zero();
        floor = &floor + &Hpf::one();
    }

    let two85 = Hpf::exp2_int(F_BITS as i32);
    let mut scaled = (&frac * &two85).floor();
    if scaled == two85 {
        scaled = Hpf::zero();
        floor = &floor + &Hpf::one();
    }

    let i = floor.to_f64() as u8;
    let f = scaled.to_u128();
    (i, f)
}

/// Decode `(I, F)` back into the operand in `[2, 10)`.
pub fn decode_operand(i: u8, f: u128) -> Hpf {
    let frac = Hpf::from_u128(f).scaleb(-(F_BITS as i32));
    &Hpf::from_i64(2) + &(&Hpf::from_i64(i as i64) + &frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_roundtrip() {
        let (n, r, l, i, f) = (true, false, 5u8, 3u8, 0x1234_5678_90ABu128);
        let word = pack(n, r, l, i, f);
        assert_eq!(unpack(word), (n, r, l, i, f));
    }

    #[test]
    fn field_boundaries() {
        let word = pack(false, true, 0x3F, 7, F_MASK);
        let (n, r, l, i, f) = unpack(word);
        assert!(!n);
        assert!(r);
        assert_eq!(l, 0x3F);
        assert_eq!(i, 7);
        assert_eq!(f, F_MASK);
        assert!(word < (1u128 << 96));
    }

    #[test]
    fn encode_decode_operand_roundtrip() {
        let operand = Hpf::from_f64(3.75);
        let (i, f) = encode_operand(&operand);
        let back = decode_operand(i, f);
        assert!((back.to_f64() - 3.75).abs() < 1e-12);
    }

    #[test]
    fn encode_snaps_near_integers() {
        let almost_two = &Hpf::from_i64(2) + &Hpf::exp2_int(-50);
        let (i, f) = encode_operand(&almost_two);
        assert_eq!(i, 0);
        assert_eq!(f, 0);
    }

    #[test]
    fn encode_does_not_snap_up_to_the_letter_boundary() {
        // Within the snap tolerance of operand 10 (y = 8), which is one
        // past the valid I range -- must fold into I=7 instead of
        // panicking in `pack`.
        let operand = &Hpf::from_i64(10) - &Hpf::exp2_int(-50);
        let (i, f) = encode_operand(&operand);
        assert_eq!(i, 7);
        assert!(f < (1u128 << F_BITS));
    }

    #[test]
    fn encode_handles_near_integer_fraction_without_overflowing_f() {
        // Close enough to an integer to fall within the snap tolerance,
        // but not close enough to trip it: the scaled fraction must still
        // land strictly under the 2^85 ceiling.
        let operand = &Hpf::from_i64(4) - &Hpf::exp2_int(-30);
        let (i, f) = encode_operand(&operand);
        assert_eq!(i, 1);
        assert!(f < (1u128 << F_BITS));
    }
}
