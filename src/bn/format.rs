// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/format.rs
//
// `Display`/`ToString`. Letters 1..5 print the decoded decimal value
// directly. Letter 6 prints `<sig>e+<exp>` scientific notation,
// materializing the magnitude through `LetterF` first. Letters >= 7
// fall back to a regime-tagged debug form -- per the design notes,
// this is explicitly non-canonical and not guaranteed to round-trip.

use super::codec::RESERVED_LETTER;
use super::Bn;
use crate::hpf::Hpf;
use crate::htl;
use crate::stl;
use std::fmt;

/// Regime tags for letters 7 and up, skipping `G`/`H`/`I` to avoid
/// colliding with the `LetterG` function name and the `I` bit field.
const REGIME_TAGS: &[char] = &['A', 'B', 'C', 'D', 'E', 'F', 'J', 'K', 'L', 'M', 'N', 'P'];

/// Significant decimal digits to render: comfortably under the ~25.6
/// digits the word's 85-bit fraction field actually carries, so the
/// quantization noise from that fixed-point encoding never surfaces.
const SIGNIFICANT_DIGITS: usize = 22;

impl fmt::Display for Bn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return write!(f, "NaN");
        }
        if self.is_positive_infinity() {
            return write!(f, "\u{221E}");
        }
        if self.is_negative_infinity() {
            return write!(f, "-\u{221E}");
        }
        if self.is_zero() {
            return write!(f, "0");
        }

        let (n, r, l, i, fr) = self.fields();
        let sign = if n { "-" } else { "" };

        if l < 6 {
            return write!(f, "{}", self.to_hpf().to_significant_digits(SIGNIFICANT_DIGITS));
        }

        let o = super::codec::decode_operand(i, fr);

        if l == 6 {
            return write!(f, "{sign}{}", format_letter6(&o, r));
        }

        let prefix = if r { "1 / " } else { "" };
        let tag = regime_tag(l);
        write!(f, "{sign}{prefix}{tag}{o}")
    }
}

/// Materializes the letter-6 magnitude through three iterated
/// `SafeExp10`s (via `LetterF`), then splits it into `<sig>e+<exp>`
/// scientific notation -- `e-` instead when `reciprocal` is set, per
/// spec.md §4.11, rather than an outer `1 / ` prefix.
fn format_letter6(o: &Hpf, reciprocal: bool) -> String {
    let m = htl::letter_f(o);
    if !m.is_finite() {
        let prefix = if reciprocal { "1 / " } else { "" };
        return format!("{prefix}F{o}");
    }
    let log_m = stl::safe_log10_or_nan(&m);
    let exp_floor = log_m.floor();
    let sig = stl::safe_exp10(&(&log_m - &exp_floor));

    let sig_str = sig.to_significant_digits(SIGNIFICANT_DIGITS);
    let (sig_str, exp_floor) = if sig_str == "10" {
        // Rounding the significand to SIGNIFICANT_DIGITS carried it up
        // to the next power of ten, which would otherwise break the
        // `[1, 10)` scientific-notation invariant.
        ("1".to_string(), &exp_floor + &Hpf::one())
    } else {
        (sig_str, exp_floor)
    };

    let exp_sign = if reciprocal { "-" } else { "+" };
    format!("{sig_str}e{exp_sign}{}", exp_floor.to_significant_digits(SIGNIFICANT_DIGITS))
}

fn regime_tag(l: u8) -> String {
    let idx = (l - 7) as usize;
    if idx < REGIME_TAGS.len() {
        REGIME_TAGS[idx].to_string()
    } else if l == RESERVED_LETTER {
        "?".to_string()
    } else {
        format!("[{}]", idx - REGIME_TAGS.len() + 1)
    }
}
