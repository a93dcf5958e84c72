// bignum96: a 96-bit extreme-range numeric type
// 2024

// bn/parse.rs
//
// String parsing: leading sign, a direct HPF literal, or scientific
// `<sig>e<exp>` notation reconstructed through LetterF/SuperLog10 for
// magnitudes beyond HPF's own range.

use super::Bn;
use crate::error::BnError;
use crate::hpf::Hpf;
use crate::htl;
use crate::stl;
use std::str::FromStr;

impl Bn {
    pub fn parse(src: &str) -> Result<Bn, BnError> {
        let trimmed = src.trim();

        if let Some(rest) = trimmed.strip_prefix('-') {
            return Ok(Bn::parse(rest)?.neg());
        }
        if let Some(rest) = trimmed.strip_prefix('+') {
            return Bn::parse(rest);
        }

        if let Ok(hpf) = Hpf::parse(trimmed) {
            return Ok(Bn::from_hpf(&hpf));
        }

        if let Some(pos) = trimmed.find(['e', 'E']) {
            let (sig_str, exp_str) = trimmed.split_at(pos);
            let exp_str = &exp_str[1..];
            let sig = Hpf::parse(sig_str).map_err(|_| BnError::ParseFormat(src.to_string()))?;
            let exp = Hpf::parse(exp_str).map_err(|_| BnError::ParseFormat(src.to_string()))?;
            if !sig.is_positive() {
                return Err(BnError::ParseFormat(src.to_string()));
            }

            let raw_letter_f = &exp + &stl::safe_log10_or_nan(&sig);
            let reciprocal = raw_letter_f < Hpf::zero();
            let letter_f = if reciprocal { raw_letter_f.neg() } else { raw_letter_f };

            let result = if letter_f < Hpf::from_i64(10) {
                Bn::from_hpf(&letter_f).exp10()
            } else {
                let next = &Hpf::one() + &htl::super_log10(&letter_f);
                let (i, f) = super::codec::encode_operand(&next);
                Bn::from_word(super::codec::pack(false, false, 6, i, f))
            };

            return Ok(if reciprocal { result.reciprocal() } else { result });
        }

        Err(BnError::ParseFormat(src.to_string()))
    }

    pub fn try_parse(src: &str) -> Option<Bn> {
        Bn::parse(src).ok()
    }
}

impl FromStr for Bn {
    type Err = BnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Bn::parse(s)
    }
}
