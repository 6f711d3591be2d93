//! Float to decimal text conversion
//!
//! Two renderings of the same `f64`:
//! - `Shortest`: the shortest decimal string that parses back to the same value
//! - `Exact`: the complete decimal expansion of the binary value
//!
//! Neither uses exponent notation.

/// Decimal rendering style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecimalStyle {
    #[default]
    Shortest,
    Exact,
}

/// Format `value` as decimal text in the given style
pub fn format_decimal(value: f64, style: DecimalStyle) -> String {
    match style {
        DecimalStyle::Shortest => value.to_string(),
        DecimalStyle::Exact => exact_decimal(value),
    }
}

const LIMB_BASE: u64 = 1_000_000_000;
/// Largest power of five that fits a u32 multiplier
const POW5_CHUNK: (u32, u32) = (13, 1_220_703_125);
/// Largest power of two below the limb base
const POW2_CHUNK: (u32, u32) = (29, 1 << 29);

/// Unsigned integer stored as base-10^9 limbs, least significant first
#[derive(Clone, Debug, PartialEq, Eq)]
struct DecimalLimbs(Vec<u32>);

impl DecimalLimbs {
    fn from_u64(mut n: u64) -> Self {
        let mut limbs = Vec::new();
        while n > 0 {
            limbs.push((n % LIMB_BASE) as u32);
            n /= LIMB_BASE;
        }
        Self(limbs)
    }

    fn mul_small(&mut self, factor: u32) {
        let mut carry = 0u64;
        for limb in self.0.iter_mut() {
            let product = *limb as u64 * factor as u64 + carry;
            *limb = (product % LIMB_BASE) as u32;
            carry = product / LIMB_BASE;
        }
        while carry > 0 {
            self.0.push((carry % LIMB_BASE) as u32);
            carry /= LIMB_BASE;
        }
    }

    /// Multiply by `base^exponent`, `chunk` being `(k, base^k)` fitting in u32
    fn mul_pow(&mut self, base: u32, mut exponent: u32, chunk: (u32, u32)) {
        while exponent >= chunk.0 {
            self.mul_small(chunk.1);
            exponent -= chunk.0;
        }
        if exponent > 0 {
            self.mul_small(base.pow(exponent));
        }
    }

    fn to_digits(&self) -> String {
        let Some((last, rest)) = self.0.split_last() else {
            return "0".to_string();
        };

        let mut digits = last.to_string();
        for limb in rest.iter().rev() {
            digits.push_str(&format!("{:09}", limb));
        }
        digits
    }
}

/// Exact decimal expansion of a binary64 value
///
/// Every finite `f64` is `m * 2^e`; for `e < 0` that equals
/// `m * 5^-e / 10^-e`, so the expansion terminates after `-e` digits.
fn exact_decimal(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let bits = value.to_bits();
    let sign = if bits >> 63 == 1 { "-" } else { "" };
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    let (mut mantissa, mut exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased_exponent - 1075)
    };

    if mantissa == 0 {
        return format!("{}0", sign);
    }

    // odd mantissa keeps the fraction free of trailing zeros
    let shift = mantissa.trailing_zeros();
    mantissa >>= shift;
    exponent += shift as i32;

    let mut limbs = DecimalLimbs::from_u64(mantissa);
    if exponent >= 0 {
        limbs.mul_pow(2, exponent as u32, POW2_CHUNK);
        return format!("{}{}", sign, limbs.to_digits());
    }

    let scale = exponent.unsigned_abs();
    limbs.mul_pow(5, scale, POW5_CHUNK);
    let digits = limbs.to_digits();
    let scale = scale as usize;

    if digits.len() > scale {
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        format!("{}{}.{}", sign, int_part, frac_part)
    } else {
        format!("{}0.{}{}", sign, "0".repeat(scale - digits.len()), digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortest_ln2() {
        assert_eq!(
            format_decimal(std::f64::consts::LN_2, DecimalStyle::Shortest),
            "0.6931471805599453"
        );
    }

    #[test]
    fn test_shortest_has_no_exponent() {
        let text = format_decimal(2f64.powi(-31), DecimalStyle::Shortest);
        assert!(text.starts_with("0.000000000"));
        assert!(!text.contains('e'));
    }

    #[test]
    fn test_exact_ln2() {
        assert_eq!(
            format_decimal(std::f64::consts::LN_2, DecimalStyle::Exact),
            "0.69314718055994528622676398299518041312694549560546875"
        );
    }

    #[test]
    fn test_exact_simple_values() {
        assert_eq!(exact_decimal(0.0), "0");
        assert_eq!(exact_decimal(-0.0), "-0");
        assert_eq!(exact_decimal(1.0), "1");
        assert_eq!(exact_decimal(2.0), "2");
        assert_eq!(exact_decimal(0.5), "0.5");
        assert_eq!(exact_decimal(-0.375), "-0.375");
        assert_eq!(exact_decimal(2147483648.0), "2147483648");
    }

    #[test]
    fn test_exact_point_one() {
        assert_eq!(
            exact_decimal(0.1),
            "0.1000000000000000055511151231257827021181583404541015625"
        );
    }

    #[test]
    fn test_exact_large_integer() {
        assert_eq!(exact_decimal(2f64.powi(100)), "1267650600228229401496703205376");
    }

    #[test]
    fn test_exact_smallest_subnormal() {
        let text = exact_decimal(f64::from_bits(1));
        assert!(text.starts_with("0.000"));
        assert!(text.ends_with("625"));
        // 2^-1074 has 1074 fraction digits
        assert_eq!(text.len(), "0.".len() + 1074);
    }

    #[test]
    fn test_exact_parses_back() {
        for value in [std::f64::consts::PI, 1.5f64.ln(), 2.0 / 3.0, 21.487562597358306] {
            let text = exact_decimal(value);
            assert_eq!(text.parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(exact_decimal(f64::NAN), "NaN");
        assert_eq!(exact_decimal(f64::INFINITY), "inf");
    }
}
