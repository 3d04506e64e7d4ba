use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, XrpError};

/// Issued-currency value: sign, 16-digit mantissa and a decimal exponent
///
/// Non-zero values always hold a mantissa in
/// `[MIN_MANTISSA, MAX_MANTISSA]` and an exponent in
/// `[MIN_EXPONENT, MAX_EXPONENT]`. Zero has exactly one representation, so
/// there is no negative zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Currency {
    negative: bool,
    mantissa: u64,
    exponent: i32,
}

const NOT_XRP_BIT: u64 = 0x8000_0000_0000_0000;
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
const MANTISSA_MASK: u64 = (1 << 54) - 1;
const EXPONENT_BIAS: i32 = 97;
/// Significant digits kept while parsing before the tail is dropped
const MAX_PARSE_DIGITS: u32 = 36;
const DECIMAL_MAX_SCALE: u32 = 28;

impl Currency {
    pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
    pub const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
    pub const MIN_EXPONENT: i32 = -96;
    pub const MAX_EXPONENT: i32 = 80;

    pub const ZERO: Currency = Currency {
        negative: false,
        mantissa: 0,
        exponent: 0,
    };

    /// Build `(-1)^negative * mantissa * 10^exponent`, rounding to 16
    /// significant digits (half away from zero)
    ///
    /// Values too small for the smallest exponent become zero; values too
    /// large fail with [`XrpError::Overflow`].
    pub fn new(negative: bool, mantissa: u64, exponent: i32) -> Result<Self> {
        Self::from_wide(negative, mantissa as u128, exponent.into())
    }

    fn from_wide(negative: bool, mantissa: u128, exponent: i64) -> Result<Self> {
        if mantissa == 0 {
            return Ok(Self::ZERO);
        }
        let (mantissa, exponent) = normalize(mantissa, exponent);
        if exponent > Self::MAX_EXPONENT.into() {
            return Err(XrpError::Overflow(format!(
                "{}e{} exceeds the largest currency value",
                mantissa, exponent
            )));
        }
        if exponent < Self::MIN_EXPONENT.into() {
            return Ok(Self::ZERO);
        }
        Ok(Self {
            negative,
            mantissa,
            exponent: exponent as i32,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            ..*self
        }
    }

    /// The 64-bit amount word: not-XRP bit, sign bit, biased exponent, mantissa
    pub fn to_bits(&self) -> u64 {
        if self.is_zero() {
            return NOT_XRP_BIT;
        }
        let sign = if self.negative { 0 } else { POSITIVE_BIT };
        NOT_XRP_BIT
            | sign
            | (((self.exponent + EXPONENT_BIAS) as u64) << 54)
            | self.mantissa
    }

    /// Parse the 64-bit amount word, accepting only canonical encodings
    pub fn from_bits(bits: u64) -> Result<Self> {
        if bits & NOT_XRP_BIT == 0 {
            return Err(XrpError::InvalidAmount(format!(
                "{:016X} is a native amount",
                bits
            )));
        }
        let mantissa = bits & MANTISSA_MASK;
        if mantissa == 0 {
            if bits != NOT_XRP_BIT {
                return Err(XrpError::InvalidAmount(format!(
                    "{:016X} is not the canonical zero",
                    bits
                )));
            }
            return Ok(Self::ZERO);
        }
        let exponent = ((bits >> 54) & 0xFF) as i32 - EXPONENT_BIAS;
        if !(Self::MIN_MANTISSA..=Self::MAX_MANTISSA).contains(&mantissa)
            || !(Self::MIN_EXPONENT..=Self::MAX_EXPONENT).contains(&exponent)
        {
            return Err(XrpError::InvalidAmount(format!(
                "{:016X} is not a canonical currency value",
                bits
            )));
        }
        Ok(Self {
            negative: bits & POSITIVE_BIT == 0,
            mantissa,
            exponent,
        })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .exponent
                .cmp(&other.exponent)
                .then(self.mantissa.cmp(&other.mantissa)),
        }
    }
}

/// Scale `mantissa` into 16 digits, adjusting the exponent
fn normalize(mut mantissa: u128, mut exponent: i64) -> (u64, i64) {
    let max = Currency::MAX_MANTISSA as u128;
    let min = Currency::MIN_MANTISSA as u128;
    // keep 17 digits so the rounding digit survives truncation
    while mantissa >= (max + 1) * 10 {
        mantissa /= 10;
        exponent += 1;
    }
    if mantissa > max {
        let dropped = mantissa % 10;
        mantissa /= 10;
        exponent += 1;
        if dropped >= 5 {
            mantissa += 1;
        }
        if mantissa > max {
            mantissa /= 10;
            exponent += 1;
        }
    }
    while mantissa < min {
        mantissa *= 10;
        exponent -= 1;
    }
    (mantissa as u64, exponent)
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl Neg for Currency {
    type Output = Currency;

    fn neg(self) -> Currency {
        if self.is_zero() {
            return self;
        }
        Currency {
            negative: !self.negative,
            ..self
        }
    }
}

impl From<Decimal> for Currency {
    fn from(value: Decimal) -> Self {
        let mantissa = value.mantissa().unsigned_abs();
        if mantissa == 0 {
            return Self::ZERO;
        }
        // a 96-bit mantissa with scale <= 28 always lands inside the exponent range
        let (mantissa, exponent) = normalize(mantissa, -i64::from(value.scale()));
        Self {
            negative: value.is_sign_negative(),
            mantissa,
            exponent: exponent as i32,
        }
    }
}

impl TryFrom<Currency> for Decimal {
    type Error = XrpError;

    fn try_from(value: Currency) -> Result<Decimal> {
        if value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let overflow = || XrpError::Overflow(format!("{} does not fit a 96-bit decimal", value));
        let mut mantissa = value.mantissa as u128;
        let scale = if value.exponent >= 0 {
            let factor = 10u128
                .checked_pow(value.exponent as u32)
                .ok_or_else(overflow)?;
            mantissa = mantissa.checked_mul(factor).ok_or_else(overflow)?;
            0
        } else {
            let mut scale = (-value.exponent) as u32;
            if scale > DECIMAL_MAX_SCALE {
                let excess = scale - DECIMAL_MAX_SCALE;
                // rounds to zero once the whole mantissa is shifted out
                mantissa = match 10u128.checked_pow(excess) {
                    Some(div) if div <= mantissa * 10 => {
                        let rounded = mantissa / div;
                        if (mantissa % div) * 2 >= div {
                            rounded + 1
                        } else {
                            rounded
                        }
                    }
                    _ => 0,
                };
                scale = DECIMAL_MAX_SCALE;
            }
            scale
        };
        let signed = if value.negative {
            -(mantissa as i128)
        } else {
            mantissa as i128
        };
        Decimal::try_from_i128_with_scale(signed, scale)
            .map(|d| d.normalize())
            .map_err(|_| overflow())
    }
}

impl FromStr for Currency {
    type Err = XrpError;

    /// Accepts `[-+]digits[.digits][(e|E)[-+]digits]`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || XrpError::InvalidAmount(s.to_string());
        let (body, exp_part) = match s.find(|c| c == 'e' || c == 'E') {
            Some(i) => (&s[..i], Some(&s[i + 1..])),
            None => (s, None),
        };
        let (negative, body) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let mut exponent = match exp_part {
            Some(e) => i64::from(e.parse::<i32>().map_err(|_| invalid())?),
            None => 0,
        };
        let mut mantissa: u128 = 0;
        let mut digits = 0u32;
        for (c, fractional) in int_part
            .chars()
            .map(|c| (c, false))
            .chain(frac_part.chars().map(|c| (c, true)))
        {
            let d = c.to_digit(10).ok_or_else(invalid)?;
            if mantissa == 0 && d == 0 {
                if fractional {
                    exponent = exponent.checked_sub(1).ok_or_else(invalid)?;
                }
                continue;
            }
            if digits < MAX_PARSE_DIGITS {
                mantissa = mantissa * 10 + d as u128;
                digits += 1;
                if fractional {
                    exponent = exponent.checked_sub(1).ok_or_else(invalid)?;
                }
            } else if !fractional {
                exponent = exponent.checked_add(1).ok_or_else(invalid)?;
            }
        }
        Self::from_wide(negative, mantissa, exponent)
    }
}

impl fmt::Display for Currency {
    /// Plain decimal for exponents in `[-25, -5]` (and zero), otherwise
    /// `<mantissa>e<exponent>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        if self.negative {
            f.write_str("-")?;
        }
        if self.exponent != 0 && (self.exponent < -25 || self.exponent > -5) {
            return write!(f, "{}e{}", self.mantissa, self.exponent);
        }
        if self.exponent == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let places = (-self.exponent) as usize;
        let divisor = 10u128.pow(places as u32);
        let mantissa = self.mantissa as u128;
        let integer = mantissa / divisor;
        let fraction = format!("{:0width$}", mantissa % divisor, width = places);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            write!(f, "{}", integer)
        } else {
            write!(f, "{}.{}", integer, fraction)
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self)
    }
}

serde_via_str!(Currency);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decimal_round_trip() {
        for d in [dec!(1.0), dec!(-1.5), dec!(0.000001), dec!(123456789.123456)] {
            let c = Currency::from(d);
            assert_eq!(Decimal::try_from(c).unwrap(), d);
        }
        assert_eq!(Currency::from(dec!(1.0)).to_string(), "1");
    }

    #[test]
    fn extra_digits_round_to_nearest() {
        let c = Currency::from(dec!(1.23456789012345678));
        assert_eq!(c.mantissa(), 1_234_567_890_123_457);
        assert_eq!(c.exponent(), -15);

        let c = Currency::from(dec!(9.9999999999999999));
        assert_eq!(c.mantissa(), 1_000_000_000_000_000);
        assert_eq!(c.exponent(), -14);
        assert_eq!(c.to_string(), "10");
    }

    #[test]
    fn overflow_on_construction_and_conversion() {
        assert!(matches!(
            Currency::new(false, 1, 96),
            Err(XrpError::Overflow(_))
        ));
        let huge: Currency = "1e40".parse().unwrap();
        assert!(matches!(Decimal::try_from(huge), Err(XrpError::Overflow(_))));
        // too small for the exponent range collapses to zero
        assert!(Currency::new(false, 1, -120).unwrap().is_zero());
    }

    #[test]
    fn tiny_values_round_when_converted_to_decimal() {
        let tiny: Currency = "1e-40".parse().unwrap();
        assert_eq!(Decimal::try_from(tiny).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn text_format_matches_ledger_output() {
        let cases = [
            ("1", "1"),
            ("0.5", "0.5"),
            ("-25.125", "-25.125"),
            ("1e20", "1000000000000000e5"),
            ("1e-30", "1000000000000000e-45"),
            ("0.00001", "0.00001"),
            ("-0", "0"),
        ];
        for (input, output) in cases {
            assert_eq!(input.parse::<Currency>().unwrap().to_string(), output);
        }
    }

    #[test]
    fn wire_bits() {
        let one: Currency = "1".parse().unwrap();
        assert_eq!(one.to_bits(), 0xD483_8D7E_A4C6_8000);
        assert_eq!(Currency::from_bits(0xD483_8D7E_A4C6_8000).unwrap(), one);
        assert_eq!(Currency::ZERO.to_bits(), 0x8000_0000_0000_0000);
        assert_eq!((-one).to_bits(), 0x9483_8D7E_A4C6_8000);
        assert!(Currency::from_bits(0x4000_0000_0000_0001).is_err());
        // mantissa below the normalized range
        assert!(Currency::from_bits(0xD480_0000_0000_0001).is_err());
    }

    #[test]
    fn zero_has_a_single_encoding() {
        assert_eq!(Currency::from_bits(0x8000_0000_0000_0000), Ok(Currency::ZERO));
        for bits in [0xC000_0000_0000_0000, 0x8040_0000_0000_0000, 0xD480_0000_0000_0000] {
            assert!(
                matches!(Currency::from_bits(bits), Err(XrpError::InvalidAmount(_))),
                "{:016X}",
                bits
            );
        }
    }

    #[test]
    fn extreme_exponents_do_not_wrap() {
        assert!(matches!(
            "100000000000000000000e2147483647".parse::<Currency>(),
            Err(XrpError::Overflow(_))
        ));
        assert!(matches!(
            "99999999999999999999999999999999999999e2147483640".parse::<Currency>(),
            Err(XrpError::Overflow(_))
        ));
        assert_eq!(
            "0.000000000000000000001e-2147483648".parse::<Currency>(),
            Ok(Currency::ZERO)
        );
    }

    #[test]
    fn ordering_and_zero() {
        let a: Currency = "-2".parse().unwrap();
        let b: Currency = "0.5".parse().unwrap();
        let c: Currency = "3".parse().unwrap();
        assert!(a < Currency::ZERO && Currency::ZERO < b && b < c);
        assert_eq!(-Currency::ZERO, Currency::ZERO);
        assert!(!(-Currency::ZERO).is_negative());
    }

    #[test]
    fn rejects_malformed_text() {
        for bad in ["", ".", "1.2.3", "abc", "1e", "--1"] {
            assert!(bad.parse::<Currency>().is_err(), "{bad}");
        }
    }
}
