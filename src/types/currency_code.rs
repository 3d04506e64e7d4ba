use std::fmt;
use std::str::FromStr;

use crate::error::{Result, XrpError};

/// Characters allowed in a three-letter standard code
const STANDARD_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789<>(){}[]|?!@#$%^&*";

/// Offset of the three ASCII characters inside the 20-byte layout
const STANDARD_OFFSET: usize = 12;

/// 160-bit currency code
///
/// A standard code is three characters stored at bytes 12..15 of an
/// otherwise zero array. Any array whose first byte is nonzero is a
/// non-standard (hex) code. The all-zero array is XRP.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CurrencyCode([u8; 20]);

impl CurrencyCode {
    pub const XRP: CurrencyCode = CurrencyCode([0u8; 20]);

    /// Validate a raw 20-byte code
    ///
    /// A leading zero byte means the standard layout, so the remaining
    /// bytes must hold exactly a valid three-letter code; anything else with
    /// a zero first byte is ambiguous and rejected.
    pub fn from_bytes(bytes: [u8; 20]) -> Result<Self> {
        if bytes[0] != 0 || bytes == [0u8; 20] {
            return Ok(Self(bytes));
        }
        let padding_clear = bytes[1..STANDARD_OFFSET].iter().all(|b| *b == 0)
            && bytes[STANDARD_OFFSET + 3..].iter().all(|b| *b == 0);
        let code = &bytes[STANDARD_OFFSET..STANDARD_OFFSET + 3];
        if !padding_clear || !code.iter().all(|b| is_standard_char(*b)) || code == b"XRP" {
            return Err(XrpError::InvalidCurrencyCode(hex::encode_upper(bytes)));
        }
        Ok(Self(bytes))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; 20] = bytes.try_into().map_err(|_| XrpError::InvalidLength {
            expected: 20,
            actual: bytes.len(),
        })?;
        Self::from_bytes(array)
    }

    /// Three-letter standard code; `"XRP"` yields [`CurrencyCode::XRP`]
    pub fn standard(code: &str) -> Result<Self> {
        if code == "XRP" {
            return Ok(Self::XRP);
        }
        let bytes = code.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| is_standard_char(*b)) {
            return Err(XrpError::InvalidCurrencyCode(code.to_string()));
        }
        let mut raw = [0u8; 20];
        raw[STANDARD_OFFSET..STANDARD_OFFSET + 3].copy_from_slice(bytes);
        Ok(Self(raw))
    }

    pub fn is_xrp(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn is_standard(&self) -> bool {
        self.0[0] == 0 && !self.is_xrp()
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

fn is_standard_char(b: u8) -> bool {
    STANDARD_CHARS.as_bytes().contains(&b)
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_xrp() {
            f.write_str("XRP")
        } else if self.is_standard() {
            let code = &self.0[STANDARD_OFFSET..STANDARD_OFFSET + 3];
            // validated as ASCII on construction
            f.write_str(std::str::from_utf8(code).map_err(|_| fmt::Error)?)
        } else {
            f.write_str(&hex::encode_upper(self.0))
        }
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self)
    }
}

impl FromStr for CurrencyCode {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.len() {
            3 => Self::standard(s),
            40 => {
                let bytes = hex::decode(s)
                    .map_err(|_| XrpError::InvalidCurrencyCode(s.to_string()))?;
                Self::from_slice(&bytes)
            }
            _ => Err(XrpError::InvalidCurrencyCode(s.to_string())),
        }
    }
}

serde_via_str!(CurrencyCode);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xrp_text_and_zero_bytes_are_equal() {
        let text: CurrencyCode = "XRP".parse().unwrap();
        let zero = CurrencyCode::from_bytes([0u8; 20]).unwrap();
        assert_eq!(text, zero);
        assert_eq!(text.to_string(), "XRP");
        assert!(zero.is_xrp());
    }

    #[test]
    fn standard_code_layout() {
        let usd: CurrencyCode = "USD".parse().unwrap();
        assert_eq!(
            hex::encode_upper(usd.as_bytes()),
            "0000000000000000000000005553440000000000"
        );
        assert_eq!(usd.to_string(), "USD");
        let from_hex: CurrencyCode = "0000000000000000000000005553440000000000".parse().unwrap();
        assert_eq!(from_hex, usd);
    }

    #[test]
    fn standard_codes_are_case_sensitive() {
        let upper: CurrencyCode = "USD".parse().unwrap();
        let lower: CurrencyCode = "usd".parse().unwrap();
        assert_ne!(upper, lower);
        assert_eq!(lower.to_string(), "usd");
    }

    #[test]
    fn rejects_invalid_standard_characters() {
        for bad in ["US ", "U\tD", "U~D", "US"] {
            assert!(matches!(
                bad.parse::<CurrencyCode>(),
                Err(XrpError::InvalidCurrencyCode(_))
            ));
        }
    }

    #[test]
    fn hex_code_round_trip() {
        let text = "0158415500000000C1F76FF6ECB0BAC600000000";
        let code: CurrencyCode = text.parse().unwrap();
        assert!(!code.is_standard());
        assert_eq!(code.to_string(), text);
    }

    #[test]
    fn ambiguous_zero_prefixed_code_is_rejected() {
        let mut bytes = [0u8; 20];
        bytes[19] = 1;
        assert!(CurrencyCode::from_bytes(bytes).is_err());

        let mut xrp = [0u8; 20];
        xrp[12..15].copy_from_slice(b"XRP");
        assert!(CurrencyCode::from_bytes(xrp).is_err());
    }
}
