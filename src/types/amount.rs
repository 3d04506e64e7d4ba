use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constant::{DROPS_PER_XRP, MAX_DROPS};
use crate::error::{Result, XrpError};
use crate::types::{AccountId, Currency, CurrencyCode};

const NOT_XRP_BIT: u64 = 0x8000_0000_0000_0000;
const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
const DROPS_MASK: u64 = POSITIVE_BIT - 1;

/// Native amount in drops (1 XRP = 1,000,000 drops)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct XrpAmount(u64);

impl XrpAmount {
    pub const ZERO: XrpAmount = XrpAmount(0);

    pub fn from_drops(drops: u64) -> Result<Self> {
        if drops > MAX_DROPS {
            return Err(XrpError::InvalidAmount(format!(
                "{} drops exceeds the 10^17 maximum",
                drops
            )));
        }
        Ok(Self(drops))
    }

    pub fn drops(&self) -> u64 {
        self.0
    }

    /// Parse a whole or fractional XRP value such as `"12.5"`
    pub fn from_xrp_str(xrp: &str) -> Result<Self> {
        let invalid = || XrpError::InvalidAmount(xrp.to_string());
        let (whole, frac) = xrp.split_once('.').unwrap_or((xrp, ""));
        if (whole.is_empty() && frac.is_empty()) || frac.len() > 6 {
            return Err(invalid());
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u64 = if whole.is_empty() { 0 } else { whole.parse()? };
        let frac_drops: u64 = if frac.is_empty() {
            0
        } else {
            format!("{:0<6}", frac).parse()?
        };
        let drops = whole
            .checked_mul(DROPS_PER_XRP)
            .and_then(|d| d.checked_add(frac_drops))
            .ok_or_else(invalid)?;
        Self::from_drops(drops)
    }

    /// Wire word: top bit clear, positive bit set, 62-bit drops
    pub fn to_bits(&self) -> u64 {
        POSITIVE_BIT | self.0
    }

    pub fn from_bits(bits: u64) -> Result<Self> {
        if bits & NOT_XRP_BIT != 0 {
            return Err(XrpError::InvalidAmount(format!(
                "{:016X} is an issued amount",
                bits
            )));
        }
        let drops = bits & DROPS_MASK;
        if bits & POSITIVE_BIT == 0 && drops != 0 {
            return Err(XrpError::InvalidAmount(format!(
                "negative native amount {:016X}",
                bits
            )));
        }
        Self::from_drops(drops)
    }
}

impl fmt::Display for XrpAmount {
    /// XRP with trailing fractional zeros trimmed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / DROPS_PER_XRP;
        let frac = self.0 % DROPS_PER_XRP;
        if frac == 0 {
            return write!(f, "{}", whole);
        }
        let frac = format!("{:06}", frac);
        write!(f, "{}.{}", whole, frac.trim_end_matches('0'))
    }
}

impl fmt::Debug for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XrpAmount({} drops)", self.0)
    }
}

impl FromStr for XrpAmount {
    type Err = XrpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_xrp_str(s)
    }
}

// JSON carries native amounts as a string of drops
impl Serialize for XrpAmount {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for XrpAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let drops: u64 = text.parse().map_err(serde::de::Error::custom)?;
        XrpAmount::from_drops(drops).map_err(serde::de::Error::custom)
    }
}

/// Amount of a non-native currency held against an issuer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IssuedAmount {
    pub currency: CurrencyCode,
    pub issuer: AccountId,
    pub value: Currency,
}

impl IssuedAmount {
    pub fn new(value: Currency, currency: CurrencyCode, issuer: AccountId) -> Result<Self> {
        if currency.is_xrp() {
            return Err(XrpError::InvalidCurrencyCode(
                "XRP cannot be an issued currency".to_string(),
            ));
        }
        Ok(Self {
            currency,
            issuer,
            value,
        })
    }
}

#[derive(Deserialize)]
struct IssuedAmountFields {
    currency: CurrencyCode,
    issuer: AccountId,
    value: Currency,
}

impl<'de> Deserialize<'de> for IssuedAmount {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = IssuedAmountFields::deserialize(deserializer)?;
        IssuedAmount::new(fields.value, fields.currency, fields.issuer)
            .map_err(serde::de::Error::custom)
    }
}

/// Value of an `Amount` field: native drops or an issued triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Xrp(XrpAmount),
    Issued(IssuedAmount),
}

impl Amount {
    pub fn drops(drops: u64) -> Result<Self> {
        Ok(Amount::Xrp(XrpAmount::from_drops(drops)?))
    }

    pub fn issued(value: Currency, currency: CurrencyCode, issuer: AccountId) -> Result<Self> {
        Ok(Amount::Issued(IssuedAmount::new(value, currency, issuer)?))
    }

    pub fn is_xrp(&self) -> bool {
        matches!(self, Amount::Xrp(_))
    }

    /// Canonical field payload: 8 bytes native, 48 bytes issued
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Amount::Xrp(xrp) => xrp.to_bits().to_be_bytes().to_vec(),
            Amount::Issued(issued) => {
                let mut out = Vec::with_capacity(48);
                out.extend_from_slice(&issued.value.to_bits().to_be_bytes());
                out.extend_from_slice(issued.currency.as_bytes());
                out.extend_from_slice(issued.issuer.as_bytes());
                out
            }
        }
    }
}

impl From<XrpAmount> for Amount {
    fn from(xrp: XrpAmount) -> Self {
        Amount::Xrp(xrp)
    }
}

impl From<IssuedAmount> for Amount {
    fn from(issued: IssuedAmount) -> Self {
        Amount::Issued(issued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xrp_text_trims_precision() {
        assert_eq!(XrpAmount::from_drops(1_000_000).unwrap().to_string(), "1");
        assert_eq!(XrpAmount::from_drops(1_500_000).unwrap().to_string(), "1.5");
        assert_eq!(XrpAmount::from_drops(1).unwrap().to_string(), "0.000001");
        assert_eq!("12.25".parse::<XrpAmount>().unwrap().drops(), 12_250_000);
        assert!("0.0000001".parse::<XrpAmount>().is_err());
        assert!("-1".parse::<XrpAmount>().is_err());
    }

    #[test]
    fn xrp_limit_is_enforced() {
        assert!(XrpAmount::from_drops(MAX_DROPS).is_ok());
        assert!(XrpAmount::from_drops(MAX_DROPS + 1).is_err());
    }

    #[test]
    fn xrp_wire_word() {
        let amount = XrpAmount::from_drops(1_000_000).unwrap();
        assert_eq!(amount.to_bits(), 0x4000_0000_000F_4240);
        assert_eq!(XrpAmount::from_bits(0x4000_0000_000F_4240).unwrap(), amount);
        assert_eq!(XrpAmount::from_bits(0).unwrap(), XrpAmount::ZERO);
        assert!(XrpAmount::from_bits(0x0000_0000_0000_0001).is_err());
    }

    #[test]
    fn issued_amount_bytes() {
        let amount = Amount::issued(
            "1".parse().unwrap(),
            "USD".parse().unwrap(),
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            hex::encode_upper(amount.to_bytes()),
            "D4838D7EA4C680000000000000000000000000005553440000000000B5F762798A53D543A014CAF8B297CFF8F2F937E8"
        );
        assert!(Amount::issued(Currency::ZERO, CurrencyCode::XRP, AccountId::new([1; 20])).is_err());
    }

    #[test]
    fn json_forms() {
        let xrp: Amount = serde_json::from_str("\"1000\"").unwrap();
        assert_eq!(xrp, Amount::drops(1000).unwrap());
        assert_eq!(serde_json::to_string(&xrp).unwrap(), "\"1000\"");

        let json = r#"{"currency":"USD","issuer":"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh","value":"1.5"}"#;
        let issued: Amount = serde_json::from_str(json).unwrap();
        assert!(!issued.is_xrp());
        assert_eq!(serde_json::to_string(&issued).unwrap(), json);
    }

    #[test]
    fn issued_json_rejects_xrp_currency() {
        let json = r#"{"currency":"XRP","issuer":"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh","value":"1"}"#;
        assert!(serde_json::from_str::<IssuedAmount>(json).is_err());
        assert!(serde_json::from_str::<Amount>(json).is_err());
    }
}
