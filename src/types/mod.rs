//! Primitive value types of the ledger protocol

/// Serialize through `Display` and deserialize through `FromStr`
macro_rules! serde_via_str {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use serde_via_str;

mod account_id;
mod amount;
mod currency;
mod currency_code;
mod hash;

pub use account_id::AccountId;
pub use amount::{Amount, IssuedAmount, XrpAmount};
pub use currency::Currency;
pub use currency_code::CurrencyCode;
pub use hash::{Hash128, Hash160, Hash256};
