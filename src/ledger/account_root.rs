use crate::constant::ACCOUNT_SPACE;
use crate::definitions;
use crate::error::{Result, XrpError};
use crate::hashing::sha512_half_parts;
use crate::st::{StObject, StValue};
use crate::types::{AccountId, Amount, Hash128, Hash256, XrpAmount};

/// AccountRoot flag bits
pub mod flags {
    pub const PASSWORD_SPENT: u32 = 0x0001_0000;
    pub const REQUIRE_DEST_TAG: u32 = 0x0002_0000;
    pub const REQUIRE_AUTH: u32 = 0x0004_0000;
    pub const DISALLOW_XRP: u32 = 0x0008_0000;
    pub const DISABLE_MASTER: u32 = 0x0010_0000;
    pub const NO_FREEZE: u32 = 0x0020_0000;
    pub const GLOBAL_FREEZE: u32 = 0x0040_0000;
    pub const DEFAULT_RIPPLE: u32 = 0x0080_0000;
    pub const DEPOSIT_AUTH: u32 = 0x0100_0000;
}

/// An account's root ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRoot {
    pub account: AccountId,
    pub balance: XrpAmount,
    pub flags: u32,
    pub owner_count: u32,
    pub previous_txn_id: Hash256,
    pub previous_txn_lgr_seq: u32,
    pub sequence: u32,
    pub account_txn_id: Option<Hash256>,
    pub domain: Option<Vec<u8>>,
    pub email_hash: Option<Hash128>,
    pub message_key: Option<Vec<u8>>,
    pub regular_key: Option<AccountId>,
    pub tick_size: Option<u8>,
    pub transfer_rate: Option<u32>,
}

impl AccountRoot {
    pub const ENTRY_TYPE: u16 = 0x0061;

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Self::from_object(&StObject::decode(bytes)?)
    }

    pub fn from_object(object: &StObject) -> Result<Self> {
        let entry_type = object.require("LedgerEntryType", StValue::as_u16)?;
        if entry_type != Self::ENTRY_TYPE {
            return Err(XrpError::UnknownLedgerEntryType(format!(
                "expected AccountRoot, found {}",
                definitions::ledger_entry_type_name(entry_type)
                    .map_or_else(|| format!("{:#06X}", entry_type), str::to_string)
            )));
        }
        let balance = match object.require("Balance", StValue::as_amount)? {
            Amount::Xrp(drops) => drops,
            Amount::Issued(_) => {
                return Err(XrpError::InvalidAmount(
                    "AccountRoot balance must be XRP".to_string(),
                ))
            }
        };
        Ok(Self {
            account: object.require("Account", StValue::as_account_id)?,
            balance,
            flags: object.require("Flags", StValue::as_u32)?,
            owner_count: object.require("OwnerCount", StValue::as_u32)?,
            previous_txn_id: object.require("PreviousTxnID", StValue::as_hash256)?,
            previous_txn_lgr_seq: object.require("PreviousTxnLgrSeq", StValue::as_u32)?,
            sequence: object.require("Sequence", StValue::as_u32)?,
            account_txn_id: object.get_as("AccountTxnID", StValue::as_hash256)?,
            domain: object.get_as("Domain", StValue::as_blob)?.map(<[u8]>::to_vec),
            email_hash: object.get_as("EmailHash", StValue::as_hash128)?,
            message_key: object
                .get_as("MessageKey", StValue::as_blob)?
                .map(<[u8]>::to_vec),
            regular_key: object.get_as("RegularKey", StValue::as_account_id)?,
            tick_size: object.get_as("TickSize", StValue::as_u8)?,
            transfer_rate: object.get_as("TransferRate", StValue::as_u32)?,
        })
    }

    pub fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new()
            .with("LedgerEntryType", Self::ENTRY_TYPE)?
            .with("Account", self.account)?
            .with("Balance", self.balance)?
            .with("Flags", self.flags)?
            .with("OwnerCount", self.owner_count)?
            .with("PreviousTxnID", self.previous_txn_id)?
            .with("PreviousTxnLgrSeq", self.previous_txn_lgr_seq)?
            .with("Sequence", self.sequence)?;
        if let Some(v) = self.account_txn_id {
            object.set("AccountTxnID", v)?;
        }
        if let Some(v) = &self.domain {
            object.set("Domain", v.clone())?;
        }
        if let Some(v) = self.email_hash {
            object.set("EmailHash", v)?;
        }
        if let Some(v) = &self.message_key {
            object.set("MessageKey", v.clone())?;
        }
        if let Some(v) = self.regular_key {
            object.set("RegularKey", v)?;
        }
        if let Some(v) = self.tick_size {
            object.set("TickSize", v)?;
        }
        if let Some(v) = self.transfer_rate {
            object.set("TransferRate", v)?;
        }
        Ok(object)
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag == flag
    }

    /// Ledger object id of this entry
    pub fn index(&self) -> Hash256 {
        Self::index_for(&self.account)
    }

    /// SHA512-half of the account space key and the account id
    pub fn index_for(account: &AccountId) -> Hash256 {
        Hash256::new(sha512_half_parts(&[
            &ACCOUNT_SPACE.to_be_bytes(),
            account.as_bytes(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = "1100612200000000240000002A25005B679C2D0000000355C5D8E5BFE245C2DFDE2ECD3E53FA6FF46E1AC82B91314EE997471A338462FCBC6240000000017D78408114B5F762798A53D543A014CAF8B297CFF8F2F937E8";

    #[test]
    fn decodes_named_fields() {
        let root = AccountRoot::decode(&hex::decode(ENTRY).unwrap()).unwrap();
        assert_eq!(root.account.to_string(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        assert_eq!(root.balance.drops(), 25_000_000);
        assert_eq!(root.flags, 0);
        assert_eq!(root.owner_count, 3);
        assert_eq!(root.sequence, 42);
        assert_eq!(root.previous_txn_lgr_seq, 5_990_300);
        assert_eq!(
            root.previous_txn_id.to_string(),
            "C5D8E5BFE245C2DFDE2ECD3E53FA6FF46E1AC82B91314EE997471A338462FCBC"
        );
        assert_eq!(root.regular_key, None);
        assert!(!root.has_flag(flags::DISABLE_MASTER));
    }

    #[test]
    fn index_and_reencode() {
        let bytes = hex::decode(ENTRY).unwrap();
        let root = AccountRoot::decode(&bytes).unwrap();
        assert_eq!(
            root.index().to_string(),
            "2B6AC232AA4C4BE41BF49D2459FA4A0347E1B543A4C92FCEE0821C0201E2E9A8"
        );
        assert_eq!(root.to_object().unwrap().encode().unwrap(), bytes);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut object = AccountRoot::decode(&hex::decode(ENTRY).unwrap())
            .unwrap()
            .to_object()
            .unwrap();
        object.remove("OwnerCount");
        assert_eq!(
            AccountRoot::from_object(&object),
            Err(XrpError::MissingField("OwnerCount"))
        );
    }

    #[test]
    fn other_entry_type_is_rejected() {
        let object = StObject::new().with("LedgerEntryType", 0x0072u16).unwrap();
        assert!(matches!(
            AccountRoot::from_object(&object),
            Err(XrpError::UnknownLedgerEntryType(_))
        ));
    }
}
