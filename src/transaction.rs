//! Typed transactions that lower to a field tree

use serde_json::Value;

use crate::definitions;
use crate::error::{Result, XrpError};
use crate::keypair::KeyPair;
use crate::signing::{self, SignedTransaction};
use crate::st::{FieldId, StObject, StValue};
use crate::types::{AccountId, Amount, Hash128, Hash256, IssuedAmount, XrpAmount};

/// Common transaction flag values
pub mod flags {
    pub const FULLY_CANONICAL_SIG: u32 = 0x8000_0000;
    pub const PAYMENT_NO_DIRECT_RIPPLE: u32 = 0x0001_0000;
    pub const PAYMENT_PARTIAL: u32 = 0x0002_0000;
    pub const PAYMENT_LIMIT_QUALITY: u32 = 0x0004_0000;
    pub const OFFER_PASSIVE: u32 = 0x0001_0000;
    pub const OFFER_IMMEDIATE_OR_CANCEL: u32 = 0x0002_0000;
    pub const OFFER_FILL_OR_KILL: u32 = 0x0004_0000;
    pub const OFFER_SELL: u32 = 0x0008_0000;
    pub const TRUST_SET_AUTH: u32 = 0x0001_0000;
    pub const TRUST_SET_NO_RIPPLE: u32 = 0x0002_0000;
    pub const TRUST_CLEAR_NO_RIPPLE: u32 = 0x0004_0000;
    pub const TRUST_SET_FREEZE: u32 = 0x0010_0000;
    pub const TRUST_CLEAR_FREEZE: u32 = 0x0020_0000;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Memo {
    pub memo_type: Option<Vec<u8>>,
    pub memo_data: Option<Vec<u8>>,
    pub memo_format: Option<Vec<u8>>,
}

impl Memo {
    pub fn text(memo_type: &str, memo_data: &str) -> Self {
        Self {
            memo_type: Some(memo_type.as_bytes().to_vec()),
            memo_data: Some(memo_data.as_bytes().to_vec()),
            memo_format: None,
        }
    }

    fn to_object(&self) -> Result<StObject> {
        let mut object = StObject::new();
        if let Some(v) = &self.memo_type {
            object.set("MemoType", v.clone())?;
        }
        if let Some(v) = &self.memo_data {
            object.set("MemoData", v.clone())?;
        }
        if let Some(v) = &self.memo_format {
            object.set("MemoFormat", v.clone())?;
        }
        Ok(object)
    }

    fn from_object(object: &StObject) -> Result<Self> {
        let blob = |name| Ok::<_, XrpError>(object.get_as(name, StValue::as_blob)?.map(<[u8]>::to_vec));
        Ok(Self {
            memo_type: blob("MemoType")?,
            memo_data: blob("MemoData")?,
            memo_format: blob("MemoFormat")?,
        })
    }
}

/// Type-specific part of a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Payment {
        destination: AccountId,
        amount: Amount,
        destination_tag: Option<u32>,
        invoice_id: Option<Hash256>,
        send_max: Option<Amount>,
        deliver_min: Option<Amount>,
    },
    AccountSet {
        set_flag: Option<u32>,
        clear_flag: Option<u32>,
        domain: Option<Vec<u8>>,
        email_hash: Option<Hash128>,
        transfer_rate: Option<u32>,
        tick_size: Option<u8>,
    },
    SetRegularKey {
        /// `None` removes the regular key
        regular_key: Option<AccountId>,
    },
    TrustSet {
        limit_amount: IssuedAmount,
        quality_in: Option<u32>,
        quality_out: Option<u32>,
    },
    OfferCreate {
        taker_pays: Amount,
        taker_gets: Amount,
        expiration: Option<u32>,
        offer_sequence: Option<u32>,
    },
    OfferCancel {
        offer_sequence: u32,
    },
}

impl TransactionKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Payment { .. } => "Payment",
            TransactionKind::AccountSet { .. } => "AccountSet",
            TransactionKind::SetRegularKey { .. } => "SetRegularKey",
            TransactionKind::TrustSet { .. } => "TrustSet",
            TransactionKind::OfferCreate { .. } => "OfferCreate",
            TransactionKind::OfferCancel { .. } => "OfferCancel",
        }
    }
}

/// A transaction ready to be lowered into a field tree and signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub account: AccountId,
    pub fee: XrpAmount,
    pub sequence: u32,
    pub flags: u32,
    pub last_ledger_sequence: Option<u32>,
    pub source_tag: Option<u32>,
    pub network_id: Option<u32>,
    pub ticket_sequence: Option<u32>,
    pub memos: Vec<Memo>,
    pub kind: TransactionKind,
}

impl Transaction {
    pub fn new(account: AccountId, fee: XrpAmount, sequence: u32, kind: TransactionKind) -> Self {
        Self {
            account,
            fee,
            sequence,
            flags: 0,
            last_ledger_sequence: None,
            source_tag: None,
            network_id: None,
            ticket_sequence: None,
            memos: Vec::new(),
            kind,
        }
    }

    pub fn payment(
        account: AccountId,
        destination: AccountId,
        amount: Amount,
        fee: XrpAmount,
        sequence: u32,
    ) -> Self {
        Self::new(
            account,
            fee,
            sequence,
            TransactionKind::Payment {
                destination,
                amount,
                destination_tag: None,
                invoice_id: None,
                send_max: None,
                deliver_min: None,
            },
        )
    }

    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_last_ledger_sequence(mut self, sequence: u32) -> Self {
        self.last_ledger_sequence = Some(sequence);
        self
    }

    pub fn with_memo(mut self, memo: Memo) -> Self {
        self.memos.push(memo);
        self
    }

    pub fn transaction_type(&self) -> &'static str {
        self.kind.name()
    }

    /// Lower to the field tree that gets serialized and signed
    pub fn to_st_object(&self) -> Result<StObject> {
        let type_code = definitions::transaction_type_code(self.transaction_type())
            .ok_or_else(|| XrpError::UnknownTransactionType(self.transaction_type().to_string()))?;

        let mut object = StObject::new();
        object.set("TransactionType", type_code)?;
        object.set("Account", self.account)?;
        object.set("Fee", self.fee)?;
        object.set("Sequence", self.sequence)?;
        object.set("Flags", self.flags)?;
        set_opt(&mut object, "LastLedgerSequence", self.last_ledger_sequence)?;
        set_opt(&mut object, "SourceTag", self.source_tag)?;
        set_opt(&mut object, "NetworkID", self.network_id)?;
        set_opt(&mut object, "TicketSequence", self.ticket_sequence)?;
        if !self.memos.is_empty() {
            let memo_id = FieldId::from_name("Memo")?;
            let memos = self
                .memos
                .iter()
                .map(|memo| Ok((memo_id, memo.to_object()?)))
                .collect::<Result<Vec<_>>>()?;
            object.set("Memos", StValue::Array(memos))?;
        }

        match &self.kind {
            TransactionKind::Payment {
                destination,
                amount,
                destination_tag,
                invoice_id,
                send_max,
                deliver_min,
            } => {
                object.set("Destination", *destination)?;
                object.set("Amount", *amount)?;
                set_opt(&mut object, "DestinationTag", *destination_tag)?;
                set_opt(&mut object, "InvoiceID", *invoice_id)?;
                set_opt(&mut object, "SendMax", *send_max)?;
                set_opt(&mut object, "DeliverMin", *deliver_min)?;
            }
            TransactionKind::AccountSet {
                set_flag,
                clear_flag,
                domain,
                email_hash,
                transfer_rate,
                tick_size,
            } => {
                set_opt(&mut object, "SetFlag", *set_flag)?;
                set_opt(&mut object, "ClearFlag", *clear_flag)?;
                set_opt(&mut object, "Domain", domain.clone())?;
                set_opt(&mut object, "EmailHash", *email_hash)?;
                set_opt(&mut object, "TransferRate", *transfer_rate)?;
                set_opt(&mut object, "TickSize", *tick_size)?;
            }
            TransactionKind::SetRegularKey { regular_key } => {
                set_opt(&mut object, "RegularKey", *regular_key)?;
            }
            TransactionKind::TrustSet {
                limit_amount,
                quality_in,
                quality_out,
            } => {
                object.set("LimitAmount", *limit_amount)?;
                set_opt(&mut object, "QualityIn", *quality_in)?;
                set_opt(&mut object, "QualityOut", *quality_out)?;
            }
            TransactionKind::OfferCreate {
                taker_pays,
                taker_gets,
                expiration,
                offer_sequence,
            } => {
                object.set("TakerPays", *taker_pays)?;
                object.set("TakerGets", *taker_gets)?;
                set_opt(&mut object, "Expiration", *expiration)?;
                set_opt(&mut object, "OfferSequence", *offer_sequence)?;
            }
            TransactionKind::OfferCancel { offer_sequence } => {
                object.set("OfferSequence", *offer_sequence)?;
            }
        }
        Ok(object)
    }

    /// Rebuild a typed transaction from a decoded field tree
    pub fn from_st_object(object: &StObject) -> Result<Self> {
        let type_code = object.require("TransactionType", StValue::as_u16)?;
        let type_name = definitions::transaction_type_name(type_code)
            .ok_or_else(|| XrpError::UnknownTransactionType(type_code.to_string()))?;

        let kind = match type_name {
            "Payment" => TransactionKind::Payment {
                destination: object.require("Destination", StValue::as_account_id)?,
                amount: object.require("Amount", StValue::as_amount)?,
                destination_tag: object.get_as("DestinationTag", StValue::as_u32)?,
                invoice_id: object.get_as("InvoiceID", StValue::as_hash256)?,
                send_max: object.get_as("SendMax", StValue::as_amount)?,
                deliver_min: object.get_as("DeliverMin", StValue::as_amount)?,
            },
            "AccountSet" => TransactionKind::AccountSet {
                set_flag: object.get_as("SetFlag", StValue::as_u32)?,
                clear_flag: object.get_as("ClearFlag", StValue::as_u32)?,
                domain: object
                    .get_as("Domain", StValue::as_blob)?
                    .map(<[u8]>::to_vec),
                email_hash: object.get_as("EmailHash", StValue::as_hash128)?,
                transfer_rate: object.get_as("TransferRate", StValue::as_u32)?,
                tick_size: object.get_as("TickSize", StValue::as_u8)?,
            },
            "SetRegularKey" => TransactionKind::SetRegularKey {
                regular_key: object.get_as("RegularKey", StValue::as_account_id)?,
            },
            "TrustSet" => TransactionKind::TrustSet {
                limit_amount: match object.require("LimitAmount", StValue::as_amount)? {
                    Amount::Issued(issued) => issued,
                    Amount::Xrp(_) => {
                        return Err(XrpError::InvalidAmount(
                            "LimitAmount must be an issued amount".to_string(),
                        ))
                    }
                },
                quality_in: object.get_as("QualityIn", StValue::as_u32)?,
                quality_out: object.get_as("QualityOut", StValue::as_u32)?,
            },
            "OfferCreate" => TransactionKind::OfferCreate {
                taker_pays: object.require("TakerPays", StValue::as_amount)?,
                taker_gets: object.require("TakerGets", StValue::as_amount)?,
                expiration: object.get_as("Expiration", StValue::as_u32)?,
                offer_sequence: object.get_as("OfferSequence", StValue::as_u32)?,
            },
            "OfferCancel" => TransactionKind::OfferCancel {
                offer_sequence: object.require("OfferSequence", StValue::as_u32)?,
            },
            other => return Err(XrpError::UnknownTransactionType(other.to_string())),
        };

        let fee = match object.require("Fee", StValue::as_amount)? {
            Amount::Xrp(fee) => fee,
            Amount::Issued(_) => {
                return Err(XrpError::InvalidAmount("Fee must be in drops".to_string()))
            }
        };
        let memos = match object.get("Memos") {
            Some(StValue::Array(items)) => items
                .iter()
                .map(|(_, memo)| Memo::from_object(memo))
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };

        Ok(Self {
            account: object.require("Account", StValue::as_account_id)?,
            fee,
            sequence: object.require("Sequence", StValue::as_u32)?,
            flags: object.get_as("Flags", StValue::as_u32)?.unwrap_or(0),
            last_ledger_sequence: object.get_as("LastLedgerSequence", StValue::as_u32)?,
            source_tag: object.get_as("SourceTag", StValue::as_u32)?,
            network_id: object.get_as("NetworkID", StValue::as_u32)?,
            ticket_sequence: object.get_as("TicketSequence", StValue::as_u32)?,
            memos,
            kind,
        })
    }

    pub fn to_json(&self) -> Result<Value> {
        self.to_st_object()?.to_json()
    }

    pub fn sign(&self, keypair: &KeyPair) -> Result<SignedTransaction> {
        signing::sign(&self.to_st_object()?, keypair)
    }
}

fn set_opt<T: Into<StValue>>(object: &mut StObject, name: &str, value: Option<T>) -> Result<()> {
    match value {
        Some(value) => object.set(name, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;

    fn account(address: &str) -> AccountId {
        address.parse().unwrap()
    }

    #[test]
    fn payment_lowers_to_expected_fields() {
        let tx = Transaction::payment(
            account("rG31cLyErnqeVj2eomEjBZtq7PYaupGYzL"),
            account("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"),
            Amount::drops(1_000_000).unwrap(),
            XrpAmount::from_drops(12).unwrap(),
            1,
        )
        .with_last_ledger_sequence(5_990_400);
        let json = tx.to_json().unwrap();
        assert_eq!(json["TransactionType"], "Payment");
        assert_eq!(json["Amount"], "1000000");
        assert_eq!(json["Fee"], "12");
        assert_eq!(json["LastLedgerSequence"], 5_990_400);
        assert!(json.get("SigningPubKey").is_none());
    }

    #[test]
    fn typed_round_trip_through_bytes() {
        let issuer = account("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        let limit = IssuedAmount::new(
            "1000".parse::<Currency>().unwrap(),
            "USD".parse().unwrap(),
            issuer,
        )
        .unwrap();
        let tx = Transaction::new(
            account("rJgzgUKLw6dUoDFXgbHNb2euXdMcNn6ioh"),
            XrpAmount::from_drops(10).unwrap(),
            7,
            TransactionKind::TrustSet {
                limit_amount: limit,
                quality_in: None,
                quality_out: Some(1_000_000_000),
            },
        )
        .with_flags(flags::TRUST_SET_NO_RIPPLE)
        .with_memo(Memo::text("text/plain", "hello"));

        let bytes = tx.to_st_object().unwrap().encode().unwrap();
        let decoded = Transaction::from_st_object(&StObject::decode(&bytes).unwrap()).unwrap();
        assert_eq!(decoded, tx);
    }

    #[test]
    fn unsupported_type_is_rejected() {
        let object = StObject::new().with("TransactionType", 21u16).unwrap();
        assert_eq!(
            Transaction::from_st_object(&object),
            Err(XrpError::UnknownTransactionType("AccountDelete".to_string()))
        );
    }
}
