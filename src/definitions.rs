//! Field, transaction type and ledger entry type tables
//!
//! Every serialized field is identified by a type code and a field code
//! ("nth"). Canonical order sorts by type code first, then field code.

use std::fmt;

/// Serialized type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TypeCode {
    UInt16 = 1,
    UInt32 = 2,
    UInt64 = 3,
    Hash128 = 4,
    Hash256 = 5,
    Amount = 6,
    Blob = 7,
    AccountId = 8,
    StObject = 14,
    StArray = 15,
    UInt8 = 16,
    Hash160 = 17,
    PathSet = 18,
    Vector256 = 19,
}

impl TypeCode {
    pub fn from_code(code: u8) -> Option<Self> {
        let type_code = match code {
            1 => TypeCode::UInt16,
            2 => TypeCode::UInt32,
            3 => TypeCode::UInt64,
            4 => TypeCode::Hash128,
            5 => TypeCode::Hash256,
            6 => TypeCode::Amount,
            7 => TypeCode::Blob,
            8 => TypeCode::AccountId,
            14 => TypeCode::StObject,
            15 => TypeCode::StArray,
            16 => TypeCode::UInt8,
            17 => TypeCode::Hash160,
            18 => TypeCode::PathSet,
            19 => TypeCode::Vector256,
            _ => return None,
        };
        Some(type_code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Payload is preceded by a variable-length prefix
    pub fn is_vl_encoded(self) -> bool {
        matches!(
            self,
            TypeCode::Blob | TypeCode::AccountId | TypeCode::Vector256
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeCode::UInt16 => "UInt16",
            TypeCode::UInt32 => "UInt32",
            TypeCode::UInt64 => "UInt64",
            TypeCode::Hash128 => "Hash128",
            TypeCode::Hash256 => "Hash256",
            TypeCode::Amount => "Amount",
            TypeCode::Blob => "Blob",
            TypeCode::AccountId => "AccountID",
            TypeCode::StObject => "STObject",
            TypeCode::StArray => "STArray",
            TypeCode::UInt8 => "UInt8",
            TypeCode::Hash160 => "Hash160",
            TypeCode::PathSet => "PathSet",
            TypeCode::Vector256 => "Vector256",
        }
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: &'static str,
    pub type_code: TypeCode,
    pub field_code: u8,
    /// Included in the data that gets signed
    pub is_signing_field: bool,
}

impl FieldInfo {
    pub fn is_vl_encoded(&self) -> bool {
        self.type_code.is_vl_encoded()
    }
}

const fn field(name: &'static str, type_code: TypeCode, field_code: u8) -> FieldInfo {
    FieldInfo {
        name,
        type_code,
        field_code,
        is_signing_field: true,
    }
}

const fn unsigned(name: &'static str, type_code: TypeCode, field_code: u8) -> FieldInfo {
    FieldInfo {
        name,
        type_code,
        field_code,
        is_signing_field: false,
    }
}

use TypeCode::*;

static FIELDS: &[FieldInfo] = &[
    field("LedgerEntryType", UInt16, 1),
    field("TransactionType", UInt16, 2),
    field("SignerWeight", UInt16, 3),
    field("TransferFee", UInt16, 4),
    field("Version", UInt16, 16),
    field("NetworkID", UInt32, 1),
    field("Flags", UInt32, 2),
    field("SourceTag", UInt32, 3),
    field("Sequence", UInt32, 4),
    field("PreviousTxnLgrSeq", UInt32, 5),
    field("LedgerSequence", UInt32, 6),
    field("CloseTime", UInt32, 7),
    field("ParentCloseTime", UInt32, 8),
    field("SigningTime", UInt32, 9),
    field("Expiration", UInt32, 10),
    field("TransferRate", UInt32, 11),
    field("WalletSize", UInt32, 12),
    field("OwnerCount", UInt32, 13),
    field("DestinationTag", UInt32, 14),
    field("HighQualityIn", UInt32, 16),
    field("HighQualityOut", UInt32, 17),
    field("LowQualityIn", UInt32, 18),
    field("LowQualityOut", UInt32, 19),
    field("QualityIn", UInt32, 20),
    field("QualityOut", UInt32, 21),
    field("StampEscrow", UInt32, 22),
    field("BondAmount", UInt32, 23),
    field("LoadFee", UInt32, 24),
    field("OfferSequence", UInt32, 25),
    field("FirstLedgerSequence", UInt32, 26),
    field("LastLedgerSequence", UInt32, 27),
    field("TransactionIndex", UInt32, 28),
    field("OperationLimit", UInt32, 29),
    field("ReferenceFeeUnits", UInt32, 30),
    field("ReserveBase", UInt32, 31),
    field("ReserveIncrement", UInt32, 32),
    field("SetFlag", UInt32, 33),
    field("ClearFlag", UInt32, 34),
    field("SignerQuorum", UInt32, 35),
    field("CancelAfter", UInt32, 36),
    field("FinishAfter", UInt32, 37),
    field("SignerListID", UInt32, 38),
    field("SettleDelay", UInt32, 39),
    field("TicketCount", UInt32, 40),
    field("TicketSequence", UInt32, 41),
    field("IndexNext", UInt64, 1),
    field("IndexPrevious", UInt64, 2),
    field("BookNode", UInt64, 3),
    field("OwnerNode", UInt64, 4),
    field("BaseFee", UInt64, 5),
    field("ExchangeRate", UInt64, 6),
    field("LowNode", UInt64, 7),
    field("HighNode", UInt64, 8),
    field("DestinationNode", UInt64, 9),
    field("Cookie", UInt64, 10),
    field("EmailHash", Hash128, 1),
    field("LedgerHash", Hash256, 1),
    field("ParentHash", Hash256, 2),
    field("TransactionHash", Hash256, 3),
    field("AccountHash", Hash256, 4),
    field("PreviousTxnID", Hash256, 5),
    field("LedgerIndex", Hash256, 6),
    field("WalletLocator", Hash256, 7),
    field("RootIndex", Hash256, 8),
    field("AccountTxnID", Hash256, 9),
    field("BookDirectory", Hash256, 16),
    field("InvoiceID", Hash256, 17),
    field("Nickname", Hash256, 18),
    field("Amendment", Hash256, 19),
    field("Digest", Hash256, 21),
    field("Channel", Hash256, 22),
    field("ConsensusHash", Hash256, 23),
    field("CheckID", Hash256, 24),
    field("ValidatedHash", Hash256, 25),
    field("Amount", Amount, 1),
    field("Balance", Amount, 2),
    field("LimitAmount", Amount, 3),
    field("TakerPays", Amount, 4),
    field("TakerGets", Amount, 5),
    field("LowLimit", Amount, 6),
    field("HighLimit", Amount, 7),
    field("Fee", Amount, 8),
    field("SendMax", Amount, 9),
    field("DeliverMin", Amount, 10),
    field("MinimumOffer", Amount, 16),
    field("RippleEscrow", Amount, 17),
    field("DeliveredAmount", Amount, 18),
    field("PublicKey", Blob, 1),
    field("MessageKey", Blob, 2),
    field("SigningPubKey", Blob, 3),
    unsigned("TxnSignature", Blob, 4),
    unsigned("Signature", Blob, 6),
    field("Domain", Blob, 7),
    field("FundCode", Blob, 8),
    field("RemoveCode", Blob, 9),
    field("ExpireCode", Blob, 10),
    field("CreateCode", Blob, 11),
    field("MemoType", Blob, 12),
    field("MemoData", Blob, 13),
    field("MemoFormat", Blob, 14),
    field("Fulfillment", Blob, 16),
    field("Condition", Blob, 17),
    unsigned("MasterSignature", Blob, 18),
    field("Account", AccountId, 1),
    field("Owner", AccountId, 2),
    field("Destination", AccountId, 3),
    field("Issuer", AccountId, 4),
    field("Authorize", AccountId, 5),
    field("Unauthorize", AccountId, 6),
    field("RegularKey", AccountId, 8),
    field("ObjectEndMarker", StObject, 1),
    field("TransactionMetaData", StObject, 2),
    field("CreatedNode", StObject, 3),
    field("DeletedNode", StObject, 4),
    field("ModifiedNode", StObject, 5),
    field("PreviousFields", StObject, 6),
    field("FinalFields", StObject, 7),
    field("NewFields", StObject, 8),
    field("TemplateEntry", StObject, 9),
    field("Memo", StObject, 10),
    field("SignerEntry", StObject, 11),
    field("Signer", StObject, 16),
    field("Majority", StObject, 18),
    field("DisabledValidator", StObject, 19),
    field("ArrayEndMarker", StArray, 1),
    unsigned("Signers", StArray, 3),
    field("SignerEntries", StArray, 4),
    field("Template", StArray, 5),
    field("Necessary", StArray, 6),
    field("Sufficient", StArray, 7),
    field("AffectedNodes", StArray, 8),
    field("Memos", StArray, 9),
    field("Majorities", StArray, 16),
    field("DisabledValidators", StArray, 17),
    field("CloseResolution", UInt8, 1),
    field("Method", UInt8, 2),
    field("TransactionResult", UInt8, 3),
    field("TickSize", UInt8, 16),
    field("UNLModifyDisabling", UInt8, 17),
    field("TakerPaysCurrency", Hash160, 1),
    field("TakerPaysIssuer", Hash160, 2),
    field("TakerGetsCurrency", Hash160, 3),
    field("TakerGetsIssuer", Hash160, 4),
    field("Paths", PathSet, 1),
    field("Indexes", Vector256, 1),
    field("Hashes", Vector256, 2),
    field("Amendments", Vector256, 3),
];

pub fn field_by_name(name: &str) -> Option<&'static FieldInfo> {
    FIELDS.iter().find(|f| f.name == name)
}

pub fn field_by_code(type_code: u8, field_code: u8) -> Option<&'static FieldInfo> {
    FIELDS
        .iter()
        .find(|f| f.type_code.code() == type_code && f.field_code == field_code)
}

static TRANSACTION_TYPES: &[(&str, u16)] = &[
    ("Payment", 0),
    ("EscrowCreate", 1),
    ("EscrowFinish", 2),
    ("AccountSet", 3),
    ("EscrowCancel", 4),
    ("SetRegularKey", 5),
    ("OfferCreate", 7),
    ("OfferCancel", 8),
    ("TicketCreate", 10),
    ("SignerListSet", 12),
    ("PaymentChannelCreate", 13),
    ("PaymentChannelFund", 14),
    ("PaymentChannelClaim", 15),
    ("CheckCreate", 16),
    ("CheckCash", 17),
    ("CheckCancel", 18),
    ("DepositPreauth", 19),
    ("TrustSet", 20),
    ("AccountDelete", 21),
    ("EnableAmendment", 100),
    ("SetFee", 101),
    ("UNLModify", 102),
];

pub fn transaction_type_code(name: &str) -> Option<u16> {
    TRANSACTION_TYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

pub fn transaction_type_name(code: u16) -> Option<&'static str> {
    TRANSACTION_TYPES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

static LEDGER_ENTRY_TYPES: &[(&str, u16)] = &[
    ("Check", 0x0043),
    ("NegativeUNL", 0x004E),
    ("SignerList", 0x0053),
    ("Ticket", 0x0054),
    ("AccountRoot", 0x0061),
    ("DirectoryNode", 0x0064),
    ("Amendments", 0x0066),
    ("LedgerHashes", 0x0068),
    ("Offer", 0x006F),
    ("DepositPreauth", 0x0070),
    ("RippleState", 0x0072),
    ("FeeSettings", 0x0073),
    ("Escrow", 0x0075),
    ("PayChannel", 0x0078),
];

pub fn ledger_entry_type_code(name: &str) -> Option<u16> {
    LEDGER_ENTRY_TYPES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

pub fn ledger_entry_type_name(code: u16) -> Option<&'static str> {
    LEDGER_ENTRY_TYPES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_codes_are_unique() {
        let names: HashSet<_> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FIELDS.len());
        let codes: HashSet<_> = FIELDS
            .iter()
            .map(|f| (f.type_code, f.field_code))
            .collect();
        assert_eq!(codes.len(), FIELDS.len());
    }

    #[test]
    fn lookups_agree() {
        let fee = field_by_name("Fee").unwrap();
        assert_eq!((fee.type_code, fee.field_code), (TypeCode::Amount, 8));
        assert_eq!(field_by_code(6, 8), Some(fee));
        assert!(!field_by_name("TxnSignature").unwrap().is_signing_field);
        assert!(field_by_name("Account").unwrap().is_vl_encoded());
        assert!(field_by_name("NoSuchField").is_none());
    }

    #[test]
    fn type_code_round_trip() {
        for code in 0..=255u8 {
            if let Some(t) = TypeCode::from_code(code) {
                assert_eq!(t.code(), code);
            }
        }
        assert_eq!(TypeCode::from_code(9), None);
    }

    #[test]
    fn enumerants() {
        assert_eq!(transaction_type_code("Payment"), Some(0));
        assert_eq!(transaction_type_name(20), Some("TrustSet"));
        assert_eq!(ledger_entry_type_code("AccountRoot"), Some(0x61));
        assert_eq!(ledger_entry_type_name(0x72), Some("RippleState"));
        assert_eq!(transaction_type_name(6), None);
    }
}
