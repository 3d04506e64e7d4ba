//! Read-only views of ledger data

mod account_root;
mod ledger_header;

pub use account_root::{flags as account_flags, AccountRoot};
pub use ledger_header::LedgerHeader;

use tracing::trace;

use crate::definitions;
use crate::error::{Result, XrpError};
use crate::st::{FieldId, StObject, StReader};

/// A decoded ledger entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    AccountRoot(AccountRoot),
    /// Entry types without a typed view keep their field tree
    Other { entry_type: u16, object: StObject },
}

impl LedgerEntry {
    /// Decode an entry, dispatching on its leading `LedgerEntryType` field
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = StReader::new(bytes);
        if reader.try_read_field_id()? != Some(FieldId::from_name("LedgerEntryType")?) {
            return Err(XrpError::MissingField("LedgerEntryType"));
        }
        let entry_type = reader.read_u16()?;
        trace!(
            entry_type = definitions::ledger_entry_type_name(entry_type).unwrap_or("unknown"),
            "decoding ledger entry"
        );

        let object = StObject::decode(bytes)?;
        match entry_type {
            AccountRoot::ENTRY_TYPE => Ok(LedgerEntry::AccountRoot(AccountRoot::from_object(&object)?)),
            _ => Ok(LedgerEntry::Other { entry_type, object }),
        }
    }

    pub fn entry_type(&self) -> u16 {
        match self {
            LedgerEntry::AccountRoot(_) => AccountRoot::ENTRY_TYPE,
            LedgerEntry::Other { entry_type, .. } => *entry_type,
        }
    }
}
