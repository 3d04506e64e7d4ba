use std::collections::BTreeMap;

use crate::definitions::TypeCode;
use crate::error::{Result, XrpError};
use crate::st::{FieldId, StReader, StWriter};
use crate::types::{AccountId, Amount, CurrencyCode, Hash128, Hash160, Hash256, IssuedAmount, XrpAmount};

/// One hop of a payment path; at least one member is present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathStep {
    pub account: Option<AccountId>,
    pub currency: Option<CurrencyCode>,
    pub issuer: Option<AccountId>,
}

pub type Path = Vec<PathStep>;

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Hash128(Hash128),
    Hash160(Hash160),
    Hash256(Hash256),
    Amount(Amount),
    Blob(Vec<u8>),
    AccountId(AccountId),
    Object(StObject),
    /// Elements keep their wrapping field, e.g. `Memo` inside `Memos`
    Array(Vec<(FieldId, StObject)>),
    PathSet(Vec<Path>),
    Vector256(Vec<Hash256>),
}

impl StValue {
    pub fn type_code(&self) -> TypeCode {
        match self {
            StValue::UInt8(_) => TypeCode::UInt8,
            StValue::UInt16(_) => TypeCode::UInt16,
            StValue::UInt32(_) => TypeCode::UInt32,
            StValue::UInt64(_) => TypeCode::UInt64,
            StValue::Hash128(_) => TypeCode::Hash128,
            StValue::Hash160(_) => TypeCode::Hash160,
            StValue::Hash256(_) => TypeCode::Hash256,
            StValue::Amount(_) => TypeCode::Amount,
            StValue::Blob(_) => TypeCode::Blob,
            StValue::AccountId(_) => TypeCode::AccountId,
            StValue::Object(_) => TypeCode::StObject,
            StValue::Array(_) => TypeCode::StArray,
            StValue::PathSet(_) => TypeCode::PathSet,
            StValue::Vector256(_) => TypeCode::Vector256,
        }
    }

    pub fn as_u8(&self) -> Option<u8> {
        match self {
            StValue::UInt8(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self {
            StValue::UInt16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            StValue::UInt32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            StValue::UInt64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_hash128(&self) -> Option<Hash128> {
        match self {
            StValue::Hash128(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_hash256(&self) -> Option<Hash256> {
        match self {
            StValue::Hash256(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<Amount> {
        match self {
            StValue::Amount(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            StValue::Blob(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_account_id(&self) -> Option<AccountId> {
        match self {
            StValue::AccountId(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&StObject> {
        match self {
            StValue::Object(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for StValue {
                fn from(value: $ty) -> Self {
                    StValue::$variant(value.into())
                }
            }
        )*
    };
}

value_from! {
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    Hash128 => Hash128,
    Hash160 => Hash160,
    Hash256 => Hash256,
    Amount => Amount,
    XrpAmount => Amount,
    IssuedAmount => Amount,
    Vec<u8> => Blob,
    AccountId => AccountId,
    StObject => Object,
    Vec<Hash256> => Vector256,
}

/// Field tree kept in canonical (type code, field code) order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StObject {
    fields: BTreeMap<FieldId, StValue>,
}

impl StObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, rejecting one whose type disagrees with the field id
    pub fn insert(&mut self, id: FieldId, value: StValue) -> Result<Option<StValue>> {
        if id.type_code != value.type_code().code() {
            return Err(XrpError::TypeMismatch {
                field: id.to_string(),
                expected: id.type_code().map_or("unknown type", TypeCode::name),
            });
        }
        Ok(self.fields.insert(id, value))
    }

    pub fn set(&mut self, name: &str, value: impl Into<StValue>) -> Result<()> {
        self.insert(FieldId::from_name(name)?, value.into())?;
        Ok(())
    }

    /// Builder form of [`StObject::set`]
    pub fn with(mut self, name: &str, value: impl Into<StValue>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&StValue> {
        let id = FieldId::from_name(name).ok()?;
        self.fields.get(&id)
    }

    pub fn get_by_id(&self, id: FieldId) -> Option<&StValue> {
        self.fields.get(&id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<StValue> {
        let id = FieldId::from_name(name).ok()?;
        self.fields.remove(&id)
    }

    /// Typed lookup: `Ok(None)` when absent, `TypeMismatch` when the stored
    /// value has another type
    pub fn get_as<'a, T>(
        &'a self,
        name: &'static str,
        extract: impl FnOnce(&'a StValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).ok_or_else(|| XrpError::TypeMismatch {
                field: name.to_string(),
                expected: value.type_code().name(),
            }),
        }
    }

    /// Like [`StObject::get_as`] but the field must be present
    pub fn require<'a, T>(
        &'a self,
        name: &'static str,
        extract: impl FnOnce(&'a StValue) -> Option<T>,
    ) -> Result<T> {
        self.get_as(name, extract)?.ok_or(XrpError::MissingField(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &StValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Write every field (or only signing fields) in canonical order
    pub fn write_fields(&self, writer: &mut StWriter, signing_only: bool) -> Result<()> {
        for (id, value) in &self.fields {
            if signing_only && !id.is_signing_field() {
                continue;
            }
            writer.write_field(*id, value)?;
        }
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = StWriter::new();
        self.write_fields(&mut writer, false)?;
        Ok(writer.into_bytes())
    }

    /// Encoding without `TxnSignature`, `Signature` and other non-signing fields
    pub fn encode_signing(&self) -> Result<Vec<u8>> {
        let mut writer = StWriter::new();
        self.write_fields(&mut writer, true)?;
        Ok(writer.into_bytes())
    }

    /// Decode a top-level object that runs to the end of the buffer
    ///
    /// Out-of-order or repeated fields are rejected with `FieldOrder`, so a
    /// successful decode re-encodes to the same bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        StReader::new(bytes).read_fields()
    }
}

impl<'a> IntoIterator for &'a StObject {
    type Item = (&'a FieldId, &'a StValue);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldId, StValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> StObject {
        StObject::new()
            .with("TransactionType", 0u16)
            .unwrap()
            .with("Sequence", 1u32)
            .unwrap()
            .with("Fee", Amount::drops(12).unwrap())
            .unwrap()
            .with("Flags", 0u32)
            .unwrap()
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = payment();
        let b = StObject::new()
            .with("Flags", 0u32)
            .unwrap()
            .with("Fee", Amount::drops(12).unwrap())
            .unwrap()
            .with("Sequence", 1u32)
            .unwrap()
            .with("TransactionType", 0u16)
            .unwrap();
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
        assert_eq!(
            hex::encode_upper(a.encode().unwrap()),
            "1200002200000000240000000168400000000000000C"
        );
    }

    #[test]
    fn rejects_value_of_wrong_type() {
        let mut object = StObject::new();
        assert!(matches!(
            object.set("Sequence", 1u16),
            Err(XrpError::TypeMismatch { .. })
        ));
        assert!(matches!(
            object.set("NotAField", 1u32),
            Err(XrpError::UnknownField(_))
        ));
    }

    #[test]
    fn signing_encoding_skips_signatures() {
        let signed = payment().with("TxnSignature", vec![1u8, 2, 3]).unwrap();
        assert_eq!(signed.encode_signing().unwrap(), payment().encode().unwrap());
        assert_ne!(signed.encode().unwrap(), payment().encode().unwrap());
    }

    #[test]
    fn typed_accessors() {
        let object = payment();
        assert_eq!(object.require("Sequence", StValue::as_u32).unwrap(), 1);
        assert_eq!(object.get_as("OwnerCount", StValue::as_u32).unwrap(), None);
        assert_eq!(
            object.require("Account", StValue::as_account_id),
            Err(XrpError::MissingField("Account"))
        );
        assert!(matches!(
            object.get_as("Sequence", StValue::as_u64),
            Err(XrpError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn decode_round_trip() {
        let object = payment();
        let bytes = object.encode().unwrap();
        assert_eq!(StObject::decode(&bytes).unwrap(), object);
    }
}
