use byteorder::{BigEndian, WriteBytesExt};

use crate::definitions::TypeCode;
use crate::error::{Result, XrpError};
use crate::st::{FieldId, Path, StObject, StValue};
use crate::types::{AccountId, Amount};

pub const MAX_SINGLE_BYTE_LENGTH: usize = 192;
pub const MAX_DOUBLE_BYTE_LENGTH: usize = 12_480;
pub const MAX_LENGTH_VALUE: usize = 918_744;

// path step type bits
pub(crate) const PATH_ACCOUNT: u8 = 0x01;
pub(crate) const PATH_CURRENCY: u8 = 0x10;
pub(crate) const PATH_ISSUER: u8 = 0x20;
pub(crate) const PATH_SEPARATOR: u8 = 0xFF;
pub(crate) const PATH_SET_END: u8 = 0x00;

/// Variable-length prefix for a payload of `length` bytes
pub fn encode_variable_length(length: usize) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(3);
    if length <= MAX_SINGLE_BYTE_LENGTH {
        result.push(length as u8);
    } else if length <= MAX_DOUBLE_BYTE_LENGTH {
        let adjusted = length - 193;
        result.push(193 + (adjusted >> 8) as u8);
        result.push((adjusted & 0xFF) as u8);
    } else if length <= MAX_LENGTH_VALUE {
        let adjusted = length - 12_481;
        result.push(241 + (adjusted >> 16) as u8);
        result.push(((adjusted >> 8) & 0xFF) as u8);
        result.push((adjusted & 0xFF) as u8);
    } else {
        return Err(XrpError::Overflow(format!(
            "length {} exceeds {} bytes",
            length, MAX_LENGTH_VALUE
        )));
    }
    Ok(result)
}

/// Serializer that only accepts fields in strictly ascending canonical order
#[derive(Debug, Default)]
pub struct StWriter {
    buf: Vec<u8>,
    last: Option<FieldId>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_field_id(&mut self, id: FieldId) -> Result<()> {
        if let Some(previous) = self.last {
            if id <= previous {
                return Err(XrpError::FieldOrder {
                    previous: previous.to_string(),
                    next: id.to_string(),
                });
            }
        }
        id.encode(&mut self.buf)?;
        self.last = Some(id);
        Ok(())
    }

    /// Field header followed by its value
    pub fn write_field(&mut self, id: FieldId, value: &StValue) -> Result<()> {
        if id.type_code != value.type_code().code() {
            return Err(XrpError::TypeMismatch {
                field: id.to_string(),
                expected: id.type_code().map_or("unknown type", TypeCode::name),
            });
        }
        self.write_field_id(id)?;
        self.write_value(value)
    }

    pub fn write_value(&mut self, value: &StValue) -> Result<()> {
        match value {
            StValue::UInt8(v) => self.write_u8(*v),
            StValue::UInt16(v) => self.write_u16(*v),
            StValue::UInt32(v) => self.write_u32(*v),
            StValue::UInt64(v) => self.write_u64(*v),
            StValue::Hash128(h) => self.write_raw(h.as_bytes()),
            StValue::Hash160(h) => self.write_raw(h.as_bytes()),
            StValue::Hash256(h) => self.write_raw(h.as_bytes()),
            StValue::Amount(amount) => self.write_amount(amount),
            StValue::Blob(bytes) => self.write_vl(bytes),
            StValue::AccountId(id) => self.write_account_id(id),
            StValue::Object(object) => self.write_object(object),
            StValue::Array(items) => self.write_array(items),
            StValue::PathSet(paths) => self.write_path_set(paths),
            StValue::Vector256(hashes) => {
                let bytes: Vec<u8> = hashes.iter().flat_map(|h| h.as_bytes().to_vec()).collect();
                self.write_vl(&bytes)
            }
        }
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.write_u8(value)?;
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.buf.write_u16::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buf.write_u32::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.buf.write_u64::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Length prefix followed by the bytes
    pub fn write_vl(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend(encode_variable_length(bytes.len())?);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Account ids carry a redundant length byte of 20
    pub fn write_account_id(&mut self, id: &AccountId) -> Result<()> {
        self.write_vl(id.as_bytes())
    }

    pub fn write_amount(&mut self, amount: &Amount) -> Result<()> {
        self.write_raw(&amount.to_bytes())
    }

    /// Inner object: its own canonical field run, then the end marker
    pub fn write_object(&mut self, object: &StObject) -> Result<()> {
        let mut inner = StWriter::new();
        object.write_fields(&mut inner, false)?;
        self.buf.extend(inner.into_bytes());
        FieldId::OBJECT_END.encode(&mut self.buf)
    }

    pub fn write_array(&mut self, items: &[(FieldId, StObject)]) -> Result<()> {
        for (id, object) in items {
            if id.type_code != FieldId::OBJECT_END.type_code {
                return Err(XrpError::TypeMismatch {
                    field: id.to_string(),
                    expected: "STObject",
                });
            }
            id.encode(&mut self.buf)?;
            self.write_object(object)?;
        }
        FieldId::ARRAY_END.encode(&mut self.buf)
    }

    pub fn write_path_set(&mut self, paths: &[Path]) -> Result<()> {
        for (i, path) in paths.iter().enumerate() {
            if i > 0 {
                self.buf.push(PATH_SEPARATOR);
            }
            for step in path {
                let mut kind = 0u8;
                if step.account.is_some() {
                    kind |= PATH_ACCOUNT;
                }
                if step.currency.is_some() {
                    kind |= PATH_CURRENCY;
                }
                if step.issuer.is_some() {
                    kind |= PATH_ISSUER;
                }
                if kind == 0 {
                    return Err(XrpError::InvalidAmount("empty path step".to_string()));
                }
                self.buf.push(kind);
                if let Some(account) = &step.account {
                    self.buf.extend_from_slice(account.as_bytes());
                }
                if let Some(currency) = &step.currency {
                    self.buf.extend_from_slice(currency.as_bytes());
                }
                if let Some(issuer) = &step.issuer {
                    self.buf.extend_from_slice(issuer.as_bytes());
                }
            }
        }
        self.buf.push(PATH_SET_END);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variable_length_tiers() {
        assert_eq!(encode_variable_length(0).unwrap(), vec![0]);
        assert_eq!(encode_variable_length(192).unwrap(), vec![192]);
        assert_eq!(encode_variable_length(193).unwrap(), vec![193, 0]);
        assert_eq!(encode_variable_length(12_480).unwrap(), vec![240, 255]);
        assert_eq!(encode_variable_length(12_481).unwrap(), vec![241, 0, 0]);
        assert_eq!(encode_variable_length(918_744).unwrap(), vec![254, 212, 23]);
        assert!(matches!(
            encode_variable_length(918_745),
            Err(XrpError::Overflow(_))
        ));
    }

    #[test]
    fn enforces_canonical_order() {
        let mut writer = StWriter::new();
        writer.write_field(FieldId::new(2, 4), &StValue::UInt32(1)).unwrap();
        let err = writer
            .write_field(FieldId::new(1, 2), &StValue::UInt16(0))
            .unwrap_err();
        assert_eq!(
            err,
            XrpError::FieldOrder {
                previous: "Sequence".to_string(),
                next: "TransactionType".to_string()
            }
        );
        assert!(matches!(
            writer.write_field(FieldId::new(2, 4), &StValue::UInt32(2)),
            Err(XrpError::FieldOrder { .. })
        ));
    }

    #[test]
    fn account_id_has_length_byte() {
        let mut writer = StWriter::new();
        let account: AccountId = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse().unwrap();
        writer
            .write_field(FieldId::new(8, 1), &StValue::AccountId(account))
            .unwrap();
        assert_eq!(
            hex::encode_upper(writer.into_bytes()),
            "8114B5F762798A53D543A014CAF8B297CFF8F2F937E8"
        );
    }

    #[test]
    fn memo_array_layout() {
        let memo = StObject::new().with("MemoData", vec![0xABu8]).unwrap();
        let mut writer = StWriter::new();
        writer
            .write_field(
                FieldId::new(15, 9),
                &StValue::Array(vec![(FieldId::new(14, 10), memo)]),
            )
            .unwrap();
        assert_eq!(hex::encode_upper(writer.into_bytes()), "F9EA7D01ABE1F1");
    }
}
