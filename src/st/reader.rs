use byteorder::{BigEndian, ReadBytesExt};

use crate::definitions::TypeCode;
use crate::error::{Result, XrpError};
use crate::st::writer::{
    PATH_ACCOUNT, PATH_CURRENCY, PATH_ISSUER, PATH_SEPARATOR, PATH_SET_END,
};
use crate::st::{FieldId, Path, PathStep, StObject, StValue};
use crate::types::{
    AccountId, Amount, Currency, CurrencyCode, Hash128, Hash160, Hash256, IssuedAmount, XrpAmount,
};

/// Decode a variable-length prefix, returning the length and bytes consumed
pub fn decode_variable_length(bytes: &[u8]) -> Result<(usize, usize)> {
    let byte = |i: usize| {
        bytes.get(i).map(|b| *b as usize).ok_or(XrpError::UnexpectedEof {
            needed: i + 1,
            remaining: bytes.len(),
        })
    };
    let b1 = byte(0)?;
    match b1 {
        0..=192 => Ok((b1, 1)),
        193..=240 => Ok((193 + (b1 - 193) * 256 + byte(1)?, 2)),
        241..=254 => Ok((12_481 + (b1 - 241) * 65_536 + byte(1)? * 256 + byte(2)?, 3)),
        _ => Err(XrpError::Overflow("length prefix 0xFF".to_string())),
    }
}

/// Pull-style cursor over a serialized field stream
///
/// Callers loop on [`StReader::try_read_field_id`] and then consume the
/// value with the typed read matching the field's type code. Every read
/// fails with [`XrpError::UnexpectedEof`] on a truncated buffer.
#[derive(Debug, Clone)]
pub struct StReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> StReader<'a> {
    /// Deepest allowed nesting of inner objects and arrays
    pub const MAX_DEPTH: usize = 10;

    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            depth: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(XrpError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn peek(&self) -> Result<u8> {
        self.bytes.get(self.pos).copied().ok_or(XrpError::UnexpectedEof {
            needed: 1,
            remaining: 0,
        })
    }

    /// Next field header, or `None` at the end of the buffer
    pub fn try_read_field_id(&mut self) -> Result<Option<FieldId>> {
        if self.is_empty() {
            return Ok(None);
        }
        let (id, consumed) = FieldId::decode(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(Some(id))
    }

    pub fn read_field_id(&mut self) -> Result<FieldId> {
        self.try_read_field_id()?.ok_or(XrpError::UnexpectedEof {
            needed: 1,
            remaining: 0,
        })
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?.read_u8()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.take(2)?.read_u16::<BigEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.take(4)?.read_u32::<BigEndian>()?)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(self.take(8)?.read_u64::<BigEndian>()?)
    }

    pub fn read_hash128(&mut self) -> Result<Hash128> {
        Hash128::from_slice(self.take(Hash128::LEN)?)
    }

    pub fn read_hash160(&mut self) -> Result<Hash160> {
        Hash160::from_slice(self.take(Hash160::LEN)?)
    }

    pub fn read_hash256(&mut self) -> Result<Hash256> {
        Hash256::from_slice(self.take(Hash256::LEN)?)
    }

    pub fn read_vl_length(&mut self) -> Result<usize> {
        let (length, consumed) = decode_variable_length(&self.bytes[self.pos..])?;
        self.pos += consumed;
        Ok(length)
    }

    /// Length-prefixed payload
    pub fn read_vl(&mut self) -> Result<&'a [u8]> {
        let length = self.read_vl_length()?;
        self.take(length)
    }

    pub fn read_blob(&mut self) -> Result<Vec<u8>> {
        Ok(self.read_vl()?.to_vec())
    }

    /// Account id behind its length byte, which must be 20
    pub fn read_account_id(&mut self) -> Result<AccountId> {
        AccountId::from_slice(self.read_vl()?)
    }

    pub fn read_amount(&mut self) -> Result<Amount> {
        if self.peek()? & 0x80 == 0 {
            return Ok(Amount::Xrp(XrpAmount::from_bits(self.read_u64()?)?));
        }
        let value = Currency::from_bits(self.read_u64()?)?;
        let currency = CurrencyCode::from_slice(self.take(20)?)?;
        let issuer = AccountId::from_slice(self.take(20)?)?;
        Ok(Amount::Issued(IssuedAmount::new(value, currency, issuer)?))
    }

    pub fn read_path_set(&mut self) -> Result<Vec<Path>> {
        let mut paths = Vec::new();
        let mut path = Path::new();
        loop {
            match self.read_u8()? {
                PATH_SET_END => break,
                PATH_SEPARATOR => paths.push(std::mem::take(&mut path)),
                kind => {
                    if kind & !(PATH_ACCOUNT | PATH_CURRENCY | PATH_ISSUER) != 0 {
                        return Err(XrpError::InvalidAmount(format!(
                            "path step type {:#04X}",
                            kind
                        )));
                    }
                    let mut step = PathStep::default();
                    if kind & PATH_ACCOUNT != 0 {
                        step.account = Some(AccountId::from_slice(self.take(20)?)?);
                    }
                    if kind & PATH_CURRENCY != 0 {
                        step.currency = Some(CurrencyCode::from_slice(self.take(20)?)?);
                    }
                    if kind & PATH_ISSUER != 0 {
                        step.issuer = Some(AccountId::from_slice(self.take(20)?)?);
                    }
                    path.push(step);
                }
            }
        }
        paths.push(path);
        Ok(paths)
    }

    pub fn read_vector256(&mut self) -> Result<Vec<Hash256>> {
        let bytes = self.read_vl()?;
        if bytes.len() % Hash256::LEN != 0 {
            return Err(XrpError::InvalidLength {
                expected: bytes.len() / Hash256::LEN * Hash256::LEN,
                actual: bytes.len(),
            });
        }
        bytes.chunks(Hash256::LEN).map(Hash256::from_slice).collect()
    }

    /// Top-level field run that ends with the buffer
    pub fn read_fields(&mut self) -> Result<StObject> {
        self.read_field_run(None)
    }

    /// Inner object up to and including its end marker
    pub fn read_object(&mut self) -> Result<StObject> {
        self.enter()?;
        let object = self.read_field_run(Some(FieldId::OBJECT_END));
        self.depth -= 1;
        object
    }

    pub fn read_array(&mut self) -> Result<Vec<(FieldId, StObject)>> {
        self.enter()?;
        let items = self.read_array_items();
        self.depth -= 1;
        items
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= Self::MAX_DEPTH {
            return Err(XrpError::NestingTooDeep(Self::MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    /// Fields must arrive in strictly ascending canonical order
    fn read_field_run(&mut self, end: Option<FieldId>) -> Result<StObject> {
        let mut object = StObject::new();
        let mut previous: Option<FieldId> = None;
        loop {
            let id = match (self.try_read_field_id()?, end) {
                (Some(id), Some(end)) if id == end => return Ok(object),
                (Some(id), _) => id,
                (None, None) => return Ok(object),
                (None, Some(_)) => {
                    return Err(XrpError::UnexpectedEof {
                        needed: 1,
                        remaining: 0,
                    })
                }
            };
            if let Some(previous) = previous {
                if id <= previous {
                    return Err(XrpError::FieldOrder {
                        previous: previous.to_string(),
                        next: id.to_string(),
                    });
                }
            }
            previous = Some(id);
            let value = self.read_value(id)?;
            object.insert(id, value)?;
        }
    }

    fn read_array_items(&mut self) -> Result<Vec<(FieldId, StObject)>> {
        let mut items = Vec::new();
        loop {
            let id = self.read_field_id()?;
            if id == FieldId::ARRAY_END {
                return Ok(items);
            }
            if id.type_code != TypeCode::StObject.code() || id == FieldId::OBJECT_END {
                return Err(XrpError::TypeMismatch {
                    field: id.to_string(),
                    expected: "STObject",
                });
            }
            items.push((id, self.read_object()?));
        }
    }

    /// Read the value belonging to a field id just returned by the cursor
    pub fn read_value(&mut self, id: FieldId) -> Result<StValue> {
        if id == FieldId::OBJECT_END || id == FieldId::ARRAY_END {
            return Err(XrpError::InvalidFieldId(format!("unexpected end marker {}", id)));
        }
        let type_code = id
            .type_code()
            .ok_or_else(|| XrpError::InvalidFieldId(format!("{} has an unknown type", id)))?;
        let value = match type_code {
            TypeCode::UInt8 => StValue::UInt8(self.read_u8()?),
            TypeCode::UInt16 => StValue::UInt16(self.read_u16()?),
            TypeCode::UInt32 => StValue::UInt32(self.read_u32()?),
            TypeCode::UInt64 => StValue::UInt64(self.read_u64()?),
            TypeCode::Hash128 => StValue::Hash128(self.read_hash128()?),
            TypeCode::Hash160 => StValue::Hash160(self.read_hash160()?),
            TypeCode::Hash256 => StValue::Hash256(self.read_hash256()?),
            TypeCode::Amount => StValue::Amount(self.read_amount()?),
            TypeCode::Blob => StValue::Blob(self.read_blob()?),
            TypeCode::AccountId => StValue::AccountId(self.read_account_id()?),
            TypeCode::StObject => StValue::Object(self.read_object()?),
            TypeCode::StArray => StValue::Array(self.read_array()?),
            TypeCode::PathSet => StValue::PathSet(self.read_path_set()?),
            TypeCode::Vector256 => StValue::Vector256(self.read_vector256()?),
        };
        if id.info().is_none() {
            tracing::trace!(field = %id, "decoded field missing from definitions");
        }
        Ok(value)
    }
}
