use std::fmt;

use crate::definitions::{self, FieldInfo, TypeCode};
use crate::error::{Result, XrpError};

/// (type code, field code) pair; the derived ordering is canonical order
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId {
    pub type_code: u8,
    pub field_code: u8,
}

impl FieldId {
    pub const OBJECT_END: FieldId = FieldId::new(14, 1);
    pub const ARRAY_END: FieldId = FieldId::new(15, 1);

    pub const fn new(type_code: u8, field_code: u8) -> Self {
        Self {
            type_code,
            field_code,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        definitions::field_by_name(name)
            .map(|info| Self::new(info.type_code.code(), info.field_code))
            .ok_or_else(|| XrpError::UnknownField(name.to_string()))
    }

    pub fn info(&self) -> Option<&'static FieldInfo> {
        definitions::field_by_code(self.type_code, self.field_code)
    }

    pub fn type_code(&self) -> Option<TypeCode> {
        TypeCode::from_code(self.type_code)
    }

    pub fn name(&self) -> Option<&'static str> {
        self.info().map(|info| info.name)
    }

    /// Unknown fields are treated as signing fields
    pub fn is_signing_field(&self) -> bool {
        self.info().map_or(true, |info| info.is_signing_field)
    }

    /// Append the 1, 2 or 3 byte header
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        let (t, f) = (self.type_code, self.field_code);
        if t == 0 || f == 0 {
            return Err(XrpError::InvalidFieldId(format!("{}", self)));
        }
        match (t < 16, f < 16) {
            (true, true) => out.push((t << 4) | f),
            (true, false) => out.extend_from_slice(&[t << 4, f]),
            (false, true) => out.extend_from_slice(&[f, t]),
            (false, false) => out.extend_from_slice(&[0, t, f]),
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(3);
        self.encode(&mut out)?;
        Ok(out)
    }

    /// Parse a header, returning the id and the number of bytes consumed
    ///
    /// Escaped forms must carry a code of 16 or more; anything shorter has a
    /// unique single-nibble encoding and is rejected.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        let need = |n: usize| {
            if bytes.len() < n {
                Err(XrpError::UnexpectedEof {
                    needed: n,
                    remaining: bytes.len(),
                })
            } else {
                Ok(())
            }
        };
        need(1)?;
        let first = bytes[0];
        let (t, f) = (first >> 4, first & 0x0F);
        let (id, consumed) = match (t, f) {
            (0, 0) => {
                need(3)?;
                (Self::new(bytes[1], bytes[2]), 3)
            }
            (0, f) => {
                need(2)?;
                (Self::new(bytes[1], f), 2)
            }
            (t, 0) => {
                need(2)?;
                (Self::new(t, bytes[1]), 2)
            }
            (t, f) => (Self::new(t, f), 1),
        };
        let canonical = match consumed {
            3 => id.type_code >= 16 && id.field_code >= 16,
            2 if t == 0 => id.type_code >= 16,
            2 => id.field_code >= 16,
            _ => true,
        };
        if !canonical {
            return Err(XrpError::InvalidFieldId(hex::encode_upper(&bytes[..consumed])));
        }
        Ok((id, consumed))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Field({}, {})", self.type_code, self.field_code),
        }
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldId({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(id: FieldId) -> Vec<u8> {
        let bytes = id.to_bytes().unwrap();
        assert_eq!(FieldId::decode(&bytes).unwrap(), (id, bytes.len()));
        bytes
    }

    #[test]
    fn header_widths() {
        assert_eq!(round_trip(FieldId::new(2, 4)), vec![0x24]);
        assert_eq!(round_trip(FieldId::new(2, 27)), vec![0x20, 0x1B]);
        assert_eq!(round_trip(FieldId::new(16, 3)), vec![0x03, 0x10]);
        assert_eq!(round_trip(FieldId::new(18, 20)), vec![0x00, 0x12, 0x14]);
    }

    #[test]
    fn end_markers() {
        assert_eq!(FieldId::OBJECT_END.to_bytes().unwrap(), vec![0xE1]);
        assert_eq!(FieldId::ARRAY_END.to_bytes().unwrap(), vec![0xF1]);
    }

    #[test]
    fn rejects_non_canonical_and_truncated_headers() {
        assert!(matches!(
            FieldId::decode(&[0x20, 0x04]),
            Err(XrpError::InvalidFieldId(_))
        ));
        assert!(matches!(
            FieldId::decode(&[0x00, 0x02, 0x04]),
            Err(XrpError::InvalidFieldId(_))
        ));
        assert_eq!(
            FieldId::decode(&[0x00, 0x12]),
            Err(XrpError::UnexpectedEof {
                needed: 3,
                remaining: 2
            })
        );
        assert!(FieldId::new(0, 1).to_bytes().is_err());
    }

    #[test]
    fn names() {
        let id = FieldId::from_name("LastLedgerSequence").unwrap();
        assert_eq!(id, FieldId::new(2, 27));
        assert_eq!(id.to_string(), "LastLedgerSequence");
        assert_eq!(FieldId::new(2, 99).to_string(), "Field(2, 99)");
        assert!(!FieldId::from_name("TxnSignature").unwrap().is_signing_field());
    }
}
