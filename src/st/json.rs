//! Mapping between field trees and the JSON form used by the ledger's APIs

use serde_json::{Map, Value};

use crate::definitions::{self, TypeCode};
use crate::error::{Result, XrpError};
use crate::st::{FieldId, Path, PathStep, StObject, StValue};
use crate::types::{AccountId, Amount, CurrencyCode, Hash128, Hash160, Hash256};

impl StObject {
    /// Build a field tree from a JSON object keyed by field name
    pub fn from_json(json: &Value) -> Result<Self> {
        let map = json
            .as_object()
            .ok_or_else(|| XrpError::Json("expected a JSON object".to_string()))?;
        let mut object = StObject::new();
        for (name, value) in map {
            let id = FieldId::from_name(name)?;
            let value = value_from_json(id, name, value)?;
            object.insert(id, value)?;
        }
        Ok(object)
    }

    pub fn to_json(&self) -> Result<Value> {
        let mut map = Map::new();
        for (id, value) in self {
            map.insert(id.to_string(), value_to_json(*id, value)?);
        }
        Ok(Value::Object(map))
    }
}

fn type_error(name: &str, expected: &'static str) -> XrpError {
    XrpError::TypeMismatch {
        field: name.to_string(),
        expected,
    }
}

fn as_str<'a>(name: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| type_error(name, "string"))
}

fn as_uint<T: TryFrom<u64>>(name: &str, value: &Value) -> Result<T> {
    value
        .as_u64()
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| type_error(name, "unsigned integer"))
}

fn value_from_json(id: FieldId, name: &str, value: &Value) -> Result<StValue> {
    let type_code = id
        .type_code()
        .ok_or_else(|| XrpError::InvalidFieldId(name.to_string()))?;
    let st = match type_code {
        TypeCode::UInt8 => StValue::UInt8(as_uint(name, value)?),
        TypeCode::UInt16 => StValue::UInt16(uint16_from_json(name, value)?),
        TypeCode::UInt32 => StValue::UInt32(as_uint(name, value)?),
        TypeCode::UInt64 => match value {
            Value::String(text) => StValue::UInt64(u64::from_str_radix(text, 16)?),
            _ => StValue::UInt64(as_uint(name, value)?),
        },
        TypeCode::Hash128 => StValue::Hash128(as_str(name, value)?.parse::<Hash128>()?),
        TypeCode::Hash160 => StValue::Hash160(as_str(name, value)?.parse::<Hash160>()?),
        TypeCode::Hash256 => StValue::Hash256(as_str(name, value)?.parse::<Hash256>()?),
        TypeCode::Amount => StValue::Amount(serde_json::from_value::<Amount>(value.clone())?),
        TypeCode::Blob => StValue::Blob(hex::decode(as_str(name, value)?)?),
        TypeCode::AccountId => StValue::AccountId(as_str(name, value)?.parse::<AccountId>()?),
        TypeCode::StObject => StValue::Object(StObject::from_json(value)?),
        TypeCode::StArray => {
            let items = value.as_array().ok_or_else(|| type_error(name, "array"))?;
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                // each element is a single-key wrapper such as {"Memo": {...}}
                let wrapper = item
                    .as_object()
                    .filter(|m| m.len() == 1)
                    .ok_or_else(|| type_error(name, "array of single-field objects"))?;
                for (inner_name, inner) in wrapper {
                    let inner_id = FieldId::from_name(inner_name)?;
                    if inner_id.type_code != TypeCode::StObject.code() {
                        return Err(type_error(inner_name, "STObject"));
                    }
                    elements.push((inner_id, StObject::from_json(inner)?));
                }
            }
            StValue::Array(elements)
        }
        TypeCode::PathSet => StValue::PathSet(path_set_from_json(name, value)?),
        TypeCode::Vector256 => {
            let items = value.as_array().ok_or_else(|| type_error(name, "array"))?;
            let hashes = items
                .iter()
                .map(|item| as_str(name, item)?.parse::<Hash256>())
                .collect::<Result<Vec<_>>>()?;
            StValue::Vector256(hashes)
        }
    };
    Ok(st)
}

/// TransactionType and LedgerEntryType are written by name
fn uint16_from_json(name: &str, value: &Value) -> Result<u16> {
    match (name, value) {
        ("TransactionType", Value::String(text)) => definitions::transaction_type_code(text)
            .ok_or_else(|| XrpError::UnknownTransactionType(text.clone())),
        ("LedgerEntryType", Value::String(text)) => definitions::ledger_entry_type_code(text)
            .ok_or_else(|| XrpError::UnknownLedgerEntryType(text.clone())),
        _ => as_uint(name, value),
    }
}

fn path_set_from_json(name: &str, value: &Value) -> Result<Vec<Path>> {
    let paths = value.as_array().ok_or_else(|| type_error(name, "array"))?;
    let mut result = Vec::with_capacity(paths.len());
    for path in paths {
        let steps = path.as_array().ok_or_else(|| type_error(name, "array"))?;
        let mut parsed = Path::with_capacity(steps.len());
        for step in steps {
            let optional = |key: &str| step.get(key).map(|v| as_str(name, v)).transpose();
            parsed.push(PathStep {
                account: optional("account")?.map(str::parse::<AccountId>).transpose()?,
                currency: optional("currency")?
                    .map(str::parse::<CurrencyCode>)
                    .transpose()?,
                issuer: optional("issuer")?.map(str::parse::<AccountId>).transpose()?,
            });
        }
        result.push(parsed);
    }
    Ok(result)
}

fn value_to_json(id: FieldId, value: &StValue) -> Result<Value> {
    let json = match value {
        StValue::UInt8(v) => Value::from(*v),
        StValue::UInt16(v) => {
            let name = match id.name() {
                Some("TransactionType") => definitions::transaction_type_name(*v),
                Some("LedgerEntryType") => definitions::ledger_entry_type_name(*v),
                _ => None,
            };
            name.map_or_else(|| Value::from(*v), Value::from)
        }
        StValue::UInt32(v) => Value::from(*v),
        StValue::UInt64(v) => Value::String(format!("{:X}", v)),
        StValue::Hash128(h) => Value::String(h.to_string()),
        StValue::Hash160(h) => Value::String(h.to_string()),
        StValue::Hash256(h) => Value::String(h.to_string()),
        StValue::Amount(amount) => serde_json::to_value(amount)?,
        StValue::Blob(bytes) => Value::String(hex::encode_upper(bytes)),
        StValue::AccountId(account) => Value::String(account.to_address()),
        StValue::Object(object) => object.to_json()?,
        StValue::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (inner_id, object) in items {
                let mut wrapper = Map::new();
                wrapper.insert(inner_id.to_string(), object.to_json()?);
                array.push(Value::Object(wrapper));
            }
            Value::Array(array)
        }
        StValue::PathSet(paths) => Value::Array(
            paths
                .iter()
                .map(|path| Value::Array(path.iter().map(path_step_to_json).collect()))
                .collect(),
        ),
        StValue::Vector256(hashes) => Value::Array(
            hashes
                .iter()
                .map(|h| Value::String(h.to_string()))
                .collect(),
        ),
    };
    Ok(json)
}

fn path_step_to_json(step: &PathStep) -> Value {
    let mut map = Map::new();
    if let Some(account) = &step.account {
        map.insert("account".to_string(), Value::String(account.to_address()));
    }
    if let Some(currency) = &step.currency {
        map.insert("currency".to_string(), Value::String(currency.to_string()));
    }
    if let Some(issuer) = &step.issuer {
        map.insert("issuer".to_string(), Value::String(issuer.to_address()));
    }
    Value::Object(map)
}
