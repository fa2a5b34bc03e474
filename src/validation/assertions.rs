//! Field-level assertions shared by the validator
//!
//! Presence follows the loose rules plugins have always used on the wire:
//! an absent key, `null`, `false`, `0` and `""` all count as "not set", and
//! type assertions only apply to values that are set.

use serde_json::{Map, Value};

use crate::error::{AmountError, InvalidFieldsError};
use crate::types::{Amount, Condition};
use crate::util::is_32_bytes_base64url;

pub(super) type Fields = Map<String, Value>;

pub(super) fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Render a field value for an error message
pub(super) fn show(value: Option<&Value>) -> String {
    match value {
        None => "none".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub(super) fn ensure(cond: bool, message: impl FnOnce() -> String) -> Result<(), InvalidFieldsError> {
    if cond {
        Ok(())
    } else {
        Err(InvalidFieldsError::new(message()))
    }
}

pub(super) fn fields<'a>(value: &'a Value, kind: &str) -> Result<&'a Fields, InvalidFieldsError> {
    value.as_object().ok_or_else(|| {
        InvalidFieldsError::new(format!("{kind} ({value}) must be an object"))
    })
}

pub(super) fn assert_string(value: Option<&Value>, name: &str) -> Result<(), InvalidFieldsError> {
    ensure(!is_set(value) || value.is_some_and(Value::is_string), || {
        format!("{name} ({}) must be a non-empty string", show(value))
    })
}

pub(super) fn assert_object(value: Option<&Value>, name: &str) -> Result<(), InvalidFieldsError> {
    ensure(!is_set(value) || value.is_some_and(Value::is_object), || {
        format!("{name} ({}) must be a non-empty object", show(value))
    })
}

pub(super) fn assert_prefix(
    value: Option<&Value>,
    prefix: &str,
    name: &str,
) -> Result<(), InvalidFieldsError> {
    assert_string(value, name)?;
    ensure(value.and_then(Value::as_str) == Some(prefix), || {
        format!("{name} ({}) must match ILP prefix: {prefix}", show(value))
    })
}

pub(super) fn assert_account(
    value: Option<&Value>,
    account: &str,
    name: &str,
) -> Result<(), InvalidFieldsError> {
    assert_string(value, name)?;
    ensure(value.and_then(Value::as_str) == Some(account), || {
        format!("{name} ({}) must match account: {account}", show(value))
    })
}

/// Checks the 32-byte base64url encoding; `None` when the value is unset
pub(super) fn assert_condition_or_preimage(
    value: Option<&Value>,
    name: &str,
) -> Result<Option<String>, InvalidFieldsError> {
    if !is_set(value) {
        return Ok(None);
    }
    assert_string(value, name)?;
    match value.and_then(Value::as_str) {
        Some(s) if is_32_bytes_base64url(s) => Ok(Some(s.to_string())),
        _ => Err(InvalidFieldsError::new(format!(
            "{name} ({}): Not a valid 32-byte base64url encoded string",
            show(value)
        ))),
    }
}

pub(super) fn assert_condition(
    value: Option<&Value>,
    name: &str,
) -> Result<Option<Condition>, InvalidFieldsError> {
    assert_condition_or_preimage(value, name)?
        .map(|s| {
            Condition::try_from(s).map_err(|e| {
                InvalidFieldsError::new(format!("{name} ({}): {e}", show(value)))
            })
        })
        .transpose()
}

pub(super) fn assert_number(value: Option<&Value>, name: &str) -> Result<Amount, InvalidFieldsError> {
    value
        .ok_or(AmountError::NotANumber)
        .and_then(Amount::from_json)
        .map_err(|e| InvalidFieldsError::new(format!("{name} ({}) {e}", show(value))))
}

/// String field that may be unset; set values must be strings
pub(super) fn optional_string(obj: &Fields, name: &str) -> Result<Option<String>, InvalidFieldsError> {
    let value = obj.get(name);
    assert_string(value, name)?;
    Ok(value
        .filter(|v| is_set(Some(*v)))
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Object field that may be unset; set values must be objects
pub(super) fn optional_object(obj: &Fields, name: &str) -> Result<Option<Fields>, InvalidFieldsError> {
    let value = obj.get(name);
    assert_object(value, name)?;
    Ok(value
        .filter(|v| is_set(Some(*v)))
        .and_then(Value::as_object)
        .cloned())
}
