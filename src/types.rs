use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{AmountError, EncodingError};
use crate::util::{base64url, is_32_bytes_base64url};

/// Canonical transfer produced by normalization
///
/// Absent fields are omitted when serialized, never written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ilp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_to_self: Option<Map<String, Value>>,
}

/// Strictly positive arbitrary-precision decimal amount
///
/// Keeps the caller's decimal text so normalization echoes it unchanged.
/// Equality compares the numeric value, so `"5"` equals `"5.0"`.
#[derive(Debug, Clone)]
pub struct Amount {
    text: String,
    value: BigDecimal,
}

impl Amount {
    /// Parse decimal text, rejecting anything that is not `> 0`
    pub fn parse(text: &str) -> Result<Self, AmountError> {
        let value = BigDecimal::from_str(text.trim()).map_err(|_| AmountError::NotANumber)?;
        if value <= BigDecimal::zero() {
            return Err(AmountError::NotPositive);
        }
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }

    /// Read an amount from a JSON string or JSON number
    pub fn from_json(value: &Value) -> Result<Self, AmountError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::parse(&n.to_string()),
            _ => Err(AmountError::NotANumber),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &BigDecimal {
        &self.value
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Amount::from_json(&raw).map_err(|e| de::Error::custom(format!("amount ({raw}) {e}")))
    }
}

/// Execution condition: 32 bytes as unpadded base64url
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Condition(String);

impl Condition {
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(base64url(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Condition {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_32_bytes_base64url(&value) {
            Ok(Self(value))
        } else {
            Err(EncodingError)
        }
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.0
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfillment (preimage) with the same encoding as a condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fulfillment(String);

impl Fulfillment {
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self(base64url(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Fulfillment {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_32_bytes_base64url(&value) {
            Ok(Self(value))
        } else {
            Err(EncodingError)
        }
    }
}

impl From<Fulfillment> for String {
    fn from(f: Fulfillment) -> Self {
        f.0
    }
}

impl fmt::Display for Fulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a transfer or message names its counterparty
///
/// Resolved once per object; `LegacyAccount` is the deprecated single-field
/// form and is exempt from direction assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum Direction<'a> {
    Directed {
        to: Option<&'a Value>,
        from: Option<&'a Value>,
    },
    LegacyAccount {
        account: &'a str,
    },
}

impl Direction<'_> {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Direction::LegacyAccount { .. })
    }
}

/// Non-fatal diagnostic raised while validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Warning {
    DeprecatedAccountField,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DeprecatedAccountField => {
                write!(f, "switch from the \"account\" field to the \"to\" and \"from\" fields!")
            }
        }
    }
}

/// Warnings collected during one validate call
pub type Diagnostics = Vec<Warning>;

/// Normalized value together with the warnings raised while producing it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized<T> {
    pub value: T,
    pub warnings: Diagnostics,
}

impl<T> Normalized<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}
