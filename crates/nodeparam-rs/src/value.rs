// crates/nodeparam-rs/src/value.rs

use crate::hal::ParamError;
use crate::types::MAX_STRING_VALUE_LEN;
use alloc::string::String;

/// The value of a parameter.
///
/// `Empty` stands for "no value": a request carrying it is a read, a response
/// carrying it reports an unknown parameter.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    #[default]
    Empty,
    Boolean(bool),
    Integer(i64),
    Real(f32),
    String(String),
}

/// Numeric-only value used for default/min/max metadata.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericValue {
    #[default]
    Empty,
    Integer(i64),
    Real(f32),
}

impl Value {
    /// True iff no boolean, integer, real or string payload is present.
    /// A zero-length string carries no payload.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Builds a string value, checking the length limit of the string field.
    pub fn try_string(s: &str) -> Result<Value, ParamError> {
        if s.len() > MAX_STRING_VALUE_LEN {
            Err(ParamError::StringTooLong(s.len()))
        } else {
            Ok(Value::String(String::from(s)))
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f32> {
        match self {
            Value::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Projects the value onto its numeric part. Non-numeric values become `Empty`.
    pub fn to_numeric(&self) -> NumericValue {
        match self {
            Value::Integer(v) => NumericValue::Integer(*v),
            Value::Real(v) => NumericValue::Real(*v),
            _ => NumericValue::Empty,
        }
    }

    /// Short type label, used in log output.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Boolean(_) => "bool",
            Value::Integer(_) => "int",
            Value::Real(_) => "real",
            Value::String(_) => "string",
        }
    }
}

impl NumericValue {
    /// True iff neither an integer nor a real payload is present.
    pub fn is_empty(&self) -> bool {
        matches!(self, NumericValue::Empty)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumericValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f32> {
        match self {
            NumericValue::Real(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<NumericValue> for Value {
    fn from(value: NumericValue) -> Self {
        match value {
            NumericValue::Empty => Value::Empty,
            NumericValue::Integer(v) => Value::Integer(v),
            NumericValue::Real(v) => Value::Real(v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(v)
    }
}

impl From<i64> for NumericValue {
    fn from(v: i64) -> Self {
        NumericValue::Integer(v)
    }
}

impl From<f32> for NumericValue {
    fn from(v: f32) -> Self {
        NumericValue::Real(v)
    }
}

/// Default value and numeric limits of a parameter, as reported by a manager.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamBounds {
    pub default_value: Value,
    pub max_value: NumericValue,
    pub min_value: NumericValue,
}

impl ParamBounds {
    pub fn is_empty(&self) -> bool {
        self.default_value.is_empty() && self.max_value.is_empty() && self.min_value.is_empty()
    }
}
