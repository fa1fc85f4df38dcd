use crate::types::{MAX_STRING_VALUE_LEN, ParamName};
use crate::value::{NumericValue, Value};

/// Defines who may change a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessType {
    /// read and write access
    #[default]
    ReadWrite,
    /// read only access; remote writes are ignored
    ReadOnly,
}

/// Static description of a parameter: its name, default and limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub name: ParamName,
    /// Initial value. Also fixes the parameter's type.
    pub default_value: Value,
    pub min_value: NumericValue,
    pub max_value: NumericValue,
    pub access: AccessType,
    /// Whether the parameter is included in "save all".
    pub persistent: bool,
}

impl ParamDescriptor {
    /// A writable, persistent parameter without limits.
    pub fn new(name: ParamName, default_value: Value) -> Self {
        Self {
            name,
            default_value,
            min_value: NumericValue::Empty,
            max_value: NumericValue::Empty,
            access: AccessType::ReadWrite,
            persistent: true,
        }
    }

    pub fn with_range(mut self, min: NumericValue, max: NumericValue) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.access = AccessType::ReadOnly;
        self
    }

    pub fn volatile(mut self) -> Self {
        self.persistent = false;
        self
    }
}

/// A declared parameter together with its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    pub descriptor: ParamDescriptor,
    pub value: Value,
}

impl ParamEntry {
    pub(super) fn new(descriptor: ParamDescriptor) -> Self {
        let value = descriptor.default_value.clone();
        Self { descriptor, value }
    }

    pub fn name(&self) -> &ParamName {
        &self.descriptor.name
    }

    /// Converts `value` to this parameter's type and applies the numeric limits.
    /// Returns `None` if the value cannot be represented.
    pub(super) fn coerce(&self, value: &Value) -> Option<Value> {
        match (&self.descriptor.default_value, value) {
            (Value::Boolean(_), Value::Boolean(v)) => Some(Value::Boolean(*v)),
            (Value::Integer(_), Value::Integer(v)) => Some(Value::Integer(self.clamp_int(*v))),
            (Value::Integer(_), Value::Real(v)) if v.is_finite() => {
                Some(Value::Integer(self.clamp_int(*v as i64)))
            }
            (Value::Real(_), Value::Real(v)) if !v.is_nan() => Some(Value::Real(self.clamp_real(*v))),
            (Value::Real(_), Value::Integer(v)) => Some(Value::Real(self.clamp_real(*v as f32))),
            (Value::String(_), Value::String(v))
                if !v.is_empty() && v.len() <= MAX_STRING_VALUE_LEN =>
            {
                Some(Value::String(v.clone()))
            }
            _ => None,
        }
    }

    fn clamp_int(&self, v: i64) -> i64 {
        let mut v = v;
        if let Some(min) = numeric_as_i64(self.descriptor.min_value) {
            v = v.max(min);
        }
        if let Some(max) = numeric_as_i64(self.descriptor.max_value) {
            v = v.min(max);
        }
        v
    }

    fn clamp_real(&self, v: f32) -> f32 {
        let mut v = v;
        if let Some(min) = numeric_as_f32(self.descriptor.min_value) {
            v = v.max(min);
        }
        if let Some(max) = numeric_as_f32(self.descriptor.max_value) {
            v = v.min(max);
        }
        v
    }

    /// True if the limits can be applied: no NaN or infinite bound, and min not above max.
    pub(super) fn has_valid_range(&self) -> bool {
        let min = self.descriptor.min_value;
        let max = self.descriptor.max_value;
        if [min, max]
            .iter()
            .any(|n| matches!(n, NumericValue::Real(r) if !r.is_finite()))
        {
            return false;
        }
        match (min, max) {
            (NumericValue::Integer(lo), NumericValue::Integer(hi)) => lo <= hi,
            (NumericValue::Empty, _) | (_, NumericValue::Empty) => true,
            _ => numeric_as_f32(min) <= numeric_as_f32(max),
        }
    }
}

fn numeric_as_i64(value: NumericValue) -> Option<i64> {
    match value {
        NumericValue::Empty => None,
        NumericValue::Integer(v) => Some(v),
        NumericValue::Real(v) => Some(v as i64),
    }
}

fn numeric_as_f32(value: NumericValue) -> Option<f32> {
    match value {
        NumericValue::Empty => None,
        NumericValue::Integer(v) => Some(v as f32),
        NumericValue::Real(v) => Some(v),
    }
}
