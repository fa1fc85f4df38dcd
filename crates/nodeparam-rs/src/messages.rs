// crates/nodeparam-rs/src/messages.rs
//! Decoded request and response structures of the two parameter services.
//!
//! Encoding these on the wire is the job of the service layer.

use crate::hal::ParamError;
use crate::types::{ParamIndex, ParamName};
use crate::value::{NumericValue, Value};
use core::convert::TryFrom;

/// Identifies one of the parameter services by its data type ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum ServiceId {
    /// Save/erase of the whole parameter set.
    ExecuteOpcode = 10,
    /// Enumerate, read and write a single parameter.
    GetSet = 11,
}

impl ServiceId {
    pub fn data_type_id(self) -> u16 {
        self as u16
    }

    pub fn full_name(self) -> &'static str {
        match self {
            ServiceId::ExecuteOpcode => "uavcan.protocol.param.ExecuteOpcode",
            ServiceId::GetSet => "uavcan.protocol.param.GetSet",
        }
    }
}

impl TryFrom<u16> for ServiceId {
    type Error = ParamError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(ServiceId::ExecuteOpcode),
            11 => Ok(ServiceId::GetSet),
            _ => Err(ParamError::InvalidServiceId(value)),
        }
    }
}

/// Persistence operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Opcode {
    /// Commit all parameters to non-volatile storage.
    Save = 0,
    /// Clear non-volatile storage.
    Erase = 1,
}

impl TryFrom<u8> for Opcode {
    type Error = ParamError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::Save),
            1 => Ok(Opcode::Erase),
            _ => Err(ParamError::InvalidOpcode(value)),
        }
    }
}

/// GetSet request. A non-empty `name` takes precedence over `index`;
/// a non-empty `value` turns the read into a write.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetSetRequest {
    pub index: ParamIndex,
    pub name: ParamName,
    pub value: Value,
}

impl GetSetRequest {
    /// Read by enumeration index.
    pub fn by_index(index: ParamIndex) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Read by name.
    pub fn by_name(name: ParamName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Write `value` to the parameter called `name`.
    pub fn set(name: ParamName, value: Value) -> Self {
        Self {
            name,
            value,
            ..Default::default()
        }
    }
}

/// GetSet response. All fields empty means "no such parameter".
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetSetResponse {
    pub value: Value,
    pub default_value: Value,
    pub max_value: NumericValue,
    pub min_value: NumericValue,
    pub name: ParamName,
}

impl GetSetResponse {
    /// True if the response reports a missing parameter.
    pub fn is_not_found(&self) -> bool {
        self.name.is_empty() && self.value.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteOpcodeRequest {
    pub opcode: Opcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecuteOpcodeResponse {
    pub ok: bool,
}

/// A decoded request as handed over by the service layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    GetSet(GetSetRequest),
    ExecuteOpcode(ExecuteOpcodeRequest),
}

impl ServiceRequest {
    pub fn service_id(&self) -> ServiceId {
        match self {
            ServiceRequest::GetSet(_) => ServiceId::GetSet,
            ServiceRequest::ExecuteOpcode(_) => ServiceId::ExecuteOpcode,
        }
    }
}

/// The response to hand back to the service layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    GetSet(GetSetResponse),
    ExecuteOpcode(ExecuteOpcodeResponse),
}
