use crate::messages::ServiceId;
use crate::types::{NameError, ParamName};
use crate::value::Value;
use alloc::collections::BTreeMap;
use core::fmt;

// --- Status Codes ---
// Negative values returned to callers that follow the "0 = success" convention.

/// Generic failure.
pub const ERR_FAILURE: i32 = 1;
/// An argument was outside of its valid domain.
pub const ERR_INVALID_PARAM: i32 = 2;
/// A fixed-capacity container is full.
pub const ERR_MEMORY: i32 = 3;
/// The storage driver reported an error.
pub const ERR_DRIVER: i32 = 4;
/// A required collaborator has not been configured.
pub const ERR_NOT_INITED: i32 = 8;
/// The operation conflicts with existing state.
pub const ERR_LOGIC: i32 = 10;

/// Defines a portable, descriptive Error type for the parameter service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// A parameter name exceeds the maximum encodable length.
    NameTooLong(usize),
    /// A parameter cannot be declared with an empty name.
    EmptyName,
    /// An enumeration index does not fit into the 13-bit index field.
    IndexOutOfRange(u16),
    /// A string value exceeds the maximum encodable length.
    StringTooLong(usize),
    /// A value in the request is not a valid Opcode.
    InvalidOpcode(u8),
    /// A data type ID does not belong to the parameter services.
    InvalidServiceId(u16),
    /// A parameter with the same name has already been declared.
    DuplicateName,
    /// The registry cannot hold any more parameters.
    CapacityExceeded,
    /// Declared limits are NaN, infinite or inverted.
    InvalidRange,
    /// The named parameter does not exist.
    NotFound,
    /// The parameter is read-only.
    ReadOnly,
    /// A value's type does not match the declared type of the parameter.
    TypeMismatch,
    /// A persistence operation was requested but no storage backend is configured.
    NoStorage,
    /// An error occurred in the storage backend.
    StorageError(&'static str),
    /// A backend returned a raw negative status code.
    Status(i32),
    /// The service layer refused to register a server. Carries the layer's status code.
    RegistrationFailed(i32),
}

impl ParamError {
    /// Maps the error to a negative status code.
    pub fn status(&self) -> i32 {
        match self {
            Self::Status(code) | Self::RegistrationFailed(code) if *code < 0 => *code,
            Self::Status(_) | Self::RegistrationFailed(_) => -ERR_FAILURE,
            Self::NameTooLong(_)
            | Self::EmptyName
            | Self::NotFound
            | Self::IndexOutOfRange(_)
            | Self::StringTooLong(_)
            | Self::InvalidOpcode(_)
            | Self::InvalidServiceId(_)
            | Self::InvalidRange
            | Self::TypeMismatch => -ERR_INVALID_PARAM,
            Self::CapacityExceeded => -ERR_MEMORY,
            Self::StorageError(_) => -ERR_DRIVER,
            Self::NoStorage => -ERR_NOT_INITED,
            Self::DuplicateName | Self::ReadOnly => -ERR_LOGIC,
        }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooLong(len) => write!(f, "Parameter name too long: {len} bytes"),
            Self::EmptyName => write!(f, "Parameter name must not be empty"),
            Self::IndexOutOfRange(v) => write!(f, "Parameter index out of range: {v}"),
            Self::StringTooLong(len) => write!(f, "String value too long: {len} bytes"),
            Self::InvalidOpcode(v) => write!(f, "Invalid Opcode value: {v:#04x}"),
            Self::InvalidServiceId(v) => write!(f, "Invalid service data type ID: {v}"),
            Self::DuplicateName => write!(f, "A parameter with this name already exists"),
            Self::CapacityExceeded => write!(f, "Parameter registry is full"),
            Self::InvalidRange => write!(f, "Parameter limits are not a valid range"),
            Self::NotFound => write!(f, "The requested parameter does not exist"),
            Self::ReadOnly => write!(f, "Parameter is read-only"),
            Self::TypeMismatch => write!(f, "The provided value's type does not match the parameter's type"),
            Self::NoStorage => write!(f, "No storage backend configured"),
            Self::StorageError(s) => write!(f, "Storage error: {}", s),
            Self::Status(code) => write!(f, "Backend returned status {code}"),
            Self::RegistrationFailed(code) => write!(f, "Service registration failed with status {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

// --- From Implementations for Error Conversion ---

impl From<NameError> for ParamError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::TooLong(len) => ParamError::NameTooLong(len),
        }
    }
}

/// Converts a raw backend status code into a `Result`. Negative codes are failures.
pub fn check_status(status: i32) -> Result<(), ParamError> {
    if status < 0 {
        Err(ParamError::Status(status))
    } else {
        Ok(())
    }
}

/// Abstraction of the external service layer that delivers requests to the
/// parameter server.
///
/// Framing, addressing and request/response correlation belong to the implementor.
/// Once a service is registered, the implementor is expected to pump every decoded
/// request of that type through `ParamServer::handle`, one at a time.
pub trait ServiceNode {
    /// Registers a server for `service`. Returns an error (typically
    /// `ParamError::RegistrationFailed`) if the layer cannot accept it.
    fn register_server(&mut self, service: ServiceId) -> Result<(), ParamError>;
}

/// A trait for abstracting the non-volatile storage of parameters.
/// The physical medium (flash, EEPROM, file) is up to the implementor.
pub trait ParamStorage {
    /// Loads persisted parameters from non-volatile memory.
    fn load(&mut self) -> Result<BTreeMap<ParamName, Value>, ParamError>;

    /// Saves the given parameters to non-volatile memory, replacing what was there.
    fn save(&mut self, params: &BTreeMap<ParamName, Value>) -> Result<(), ParamError>;

    /// Clears all stored parameters, forcing defaults on next boot.
    fn clear(&mut self) -> Result<(), ParamError>;

    /// Checks whether a "restore defaults" request is pending.
    fn restore_defaults_requested(&self) -> bool;

    /// Sets a persistent flag to restore defaults on the next initialisation.
    fn request_restore_defaults(&mut self) -> Result<(), ParamError>;

    /// Clears the persistent "restore defaults" flag once it has been honoured.
    fn clear_restore_defaults_flag(&mut self) -> Result<(), ParamError>;
}
