use crate::hal::ParamError;
use alloc::string::String;
use core::convert::TryFrom;
use core::fmt;

// --- Field Limits (GetSet message definition) ---

/// Maximum length of a parameter name in bytes.
pub const MAX_PARAM_NAME_LEN: usize = 92;

/// Maximum length of a string parameter value in bytes.
pub const MAX_STRING_VALUE_LEN: usize = 128;

/// Largest enumeration index representable by the 13-bit index field.
pub const MAX_PARAM_INDEX: u16 = (1 << 13) - 1;

/// Enumeration ordinal of a parameter.
///
/// Ordinals are dense (0..count) and stable for as long as the parameter set
/// does not change, so a client can discover every parameter by walking
/// 0, 1, 2, ... until the server answers with an empty name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16", into = "u16"))]
pub struct ParamIndex(u16);

impl ParamIndex {
    /// Index of the first parameter.
    pub const FIRST: ParamIndex = ParamIndex(0);

    /// Returns the ordinal as a `usize`, suitable for slice indexing.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the following index, or `None` once the 13-bit range is exhausted.
    pub fn next(self) -> Option<ParamIndex> {
        if self.0 < MAX_PARAM_INDEX {
            Some(ParamIndex(self.0 + 1))
        } else {
            None
        }
    }
}

impl TryFrom<u16> for ParamIndex {
    type Error = ParamError;

    /// Creates a `ParamIndex`, rejecting values that do not fit into 13 bits.
    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= MAX_PARAM_INDEX {
            Ok(ParamIndex(value))
        } else {
            Err(ParamError::IndexOutOfRange(value))
        }
    }
}

impl From<ParamIndex> for u16 {
    fn from(index: ParamIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ParamIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid parameter name creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// The name is longer than `MAX_PARAM_NAME_LEN` bytes.
    TooLong(usize),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameError::TooLong(len) => write!(
                f,
                "Parameter name is {} bytes long. Maximum is {}.",
                len, MAX_PARAM_NAME_LEN
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NameError {}

/// A bounded-length parameter name.
///
/// The empty name is valid and means "not supplied" in a request and
/// "no such parameter" in a response.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ParamName(String);

impl ParamName {
    /// Creates a name, checking the length limit.
    pub fn new(name: &str) -> Result<Self, NameError> {
        Self::try_from(String::from(name))
    }

    /// The empty name.
    pub const fn empty() -> Self {
        ParamName(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resets the name to empty.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl TryFrom<String> for ParamName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() > MAX_PARAM_NAME_LEN {
            Err(NameError::TooLong(value.len()))
        } else {
            Ok(ParamName(value))
        }
    }
}

impl TryFrom<&str> for ParamName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParamName> for String {
    fn from(name: ParamName) -> Self {
        name.0
    }
}

impl PartialEq<str> for ParamName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ParamName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
