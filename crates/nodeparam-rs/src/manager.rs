// crates/nodeparam-rs/src/manager.rs

use crate::hal::ParamError;
use crate::types::{ParamIndex, ParamName};
use crate::value::{ParamBounds, Value};

/// Implement this trait in the application to back the parameter services.
///
/// The `ParamServer` only ever talks to the parameter set through this trait.
/// Unknown names and out-of-range indices are never errors: they are reported
/// as `None`, and writes to them are ignored.
pub trait ParamManager {
    /// Returns the name of the parameter at enumeration position `index`, if any.
    fn param_name_by_index(&self, index: ParamIndex) -> Option<ParamName>;

    /// Assigns `value` to the parameter called `name` if it exists.
    /// The implementation is free to coerce, clamp or reject the value.
    fn assign_param_value(&mut self, name: &ParamName, value: &Value);

    /// Reads the current value of the parameter called `name`, if it exists.
    fn read_param_value(&self, name: &ParamName) -> Option<Value>;

    /// Reads the parameter's default and, for numeric parameters, its max/min.
    /// Implementation is optional.
    fn read_param_default_max_min(&self, name: &ParamName) -> ParamBounds {
        let _ = name;
        ParamBounds::default()
    }

    /// Saves all parameters to non-volatile storage.
    fn save_all_params(&mut self) -> Result<(), ParamError>;

    /// Clears the non-volatile storage.
    fn erase_all_params(&mut self) -> Result<(), ParamError>;
}
