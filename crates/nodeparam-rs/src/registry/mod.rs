// crates/nodeparam-rs/src/registry/mod.rs
//! A ready-made `ParamManager`: an ordered table of declared parameters with
//! defaults, limits and an optional storage backend.

mod commands;
mod entry;

pub use entry::{AccessType, ParamDescriptor, ParamEntry};

use crate::hal::{ParamError, ParamStorage};
use crate::manager::ParamManager;
use crate::types::{MAX_PARAM_INDEX, MAX_STRING_VALUE_LEN, ParamIndex, ParamName};
use crate::value::{ParamBounds, Value};
use alloc::vec::Vec;
use core::fmt;
use log::{debug, info, trace, warn};

/// Default number of parameters a registry accepts.
pub const DEFAULT_CAPACITY: usize = 64;

/// Runtime configuration of a `ParamRegistry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum number of declared parameters. Never more than the 13-bit index range.
    pub capacity: usize,
    /// If set, "erase all" also returns the in-memory values to their defaults.
    /// Otherwise the current values stay in effect until the next boot.
    pub reset_on_erase: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            reset_on_erase: false,
        }
    }
}

/// The main parameter table.
///
/// Enumeration order is declaration order, so indices stay stable for as
/// long as no parameter is declared.
pub struct ParamRegistry<'a> {
    entries: Vec<ParamEntry>,
    storage: Option<&'a mut dyn ParamStorage>,
    config: RegistryConfig,
}

impl<'a> fmt::Debug for ParamRegistry<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamRegistry")
            .field("entries", &self.entries)
            .field(
                "storage",
                &if self.storage.is_some() {
                    "Some(<Storage Backend>)"
                } else {
                    "None"
                },
            )
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> ParamRegistry<'a> {
    /// Creates a new, empty registry.
    /// Call `init()` after declaring all parameters to load persisted values.
    pub fn new(storage: Option<&'a mut dyn ParamStorage>) -> Self {
        Self::with_config(storage, RegistryConfig::default())
    }

    pub fn with_config(storage: Option<&'a mut dyn ParamStorage>, config: RegistryConfig) -> Self {
        Self {
            entries: Vec::new(),
            storage,
            config,
        }
    }

    /// Declares a parameter and returns its enumeration index.
    ///
    /// The default value fixes the type. Limits are only accepted on numeric
    /// parameters.
    pub fn declare(&mut self, descriptor: ParamDescriptor) -> Result<ParamIndex, ParamError> {
        let capacity = self.config.capacity.min(MAX_PARAM_INDEX as usize + 1);
        if self.entries.len() >= capacity {
            return Err(ParamError::CapacityExceeded);
        }
        if descriptor.name.is_empty() {
            return Err(ParamError::EmptyName);
        }
        if self.position(&descriptor.name).is_some() {
            return Err(ParamError::DuplicateName);
        }
        match &descriptor.default_value {
            // An empty default would make the parameter unreachable over GetSet.
            v if v.is_empty() => return Err(ParamError::TypeMismatch),
            Value::Boolean(_) | Value::String(_)
                if !descriptor.min_value.is_empty() || !descriptor.max_value.is_empty() =>
            {
                return Err(ParamError::TypeMismatch);
            }
            Value::String(s) if s.len() > MAX_STRING_VALUE_LEN => {
                return Err(ParamError::StringTooLong(s.len()));
            }
            _ => {}
        }

        let entry = ParamEntry::new(descriptor);
        if !entry.has_valid_range() {
            return Err(ParamError::InvalidRange);
        }

        let index = ParamIndex::try_from(self.entries.len() as u16)?;
        trace!("Declared parameter '{}' at index {}", entry.name(), index);
        self.entries.push(entry);
        Ok(index)
    }

    /// Initialises the registry.
    /// This method must be called after the application has declared all
    /// its parameters. If a "restore defaults" request is pending in storage
    /// the storage is cleared and the defaults stay in effect; otherwise the
    /// persisted values are loaded.
    pub fn init(&mut self) -> Result<(), ParamError> {
        let mut restore_defaults = false;
        if let Some(s) = &mut self.storage
            && s.restore_defaults_requested()
        {
            restore_defaults = true;
            s.clear_restore_defaults_flag()?;
            s.clear()?;
        }

        if restore_defaults {
            info!("Restore defaults was requested; persisted parameters cleared.");
            Ok(())
        } else {
            self.load()
        }
    }

    /// Loads values from the storage backend over the declared defaults.
    fn load(&mut self) -> Result<(), ParamError> {
        if let Some(s) = &mut self.storage {
            let stored = s.load()?;
            let mut loaded = 0usize;
            for (name, value) in stored {
                // Values for parameters that no longer exist are dropped.
                if self.write_internal(&name, &value, false).is_ok() {
                    loaded += 1;
                } else {
                    debug!("Ignoring stored value for '{}'", name);
                }
            }
            info!("Loaded {} persisted parameters.", loaded);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &ParamName) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    pub fn index_of(&self, name: &ParamName) -> Option<ParamIndex> {
        self.position(name)
            .and_then(|i| ParamIndex::try_from(i as u16).ok())
    }

    pub fn entry(&self, name: &ParamName) -> Option<&ParamEntry> {
        self.position(name).map(|i| &self.entries[i])
    }

    /// Current value of a parameter.
    pub fn get(&self, name: &ParamName) -> Option<&Value> {
        self.entry(name).map(|e| &e.value)
    }

    /// Writes a parameter, respecting access rights. Returns the value actually stored.
    pub fn set(&mut self, name: &ParamName, value: &Value) -> Result<&Value, ParamError> {
        self.write_internal(name, value, true)
    }

    /// Writes a parameter from the application side, bypassing the read-only check.
    pub fn set_local(&mut self, name: &ParamName, value: &Value) -> Result<&Value, ParamError> {
        self.write_internal(name, value, false)
    }

    fn write_internal(
        &mut self,
        name: &ParamName,
        value: &Value,
        check_access: bool,
    ) -> Result<&Value, ParamError> {
        let i = self.position(name).ok_or(ParamError::NotFound)?;
        let entry = &mut self.entries[i];
        if check_access && entry.descriptor.access == AccessType::ReadOnly {
            return Err(ParamError::ReadOnly);
        }
        let coerced = entry.coerce(value).ok_or(ParamError::TypeMismatch)?;
        entry.value = coerced;
        Ok(&entry.value)
    }

    /// Returns every parameter to its declared default.
    pub fn reset_to_defaults(&mut self) {
        for entry in &mut self.entries {
            entry.value = entry.descriptor.default_value.clone();
        }
    }

    /// Asks the storage backend to restore defaults on the next `init()`.
    pub fn request_restore_defaults(&mut self) -> Result<(), ParamError> {
        commands::restore_defaults(self)
    }
}

impl<'a> ParamManager for ParamRegistry<'a> {
    fn param_name_by_index(&self, index: ParamIndex) -> Option<ParamName> {
        self.entries.get(index.as_usize()).map(|e| e.name().clone())
    }

    fn assign_param_value(&mut self, name: &ParamName, value: &Value) {
        match self.set(name, value) {
            Ok(stored) => debug!("'{}' set to {:?}", name, stored),
            Err(e) => warn!("Write to '{}' ignored: {}", name, e),
        }
    }

    fn read_param_value(&self, name: &ParamName) -> Option<Value> {
        self.get(name).cloned()
    }

    fn read_param_default_max_min(&self, name: &ParamName) -> ParamBounds {
        self.entry(name)
            .map(|e| ParamBounds {
                default_value: e.descriptor.default_value.clone(),
                max_value: e.descriptor.max_value,
                min_value: e.descriptor.min_value,
            })
            .unwrap_or_default()
    }

    fn save_all_params(&mut self) -> Result<(), ParamError> {
        commands::store_parameters(self)
    }

    fn erase_all_params(&mut self) -> Result<(), ParamError> {
        commands::erase_parameters(self)
    }
}
