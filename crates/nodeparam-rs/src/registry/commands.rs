// crates/nodeparam-rs/src/registry/commands.rs
use super::ParamRegistry;
use crate::hal::ParamError;
use alloc::collections::BTreeMap;
use log::{error, info, trace};

/// Collects all persistent parameters and tells the storage backend to save them.
pub fn store_parameters(registry: &mut ParamRegistry) -> Result<(), ParamError> {
    if let Some(s) = &mut registry.storage {
        let storable_params: BTreeMap<_, _> = registry
            .entries
            .iter()
            .filter(|e| e.descriptor.persistent)
            .map(|e| (e.name().clone(), e.value.clone()))
            .collect();
        if storable_params.is_empty() {
            trace!("No persistent parameters declared.");
        } else {
            trace!("Saving {} parameters.", storable_params.len());
        }
        s.save(&storable_params)
    } else {
        error!("Store parameters failed: No storage backend configured.");
        Err(ParamError::NoStorage)
    }
}

/// Clears the storage backend. Current values stay in effect unless the
/// registry is configured to reset on erase.
pub fn erase_parameters(registry: &mut ParamRegistry) -> Result<(), ParamError> {
    if let Some(s) = &mut registry.storage {
        trace!("Clearing persisted parameters.");
        s.clear()?;
    } else {
        error!("Erase parameters failed: No storage backend configured.");
        return Err(ParamError::NoStorage);
    }
    if registry.config.reset_on_erase {
        info!("Parameters reset to defaults after erase.");
        registry.reset_to_defaults();
    }
    Ok(())
}

/// Tells the storage backend to set a flag to restore defaults on the next boot.
pub fn restore_defaults(registry: &mut ParamRegistry) -> Result<(), ParamError> {
    if let Some(s) = &mut registry.storage {
        trace!("Requesting restore defaults.");
        s.request_restore_defaults()
    } else {
        error!("Restore defaults failed: No storage backend configured.");
        Err(ParamError::NoStorage)
    }
}
