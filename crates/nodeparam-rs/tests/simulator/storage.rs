// crates/nodeparam-rs/tests/simulator/storage.rs
use nodeparam_rs::{ParamError, ParamName, ParamStorage, Value};
use std::collections::BTreeMap;

/// Non-volatile storage kept in memory. Survives "reboots" as long as the
/// test keeps the struct alive.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    pub data: BTreeMap<ParamName, Value>,
    pub restore_requested: bool,
    /// When set, every write to the medium fails.
    pub faulty: bool,
    pub save_count: usize,
    pub clear_count: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParamStorage for MemoryStorage {
    fn load(&mut self) -> Result<BTreeMap<ParamName, Value>, ParamError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, params: &BTreeMap<ParamName, Value>) -> Result<(), ParamError> {
        if self.faulty {
            return Err(ParamError::StorageError("simulated flash write failure"));
        }
        self.save_count += 1;
        self.data = params.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ParamError> {
        if self.faulty {
            return Err(ParamError::StorageError("simulated flash erase failure"));
        }
        self.clear_count += 1;
        self.data.clear();
        Ok(())
    }

    fn restore_defaults_requested(&self) -> bool {
        self.restore_requested
    }

    fn request_restore_defaults(&mut self) -> Result<(), ParamError> {
        self.restore_requested = true;
        Ok(())
    }

    fn clear_restore_defaults_flag(&mut self) -> Result<(), ParamError> {
        self.restore_requested = false;
        Ok(())
    }
}
