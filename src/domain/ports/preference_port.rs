//! Preference persistence port definition.

use crate::domain::errors::StoreError;

/// Port for a string-valued key-value persistence substrate.
///
/// Each write replaces the stored value atomically.
pub trait PreferencePort: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    /// Returns error if the value cannot be durably written.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use parking_lot::RwLock;

    /// Memory backend whose writes can be made to fail.
    #[derive(Default)]
    pub struct FlakyPreferences {
        values: RwLock<HashMap<String, String>>,
        fail_writes: AtomicBool,
    }

    impl FlakyPreferences {
        /// Creates backend with working writes.
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets write failure behavior.
        pub fn set_fail_writes(&self, value: bool) {
            self.fail_writes.store(value, Ordering::SeqCst);
        }
    }

    impl PreferencePort for FlakyPreferences {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.values.read().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::write_failed(key, "disk full"));
            }
            self.values.write().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }
}
