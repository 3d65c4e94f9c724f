//! Process-local preference backend.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::errors::StoreError;
use crate::domain::ports::PreferencePort;

/// Preference backend that keeps values in memory only.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencePort for MemoryPreferences {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_replaces_value() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.read("k").unwrap(), None);

        prefs.write("k", "one").unwrap();
        prefs.write("k", "two").unwrap();

        assert_eq!(prefs.read("k").unwrap().as_deref(), Some("two"));
    }
}
