use std::collections::HashMap;

use crate::StateKey;

/// Assigns dense, first-mention-ordered keys to state names.
#[derive(Debug, Clone, Default)]
pub(crate) struct NameInterner {
    names: Vec<String>,
    name_to_key: HashMap<String, StateKey>,
}

impl NameInterner {
    /// Insert the name if needed and return its key plus whether it was new.
    pub(crate) fn intern(&mut self, name: &str) -> (StateKey, bool) {
        if let Some(key) = self.name_to_key.get(name) {
            return (*key, false);
        }

        let key = StateKey::from(self.names.len());
        self.names.push(name.to_string());
        self.name_to_key.insert(name.to_string(), key);
        (key, true)
    }

    pub(crate) fn get(&self, key: StateKey) -> Option<&str> {
        self.names.get(key.index()).map(String::as_str)
    }

    pub(crate) fn key_of(&self, name: &str) -> Option<StateKey> {
        self.name_to_key.get(name).copied()
    }
}
