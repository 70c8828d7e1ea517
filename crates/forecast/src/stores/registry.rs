#![forbid(unsafe_code)]

use crate::domain::{ParticipantId, ParticipantKey};
use slotmap::SlotMap;
use std::collections::HashMap;

/// Arena of every participant seen in a run, indexed by external key.
#[derive(Debug, Default, Clone)]
pub struct ParticipantRegistry {
    participants: SlotMap<ParticipantId, ParticipantKey>,
    by_key: HashMap<ParticipantKey, ParticipantId>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `key`, allocating one on first sight.
    pub fn ensure(&mut self, key: ParticipantKey) -> ParticipantId {
        if let Some(id) = self.by_key.get(&key) {
            return *id;
        }
        let id = self.participants.insert(key.clone());
        self.by_key.insert(key, id);
        id
    }

    pub fn id_by_key(&self, key: &ParticipantKey) -> Option<ParticipantId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: ParticipantId) -> Option<&ParticipantKey> {
        self.participants.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &ParticipantKey)> {
        self.participants.iter()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_is_idempotent_per_key() {
        let mut registry = ParticipantRegistry::new();
        let ham = registry.ensure(ParticipantKey::driver(44));
        let ver = registry.ensure(ParticipantKey::driver(1));
        let ferrari = registry.ensure(ParticipantKey::team("Ferrari"));

        assert_eq!(registry.ensure(ParticipantKey::driver(44)), ham);
        assert_ne!(ham, ver);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(ferrari), Some(&ParticipantKey::team("Ferrari")));
        assert_eq!(registry.id_by_key(&ParticipantKey::driver(1)), Some(ver));
        assert_eq!(registry.id_by_key(&ParticipantKey::driver(16)), None);
    }
}
