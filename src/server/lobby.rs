//! Registry of lobbies waiting for a second player.

use std::collections::HashMap;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Open lobbies keyed by a random nonzero id, each holding the creator's
/// connection until someone joins.
///
/// Generic over the connection type so the bookkeeping can be tested
/// without sockets.
pub struct LobbyRegistry<S> {
    lobbies: Mutex<HashMap<u32, S>>,
    rng: Mutex<StdRng>,
}

impl<S> LobbyRegistry<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Registry with reproducible ids.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        LobbyRegistry {
            lobbies: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    /// Open a lobby for `creator` and return its id, unique among open lobbies.
    pub fn create(&self, creator: S) -> u32 {
        let mut lobbies = self.lobbies.lock();
        let mut rng = self.rng.lock();
        let mut id = rng.gen_range(1..=u32::MAX);
        while lobbies.contains_key(&id) {
            id = rng.gen_range(1..=u32::MAX);
        }
        lobbies.insert(id, creator);
        id
    }

    /// Close lobby `id` and hand back the waiting creator, if it exists.
    pub fn join(&self, id: u32) -> Option<S> {
        self.lobbies.lock().remove(&id)
    }

    /// Close every lobby whose creator fails `keep`; returns how many closed.
    pub fn prune(&self, mut keep: impl FnMut(&S) -> bool) -> usize {
        let mut lobbies = self.lobbies.lock();
        let before = lobbies.len();
        lobbies.retain(|_, creator| keep(creator));
        before - lobbies.len()
    }

    /// Close every lobby, returning the waiting creators.
    pub fn drain(&self) -> Vec<(u32, S)> {
        self.lobbies.lock().drain().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lobbies.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lobbies.lock().is_empty()
    }
}

impl<S> Default for LobbyRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_create_then_join() {
        let registry = LobbyRegistry::with_seed(7);
        let id = registry.create("alice");
        assert_ne!(id, 0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.join(id), Some("alice"));
        assert!(registry.is_empty());
        assert_eq!(registry.join(id), None, "a lobby can only be joined once");
    }

    #[test]
    fn test_unknown_lobby() {
        let registry: LobbyRegistry<&str> = LobbyRegistry::with_seed(1);
        assert_eq!(registry.join(12345), None);
    }

    #[test]
    fn test_ids_are_unique_and_nonzero() {
        let registry = LobbyRegistry::with_seed(42);
        let ids: HashSet<u32> = (0..500).map(|i| registry.create(i)).collect();
        assert_eq!(ids.len(), 500);
        assert!(!ids.contains(&0));
        assert_eq!(registry.len(), 500);
    }

    #[test]
    fn test_prune_drops_rejected_creators() {
        let registry = LobbyRegistry::with_seed(9);
        let kept = registry.create("here");
        let gone = registry.create("gone");
        assert_eq!(registry.prune(|creator| *creator != "gone"), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.join(gone), None);
        assert_eq!(registry.join(kept), Some("here"));
    }

    #[test]
    fn test_drain_empties_registry() {
        let registry = LobbyRegistry::with_seed(3);
        let a = registry.create('a');
        let b = registry.create('b');
        let mut drained = registry.drain();
        drained.sort_unstable();
        let mut expected = vec![(a, 'a'), (b, 'b')];
        expected.sort_unstable();
        assert_eq!(drained, expected);
        assert!(registry.is_empty());
    }
}
