//! Registry of the destinations a logger fans out to

use fanlog_core::{Destination, DestinationId, Level};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Manager for all registered destinations
#[derive(Default)]
pub struct DestinationManager {
    destinations: RwLock<Vec<Arc<dyn Destination>>>,
}

impl DestinationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a destination; adding the same instance twice is a no-op
    pub fn add(&self, destination: Arc<dyn Destination>) -> DestinationId {
        let id = destination.id();
        let mut destinations = self.destinations.write();
        if destinations.iter().any(|d| d.id() == id) {
            debug!("Destination {} already registered", id);
        } else {
            destinations.push(destination);
        }
        id
    }

    /// Unregister a destination, handing it back if it was present
    pub fn remove(&self, id: DestinationId) -> Option<Arc<dyn Destination>> {
        let mut destinations = self.destinations.write();
        let index = destinations.iter().position(|d| d.id() == id)?;
        Some(destinations.remove(index))
    }

    pub fn contains(&self, id: DestinationId) -> bool {
        self.destinations.read().iter().any(|d| d.id() == id)
    }

    pub fn len(&self) -> usize {
        self.destinations.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.read().is_empty()
    }

    /// Remove every destination
    pub fn clear(&self) {
        self.destinations.write().clear();
    }

    /// All destinations in registration order
    pub fn snapshot(&self) -> Vec<Arc<dyn Destination>> {
        self.destinations.read().clone()
    }

    /// Destinations that would write an event at `level`
    pub fn accepting(&self, level: Level) -> Vec<Arc<dyn Destination>> {
        self.destinations
            .read()
            .iter()
            .filter(|d| d.accepts(level))
            .cloned()
            .collect()
    }

    /// Apply `f` to every registered destination of type `T`
    pub fn for_each_of<T: 'static>(&self, mut f: impl FnMut(&T)) {
        for destination in self.snapshot() {
            if let Some(concrete) = destination.as_any().downcast_ref::<T>() {
                f(concrete);
            }
        }
    }

    /// Apply `f` to the first registered destination of type `T`
    pub fn with_first<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.snapshot()
            .iter()
            .find_map(|d| d.as_any().downcast_ref::<T>())
            .map(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDestination;
    use fanlog_core::Threshold;

    #[test]
    fn test_add_and_remove() {
        let manager = DestinationManager::new();
        let mock: Arc<dyn Destination> = Arc::new(MockDestination::new());

        let id = manager.add(mock.clone());
        assert!(manager.contains(id));
        assert_eq!(manager.add(mock), id);
        assert_eq!(manager.len(), 1);

        assert!(manager.remove(id).is_some());
        assert!(manager.remove(id).is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_identical_destinations_are_distinct() {
        let manager = DestinationManager::new();
        manager.add(Arc::new(MockDestination::new()));
        manager.add(Arc::new(MockDestination::new()));
        assert_eq!(manager.len(), 2);

        manager.clear();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_accepting_filters_by_threshold() {
        let manager = DestinationManager::new();
        manager.add(Arc::new(MockDestination::with_threshold(Threshold::at(Level::Error))));
        manager.add(Arc::new(MockDestination::new()));
        manager.add(Arc::new(MockDestination::with_threshold(Threshold::disabled())));

        assert_eq!(manager.accepting(Level::Info).len(), 1);
        assert_eq!(manager.accepting(Level::Error).len(), 2);
    }

    #[test]
    fn test_typed_lookup() {
        let manager = DestinationManager::new();
        let mock = Arc::new(MockDestination::new());
        manager.add(mock.clone());

        let calls = manager.with_first::<MockDestination, _>(|m| m.call_count());
        assert_eq!(calls, Some(0));

        let mut seen = 0;
        manager.for_each_of::<MockDestination>(|_| seen += 1);
        assert_eq!(seen, 1);
    }
}
