//! In-memory destination for tests

use fanlog_core::{format_line, Destination, DestinationId, LogEvent, PrefixStyle, Threshold};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A destination that records every event it accepts
#[derive(Default)]
pub struct MockDestination {
    id: DestinationId,
    threshold: Threshold,
    events: Mutex<Vec<LogEvent>>,
    call_count: AtomicUsize,
}

impl MockDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: Threshold) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Number of events received, including rejected ones
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Recorded events, oldest first
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Recorded events rendered the way the file destination writes them
    pub fn lines(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|e| format_line(e, PrefixStyle::Plain))
            .collect()
    }

    /// Check if any recorded message contains `text`
    pub fn was_logged(&self, text: &str) -> bool {
        self.events.lock().iter().any(|e| e.message.contains(text))
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Destination for MockDestination {
    fn id(&self) -> DestinationId {
        self.id
    }

    fn threshold(&self) -> Threshold {
        self.threshold
    }

    fn log(&self, event: &LogEvent) {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.accepts(event.level) {
            return;
        }
        self.events.lock().push(event.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_core::Level;

    #[test]
    fn test_mock_records_events() {
        let mock = MockDestination::new();
        mock.log(&LogEvent::new(Level::Info, "a", "hello"));
        mock.log(&LogEvent::new(Level::Debug, "a", "world"));

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.events().len(), 2);
        assert!(mock.was_logged("hello"));
        assert_eq!(mock.lines()[1], "[ DEBUG ] world [label: a]\n");

        mock.clear();
        assert!(mock.events().is_empty());
    }

    #[test]
    fn test_mock_respects_threshold() {
        let mock = MockDestination::with_threshold(Threshold::at(Level::Warning));
        mock.log(&LogEvent::new(Level::Info, "a", "quiet"));
        mock.log(&LogEvent::new(Level::Error, "a", "loud"));

        assert_eq!(mock.call_count(), 2);
        assert!(!mock.was_logged("quiet"));
        assert!(mock.was_logged("loud"));
    }
}
