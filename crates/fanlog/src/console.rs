//! Console destination

use colored::{ColoredString, Colorize};
use fanlog_core::format::{metadata_string, prefix};
use fanlog_core::{Destination, DestinationId, Level, LogEvent, PrefixStyle, Threshold};
use std::any::Any;
use std::io::Write;

/// Writes decorated lines to stdout, or stderr for errors and above
pub struct ConsoleDestination {
    id: DestinationId,
    threshold: Threshold,
    colors: bool,
}

impl ConsoleDestination {
    pub fn new(threshold: Threshold, colors: bool) -> Self {
        Self {
            id: DestinationId::new(),
            threshold,
            colors,
        }
    }

    /// Render the line written for `event`
    pub fn render(&self, event: &LogEvent) -> String {
        let prefix = prefix(event.level, PrefixStyle::Decorated);
        let location = format!("({})", event.location);

        if !self.colors {
            return format!(
                "{} {} {} {}\n",
                prefix,
                event.message,
                metadata_string(event),
                location
            );
        }

        format!(
            "{} {} {} {}\n",
            paint(event.level, &prefix),
            event.message,
            metadata_string(event).dimmed(),
            location.dimmed()
        )
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::new(Threshold::default(), true)
    }
}

fn paint(level: Level, prefix: &str) -> ColoredString {
    match level {
        Level::Verbose => prefix.dimmed(),
        Level::Debug => prefix.blue(),
        Level::Info => prefix.green(),
        Level::Warning => prefix.yellow().bold(),
        Level::Error => prefix.red().bold(),
        Level::Critical => prefix.white().on_red().bold(),
    }
}

impl Destination for ConsoleDestination {
    fn id(&self) -> DestinationId {
        self.id
    }

    fn threshold(&self) -> Threshold {
        self.threshold
    }

    fn log(&self, event: &LogEvent) {
        if !self.accepts(event.level) {
            return;
        }

        let line = self.render(event);
        // One write per line keeps concurrent callers from interleaving
        let _ = if event.level >= Level::Error {
            std::io::stderr().lock().write_all(line.as_bytes())
        } else {
            std::io::stdout().lock().write_all(line.as_bytes())
        };
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
