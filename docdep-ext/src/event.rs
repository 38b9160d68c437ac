//! Host lifecycle events.

use std::fmt;

/// A point in the host's build lifecycle extensions can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// The build environment is final after a build pass.
    EnvUpdated,
}

impl Event {
    /// The event's name as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::EnvUpdated => "env-updated",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
