// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use crate::Error;
use crate::Event;
use crate::Joiner;
use crate::Level;
use crate::Levels;
use crate::Logbook;
use crate::Logger;
use crate::level::AtomicLevel;
use crate::logbook::registry::Leveled;
use crate::logbook::registry::Registry;

/// A logbook that keeps track of levels and discards every message.
///
/// # Examples
///
/// ```
/// use logforth_tee::Logger;
/// use logforth_tee::backend::NoopLogbook;
///
/// let logbook = NoopLogbook::default();
/// logbook.join("svc").fatal("goes nowhere");
/// ```
#[derive(Debug)]
pub struct NoopLogbook {
    registry: Registry<NoopLogger>,
}

impl Default for NoopLogbook {
    fn default() -> Self {
        Self {
            registry: Registry::new(Level::Fatal),
        }
    }
}

impl NoopLogbook {
    /// Return the logger named `name`, creating it on first use.
    pub fn join(&self, name: &str) -> Arc<NoopLogger> {
        self.registry.join(name, NoopLogger::new)
    }
}

impl Logbook for NoopLogbook {
    fn set_level(&self, name: &str, level: Level) -> Result<(), Error> {
        self.registry.set_level(name, level, NoopLogger::new);
        Ok(())
    }

    fn levels(&self) -> Levels {
        self.registry.levels()
    }

    fn joiner(&self) -> &dyn Joiner {
        self
    }
}

impl Joiner for NoopLogbook {
    fn join(&self, name: &str) -> Arc<dyn Logger> {
        NoopLogbook::join(self, name)
    }
}

/// A logger of a [`NoopLogbook`].
#[derive(Debug)]
pub struct NoopLogger {
    level: AtomicLevel,
}

impl NoopLogger {
    fn new(_: &str, level: Level) -> Self {
        Self {
            level: AtomicLevel::new(level),
        }
    }
}

impl Leveled for NoopLogger {
    fn threshold(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Logger for NoopLogger {
    fn verbose(&self, _: &str) {}

    fn info(&self, _: &str) {}

    fn warning(&self, _: &str) {}

    fn error(&self, _: &str) {}

    fn panic(&self, _: &str) {}

    fn fatal(&self, _: &str) {}

    fn event(&self, _: Level, _: &dyn Fn(&mut dyn Event)) {}
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::DEFAULT;

    #[test]
    fn tracks_levels() {
        let logbook = NoopLogbook::default();
        logbook.join("a");
        logbook.set_level("b", Level::Info).unwrap();
        logbook.set_level(DEFAULT, Level::Error).unwrap();

        let levels = logbook.levels();
        assert_eq!(levels[DEFAULT], Level::Error);
        assert_eq!(levels["a"], Level::Error);
        assert_eq!(levels["b"], Level::Info);
    }

    #[test]
    fn never_builds_events() {
        let logbook = NoopLogbook::default();
        logbook.set_level(DEFAULT, Level::Verbose).unwrap();

        let built = Cell::new(false);
        logbook
            .join("svc")
            .event(Level::Fatal, &|_| built.set(true));
        assert!(!built.get());
    }
}
