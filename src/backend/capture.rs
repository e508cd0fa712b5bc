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
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::Event;
use crate::Fields;
use crate::Joiner;
use crate::Level;
use crate::Levels;
use crate::Logbook;
use crate::Logger;
use crate::level::AtomicLevel;
use crate::logbook::registry::Leveled;
use crate::logbook::registry::Registry;

/// A log entry recorded by a [`CaptureLogbook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEntry {
    /// The severity the entry was logged at.
    pub level: Level,
    /// The name of the logger that emitted the entry.
    pub logger: String,
    /// The message, or `None` for structured events.
    pub message: Option<String>,
    /// The fields of a structured event; empty for plain messages.
    pub fields: Fields,
}

type Entries = Arc<Mutex<Vec<CapturedEntry>>>;

/// A logbook that records log entries in memory so tests can assert on them.
///
/// # Examples
///
/// ```
/// use logforth_tee::DEFAULT;
/// use logforth_tee::Level;
/// use logforth_tee::Logbook;
/// use logforth_tee::Logger;
/// use logforth_tee::backend::CaptureLogbook;
///
/// let logbook = CaptureLogbook::default();
/// logbook.set_level(DEFAULT, Level::Info).unwrap();
///
/// let logger = logbook.join("svc");
/// logger.verbose("too chatty");
/// logger.info("ready");
///
/// assert_eq!(logbook.messages(), ["ready"]);
/// ```
#[derive(Debug)]
pub struct CaptureLogbook {
    entries: Entries,
    registry: Registry<CaptureLogger>,
}

impl Default for CaptureLogbook {
    fn default() -> Self {
        Self {
            entries: Entries::default(),
            registry: Registry::new(Level::Fatal),
        }
    }
}

impl CaptureLogbook {
    /// Return the logger named `name`, creating it on first use.
    pub fn join(&self, name: &str) -> Arc<CaptureLogger> {
        self.registry
            .join(name, |name, level| self.make_logger(name, level))
    }

    /// A copy of every entry recorded so far, in emission order.
    pub fn entries(&self) -> Vec<CapturedEntry> {
        lock(&self.entries).clone()
    }

    /// The messages recorded so far, in emission order. Structured events are skipped.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.entries)
            .iter()
            .filter_map(|entry| entry.message.clone())
            .collect()
    }

    /// Drop every recorded entry.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    fn make_logger(&self, name: &str, level: Level) -> CaptureLogger {
        CaptureLogger {
            name: name.to_owned(),
            level: AtomicLevel::new(level),
            entries: self.entries.clone(),
        }
    }
}

impl Logbook for CaptureLogbook {
    fn set_level(&self, name: &str, level: Level) -> Result<(), Error> {
        self.registry
            .set_level(name, level, |name, level| self.make_logger(name, level));
        Ok(())
    }

    fn levels(&self) -> Levels {
        self.registry.levels()
    }

    fn joiner(&self) -> &dyn Joiner {
        self
    }
}

impl Joiner for CaptureLogbook {
    fn join(&self, name: &str) -> Arc<dyn Logger> {
        CaptureLogbook::join(self, name)
    }
}

fn lock(entries: &Entries) -> MutexGuard<'_, Vec<CapturedEntry>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}

/// A logger of a [`CaptureLogbook`].
#[derive(Debug)]
pub struct CaptureLogger {
    name: String,
    level: AtomicLevel,
    entries: Entries,
}

impl CaptureLogger {
    fn record(&self, level: Level, message: Option<&str>, fields: Fields) {
        lock(&self.entries).push(CapturedEntry {
            level,
            logger: self.name.clone(),
            message: message.map(str::to_owned),
            fields,
        });
    }

    fn message(&self, level: Level, msg: &str) {
        if self.level.enables(level) {
            self.record(level, Some(msg), Fields::default());
        }
    }
}

impl Leveled for CaptureLogger {
    fn threshold(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Logger for CaptureLogger {
    fn verbose(&self, msg: &str) {
        self.message(Level::Verbose, msg);
    }

    fn info(&self, msg: &str) {
        self.message(Level::Info, msg);
    }

    fn warning(&self, msg: &str) {
        self.message(Level::Warning, msg);
    }

    fn error(&self, msg: &str) {
        self.message(Level::Error, msg);
    }

    fn panic(&self, msg: &str) {
        self.message(Level::Panic, msg);
    }

    fn fatal(&self, msg: &str) {
        self.record(Level::Fatal, Some(msg), Fields::default());
    }

    fn event(&self, level: Level, build: &dyn Fn(&mut dyn Event)) {
        if self.level.enables(level) {
            self.record(level, None, Fields::collect(build));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    #[test]
    fn fatal_ignores_level() {
        let logbook = CaptureLogbook::default();
        let logger = logbook.join("svc");
        logger.panic("filtered");
        logger.fatal("kept");

        assert_eq!(logbook.messages(), ["kept"]);
    }

    #[test]
    fn records_events_with_fields() {
        let logbook = CaptureLogbook::default();
        logbook.set_level("svc", Level::Warning).unwrap();
        let logger = logbook.join("svc");

        logger.event(Level::Info, &|e| e.string("msg", "filtered"));
        logger.event(Level::Warning, &|e| e.int("retries", 2));

        let entries = logbook.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Warning);
        assert_eq!(entries[0].logger, "svc");
        assert_eq!(entries[0].message, None);
        assert_eq!(entries[0].fields.get("retries"), Some(&FieldValue::Int(2)));

        logbook.clear();
        assert!(logbook.entries().is_empty());
    }
}
