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

use log::kv::Key;
use log::kv::Value;
use log::kv::VisitSource;

use crate::Error;
use crate::Event;
use crate::FieldValue;
use crate::Fields;
use crate::Joiner;
use crate::Level;
use crate::Levels;
use crate::Logbook;
use crate::Logger;
use crate::level::AtomicLevel;
use crate::logbook::registry::Leveled;
use crate::logbook::registry::Registry;

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Fatal | Level::Panic | Level::Error => log::Level::Error,
            Level::Warning => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Verbose => log::Level::Debug,
        }
    }
}

impl log::kv::Source for Fields {
    fn visit<'kvs>(&'kvs self, visitor: &mut dyn VisitSource<'kvs>) -> Result<(), log::kv::Error> {
        for (key, value) in self.iter() {
            let value = match value {
                FieldValue::Str(s) => Value::from(s.as_str()),
                FieldValue::Int(i) => Value::from(*i),
                FieldValue::Bool(b) => Value::from(*b),
            };
            visitor.visit_pair(Key::from(key), value)?;
        }
        Ok(())
    }
}

/// A logbook that forwards log entries to the global [`log`] facade.
///
/// The logger name becomes the record target, and event fields become key-values. Levels map
/// as follows:
///
/// | logforth-tee | log |
/// |--------------|-----|
/// | `Fatal`, `Panic`, `Error` | `Error` |
/// | `Warning` | `Warn` |
/// | `Info` | `Info` |
/// | `Verbose` | `Debug` |
///
/// Records are additionally subject to [`log::max_level`].
///
/// # Examples
///
/// ```
/// use logforth_tee::Logger;
/// use logforth_tee::backend::LogBridge;
///
/// let logbook = LogBridge::default();
/// logbook.join("svc").fatal("forwarded to whichever `log` implementation is installed");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    registry: Registry<BridgeLogger>,
}

impl Default for LogBridge {
    fn default() -> Self {
        Self {
            registry: Registry::new(Level::Fatal),
        }
    }
}

impl LogBridge {
    /// Return the logger named `name`, creating it on first use.
    pub fn join(&self, name: &str) -> Arc<BridgeLogger> {
        self.registry.join(name, BridgeLogger::new)
    }
}

impl Logbook for LogBridge {
    fn set_level(&self, name: &str, level: Level) -> Result<(), Error> {
        self.registry.set_level(name, level, BridgeLogger::new);
        Ok(())
    }

    fn levels(&self) -> Levels {
        self.registry.levels()
    }

    fn joiner(&self) -> &dyn Joiner {
        self
    }
}

impl Joiner for LogBridge {
    fn join(&self, name: &str) -> Arc<dyn Logger> {
        LogBridge::join(self, name)
    }
}

/// A logger of a [`LogBridge`].
#[derive(Debug)]
pub struct BridgeLogger {
    name: String,
    level: AtomicLevel,
}

impl BridgeLogger {
    fn new(name: &str, level: Level) -> Self {
        Self {
            name: name.to_owned(),
            level: AtomicLevel::new(level),
        }
    }

    fn forward(&self, level: Level, message: &str, fields: &Fields) {
        let level = log::Level::from(level);
        if level > log::max_level() {
            return;
        }

        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target(&self.name)
                .key_values(fields)
                .build(),
        );
    }

    fn message(&self, level: Level, msg: &str) {
        if self.level.enables(level) {
            self.forward(level, msg, &Fields::default());
        }
    }
}

impl Leveled for BridgeLogger {
    fn threshold(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Logger for BridgeLogger {
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
        self.forward(Level::Fatal, msg, &Fields::default());
        log::logger().flush();
    }

    fn event(&self, level: Level, build: &dyn Fn(&mut dyn Event)) {
        if self.level.enables(level) {
            self.forward(level, "", &Fields::collect(build));
        }
    }
}
