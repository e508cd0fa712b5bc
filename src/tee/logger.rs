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

use crate::Event;
use crate::Level;
use crate::Logger;
use crate::level::AtomicLevel;
use crate::logbook::registry::Leveled;

/// A logger that forwards each call to one logger per backend logbook.
///
/// Obtained from [`TeeLogbook::join`](crate::TeeLogbook::join). Every call is checked against
/// the tee's level first; a suppressed call never reaches any backend.
#[derive(Debug)]
pub struct TeeLogger {
    name: String,
    level: AtomicLevel,
    loggers: Vec<Arc<dyn Logger>>,
}

impl TeeLogger {
    pub(super) fn new(name: &str, level: Level, loggers: Vec<Arc<dyn Logger>>) -> Self {
        Self {
            name: name.to_owned(),
            level: AtomicLevel::new(level),
            loggers,
        }
    }

    /// The name this logger was joined under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current level of this logger.
    pub fn level(&self) -> Level {
        self.level.load()
    }

    /// The backend loggers, in backend order.
    pub fn backends(&self) -> &[Arc<dyn Logger>] {
        &self.loggers
    }

    fn dispatch(&self, level: Level, f: impl Fn(&dyn Logger)) {
        if !self.level.enables(level) {
            return;
        }

        for logger in &self.loggers {
            f(logger.as_ref());
        }
    }
}

impl Leveled for TeeLogger {
    fn threshold(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Logger for TeeLogger {
    fn verbose(&self, msg: &str) {
        self.dispatch(Level::Verbose, |logger| logger.verbose(msg));
    }

    fn info(&self, msg: &str) {
        self.dispatch(Level::Info, |logger| logger.info(msg));
    }

    fn warning(&self, msg: &str) {
        self.dispatch(Level::Warning, |logger| logger.warning(msg));
    }

    fn error(&self, msg: &str) {
        self.dispatch(Level::Error, |logger| logger.error(msg));
    }

    fn panic(&self, msg: &str) {
        self.dispatch(Level::Panic, |logger| logger.panic(msg));
    }

    fn fatal(&self, msg: &str) {
        for logger in &self.loggers {
            logger.fatal(msg);
        }
    }

    fn event(&self, level: Level, build: &dyn Fn(&mut dyn Event)) {
        self.dispatch(level, |logger| logger.event(level, build));
    }
}
