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

//! The tee logbook: one level policy over many backend logbooks.

use std::sync::Arc;

use crate::DEFAULT;
use crate::Error;
use crate::Joiner;
use crate::Level;
use crate::Levels;
use crate::Logbook;
use crate::Logger;
use crate::logbook::registry::Registry;

mod builder;
mod logger;

pub use self::builder::TeeLogbookBuilder;
pub use self::logger::TeeLogger;

/// A logbook that fans every log call out to a fixed list of backend logbooks.
///
/// The tee owns the level policy. On construction each backend's default level is opened up to
/// [`Level::Verbose`], and from then on filtering is decided by the tee alone:
///
/// * a logger joined without an explicit level follows the tee's default level;
/// * a logger given a level through [`Logbook::set_level`] keeps it, whatever later happens to
///   the default level.
///
/// A `TeeLogbook` is itself a [`Logbook`], so tees can be nested.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logforth_tee::DEFAULT;
/// use logforth_tee::Level;
/// use logforth_tee::Logbook;
/// use logforth_tee::Logger;
/// use logforth_tee::TeeLogbook;
/// use logforth_tee::backend::CaptureLogbook;
///
/// let capture = Arc::new(CaptureLogbook::default());
/// let logbook = TeeLogbook::new([capture.clone() as Arc<dyn Logbook>]).unwrap();
///
/// let logger = logbook.join("svc");
/// logger.info("dropped: the default level is FATAL");
///
/// logbook.set_level(DEFAULT, Level::Info).unwrap();
/// logger.info("delivered");
///
/// assert_eq!(capture.messages(), ["delivered"]);
/// ```
#[derive(Debug)]
pub struct TeeLogbook {
    backends: Vec<Arc<dyn Logbook>>,
    registry: Registry<TeeLogger>,
}

impl TeeLogbook {
    /// Create a new empty [`TeeLogbookBuilder`].
    pub fn builder() -> TeeLogbookBuilder {
        TeeLogbookBuilder::default()
    }

    /// Create a tee over `backends` with a default level of [`Level::Fatal`].
    ///
    /// # Errors
    ///
    /// Return the first error raised by a backend while its default level is set to
    /// [`Level::Verbose`].
    pub fn new(backends: impl IntoIterator<Item = Arc<dyn Logbook>>) -> Result<Self, Error> {
        Self::with_default(backends.into_iter().collect(), Level::Fatal)
    }

    pub(crate) fn with_default(
        backends: Vec<Arc<dyn Logbook>>,
        default_level: Level,
    ) -> Result<Self, Error> {
        // the tee filters, the backends only render
        for backend in &backends {
            backend.set_level(DEFAULT, Level::Verbose)?;
        }

        Ok(Self {
            backends,
            registry: Registry::new(default_level),
        })
    }

    /// Return the logger named `name`, creating it on first use.
    ///
    /// A new logger starts at the current default level and follows it until its level is set
    /// explicitly. Repeated joins return the same [`Arc`].
    pub fn join(&self, name: &str) -> Arc<TeeLogger> {
        self.registry.join(name, |name, level| self.make_logger(name, level))
    }

    /// The current default level.
    pub fn default_level(&self) -> Level {
        self.registry.default_level()
    }

    /// The backend logbooks, in dispatch order.
    pub fn backends(&self) -> &[Arc<dyn Logbook>] {
        &self.backends
    }

    fn make_logger(&self, name: &str, level: Level) -> TeeLogger {
        let loggers = self
            .backends
            .iter()
            .map(|backend| backend.joiner().join(name))
            .collect();
        TeeLogger::new(name, level, loggers)
    }
}

impl Logbook for TeeLogbook {
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

impl Joiner for TeeLogbook {
    fn join(&self, name: &str) -> Arc<dyn Logger> {
        TeeLogbook::join(self, name)
    }
}
