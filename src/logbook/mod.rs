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

//! The logger and logbook capabilities shared by the tee logbook and its backends.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::Event;
use crate::Level;

pub(crate) mod registry;

/// A snapshot of the levels known to a logbook, keyed by logger name.
///
/// Always contains an entry for [`DEFAULT`](crate::DEFAULT).
pub type Levels = BTreeMap<String, Level>;

/// A named logger.
///
/// Each severity method is a no-op when the logger's level does not enable that severity,
/// except [`fatal`](Logger::fatal), which implementations must always emit.
pub trait Logger: fmt::Debug + Send + Sync + 'static {
    /// Log a message at [`Level::Verbose`].
    fn verbose(&self, msg: &str);

    /// Log a message at [`Level::Info`].
    fn info(&self, msg: &str);

    /// Log a message at [`Level::Warning`].
    fn warning(&self, msg: &str);

    /// Log a message at [`Level::Error`].
    fn error(&self, msg: &str);

    /// Log a message at [`Level::Panic`].
    fn panic(&self, msg: &str);

    /// Log a message at [`Level::Fatal`], regardless of the logger's level.
    ///
    /// Implementations must make sure the message reaches its destination before returning.
    fn fatal(&self, msg: &str);

    /// Log a structured event at `level`.
    ///
    /// `build` populates the event and is only invoked when `level` passes the filter, so
    /// suppressed events cost nothing to construct. It may be invoked once per destination.
    fn event(&self, level: Level, build: &dyn Fn(&mut dyn Event));
}

/// The capability to obtain, or lazily create, a named logger.
pub trait Joiner: Send + Sync {
    /// Return the logger named `name`, creating it on first use.
    ///
    /// Joining the same name twice yields the same logger.
    fn join(&self, name: &str) -> Arc<dyn Logger>;
}

/// A set of named loggers under one level policy.
pub trait Logbook: fmt::Debug + Send + Sync + 'static {
    /// Set the level of the logger named `name`.
    ///
    /// Passing [`DEFAULT`](crate::DEFAULT) changes the default level, which every logger
    /// without an explicitly set level follows.
    fn set_level(&self, name: &str, level: Level) -> Result<(), Error>;

    /// Snapshot the default level and the level of every known logger.
    fn levels(&self) -> Levels;

    /// The view of this logbook that hands out loggers.
    fn joiner(&self) -> &dyn Joiner;
}
