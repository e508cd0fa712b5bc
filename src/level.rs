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

//! Severity levels.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use crate::Error;

/// The name addressing the default level bucket of a logbook.
///
/// Passing it to [`Logbook::set_level`](crate::Logbook::set_level) changes the level of every
/// logger that has not been given a level of its own.
pub const DEFAULT: &str = "default";

/// An enum representing the severity threshold of a logger, and the severity of a message.
///
/// Levels are ordered by verbosity: [`Level::Fatal`] is the smallest value and
/// [`Level::Verbose`] the largest. A logger whose level is `L` emits a message of level `M` iff
/// `L >= M`.
///
/// # Examples
///
/// ```
/// use logforth_tee::Level;
///
/// assert!(Level::Info.enables(Level::Warning));
/// assert!(!Level::Error.enables(Level::Info));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum Level {
    /// Designates failures the process cannot survive.
    Fatal = 0,
    /// Designates failures that abort the current operation.
    Panic = 1,
    /// Designates errors.
    Error = 2,
    /// Designates hazardous situations.
    Warning = 3,
    /// Designates useful information.
    Info = 4,
    /// Designates chatty, low priority information.
    Verbose = 5,
}

impl Level {
    /// All levels, from the most restrictive to the least restrictive.
    pub const ALL: [Level; 6] = [
        Level::Fatal,
        Level::Panic,
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Verbose,
    ];

    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Verbose => "VERBOSE",
        }
    }

    /// Whether a threshold of `self` lets a message of `level` through.
    pub fn enables(self, level: Level) -> bool {
        self >= level
    }

    fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Fatal,
            1 => Level::Panic,
            2 => Level::Error,
            3 => Level::Warning,
            4 => Level::Info,
            5 => Level::Verbose,
            // only ever stored from a `Level`
            _ => unreachable!("invalid level byte: {value}"),
        }
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for level in Level::ALL {
            if s.eq_ignore_ascii_case(level.as_str()) {
                return Ok(level);
            }
        }

        Err(Error::new(format!("malformed level: {s:?}")))
    }
}

/// A level that can be read by log calls while an administrator replaces it.
#[derive(Debug)]
pub(crate) struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub(crate) fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub(crate) fn load(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, level: Level) {
        self.0.store(level as u8, Ordering::Release);
    }

    pub(crate) fn enables(&self, level: Level) -> bool {
        self.load().enables(level)
    }
}
