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

use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::Timestamp;
use jiff::tz::TimeZone;

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
use crate::trap::DefaultTrap;
use crate::trap::Trap;

/// A logbook that writes one line of text per log entry.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 FATAL   db: connection pool exhausted
/// 2024-08-11T22:44:57.172219+08:00 WARNING http: slow request
/// 2024-08-11T22:44:57.172276+08:00 INFO    http: path=/ status=200
/// ```
///
/// Structured events render their fields in place of the message. Failures to write are sent to
/// the configured [`Trap`].
///
/// # Examples
///
/// ```
/// use logforth_tee::DEFAULT;
/// use logforth_tee::Level;
/// use logforth_tee::Logbook;
/// use logforth_tee::Logger;
/// use logforth_tee::backend::ConsoleLogbook;
///
/// let logbook = ConsoleLogbook::stdout();
/// logbook.set_level(DEFAULT, Level::Info).unwrap();
/// logbook.join("svc").info("Hello info!");
/// ```
#[derive(Debug)]
pub struct ConsoleLogbook {
    output: Arc<Output>,
    registry: Registry<ConsoleLogger>,
}

impl ConsoleLogbook {
    /// Create a new [`ConsoleLogbookBuilder`] writing to `writer`.
    pub fn builder(writer: impl Write + Send + 'static) -> ConsoleLogbookBuilder {
        ConsoleLogbookBuilder {
            writer: Box::new(writer),
            no_color: false,
            timezone: Some(TimeZone::system()),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// A console logbook writing to `writer` with the default layout.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::builder(writer).build()
    }

    /// A console logbook writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// A console logbook writing to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Return the logger named `name`, creating it on first use.
    pub fn join(&self, name: &str) -> Arc<ConsoleLogger> {
        self.registry
            .join(name, |name, level| self.make_logger(name, level))
    }

    fn make_logger(&self, name: &str, level: Level) -> ConsoleLogger {
        ConsoleLogger {
            name: name.to_owned(),
            level: AtomicLevel::new(level),
            output: self.output.clone(),
        }
    }
}

impl Logbook for ConsoleLogbook {
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

impl Joiner for ConsoleLogbook {
    fn join(&self, name: &str) -> Arc<dyn Logger> {
        ConsoleLogbook::join(self, name)
    }
}

/// A builder for configuring a [`ConsoleLogbook`].
#[must_use = "call `build` to construct the logbook"]
pub struct ConsoleLogbookBuilder {
    writer: Box<dyn Write + Send>,
    no_color: bool,
    timezone: Option<TimeZone>,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for ConsoleLogbookBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLogbookBuilder")
            .field("no_color", &self.no_color)
            .field("timezone", &self.timezone)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl ConsoleLogbookBuilder {
    /// Disable colored levels.
    ///
    /// Levels are only colored when the `colored` feature is enabled.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Omit the timestamp at the start of each line.
    pub fn no_timestamp(mut self) -> Self {
        self.timezone = None;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Default to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = Some(tz);
        self
    }

    /// Set the trap receiving write failures. Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`ConsoleLogbook`].
    pub fn build(self) -> ConsoleLogbook {
        let output = Output {
            writer: Mutex::new(self.writer),
            layout: Layout {
                no_color: self.no_color,
                timezone: self.timezone,
            },
            trap: self.trap,
        };

        ConsoleLogbook {
            output: Arc::new(output),
            registry: Registry::new(Level::Fatal),
        }
    }
}

#[derive(Debug)]
struct Layout {
    #[cfg_attr(not(feature = "colored"), allow(dead_code))]
    no_color: bool,
    timezone: Option<TimeZone>,
}

impl Layout {
    fn format(&self, level: Level, name: &str, message: Option<&str>, fields: &Fields) -> String {
        let mut text = String::new();

        // writing to a String never fails
        if let Some(tz) = &self.timezone {
            let ts = Timestamp::now();
            let _ = write!(&mut text, "{:.6} ", ts.display_with_offset(tz.to_offset(ts)));
        }

        let level = self.level_label(level);
        let _ = write!(&mut text, "{level} {name}:");
        if let Some(message) = message {
            let _ = write!(&mut text, " {message}");
        }
        if !fields.is_empty() {
            let _ = write!(&mut text, " {fields}");
        }

        text.push('\n');
        text
    }

    #[cfg(feature = "colored")]
    fn level_label(&self, level: Level) -> String {
        use colored::Color;
        use colored::Colorize;

        let label = format!("{level:<7}");
        if self.no_color {
            return label;
        }

        let color = match level {
            Level::Fatal => Color::BrightRed,
            Level::Panic => Color::Magenta,
            Level::Error => Color::Red,
            Level::Warning => Color::Yellow,
            Level::Info => Color::Green,
            Level::Verbose => Color::Blue,
        };
        label.color(color).to_string()
    }

    #[cfg(not(feature = "colored"))]
    fn level_label(&self, level: Level) -> String {
        format!("{level:<7}")
    }
}

struct Output {
    writer: Mutex<Box<dyn Write + Send>>,
    layout: Layout,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("layout", &self.layout)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl Output {
    fn writer(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, level: Level, name: &str, message: Option<&str>, fields: &Fields) {
        let text = self.layout.format(level, name, message, fields);
        let result = self.writer().write_all(text.as_bytes());
        if let Err(err) = result {
            let err = Error::from_io_error(err).with_context("logger", name);
            self.trap.trap(&err);
        }
    }

    fn flush(&self, name: &str) {
        let result = self.writer().flush();
        if let Err(err) = result {
            let err = Error::from_io_error(err).with_context("logger", name);
            self.trap.trap(&err);
        }
    }
}

impl Drop for Output {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}

/// A logger of a [`ConsoleLogbook`].
#[derive(Debug)]
pub struct ConsoleLogger {
    name: String,
    level: AtomicLevel,
    output: Arc<Output>,
}

impl ConsoleLogger {
    fn message(&self, level: Level, msg: &str) {
        if self.level.enables(level) {
            self.output
                .write(level, &self.name, Some(msg), &Fields::default());
        }
    }
}

impl Leveled for ConsoleLogger {
    fn threshold(&self) -> &AtomicLevel {
        &self.level
    }
}

impl Logger for ConsoleLogger {
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
        self.output
            .write(Level::Fatal, &self.name, Some(msg), &Fields::default());
        self.output.flush(&self.name);
    }

    fn event(&self, level: Level, build: &dyn Fn(&mut dyn Event)) {
        if self.level.enables(level) {
            let fields = Fields::collect(build);
            self.output.write(level, &self.name, None, &fields);
        }
    }
}
