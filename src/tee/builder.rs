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
use crate::Level;
use crate::Logbook;
use crate::TeeLogbook;
use crate::directive::Directives;

/// A builder for configuring the backends and initial levels of a [`TeeLogbook`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logforth_tee::Level;
/// use logforth_tee::TeeLogbook;
/// use logforth_tee::backend::ConsoleLogbook;
/// use logforth_tee::backend::NoopLogbook;
///
/// let logbook = TeeLogbook::builder()
///     .backend(Arc::new(NoopLogbook::default()))
///     .backend(Arc::new(ConsoleLogbook::stderr()))
///     .default_level(Level::Info)
///     .build()
///     .unwrap();
/// ```
#[must_use = "call `build` to construct the logbook"]
#[derive(Debug)]
pub struct TeeLogbookBuilder {
    backends: Vec<Arc<dyn Logbook>>,
    default_level: Level,
    directives: Option<Directives>,
}

impl Default for TeeLogbookBuilder {
    fn default() -> Self {
        Self {
            backends: vec![],
            default_level: Level::Fatal,
            directives: None,
        }
    }
}

impl TeeLogbookBuilder {
    /// Add a backend logbook. Backends receive calls in the order they are added.
    pub fn backend(mut self, logbook: Arc<dyn Logbook>) -> Self {
        self.backends.push(logbook);
        self
    }

    /// Add several backend logbooks.
    pub fn backends(mut self, logbooks: impl IntoIterator<Item = Arc<dyn Logbook>>) -> Self {
        self.backends.extend(logbooks);
        self
    }

    /// Set the initial default level. Default to [`Level::Fatal`].
    pub fn default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Apply level directives once the logbook is constructed.
    ///
    /// Directives are applied after [`default_level`](Self::default_level), so a bare level
    /// directive overrides it.
    pub fn directives(mut self, directives: Directives) -> Self {
        self.directives = Some(directives);
        self
    }

    /// Build the [`TeeLogbook`].
    ///
    /// # Errors
    ///
    /// Return the first error raised by a backend while handing its level control over to the
    /// tee, or while applying directives.
    pub fn build(self) -> Result<TeeLogbook, Error> {
        let logbook = TeeLogbook::with_default(self.backends, self.default_level)?;
        if let Some(directives) = self.directives {
            directives.apply(&logbook)?;
        }
        Ok(logbook)
    }
}
