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

//! Level configuration from strings and the environment.
//!
//! A directive string is a comma-separated list of directives, each one of:
//!
//! * `level`, which sets the default level, e.g. `info`;
//! * `name=level`, which pins the level of one logger, e.g. `db=verbose`;
//! * `name`, which pins one logger at [`Level::Verbose`].
//!
//! ```
//! use logforth_tee::DEFAULT;
//! use logforth_tee::Level;
//! use logforth_tee::Logbook;
//! use logforth_tee::backend::NoopLogbook;
//! use logforth_tee::directive::Directives;
//!
//! let logbook = NoopLogbook::default();
//! let directives: Directives = "warning,db=verbose".parse().unwrap();
//! directives.apply(&logbook).unwrap();
//!
//! let levels = logbook.levels();
//! assert_eq!(levels[DEFAULT], Level::Warning);
//! assert_eq!(levels["db"], Level::Verbose);
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::DEFAULT;
use crate::Error;
use crate::Level;
use crate::Logbook;

/// The environment variable conventionally holding level directives.
pub const DEFAULT_ENV: &str = "LOGFORTH_LEVELS";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    // `None` addresses the default level
    name: Option<String>,
    level: Level,
}

/// An ordered list of level directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    directives: Vec<Directive>,
}

impl Directives {
    /// Create an empty list of directives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read directives from the environment variable `key`.
    ///
    /// An unset variable yields no directives.
    ///
    /// # Errors
    ///
    /// Return an error if the variable is not unicode or does not parse.
    pub fn from_env(key: &str) -> Result<Self, Error> {
        match env::var(key) {
            Ok(value) => value
                .parse()
                .map_err(|err: Error| err.with_context("env", key)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(err) => Err(Error::new("failed to read level directives")
                .with_context("env", key)
                .with_source(err)),
        }
    }

    /// Append a directive setting the default level.
    pub fn default_level(mut self, level: Level) -> Self {
        self.directives.push(Directive { name: None, level });
        self
    }

    /// Append a directive pinning the level of the logger named `name`.
    pub fn logger(mut self, name: impl Into<String>, level: Level) -> Self {
        let name = name.into();
        let name = if name == DEFAULT { None } else { Some(name) };
        self.directives.push(Directive { name, level });
        self
    }

    /// Whether there are no directives.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Iterate over `(name, level)` pairs in order; the default level is named
    /// [`DEFAULT`].
    pub fn iter(&self) -> impl Iterator<Item = (&str, Level)> {
        self.directives
            .iter()
            .map(|d| (d.name.as_deref().unwrap_or(DEFAULT), d.level))
    }

    /// Replay the directives, in order, through [`Logbook::set_level`].
    ///
    /// # Errors
    ///
    /// Stop at, and return, the first error raised by the logbook.
    pub fn apply(&self, logbook: &dyn Logbook) -> Result<(), Error> {
        for (name, level) in self.iter() {
            logbook.set_level(name, level)?;
        }
        Ok(())
    }
}

fn parse_directive(text: &str) -> Result<Directive, Error> {
    let malformed = || Error::new("malformed level directive").with_context("directive", text);

    let mut parts = text.split('=');
    let (Some(first), second, None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let first = first.trim();
    match second.map(str::trim) {
        None => match first.parse::<Level>() {
            Ok(level) => Ok(Directive { name: None, level }),
            Err(_) => Ok(Directive {
                name: Some(first.to_owned()),
                level: Level::Verbose,
            }),
        },
        Some(_) if first.is_empty() => Err(malformed()),
        Some(level) => {
            let level = level
                .parse::<Level>()
                .map_err(|err| malformed().with_source(err))?;
            let name = if first == DEFAULT {
                None
            } else {
                Some(first.to_owned())
            };
            Ok(Directive { name, level })
        }
    }
}

impl FromStr for Directives {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let directives = s
            .split(',')
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(parse_directive)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Directives { directives })
    }
}

impl fmt::Display for Directives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, directive) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            let level = directive.level.as_str().to_ascii_lowercase();
            match &directive.name {
                Some(name) => write!(f, "{name}={level}")?,
                None => f.write_str(&level)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NoopLogbook;

    #[test]
    fn parse_valid() {
        let directives: Directives = " info , db=VERBOSE,http=error,,cache ".parse().unwrap();

        let parsed = directives.iter().collect::<Vec<_>>();
        assert_eq!(
            parsed,
            [
                (DEFAULT, Level::Info),
                ("db", Level::Verbose),
                ("http", Level::Error),
                ("cache", Level::Verbose),
            ]
        );
        assert_eq!(
            directives.to_string(),
            "info,db=verbose,http=error,cache=verbose"
        );
    }

    #[test]
    fn parse_invalid_level() {
        let err = "db=loud,http=error".parse::<Directives>().unwrap_err();
        assert_eq!(err.message(), "malformed level directive");
        assert_eq!(err.context("directive"), Some("db=loud"));
        assert_eq!(err.sources().len(), 1);
    }

    #[test]
    fn parse_too_many_equals() {
        let err = "db=warning=info".parse::<Directives>().unwrap_err();
        assert_eq!(err.context("directive"), Some("db=warning=info"));
    }

    #[test]
    fn parse_missing_name() {
        let err = "=info".parse::<Directives>().unwrap_err();
        assert_eq!(err.context("directive"), Some("=info"));
    }

    #[test]
    fn explicit_default_name_addresses_default_level() {
        let directives: Directives = "default=panic".parse().unwrap();
        assert_eq!(directives, Directives::new().default_level(Level::Panic));
        assert_eq!(
            Directives::new().logger(DEFAULT, Level::Info),
            Directives::new().default_level(Level::Info)
        );
    }

    #[test]
    fn apply_in_order() {
        let logbook = NoopLogbook::default();
        let directives = Directives::new()
            .logger("db", Level::Error)
            .default_level(Level::Info)
            .logger("db", Level::Warning);
        directives.apply(&logbook).unwrap();

        let levels = logbook.levels();
        assert_eq!(levels[DEFAULT], Level::Info);
        assert_eq!(levels["db"], Level::Warning);
    }

    #[test]
    fn unset_env_yields_nothing() {
        let directives = Directives::from_env("LOGFORTH_TEE_TEST_SURELY_UNSET").unwrap();
        assert!(directives.is_empty());
    }
}
