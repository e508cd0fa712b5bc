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

//! A multiplexing log registry.
//!
//! # Overview
//!
//! A [`Logbook`] is a registry of named [`Logger`]s, each with its own [`Level`], plus a default
//! level that every logger without an explicitly set level follows. A [`TeeLogbook`] wraps any
//! number of backend logbooks and fans every log call out to all of them, so one set of loggers
//! can write to the console, to a test capture and to the [`log`] facade at once.
//!
//! The tee owns level control: at construction every backend is opened up to
//! [`Level::Verbose`], and filtering happens once, in the tee. A tee is itself a logbook, so
//! tees can be nested.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logforth_tee::DEFAULT;
//! use logforth_tee::Level;
//! use logforth_tee::Logbook;
//! use logforth_tee::Logger;
//! use logforth_tee::TeeLogbook;
//! use logforth_tee::backend::CaptureLogbook;
//! use logforth_tee::backend::ConsoleLogbook;
//!
//! let capture = Arc::new(CaptureLogbook::default());
//! let logbook = TeeLogbook::builder()
//!     .backend(capture.clone())
//!     .backend(Arc::new(ConsoleLogbook::stderr()))
//!     .default_level(Level::Info)
//!     .build()
//!     .unwrap();
//!
//! logbook.set_level("db", Level::Error).unwrap();
//!
//! let http = logbook.join("http");
//! http.info("listening");
//! http.event(Level::Warning, &|e| {
//!     e.string("path", "/health");
//!     e.int("status", 503);
//! });
//!
//! let db = logbook.join("db");
//! db.warning("suppressed");
//!
//! assert_eq!(capture.messages(), ["listening"]);
//! assert_eq!(logbook.levels()[DEFAULT], Level::Info);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod backend;
pub mod directive;
pub mod trap;

mod error;
mod event;
mod level;
mod logbook;
mod tee;

pub use self::error::Error;
pub use self::event::Event;
pub use self::event::FieldValue;
pub use self::event::Fields;
pub use self::level::DEFAULT;
pub use self::level::Level;
pub use self::logbook::Joiner;
pub use self::logbook::Levels;
pub use self::logbook::Logbook;
pub use self::logbook::Logger;
pub use self::tee::TeeLogbook;
pub use self::tee::TeeLogbookBuilder;
pub use self::tee::TeeLogger;
