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

//! Backend logbooks a [`TeeLogbook`](crate::TeeLogbook) can fan out to.
//!
//! Each backend is a complete [`Logbook`](crate::Logbook) with its own per-name levels, starting
//! at a default of [`Level::Fatal`](crate::Level::Fatal). Wrapped by a tee, a backend's default
//! is opened up to [`Level::Verbose`](crate::Level::Verbose) and the tee does the filtering.

mod bridge;
mod capture;
mod console;
mod noop;

pub use self::bridge::BridgeLogger;
pub use self::bridge::LogBridge;
pub use self::capture::CaptureLogbook;
pub use self::capture::CaptureLogger;
pub use self::capture::CapturedEntry;
pub use self::console::ConsoleLogbook;
pub use self::console::ConsoleLogbookBuilder;
pub use self::console::ConsoleLogger;
pub use self::noop::NoopLogbook;
pub use self::noop::NoopLogger;
