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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::DEFAULT;
use crate::Level;
use crate::Levels;
use crate::level::AtomicLevel;

/// A logger whose threshold is owned by a [`Registry`].
pub(crate) trait Leveled {
    fn threshold(&self) -> &AtomicLevel;
}

#[derive(Debug)]
struct Slot<L> {
    logger: Arc<L>,
    // once set, the logger no longer follows the default level
    custom: bool,
}

#[derive(Debug)]
struct State<L> {
    default: Level,
    slots: HashMap<String, Slot<L>>,
}

/// The named loggers of a logbook together with its default level.
///
/// Structural changes happen under one lock. Each logger keeps its level in an atomic so log
/// calls never touch the lock.
#[derive(Debug)]
pub(crate) struct Registry<L> {
    state: Mutex<State<L>>,
}

impl<L: Leveled> Registry<L> {
    pub(crate) fn new(default: Level) -> Self {
        Self {
            state: Mutex::new(State {
                default,
                slots: HashMap::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State<L>> {
        // every critical section leaves the state consistent
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn default_level(&self) -> Level {
        self.state().default
    }

    /// Return the logger named `name`, creating it at the default level if unseen.
    ///
    /// `make` receives the name and the level the new logger starts at.
    pub(crate) fn join(&self, name: &str, make: impl FnOnce(&str, Level) -> L) -> Arc<L> {
        let mut state = self.state();
        if let Some(slot) = state.slots.get(name) {
            return slot.logger.clone();
        }

        let logger = Arc::new(make(name, state.default));
        let slot = Slot {
            logger: logger.clone(),
            custom: false,
        };
        state.slots.insert(name.to_owned(), slot);
        logger
    }

    /// Apply a level change, creating the logger with `make` if `name` is unseen.
    pub(crate) fn set_level(
        &self,
        name: &str,
        level: Level,
        make: impl FnOnce(&str, Level) -> L,
    ) {
        let mut state = self.state();

        if name == DEFAULT {
            state.default = level;
            for slot in state.slots.values().filter(|slot| !slot.custom) {
                slot.logger.threshold().store(level);
            }
            return;
        }

        match state.slots.get_mut(name) {
            Some(slot) => {
                slot.logger.threshold().store(level);
                slot.custom = true;
            }
            None => {
                let slot = Slot {
                    logger: Arc::new(make(name, level)),
                    custom: true,
                };
                state.slots.insert(name.to_owned(), slot);
            }
        }
    }

    pub(crate) fn levels(&self) -> Levels {
        let state = self.state();
        let mut levels = state
            .slots
            .iter()
            .map(|(name, slot)| (name.clone(), slot.logger.threshold().load()))
            .collect::<Levels>();
        // a logger joined under the sentinel name always tracks the default
        levels.insert(DEFAULT.to_owned(), state.default);
        levels
    }

    #[cfg(test)]
    fn is_custom(&self, name: &str) -> Option<bool> {
        self.state().slots.get(name).map(|slot| slot.custom)
    }
}
