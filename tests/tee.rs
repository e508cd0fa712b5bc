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

use std::cell::Cell;
use std::sync::Arc;

use logforth_tee::DEFAULT;
use logforth_tee::Error;
use logforth_tee::FieldValue;
use logforth_tee::Joiner;
use logforth_tee::Level;
use logforth_tee::Levels;
use logforth_tee::Logbook;
use logforth_tee::Logger;
use logforth_tee::TeeLogbook;
use logforth_tee::backend::CaptureLogbook;
use logforth_tee::backend::NoopLogbook;
use logforth_tee::directive::Directives;

fn capture_tee(n: usize) -> (TeeLogbook, Vec<Arc<CaptureLogbook>>) {
    let captures = (0..n)
        .map(|_| Arc::new(CaptureLogbook::default()))
        .collect::<Vec<_>>();
    let logbook = TeeLogbook::new(
        captures
            .iter()
            .map(|capture| capture.clone() as Arc<dyn Logbook>),
    )
    .unwrap();
    (logbook, captures)
}

fn log_every_level(logger: &dyn Logger) {
    logger.verbose("verbose");
    logger.info("info");
    logger.warning("warning");
    logger.error("error");
    logger.panic("panic");
    logger.fatal("fatal");
}

#[test]
fn backends_are_opened_up_at_construction() {
    let (logbook, captures) = capture_tee(2);

    for capture in &captures {
        assert_eq!(capture.levels()[DEFAULT], Level::Verbose);
    }
    assert_eq!(logbook.levels()[DEFAULT], Level::Fatal);
    assert_eq!(logbook.levels().len(), 1);
}

#[test]
fn messages_are_gated_by_the_tee() {
    for level in Level::ALL {
        let (logbook, captures) = capture_tee(1);
        logbook.set_level(DEFAULT, level).unwrap();
        log_every_level(logbook.join("svc").as_ref());

        let expected = Level::ALL
            .into_iter()
            .rev()
            .filter(|l| level.enables(*l))
            .map(|l| l.as_str().to_ascii_lowercase())
            .collect::<Vec<_>>();
        assert_eq!(captures[0].messages(), expected, "tee at {level}");
    }
}

#[test]
fn fatal_is_always_delivered() {
    let (logbook, captures) = capture_tee(3);
    let logger = logbook.join("svc");
    logger.panic("dropped");
    logger.fatal("going down");

    for capture in &captures {
        let entries = capture.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Fatal);
        assert_eq!(entries[0].logger, "svc");
        assert_eq!(entries[0].message.as_deref(), Some("going down"));
    }
}

#[test]
fn suppressed_events_are_never_built() {
    let (logbook, captures) = capture_tee(2);
    logbook.set_level(DEFAULT, Level::Warning).unwrap();
    let logger = logbook.join("svc");

    let built = Cell::new(0);
    logger.event(Level::Info, &|e| {
        built.set(built.get() + 1);
        e.string("msg", "dropped");
    });
    assert_eq!(built.get(), 0);

    logger.event(Level::Error, &|e| {
        built.set(built.get() + 1);
        e.string("user", "alice");
        e.int("attempt", 3);
        e.bool("locked", true);
    });
    // once per backend
    assert_eq!(built.get(), 2);

    for capture in &captures {
        let entries = capture.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::Error);
        assert_eq!(entries[0].message, None);
        let fields = &entries[0].fields;
        assert_eq!(fields.get("user"), Some(&FieldValue::Str("alice".to_owned())));
        assert_eq!(fields.get("attempt"), Some(&FieldValue::Int(3)));
        assert_eq!(fields.get("locked"), Some(&FieldValue::Bool(true)));
    }
}

#[test]
fn events_are_gated_by_the_tee() {
    for threshold in Level::ALL {
        let (logbook, captures) = capture_tee(2);
        logbook.set_level(DEFAULT, threshold).unwrap();
        let logger = logbook.join("svc");

        for level in Level::ALL {
            let built = Cell::new(0);
            logger.event(level, &|e| {
                built.set(built.get() + 1);
                e.string("level", level.as_str());
            });

            let expected = if threshold.enables(level) {
                captures.len()
            } else {
                0
            };
            assert_eq!(built.get(), expected, "event at {level}, tee at {threshold}");
        }

        let expected = Level::ALL
            .into_iter()
            .filter(|l| threshold.enables(*l))
            .collect::<Vec<_>>();
        for capture in &captures {
            let entries = capture.entries();
            let levels = entries.iter().map(|entry| entry.level).collect::<Vec<_>>();
            assert_eq!(levels, expected, "tee at {threshold}");
            for entry in &entries {
                let field = FieldValue::Str(entry.level.as_str().to_owned());
                assert_eq!(entry.fields.get("level"), Some(&field));
            }
        }
    }
}

#[test]
fn pinned_logger_passes_while_default_stays_fatal() {
    let (logbook, captures) = capture_tee(2);
    logbook.set_level("svc", Level::Info).unwrap();

    let svc = logbook.join("svc");
    let other = logbook.join("other");
    svc.info("svc up");
    svc.verbose("too chatty");
    other.info("dropped");
    other.error("dropped too");

    for capture in &captures {
        assert_eq!(capture.messages(), ["svc up"]);
    }

    let levels = logbook.levels();
    assert_eq!(levels.len(), 3);
    assert_eq!(levels[DEFAULT], Level::Fatal);
    assert_eq!(levels["svc"], Level::Info);
    assert_eq!(levels["other"], Level::Fatal);
}

#[test]
fn set_level_on_unseen_name_registers_it() {
    let (logbook, _) = capture_tee(1);
    logbook.set_level("later", Level::Warning).unwrap();

    assert_eq!(logbook.levels()["later"], Level::Warning);
    let logger = logbook.join("later");
    assert_eq!(logger.level(), Level::Warning);

    // the level is pinned from the start
    logbook.set_level(DEFAULT, Level::Verbose).unwrap();
    assert_eq!(logger.level(), Level::Warning);
}

#[test]
fn default_changes_reach_loggers_that_follow_it() {
    let (logbook, captures) = capture_tee(1);
    let logger = logbook.join("svc");
    logger.info("dropped");

    logbook.set_level(DEFAULT, Level::Info).unwrap();
    assert_eq!(logger.level(), Level::Info);
    logger.info("kept");

    logbook.set_level(DEFAULT, Level::Error).unwrap();
    logger.info("dropped again");

    assert_eq!(captures[0].messages(), ["kept"]);
}

#[test]
fn levels_is_a_snapshot() {
    let (logbook, _) = capture_tee(1);
    let mut levels = logbook.levels();
    levels.insert("ghost".to_owned(), Level::Verbose);
    levels.insert(DEFAULT.to_owned(), Level::Verbose);

    assert_eq!(logbook.levels(), Levels::from([(DEFAULT.to_owned(), Level::Fatal)]));
}

#[test]
fn joiner_hands_out_the_tee_loggers() {
    let (logbook, captures) = capture_tee(1);
    logbook.set_level(DEFAULT, Level::Info).unwrap();

    let joiner: &dyn Joiner = logbook.joiner();
    joiner.join("svc").info("through the joiner");
    logbook.join("svc").verbose("dropped");

    assert_eq!(captures[0].messages(), ["through the joiner"]);
    assert_eq!(logbook.levels().len(), 2);
}

#[test]
fn tees_nest() {
    let capture = Arc::new(CaptureLogbook::default());
    let inner = Arc::new(TeeLogbook::new([capture.clone() as Arc<dyn Logbook>]).unwrap());
    let outer = TeeLogbook::new([inner.clone() as Arc<dyn Logbook>]).unwrap();

    // the outer tee opened the inner one up
    assert_eq!(inner.default_level(), Level::Verbose);
    assert_eq!(capture.levels()[DEFAULT], Level::Verbose);

    outer.set_level(DEFAULT, Level::Warning).unwrap();
    let logger = outer.join("svc");
    logger.info("dropped");
    logger.warning("kept");
    logger.event(Level::Error, &|e| e.int("code", 7));

    let entries = capture.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message.as_deref(), Some("kept"));
    assert_eq!(entries[1].fields.get("code"), Some(&FieldValue::Int(7)));
    assert!(inner.levels().contains_key("svc"));
}

#[test]
fn builder_applies_directives_after_default_level() {
    let capture = Arc::new(CaptureLogbook::default());
    let directives: Directives = "error,db=verbose,cache".parse().unwrap();
    let logbook = TeeLogbook::builder()
        .backend(capture.clone())
        .default_level(Level::Info)
        .directives(directives)
        .build()
        .unwrap();

    let levels = logbook.levels();
    assert_eq!(levels[DEFAULT], Level::Error);
    assert_eq!(levels["db"], Level::Verbose);
    assert_eq!(levels["cache"], Level::Verbose);

    logbook.join("db").verbose("query");
    logbook.join("http").warning("dropped");
    assert_eq!(capture.messages(), ["query"]);
}

#[test]
fn empty_tee_is_a_valid_logbook() {
    let logbook = TeeLogbook::builder().build().unwrap();
    let logger = logbook.join("svc");
    log_every_level(logger.as_ref());

    assert!(logger.backends().is_empty());
    assert_eq!(logbook.levels().len(), 2);
}

#[derive(Debug, Default)]
struct Locked {
    inner: NoopLogbook,
}

impl Logbook for Locked {
    fn set_level(&self, name: &str, _: Level) -> Result<(), Error> {
        Err(Error::new("levels are locked").with_context("logger", name))
    }

    fn levels(&self) -> Levels {
        self.inner.levels()
    }

    fn joiner(&self) -> &dyn Joiner {
        self.inner.joiner()
    }
}

#[test]
fn backend_errors_abort_construction() {
    let err = TeeLogbook::builder()
        .backend(Arc::new(NoopLogbook::default()))
        .backend(Arc::new(Locked::default()))
        .build()
        .unwrap_err();

    assert_eq!(err.message(), "levels are locked");
    assert_eq!(err.context("logger"), Some(DEFAULT));
}
