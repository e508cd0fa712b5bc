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

//! Structured events.

use std::fmt;

/// A builder for a structured log event.
///
/// Handed to the callback of [`Logger::event`](crate::Logger::event), which is only invoked when
/// the event's level passes the logger's filter.
pub trait Event {
    /// Add a string field.
    fn string(&mut self, key: &str, value: &str);

    /// Add an integer field.
    fn int(&mut self, key: &str, value: i64);

    /// Add a boolean field.
    fn bool(&mut self, key: &str, value: bool);

    /// Add an error field, rendered with its `Display` implementation.
    fn error(&mut self, key: &str, err: &dyn std::error::Error) {
        self.string(key, &err.to_string());
    }
}

/// The value of a single event field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string value.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// An [`Event`] that collects its fields in insertion order.
///
/// Backends use it to materialize an event before rendering it.
///
/// # Examples
///
/// ```
/// use logforth_tee::FieldValue;
/// use logforth_tee::Fields;
///
/// let fields = Fields::collect(&|e| {
///     e.string("user", "alice");
///     e.int("attempt", 3);
/// });
/// assert_eq!(fields.get("attempt"), Some(&FieldValue::Int(3)));
/// assert_eq!(fields.to_string(), "user=alice attempt=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    pairs: Vec<(String, FieldValue)>,
}

impl Fields {
    /// Run `build` against an empty set of fields and return the result.
    pub fn collect(build: &dyn Fn(&mut dyn Event)) -> Fields {
        let mut fields = Fields::default();
        build(&mut fields);
        fields
    }

    /// The value of the first field named `key`.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of fields.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no field has been added.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn push(&mut self, key: &str, value: FieldValue) {
        self.pairs.push((key.to_owned(), value));
    }
}

impl Event for Fields {
    fn string(&mut self, key: &str, value: &str) {
        self.push(key, FieldValue::Str(value.to_owned()));
    }

    fn int(&mut self, key: &str, value: i64) {
        self.push(key, FieldValue::Int(value));
    }

    fn bool(&mut self, key: &str, value: bool) {
        self.push(key, FieldValue::Bool(value));
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_keeps_insertion_order() {
        let fields = Fields::collect(&|e| {
            e.string("msg", "hello");
            e.bool("cached", false);
            e.error("cause", &std::io::Error::other("disk full"));
        });

        let keys = fields.iter().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, ["msg", "cached", "cause"]);
        assert_eq!(fields.len(), 3);
        assert_eq!(
            fields.get("cause"),
            Some(&FieldValue::Str("disk full".to_owned()))
        );
        assert_eq!(fields.to_string(), "msg=hello cached=false cause=disk full");
    }

    #[test]
    fn empty_fields_render_nothing() {
        let fields = Fields::collect(&|_| {});
        assert!(fields.is_empty());
        assert_eq!(fields.to_string(), "");
    }
}
