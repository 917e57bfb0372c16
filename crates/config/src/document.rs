// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Typed lookups into the generic key/value tree produced by the parser.
//!
//! Keys are dotted paths (`config.default.type`) walked through nested
//! objects. A lookup distinguishes "not there" from "there but of another
//! primitive type", which is what the defaulting policy keys on.

use crate::error::{ConfigError, ConfigResult};
use serde_json::{Map, Number, Value};
use std::path::Path;

pub type Object = Map<String, Value>;

/// Result of looking up one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Raw<T> {
    Absent,
    Mistyped { expected: &'static str },
    Present(T),
}

pub fn lookup<'a>(object: &'a Object, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = object.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn typed<'a, T>(
    object: &'a Object,
    path: &str,
    expected: &'static str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Raw<T> {
    match lookup(object, path) {
        None => Raw::Absent,
        Some(value) => extract(value).map_or(Raw::Mistyped { expected }, Raw::Present),
    }
}

pub fn string<'a>(object: &'a Object, path: &str) -> Raw<&'a str> {
    typed(object, path, "a string", Value::as_str)
}

/// Numbers are truncated toward zero, saturating at the `i64` range.
pub fn integer(object: &Object, path: &str) -> Raw<i64> {
    typed(object, path, "a number", |v| match v {
        Value::Number(n) => Some(number_to_i64(n)),
        _ => None,
    })
}

pub fn array<'a>(object: &'a Object, path: &str) -> Raw<&'a [Value]> {
    typed(object, path, "an array", |v| v.as_array().map(Vec::as_slice))
}

pub fn object<'a>(object: &'a Object, path: &str) -> Raw<&'a Object> {
    typed(object, path, "an object", Value::as_object)
}

fn number_to_i64(number: &Number) -> i64 {
    number
        .as_i64()
        .unwrap_or_else(|| number.as_f64().map_or(0, |f| f as i64))
}

/// On-disk encodings accepted for project documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` select YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    pub fn parse(self, origin: &str, content: &str) -> ConfigResult<Value> {
        match self {
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::read(origin, e))
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::read(origin, e))
            }
        }
    }
}
