// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::validate::ValidationError;
use thiserror::Error;

/// Errors raised while loading a project configuration.
///
/// Every variant maps onto one of the legacy numeric codes reported by the
/// controller library (`-200`, `-201`, `-202`), see [`ConfigError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Caller input is unusable, or a fixed capacity would be exceeded.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The document could not be read, parsed, or its root is not an object.
    #[error("failed to read configuration {origin}: {reason}")]
    Read { origin: String, reason: String },

    /// A field is missing, has the wrong type, or failed its validator.
    #[error("configuration parameter '{field}' {problem}")]
    Parameter {
        field: String,
        problem: ParameterProblem,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterProblem {
    #[error("is missing")]
    Missing,
    #[error("is not {expected}")]
    WrongType { expected: &'static str },
    #[error("failed validation: {0}")]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    pub const INVALID_PARAMETER_CODE: i32 = -200;
    pub const READ_CODE: i32 = -201;
    pub const PARAMETER_CODE: i32 = -202;

    /// Legacy numeric code of this error.
    pub fn code(&self) -> i32 {
        match self {
            ConfigError::InvalidParameter(_) => Self::INVALID_PARAMETER_CODE,
            ConfigError::Read { .. } => Self::READ_CODE,
            ConfigError::Parameter { .. } => Self::PARAMETER_CODE,
        }
    }

    /// Dotted path of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Parameter { field, .. } => Some(field),
            _ => None,
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ConfigError::Parameter {
            field: field.into(),
            problem: ParameterProblem::Missing,
        }
    }

    pub(crate) fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        ConfigError::Parameter {
            field: field.into(),
            problem: ParameterProblem::WrongType { expected },
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, error: ValidationError) -> Self {
        ConfigError::Parameter {
            field: field.into(),
            problem: ParameterProblem::Invalid(error),
        }
    }

    pub(crate) fn read(origin: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::Read {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
