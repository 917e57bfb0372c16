// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Defaulting policy for mandatory and optional fields.
//!
//! * mandatory field: absent or mistyped is an error, a validator failure is an error.
//! * optional field: absent or mistyped falls back to the named default (with a
//!   warning), a validator failure is an error.
//! * poll interval: its validator never fails, so the field always resolves.

use crate::document::Raw;
use crate::error::{ConfigError, ConfigResult};
use crate::validate::{
    InterruptNumber, PollAdvisory, PollCheck, PollInterval, PortDirection, PortType,
    ValidationError,
};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

pub const DEFAULT_PROJECT_NAME: &str = "n/a";
pub const DEFAULT_PROJECT_VERSION: &str = "n/a";
pub const DEFAULT_DEVICE_DESCRIPTION: &str = "n/a";
pub const DEFAULT_TRAFFIC_MEMORY: i64 = 0;
pub const DEFAULT_PORT_NAME: &str = "n/a";
pub const DEFAULT_PORT_TYPE: PortType = PortType::ProcessData;
pub const DEFAULT_PORT_DIRECTION: PortDirection = PortDirection::Sink;
pub const DEFAULT_POLL_INTERVAL: PollInterval = PollInterval::DEFAULT;
pub const DEFAULT_IRQ: InterruptNumber = InterruptNumber::NONE;
pub const DEFAULT_NUMERIC_DATA: bool = false;

/// Non-fatal finding attached to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    pub field: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WarningKind {
    DefaultSubstituted { default: String },
    WrongTypeDefaulted { expected: &'static str, default: String },
    PollResourceHeavy { interval_ms: u16 },
    PollReplaced { requested: i64, default_ms: u16 },
    SourceUnsupported,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::DefaultSubstituted { default } => {
                write!(f, "'{}' not set, using default [{}]", self.field, default)
            }
            WarningKind::WrongTypeDefaulted { expected, default } => write!(
                f,
                "'{}' is not {}, using default [{}]",
                self.field, expected, default
            ),
            WarningKind::PollResourceHeavy { interval_ms } => write!(
                f,
                "'{}' is {} ms; recommended values are 16/32/64/128/256/512/1024 ms",
                self.field, interval_ms
            ),
            WarningKind::PollReplaced {
                requested,
                default_ms,
            } => write!(
                f,
                "'{}' value {} is not supported, using default {} ms",
                self.field, requested, default_ms
            ),
            WarningKind::SourceUnsupported => write!(
                f,
                "'{}' is source; source ports are not yet handled by the driver",
                self.field
            ),
        }
    }
}

impl FieldWarning {
    pub fn new(field: impl Into<String>, kind: WarningKind) -> Self {
        let warning = Self {
            field: field.into(),
            kind,
        };
        warn!("{}", warning);
        warning
    }
}

/// What an optional field does when present with the wrong primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMistyped {
    UseDefault,
    Reject,
}

/// A resolved field value plus the warning produced while resolving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub warning: Option<FieldWarning>,
}

impl<T> Resolved<T> {
    /// Moves the warning (if any) into `warnings` and returns the value.
    pub fn record(self, warnings: &mut Vec<FieldWarning>) -> T {
        warnings.extend(self.warning);
        self.value
    }
}

/// Output of a field validator, normalised to value plus optional advisory.
pub trait Checked<T> {
    fn into_checked(self) -> Result<(T, Option<WarningKind>), ValidationError>;
}

impl<T> Checked<T> for Result<T, ValidationError> {
    fn into_checked(self) -> Result<(T, Option<WarningKind>), ValidationError> {
        self.map(|value| (value, None))
    }
}

impl Checked<PollInterval> for PollCheck {
    fn into_checked(self) -> Result<(PollInterval, Option<WarningKind>), ValidationError> {
        let advisory = self.advisory.map(|advisory| match advisory {
            PollAdvisory::ResourceHeavy => WarningKind::PollResourceHeavy {
                interval_ms: self.interval.get(),
            },
            PollAdvisory::ReplacedByDefault { requested } => WarningKind::PollReplaced {
                requested,
                default_ms: PollInterval::DEFAULT.get(),
            },
        });
        Ok((self.interval, advisory))
    }
}

pub fn resolve_mandatory<R, T>(
    field: &str,
    raw: Raw<R>,
    validate: impl FnOnce(R) -> Result<T, ValidationError>,
) -> ConfigResult<T>
where
    T: fmt::Debug,
{
    match raw {
        Raw::Absent => Err(ConfigError::missing(field)),
        Raw::Mistyped { expected } => Err(ConfigError::wrong_type(field, expected)),
        Raw::Present(raw) => {
            let value = validate(raw).map_err(|e| ConfigError::invalid(field, e))?;
            debug!("{} = {:?}", field, value);
            Ok(value)
        }
    }
}

pub fn resolve_optional<R, T, C>(
    field: &str,
    raw: Raw<R>,
    validate: impl FnOnce(R) -> C,
    default: T,
    on_mistyped: OnMistyped,
) -> ConfigResult<Resolved<T>>
where
    C: Checked<T>,
    T: fmt::Debug + fmt::Display,
{
    match raw {
        Raw::Mistyped { expected } if on_mistyped == OnMistyped::Reject => {
            Err(ConfigError::wrong_type(field, expected))
        }
        Raw::Mistyped { expected } => {
            let warning = FieldWarning::new(
                field,
                WarningKind::WrongTypeDefaulted {
                    expected,
                    default: default.to_string(),
                },
            );
            Ok(Resolved {
                value: default,
                warning: Some(warning),
            })
        }
        Raw::Absent => {
            let warning = FieldWarning::new(
                field,
                WarningKind::DefaultSubstituted {
                    default: default.to_string(),
                },
            );
            Ok(Resolved {
                value: default,
                warning: Some(warning),
            })
        }
        Raw::Present(raw) => {
            let (value, advisory) = validate(raw)
                .into_checked()
                .map_err(|e| ConfigError::invalid(field, e))?;
            debug!("{} = {:?}", field, value);
            Ok(Resolved {
                value,
                warning: advisory.map(|kind| FieldWarning::new(field, kind)),
            })
        }
    }
}
