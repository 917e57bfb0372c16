// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Field validators for the hardware-imposed value domains.
//!
//! Every validator takes one raw scalar and either returns the typed value or a
//! [`ValidationError`]. The only exception is [`validate_poll_interval`], which
//! never fails and reports out-of-domain input through a [`PollAdvisory`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Highest addressable port/device on the bus (memory configuration mode 3).
pub const MAX_BUS_ADDRESS: u16 = 4095;
pub const MAX_FUNCTION_CODE: u8 = 15;
pub const MAX_INTERRUPT_NUMBER: u8 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{found} is not {expected}")]
pub struct ValidationError {
    pub expected: &'static str,
    pub found: String,
}

impl ValidationError {
    fn new(expected: &'static str, found: impl fmt::Display) -> Self {
        Self {
            expected,
            found: found.to_string(),
        }
    }
}

/// MVB interface electrical standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Interface {
    #[serde(rename = "ESD+")]
    EsdPlus,
    #[serde(rename = "EMD")]
    Emd,
}

impl Interface {
    pub fn as_str(self) -> &'static str {
        match self {
            Interface::EsdPlus => "ESD+",
            Interface::Emd => "EMD",
        }
    }

    /// Value understood by the driver (0 is the unsupported OGF medium).
    pub fn driver_code(self) -> u16 {
        match self {
            Interface::EsdPlus => 1,
            Interface::Emd => 2,
        }
    }
}

impl FromStr for Interface {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EMD" => Ok(Interface::Emd),
            "ESD+" => Ok(Interface::EsdPlus),
            other => Err(ValidationError::new("one of \"EMD\", \"ESD+\"", format!("{other:?}"))),
        }
    }
}

/// How a controller learns about its ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationalMode {
    /// Ports come from the static list only.
    Static,
    /// The bus sniffer creates sink ports from the default template.
    Dynamic,
    /// Static ports plus sniffer-created ports.
    Combined,
}

impl OperationalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationalMode::Static => "static",
            OperationalMode::Dynamic => "dynamic",
            OperationalMode::Combined => "combined",
        }
    }

    pub fn driver_code(self) -> u16 {
        match self {
            OperationalMode::Static => 0,
            OperationalMode::Dynamic => 1,
            OperationalMode::Combined => 2,
        }
    }

    pub fn uses_static_ports(self) -> bool {
        matches!(self, OperationalMode::Static | OperationalMode::Combined)
    }

    pub fn uses_default_port(self) -> bool {
        matches!(self, OperationalMode::Dynamic | OperationalMode::Combined)
    }
}

impl FromStr for OperationalMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(OperationalMode::Static),
            "dynamic" => Ok(OperationalMode::Dynamic),
            "combined" => Ok(OperationalMode::Combined),
            other => Err(ValidationError::new(
                "one of \"static\", \"dynamic\", \"combined\"",
                format!("{other:?}"),
            )),
        }
    }
}

/// Port data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum PortType {
    /// Process data, F-code 0..4.
    #[default]
    #[serde(rename = "la")]
    ProcessData,
    /// Device status, F-code 15.
    #[serde(rename = "da")]
    DeviceStatus,
    /// Message data: F-code 8/12/14/15 device address, 9 parameters,
    /// 13 device group address.
    #[serde(rename = "pp")]
    MessageData,
}

impl PortType {
    pub fn as_str(self) -> &'static str {
        match self {
            PortType::ProcessData => "la",
            PortType::DeviceStatus => "da",
            PortType::MessageData => "pp",
        }
    }

    pub fn driver_code(self) -> u16 {
        match self {
            PortType::ProcessData => 0,
            PortType::DeviceStatus => 1,
            PortType::MessageData => 2,
        }
    }
}

impl FromStr for PortType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "la" => Ok(PortType::ProcessData),
            "da" => Ok(PortType::DeviceStatus),
            "pp" => Ok(PortType::MessageData),
            other => Err(ValidationError::new(
                "one of \"la\", \"da\", \"pp\"",
                format!("{other:?}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Receives data.
    #[default]
    Sink,
    /// Transmits data. Accepted here, not yet handled by the driver.
    Source,
}

impl PortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            PortDirection::Sink => "sink",
            PortDirection::Source => "source",
        }
    }
}

impl FromStr for PortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(PortDirection::Source),
            "sink" => Ok(PortDirection::Sink),
            other => Err(ValidationError::new(
                "one of \"sink\", \"source\"",
                format!("{other:?}"),
            )),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(Interface, OperationalMode, PortType, PortDirection);

macro_rules! impl_scalar_newtype {
    ($($ty:ident($inner:ty)),*) => {
        $(impl $ty {
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceAddress(u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PortAddress(u16);

/// 4-bit F-code selecting the semantic category of a port transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FunctionCode(u8);

/// Discrete interrupt line DTI1..DTI7, or 0 for polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct InterruptNumber(u8);

/// Port status poll interval in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PollInterval(u16);

impl_scalar_newtype!(
    DeviceAddress(u16),
    PortAddress(u16),
    FunctionCode(u8),
    InterruptNumber(u8),
    PollInterval(u16)
);

impl InterruptNumber {
    pub const NONE: InterruptNumber = InterruptNumber(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl PollInterval {
    pub const DEFAULT: PollInterval = PollInterval(16);

    /// Intervals accepted without comment.
    pub const RECOMMENDED: [u16; 7] = [16, 32, 64, 128, 256, 512, 1024];

    /// Intervals accepted with a resource warning.
    pub const RESOURCE_HEAVY: [u16; 4] = [1, 2, 4, 8];
}

impl Default for PollInterval {
    fn default() -> Self {
        PollInterval::DEFAULT
    }
}

fn in_bus_range(raw: i64) -> Option<u16> {
    (1..=i64::from(MAX_BUS_ADDRESS))
        .contains(&raw)
        .then_some(raw as u16)
}

pub fn validate_device_address(raw: i64) -> Result<DeviceAddress, ValidationError> {
    in_bus_range(raw)
        .map(DeviceAddress)
        .ok_or_else(|| ValidationError::new("a device address in 1..=4095", raw))
}

pub fn validate_port_address(raw: i64) -> Result<PortAddress, ValidationError> {
    in_bus_range(raw)
        .map(PortAddress)
        .ok_or_else(|| ValidationError::new("a port address in 1..=4095", raw))
}

pub fn validate_function_code(raw: i64) -> Result<FunctionCode, ValidationError> {
    if (0..=i64::from(MAX_FUNCTION_CODE)).contains(&raw) {
        Ok(FunctionCode(raw as u8))
    } else {
        Err(ValidationError::new("a function code in 0..=15", raw))
    }
}

pub fn validate_interrupt_number(raw: i64) -> Result<InterruptNumber, ValidationError> {
    if (0..=i64::from(MAX_INTERRUPT_NUMBER)).contains(&raw) {
        Ok(InterruptNumber(raw as u8))
    } else {
        Err(ValidationError::new("an interrupt number in 0..=7", raw))
    }
}

pub fn validate_numeric_data(raw: i64) -> Result<bool, ValidationError> {
    match raw {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ValidationError::new("0 or 1", other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollAdvisory {
    /// 1, 2, 4 or 8 ms: legal but consumes a lot of bus bandwidth.
    ResourceHeavy,
    /// Outside the legal set; the default interval was used instead.
    ReplacedByDefault { requested: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCheck {
    pub interval: PollInterval,
    pub advisory: Option<PollAdvisory>,
}

pub fn validate_poll_interval(raw: i64) -> PollCheck {
    let as_u16 = u16::try_from(raw).ok();
    match as_u16 {
        Some(ms) if PollInterval::RECOMMENDED.contains(&ms) => PollCheck {
            interval: PollInterval(ms),
            advisory: None,
        },
        Some(ms) if PollInterval::RESOURCE_HEAVY.contains(&ms) => PollCheck {
            interval: PollInterval(ms),
            advisory: Some(PollAdvisory::ResourceHeavy),
        },
        _ => PollCheck {
            interval: PollInterval::DEFAULT,
            advisory: Some(PollAdvisory::ReplacedByDefault { requested: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerations_are_case_sensitive() {
        assert_eq!("EMD".parse::<Interface>(), Ok(Interface::Emd));
        assert_eq!("ESD+".parse::<Interface>(), Ok(Interface::EsdPlus));
        assert!("emd".parse::<Interface>().is_err());
        assert!("ESD".parse::<Interface>().is_err());

        assert_eq!("combined".parse::<OperationalMode>(), Ok(OperationalMode::Combined));
        assert!("Static".parse::<OperationalMode>().is_err());

        assert_eq!("pp".parse::<PortType>(), Ok(PortType::MessageData));
        assert!("LA".parse::<PortType>().is_err());

        assert_eq!("source".parse::<PortDirection>(), Ok(PortDirection::Source));
        assert!("".parse::<PortDirection>().is_err());
    }

    #[test]
    fn test_address_boundaries() {
        assert!(validate_device_address(0).is_err());
        assert_eq!(validate_device_address(1).unwrap().get(), 1);
        assert_eq!(validate_device_address(4095).unwrap().get(), 4095);
        assert!(validate_device_address(4096).is_err());
        assert!(validate_port_address(-1).is_err());
        assert_eq!(validate_port_address(4095).unwrap().get(), 4095);
    }

    #[test]
    fn test_function_code_and_irq_boundaries() {
        assert_eq!(validate_function_code(0).unwrap().get(), 0);
        assert_eq!(validate_function_code(15).unwrap().get(), 15);
        assert!(validate_function_code(16).is_err());
        assert!(validate_interrupt_number(8).is_err());
        assert!(validate_interrupt_number(7).is_ok());
        assert!(validate_interrupt_number(0).unwrap().is_none());
    }

    #[test]
    fn test_numeric_data_flag() {
        assert_eq!(validate_numeric_data(0), Ok(false));
        assert_eq!(validate_numeric_data(1), Ok(true));
        assert!(validate_numeric_data(2).is_err());
    }

    #[test]
    fn test_poll_interval_advisories() {
        let check = validate_poll_interval(64);
        assert_eq!(check.interval.get(), 64);
        assert_eq!(check.advisory, None);

        let check = validate_poll_interval(4);
        assert_eq!(check.interval.get(), 4);
        assert_eq!(check.advisory, Some(PollAdvisory::ResourceHeavy));

        let check = validate_poll_interval(100);
        assert_eq!(check.interval, PollInterval::DEFAULT);
        assert_eq!(
            check.advisory,
            Some(PollAdvisory::ReplacedByDefault { requested: 100 })
        );
    }

    #[test]
    fn test_validation_error_message() {
        let err = validate_function_code(42).unwrap_err();
        assert_eq!(err.to_string(), "42 is not a function code in 0..=15");
        let err = "fast".parse::<PortType>().unwrap_err();
        assert_eq!(err.found, "\"fast\"");
    }
}
