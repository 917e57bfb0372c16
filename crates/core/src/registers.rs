// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Payloads handed to the driver for reset, device and port configuration.

use crate::pcs::{pack_port, PackedPort};
use bitflags::bitflags;
use mvbc_config::{DefaultPortTemplate, Device, Port};
use serde::{Serialize, Serializer};

bitflags! {
    /// Status control register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Scr: u16 {
        /// Initialization level 01: configuration mode.
        const IL_CONFIG = 1 << 0;
        const WS0 = 1 << 8;
        const WS1 = 1 << 9;
        /// Timeout coefficient 01: 42.7 us.
        const TMO0 = 1 << 10;
        const TMO1 = 1 << 11;
        /// Read-only mode, the controller does not drive the bus.
        const QUIET = 1 << 14;
    }
}

bitflags! {
    /// Memory configuration register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mcr: u16 {
        const MCM0 = 1 << 0;
        const MCM1 = 1 << 1;
        /// Memory configuration mode 3: 4096 ports.
        const MCM_4096_PORTS = Self::MCM0.bits() | Self::MCM1.bits();
    }
}

// Reports carry the raw register words the driver receives.
impl Serialize for Scr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.bits())
    }
}

impl Serialize for Mcr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.bits())
    }
}

impl Scr {
    /// Quiet, 42.7 us timeout, no wait states, configuration mode.
    pub fn at_reset() -> Self {
        Scr::QUIET | Scr::TMO0 | Scr::IL_CONFIG
    }
}

/// Payload of the reset call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetConfig {
    pub scr: Scr,
    pub mcr: Mcr,
    pub operation_mode: u16,
    /// Pattern for the traffic memory test, zero disables it.
    pub test_traffic_memory: i64,
    pub default_port: Option<DefaultPortTemplate>,
}

impl ResetConfig {
    pub fn for_device(device: &Device) -> Self {
        Self {
            scr: Scr::at_reset(),
            mcr: Mcr::MCM_4096_PORTS,
            operation_mode: device.mode.driver_code(),
            test_traffic_memory: device.traffic_memory,
            default_port: device.ports.default_port().copied(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Line {
    A,
    B,
    AB,
}

/// Sink time supervision interval code 6: 32 ms.
pub const SINK_TIME_INTERVAL_32MS: u8 = 6;
/// Supervise every port.
pub const SINK_TIME_ALL_DOCKS: u16 = 0xFFF;

/// Payload of the set-device-configuration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSetup {
    pub line: Line,
    pub address: u16,
    pub interface: u16,
    pub sink_time_interval: u8,
    pub sink_time_docks: u16,
}

impl DeviceSetup {
    pub fn for_device(device: &Device) -> Self {
        Self {
            line: Line::AB,
            address: device.address.get(),
            interface: device.interface.driver_code(),
            sink_time_interval: SINK_TIME_INTERVAL_32MS,
            sink_time_docks: SINK_TIME_ALL_DOCKS,
        }
    }
}

/// Payload of the set-port-configuration call for one static port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortSetup {
    pub static_conf: bool,
    pub address: u16,
    pub function_code: u8,
    pub port_type: u16,
    #[serde(flatten)]
    pub packed: PackedPort,
}

impl PortSetup {
    pub fn for_port(port: &Port) -> Self {
        Self {
            static_conf: true,
            address: port.address.get(),
            function_code: port.function_code.get(),
            port_type: port.port_type.driver_code(),
            packed: pack_port(port),
        }
    }
}
