// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::registers::{DeviceSetup, PortSetup, ResetConfig};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Prefix every controller node must carry.
pub const DEVICE_PATH_PREFIX: &str = "/dev";
/// Node addressed when no device is named.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/mvbc0";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("'{0}' is not a device node (expected a path under /dev)")]
    InvalidDevicePath(String),
    #[error("driver rejected {command} on {device}: {reason}")]
    Rejected {
        device: String,
        command: Command,
        reason: String,
    },
    #[error("traffic memory test failed on {0}")]
    MemoryTest(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Control commands understood by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Shutdown,
    Reset,
    SetDeviceConfiguration,
    SetPortConfiguration,
    Run,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Shutdown => "shutdown",
            Command::Reset => "reset",
            Command::SetDeviceConfiguration => "set-device-configuration",
            Command::SetPortConfiguration => "set-port-configuration",
            Command::Run => "run",
        };
        f.write_str(name)
    }
}

pub fn check_device_path(device: &str) -> GatewayResult<()> {
    if device.starts_with(DEVICE_PATH_PREFIX) {
        Ok(())
    } else {
        Err(GatewayError::InvalidDevicePath(device.to_string()))
    }
}

/// Control channel to the kernel driver of one or more controllers.
pub trait ControllerGateway {
    fn shutdown(&mut self, device: &str) -> GatewayResult<()>;
    fn reset(&mut self, device: &str, config: &ResetConfig) -> GatewayResult<()>;
    fn set_device_configuration(&mut self, device: &str, setup: &DeviceSetup)
        -> GatewayResult<()>;
    fn set_port_configuration(&mut self, device: &str, setup: &PortSetup) -> GatewayResult<()>;
    fn run(&mut self, device: &str) -> GatewayResult<()>;

    /// Firmware version of the controller's programmable logic.
    fn firmware_version(&self) -> GatewayResult<u32> {
        Ok(1)
    }
}

/// One call received by a [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GatewayCall {
    Shutdown { device: String },
    Reset { device: String, config: ResetConfig },
    SetDeviceConfiguration { device: String, setup: DeviceSetup },
    SetPortConfiguration { device: String, setup: PortSetup },
    Run { device: String },
}

impl GatewayCall {
    pub fn command(&self) -> Command {
        match self {
            GatewayCall::Shutdown { .. } => Command::Shutdown,
            GatewayCall::Reset { .. } => Command::Reset,
            GatewayCall::SetDeviceConfiguration { .. } => Command::SetDeviceConfiguration,
            GatewayCall::SetPortConfiguration { .. } => Command::SetPortConfiguration,
            GatewayCall::Run { .. } => Command::Run,
        }
    }

    pub fn device(&self) -> &str {
        match self {
            GatewayCall::Shutdown { device }
            | GatewayCall::Reset { device, .. }
            | GatewayCall::SetDeviceConfiguration { device, .. }
            | GatewayCall::SetPortConfiguration { device, .. }
            | GatewayCall::Run { device } => device,
        }
    }
}

/// Gateway that validates and records every call instead of reaching a driver.
///
/// A failure can be injected for one command, optionally on one device.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Vec<GatewayCall>,
    fail_on: Option<(Command, Option<String>)>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(command: Command, device: Option<&str>) -> Self {
        Self {
            calls: Vec::new(),
            fail_on: Some((command, device.map(str::to_string))),
        }
    }

    pub fn calls(&self) -> &[GatewayCall] {
        &self.calls
    }

    /// Recorded calls as JSON, for reports.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.calls).unwrap_or(serde_json::Value::Null)
    }

    fn submit(&mut self, call: GatewayCall) -> GatewayResult<()> {
        let command = call.command();
        let device = call.device().to_string();
        check_device_path(&device)?;

        if let Some((failing, only_on)) = &self.fail_on {
            if *failing == command && only_on.as_deref().map_or(true, |d| d == device) {
                return Err(GatewayError::Rejected {
                    device,
                    command,
                    reason: "injected failure".into(),
                });
            }
        }

        match &call {
            GatewayCall::Shutdown { .. } | GatewayCall::Run { .. } => {
                info!("{}: {}", device, command)
            }
            _ => debug!("{}: {} {:?}", device, command, call),
        }
        self.calls.push(call);
        Ok(())
    }
}

impl ControllerGateway for RecordingGateway {
    fn shutdown(&mut self, device: &str) -> GatewayResult<()> {
        self.submit(GatewayCall::Shutdown {
            device: device.to_string(),
        })
    }

    fn reset(&mut self, device: &str, config: &ResetConfig) -> GatewayResult<()> {
        self.submit(GatewayCall::Reset {
            device: device.to_string(),
            config: config.clone(),
        })
    }

    fn set_device_configuration(
        &mut self,
        device: &str,
        setup: &DeviceSetup,
    ) -> GatewayResult<()> {
        self.submit(GatewayCall::SetDeviceConfiguration {
            device: device.to_string(),
            setup: setup.clone(),
        })
    }

    fn set_port_configuration(&mut self, device: &str, setup: &PortSetup) -> GatewayResult<()> {
        self.submit(GatewayCall::SetPortConfiguration {
            device: device.to_string(),
            setup: setup.clone(),
        })
    }

    fn run(&mut self, device: &str) -> GatewayResult<()> {
        self.submit(GatewayCall::Run {
            device: device.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_path_must_be_under_dev() {
        assert!(check_device_path("/dev/mvbc0").is_ok());
        assert_eq!(
            check_device_path("mvbc0"),
            Err(GatewayError::InvalidDevicePath("mvbc0".into()))
        );
    }

    #[test]
    fn test_shutdown_is_recorded() {
        let mut gateway = RecordingGateway::new();
        gateway.shutdown(DEFAULT_DEVICE_PATH).unwrap();
        assert_eq!(gateway.calls().len(), 1);
        assert_eq!(gateway.calls()[0].command(), Command::Shutdown);
        assert_eq!(gateway.snapshot()[0]["command"], "shutdown");
    }

    #[test]
    fn test_invalid_path_is_not_recorded() {
        let mut gateway = RecordingGateway::new();
        assert!(gateway.run("/tmp/mvbc0").is_err());
        assert!(gateway.calls().is_empty());
    }

    #[test]
    fn test_injected_failure_targets_one_device() {
        let mut gateway = RecordingGateway::failing_on(Command::Run, Some("/dev/mvbc1"));
        assert!(gateway.run("/dev/mvbc0").is_ok());
        let err = gateway.run("/dev/mvbc1").unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { command: Command::Run, .. }));
    }

    #[test]
    fn test_default_firmware_version() {
        assert_eq!(RecordingGateway::new().firmware_version(), Ok(1));
    }
}
