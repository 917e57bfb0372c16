// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Per-device bring-up: shutdown, reset, device configuration, one port
//! configuration per static port, run.

use crate::gateway::{ControllerGateway, GatewayError};
use crate::registers::{DeviceSetup, PortSetup, ResetConfig};
use crate::status::InitStatus;
use mvbc_config::{Device, Project};
use serde::Serialize;
use std::fmt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Shutdown,
    Reset,
    SetDeviceConfig,
    SetPortConfig { port: usize, address: u16 },
    Run,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Shutdown => f.write_str("shutdown"),
            Step::Reset => f.write_str("reset"),
            Step::SetDeviceConfig => f.write_str("device configuration"),
            Step::SetPortConfig { port, address } => {
                write!(f, "configuration of port #{port} (address {address})")
            }
            Step::Run => f.write_str("run"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{device}: {step} failed: {source}")]
pub struct BringUpError {
    pub device: String,
    pub step: Step,
    #[source]
    pub source: GatewayError,
}

impl BringUpError {
    /// Stage flag reported for this failure.
    ///
    /// The driver stops a controller before resetting it, so a failed
    /// shutdown counts as a reset failure.
    pub fn status(&self) -> InitStatus {
        match (&self.step, &self.source) {
            (_, GatewayError::MemoryTest(_)) => InitStatus::TEST_TRAFFIC_MEMORY,
            (Step::Shutdown | Step::Reset, _) => InitStatus::RESET,
            (Step::SetDeviceConfig, _) => InitStatus::SET_DEVICE_CONFIG,
            (Step::SetPortConfig { .. }, _) => InitStatus::SET_PORT_CONFIG,
            (Step::Run, _) => InitStatus::RUN,
        }
    }
}

/// Brings up every device of `project` in document order.
///
/// Stops at the first failing step; devices before it are left running.
pub fn bring_up<G>(project: &Project, gateway: &mut G) -> Result<(), BringUpError>
where
    G: ControllerGateway + ?Sized,
{
    for device in project.devices() {
        bring_up_device(device, gateway).map_err(|err| {
            error!("{}", err);
            err
        })?;
    }
    Ok(())
}

pub fn bring_up_device<G>(device: &Device, gateway: &mut G) -> Result<(), BringUpError>
where
    G: ControllerGateway + ?Sized,
{
    let path = device.path.as_str();
    let fail = |step: Step| {
        move |source: GatewayError| BringUpError {
            device: path.to_string(),
            step,
            source,
        }
    };

    info!("{}: bring-up ({}, {})", path, device.interface, device.mode);
    gateway.shutdown(path).map_err(fail(Step::Shutdown))?;

    if device.memory_test_enabled() {
        info!("{}: traffic memory test requested", path);
    }
    gateway
        .reset(path, &ResetConfig::for_device(device))
        .map_err(fail(Step::Reset))?;
    gateway
        .set_device_configuration(path, &DeviceSetup::for_device(device))
        .map_err(fail(Step::SetDeviceConfig))?;

    for (index, port) in device.ports.ports().iter().enumerate() {
        let step = Step::SetPortConfig {
            port: index,
            address: port.address.get(),
        };
        gateway
            .set_port_configuration(path, &PortSetup::for_port(port))
            .map_err(fail(step))?;
    }

    gateway.run(path).map_err(fail(Step::Run))?;
    info!("{}: running", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{Command, GatewayCall, GatewayResult, RecordingGateway};
    use mvbc_config::{parse_project, DocumentFormat};

    const DOC: &str = r#"{"project": {"devices": [
        {"path": "/dev/mvbc0", "interface": "EMD", "device_addr": 1, "mode": "static",
         "traffic_memory": 7,
         "config": {"static": [{"addr": 10, "fcode": 1}, {"addr": 11, "fcode": 2}]}},
        {"path": "/dev/mvbc1", "interface": "ESD+", "device_addr": 2, "mode": "dynamic"}
    ]}}"#;

    fn project() -> Project {
        parse_project("inline", DOC, DocumentFormat::Json)
            .unwrap()
            .into_project()
            .unwrap()
    }

    #[test]
    fn test_sequence_order() {
        let mut gateway = RecordingGateway::new();
        bring_up(&project(), &mut gateway).unwrap();

        let commands: Vec<_> = gateway
            .calls()
            .iter()
            .map(|c| (c.device(), c.command()))
            .collect();
        assert_eq!(
            commands,
            vec![
                ("/dev/mvbc0", Command::Shutdown),
                ("/dev/mvbc0", Command::Reset),
                ("/dev/mvbc0", Command::SetDeviceConfiguration),
                ("/dev/mvbc0", Command::SetPortConfiguration),
                ("/dev/mvbc0", Command::SetPortConfiguration),
                ("/dev/mvbc0", Command::Run),
                ("/dev/mvbc1", Command::Shutdown),
                ("/dev/mvbc1", Command::Reset),
                ("/dev/mvbc1", Command::SetDeviceConfiguration),
                ("/dev/mvbc1", Command::Run),
            ]
        );
    }

    #[test]
    fn test_first_failure_stops_sequence() {
        let mut gateway = RecordingGateway::failing_on(Command::SetPortConfiguration, None);
        let err = bring_up(&project(), &mut gateway).unwrap_err();
        assert_eq!(err.device, "/dev/mvbc0");
        assert_eq!(err.step, Step::SetPortConfig { port: 0, address: 10 });
        assert_eq!(err.status(), InitStatus::SET_PORT_CONFIG);
        assert_eq!(gateway.calls().len(), 3);
    }

    #[test]
    fn test_failure_on_second_device_keeps_first_running() {
        let mut gateway = RecordingGateway::failing_on(Command::Run, Some("/dev/mvbc1"));
        let err = bring_up(&project(), &mut gateway).unwrap_err();
        assert_eq!(err.status(), InitStatus::RUN);
        assert!(gateway
            .calls()
            .iter()
            .any(|c| matches!(c, GatewayCall::Run { device } if device == "/dev/mvbc0")));
    }

    #[test]
    fn test_shutdown_failure_reports_reset() {
        let mut gateway = RecordingGateway::failing_on(Command::Shutdown, None);
        let err = bring_up(&project(), &mut gateway).unwrap_err();
        assert_eq!(err.status(), InitStatus::RESET);
        assert!(gateway.calls().is_empty());
    }

    struct FailingMemoryTest;

    impl ControllerGateway for FailingMemoryTest {
        fn shutdown(&mut self, _device: &str) -> GatewayResult<()> {
            Ok(())
        }
        fn reset(&mut self, device: &str, config: &ResetConfig) -> GatewayResult<()> {
            if config.test_traffic_memory != 0 {
                return Err(GatewayError::MemoryTest(device.to_string()));
            }
            Ok(())
        }
        fn set_device_configuration(&mut self, _: &str, _: &DeviceSetup) -> GatewayResult<()> {
            Ok(())
        }
        fn set_port_configuration(&mut self, _: &str, _: &PortSetup) -> GatewayResult<()> {
            Ok(())
        }
        fn run(&mut self, _device: &str) -> GatewayResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_memory_test_failure_has_its_own_flag() {
        let err = bring_up(&project(), &mut FailingMemoryTest).unwrap_err();
        assert_eq!(err.step, Step::Reset);
        assert_eq!(err.status(), InitStatus::TEST_TRAFFIC_MEMORY);
    }
}
