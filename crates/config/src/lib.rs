// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Project configuration for MVB interface controllers.
//!
//! A project document lists devices (one per controller) and, per device,
//! the communication ports to set up. [`load_project`] reads the document,
//! validates every field against the controller's limits and returns a
//! [`LoadReport`] with the resulting [`Project`] and one outcome per device.

pub mod capacity;
pub mod device;
pub mod document;
pub mod error;
pub mod policy;
pub mod port;
pub mod project;
pub mod validate;

pub use capacity::{Bounded, CapacityError};
pub use device::{build_device, Device, DeviceBuild};
pub use document::DocumentFormat;
pub use error::{ConfigError, ConfigResult, ParameterProblem};
pub use policy::{FieldWarning, WarningKind};
pub use port::{DefaultPortTemplate, Port, PortSet};
pub use project::{
    build_project, default_config_path, load_project, parse_project, DeviceOutcome, LoadReport,
    Project, DEFAULT_PROJECT_CONFIG_FILE, PROJECT_CONFIG_ENV,
};
pub use validate::{
    DeviceAddress, FunctionCode, Interface, InterruptNumber, OperationalMode, PollInterval,
    PortAddress, PortDirection, PortType, ValidationError,
};

/// Controllers configurable from one project.
pub const MAX_DEVICES: usize = 8;
/// Ports addressable on one controller.
pub const MAX_PORTS: usize = 4095;
/// Size of the driver's string buffers, terminator included.
pub const MAX_STRING_LENGTH: usize = 64;

/// Truncates `s` to fit a driver string buffer.
///
/// Keeps at most `MAX_STRING_LENGTH - 1` bytes and never splits a character.
pub fn capped(s: &str) -> String {
    let limit = MAX_STRING_LENGTH - 1;
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
