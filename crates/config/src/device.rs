// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::capped;
use crate::document;
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    resolve_mandatory, resolve_optional, FieldWarning, OnMistyped, DEFAULT_DEVICE_DESCRIPTION,
    DEFAULT_TRAFFIC_MEMORY,
};
use crate::port::{build_port_set, PortSet};
use crate::validate::{
    validate_device_address, DeviceAddress, Interface, OperationalMode, ValidationError,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// One MVB interface controller and the ports it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub description: String,
    /// Driver node, e.g. `/dev/mvbc0`.
    pub path: String,
    pub interface: Interface,
    pub address: DeviceAddress,
    pub mode: OperationalMode,
    /// Pattern for the traffic memory test; zero skips the test.
    pub traffic_memory: i64,
    pub ports: PortSet,
}

impl Device {
    pub fn memory_test_enabled(&self) -> bool {
        self.traffic_memory != 0
    }
}

/// A built device plus every failure of its default-port template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBuild {
    pub device: Device,
    pub template_errors: Vec<ConfigError>,
}

/// Builds entry `index` of `project.devices`.
///
/// Mandatory fields are resolved first (path, interface, address, mode); any
/// failure there, or in a static port, yields `Err` and no device.
pub fn build_device(
    record: &Value,
    index: usize,
    warnings: &mut Vec<FieldWarning>,
) -> ConfigResult<DeviceBuild> {
    let prefix = format!("devices[{index}]");
    let Some(record) = record.as_object() else {
        return Err(ConfigError::wrong_type(prefix, "an object"));
    };
    let field = |name: &str| format!("{prefix}.{name}");

    let path = resolve_mandatory(&field("path"), document::string(record, "path"), |s| {
        Ok::<_, ValidationError>(capped(s))
    })?;
    let interface = resolve_mandatory(
        &field("interface"),
        document::string(record, "interface"),
        str::parse::<Interface>,
    )?;
    let address = resolve_mandatory(
        &field("device_addr"),
        document::integer(record, "device_addr"),
        validate_device_address,
    )?;
    let mode = resolve_mandatory(
        &field("mode"),
        document::string(record, "mode"),
        str::parse::<OperationalMode>,
    )?;

    let description = resolve_optional(
        &field("description"),
        document::string(record, "description"),
        |s| Ok::<_, ValidationError>(capped(s)),
        DEFAULT_DEVICE_DESCRIPTION.to_string(),
        OnMistyped::UseDefault,
    )?
    .record(warnings);
    let traffic_memory = resolve_optional(
        &field("traffic_memory"),
        document::integer(record, "traffic_memory"),
        Ok::<_, ValidationError>,
        DEFAULT_TRAFFIC_MEMORY,
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    let built = build_port_set(record, mode, &prefix, warnings)?;
    info!(
        "{}: {} {} at address {}, {} static port(s)",
        path,
        interface,
        mode,
        address,
        built.port_set.ports().len()
    );
    if let Some(template) = built.port_set.default_port() {
        debug!("{}: default port template {:?}", path, template);
    }

    Ok(DeviceBuild {
        device: Device {
            description,
            path,
            interface,
            address,
            mode,
            traffic_memory,
            ports: built.port_set,
        },
        template_errors: built.template_errors,
    })
}
