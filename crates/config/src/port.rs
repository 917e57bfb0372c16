// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::capacity::Bounded;
use crate::document::{self, Object, Raw};
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    resolve_mandatory, resolve_optional, FieldWarning, OnMistyped, Resolved, WarningKind,
    DEFAULT_IRQ, DEFAULT_NUMERIC_DATA, DEFAULT_POLL_INTERVAL, DEFAULT_PORT_DIRECTION,
    DEFAULT_PORT_NAME, DEFAULT_PORT_TYPE,
};
use crate::validate::{
    validate_function_code, validate_interrupt_number, validate_numeric_data,
    validate_poll_interval, validate_port_address, FunctionCode, InterruptNumber,
    OperationalMode, PollInterval, PortAddress, PortDirection, PortType, ValidationError,
};
use crate::{capped, MAX_PORTS};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

/// One statically declared port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Port {
    pub name: String,
    pub address: PortAddress,
    pub port_type: PortType,
    pub direction: PortDirection,
    pub function_code: FunctionCode,
    pub poll_interval: PollInterval,
    pub irq: InterruptNumber,
    pub numeric_data: bool,
}

/// Settings applied to every port the bus sniffer discovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultPortTemplate {
    pub port_type: PortType,
    pub poll_interval: PollInterval,
    pub irq: InterruptNumber,
    pub numeric_data: bool,
}

impl Default for DefaultPortTemplate {
    fn default() -> Self {
        Self {
            port_type: DEFAULT_PORT_TYPE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            irq: DEFAULT_IRQ,
            numeric_data: DEFAULT_NUMERIC_DATA,
        }
    }
}

pub type PortList = Bounded<Port, MAX_PORTS>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortSet {
    ports: PortList,
    default_port: Option<DefaultPortTemplate>,
}

impl PortSet {
    pub fn new(ports: PortList, default_port: Option<DefaultPortTemplate>) -> Self {
        Self {
            ports,
            default_port,
        }
    }

    /// Static ports in document order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn default_port(&self) -> Option<&DefaultPortTemplate> {
        self.default_port.as_ref()
    }
}

/// Port set of one device plus the failures found in its default template.
///
/// Template failures do not discard the static ports; they become the
/// device's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSetBuild {
    pub port_set: PortSet,
    pub template_errors: Vec<ConfigError>,
}

/// Builds the port set of a device record according to its operational mode.
///
/// `prefix` is the dotted path of the device record, used in error messages
/// and warnings.
pub fn build_port_set(
    record: &Object,
    mode: OperationalMode,
    prefix: &str,
    warnings: &mut Vec<FieldWarning>,
) -> ConfigResult<PortSetBuild> {
    let ports = if mode.uses_static_ports() {
        build_static_ports(record, prefix, warnings)?
    } else {
        PortList::new()
    };

    let mut template_errors = Vec::new();
    let default_port = if mode.uses_default_port() {
        let (template, errors) = build_default_template(record, prefix, warnings);
        template_errors = errors;
        Some(template)
    } else {
        None
    };

    Ok(PortSetBuild {
        port_set: PortSet::new(ports, default_port),
        template_errors,
    })
}

/// Builds `config.static`, stopping at the first failing port.
pub fn build_static_ports(
    record: &Object,
    prefix: &str,
    warnings: &mut Vec<FieldWarning>,
) -> ConfigResult<PortList> {
    let list_field = format!("{prefix}.config.static");
    let entries = match document::array(record, "config.static") {
        Raw::Present(entries) => entries,
        Raw::Absent => return Err(ConfigError::missing(list_field)),
        Raw::Mistyped { expected } => return Err(ConfigError::wrong_type(list_field, expected)),
    };

    if entries.len() > MAX_PORTS {
        return Err(ConfigError::InvalidParameter(format!(
            "{list_field} declares {} ports, at most {MAX_PORTS} are addressable",
            entries.len()
        )));
    }

    let mut ports = PortList::new();
    for (i, entry) in entries.iter().enumerate() {
        let field = format!("{list_field}[{i}]");
        let port = build_port(entry, &field, warnings)?;
        debug!("{} -> addr {} fcode {}", field, port.address, port.function_code);
        ports
            .try_push(port)
            .map_err(|e| ConfigError::InvalidParameter(format!("{field}: {e}")))?;
    }
    Ok(ports)
}

/// Builds a single static port entry.
pub fn build_port(
    entry: &Value,
    prefix: &str,
    warnings: &mut Vec<FieldWarning>,
) -> ConfigResult<Port> {
    let Some(entry) = entry.as_object() else {
        return Err(ConfigError::wrong_type(prefix, "an object"));
    };
    let field = |name: &str| format!("{prefix}.{name}");

    let name = resolve_optional(
        &field("name"),
        document::string(entry, "name"),
        |s| Ok::<_, ValidationError>(capped(s)),
        DEFAULT_PORT_NAME.to_string(),
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    let address = resolve_mandatory(
        &field("addr"),
        document::integer(entry, "addr"),
        validate_port_address,
    )?;

    let port_type = resolve_optional(
        &field("type"),
        document::string(entry, "type"),
        str::parse::<PortType>,
        DEFAULT_PORT_TYPE,
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    let direction = resolve_optional(
        &field("direction"),
        document::string(entry, "direction"),
        str::parse::<PortDirection>,
        DEFAULT_PORT_DIRECTION,
        OnMistyped::UseDefault,
    )?
    .record(warnings);
    if direction == PortDirection::Source {
        warnings.push(FieldWarning::new(
            field("direction"),
            WarningKind::SourceUnsupported,
        ));
    }

    let function_code = resolve_mandatory(
        &field("fcode"),
        document::integer(entry, "fcode"),
        validate_function_code,
    )?;

    let poll_interval = resolve_optional(
        &field("poll_ms"),
        document::integer(entry, "poll_ms"),
        validate_poll_interval,
        DEFAULT_POLL_INTERVAL,
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    let irq = resolve_optional(
        &field("irq"),
        document::integer(entry, "irq"),
        validate_interrupt_number,
        DEFAULT_IRQ,
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    let numeric_data = resolve_optional(
        &field("num_data"),
        document::integer(entry, "num_data"),
        validate_numeric_data,
        DEFAULT_NUMERIC_DATA,
        OnMistyped::UseDefault,
    )?
    .record(warnings);

    Ok(Port {
        name,
        address,
        port_type,
        direction,
        function_code,
        poll_interval,
        irq,
        numeric_data,
    })
}

/// Builds `config.default`.
///
/// Every field is evaluated even after a failure; a failing field keeps its
/// default. A present value of the wrong primitive type counts as a failure
/// here, since the template has no other source to fall back on.
pub fn build_default_template(
    record: &Object,
    prefix: &str,
    warnings: &mut Vec<FieldWarning>,
) -> (DefaultPortTemplate, Vec<ConfigError>) {
    let mut template = DefaultPortTemplate::default();
    let mut errors = Vec::new();
    let field = |name: &str| format!("{prefix}.config.default.{name}");

    if let Raw::Mistyped { expected } = document::object(record, "config.default") {
        let err = ConfigError::wrong_type(format!("{prefix}.config.default"), expected);
        error!("{}", err);
        errors.push(err);
        return (template, errors);
    }

    keep(
        resolve_optional(
            &field("type"),
            document::string(record, "config.default.type"),
            str::parse::<PortType>,
            DEFAULT_PORT_TYPE,
            OnMistyped::Reject,
        ),
        &mut template.port_type,
        warnings,
        &mut errors,
    );
    keep(
        resolve_optional(
            &field("poll_ms"),
            document::integer(record, "config.default.poll_ms"),
            validate_poll_interval,
            DEFAULT_POLL_INTERVAL,
            OnMistyped::Reject,
        ),
        &mut template.poll_interval,
        warnings,
        &mut errors,
    );
    keep(
        resolve_optional(
            &field("irq"),
            document::integer(record, "config.default.irq"),
            validate_interrupt_number,
            DEFAULT_IRQ,
            OnMistyped::Reject,
        ),
        &mut template.irq,
        warnings,
        &mut errors,
    );
    keep(
        resolve_optional(
            &field("num_data"),
            document::integer(record, "config.default.num_data"),
            validate_numeric_data,
            DEFAULT_NUMERIC_DATA,
            OnMistyped::Reject,
        ),
        &mut template.numeric_data,
        warnings,
        &mut errors,
    );

    (template, errors)
}

fn keep<T>(
    result: ConfigResult<Resolved<T>>,
    slot: &mut T,
    warnings: &mut Vec<FieldWarning>,
    errors: &mut Vec<ConfigError>,
) {
    match result {
        Ok(resolved) => *slot = resolved.record(warnings),
        Err(e) => {
            error!("{}", e);
            errors.push(e);
        }
    }
}
