// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use mvbc_config::{
    load_project, parse_project, ConfigError, DocumentFormat, Interface, OperationalMode,
    PollInterval, PortDirection, PortType, WarningKind, MAX_DEVICES, MAX_PORTS,
    PROJECT_CONFIG_ENV,
};
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs/projects")
        .join(name)
}

fn static_device(path: &str, ports: Vec<Value>) -> Value {
    json!({
        "path": path,
        "interface": "EMD",
        "device_addr": 7,
        "mode": "static",
        "config": {"static": ports}
    })
}

fn document(devices: Vec<Value>) -> String {
    json!({"project": {"name": "generated", "version": "1", "devices": devices}}).to_string()
}

#[test]
fn test_example_project_loads() {
    let report = load_project(Some(&fixture("mvbc_example.json"))).unwrap();
    assert!(report.is_success(), "{:?}", report.first_error());

    let project = report.project();
    assert_eq!(project.name, "Regional train TCN");
    assert_eq!(project.version, "2.1.0");
    assert_eq!(project.devices().len(), 2);

    let traction = &project.devices()[0];
    assert_eq!(traction.interface, Interface::EsdPlus);
    assert_eq!(traction.mode, OperationalMode::Combined);
    assert!(traction.memory_test_enabled());
    let ports = traction.ports.ports();
    assert_eq!(ports.len(), 3);
    assert_eq!(ports[0].name, "door status");
    assert_eq!(ports[0].irq.get(), 3);
    assert!(ports[0].numeric_data);
    assert_eq!(ports[2].port_type, PortType::DeviceStatus);
    assert_eq!(traction.ports.default_port().unwrap().poll_interval.get(), 128);

    let sniffer = &project.devices()[1];
    assert!(sniffer.ports.ports().is_empty());
    assert_eq!(
        sniffer.ports.default_port().unwrap().port_type,
        PortType::MessageData
    );
}

#[test]
fn test_mandatory_only_document_gets_documented_defaults() {
    let report = load_project(Some(&fixture("minimal_static.json"))).unwrap();
    let project = report.into_project().unwrap();
    assert_eq!(project.name, "n/a");
    assert_eq!(project.version, "n/a");

    let device = &project.devices()[0];
    assert_eq!(device.description, "n/a");
    assert_eq!(device.traffic_memory, 0);
    assert!(device.ports.default_port().is_none());

    let port = &device.ports.ports()[0];
    assert_eq!(port.name, "n/a");
    assert_eq!(port.port_type, PortType::ProcessData);
    assert_eq!(port.direction, PortDirection::Sink);
    assert_eq!(port.poll_interval, PollInterval::DEFAULT);
    assert!(port.irq.is_none());
    assert!(!port.numeric_data);
}

#[test]
fn test_loading_twice_yields_equal_projects() {
    let first = load_project(Some(&fixture("mvbc_example.json"))).unwrap();
    let second = load_project(Some(&fixture("mvbc_example.json"))).unwrap();
    assert_eq!(first.project(), second.project());
}

#[test]
fn test_missing_devices_array_is_parameter_error() {
    let err = load_project(Some(&fixture("missing_devices.json"))).unwrap_err();
    assert_eq!(err.code(), ConfigError::PARAMETER_CODE);
    assert_eq!(err.field(), Some("project.devices"));
}

#[test]
fn test_unreadable_document_is_read_error() {
    let err = load_project(Some(&fixture("does_not_exist.json"))).unwrap_err();
    assert_eq!(err.code(), ConfigError::READ_CODE);
}

#[test]
fn test_combined_mode_keeps_static_ports_when_template_fails() {
    let report = load_project(Some(&fixture("combined_numeric_default_type.json"))).unwrap();
    assert!(!report.is_success());

    let device = &report.project().devices()[0];
    assert_eq!(device.ports.ports().len(), 2);

    let outcome = &report.outcomes()[0];
    assert_eq!(outcome.path.as_deref(), Some("/dev/mvbc0"));
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].field(), Some("devices[0].config.default.type"));
    assert_eq!(report.error_code(), ConfigError::PARAMETER_CODE);
}

#[test]
fn test_yaml_document_is_accepted() {
    let report = load_project(Some(&fixture("sniffer.yaml"))).unwrap();
    let project = report.project();
    assert_eq!(project.name, "Yard sniffer");

    let template = project.devices()[0].ports.default_port().unwrap();
    assert_eq!(template.port_type, PortType::DeviceStatus);
    assert_eq!(template.poll_interval.get(), 8);
    assert_eq!(template.irq.get(), 5);
    assert!(report.warnings().any(|w| matches!(
        w.kind,
        WarningKind::PollResourceHeavy { interval_ms: 8 }
    )));
}

#[test]
fn test_exactly_max_devices_load() {
    let devices = (0..MAX_DEVICES)
        .map(|i| static_device(&format!("/dev/mvbc{i}"), vec![json!({"addr": 1, "fcode": 1})]))
        .collect();
    let report = parse_project("generated", &document(devices), DocumentFormat::Json).unwrap();
    assert!(report.is_success());
    assert_eq!(report.project().devices().len(), MAX_DEVICES);
}

#[test]
fn test_too_many_devices_is_rejected_before_building() {
    let devices = (0..=MAX_DEVICES)
        .map(|i| static_device(&format!("/dev/mvbc{i}"), vec![json!({"addr": 1, "fcode": 1})]))
        .collect();
    let err = parse_project("generated", &document(devices), DocumentFormat::Json).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParameter(_)));
    assert_eq!(err.code(), ConfigError::INVALID_PARAMETER_CODE);
}

#[test]
fn test_max_ports_accepted_and_one_more_rejected() {
    let ports = |count: usize| -> Vec<Value> {
        (0..count)
            .map(|i| json!({"addr": (i % MAX_PORTS) + 1, "fcode": 1, "poll_ms": 16}))
            .collect()
    };

    let full = document(vec![static_device("/dev/mvbc0", ports(MAX_PORTS))]);
    let report = parse_project("full", &full, DocumentFormat::Json).unwrap();
    assert!(report.is_success());
    assert_eq!(report.project().devices()[0].ports.ports().len(), MAX_PORTS);

    let over = document(vec![static_device("/dev/mvbc0", ports(MAX_PORTS + 1))]);
    let report = parse_project("over", &over, DocumentFormat::Json).unwrap();
    assert!(report.project().devices().is_empty());
    assert_eq!(report.error_code(), ConfigError::INVALID_PARAMETER_CODE);
}

#[test]
fn test_device_address_boundaries() {
    for (addr, accepted) in [(0, false), (4095, true), (4096, false)] {
        let mut device = static_device("/dev/mvbc0", vec![json!({"addr": 1, "fcode": 1})]);
        device["device_addr"] = json!(addr);
        let report =
            parse_project("addr", &document(vec![device]), DocumentFormat::Json).unwrap();
        assert_eq!(report.is_success(), accepted, "device_addr {addr}");
    }
}

#[test]
fn test_static_port_failure_stops_the_device_loop() {
    let devices = vec![
        static_device("/dev/mvbc0", vec![json!({"addr": 1, "fcode": 1})]),
        static_device("/dev/mvbc1", vec![json!({"addr": 1, "fcode": 16})]),
        static_device("/dev/mvbc2", vec![json!({"addr": 1, "fcode": 1})]),
    ];
    let report = parse_project("loop", &document(devices), DocumentFormat::Json).unwrap();
    assert_eq!(report.project().devices().len(), 1);
    assert_eq!(report.outcomes().len(), 2);
    assert_eq!(
        report.first_error().and_then(ConfigError::field),
        Some("devices[1].config.static[0].fcode")
    );
}

#[test]
fn test_environment_overrides_default_path() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let devices = vec![static_device("/dev/mvbc3", vec![json!({"addr": 9, "fcode": 4})])];
    file.write_all(document(devices).as_bytes()).unwrap();

    std::env::set_var(PROJECT_CONFIG_ENV, file.path());
    let report = load_project(None);
    std::env::remove_var(PROJECT_CONFIG_ENV);

    let project = report.unwrap().into_project().unwrap();
    assert_eq!(project.devices()[0].path, "/dev/mvbc3");
}
