// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use mvbc_config::{load_project, DeviceOutcome, LoadReport, Project};
use mvbc_core::{pack_port, PackedPort};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;

/// Machine readable outcome of validating one project document.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub context: String,
    /// Legacy code of the first failure, 0 when valid.
    pub error_code: i32,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    pub outcomes: Vec<DeviceOutcome>,
    pub port_words: Vec<DevicePortWords>,
}

/// PCS words the driver would receive for one device's static ports.
#[derive(Debug, Serialize)]
pub struct DevicePortWords {
    pub device: String,
    pub ports: Vec<PortWord>,
}

#[derive(Debug, Serialize)]
pub struct PortWord {
    pub address: u16,
    pub pcs_w0: String,
    pub poll_interval: Option<u16>,
}

impl From<(u16, PackedPort)> for PortWord {
    fn from((address, packed): (u16, PackedPort)) -> Self {
        Self {
            address,
            pcs_w0: format!("{:#06x}", packed.pcs_w0),
            poll_interval: packed.poll_interval,
        }
    }
}

impl ValidationResult {
    fn new(context: impl Into<String>) -> Self {
        Self {
            valid: true,
            context: context.into(),
            error_code: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            project: None,
            outcomes: Vec::new(),
            port_words: Vec::new(),
        }
    }

    fn error(&mut self, code: i32, msg: impl Into<String>) {
        if self.valid {
            self.error_code = code;
        }
        self.valid = false;
        self.errors.push(msg.into());
    }

    fn absorb(&mut self, report: LoadReport) {
        self.warnings = report.warnings().map(ToString::to_string).collect();
        for outcome in report.outcomes() {
            for err in &outcome.errors {
                self.error(err.code(), err.to_string());
            }
        }
        self.port_words = report
            .project()
            .devices()
            .iter()
            .map(|device| DevicePortWords {
                device: device.path.clone(),
                ports: device
                    .ports
                    .ports()
                    .iter()
                    .map(|port| PortWord::from((port.address.get(), pack_port(port))))
                    .collect(),
            })
            .collect();
        self.outcomes = report.outcomes().to_vec();
        self.project = Some(report.project().clone());
    }
}

/// Loads `path` (or the default document) and collects the result.
pub fn validate_project(path: Option<&Path>) -> ValidationResult {
    let context = path.map_or_else(
        || mvbc_config::default_config_path().display().to_string(),
        |p| p.display().to_string(),
    );
    let mut result = ValidationResult::new(context);

    match load_project(path) {
        Ok(report) => result.absorb(report),
        Err(err) => {
            error!("{}", err);
            result.error(err.code(), err.to_string());
        }
    }
    result
}

/// Prints `result` as JSON on stdout; exit code 0 when valid, 1 otherwise.
pub fn print_result(result: &ValidationResult) -> Result<ExitCode> {
    let json =
        serde_json::to_string_pretty(result).context("Failed to serialize validation result")?;
    println!("{}", json);

    Ok(if result.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
