// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::capacity::Bounded;
use crate::device::{build_device, Device};
use crate::document::{self, DocumentFormat, Raw};
use crate::error::{ConfigError, ConfigResult};
use crate::policy::{
    resolve_optional, FieldWarning, OnMistyped, DEFAULT_PROJECT_NAME, DEFAULT_PROJECT_VERSION,
};
use crate::validate::ValidationError;
use crate::{capped, MAX_DEVICES};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Location of the project document when no path is given.
pub const DEFAULT_PROJECT_CONFIG_FILE: &str = "/usr/share/mvbc_example.json";
/// Environment variable overriding [`DEFAULT_PROJECT_CONFIG_FILE`].
pub const PROJECT_CONFIG_ENV: &str = "MVBC_PROJECT_CONFIG";

pub type DeviceList = Bounded<Device, MAX_DEVICES>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub version: String,
    devices: DeviceList,
}

impl Project {
    /// Devices in document order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

/// Result of building one entry of `project.devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceOutcome {
    pub index: usize,
    /// Known once the device's path resolved.
    pub path: Option<String>,
    /// Every failure of the device, in evaluation order. Empty when it loaded.
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<FieldWarning>,
}

impl DeviceOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn serialize_errors<S>(errors: &[ConfigError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

/// Everything a load produced: the project, per-device outcomes, and the
/// warnings raised outside any device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    project: Project,
    outcomes: Vec<DeviceOutcome>,
    warnings: Vec<FieldWarning>,
}

impl LoadReport {
    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn outcomes(&self) -> &[DeviceOutcome] {
        &self.outcomes
    }

    /// Project level warnings (name, version).
    pub fn project_warnings(&self) -> &[FieldWarning] {
        &self.warnings
    }

    /// Project level warnings followed by every device's warnings.
    pub fn warnings(&self) -> impl Iterator<Item = &FieldWarning> {
        self.warnings
            .iter()
            .chain(self.outcomes.iter().flat_map(|o| o.warnings.iter()))
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(DeviceOutcome::is_ok)
    }

    pub fn first_error(&self) -> Option<&ConfigError> {
        self.outcomes.iter().find_map(|o| o.errors.first())
    }

    /// Legacy numeric code of the first failure, `0` when every device loaded.
    pub fn error_code(&self) -> i32 {
        self.first_error().map_or(0, ConfigError::code)
    }

    /// The project, or the first device failure.
    pub fn into_project(self) -> ConfigResult<Project> {
        if let Some(err) = self.first_error().cloned() {
            return Err(err);
        }
        Ok(self.project)
    }
}

/// Path used when the caller does not name a document.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(PROJECT_CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_CONFIG_FILE))
}

/// Reads and builds the project document at `path` (or [`default_config_path`]).
///
/// `Err` is reserved for failures that prevent building any device: unreadable
/// document, missing `project.devices`, too many devices. Per-device failures
/// are reported in the returned [`LoadReport`].
pub fn load_project(path: Option<&Path>) -> ConfigResult<LoadReport> {
    let path = path.map_or_else(default_config_path, Path::to_path_buf);
    let origin = path.display().to_string();
    info!("Loading project configuration from {}", origin);

    let content = std::fs::read_to_string(&path).map_err(|e| {
        error!("Cannot read {}: {}", origin, e);
        ConfigError::read(&origin, e)
    })?;
    parse_project(&origin, &content, DocumentFormat::from_path(&path))
}

/// Builds a project from an in-memory document.
pub fn parse_project(
    origin: &str,
    content: &str,
    format: DocumentFormat,
) -> ConfigResult<LoadReport> {
    let root = format.parse(origin, content)?;
    if !root.is_object() {
        return Err(ConfigError::read(origin, "document root is not an object"));
    }
    build_project(&root)
}

/// Builds a project from an already parsed document tree.
pub fn build_project(root: &Value) -> ConfigResult<LoadReport> {
    let Some(root) = root.as_object() else {
        return Err(ConfigError::read("document", "document root is not an object"));
    };

    let mut warnings = Vec::new();
    let name = resolve_optional(
        "project.name",
        document::string(root, "project.name"),
        |s| Ok::<_, ValidationError>(capped(s)),
        DEFAULT_PROJECT_NAME.to_string(),
        OnMistyped::UseDefault,
    )?
    .record(&mut warnings);
    let version = resolve_optional(
        "project.version",
        document::string(root, "project.version"),
        |s| Ok::<_, ValidationError>(capped(s)),
        DEFAULT_PROJECT_VERSION.to_string(),
        OnMistyped::UseDefault,
    )?
    .record(&mut warnings);
    info!("Project '{}' version '{}'", name, version);

    let records = match document::array(root, "project.devices") {
        Raw::Present(records) => records,
        Raw::Absent => return Err(ConfigError::missing("project.devices")),
        Raw::Mistyped { expected } => {
            return Err(ConfigError::wrong_type("project.devices", expected))
        }
    };
    if records.len() > MAX_DEVICES {
        let err = ConfigError::InvalidParameter(format!(
            "project.devices lists {} devices, at most {} are supported",
            records.len(),
            MAX_DEVICES
        ));
        error!("{}", err);
        return Err(err);
    }

    let mut devices = DeviceList::new();
    let mut outcomes = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let mut device_warnings = Vec::new();
        match build_device(record, index, &mut device_warnings) {
            Ok(built) => {
                if !built.template_errors.is_empty() {
                    error!(
                        "devices[{}]: {} default port field(s) failed",
                        index,
                        built.template_errors.len()
                    );
                }
                outcomes.push(DeviceOutcome {
                    index,
                    path: Some(built.device.path.clone()),
                    errors: built.template_errors,
                    warnings: device_warnings,
                });
                devices
                    .try_push(built.device)
                    .map_err(|e| ConfigError::InvalidParameter(format!("devices[{index}]: {e}")))?;
            }
            Err(err) => {
                error!("devices[{}]: {}", index, err);
                outcomes.push(DeviceOutcome {
                    index,
                    path: record
                        .get("path")
                        .and_then(Value::as_str)
                        .map(capped),
                    errors: vec![err],
                    warnings: device_warnings,
                });
                break;
            }
        }
    }

    Ok(LoadReport {
        project: Project {
            name,
            version,
            devices,
        },
        outcomes,
        warnings,
    })
}
