// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use clap::Parser;
use mvbc_cli::logging::init_logging;
use mvbc_config::load_project;
use mvbc_core::{bring_up, library_version, ControllerGateway, InitStatus, RecordingGateway};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Load a project document and bring up every controller it lists.
///
/// The exit code carries the failed initialization stages:
/// 1 parse, 2 reset, 4 traffic memory test, 8 device configuration,
/// 16 port configuration, 32 run.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project document (JSON, or YAML with a .yaml/.yml extension).
    /// Defaults to $MVBC_PROJECT_CONFIG, then /usr/share/mvbc_example.json.
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli) {
        Ok(status) => ExitCode::from(status.exit_code()),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(InitStatus::PARSE_CONFIGURATION.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<InitStatus> {
    let mut gateway = RecordingGateway::new();

    let (major, minor, patch) = library_version();
    info!("Library version: {}.{}.{}", major, minor, patch);
    let firmware = gateway
        .firmware_version()
        .context("Failed to query PLD firmware version")?;
    info!("PLD firmware version: {}", firmware);

    let report = match load_project(cli.config.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            error!("Project configuration rejected: {}", e);
            return Ok(InitStatus::PARSE_CONFIGURATION);
        }
    };
    let project = match report.into_project() {
        Ok(project) => project,
        Err(e) => {
            error!("Project configuration rejected: {}", e);
            return Ok(InitStatus::PARSE_CONFIGURATION);
        }
    };

    if let Err(e) = bring_up(&project, &mut gateway) {
        return Ok(e.status());
    }

    let payload = serde_json::to_string_pretty(&gateway.snapshot())
        .context("Failed to serialize driver calls")?;
    println!("{}", payload);
    info!(
        "{} controller(s) running ({} driver calls)",
        project.devices().len(),
        gateway.calls().len()
    );
    Ok(InitStatus::empty())
}
