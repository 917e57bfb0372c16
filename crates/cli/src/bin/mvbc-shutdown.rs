// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::Parser;
use mvbc_cli::logging::init_logging;
use mvbc_core::{ControllerGateway, RecordingGateway, DEFAULT_DEVICE_PATH};
use std::process::ExitCode;
use tracing::{error, info};

/// Stop one MVB interface controller.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Controller device node.
    #[arg(default_value = DEFAULT_DEVICE_PATH)]
    device: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let mut gateway = RecordingGateway::new();
    match gateway.shutdown(&cli.device) {
        Ok(()) => {
            info!("{} shut down", cli.device);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Shutdown of {} failed: {}", cli.device, e);
            ExitCode::from(1)
        }
    }
}
