// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use clap::Parser;
use mvbc_cli::logging::init_logging;
use mvbc_cli::project_validation::{print_result, validate_project};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// Validate a project document and print the result as JSON.
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

    let result = validate_project(cli.config.as_deref());
    match print_result(&result) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}
