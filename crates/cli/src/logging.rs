// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `MVBC_LOG=mvbc_config=debug`.
pub const LOG_ENV: &str = "MVBC_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs the fmt subscriber on stderr so stdout stays free for reports.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
