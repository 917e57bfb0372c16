// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

pub mod bringup;
pub mod gateway;
pub mod pcs;
pub mod registers;
pub mod status;

pub use bringup::{bring_up, bring_up_device, BringUpError, Step};
pub use gateway::{
    check_device_path, Command, ControllerGateway, GatewayCall, GatewayError, GatewayResult,
    RecordingGateway, DEFAULT_DEVICE_PATH,
};
pub use pcs::{pack_port, PackedPort, Pcs0Flags};
pub use registers::{DeviceSetup, Line, Mcr, PortSetup, ResetConfig, Scr};
pub use status::InitStatus;

/// Library version, `major.minor.patch`.
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library version as numbers.
pub fn library_version() -> (u32, u32, u32) {
    let mut parts = LIBRARY_VERSION
        .split('.')
        .map(|part| part.parse::<u32>().unwrap_or(0));
    let mut next = || parts.next().unwrap_or(0);
    (next(), next(), next())
}
