// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use bitflags::bitflags;
use serde::Serialize;

bitflags! {
    /// Initialization stages that failed. Empty means the controllers run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    #[serde(transparent)]
    pub struct InitStatus: u8 {
        const PARSE_CONFIGURATION = 1;
        const RESET = 2;
        const TEST_TRAFFIC_MEMORY = 4;
        const SET_DEVICE_CONFIG = 8;
        const SET_PORT_CONFIG = 16;
        const RUN = 32;
    }
}

impl InitStatus {
    /// Process exit code carrying the status bits.
    pub fn exit_code(self) -> u8 {
        self.bits()
    }
}
