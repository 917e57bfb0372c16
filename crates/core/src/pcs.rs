// MVBC Configurator - Fieldbus Controller Setup
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Port control and status word 0 (PCS0).
//!
//! ```text
//!  15    12 11  10  9  8  7   5  4  3  2   1   0
//! +--------+---+---+----+------+--------+---+---+
//! | F-code |SRC|SNK|    |  IRQ |        |NUM|   |
//! +--------+---+---+----+------+--------+---+---+
//! ```

use bitflags::bitflags;
use mvbc_config::{Port, PortDirection};
use serde::Serialize;

bitflags! {
    /// Single-bit fields of PCS0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(transparent)]
    pub struct Pcs0Flags: u16 {
        const NUM_DATA = 1 << 1;
        const SINK = 1 << 10;
        const SOURCE = 1 << 11;
    }
}

pub const FUNCTION_CODE_SHIFT: u16 = 12;
pub const INTERRUPT_SHIFT: u16 = 5;
pub const INTERRUPT_MASK: u16 = 0b111 << INTERRUPT_SHIFT;

/// PCS0 plus the poll interval, which is only sent for polled ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackedPort {
    pub pcs_w0: u16,
    pub poll_interval: Option<u16>,
}

impl PackedPort {
    pub fn flags(&self) -> Pcs0Flags {
        Pcs0Flags::from_bits_truncate(self.pcs_w0)
    }

    pub fn function_code(&self) -> u8 {
        (self.pcs_w0 >> FUNCTION_CODE_SHIFT) as u8
    }

    pub fn interrupt(&self) -> u8 {
        ((self.pcs_w0 & INTERRUPT_MASK) >> INTERRUPT_SHIFT) as u8
    }
}

/// Packs a validated port into PCS0.
///
/// A non-zero interrupt number selects interrupt delivery and suppresses the
/// poll interval; interrupt 0 means the port is polled.
pub fn pack_port(port: &Port) -> PackedPort {
    let mut flags = match port.direction {
        PortDirection::Sink => Pcs0Flags::SINK,
        PortDirection::Source => Pcs0Flags::SOURCE,
    };
    flags.set(Pcs0Flags::NUM_DATA, port.numeric_data);

    let mut word = flags.bits() | (u16::from(port.function_code.get()) << FUNCTION_CODE_SHIFT);

    let poll_interval = if port.irq.is_none() {
        Some(port.poll_interval.get())
    } else {
        word |= (u16::from(port.irq.get()) << INTERRUPT_SHIFT) & INTERRUPT_MASK;
        None
    };

    PackedPort {
        pcs_w0: word,
        poll_interval,
    }
}
