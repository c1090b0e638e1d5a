/*
 *  display/port/mock.rs
 *
 *  nokia5110-gfx
 *
 *  Recording transport for testing without hardware
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use crate::display::error::DisplayError;
use crate::display::port::DisplayPort;

/// One byte as it went over the (pretend) wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOp {
    Command(u8),
    Data(u8),
}

/// Transport that records every byte instead of driving hardware.
///
/// Useful for:
/// - Unit and integration tests
/// - CI pipelines
/// - The demo binary, which renders the mirror as ASCII art
///
/// The full command/data stream is kept in order so tests can assert on
/// the exact addressing sequence, not just the end state.
#[derive(Debug, Default, Clone)]
pub struct MockPort {
    ops: Vec<PortOp>,

    /// When set, the next send fails - for error-path testing.
    pub simulate_failure: bool,
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in wire order.
    pub fn ops(&self) -> &[PortOp] {
        &self.ops
    }

    /// Just the command bytes, in order.
    pub fn commands(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PortOp::Command(b) => Some(*b),
                PortOp::Data(_) => None,
            })
            .collect()
    }

    /// Just the data bytes, in order.
    pub fn data(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PortOp::Data(b) => Some(*b),
                PortOp::Command(_) => None,
            })
            .collect()
    }

    pub fn command_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PortOp::Command(_)))
            .count()
    }

    pub fn data_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, PortOp::Data(_)))
            .count()
    }

    /// Drop the recorded stream (useful between test phases).
    pub fn clear_log(&mut self) {
        self.ops.clear();
    }

    fn record(&mut self, op: PortOp) -> Result<(), DisplayError> {
        if self.simulate_failure {
            return Err(DisplayError::Gpio("simulated link failure".to_string()));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl DisplayPort for MockPort {
    fn send_command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.record(PortOp::Command(byte))
    }

    fn send_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.record(PortOp::Data(byte))
    }
}
