/*
 *  display/port/interface.rs
 *
 *  nokia5110-gfx
 *
 *  Adapter for display-interface bus backends
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

use display_interface::{DataFormat, WriteOnlyDataCommand};

use crate::display::error::DisplayError;
use crate::display::port::DisplayPort;

/// Drives the panel through any `display-interface` backend, for setups
/// where the link runs over a real SPI peripheral instead of bit-banged
/// GPIO.
///
/// The engine addresses the controller one byte at a time, so each call
/// forwards a single-byte `U8` burst.
pub struct InterfacePort<DI> {
    di: DI,
}

impl<DI: WriteOnlyDataCommand> InterfacePort<DI> {
    pub fn new(di: DI) -> Self {
        Self { di }
    }

    /// Hand the wrapped interface back, e.g. to release the bus.
    pub fn release(self) -> DI {
        self.di
    }
}

impl<DI: WriteOnlyDataCommand> DisplayPort for InterfacePort<DI> {
    fn send_command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.di
            .send_commands(DataFormat::U8(&[byte]))
            .map_err(DisplayError::from)
    }

    fn send_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.di
            .send_data(DataFormat::U8(&[byte]))
            .map_err(DisplayError::from)
    }
}
