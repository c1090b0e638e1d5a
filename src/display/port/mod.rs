/*
 *  display/port/mod.rs
 *
 *  nokia5110-gfx
 *
 *  Write-only command/data transport to the PCD8544 controller
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

pub mod gpio;
pub mod interface;
pub mod mock;

pub use gpio::GpioPort;
pub use interface::InterfacePort;
pub use mock::{MockPort, PortOp};

use crate::display::error::DisplayError;

/// PCD8544 instruction bytes.
///
/// Basic set (H=0) unless noted; the extended-set bytes are only valid
/// after `FUNC_EXTENDED` and must be followed by `FUNC_BASIC` to resume
/// normal addressing.
#[allow(dead_code)]
pub(crate) mod cmd {
    /// Function set, basic instructions, horizontal addressing.
    pub const FUNC_BASIC: u8 = 0x20;
    /// Function set with H=1, selects the extended instruction set.
    pub const FUNC_EXTENDED: u8 = 0x21;
    /// Set X address: OR with column 0-83.
    pub const SET_X_ADDR: u8 = 0x80;
    /// Set Y address: OR with page 0-5.
    pub const SET_Y_ADDR: u8 = 0x40;
    /// Display control: normal video.
    pub const DISPLAY_NORMAL: u8 = 0x0C;
    /// Display control: all pixels off.
    pub const DISPLAY_BLANK: u8 = 0x08;
    /// Display control: inverse video.
    pub const DISPLAY_INVERSE: u8 = 0x0D;
    /// Extended: set Vop (contrast), OR with a 7-bit level.
    pub const SET_VOP: u8 = 0x80;
    /// Extended: temperature coefficient 2.
    pub const TEMP_COEFF_2: u8 = 0x06;
    /// Extended: bias system 1:48.
    pub const BIAS_1_48: u8 = 0x13;
}

/// Default Vop programmed by `Lcd::init` when the config leaves contrast
/// unset. Matches the panel lot the engine was tuned against.
pub(crate) const DEFAULT_VOP: u8 = 0x49;

/// Write-only byte transport to the display controller.
///
/// Each call is a blocking, atomic unit: chip-select asserted, the
/// command/data mode pin set, eight bits clocked out, chip-select
/// released. The controller has no status channel, so nothing is ever
/// read back; a successful return means the bytes left this side of the
/// link, not that the panel liked them.
pub trait DisplayPort {
    /// Send one command byte (mode pin low).
    fn send_command(&mut self, byte: u8) -> Result<(), DisplayError>;

    /// Send one data byte (mode pin high).
    fn send_data(&mut self, byte: u8) -> Result<(), DisplayError>;
}
