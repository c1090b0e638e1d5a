/*
 *  display/port/gpio.rs
 *
 *  nokia5110-gfx
 *
 *  Bit-banged GPIO transport for the PCD8544 serial link
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

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::info;

use crate::display::error::DisplayError;
use crate::display::port::DisplayPort;

/// Placeholder for the optional backlight pin when none is wired.
#[derive(Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Bit-banged five-wire transport (reset, D/C, data-in, clock,
/// chip-enable) plus an optional backlight pin.
///
/// The panel's serial link is not quite SPI-shaped - the clock must idle
/// high and rise while data is stable - so the port clocks bits out by
/// hand rather than going through a bus peripheral. Any
/// `embedded-hal` 1.0 `OutputPin` works; on Linux hosts
/// `linux-embedded-hal`'s `CdevPin` is the usual choice.
pub struct GpioPort<RST, DC, DIN, CLK, CE, LED, D> {
    rst: RST,
    dc: DC,
    din: DIN,
    clk: CLK,
    ce: CE,
    led: Option<LED>,
    delay: D,
}

fn pin<E: Debug>(res: Result<(), E>) -> Result<(), DisplayError> {
    res.map_err(|e| DisplayError::Gpio(format!("{e:?}")))
}

impl<RST, DC, DIN, CLK, CE, D> GpioPort<RST, DC, DIN, CLK, CE, NoPin, D>
where
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    CLK: OutputPin,
    CE: OutputPin,
    D: DelayNs,
{
    /// Create a port with no backlight pin.
    pub fn new(rst: RST, dc: DC, din: DIN, clk: CLK, ce: CE, delay: D) -> Self {
        Self {
            rst,
            dc,
            din,
            clk,
            ce,
            led: None,
            delay,
        }
    }
}

impl<RST, DC, DIN, CLK, CE, LED, D> GpioPort<RST, DC, DIN, CLK, CE, LED, D>
where
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    CLK: OutputPin,
    CE: OutputPin,
    LED: OutputPin,
    D: DelayNs,
{
    /// Create a port with a backlight pin attached.
    pub fn with_backlight(
        rst: RST,
        dc: DC,
        din: DIN,
        clk: CLK,
        ce: CE,
        led: LED,
        delay: D,
    ) -> Self {
        Self {
            rst,
            dc,
            din,
            clk,
            ce,
            led: Some(led),
            delay,
        }
    }

    /// Pulse the reset line.
    ///
    /// The controller wants reset within 30 ms of power-up; the data
    /// lines are parked high first so a grounded chip-enable wiring
    /// still resets cleanly. Call this once before `Lcd::init`.
    pub fn reset(&mut self) -> Result<(), DisplayError> {
        info!("Resetting PCD8544 panel");

        pin(self.rst.set_high())?;
        pin(self.dc.set_high())?;
        pin(self.din.set_high())?;
        pin(self.clk.set_high())?;
        pin(self.ce.set_high())?;
        self.delay.delay_ms(5);

        pin(self.rst.set_low())?;
        self.delay.delay_us(20);
        pin(self.rst.set_high())?;

        Ok(())
    }

    /// Backlight passthrough. No-op when no LED pin is wired.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        match self.led.as_mut() {
            Some(led) if on => pin(led.set_high()),
            Some(led) => pin(led.set_low()),
            None => Ok(()),
        }
    }

    fn send_byte(&mut self, is_data: bool, byte: u8) -> Result<(), DisplayError> {
        pin(self.ce.set_low())?;
        if is_data {
            pin(self.dc.set_high())?;
        } else {
            pin(self.dc.set_low())?;
        }

        // MSB first; the controller latches on the rising clock edge
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                pin(self.din.set_high())?;
            } else {
                pin(self.din.set_low())?;
            }
            pin(self.clk.set_low())?;
            pin(self.clk.set_high())?;
        }

        pin(self.ce.set_high())
    }
}

impl<RST, DC, DIN, CLK, CE, LED, D> DisplayPort for GpioPort<RST, DC, DIN, CLK, CE, LED, D>
where
    RST: OutputPin,
    DC: OutputPin,
    DIN: OutputPin,
    CLK: OutputPin,
    CE: OutputPin,
    LED: OutputPin,
    D: DelayNs,
{
    fn send_command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send_byte(false, byte)
    }

    fn send_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.send_byte(true, byte)
    }
}
