/*
 *  display/lcd.rs
 *
 *  nokia5110-gfx
 *
 *  Engine core: addressing, low-level writes, clears, bring-up
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

use log::info;

use crate::config::LcdConfig;
use crate::display::error::DisplayError;
use crate::display::framebuffer::PageBuffer;
use crate::display::port::{DisplayPort, DEFAULT_VOP, cmd};
use crate::display::text::TextMode;
use crate::display::{LCD_COLS, LCD_PAGES};
use crate::font::Font;

/// Controller addressing state: column 0-83, page 0-5.
///
/// Always in range; every positioning call clamps before storing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub col: u8,
    pub page: u8,
}

/// The rendering engine for one 84x48 panel.
///
/// Owns the transport, the page mirror and all cursor/text state, so
/// several independent panels can coexist and tests never share
/// globals. Single caller context assumed throughout: nothing here is
/// synchronized, and every operation drives the transport to completion
/// before returning.
pub struct Lcd<P: DisplayPort> {
    pub(crate) port: P,
    pub(crate) buffer: PageBuffer,
    pub(crate) cursor: Cursor,
    pub(crate) font: Font,
    pub(crate) text_mode: TextMode,
    pub(crate) wrap: bool,
    pub(crate) buffered: bool,
    vop: u8,
}

impl<P: DisplayPort> Lcd<P> {
    /// Engine with the default configuration: buffered, wrapping, small
    /// font, normal video.
    pub fn new(port: P) -> Self {
        Self::with_config(port, &LcdConfig::default())
    }

    pub fn with_config(port: P, config: &LcdConfig) -> Self {
        Self {
            port,
            buffer: PageBuffer::new(),
            cursor: Cursor { col: 0, page: 0 },
            font: Font::small(),
            text_mode: TextMode::Normal,
            wrap: config.wrap,
            buffered: config.buffered,
            vop: config.contrast.unwrap_or(DEFAULT_VOP) & 0x7F,
        }
    }

    /// Program the controller registers and blank the panel.
    ///
    /// Expects the reset pulse to have happened already (for the GPIO
    /// transport, `GpioPort::reset`). Leaves the controller in the
    /// basic instruction set, horizontal addressing, normal video,
    /// cursor home.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        info!("Programming PCD8544: vop=0x{:02X}, bias 1:48", self.vop);

        self.port.send_command(cmd::FUNC_EXTENDED)?;
        self.port.send_command(cmd::SET_VOP | self.vop)?;
        self.port.send_command(cmd::TEMP_COEFF_2)?;
        self.port.send_command(cmd::BIAS_1_48)?;
        self.port.send_command(cmd::FUNC_BASIC)?;
        self.clear()?;
        self.port.send_command(cmd::DISPLAY_NORMAL)?;

        Ok(())
    }

    /// Re-program the contrast (Vop) level, 7 bits.
    pub fn set_contrast(&mut self, vop: u8) -> Result<(), DisplayError> {
        self.vop = vop & 0x7F;
        self.port.send_command(cmd::FUNC_EXTENDED)?;
        self.port.send_command(cmd::SET_VOP | self.vop)?;
        self.port.send_command(cmd::FUNC_BASIC)
    }

    /// Move the addressing cursor to an absolute (column, page).
    ///
    /// Out-of-range input saturates to the panel edge - the hardware
    /// registers have no defined behavior past their range, and a
    /// cosmetic failure shouldn't fault the caller's loop.
    pub fn goto_xy(&mut self, x: u8, y: u8) -> Result<(), DisplayError> {
        let x = x.min(LCD_COLS - 1);
        let y = y.min(LCD_PAGES - 1);

        self.port.send_command(cmd::SET_X_ADDR | x)?;
        self.port.send_command(cmd::SET_Y_ADDR | y)?;

        self.cursor = Cursor { col: x, page: y };
        Ok(())
    }

    /// Cursor to (0, 0).
    pub fn home(&mut self) -> Result<(), DisplayError> {
        self.goto_xy(0, 0)
    }

    /// Jump to a page, keeping the current column.
    pub fn goto_line(&mut self, page: u8) -> Result<(), DisplayError> {
        self.goto_xy(self.cursor.col, page)
    }

    /// Jump to a character column on the current page, scaled by the
    /// active font's cell width.
    pub fn goto_col(&mut self, char_col: u8) -> Result<(), DisplayError> {
        self.set_cursor(self.cursor.page, char_col)
    }

    /// Position in character cells: row is a page, col is scaled by
    /// font width plus the spacer column.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        let cell = self.font.width() as u16 + 1;
        let x = (col as u16 * cell).min(LCD_COLS as u16 - 1) as u8;
        self.goto_xy(x, row)
    }

    /// Send one data byte and advance the cursor the way the
    /// controller does in horizontal addressing: column 83 wraps to
    /// column 0 of the next page, the last page wraps to page 0. The
    /// mirror cell under the cursor is updated when buffering is on, so
    /// mirror and panel never disagree.
    pub fn write_byte(&mut self, value: u8) -> Result<(), DisplayError> {
        self.port.send_data(value)?;

        if self.buffered {
            self.buffer.set_cell(self.cursor.page, self.cursor.col, value);
        }

        if self.cursor.col < LCD_COLS - 1 {
            self.cursor.col += 1;
        } else {
            self.cursor.col = 0;
            self.cursor.page = (self.cursor.page + 1) % LCD_PAGES;
        }
        Ok(())
    }

    /// Blank the panel and the mirror; cursor ends at (0, 0).
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.clear();
        self.home()?;
        for _ in 0..(LCD_PAGES as usize * LCD_COLS as usize) {
            self.write_byte(0x00)?;
        }
        self.home()
    }

    /// Blank the page holding the cursor. The sweep is addressed from
    /// column 0 so the whole row is zeroed, then the pre-clear column
    /// is restored.
    pub fn clear_line(&mut self) -> Result<(), DisplayError> {
        let Cursor { col, page } = self.cursor;

        self.goto_xy(0, page)?;
        for _ in 0..LCD_COLS {
            self.write_byte(0x00)?;
        }
        self.goto_xy(col, page)
    }

    /// Re-send the whole mirror to the panel, page by page, then home.
    ///
    /// In unbuffered mode there is no mirror worth pushing; only the
    /// cursor is re-homed.
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        if self.buffered {
            for page in 0..LCD_PAGES {
                self.goto_xy(0, page)?;
                for col in 0..LCD_COLS as usize {
                    self.port.send_data(self.buffer.page(page)[col])?;
                }
            }
        }
        self.home()
    }

    /// Current addressing cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The page mirror, for inspection.
    pub fn buffer(&self) -> &PageBuffer {
        &self.buffer
    }

    /// Whether the engine keeps the mirror in sync (graphic mode).
    pub fn is_buffered(&self) -> bool {
        self.buffered
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Tear down, handing the transport back.
    pub fn release(self) -> P {
        self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::port::{MockPort, PortOp};

    fn engine() -> Lcd<MockPort> {
        Lcd::new(MockPort::new())
    }

    #[test]
    fn test_goto_xy_clamps_and_encodes() {
        let mut lcd = engine();
        lcd.goto_xy(10, 3).unwrap();
        assert_eq!(lcd.cursor(), Cursor { col: 10, page: 3 });
        assert_eq!(lcd.port().commands(), vec![0x80 | 10, 0x40 | 3]);

        lcd.port_mut().clear_log();
        lcd.goto_xy(200, 9).unwrap();
        assert_eq!(lcd.cursor(), Cursor { col: 83, page: 5 });
        assert_eq!(lcd.port().commands(), vec![0x80 | 83, 0x40 | 5]);
    }

    #[test]
    fn test_write_byte_advances_with_controller_wrap() {
        let mut lcd = engine();
        lcd.goto_xy(83, 0).unwrap();
        lcd.write_byte(0xAA).unwrap();
        assert_eq!(lcd.buffer().cell(0, 83), 0xAA);
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 1 });

        lcd.goto_xy(83, 5).unwrap();
        lcd.write_byte(0x01).unwrap();
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 0 });
    }

    #[test]
    fn test_clear_zeroes_everything_and_homes() {
        let mut lcd = engine();
        lcd.goto_xy(20, 2).unwrap();
        lcd.write_byte(0xFF).unwrap();
        lcd.clear().unwrap();

        assert!(lcd.buffer().is_blank());
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 0 });
    }

    #[test]
    fn test_clear_line_restores_column() {
        let mut lcd = engine();
        lcd.goto_xy(0, 2).unwrap();
        for _ in 0..10 {
            lcd.write_byte(0xFF).unwrap();
        }
        lcd.goto_xy(7, 2).unwrap();
        lcd.clear_line().unwrap();

        for col in 0..84 {
            assert_eq!(lcd.buffer().cell(2, col), 0);
        }
        assert_eq!(lcd.cursor(), Cursor { col: 7, page: 2 });
    }

    #[test]
    fn test_init_command_sequence() {
        let mut lcd = engine();
        lcd.init().unwrap();

        let cmds = lcd.port().commands();
        // extended set, vop, temp coefficient, bias, basic set first
        assert_eq!(&cmds[..5], &[0x21, 0x80 | 0x49, 0x06, 0x13, 0x20]);
        // normal video last
        assert_eq!(*cmds.last().unwrap(), 0x0C);
        // clear streamed the full panel
        assert_eq!(lcd.port().data_count(), 6 * 84);
    }

    #[test]
    fn test_flush_pushes_mirror_page_by_page() {
        let mut lcd = engine();
        lcd.goto_xy(0, 1).unwrap();
        lcd.write_byte(0x55).unwrap();
        lcd.port_mut().clear_log();

        lcd.flush().unwrap();
        assert_eq!(lcd.port().data_count(), 6 * 84);
        // the written cell went out unchanged
        let data = lcd.port().data();
        assert_eq!(data[84], 0x55);
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 0 });
    }

    #[test]
    fn test_unbuffered_flush_only_rehomes() {
        let cfg = LcdConfig {
            buffered: false,
            ..LcdConfig::default()
        };
        let mut lcd = Lcd::with_config(MockPort::new(), &cfg);
        lcd.flush().unwrap();
        assert_eq!(lcd.port().data_count(), 0);
        assert_eq!(
            lcd.port().ops(),
            &[PortOp::Command(0x80), PortOp::Command(0x40)]
        );
    }

    #[test]
    fn test_transport_failure_propagates() {
        let mut lcd = engine();
        lcd.port_mut().simulate_failure = true;
        assert!(lcd.goto_xy(0, 0).is_err());
        assert!(lcd.write_byte(0).is_err());
    }
}
