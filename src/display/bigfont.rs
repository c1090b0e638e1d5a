/*
 *  display/bigfont.rs
 *
 *  nokia5110-gfx
 *
 *  Big numeric glyph rendering, 3 pages tall
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
use crate::display::lcd::Lcd;
use crate::display::port::DisplayPort;
use crate::display::text::TextMode;
use crate::display::{LCD_COLS, LCD_PAGES};
use crate::font::big::{
    BIG_COLS, BIG_GLYPHS, BIG_MINUS, BIG_PLUS, BIG_POINT, BIG_POINT_COLS, BIG_ROWS,
    big_glyph_byte,
};

impl<P: DisplayPort> Lcd<P> {
    /// Render one big glyph with its top-left at (x, page y).
    ///
    /// Digits map to themselves, `.` to a 5-column narrow glyph, `+`
    /// and `-` to the signs. Anything else falls back to its low
    /// nibble - which is how ASCII digits reduce to their value - and
    /// nibble values past the table render nothing. Positions too
    /// close to the right or bottom edge are pulled back so the glyph
    /// stays on screen.
    pub fn write_big_char(
        &mut self,
        x: u8,
        y: u8,
        ch: u8,
        mode: TextMode,
    ) -> Result<(), DisplayError> {
        let (glyph, cols_used) = match ch {
            b'.' => (BIG_POINT, BIG_POINT_COLS),
            b'+' => (BIG_PLUS, BIG_COLS),
            b'-' => (BIG_MINUS, BIG_COLS),
            other => {
                let idx = other & 0x0F;
                if idx >= BIG_GLYPHS {
                    return Ok(());
                }
                (idx, BIG_COLS)
            }
        };

        let x = x.min(LCD_COLS - cols_used);
        let y = y.min(LCD_PAGES - BIG_ROWS);

        for row in 0..BIG_ROWS {
            self.goto_xy(x, y + row)?;
            for col in 0..cols_used {
                self.write_byte(mode.apply(big_glyph_byte(glyph, row, col)))?;
            }
        }
        Ok(())
    }

    /// Lay out big glyphs left to right from (x, page y).
    ///
    /// Advances 12 columns per glyph, but only 5 after a decimal point
    /// so fractional readings don't get a gap-toothed look.
    pub fn write_big_string(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        mode: TextMode,
    ) -> Result<(), DisplayError> {
        let mut x = x;
        for ch in text.bytes() {
            self.write_big_char(x, y, ch, mode)?;
            let advance = if ch == b'.' { BIG_POINT_COLS } else { BIG_COLS };
            x = x.saturating_add(advance);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::port::MockPort;

    fn engine() -> Lcd<MockPort> {
        Lcd::new(MockPort::new())
    }

    /// X addresses issued, one per glyph row.
    fn x_addresses(lcd: &Lcd<MockPort>) -> Vec<u8> {
        lcd.port()
            .commands()
            .iter()
            .filter(|&&c| c & 0x80 != 0)
            .map(|&c| c & 0x7F)
            .collect()
    }

    #[test]
    fn test_big_char_spans_three_pages() {
        let mut lcd = engine();
        lcd.write_big_char(4, 1, b'8', TextMode::Normal).unwrap();

        for row in 0..3 {
            for col in 0..12 {
                assert_eq!(
                    lcd.buffer().cell(1 + row, 4 + col),
                    big_glyph_byte(8, row, col)
                );
            }
        }
        // nothing spilled outside the glyph box
        assert_eq!(lcd.buffer().cell(0, 4), 0);
        assert_eq!(lcd.buffer().cell(4, 4), 0);
        assert_eq!(lcd.buffer().cell(1, 3), 0);
        assert_eq!(lcd.buffer().cell(1, 16), 0);
    }

    #[test]
    fn test_big_char_highlight_inverts() {
        let mut lcd = engine();
        lcd.write_big_char(0, 0, b'1', TextMode::Highlight).unwrap();
        assert_eq!(lcd.buffer().cell(0, 0), big_glyph_byte(1, 0, 0) ^ 0xFF);
    }

    #[test]
    fn test_big_char_clamps_to_panel_edge() {
        let mut lcd = engine();
        lcd.write_big_char(80, 5, b'0', TextMode::Normal).unwrap();

        // pulled back to x=72, pages 3..=5
        assert_eq!(lcd.buffer().cell(3, 72), big_glyph_byte(0, 0, 0));
        assert_eq!(lcd.buffer().cell(5, 83), big_glyph_byte(0, 2, 11));
    }

    #[test]
    fn test_big_string_advance_12_5_12() {
        let mut lcd = engine();
        lcd.write_big_string(0, 0, "1.2", TextMode::Normal).unwrap();

        assert_eq!(
            x_addresses(&lcd),
            vec![0, 0, 0, 12, 12, 12, 17, 17, 17]
        );
    }

    #[test]
    fn test_big_fallback_low_nibble() {
        let mut lcd = engine();
        // ':' is 0x3A - low nibble 10, the decimal-point glyph at full width
        lcd.write_big_char(0, 0, b':', TextMode::Normal).unwrap();
        assert_eq!(lcd.buffer().cell(2, 0), big_glyph_byte(10, 2, 0));

        // low nibble 13..=15 addresses no glyph: nothing written
        let mut lcd = engine();
        lcd.write_big_char(0, 0, 0x0F, TextMode::Normal).unwrap();
        assert!(lcd.buffer().is_blank());
        assert_eq!(lcd.port().command_count(), 0);
    }
}
