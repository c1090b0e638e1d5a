/*
 *  display/text.rs
 *
 *  nokia5110-gfx
 *
 *  Text layout state machine
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
use crate::display::{LCD_COLS, LCD_PAGES};
use crate::font::Font;

/// Render-time video mode for text: Highlight XORs every rasterized
/// byte with 0xFF. Not stored per character - it applies at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    #[default]
    Normal,
    Highlight,
}

impl TextMode {
    /// Mode from its raw wire encoding; anything but 0/1 is
    /// unrecognized and yields `None`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(TextMode::Normal),
            1 => Some(TextMode::Highlight),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn apply(self, byte: u8) -> u8 {
        match self {
            TextMode::Normal => byte,
            TextMode::Highlight => byte ^ 0xFF,
        }
    }
}

impl<P: DisplayPort> Lcd<P> {
    /// Swap the active font. Nothing already on screen is re-rendered.
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn set_text_mode(&mut self, mode: TextMode) {
        self.text_mode = mode;
    }

    /// Raw-value variant of `set_text_mode`: unrecognized values are
    /// ignored, keeping the current mode.
    pub fn set_text_mode_raw(&mut self, raw: u8) {
        if let Some(mode) = TextMode::from_raw(raw) {
            self.text_mode = mode;
        }
    }

    pub fn text_mode(&self) -> TextMode {
        self.text_mode
    }

    /// Wrap on: overflowing glyphs carriage-return/line-feed first.
    /// Wrap off: overflowing glyphs are dropped, cursor untouched.
    pub fn set_wrap(&mut self, on: bool) {
        self.wrap = on;
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Column 0 of the current page.
    pub fn carriage_return(&mut self) -> Result<(), DisplayError> {
        self.goto_col(0)
    }

    /// Next page, same column. Saturates on the last page.
    pub fn line_feed(&mut self) -> Result<(), DisplayError> {
        self.goto_line(self.cursor.page + 1)
    }

    /// Write one character at the cursor in the given mode.
    ///
    /// `\r` and `\n` move the cursor and render nothing. Characters
    /// the font doesn't cover render nothing. A glyph that won't fit
    /// before the right edge (counting its spacer column) wraps or is
    /// dropped per the wrap flag; wrapping off the last page rewinds to
    /// home. The glyph columns go out through `write_byte`, so the
    /// cursor advances exactly as the controller does, followed by one
    /// spacer column (blank, or solid under Highlight).
    pub fn write_char(&mut self, ch: u8, mode: TextMode) -> Result<(), DisplayError> {
        match ch {
            b'\r' => return self.carriage_return(),
            b'\n' => return self.line_feed(),
            _ => {}
        }

        let Some(glyph) = self.font.glyph(ch) else {
            return Ok(());
        };
        let width = self.font.width();

        // fit check counts the spacer column; u16 keeps oversized
        // custom fonts from underflowing
        let limit = (LCD_COLS as u16).saturating_sub(width as u16 + 1);
        if self.cursor.col as u16 > limit {
            if !self.wrap {
                return Ok(());
            }
            if self.cursor.page >= LCD_PAGES - 1 {
                self.home()?;
            } else {
                self.carriage_return()?;
                self.line_feed()?;
            }
        }

        for i in 0..width as usize {
            self.write_byte(mode.apply(glyph[i]))?;
        }
        self.write_byte(mode.apply(0x00))
    }

    /// Write one character using the stored text mode.
    pub fn write(&mut self, ch: u8) -> Result<(), DisplayError> {
        self.write_char(ch, self.text_mode)
    }

    /// Write a string through the state machine, stored text mode.
    pub fn write_str(&mut self, s: &str) -> Result<(), DisplayError> {
        for b in s.bytes() {
            self.write_char(b, self.text_mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::lcd::Cursor;
    use crate::display::port::MockPort;
    use crate::font::small::FONT_5X7;

    fn engine() -> Lcd<MockPort> {
        Lcd::new(MockPort::new())
    }

    fn glyph_slice(ch: u8) -> &'static [u8] {
        &FONT_5X7[(ch - 0x20) as usize * 5..][..5]
    }

    #[test]
    fn test_glyph_roundtrip_at_cursor() {
        let mut lcd = engine();
        lcd.write_char(b'A', TextMode::Normal).unwrap();

        for (i, &b) in glyph_slice(b'A').iter().enumerate() {
            assert_eq!(lcd.buffer().cell(0, i as u8), b);
        }
        // spacer column then cursor one past it
        assert_eq!(lcd.buffer().cell(0, 5), 0x00);
        assert_eq!(lcd.cursor(), Cursor { col: 6, page: 0 });
    }

    #[test]
    fn test_highlight_inverts_glyph_and_spacer() {
        let mut lcd = engine();
        lcd.write_char(b'A', TextMode::Highlight).unwrap();

        for (i, &b) in glyph_slice(b'A').iter().enumerate() {
            assert_eq!(lcd.buffer().cell(0, i as u8), b ^ 0xFF);
        }
        assert_eq!(lcd.buffer().cell(0, 5), 0xFF);
    }

    #[test]
    fn test_cr_and_lf_move_without_rendering() {
        let mut lcd = engine();
        lcd.goto_xy(30, 1).unwrap();
        lcd.write_char(b'\r', TextMode::Normal).unwrap();
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 1 });
        assert!(lcd.buffer().is_blank());

        lcd.write_char(b'\n', TextMode::Normal).unwrap();
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 2 });
    }

    #[test]
    fn test_wrap_relocates_before_rendering() {
        let mut lcd = engine();
        lcd.goto_xy(80, 0).unwrap(); // 80 > 83 - 5
        lcd.write_char(b'X', TextMode::Normal).unwrap();

        // glyph landed at the start of page 1
        for (i, &b) in glyph_slice(b'X').iter().enumerate() {
            assert_eq!(lcd.buffer().cell(1, i as u8), b);
        }
        assert_eq!(lcd.buffer().cell(0, 80), 0);
        assert_eq!(lcd.cursor(), Cursor { col: 6, page: 1 });
    }

    #[test]
    fn test_wrap_disabled_drops_and_keeps_cursor() {
        let mut lcd = engine();
        lcd.set_wrap(false);
        lcd.goto_xy(80, 0).unwrap();
        lcd.port_mut().clear_log();
        lcd.write_char(b'X', TextMode::Normal).unwrap();

        assert!(lcd.buffer().is_blank());
        assert_eq!(lcd.cursor(), Cursor { col: 80, page: 0 });
        assert_eq!(lcd.port().data_count(), 0);
    }

    #[test]
    fn test_overflow_off_last_page_rewinds_home() {
        let mut lcd = engine();
        lcd.goto_xy(80, 5).unwrap();
        lcd.write_char(b'X', TextMode::Normal).unwrap();

        for (i, &b) in glyph_slice(b'X').iter().enumerate() {
            assert_eq!(lcd.buffer().cell(0, i as u8), b);
        }
        assert_eq!(lcd.cursor(), Cursor { col: 6, page: 0 });
    }

    #[test]
    fn test_set_text_mode_raw_ignores_invalid() {
        let mut lcd = engine();
        lcd.set_text_mode_raw(1);
        assert_eq!(lcd.text_mode(), TextMode::Highlight);
        lcd.set_text_mode_raw(7);
        assert_eq!(lcd.text_mode(), TextMode::Highlight);
        lcd.set_text_mode_raw(0);
        assert_eq!(lcd.text_mode(), TextMode::Normal);
    }

    #[test]
    fn test_write_str_spaces_characters() {
        let mut lcd = engine();
        lcd.write_str("Hi").unwrap();
        // two glyphs, each width+1 columns
        assert_eq!(lcd.cursor(), Cursor { col: 12, page: 0 });
        for (i, &b) in glyph_slice(b'i').iter().enumerate() {
            assert_eq!(lcd.buffer().cell(0, 6 + i as u8), b);
        }
    }

    #[test]
    fn test_unmapped_character_renders_nothing() {
        let mut lcd = engine();
        lcd.write_char(0x07, TextMode::Normal).unwrap();
        assert!(lcd.buffer().is_blank());
        assert_eq!(lcd.cursor(), Cursor { col: 0, page: 0 });
    }
}
