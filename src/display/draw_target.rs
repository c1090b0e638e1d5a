/*
 *  display/draw_target.rs
 *
 *  nokia5110-gfx
 *
 *  embedded-graphics integration
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

use embedded_graphics::Pixel;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::display::lcd::Lcd;
use crate::display::port::DisplayPort;
use crate::display::{LCD_COLS, LCD_PIXEL_ROWS};

impl<P: DisplayPort> Lcd<P> {
    /// Mirror-only pixel write for `DrawTarget` batches; nothing goes
    /// over the wire until `flush`.
    fn stage_pixel(&mut self, x: i32, y: i32, on: bool) {
        if !self.buffered {
            return;
        }
        if x < 0 || x >= LCD_COLS as i32 || y < 0 || y >= LCD_PIXEL_ROWS as i32 {
            return;
        }

        let (x, y) = (x as u8, y as u8);
        let page = y / 8;
        let mask = 1 << (y % 8);
        let cell = self.buffer.cell(page, x);
        let cell = if on { cell | mask } else { cell & !mask };
        self.buffer.set_cell(page, x, cell);
    }
}

/// Lets the engine sit at the receiving end of the embedded-graphics
/// toolkit. Unlike the engine's own write-through primitives, drawing
/// through this trait only touches the mirror - call [`Lcd::flush`] to
/// push the result, the same buffered-then-flush shape the rest of the
/// ecosystem's drivers use.
impl<P: DisplayPort> DrawTarget for Lcd<P> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.stage_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

impl<P: DisplayPort> OriginDimensions for Lcd<P> {
    fn size(&self) -> Size {
        Size::new(LCD_COLS as u32, LCD_PIXEL_ROWS as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::port::MockPort;
    use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle};

    #[test]
    fn test_draw_target_stages_without_transport() {
        let mut lcd = Lcd::new(MockPort::new());

        Line::new(Point::new(0, 0), Point::new(10, 10))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut lcd)
            .unwrap();

        // staged in the mirror, nothing on the wire yet
        assert!(lcd.buffer().pixel(0, 0).unwrap());
        assert!(lcd.buffer().pixel(10, 10).unwrap());
        assert_eq!(lcd.port().ops().len(), 0);

        lcd.flush().unwrap();
        assert_eq!(lcd.port().data_count(), 6 * 84);
    }

    #[test]
    fn test_draw_target_clear_fills_mirror() {
        let mut lcd = Lcd::new(MockPort::new());
        DrawTarget::clear(&mut lcd, BinaryColor::On).unwrap();
        assert_eq!(lcd.buffer().cell(3, 40), 0xFF);
        DrawTarget::clear(&mut lcd, BinaryColor::Off).unwrap();
        assert!(lcd.buffer().is_blank());
    }

    #[test]
    fn test_dimensions() {
        let lcd = Lcd::new(MockPort::new());
        assert_eq!(lcd.size(), Size::new(84, 48));
    }
}
