/*
 *  display/graphics.rs
 *
 *  nokia5110-gfx
 *
 *  Integer-only pixel primitives: line, rectangle, circle
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
use crate::display::{LCD_COLS, LCD_PIXEL_ROWS};

/// How a pixel write combines with the bit already in the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOp {
    /// Set the bit.
    On,
    /// Clear the bit.
    Off,
    /// Toggle the bit.
    Xor,
}

impl PixelOp {
    #[inline]
    fn apply(self, cell: u8, mask: u8) -> u8 {
        match self {
            PixelOp::On => cell | mask,
            PixelOp::Off => cell & !mask,
            PixelOp::Xor => cell ^ mask,
        }
    }
}

impl<P: DisplayPort> Lcd<P> {
    /// Read-modify-write a single pixel and push the owning cell to the
    /// panel immediately. There is no batching: every pixel write is
    /// its own transmission.
    ///
    /// Out-of-range coordinates are a silent no-op - nothing changes in
    /// the mirror and nothing goes over the wire. Requires buffered
    /// mode (pixel composition needs the mirror to read back from);
    /// without it this is also a no-op.
    pub fn set_pixel(&mut self, x: i32, y: i32, op: PixelOp) -> Result<(), DisplayError> {
        if !self.buffered {
            return Ok(());
        }
        if x < 0 || x >= LCD_COLS as i32 || y < 0 || y >= LCD_PIXEL_ROWS as i32 {
            return Ok(());
        }

        let (x, y) = (x as u8, y as u8);
        let page = y / 8;
        let mask = 1 << (y % 8);
        let value = op.apply(self.buffer.cell(page, x), mask);

        self.goto_xy(x, page)?;
        self.write_byte(value)
    }

    /// Bresenham line, both endpoints included. A zero-length line
    /// plots its single pixel.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        op: PixelOp,
    ) -> Result<(), DisplayError> {
        let (mut x, mut y) = (x1, y1);

        let mut dy = y2 - y1;
        let mut dx = x2 - x1;

        let step_y = if dy < 0 {
            dy = -dy;
            -1
        } else {
            1
        };
        let step_x = if dx < 0 {
            dx = -dx;
            -1
        } else {
            1
        };

        dx <<= 1;
        dy <<= 1;

        self.set_pixel(x, y, op)?;

        if dx > dy {
            let mut fraction = dy - (dx >> 1);
            while x != x2 {
                if fraction >= 0 {
                    y += step_y;
                    fraction -= dx;
                }
                x += step_x;
                fraction += dy;
                self.set_pixel(x, y, op)?;
            }
        } else {
            let mut fraction = dx - (dy >> 1);
            while y != y2 {
                if fraction >= 0 {
                    x += step_x;
                    fraction -= dy;
                }
                y += step_y;
                fraction += dx;
                self.set_pixel(x, y, op)?;
            }
        }
        Ok(())
    }

    /// Rectangle outline from top-left (x1, y1) to bottom-right
    /// (x2, y2).
    ///
    /// Each corner is plotted by two of the four edges. Under `Xor`
    /// the corners therefore toggle twice and cancel - long-standing
    /// output compatibility, kept as is.
    pub fn draw_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        op: PixelOp,
    ) -> Result<(), DisplayError> {
        self.draw_line(x1, y1, x2, y1, op)?;
        self.draw_line(x1, y1, x1, y2, op)?;
        self.draw_line(x1, y2, x2, y2, op)?;
        self.draw_line(x2, y1, x2, y2, op)
    }

    /// Filled rectangle: one horizontal line per scanline, y1..=y2.
    pub fn draw_filled_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        op: PixelOp,
    ) -> Result<(), DisplayError> {
        for y in y1..=y2 {
            self.draw_line(x1, y, x2, y, op)?;
        }
        Ok(())
    }

    /// Midpoint circle with eightfold symmetry.
    ///
    /// Small radii come out visibly square-ish; that's the algorithm,
    /// not a defect.
    pub fn draw_circle(
        &mut self,
        xc: i32,
        yc: i32,
        r: i32,
        op: PixelOp,
    ) -> Result<(), DisplayError> {
        let mut y = r;
        let mut p = 3 - 2 * r;

        self.set_pixel(xc, yc - y, op)?;

        let mut x = 0;
        while x <= y {
            if p < 0 {
                p += 4 * x + 6;
            } else {
                y -= 1;
                p += 4 * (x - y) + 10;
            }

            self.set_pixel(xc + x, yc - y, op)?;
            self.set_pixel(xc - x, yc - y, op)?;
            self.set_pixel(xc + x, yc + y, op)?;
            self.set_pixel(xc - x, yc + y, op)?;
            self.set_pixel(xc + y, yc - x, op)?;
            self.set_pixel(xc - y, yc - x, op)?;
            self.set_pixel(xc + y, yc + x, op)?;
            self.set_pixel(xc - y, yc + x, op)?;

            x += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LcdConfig;
    use crate::display::port::MockPort;

    fn engine() -> Lcd<MockPort> {
        Lcd::new(MockPort::new())
    }

    fn on(lcd: &Lcd<MockPort>, x: u8, y: u8) -> bool {
        lcd.buffer().pixel(x, y).unwrap()
    }

    #[test]
    fn test_set_pixel_on_off_xor() {
        let mut lcd = engine();

        lcd.set_pixel(40, 20, PixelOp::On).unwrap();
        assert!(on(&lcd, 40, 20));

        lcd.set_pixel(40, 20, PixelOp::Xor).unwrap();
        assert!(!on(&lcd, 40, 20));

        lcd.set_pixel(40, 20, PixelOp::Xor).unwrap();
        assert!(on(&lcd, 40, 20));

        lcd.set_pixel(40, 20, PixelOp::Off).unwrap();
        assert!(!on(&lcd, 40, 20));
    }

    #[test]
    fn test_set_pixel_writes_through() {
        let mut lcd = engine();
        lcd.set_pixel(10, 9, PixelOp::On).unwrap();

        // one addressing pair plus the updated cell
        assert_eq!(lcd.port().commands(), vec![0x80 | 10, 0x40 | 1]);
        assert_eq!(lcd.port().data(), vec![0b0000_0010]);
    }

    #[test]
    fn test_set_pixel_out_of_range_is_silent() {
        let mut lcd = engine();
        for (x, y) in [(-1, 0), (0, -1), (84, 0), (0, 48), (200, 200)] {
            lcd.set_pixel(x, y, PixelOp::On).unwrap();
        }
        assert!(lcd.buffer().is_blank());
        assert_eq!(lcd.port().ops().len(), 0);
    }

    #[test]
    fn test_set_pixel_unbuffered_is_noop() {
        let cfg = LcdConfig {
            buffered: false,
            ..LcdConfig::default()
        };
        let mut lcd = Lcd::with_config(MockPort::new(), &cfg);
        lcd.set_pixel(10, 10, PixelOp::On).unwrap();
        assert_eq!(lcd.port().ops().len(), 0);
    }

    #[test]
    fn test_zero_length_line_plots_one_pixel() {
        let mut lcd = engine();
        lcd.draw_line(17, 23, 17, 23, PixelOp::On).unwrap();

        let mut count = 0;
        for x in 0..84 {
            for y in 0..48 {
                if on(&lcd, x, y) {
                    count += 1;
                    assert_eq!((x, y), (17, 23));
                }
            }
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_line_endpoints_and_direction_symmetry() {
        let mut lcd = engine();
        lcd.draw_line(5, 5, 30, 12, PixelOp::On).unwrap();
        assert!(on(&lcd, 5, 5));
        assert!(on(&lcd, 30, 12));

        // the reverse line covers the same pixels: XOR erases exactly
        lcd.draw_line(30, 12, 5, 5, PixelOp::Xor).unwrap();
        assert!(lcd.buffer().is_blank());
    }

    #[test]
    fn test_rectangle_perimeter_only() {
        let mut lcd = engine();
        lcd.draw_rectangle(10, 10, 20, 18, PixelOp::On).unwrap();

        for x in 0..84u8 {
            for y in 0..48u8 {
                let inside = (10..=20).contains(&(x as i32)) && (10..=18).contains(&(y as i32));
                let edge = inside
                    && (x as i32 == 10 || x as i32 == 20 || y as i32 == 10 || y as i32 == 18);
                assert_eq!(on(&lcd, x, y), edge, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_rectangle_xor_corners_cancel() {
        let mut lcd = engine();
        lcd.draw_rectangle(10, 10, 20, 18, PixelOp::Xor).unwrap();

        // corners are double-plotted, so they toggle back off
        for (x, y) in [(10, 10), (20, 10), (10, 18), (20, 18)] {
            assert!(!on(&lcd, x, y), "corner ({x},{y})");
        }
        // non-corner edge pixels toggled once
        assert!(on(&lcd, 15, 10));
        assert!(on(&lcd, 10, 14));
    }

    #[test]
    fn test_filled_rectangle_covers_span() {
        let mut lcd = engine();
        lcd.draw_filled_rectangle(3, 40, 8, 45, PixelOp::On).unwrap();

        for x in 3..=8 {
            for y in 40..=45 {
                assert!(on(&lcd, x, y));
            }
        }
        assert!(!on(&lcd, 2, 42));
        assert!(!on(&lcd, 9, 42));
        assert!(!on(&lcd, 5, 39));
        assert!(!on(&lcd, 5, 46));
    }

    #[test]
    fn test_circle_radius_tolerance() {
        let mut lcd = engine();
        let (xc, yc, r) = (42, 24, 15);
        lcd.draw_circle(xc, yc, r, PixelOp::On).unwrap();

        let mut plotted = 0;
        for x in 0..84i32 {
            for y in 0..48i32 {
                if on(&lcd, x as u8, y as u8) {
                    plotted += 1;
                    let dist = (((x - xc).pow(2) + (y - yc).pow(2)) as f64).sqrt();
                    assert!(
                        (dist - r as f64).abs() <= 1.0,
                        "pixel ({x},{y}) at distance {dist}"
                    );
                }
            }
        }
        assert!(plotted > 4 * r, "too few pixels for a radius-{r} circle");
    }

    #[test]
    fn test_circle_clipped_at_edges_is_silent() {
        let mut lcd = engine();
        // center near the corner: most of the circle is off-panel
        lcd.draw_circle(2, 2, 10, PixelOp::On).unwrap();
        // only in-range arcs were plotted, nothing panicked
        assert!(!lcd.buffer().is_blank());
        assert!(lcd.buffer().pixel(12, 2).unwrap());
    }
}
