/*
 *  display/bitmap.rs
 *
 *  nokia5110-gfx
 *
 *  Page-aligned bitmap blits
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

impl<P: DisplayPort> Lcd<P> {
    /// Blit a page-aligned image with its top-left at (x, page y).
    ///
    /// `data` is laid out row-major in page rows: `width` column bytes
    /// for the first 8-pixel band, then the next band, bit 0 topmost
    /// within each band - the layout the usual bitmap converters emit
    /// for vertical-downwards, MSB-last panels. `height` is in pixels;
    /// a partial last band still occupies a full page row. Missing
    /// bytes in a short `data` slice render blank rather than faulting.
    pub fn draw_bitmap(
        &mut self,
        x: u8,
        y: u8,
        data: &[u8],
        width: u8,
        height: u8,
    ) -> Result<(), DisplayError> {
        let rows = height.div_ceil(8);

        for row in 0..rows {
            self.goto_xy(x, y.saturating_add(row))?;
            for i in 0..width as usize {
                let byte = data
                    .get(i + row as usize * width as usize)
                    .copied()
                    .unwrap_or(0);
                self.write_byte(byte)?;
            }
        }
        Ok(())
    }

    /// Blank the page-aligned region a bitmap of the same geometry
    /// would cover, usually to take down a previously drawn image.
    pub fn clear_bitmap(
        &mut self,
        x: u8,
        y: u8,
        width: u8,
        height: u8,
    ) -> Result<(), DisplayError> {
        let rows = height.div_ceil(8);

        for row in 0..rows {
            self.goto_xy(x, y.saturating_add(row))?;
            for _ in 0..width {
                self.write_byte(0x00)?;
            }
        }
        Ok(())
    }
}
