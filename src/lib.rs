/*
 *  lib.rs
 *
 *  nokia5110-gfx
 *
 *  Rendering engine for PCD8544 (Nokia 5110) 84x48 monochrome panels.
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

//! Rendering engine for the PCD8544 (Nokia 5110) 84x48 monochrome panel.
//!
//! The engine keeps a byte-per-cell mirror of the controller's paged
//! memory (6 pages x 84 columns, one byte = 8 stacked vertical pixels)
//! and drives the panel through a write-only command/data transport.
//! On top of the mirror it provides a text layout state machine with two
//! font systems and integer-only drawing primitives.
//!
//! The transport is abstracted by [`display::port::DisplayPort`]; a
//! bit-banged GPIO implementation, a `display-interface` adapter, and a
//! recording mock for tests are provided.

pub mod config;
pub mod display;
pub mod font;

pub use config::LcdConfig;
pub use display::error::DisplayError;
pub use display::graphics::PixelOp;
pub use display::lcd::Lcd;
pub use display::port::{DisplayPort, MockPort};
pub use display::text::TextMode;
pub use font::Font;
