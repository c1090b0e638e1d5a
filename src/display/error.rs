/*
 *  display/error.rs
 *
 *  nokia5110-gfx
 *
 *  Error type for the display engine
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

use thiserror::Error;

/// Error type for display operations.
///
/// Only the transport can fail: a GPIO toggle or a bus write going wrong.
/// Out-of-range coordinates, oversized glyph positions and invalid text
/// modes are *not* errors anywhere in this crate - they clamp or no-op,
/// so a malformed draw call degrades visually instead of halting the
/// caller's control loop.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// A GPIO pin operation failed.
    #[error("GPIO error: {0}")]
    Gpio(String),

    /// An underlying `display-interface` bus write failed.
    #[error("display interface error: {0:?}")]
    Interface(display_interface::DisplayError),

    /// Delay/timer facility failed.
    #[error("delay error: {0}")]
    Delay(String),
}

// display_interface::DisplayError doesn't implement std::error::Error,
// so it is carried as a plain field rather than a #[source].
impl From<display_interface::DisplayError> for DisplayError {
    fn from(err: display_interface::DisplayError) -> Self {
        DisplayError::Interface(err)
    }
}
