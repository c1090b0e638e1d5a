/*
 *  bin/nokia5110-demo.rs
 *
 *  nokia5110-gfx demo - renders a test screen
 *
 *  Without --gpiochip the demo runs against the recording mock port and
 *  prints the resulting frame as ASCII art, which is also how the
 *  engine is exercised in CI. With --gpiochip (and the `hardware`
 *  feature) the same screen is pushed to a real panel.
 *
 *  Usage:
 *    cargo run --bin nokia5110-demo
 *    cargo run --bin nokia5110-demo -- --text "hello" --reading 3.14
 *    cargo run --bin nokia5110-demo --features hardware -- --gpiochip /dev/gpiochip0
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 */

use anyhow::Context;
use env_logger::Env;
use log::info;

use nokia5110_gfx::config::{self, LcdConfig};
use nokia5110_gfx::display::framebuffer::PageBuffer;
use nokia5110_gfx::display::port::{DisplayPort, MockPort};
use nokia5110_gfx::{Lcd, PixelOp, TextMode};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Default BCM pin wiring for the hardware path (matches the common
/// "Nokia 5110 on SPI0 pins, bit-banged" breadboard layout).
#[cfg(feature = "hardware")]
mod pins {
    pub const RST: u32 = 24;
    pub const DC: u32 = 23;
    pub const DIN: u32 = 10;
    pub const CLK: u32 = 11;
    pub const CE: u32 = 8;
    pub const LED: u32 = 18;
}

fn main() -> anyhow::Result<()> {
    let (cfg, cli) = config::load()?;

    let level = cfg.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    info!("nokia5110-gfx demo, built {}", BUILD_DATE);

    let lcd_cfg = cfg.display.unwrap_or_default();

    match cli.gpiochip.as_deref() {
        Some(chip) => run_hardware(chip, &lcd_cfg, &cli.text, &cli.reading),
        None => run_mock(&lcd_cfg, &cli.text, &cli.reading),
    }
}

/// The demo frame: a border, a line of small text, a big reading, and
/// a bit of pixel work so every subsystem gets touched.
fn demo_screen<P: DisplayPort>(
    lcd: &mut Lcd<P>,
    text: &str,
    reading: &str,
) -> Result<(), nokia5110_gfx::DisplayError> {
    lcd.init()?;

    lcd.draw_rectangle(0, 0, 83, 47, PixelOp::On)?;
    lcd.goto_xy(3, 1)?;
    lcd.write_str(text)?;
    lcd.write_big_string(6, 2, reading, TextMode::Normal)?;
    lcd.draw_line(2, 45, 81, 45, PixelOp::On)?;

    lcd.flush()
}

fn run_mock(lcd_cfg: &LcdConfig, text: &str, reading: &str) -> anyhow::Result<()> {
    let mut lcd = Lcd::with_config(MockPort::new(), lcd_cfg);
    demo_screen(&mut lcd, text, reading).context("rendering demo screen")?;

    info!(
        "{} command bytes, {} data bytes over the mock link",
        lcd.port().command_count(),
        lcd.port().data_count()
    );

    print!("{}", render_ascii(lcd.buffer()));
    Ok(())
}

fn render_ascii(buffer: &PageBuffer) -> String {
    let mut out = String::new();

    out.push('+');
    out.push_str(&"-".repeat(84));
    out.push_str("+\n");
    for y in 0..48u8 {
        out.push('|');
        for x in 0..84u8 {
            out.push(if buffer.pixel(x, y).unwrap_or(false) {
                '#'
            } else {
                ' '
            });
        }
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&"-".repeat(84));
    out.push_str("+\n");

    out
}

#[cfg(feature = "hardware")]
fn run_hardware(
    chip_path: &str,
    lcd_cfg: &LcdConfig,
    text: &str,
    reading: &str,
) -> anyhow::Result<()> {
    use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
    use linux_embedded_hal::{CdevPin, Delay};
    use nokia5110_gfx::display::port::GpioPort;

    info!("Driving panel on {chip_path}");

    let mut chip = Chip::new(chip_path).with_context(|| format!("opening {chip_path}"))?;
    let mut request = |offset: u32| -> anyhow::Result<CdevPin> {
        let handle = chip
            .get_line(offset)?
            .request(LineRequestFlags::OUTPUT, 0, "nokia5110-demo")?;
        Ok(CdevPin::new(handle)?)
    };

    let mut port = GpioPort::with_backlight(
        request(pins::RST)?,
        request(pins::DC)?,
        request(pins::DIN)?,
        request(pins::CLK)?,
        request(pins::CE)?,
        request(pins::LED)?,
        Delay,
    );
    port.reset().context("panel reset")?;
    port.set_backlight(lcd_cfg.backlight)
        .context("backlight")?;

    let mut lcd = Lcd::with_config(port, lcd_cfg);
    demo_screen(&mut lcd, text, reading).context("rendering demo screen")?;

    info!("Frame pushed");
    Ok(())
}

#[cfg(not(feature = "hardware"))]
fn run_hardware(
    _chip_path: &str,
    _lcd_cfg: &LcdConfig,
    _text: &str,
    _reading: &str,
) -> anyhow::Result<()> {
    anyhow::bail!("--gpiochip requires building with --features hardware")
}
