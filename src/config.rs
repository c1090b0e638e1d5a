/*
 *  config.rs
 *
 *  nokia5110-gfx
 *
 *  Layered configuration: defaults <- YAML file <- CLI overrides
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

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// e.g. "info" | "debug"
    pub log_level: Option<String>,
    /// engine geometry & behavior
    pub display: Option<LcdConfig>,
}

/// Engine configuration.
///
/// `buffered` selects graphic mode: the engine keeps the page mirror in
/// sync, which pixel-level drawing depends on. Turning it off writes
/// text straight through with no mirror bookkeeping, the mode for
/// text-only deployments on very tight hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LcdConfig {
    /// Keep the page mirror in sync (graphic mode). Default true.
    pub buffered: bool,
    /// Wrap overflowing text instead of dropping it. Default true.
    pub wrap: bool,
    /// Vop (contrast) level, 7 bits. `None` uses the built-in default.
    pub contrast: Option<u8>,
    /// Switch the backlight on at startup (GPIO transport only).
    pub backlight: bool,
}

impl Default for LcdConfig {
    fn default() -> Self {
        Self {
            buffered: true,
            wrap: true,
            contrast: None,
            backlight: false,
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "nokia5110-demo", about = "PCD8544 rendering engine demo")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub buffered: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub wrap: Option<bool>,
    /// Vop (contrast) level, 0-127
    #[arg(long)]
    pub contrast: Option<u8>,
    /// Text rendered in the small font
    #[arg(long, default_value = "It's alive!")]
    pub text: String,
    /// Reading rendered in the big numeric font
    #[arg(long, default_value = "-12.5")]
    pub reading: String,
    /// Drive a real panel via this GPIO character device
    /// (e.g. /dev/gpiochip0); needs the `hardware` feature
    #[arg(long)]
    pub gpiochip: Option<String>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();

    // 1) defaults
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok((cfg, cli))
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/nokia5110/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/nokia5110.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    for candidate in &["nokia5110.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn merge(base: &mut Config, overlay: Config) {
    if overlay.log_level.is_some() {
        base.log_level = overlay.log_level;
    }
    if overlay.display.is_some() {
        base.display = overlay.display;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }

    if cli.buffered.is_some() || cli.wrap.is_some() || cli.contrast.is_some() {
        let lcd = cfg.display.get_or_insert_with(LcdConfig::default);
        if let Some(b) = cli.buffered {
            lcd.buffered = b;
        }
        if let Some(w) = cli.wrap {
            lcd.wrap = w;
        }
        if let Some(c) = cli.contrast {
            lcd.contrast = Some(c);
        }
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(lcd) = cfg.display.as_ref() {
        if let Some(c) = lcd.contrast {
            if c > 0x7F {
                return Err(ConfigError::Validation(format!(
                    "contrast must be 0-127, got {c}"
                )));
            }
        }
    }
    Ok(())
}
