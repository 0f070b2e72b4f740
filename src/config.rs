// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ScreenError;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Fairclip", "fairclip"));

pub const CONFIG_FILE: &str = "config.json";
pub const WATCHLIST_FILE: &str = "tickers.txt";

/// Valuation parameters for a screening run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenParams {
    pub equity_required_return: Decimal,
    pub trust_required_return: Decimal,
    pub growth_rate: Decimal,
    pub window_years: u32,
}

impl Default for ScreenParams {
    fn default() -> Self {
        Self {
            equity_required_return: Decimal::new(8, 2),
            trust_required_return: Decimal::new(10, 2),
            growth_rate: Decimal::new(5, 3),
            window_years: 5,
        }
    }
}

impl ScreenParams {
    /// Both models must be well defined for either required return.
    pub fn validate(&self) -> Result<(), ScreenError> {
        if self.window_years == 0 {
            return Err(ScreenError::invalid("window_years must be positive"));
        }
        for (name, rate) in [
            ("equity_required_return", self.equity_required_return),
            ("trust_required_return", self.trust_required_return),
        ] {
            if rate <= Decimal::ZERO {
                return Err(ScreenError::invalid(format!("{} must be positive, got {}", name, rate)));
            }
            if rate <= self.growth_rate {
                return Err(ScreenError::invalid(format!(
                    "{} ({}) must exceed growth_rate ({})",
                    name, rate, self.growth_rate
                )));
            }
        }
        Ok(())
    }

    /// Update one field by its config key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "equity_required_return" => self.equity_required_return = crate::utils::parse_decimal(value)?,
            "trust_required_return" => self.trust_required_return = crate::utils::parse_decimal(value)?,
            "growth_rate" => self.growth_rate = crate::utils::parse_decimal(value)?,
            "window_years" => {
                self.window_years = value
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("Invalid window '{}', expected a positive integer", value))?
            }
            other => return Err(anyhow!("Unknown config key '{}'", other)),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("equity_required_return", self.equity_required_return.to_string()),
            ("trust_required_return", self.trust_required_return.to_string()),
            ("growth_rate", self.growth_rate.to_string()),
            ("window_years", self.window_years.to_string()),
        ]
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE))
}

pub fn watchlist_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(WATCHLIST_FILE))
}

/// Missing file means defaults.
pub fn load_from(path: &Path) -> Result<ScreenParams> {
    if !path.exists() {
        log::debug!("No config at {}, using defaults", path.display());
        return Ok(ScreenParams::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("Read config {}", path.display()))?;
    let params: ScreenParams = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(params)
}

pub fn save_to(path: &Path, params: &ScreenParams) -> Result<()> {
    params.validate()?;
    fs::write(path, serde_json::to_string_pretty(params)?)
        .with_context(|| format!("Write config {}", path.display()))?;
    Ok(())
}

pub fn load() -> Result<ScreenParams> {
    load_from(&config_path()?)
}
