// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{AssetReport, Signal};
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::Path;

const CSV_HEADERS: [&str; 17] = [
    "generated_at",
    "ticker",
    "asset_type",
    "current_price",
    "gordon_fair_price",
    "gordon_signal",
    "gordon_margin",
    "bazin_fair_price",
    "bazin_signal",
    "bazin_margin",
    "required_return",
    "growth_rate",
    "window_years",
    "years_with_data",
    "total_dividends",
    "average_dividend",
    "dividend_yield",
];

#[derive(Serialize)]
struct ExportRecord<'a> {
    generated_at: &'a str,
    #[serde(flatten)]
    report: &'a AssetReport,
}

fn num(d: &Decimal) -> String {
    d.round_dp(4).normalize().to_string()
}

fn signal(s: Signal) -> String {
    serde_json::to_value(s)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Write reports to `out` as `csv` or `json`. Nothing is written for an
/// unknown format.
pub fn export_reports(reports: &[AssetReport], format: &str, out: &Path, generated_at: &str) -> Result<()> {
    match format.trim().to_lowercase().as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(CSV_HEADERS)?;
            for r in reports {
                wtr.write_record([
                    generated_at.to_string(),
                    r.ticker.clone(),
                    r.asset_type.to_string(),
                    num(&r.current_price),
                    num(&r.growth_adjusted.fair_price),
                    signal(r.growth_adjusted.signal),
                    num(&r.growth_adjusted_margin),
                    num(&r.flat_yield.fair_price),
                    signal(r.flat_yield.signal),
                    num(&r.flat_yield_margin),
                    num(&r.required_return),
                    num(&r.growth_rate),
                    r.window_years.to_string(),
                    r.years_with_data.to_string(),
                    num(&r.total_dividends),
                    num(&r.average_dividend),
                    num(&r.dividend_yield),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<ExportRecord<'_>> = reports
                .iter()
                .map(|report| ExportRecord {
                    generated_at,
                    report,
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    log::info!("Exported {} reports to {}", reports.len(), out.display());
    Ok(())
}
