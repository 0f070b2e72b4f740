// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::batch::{BatchOutcome, MarketDataSource, SkipReason, run};
use crate::commands::exporter::export_reports;
use crate::config::{self, ScreenParams};
use crate::market::YahooClient;
use crate::models::{AssetReport, ValuationResult};
use crate::utils::{fmt_money, fmt_pct, maybe_print_json, parse_decimal, pretty_table};
use crate::watchlist;
use anyhow::Result;
use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = watchlist_arg(m)?;
    let tickers = watchlist::tickers(&watchlist::load(&path)?);
    if tickers.is_empty() {
        println!("Watch-list {} is empty", path.display());
        return Ok(());
    }
    let params = resolve_params(m, config::load()?)?;
    let as_of = resolve_as_of(m);
    log::info!(
        "Screening {} tickers from {} (as of {}, {} year window)",
        tickers.len(),
        path.display(),
        as_of,
        params.window_years
    );

    let client = YahooClient::new()?;
    screen(m, &tickers, &client, &params, as_of)
}

/// Run the batch and present it. Split from `handle` so a fixed source can
/// be plugged in.
pub fn screen<S: MarketDataSource + ?Sized>(
    m: &clap::ArgMatches,
    tickers: &[String],
    source: &S,
    params: &ScreenParams,
    as_of: i32,
) -> Result<()> {
    let outcome = run(tickers, source, params, as_of)?;

    if let Some(out) = m.get_one::<String>("out") {
        let format = m.get_one::<String>("format").map(String::as_str).unwrap_or("csv");
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        export_reports(&outcome.reports, format, Path::new(out.trim()), &generated_at)?;
        println!("Exported {} results to {}", outcome.reports.len(), out.trim());
    }

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &outcome.reports)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &[
                "Ticker", "Type", "Price", "Gordon", "Margin", "Bazin", "Margin", "Return",
                "Growth", "Years", "Total Div", "Avg Div", "DY",
            ],
            report_rows(&outcome.reports),
        )
    );
    print_summary(&outcome);
    Ok(())
}

fn fair(v: &ValuationResult) -> String {
    format!("{} {}", fmt_money(&v.fair_price), v.signal.marker())
}

pub fn report_rows(reports: &[AssetReport]) -> Vec<Vec<String>> {
    reports
        .iter()
        .map(|r| {
            vec![
                r.ticker.clone(),
                r.asset_type.to_string(),
                fmt_money(&r.current_price),
                fair(&r.growth_adjusted),
                fmt_money(&r.growth_adjusted_margin),
                fair(&r.flat_yield),
                fmt_money(&r.flat_yield_margin),
                fmt_pct(&r.required_return),
                fmt_pct(&r.growth_rate),
                format!("{}/{}", r.years_with_data, r.window_years),
                fmt_money(&r.total_dividends),
                fmt_money(&r.average_dividend),
                fmt_money(&r.dividend_yield),
            ]
        })
        .collect()
}

fn print_summary(outcome: &BatchOutcome) {
    println!(
        "Scored {} tickers, skipped {}",
        outcome.reports.len(),
        outcome.skipped_count()
    );
    for s in &outcome.skipped {
        match &s.reason {
            SkipReason::NoDividendHistory => println!("  {}: no dividend history", s.ticker),
            SkipReason::RetrievalFailed(msg) => println!("  {}: {}", s.ticker, msg),
        }
    }
}

pub fn watchlist_arg(m: &clap::ArgMatches) -> Result<PathBuf> {
    match m.get_one::<String>("file") {
        Some(p) => Ok(PathBuf::from(p.trim())),
        None => config::watchlist_path(),
    }
}

/// Layer per-run flags over the stored parameters.
pub fn resolve_params(m: &clap::ArgMatches, mut params: ScreenParams) -> Result<ScreenParams> {
    if let Some(v) = m.get_one::<String>("equity-return") {
        params.equity_required_return = parse_decimal(v)?;
    }
    if let Some(v) = m.get_one::<String>("trust-return") {
        params.trust_required_return = parse_decimal(v)?;
    }
    if let Some(v) = m.get_one::<String>("growth") {
        params.growth_rate = parse_decimal(v)?;
    }
    if let Some(v) = m.get_one::<u32>("years") {
        params.window_years = *v;
    }
    Ok(params)
}

pub fn resolve_as_of(m: &clap::ArgMatches) -> i32 {
    m.get_one::<i32>("as-of")
        .copied()
        .unwrap_or_else(|| Local::now().year())
}
