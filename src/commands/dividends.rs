// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::screen::{resolve_as_of, resolve_params};
use crate::config;
use crate::dividends::{aggregate, normalize, window_rows};
use crate::market::YahooClient;
use crate::models::{AnnualDividendSeries, DividendPayment, WindowAggregate};
use crate::utils::{fmt_money, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let ticker = m.get_one::<String>("TICKER").unwrap().trim().to_uppercase();
    let params = resolve_params(m, config::load()?)?;
    let as_of = resolve_as_of(m);

    let chart = YahooClient::new()?.chart(&ticker)?;
    if chart.ledger.is_empty() {
        println!("{} has no dividend history", ticker);
        return Ok(());
    }
    let (rows, agg) = history(&chart.ledger, params.window_years, as_of)?;
    println!("{}", pretty_table(&["Year", "Dividends"], rows));
    println!(
        "{}: total {} over {} of {} years, average {}",
        ticker,
        fmt_money(&agg.total),
        agg.years_with_data,
        params.window_years,
        fmt_money(&agg.average)
    );
    Ok(())
}

/// Yearly rows for the window plus the running (partial) as-of year.
pub fn history(
    ledger: &[DividendPayment],
    window_years: u32,
    as_of: i32,
) -> Result<(Vec<Vec<String>>, WindowAggregate)> {
    let series: AnnualDividendSeries = normalize(ledger)?;
    let agg = aggregate(&series, window_years, as_of)?;
    let mut rows: Vec<Vec<String>> = window_rows(&series, window_years, as_of)
        .into_iter()
        .map(|(year, amount)| vec![year.to_string(), fmt_money(&amount)])
        .collect();
    if let Some(partial) = series.get(&as_of) {
        rows.push(vec![format!("{} (partial)", as_of), fmt_money(partial)]);
    }
    Ok((rows, agg))
}
