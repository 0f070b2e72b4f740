// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ScreenError;
use crate::models::{AnnualDividendSeries, DividendPayment, WindowAggregate};
use chrono::Datelike;
use rust_decimal::Decimal;

/// Sum payments per calendar year of their own date. Fails only when a
/// year's total does not fit in a `Decimal`.
pub fn normalize(payments: &[DividendPayment]) -> Result<AnnualDividendSeries, ScreenError> {
    let mut series = AnnualDividendSeries::new();
    for p in payments {
        let year = p.date.year();
        let slot = series.entry(year).or_insert(Decimal::ZERO);
        *slot = slot
            .checked_add(p.amount)
            .ok_or_else(|| ScreenError::invalid(format!("dividend total for {} overflows", year)))?;
    }
    Ok(series)
}

/// Total, average and count of years with data over
/// `[as_of_year - window_years, as_of_year)`. The as-of year is usually
/// incomplete and never counted.
pub fn aggregate(
    series: &AnnualDividendSeries,
    window_years: u32,
    as_of_year: i32,
) -> Result<WindowAggregate, ScreenError> {
    if window_years == 0 {
        return Err(ScreenError::invalid("window_years must be positive"));
    }
    let start = (as_of_year as i64 - window_years as i64).max(i32::MIN as i64) as i32;

    let mut total = Decimal::ZERO;
    let mut years_with_data = 0u32;
    for (_, amount) in series.range(start..as_of_year) {
        total = total
            .checked_add(*amount)
            .ok_or_else(|| ScreenError::invalid("dividend window total overflows"))?;
        years_with_data += 1;
    }

    if years_with_data == 0 {
        return Ok(WindowAggregate::default());
    }
    let average = total
        .checked_div(Decimal::from(years_with_data))
        .unwrap_or(Decimal::ZERO);
    Ok(WindowAggregate {
        total,
        average,
        years_with_data,
    })
}

/// Per-year rows inside the window, oldest first, for display.
pub fn window_rows(
    series: &AnnualDividendSeries,
    window_years: u32,
    as_of_year: i32,
) -> Vec<(i32, Decimal)> {
    let start = (as_of_year as i64 - window_years as i64).max(i32::MIN as i64) as i32;
    series
        .range(start..as_of_year)
        .map(|(y, a)| (*y, *a))
        .collect()
}
