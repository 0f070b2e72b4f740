// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::screen::watchlist_arg;
use crate::utils::pretty_table;
use crate::watchlist;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let path = watchlist_arg(m)?;
    match m.subcommand() {
        Some(("init", sub)) => {
            if watchlist::write_default(&path, sub.get_flag("force"))? {
                println!("Watch-list created at {}", path.display());
            } else {
                println!("Watch-list already exists at {} (use --force to overwrite)", path.display());
            }
        }
        Some(("list", _)) => {
            let entries = watchlist::load(&path)?;
            let rows = entries
                .into_iter()
                .enumerate()
                .map(|(i, e)| vec![(i + 1).to_string(), e.ticker, e.kind.unwrap_or_default()])
                .collect();
            println!("{}", pretty_table(&["#", "Ticker", "Kind"], rows));
        }
        Some(("add", sub)) => {
            let ticker = sub.get_one::<String>("TICKER").unwrap();
            let kind = sub.get_one::<String>("kind").map(String::as_str);
            watchlist::add(&path, ticker, kind)?;
            println!("Added {} to {}", ticker.trim().to_uppercase(), path.display());
        }
        Some(("rm", sub)) => {
            let ticker = sub.get_one::<String>("TICKER").unwrap();
            let removed = watchlist::remove(&path, ticker)?;
            println!("Removed {} line(s) for {}", removed, ticker.trim());
        }
        _ => {}
    }
    Ok(())
}
