// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fairclip::{cli, commands, config, watchlist};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("init", _)) => {
            let list = config::watchlist_path()?;
            watchlist::write_default(&list, false)?;
            let cfg = config::config_path()?;
            if !cfg.exists() {
                config::save_to(&cfg, &config::ScreenParams::default())?;
            }
            println!("Watch-list: {}", list.display());
            println!("Config:     {}", cfg.display());
        }
        Some(("tickers", sub)) => commands::tickers::handle(sub)?,
        Some(("screen", sub)) => commands::screen::handle(sub)?,
        Some(("dividends", sub)) => commands::dividends::handle(sub)?,
        Some(("config", sub)) => commands::config::handle(&config::config_path()?, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
