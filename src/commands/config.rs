// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{ScreenParams, load_from, save_to};
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(path)?,
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("KEY").unwrap().trim();
            let value = sub.get_one::<String>("VALUE").unwrap();
            let mut params = load_from(path)?;
            params.set(key, value)?;
            save_to(path, &params)?;
            println!("Set {} = {}", key, value.trim());
        }
        Some(("reset", _)) => {
            save_to(path, &ScreenParams::default())?;
            println!("Parameters reset to defaults");
        }
        _ => show(path)?,
    }
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let params = load_from(path)?;
    let rows = params
        .entries()
        .into_iter()
        .map(|(k, v)| vec![k.to_string(), v])
        .collect();
    println!("{}", pretty_table(&["Key", "Value"], rows));
    println!("Config file: {}", path.display());
    Ok(())
}
