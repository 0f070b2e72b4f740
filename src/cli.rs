// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, arg, value_parser};

fn file_arg() -> Arg {
    arg!(--file <PATH> "Watch-list file (defaults to tickers.txt in the data dir)").required(false)
}

fn param_args(cmd: Command) -> Command {
    cmd.arg(arg!(--"equity-return" <RATE> "Required return for equities, e.g. 0.08").required(false))
        .arg(arg!(--"trust-return" <RATE> "Required return for REITs/FIIs, e.g. 0.10").required(false))
        .arg(arg!(--growth <RATE> "Perpetual dividend growth rate, e.g. 0.005").required(false))
        .arg(
            arg!(--years <N> "Trailing window in whole years, current year excluded")
                .required(false)
                .value_parser(value_parser!(u32).range(1..)),
        )
        .arg(
            arg!(--"as-of" <YEAR> "Treat YEAR as the current year (default: this year)")
                .required(false)
                .value_parser(value_parser!(i32)),
        )
}

pub fn build_cli() -> Command {
    Command::new("fairclip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dividend fair-price screener (Gordon and Bazin models)")
        .subcommand(Command::new("init").about("Create the data dir, default watch-list and config"))
        .subcommand(
            Command::new("tickers")
                .about("Manage the watch-list")
                .arg(file_arg().global(true))
                .subcommand(
                    Command::new("init")
                        .about("Write the sample watch-list")
                        .arg(arg!(--force "Overwrite an existing file").action(ArgAction::SetTrue)),
                )
                .subcommand(Command::new("list").about("Show the watch-list"))
                .subcommand(
                    Command::new("add")
                        .about("Append a ticker")
                        .arg(arg!(<TICKER> "Ticker symbol, e.g. TAEE3.SA"))
                        .arg(arg!(--kind <KIND> "Free-text kind, e.g. FII or equity").required(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a ticker")
                        .arg(arg!(<TICKER> "Ticker symbol")),
                ),
        )
        .subcommand(param_args(
            Command::new("screen")
                .about("Score every ticker on the watch-list")
                .arg(file_arg())
                .arg(arg!(--out <PATH> "Export results to PATH").required(false))
                .arg(
                    arg!(--format <FMT> "Export format: csv|json")
                        .required(false)
                        .default_value("csv"),
                )
                .arg(arg!(--json "Print results as JSON").action(ArgAction::SetTrue))
                .arg(arg!(--jsonl "Print results as JSON lines").action(ArgAction::SetTrue)),
        ))
        .subcommand(param_args(
            Command::new("dividends")
                .about("Show yearly dividends and the window aggregate for one ticker")
                .arg(arg!(<TICKER> "Ticker symbol")),
        ))
        .subcommand(
            Command::new("config")
                .about("Show or change default valuation parameters")
                .subcommand(Command::new("show").about("Print the current parameters"))
                .subcommand(
                    Command::new("set")
                        .about("Set one parameter")
                        .arg(arg!(<KEY> "equity_required_return|trust_required_return|growth_rate|window_years"))
                        .arg(arg!(<VALUE> "New value")),
                )
                .subcommand(Command::new("reset").about("Restore the defaults")),
        )
}
