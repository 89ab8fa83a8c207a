// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn credentials(cmd: Command) -> Command {
    cmd.arg(Arg::new("email").long("email").required(true))
        .arg(Arg::new("password").long("password").required(true))
}

/// Routes that work without a signed-in session.
const OPEN_ROUTES: &[&str] = &["init", "login", "register"];

pub fn requires_session(route: &str) -> bool {
    !OPEN_ROUTES.contains(&route)
}

pub fn build_cli() -> Command {
    Command::new("pennywise")
        .about("Personal budget tracker: transactions, budgets, goals, subscriptions")
        .version(env!("CARGO_PKG_VERSION"))
        .disable_help_subcommand(true)
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(credentials(Command::new("login").about("Sign in")))
        .subcommand(credentials(Command::new("register").about("Create an account")))
        .subcommand(Command::new("logout").about("Sign out"))
        .subcommand(Command::new("help").about("Show usage tips"))
        .subcommand(json_flags(
            Command::new("dashboard").about("Balance, budget status and recent activity"),
        ))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_parser(["all", "income", "expense"])
                                .default_value("all"),
                        )
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("from").long("from"))
                        .arg(Arg::new("to").long("to"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(Command::new("show").arg(id_arg())))
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_flags(
            Command::new("calendar")
                .about("Daily income and expense")
                .arg(Arg::new("date").long("date").help("Day to inspect (default today)"))
                .arg(Arg::new("month").long("month").help("YYYY-MM to summarise")),
        ))
        .subcommand(
            Command::new("budget")
                .about("Category spending limits")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("color").long("color").default_value("blue")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("target").long("target"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("deposit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("sub")
                .about("Recurring subscriptions")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("cost").long("cost").required(true))
                        .arg(
                            Arg::new("day")
                                .long("day")
                                .required(true)
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("category").long("category").default_value("other")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("cost").long("cost"))
                        .arg(Arg::new("day").long("day").value_parser(value_parser!(u32)))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("emerald")),
                )
                .subcommand(
                    Command::new("color")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("color").long("color").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("settings")
                .about("Currency and language")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("currency").arg(
                        Arg::new("symbol")
                            .required(true)
                            .value_parser(["$", "₺"]),
                    ),
                )
                .subcommand(
                    Command::new("language")
                        .arg(Arg::new("lang").required(true).value_parser(["en", "tr"])),
                ),
        )
        .subcommand(json_flags(
            Command::new("report")
                .about("Monthly income/expense and spending by category")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(u32))
                        .default_value("6"),
                ),
        ))
        .subcommand(
            json_flags(Command::new("profile").about("Account overview")).subcommand(
                Command::new("passwd")
                    .about("Change password")
                    .arg(Arg::new("new").long("new").required(true))
                    .arg(Arg::new("confirm").long("confirm").required(true)),
            ),
        )
}
