// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::models::CategoryKey;
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, pretty_table, required};
use anyhow::Result;

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let cat = CategoryKey::from(required(sub, "category")?.trim());
    let amount = state.set_budget_limit(&cat, required(sub, "amount")?)?;
    println!(
        "Budget limit for {} = {}",
        cat,
        fmt_money(&amount, state.currency())
    );
    Ok(())
}

fn list<S: KeyValueStorage>(state: &AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = analytics::budget_overview(
        state.transactions(),
        state.categories(),
        state.budget_limits(),
        state.language(),
    );
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = state.currency();
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    fmt_money(&b.spent, ccy),
                    fmt_money(&b.limit, ccy),
                    fmt_percent(&b.percentage),
                    if b.is_over_budget { "over" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Used", "Status"], rows)
        );
    }
    Ok(())
}
