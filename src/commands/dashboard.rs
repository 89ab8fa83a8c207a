// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, BudgetStatus, Totals};
use crate::commands::transactions::category_name;
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{fmt_money, fmt_percent, fmt_signed, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

const RECENT: usize = 5;
const HIGHLIGHTS: usize = 3;

#[derive(Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub budgets: Vec<BudgetStatus>,
    pub recent: Vec<crate::models::Transaction>,
}

pub fn build<S: KeyValueStorage>(state: &AppState<S>) -> Dashboard {
    let txs = state.transactions();
    Dashboard {
        totals: analytics::totals(txs),
        budgets: analytics::budget_highlights(
            txs,
            state.categories(),
            state.budget_limits(),
            state.language(),
            HIGHLIGHTS,
        ),
        recent: analytics::recent(txs, RECENT),
    }
}

pub fn handle<S: KeyValueStorage>(state: &AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    let dash = build(state);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let ccy = state.currency();
    println!(
        "{}",
        pretty_table(
            &["Balance", "Income", "Expense"],
            vec![vec![
                fmt_money(&dash.totals.balance, ccy),
                fmt_money(&dash.totals.income, ccy),
                fmt_money(&dash.totals.expense, ccy),
            ]],
        )
    );

    if dash.budgets.is_empty() {
        println!("No budget limits set.");
    } else {
        let rows = dash
            .budgets
            .iter()
            .map(|b| {
                vec![
                    b.label.clone(),
                    fmt_money(&b.spent, ccy),
                    fmt_money(&b.limit, ccy),
                    fmt_percent(&b.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Spent", "Limit", "Used"], rows)
        );
    }

    let rows = dash
        .recent
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                category_name(state, &t.category),
                t.description.clone().unwrap_or_default(),
                fmt_signed(t, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Category", "Description", "Amount"], rows)
    );
    Ok(())
}
