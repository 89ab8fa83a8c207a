// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, CategorySlice, MonthBucket};
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
pub struct Report {
    pub cashflow: Vec<MonthBucket>,
    pub spending: Vec<CategorySlice>,
}

pub fn build<S: KeyValueStorage>(state: &AppState<S>, today: NaiveDate, months: u32) -> Report {
    Report {
        cashflow: analytics::monthly_buckets(state.transactions(), today, months),
        spending: analytics::expense_breakdown(
            state.transactions(),
            state.categories(),
            state.language(),
        ),
    }
}

pub fn handle<S: KeyValueStorage>(state: &AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    let months = *m.get_one::<u32>("months").unwrap_or(&6);
    let report = build(state, today(), months);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = state.currency();
    let rows = report
        .cashflow
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_money(&b.income, ccy),
                fmt_money(&b.expense, ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));

    let total: Decimal = report.spending.iter().map(|s| s.value).sum();
    let rows = report
        .spending
        .iter()
        .map(|s| {
            let share = if total.is_zero() {
                Decimal::ZERO
            } else {
                s.value / total * Decimal::ONE_HUNDRED
            };
            vec![
                s.label.clone(),
                fmt_money(&s.value, ccy),
                format!("{:.0}%", share),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}
