// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, DaySummary};
use crate::commands::transactions::category_name;
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{fmt_money, fmt_signed, maybe_print_json, optional, parse_date, pretty_table, today};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct DayRow {
    date: NaiveDate,
    income: Decimal,
    expense: Decimal,
    net: Decimal,
}

pub fn handle<S: KeyValueStorage>(state: &AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    let days = analytics::group_by_day(state.transactions());
    let ccy = state.currency();

    if let Some(month) = optional(m, "month") {
        let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
        let data: Vec<DayRow> = days
            .iter()
            .filter(|(d, s)| {
                d.year() == first.year() && d.month() == first.month() && !s.net().is_zero()
            })
            .map(|(d, s)| DayRow {
                date: *d,
                income: s.income,
                expense: s.expense,
                net: s.net(),
            })
            .collect();
        if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &data)? {
            let rows = data
                .iter()
                .map(|r| {
                    let sign = if r.net >= Decimal::ZERO { "+" } else { "-" };
                    vec![
                        r.date.to_string(),
                        fmt_money(&r.income, ccy),
                        fmt_money(&r.expense, ccy),
                        format!("{}{}", sign, fmt_money(&r.net.abs(), ccy)),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Day", "Income", "Expense", "Net"], rows)
            );
        }
        return Ok(());
    }

    let day = match optional(m, "date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let empty = DaySummary::default();
    let summary = days.get(&day).unwrap_or(&empty);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), summary)? {
        return Ok(());
    }
    println!(
        "{}: income {}, expense {}, net {}",
        day,
        fmt_money(&summary.income, ccy),
        fmt_money(&summary.expense, ccy),
        fmt_money(&summary.net(), ccy)
    );
    if summary.items.is_empty() {
        println!("No transactions on this day.");
    } else {
        let rows = summary
            .items
            .iter()
            .map(|t| {
                vec![
                    category_name(state, &t.category),
                    t.description.clone().unwrap_or_default(),
                    fmt_signed(t, ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Description", "Amount"], rows)
        );
    }
    Ok(())
}
