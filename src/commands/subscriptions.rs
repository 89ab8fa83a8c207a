// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::models::SubscriptionCategory;
use crate::storage::KeyValueStorage;
use crate::store::{AppState, SubscriptionDraft};
use crate::utils::{
    fmt_money, maybe_print_json, optional, parse_decimal, pretty_table, required, today,
};
use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(state, sub)?,
        Some(("add", sub)) => {
            let draft = SubscriptionDraft {
                name: required(sub, "name")?.to_string(),
                cost: parse_decimal(required(sub, "cost")?)?,
                billing_day: *sub.get_one::<u32>("day").context("Missing --day")?,
                category: parse_category(required(sub, "category")?)?,
            };
            let s = state.add_subscription(draft)?;
            println!("Added subscription '{}' (id {})", s.name, s.id);
        }
        Some(("edit", sub)) => edit(state, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing subscription id")?;
            let s = state.delete_subscription(id)?;
            println!("Deleted subscription '{}'", s.name);
        }
        _ => {}
    }
    Ok(())
}

fn parse_category(s: &str) -> Result<SubscriptionCategory> {
    SubscriptionCategory::parse(s).ok_or_else(|| {
        let names: Vec<_> = SubscriptionCategory::ALL
            .iter()
            .map(|c| c.as_str())
            .collect();
        anyhow!("Unknown category '{}' (use {})", s, names.join("|"))
    })
}

#[derive(Serialize)]
struct SubscriptionRow {
    id: i64,
    name: String,
    cost: Decimal,
    billing_day: u32,
    days_left: u32,
    category: SubscriptionCategory,
}

fn list<S: KeyValueStorage>(state: &AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let day = today().day();
    let data: Vec<SubscriptionRow> = state
        .subscriptions()
        .iter()
        .map(|s| SubscriptionRow {
            id: s.id,
            name: s.name.clone(),
            cost: s.cost,
            billing_day: s.billing_day,
            days_left: analytics::days_until_billing(s.billing_day, day),
            category: s.category,
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = state.currency();
    println!(
        "Monthly total: {}",
        fmt_money(&analytics::monthly_subscription_cost(state.subscriptions()), ccy)
    );
    let rows = data
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.category.to_string(),
                fmt_money(&s.cost, ccy),
                s.billing_day.to_string(),
                s.days_left.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Category", "Cost", "Billing day", "Days left"],
            rows
        )
    );
    Ok(())
}

fn edit<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing subscription id")?;
    let current = state
        .subscriptions()
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("Subscription {} not found", id))?;
    let draft = SubscriptionDraft {
        name: optional(sub, "name")
            .map(str::to_string)
            .unwrap_or(current.name),
        cost: match optional(sub, "cost") {
            Some(c) => parse_decimal(c)?,
            None => current.cost,
        },
        billing_day: sub
            .get_one::<u32>("day")
            .copied()
            .unwrap_or(current.billing_day),
        category: match optional(sub, "category") {
            Some(c) => parse_category(c)?,
            None => current.category,
        },
    };
    let s = state.edit_subscription(id, draft)?;
    println!("Updated subscription '{}'", s.name);
    Ok(())
}
