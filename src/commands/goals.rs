// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::labels;
use crate::models::GoalColor;
use crate::storage::KeyValueStorage;
use crate::store::{AppState, GoalDraft};
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, optional, parse_decimal, pretty_table, required,
};
use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(state, sub)?,
        Some(("add", sub)) => add(state, sub)?,
        Some(("edit", sub)) => edit(state, sub)?,
        Some(("deposit", sub)) => deposit(state, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing goal id")?;
            let g = state.delete_goal(id)?;
            println!("Deleted goal '{}'", g.name);
        }
        _ => {}
    }
    Ok(())
}

fn parse_color(s: &str) -> Result<GoalColor> {
    GoalColor::parse(s).ok_or_else(|| {
        let names: Vec<_> = GoalColor::ALL.iter().map(|c| c.as_str()).collect();
        anyhow!("Unknown colour '{}' (use {})", s, names.join("|"))
    })
}

#[derive(Serialize)]
struct GoalRow {
    id: i64,
    name: String,
    current: Decimal,
    target: Decimal,
    percentage: Decimal,
    reached: bool,
    color: GoalColor,
}

fn list<S: KeyValueStorage>(state: &AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let lang = state.language();
    let data: Vec<GoalRow> = state
        .goals()
        .iter()
        .map(|g| GoalRow {
            id: g.id,
            name: labels::label(lang, &g.name).to_string(),
            current: g.current,
            target: g.target,
            percentage: analytics::goal_percentage(g),
            reached: analytics::goal_reached(g),
            color: g.color,
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = state.currency();
    let totals = analytics::goal_totals(state.goals());
    println!(
        "Saved {} of {}",
        fmt_money(&totals.saved, ccy),
        fmt_money(&totals.target, ccy)
    );
    let rows = data
        .iter()
        .map(|g| {
            vec![
                g.id.to_string(),
                g.name.clone(),
                fmt_money(&g.current, ccy),
                fmt_money(&g.target, ccy),
                fmt_percent(&g.percentage),
                if g.reached { "reached" } else { "" }.to_string(),
                g.color.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Goal", "Saved", "Target", "Progress", "Status", "Colour"],
            rows
        )
    );
    Ok(())
}

fn add<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let draft = GoalDraft {
        name: required(sub, "name")?.to_string(),
        target: parse_decimal(required(sub, "target")?)?,
        color: parse_color(required(sub, "color")?)?,
    };
    let g = state.add_goal(draft)?;
    println!("Added goal '{}' (id {})", g.name, g.id);
    Ok(())
}

fn edit<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing goal id")?;
    let current = state
        .goals()
        .iter()
        .find(|g| g.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("Goal {} not found", id))?;
    let draft = GoalDraft {
        name: optional(sub, "name").map(str::to_string).unwrap_or(current.name),
        target: match optional(sub, "target") {
            Some(t) => parse_decimal(t)?,
            None => current.target,
        },
        color: match optional(sub, "color") {
            Some(c) => parse_color(c)?,
            None => current.color,
        },
    };
    let g = state.edit_goal(id, draft)?;
    println!("Updated goal '{}'", g.name);
    Ok(())
}

fn deposit<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing goal id")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let out = state.deposit(id, amount)?;
    let ccy = state.currency();
    println!(
        "'{}' now at {} of {} ({})",
        labels::label(state.language(), &out.goal.name),
        fmt_money(&out.goal.current, ccy),
        fmt_money(&out.goal.target, ccy),
        fmt_percent(&analytics::goal_percentage(&out.goal))
    );
    if out.just_reached {
        println!("Congratulations! Goal reached.");
    }
    Ok(())
}
