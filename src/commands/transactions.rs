// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, TransactionFilter};
use crate::labels;
use crate::models::{CategoryKey, TxType};
use crate::storage::KeyValueStorage;
use crate::store::{AppState, NewTransaction, TransactionEdit};
use crate::utils::{
    fmt_signed, maybe_print_json, optional, parse_date, parse_decimal, pretty_table, required,
    today,
};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle<S: KeyValueStorage>(state: &mut AppState<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("show", sub)) => show(state, sub)?,
        Some(("edit", sub)) => edit(state, sub)?,
        Some(("rm", sub)) => remove(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Option<TxType> {
    match s {
        "income" => Some(TxType::Income),
        "expense" => Some(TxType::Expense),
        _ => None,
    }
}

fn add<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let Some(r#type) = parse_type(required(sub, "type")?) else {
        bail!("Transaction type must be income or expense");
    };
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category = match optional(sub, "category") {
        Some(c) => CategoryKey::from(c),
        None => default_category(r#type),
    };
    let date = match optional(sub, "date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let description = optional(sub, "description").map(str::to_string);

    let tx = state.add_transaction(NewTransaction {
        r#type,
        amount,
        date,
        category,
        description,
    })?;
    println!(
        "Recorded {} on {} in '{}' (id {})",
        fmt_signed(&tx, state.currency()),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

/// Preselected category of the add forms.
pub fn default_category(r#type: TxType) -> CategoryKey {
    match r#type {
        TxType::Expense => CategoryKey::from("cat_food"),
        TxType::Income => CategoryKey::from(crate::models::SALARY),
    }
}

pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        r#type: optional(sub, "type").and_then(parse_type),
        search: optional(sub, "search").map(str::to_string),
        category: optional(sub, "category").map(CategoryKey::from),
        start: optional(sub, "from").map(parse_date).transpose()?,
        end: optional(sub, "to").map(parse_date).transpose()?,
    })
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

pub fn query_rows<S: KeyValueStorage>(
    state: &AppState<S>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let filter = filter_from_args(sub)?;
    let lang = state.language();
    let mut found = analytics::search(state.transactions(), &filter, lang);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        found.truncate(*limit);
    }
    Ok(found
        .iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            title: labels::label(lang, &t.title).to_string(),
            category: category_name(state, &t.category),
            amount: fmt_signed(t, state.currency()),
            description: t.description.clone().unwrap_or_default(),
        })
        .collect())
}

pub fn category_name<S: KeyValueStorage>(state: &AppState<S>, key: &CategoryKey) -> String {
    match state.find_category(key) {
        Some(c) => labels::category_label(state.language(), c).to_string(),
        None => key.to_string(),
    }
}

fn list<S: KeyValueStorage>(state: &AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(state, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No transactions match.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date,
                    r.title,
                    r.category,
                    r.amount,
                    r.description,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Category", "Amount", "Description"],
                rows
            )
        );
    }
    Ok(())
}

fn show<S: KeyValueStorage>(state: &AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap_or(&0);
    let Some(tx) = state.transaction(id) else {
        bail!("Transaction {} not found", id);
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), tx)? {
        let rows = vec![
            vec!["ID".into(), tx.id.to_string()],
            vec!["Type".into(), tx.r#type.as_str().to_string()],
            vec!["Amount".into(), fmt_signed(tx, state.currency())],
            vec!["Date".into(), tx.date.to_string()],
            vec!["Category".into(), category_name(state, &tx.category)],
            vec![
                "Description".into(),
                tx.description.clone().unwrap_or_default(),
            ],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}

fn edit<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap_or(&0);
    let edit = TransactionEdit {
        amount: optional(sub, "amount").map(parse_decimal).transpose()?,
        date: optional(sub, "date").map(parse_date).transpose()?,
        category: optional(sub, "category").map(CategoryKey::from),
        description: sub.get_one::<String>("description").cloned(),
    };
    let tx = state.update_transaction(id, edit)?;
    println!("Updated transaction {} ({})", tx.id, fmt_signed(&tx, state.currency()));
    Ok(())
}

fn remove<S: KeyValueStorage>(state: &mut AppState<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap_or(&0);
    let tx = state.delete_transaction(id)?;
    println!("Deleted transaction {} from {}", tx.id, tx.date);
    Ok(())
}
