// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Login, registration and the profile page.

use crate::analytics;
use crate::auth::{Session, SessionGate};
use crate::storage::KeyValueStorage;
use crate::store::AppState;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, required};
use anyhow::Result;
use serde::Serialize;

pub fn login(gate: &SessionGate<'_>, m: &clap::ArgMatches) -> Result<()> {
    let session = gate.sign_in(required(m, "email")?, required(m, "password")?)?;
    if session.demo {
        println!("Signed in to the demo account.");
    } else {
        println!("Signed in as {}", session.user.email);
    }
    Ok(())
}

pub fn register(gate: &SessionGate<'_>, m: &clap::ArgMatches) -> Result<()> {
    gate.sign_up(required(m, "email")?, required(m, "password")?)?;
    println!("Check your email for the confirmation link, then run `pennywise login`.");
    Ok(())
}

pub fn logout(gate: &SessionGate<'_>) -> Result<()> {
    gate.sign_out()?;
    println!("Signed out.");
    Ok(())
}

#[derive(Serialize)]
struct Profile<'a> {
    email: &'a str,
    username: &'a str,
    member_since: Option<&'a str>,
    demo: bool,
    total_spent: rust_decimal::Decimal,
    transactions: usize,
}

pub fn profile<S: KeyValueStorage>(
    state: &AppState<S>,
    gate: &SessionGate<'_>,
    session: &Session,
    m: &clap::ArgMatches,
) -> Result<()> {
    if let Some(("passwd", sub)) = m.subcommand() {
        gate.change_password(required(sub, "new")?, required(sub, "confirm")?)?;
        println!("Password updated.");
        return Ok(());
    }
    let email = session.user.email.as_str();
    let p = Profile {
        email,
        username: email.split('@').next().unwrap_or(email),
        member_since: session.user.created_at.as_deref(),
        demo: session.demo,
        total_spent: analytics::totals(state.transactions()).expense,
        transactions: state.transactions().len(),
    };
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &p)? {
        println!(
            "{}",
            pretty_table(
                &["Field", "Value"],
                vec![
                    vec!["User".into(), p.username.to_string()],
                    vec!["Email".into(), p.email.to_string()],
                    vec![
                        "Member since".into(),
                        p.member_since.unwrap_or("-").to_string()
                    ],
                    vec!["Transactions".into(), p.transactions.to_string()],
                    vec![
                        "Total spent".into(),
                        fmt_money(&p.total_spent, state.currency())
                    ],
                ],
            )
        );
    }
    Ok(())
}

pub fn help() {
    let tips = [
        ("Record spending", "pennywise tx add --amount 12.50 --category cat_food"),
        ("Record income", "pennywise tx add --type income --amount 850 --category Salary"),
        ("Search", "pennywise tx list --search coffee --from 2025-12-01"),
        ("Set a limit", "pennywise budget set --category cat_food --amount 300"),
        ("Save toward a goal", "pennywise goal deposit <id> --amount 100"),
        ("Custom categories", "pennywise category add --name Gaming --color lime"),
        ("Change password", "pennywise profile passwd --new <pw> --confirm <pw>"),
    ];
    let rows = tips
        .iter()
        .map(|(what, how)| vec![what.to_string(), how.to_string()])
        .collect();
    println!("{}", pretty_table(&["Task", "Command"], rows));
}
