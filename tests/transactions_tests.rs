// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pennywise::commands::{dashboard, reports, transactions};
use pennywise::models::TxType;
use pennywise::storage::MemoryStorage;
use pennywise::store::AppState;
use pennywise::{cli, utils};

fn setup() -> AppState<MemoryStorage> {
    AppState::load(MemoryStorage::new()).unwrap()
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["pennywise", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let state = setup();
    let rows = transactions::query_rows(&state, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2026-01-05");
    assert_eq!(rows[0].amount, "+$850.00");
    assert_eq!(rows[1].amount, "-$145.20");
}

#[test]
fn list_filters_by_type_and_range() {
    let state = setup();
    let rows = transactions::query_rows(
        &state,
        &list_matches(&["--type", "income", "--from", "2025-10-01", "--to", "2025-12-31"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 7);
    assert_eq!(rows[0].category, "Gift");

    let all = transactions::query_rows(&state, &list_matches(&["--type", "all"])).unwrap();
    assert_eq!(all.len(), 10);
}

#[test]
fn list_by_category_uses_display_labels() {
    let state = setup();
    let rows =
        transactions::query_rows(&state, &list_matches(&["--category", "cat_food"])).unwrap();
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, [2, 4]);
    assert!(rows.iter().all(|r| r.category == "Food"));
}

#[test]
fn add_defaults_to_expense() {
    let matches = cli::build_cli().get_matches_from(["pennywise", "tx", "add", "--amount", "3"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    assert_eq!(utils::required(add_m, "type").unwrap(), "expense");
    assert_eq!(
        transactions::default_category(TxType::Expense).as_str(),
        "cat_food"
    );
    assert_eq!(transactions::default_category(TxType::Income).as_str(), "Salary");
}

#[test]
fn dashboard_recent_is_five_newest() {
    let state = setup();
    let d = dashboard::build(&state);
    assert_eq!(d.recent.len(), 5);
    assert_eq!(d.recent[0].id, 1);
    assert_eq!(d.budgets.len(), 3);
}

#[test]
fn report_has_one_bucket_per_month() {
    let state = setup();
    let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
    let r = reports::build(&state, today, 6);
    assert_eq!(r.cashflow.len(), 6);
    assert_eq!(r.cashflow[0].month, "2025-08");
    assert!(r.spending.iter().all(|s| s.category.as_str() != "cat_freelance"));
}

#[test]
fn only_entry_routes_skip_the_session_check() {
    for route in ["init", "login", "register"] {
        assert!(!cli::requires_session(route), "{route}");
    }
    for route in ["help", "dashboard", "tx", "profile", "logout", "settings"] {
        assert!(cli::requires_session(route), "{route}");
    }
    let matches = cli::build_cli().get_matches_from(["pennywise", "help"]);
    assert_eq!(matches.subcommand_name(), Some("help"));
}
