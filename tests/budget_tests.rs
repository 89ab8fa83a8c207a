// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pennywise::analytics::{
    self, TransactionFilter, budget_highlights, budget_overview, budget_percentage,
};
use pennywise::commands::dashboard;
use pennywise::defaults;
use pennywise::storage::MemoryStorage;
use pennywise::store::AppState;
use pennywise::models::{CategoryKey, Language, Transaction, TxType};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: i64, kind: TxType, amount: &str, day: &str, cat: &str) -> Transaction {
    Transaction::new(id, kind, dec(amount), date(day), CategoryKey::from(cat), None)
}

#[test]
fn overspent_category_caps_at_full() {
    let txs = vec![tx(1, TxType::Expense, "150", "2026-01-02", "cat_food")];
    let mut limits = defaults::budget_limits();
    limits.insert(CategoryKey::from("cat_food"), Decimal::from(100));
    let rows = budget_overview(&txs, &defaults::categories(), &limits, Language::En);
    let food = rows
        .iter()
        .find(|r| r.category.as_str() == "cat_food")
        .unwrap();
    assert_eq!(food.spent, Decimal::from(150));
    assert_eq!(food.percentage, Decimal::from(100));
    assert!(food.is_over_budget);
    assert_eq!(food.label, "Food");
}

#[test]
fn overview_leaves_out_salary() {
    let rows = budget_overview(
        &defaults::transactions(),
        &defaults::categories(),
        &defaults::budget_limits(),
        Language::En,
    );
    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|r| r.category.as_str() != "Salary"));
}

#[test]
fn zero_limit_reads_full_once_anything_is_spent() {
    assert_eq!(budget_percentage(dec("1"), Decimal::ZERO), Decimal::from(100));
    assert_eq!(budget_percentage(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(budget_percentage(dec("75"), dec("300")), Decimal::from(25));
}

#[test]
fn dashboard_shows_first_three_limited_categories() {
    let rows = budget_highlights(
        &defaults::transactions(),
        &defaults::categories(),
        &defaults::budget_limits(),
        Language::Tr,
        3,
    );
    let keys: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(keys, ["cat_food", "cat_transport", "cat_entertainment"]);
    assert_eq!(rows[0].label, "Yemek");
}

#[test]
fn totals_match_the_mock_month() {
    let txs = vec![
        tx(1, TxType::Income, "850", "2026-01-05", "cat_freelance"),
        tx(2, TxType::Expense, "145.20", "2026-01-04", "cat_food"),
    ];
    let t = analytics::totals(&txs);
    assert_eq!(t.income, dec("850"));
    assert_eq!(t.expense, dec("145.20"));
    assert_eq!(t.balance, dec("704.80"));
}

#[test]
fn search_sorts_newest_first_and_keeps_ties_stable() {
    let txs = vec![
        tx(1, TxType::Expense, "1", "2026-01-01", "cat_food"),
        tx(2, TxType::Expense, "2", "2026-01-03", "cat_food"),
        tx(3, TxType::Expense, "3", "2026-01-01", "cat_food"),
        tx(4, TxType::Income, "4", "2026-01-02", "Salary"),
    ];
    let all = analytics::search(&txs, &TransactionFilter::default(), Language::En);
    let ids: Vec<i64> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, [2, 4, 1, 3]);

    let filter = TransactionFilter {
        r#type: Some(TxType::Expense),
        start: Some(date("2026-01-02")),
        ..Default::default()
    };
    let ids: Vec<i64> = analytics::search(&txs, &filter, Language::En)
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, [2]);
}

#[test]
fn search_ignores_case() {
    let txs = defaults::transactions();
    let filter = TransactionFilter {
        search: Some("MORNING".into()),
        ..Default::default()
    };
    let found = analytics::search(&txs, &filter, Language::En);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 4);
}

#[test]
fn six_month_window_crosses_the_year() {
    let buckets = analytics::monthly_buckets(&defaults::transactions(), date("2026-01-15"), 6);
    let months: Vec<&str> = buckets.iter().map(|b| b.month.as_str()).collect();
    assert_eq!(
        months,
        ["2025-08", "2025-09", "2025-10", "2025-11", "2025-12", "2026-01"]
    );
    let jan = buckets.last().unwrap();
    assert_eq!(jan.income, dec("850"));
    assert_eq!(jan.expense, dec("145.20"));
    assert_eq!(buckets[3].expense, dec("624"));
}

#[test]
fn calendar_groups_by_day() {
    let days = analytics::group_by_day(&defaults::transactions());
    let dec3 = days.get(&date("2025-12-03")).unwrap();
    assert_eq!(dec3.items.len(), 2);
    assert_eq!(dec3.expense, dec("22.49"));
    assert_eq!(dec3.net(), dec("-22.49"));
    assert!(days.get(&date("2025-12-04")).is_none());
}

#[test]
fn subscription_countdown_wraps_on_thirty_days() {
    assert_eq!(analytics::days_until_billing(15, 10), 5);
    assert_eq!(analytics::days_until_billing(10, 10), 0);
    assert_eq!(analytics::days_until_billing(5, 20), 15);
    assert_eq!(analytics::days_until_billing(30, 31), 29);
    assert_eq!(
        analytics::monthly_subscription_cost(&defaults::subscriptions()),
        dec("55.97")
    );
}

#[test]
fn minute_limit_still_renders_the_overview() {
    let mut state = AppState::load(MemoryStorage::new()).unwrap();
    let food = CategoryKey::from("cat_food");
    state
        .set_budget_limit(&food, "0.0000000000000000000000000001")
        .unwrap();
    let rows = budget_overview(
        state.transactions(),
        state.categories(),
        state.budget_limits(),
        state.language(),
    );
    let row = rows.iter().find(|r| r.category == food).unwrap();
    assert_eq!(row.percentage, Decimal::from(100));
    assert!(row.is_over_budget);
    assert_eq!(dashboard::build(&state).budgets[0].percentage, Decimal::from(100));
}
