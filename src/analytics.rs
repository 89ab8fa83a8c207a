// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived values computed from the current collections.
//!
//! Everything here is a pure linear scan; nothing is cached between calls.

use crate::labels;
use crate::models::{
    BudgetLimits, Category, CategoryKey, Goal, Language, Subscription, Transaction, TxType,
};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let income: Decimal = txs.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expense: Decimal = txs
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum();
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

pub fn category_spent(txs: &[Transaction], category: &CategoryKey) -> Decimal {
    txs.iter()
        .filter(|t| t.is_expense() && &t.category == category)
        .map(|t| t.amount.abs())
        .sum()
}

/// Share of `limit` consumed by `spent`, clamped to 0..=100.
///
/// A zero limit reads as fully used as soon as anything is spent.
pub fn budget_percentage(spent: Decimal, limit: Decimal) -> Decimal {
    if limit > Decimal::ZERO {
        clamped_percent(spent, limit)
    } else if spent > Decimal::ZERO {
        HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// `part / whole` as a percentage in 0..=100. `whole` must be positive.
///
/// Ratios too large for `Decimal` saturate at 100.
fn clamped_percent(part: Decimal, whole: Decimal) -> Decimal {
    match part.checked_div(whole).and_then(|r| r.checked_mul(HUNDRED)) {
        Some(p) => p.clamp(Decimal::ZERO, HUNDRED),
        None if part.is_sign_negative() => Decimal::ZERO,
        None => HUNDRED,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: CategoryKey,
    pub label: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percentage: Decimal,
    pub is_over_budget: bool,
}

fn budget_status(
    txs: &[Transaction],
    limits: &BudgetLimits,
    cat: &Category,
    lang: Language,
) -> BudgetStatus {
    let limit = limits.get(cat.key()).copied().unwrap_or_default();
    let spent = category_spent(txs, cat.key());
    BudgetStatus {
        category: cat.key().clone(),
        label: labels::category_label(lang, cat).to_string(),
        limit,
        spent,
        percentage: budget_percentage(spent, limit),
        is_over_budget: spent > limit,
    }
}

/// One row per spending category; the income category is left out.
pub fn budget_overview(
    txs: &[Transaction],
    categories: &[Category],
    limits: &BudgetLimits,
    lang: Language,
) -> Vec<BudgetStatus> {
    categories
        .iter()
        .filter(|c| !c.is_salary())
        .map(|c| budget_status(txs, limits, c, lang))
        .collect()
}

/// Dashboard summary: the first `n` categories carrying a positive limit.
pub fn budget_highlights(
    txs: &[Transaction],
    categories: &[Category],
    limits: &BudgetLimits,
    lang: Language,
    n: usize,
) -> Vec<BudgetStatus> {
    categories
        .iter()
        .filter(|c| limits.get(c.key()).is_some_and(|l| *l > Decimal::ZERO))
        .take(n)
        .map(|c| budget_status(txs, limits, c, lang))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub category: CategoryKey,
    pub label: String,
    pub value: Decimal,
}

/// Expense totals per spending category, omitting empty ones.
pub fn expense_breakdown(
    txs: &[Transaction],
    categories: &[Category],
    lang: Language,
) -> Vec<CategorySlice> {
    categories
        .iter()
        .filter(|c| !c.is_salary())
        .map(|c| CategorySlice {
            category: c.key().clone(),
            label: labels::category_label(lang, c).to_string(),
            value: category_spent(txs, c.key()),
        })
        .filter(|s| s.value > Decimal::ZERO)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub items: Vec<Transaction>,
}

impl DaySummary {
    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

pub fn group_by_day(txs: &[Transaction]) -> BTreeMap<NaiveDate, DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
    for tx in txs {
        let day = days.entry(tx.date).or_default();
        match tx.r#type {
            TxType::Expense => day.expense += tx.amount.abs(),
            TxType::Income => day.income += tx.amount.abs(),
        }
        day.items.push(tx.clone());
    }
    days
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Income and expense for the trailing `months` calendar months ending at
/// `today`'s month, oldest first.
pub fn monthly_buckets(txs: &[Transaction], today: NaiveDate, months: u32) -> Vec<MonthBucket> {
    let first_of_month = today.with_day(1).unwrap_or(today);
    (0..months)
        .rev()
        .filter_map(|back| first_of_month.checked_sub_months(Months::new(back)))
        .map(|start| {
            let in_month = txs
                .iter()
                .filter(|t| t.date.year() == start.year() && t.date.month() == start.month());
            let (income, expense) =
                in_month.fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.r#type {
                    TxType::Income => (inc + t.amount, exp),
                    TxType::Expense => (inc, exp + t.amount.abs()),
                });
            MonthBucket {
                month: start.format("%Y-%m").to_string(),
                label: start.format("%b %Y").to_string(),
                income: income.round_dp(2),
                expense: expense.round_dp(2),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub r#type: Option<TxType>,
    pub search: Option<String>,
    pub category: Option<CategoryKey>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction, lang: Language) -> bool {
        if self.r#type.is_some_and(|t| t != tx.r#type) {
            return false;
        }
        if let Some(ref needle) = self.search {
            let needle = needle.to_lowercase();
            let hay = [
                tx.description.as_deref().unwrap_or_default(),
                tx.title.as_str(),
                labels::label(lang, &tx.title),
                tx.category.as_str(),
            ];
            if !hay.iter().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        if self.category.as_ref().is_some_and(|c| c != &tx.category) {
            return false;
        }
        if self.start.is_some_and(|s| tx.date < s) {
            return false;
        }
        if self.end.is_some_and(|e| tx.date > e) {
            return false;
        }
        true
    }
}

/// Matching transactions, newest first. Equal dates keep their stored order.
pub fn search(txs: &[Transaction], filter: &TransactionFilter, lang: Language) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = txs
        .iter()
        .filter(|t| filter.matches(t, lang))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

pub fn recent(txs: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut out = txs.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(n);
    out
}

pub fn goal_percentage(goal: &Goal) -> Decimal {
    if goal.target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    clamped_percent(goal.current, goal.target)
}

pub fn goal_reached(goal: &Goal) -> bool {
    goal.current >= goal.target
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalTotals {
    pub saved: Decimal,
    pub target: Decimal,
}

pub fn goal_totals(goals: &[Goal]) -> GoalTotals {
    GoalTotals {
        saved: goals.iter().map(|g| g.current).sum(),
        target: goals.iter().map(|g| g.target).sum(),
    }
}

pub fn monthly_subscription_cost(subs: &[Subscription]) -> Decimal {
    subs.iter().map(|s| s.cost).sum()
}

/// Days until the next charge, on a flat 30-day month.
pub fn days_until_billing(billing_day: u32, today: u32) -> u32 {
    let day = billing_day.max(1);
    if day >= today {
        day - today
    } else {
        30 + day - today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GoalColor;
    use std::str::FromStr;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tx(id: i64, t: TxType, amount: &str, date: &str, cat: &str) -> Transaction {
        Transaction::new(id, t, dec(amount), d(date), cat.into(), None)
    }

    #[test]
    fn totals_example() {
        let txs = vec![
            tx(1, TxType::Income, "850.00", "2026-01-05", "cat_freelance"),
            tx(2, TxType::Expense, "145.20", "2026-01-04", "cat_food"),
        ];
        let t = totals(&txs);
        assert_eq!(format!("{:.2}", t.income), "850.00");
        assert_eq!(format!("{:.2}", t.expense), "145.20");
        assert_eq!(format!("{:.2}", t.balance), "704.80");
    }

    #[test]
    fn tiny_denominators_saturate() {
        let tiny = dec("0.0000000000000000000000000001");
        assert_eq!(budget_percentage(dec("150"), tiny), HUNDRED);
        assert_eq!(budget_percentage(Decimal::ZERO, tiny), Decimal::ZERO);
        let goal = Goal {
            id: 9,
            name: "Pin".into(),
            target: tiny,
            current: dec("3"),
            color: GoalColor::Red,
        };
        assert_eq!(goal_percentage(&goal), HUNDRED);
    }

    #[test]
    fn percentage_is_clamped() {
        assert_eq!(budget_percentage(dec("150"), dec("100")), HUNDRED);
        assert_eq!(budget_percentage(dec("5"), Decimal::ZERO), HUNDRED);
        assert_eq!(budget_percentage(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(budget_percentage(dec("25"), dec("100")), dec("25"));
    }

    #[test]
    fn calendar_groups_by_day() {
        let txs = vec![
            tx(1, TxType::Expense, "15.99", "2025-12-03", "cat_entertainment"),
            tx(2, TxType::Expense, "6.50", "2025-12-03", "cat_food"),
            tx(3, TxType::Income, "50", "2025-12-03", "cat_gift"),
        ];
        let days = group_by_day(&txs);
        let day = &days[&d("2025-12-03")];
        assert_eq!(day.expense, dec("22.49"));
        assert_eq!(day.income, dec("50"));
        assert_eq!(day.net(), dec("27.51"));
        assert_eq!(day.items.len(), 3);
    }

    #[test]
    fn six_month_window_crosses_year() {
        let txs = vec![
            tx(1, TxType::Income, "850", "2026-01-05", "cat_freelance"),
            tx(2, TxType::Expense, "600", "2025-11-01", "cat_rent"),
            tx(3, TxType::Expense, "120", "2025-07-20", "cat_edu"),
        ];
        let buckets = monthly_buckets(&txs, d("2026-01-17"), 6);
        let keys: Vec<_> = buckets.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(
            keys,
            ["2025-08", "2025-09", "2025-10", "2025-11", "2025-12", "2026-01"]
        );
        assert_eq!(buckets[3].expense, dec("600"));
        assert_eq!(buckets[5].income, dec("850"));
        assert_eq!(buckets[5].label, "Jan 2026");
    }

    #[test]
    fn sort_is_stable_on_equal_dates() {
        let txs = vec![
            tx(1, TxType::Expense, "1", "2025-11-01", "a"),
            tx(2, TxType::Expense, "1", "2026-01-01", "a"),
            tx(3, TxType::Expense, "1", "2025-11-01", "a"),
        ];
        let ids: Vec<i64> = recent(&txs, 5).iter().map(|t| t.id).collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn goal_progress_caps_at_full() {
        let goal = Goal {
            id: 2,
            name: "goal_laptop".into(),
            target: dec("15000"),
            current: dec("16000"),
            color: GoalColor::Purple,
        };
        assert_eq!(goal_percentage(&goal), HUNDRED);
        assert!(goal_reached(&goal));
    }

    #[test]
    fn billing_countdown_wraps() {
        assert_eq!(days_until_billing(15, 10), 5);
        assert_eq!(days_until_billing(10, 10), 0);
        assert_eq!(days_until_billing(5, 17), 18);
    }
}
