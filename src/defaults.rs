// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Seed data used whenever a stored collection is missing or unreadable.

use crate::models::{
    BudgetLimits, Category, CategoryColor, CategoryKey, Goal, GoalColor, Subscription,
    SubscriptionCategory, Transaction, TxType,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

pub const CURRENCY: &str = "$";
pub const CURRENCIES: &[&str] = &["$", "₺"];

static CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    use CategoryColor::*;
    [
        ("cat_food", Emerald),
        ("cat_transport", Blue),
        ("cat_entertainment", Violet),
        ("cat_rent", Amber),
        ("cat_health", Red),
        ("cat_edu", Indigo),
        ("cat_shopping", Pink),
        ("cat_gift", Teal),
        ("cat_freelance", Cyan),
        ("Salary", Green),
    ]
    .into_iter()
    .map(|(key, color)| Category {
        id: key.to_string(),
        name: CategoryKey::from(key),
        color,
        is_system: true,
    })
    .collect()
});

static LIMITS: Lazy<BudgetLimits> = Lazy::new(|| {
    [
        ("cat_food", 300),
        ("cat_entertainment", 100),
        ("cat_transport", 150),
        ("cat_shopping", 200),
        ("cat_rent", 600),
        ("cat_edu", 100),
    ]
    .into_iter()
    .map(|(k, v)| (CategoryKey::from(k), Decimal::from(v)))
    .collect()
});

static TRANSACTIONS: Lazy<Vec<Transaction>> = Lazy::new(|| {
    use TxType::*;
    [
        (1, Income, 85000, "2026-01-05", "cat_freelance", "Logo design for local coffee shop"),
        (2, Expense, 14520, "2026-01-04", "cat_food", "Trader Joes haul"),
        (3, Expense, 1599, "2025-12-03", "cat_entertainment", "Monthly subscription"),
        (4, Expense, 650, "2025-12-03", "cat_food", "Morning coffee"),
        (5, Expense, 2400, "2025-11-01", "cat_transport", "Ride to airport"),
        (6, Expense, 60000, "2025-11-01", "cat_rent", "November Rent"),
        (7, Income, 5000, "2025-10-28", "cat_gift", "Birthday money"),
        (8, Expense, 3240, "2025-10-25", "cat_health", "Vitamins"),
        (9, Expense, 8500, "2025-09-24", "cat_shopping", "Nike sale"),
        (10, Expense, 12000, "2025-08-20", "cat_edu", "Physics and Calculus books"),
    ]
    .into_iter()
    .filter_map(|(id, kind, cents, date, cat, desc)| {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let mut tx = Transaction::new(
            id,
            kind,
            Decimal::new(cents, 2),
            date,
            CategoryKey::from(cat),
            Some(desc.to_string()),
        );
        tx.title = format!("tx_{id}");
        Some(tx)
    })
    .collect()
});

static GOALS: Lazy<Vec<Goal>> = Lazy::new(|| {
    vec![
        Goal {
            id: 1,
            name: "goal_vacation".into(),
            target: Decimal::from(5000),
            current: Decimal::from(1500),
            color: GoalColor::Blue,
        },
        Goal {
            id: 2,
            name: "goal_laptop".into(),
            target: Decimal::from(15000),
            current: Decimal::from(8000),
            color: GoalColor::Purple,
        },
    ]
});

static SUBSCRIPTIONS: Lazy<Vec<Subscription>> = Lazy::new(|| {
    vec![
        Subscription {
            id: 1,
            name: "Netflix".into(),
            cost: Decimal::new(1599, 2),
            billing_day: 5,
            category: SubscriptionCategory::Entertainment,
        },
        Subscription {
            id: 2,
            name: "Spotify".into(),
            cost: Decimal::new(999, 2),
            billing_day: 15,
            category: SubscriptionCategory::Music,
        },
        Subscription {
            id: 3,
            name: "Adobe Creative Cloud".into(),
            cost: Decimal::new(2999, 2),
            billing_day: 1,
            category: SubscriptionCategory::Software,
        },
    ]
});

pub fn categories() -> Vec<Category> {
    CATEGORIES.clone()
}

pub fn budget_limits() -> BudgetLimits {
    LIMITS.clone()
}

pub fn transactions() -> Vec<Transaction> {
    TRANSACTIONS.clone()
}

pub fn goals() -> Vec<Goal> {
    GOALS.clone()
}

pub fn subscriptions() -> Vec<Subscription> {
    SUBSCRIPTIONS.clone()
}
