// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of a category as stored on transactions and budget limits.
///
/// System categories use translation keys (`cat_food`), custom ones their
/// literal name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The income category, excluded from budget and spending views.
pub const SALARY: &str = "Salary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }

    /// Applies the sign convention: expenses are stored negative, income positive.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxType::Income => amount.abs(),
            TxType::Expense => -amount.abs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub amount: Decimal,
    pub r#type: TxType,
    #[serde(deserialize_with = "date_only")]
    pub date: NaiveDate,
    pub category: CategoryKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        id: i64,
        r#type: TxType,
        amount: Decimal,
        date: NaiveDate,
        category: CategoryKey,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            title: category.to_string(),
            amount: r#type.signed(amount),
            r#type,
            date,
            category,
            description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.r#type == TxType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TxType::Expense
    }

    /// Re-applies the sign of `r#type` to `amount`.
    pub fn normalized(mut self) -> Self {
        self.amount = self.r#type.signed(self.amount);
        self
    }
}

// Stored dates may carry a time component ("2026-01-05T10:00:00Z").
fn date_only<'de, D>(d: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    let day = s.split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(serde::de::Error::custom)
}

macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident, $fallback:ident, { $($variant:ident => $tag:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase", from = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($tag => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::parse(&s).unwrap_or($name::$fallback)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum!(
    /// Swatch shown next to a category.
    CategoryColor, Slate, {
        Slate => "slate",
        Emerald => "emerald",
        Blue => "blue",
        Violet => "violet",
        Amber => "amber",
        Red => "red",
        Indigo => "indigo",
        Pink => "pink",
        Teal => "teal",
        Cyan => "cyan",
        Orange => "orange",
        Lime => "lime",
        Fuchsia => "fuchsia",
        Sky => "sky",
        Green => "green",
    }
);

tag_enum!(GoalColor, Blue, {
    Blue => "blue",
    Green => "green",
    Purple => "purple",
    Orange => "orange",
    Pink => "pink",
    Red => "red",
});

tag_enum!(SubscriptionCategory, Other, {
    Entertainment => "entertainment",
    Music => "music",
    Utilities => "utilities",
    Software => "software",
    Gaming => "gaming",
    Shopping => "shopping",
    Education => "education",
    Other => "other",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: CategoryKey,
    pub color: CategoryColor,
    #[serde(default)]
    pub is_system: bool,
}

impl Category {
    pub fn key(&self) -> &CategoryKey {
        &self.name
    }

    pub fn is_salary(&self) -> bool {
        self.name.as_str() == SALARY
    }
}

pub type BudgetLimits = BTreeMap<CategoryKey, Decimal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target: Decimal,
    #[serde(default)]
    pub current: Decimal,
    pub color: GoalColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    pub cost: Decimal,
    pub billing_day: u32,
    #[serde(default = "other_subscription")]
    pub category: SubscriptionCategory,
}

fn other_subscription() -> SubscriptionCategory {
    SubscriptionCategory::Other
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Tr,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Tr => "tr",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "en" => Some(Language::En),
            "tr" => Some(Language::Tr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_amounts_are_stored_negative() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        let tx = Transaction::new(
            1,
            TxType::Expense,
            Decimal::new(14520, 2),
            d,
            "cat_food".into(),
            None,
        );
        assert_eq!(tx.amount, Decimal::new(-14520, 2));
        assert_eq!(tx.title, "cat_food");
    }

    #[test]
    fn datetime_strings_keep_only_the_day() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":7,"title":"t","amount":50,"type":"income","date":"2025-10-28T09:30:00.000Z","category":"cat_gift"}"#,
        )
        .unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 10, 28).unwrap());
        assert!(tx.description.is_none());
    }

    #[test]
    fn unknown_tags_fall_back() {
        let sub: Subscription = serde_json::from_str(
            r#"{"id":1,"name":"Gym","cost":20,"billingDay":3,"category":"fitness"}"#,
        )
        .unwrap();
        assert_eq!(sub.category, SubscriptionCategory::Other);
        assert_eq!(CategoryColor::from("nope".to_string()), CategoryColor::Slate);
        assert_eq!(GoalColor::parse(" Purple "), Some(GoalColor::Purple));
    }
}
