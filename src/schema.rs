// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Parsing of persisted collections.
//!
//! Each decoder returns `None` when the stored value should be replaced by
//! the default collection. Callers never surface these as errors.

use crate::models::{BudgetLimits, Category, Goal, Subscription, Transaction};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn parse_json(key: &str, raw: Option<&str>) -> Option<Value> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(key, %err, "stored value is not valid JSON");
            None
        }
    }
}

fn has_truthy_id(v: &Value) -> bool {
    match v.get("id") {
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        _ => false,
    }
}

/// Keeps the object entries that carry an id and parse as transactions.
///
/// Returns `None` only when the container itself is not an array.
pub fn sanitize_transactions(v: Value) -> Option<Vec<Transaction>> {
    let Value::Array(items) = v else {
        return None;
    };
    let total = items.len();
    let txs: Vec<Transaction> = items
        .into_iter()
        .filter(|item| item.is_object() && has_truthy_id(item))
        .filter_map(|item| serde_json::from_value::<Transaction>(item).ok())
        .map(Transaction::normalized)
        .collect();
    if txs.len() != total {
        tracing::warn!(dropped = total - txs.len(), "dropped malformed transactions");
    }
    Some(txs)
}

/// All-or-nothing: one bad entry discards the whole list.
pub fn strict_list<T: DeserializeOwned>(key: &str, v: Value) -> Option<Vec<T>> {
    if !v.is_array() {
        tracing::warn!(key, "stored value is not a list");
        return None;
    }
    match serde_json::from_value(v) {
        Ok(list) => Some(list),
        Err(err) => {
            tracing::warn!(key, %err, "stored list does not match its schema");
            None
        }
    }
}

pub fn categories(v: Value) -> Option<Vec<Category>> {
    strict_list(crate::storage::KEY_CATEGORIES, v)
}

/// Targets must be positive and savings non-negative.
pub fn goals(v: Value) -> Option<Vec<Goal>> {
    let goals: Vec<Goal> = strict_list(crate::storage::KEY_GOALS, v)?;
    if goals
        .iter()
        .any(|g| g.target <= Decimal::ZERO || g.current < Decimal::ZERO)
    {
        tracing::warn!("stored goals are out of range");
        return None;
    }
    Some(goals)
}

/// Every subscription must carry a cost and a non-zero billing day.
pub fn subscriptions(v: Value) -> Option<Vec<Subscription>> {
    let complete = v.as_array().is_some_and(|items| {
        items.iter().all(|s| {
            s.get("cost").is_some_and(|c| !c.is_null())
                && s.get("billingDay").is_some_and(|d| match d {
                    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                    Value::String(s) => !s.is_empty(),
                    _ => false,
                })
        })
    });
    if !complete {
        tracing::warn!("stored subscriptions are incomplete");
        return None;
    }
    strict_list(crate::storage::KEY_SUBSCRIPTIONS, v)
}

pub fn budget_limits(v: Value) -> Option<BudgetLimits> {
    if !v.is_object() {
        tracing::warn!("stored budget limits are not a map");
        return None;
    }
    match serde_json::from_value::<BudgetLimits>(v) {
        Ok(limits) => Some(limits),
        Err(err) => {
            tracing::warn!(%err, "stored budget limits do not match their schema");
            None
        }
    }
}

/// Plain or JSON-quoted string values (currency, language).
pub fn plain_string(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str::<String>(raw) {
        Ok(s) => Some(s),
        Err(_) => Some(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn drops_nulls_and_idless_entries() {
        let v = json!([
            null,
            42,
            {"title": "no id", "amount": -1, "type": "expense", "date": "2026-01-01", "category": "cat_food"},
            {"id": 0, "title": "zero id", "amount": -1, "type": "expense", "date": "2026-01-01", "category": "cat_food"},
            {"id": 5, "title": "ok", "amount": 10, "type": "expense", "date": "2026-01-01", "category": "cat_food"},
            {"id": 6, "title": "bad date", "amount": 10, "type": "income", "date": "soon", "category": "cat_gift"}
        ]);
        let txs = sanitize_transactions(v).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].id, 5);
        // sign follows the type
        assert!(txs[0].amount.is_sign_negative());
    }

    #[test]
    fn non_array_transactions_use_default() {
        assert!(sanitize_transactions(json!({"id": 1})).is_none());
    }

    #[test]
    fn incomplete_subscription_discards_list() {
        let v = json!([
            {"id": 1, "name": "A", "cost": 5, "billingDay": 2, "category": "music"},
            {"id": 2, "name": "B", "cost": 5, "billingDay": 0}
        ]);
        assert!(subscriptions(v).is_none());
    }

    #[test]
    fn out_of_range_goal_discards_list() {
        let ok = json!({"id": 1, "name": "A", "target": 100, "current": 0, "color": "blue"});
        assert_eq!(goals(json!([ok.clone()])).map(|g| g.len()), Some(1));
        let negative = json!({"id": 2, "name": "B", "target": 100, "current": -1, "color": "red"});
        assert!(goals(json!([ok.clone(), negative])).is_none());
        let no_target = json!({"id": 3, "name": "C", "target": 0, "color": "red"});
        assert!(goals(json!([ok, no_target])).is_none());
    }

    #[test]
    fn plain_strings_accept_both_forms() {
        assert_eq!(plain_string(Some("₺")).as_deref(), Some("₺"));
        assert_eq!(plain_string(Some("\"tr\"")).as_deref(), Some("tr"));
        assert_eq!(plain_string(Some("  ")), None);
    }
}
