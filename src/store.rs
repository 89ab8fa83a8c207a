// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application state and its persisted mutations.
//!
//! `AppState` owns one in-memory copy of every collection. Each mutation
//! updates memory first and then writes the whole collection back through
//! the storage adapter, overwriting what was there.

use crate::defaults;
use crate::error::StoreError;
use crate::labels;
use crate::models::{
    BudgetLimits, Category, CategoryColor, CategoryKey, Goal, GoalColor, Language, Subscription,
    SubscriptionCategory, Transaction, TxType,
};
use crate::schema;
use crate::storage::{
    KEY_BUDGET_LIMITS, KEY_CATEGORIES, KEY_CURRENCY, KEY_GOALS, KEY_LANGUAGE, KEY_SUBSCRIPTIONS,
    KEY_TRANSACTIONS, KeyValueStorage,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub r#type: TxType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: CategoryKey,
    pub description: Option<String>,
}

/// Fields that may change on an existing transaction. `None` keeps the old value.
#[derive(Debug, Clone, Default)]
pub struct TransactionEdit {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<CategoryKey>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GoalDraft {
    pub name: String,
    pub target: Decimal,
    pub color: GoalColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepositOutcome {
    pub goal: Goal,
    /// The deposit moved the goal from below its target to at or above it.
    pub just_reached: bool,
}

#[derive(Debug, Clone)]
pub struct SubscriptionDraft {
    pub name: String,
    pub cost: Decimal,
    pub billing_day: u32,
    pub category: SubscriptionCategory,
}

pub struct AppState<S: KeyValueStorage> {
    storage: S,
    currency: String,
    language: Language,
    categories: Vec<Category>,
    budget_limits: BudgetLimits,
    transactions: Vec<Transaction>,
    goals: Vec<Goal>,
    subscriptions: Vec<Subscription>,
}

impl<S: KeyValueStorage> AppState<S> {
    /// Reads every collection, substituting defaults for anything missing or unreadable.
    ///
    /// Only failures of the storage medium itself are reported.
    pub fn load(storage: S) -> anyhow::Result<Self> {
        let currency = schema::plain_string(storage.get(KEY_CURRENCY)?.as_deref())
            .unwrap_or_else(|| defaults::CURRENCY.to_string());
        let language = schema::plain_string(storage.get(KEY_LANGUAGE)?.as_deref())
            .and_then(|s| Language::parse(&s))
            .unwrap_or_default();

        let categories = schema::parse_json(KEY_CATEGORIES, storage.get(KEY_CATEGORIES)?.as_deref())
            .and_then(schema::categories)
            .unwrap_or_else(defaults::categories);
        let budget_limits =
            schema::parse_json(KEY_BUDGET_LIMITS, storage.get(KEY_BUDGET_LIMITS)?.as_deref())
                .and_then(schema::budget_limits)
                .unwrap_or_else(defaults::budget_limits);
        let transactions =
            schema::parse_json(KEY_TRANSACTIONS, storage.get(KEY_TRANSACTIONS)?.as_deref())
                .and_then(schema::sanitize_transactions)
                .unwrap_or_else(defaults::transactions);
        let goals = schema::parse_json(KEY_GOALS, storage.get(KEY_GOALS)?.as_deref())
            .and_then(schema::goals)
            .unwrap_or_else(defaults::goals);
        let subscriptions =
            schema::parse_json(KEY_SUBSCRIPTIONS, storage.get(KEY_SUBSCRIPTIONS)?.as_deref())
                .and_then(schema::subscriptions)
                .unwrap_or_else(defaults::subscriptions);

        tracing::debug!(
            transactions = transactions.len(),
            categories = categories.len(),
            goals = goals.len(),
            subscriptions = subscriptions.len(),
            "state loaded"
        );

        Ok(Self {
            storage,
            currency,
            language,
            categories,
            budget_limits,
            transactions,
            goals,
            subscriptions,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budget_limits(&self) -> &BudgetLimits {
        &self.budget_limits
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let json =
            serde_json::to_string(value).map_err(|source| StoreError::Serialize { key, source })?;
        self.storage.set(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "persisted");
        Ok(())
    }

    /// Millisecond timestamp, bumped past `taken` so ids stay unique.
    fn next_id(taken: impl Iterator<Item = i64>) -> i64 {
        let now = Utc::now().timestamp_millis();
        match taken.max() {
            Some(max) if max >= now => max + 1,
            _ => now,
        }
    }

    // ---- settings ----

    pub fn set_currency(&mut self, symbol: &str) -> StoreResult<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(StoreError::invalid("currency", "must not be empty"));
        }
        self.currency = symbol.to_string();
        self.storage.set(KEY_CURRENCY, &self.currency)?;
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) -> StoreResult<()> {
        self.language = language;
        self.storage.set(KEY_LANGUAGE, language.as_str())?;
        Ok(())
    }

    // ---- transactions ----

    pub fn find_category(&self, key: &CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key() == key)
    }

    fn require_category(&self, key: &CategoryKey) -> StoreResult<()> {
        match self.find_category(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found("Category", key)),
        }
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// Records a new transaction at the front of the list.
    pub fn add_transaction(&mut self, new: NewTransaction) -> StoreResult<Transaction> {
        if new.amount.is_zero() {
            return Err(StoreError::invalid("amount", "must not be zero"));
        }
        self.require_category(&new.category)?;
        let id = Self::next_id(self.transactions.iter().map(|t| t.id));
        let description = new.description.filter(|d| !d.trim().is_empty());
        let tx = Transaction::new(id, new.r#type, new.amount, new.date, new.category, description);
        self.transactions.insert(0, tx.clone());
        self.persist(KEY_TRANSACTIONS, &self.transactions)?;
        tracing::debug!(id, kind = tx.r#type.as_str(), "transaction added");
        Ok(tx)
    }

    pub fn update_transaction(&mut self, id: i64, edit: TransactionEdit) -> StoreResult<Transaction> {
        if let Some(ref cat) = edit.category {
            self.require_category(cat)?;
        }
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Transaction", id))?;
        if let Some(amount) = edit.amount {
            tx.amount = tx.r#type.signed(amount);
        }
        if let Some(date) = edit.date {
            tx.date = date;
        }
        if let Some(category) = edit.category {
            tx.category = category;
        }
        if let Some(description) = edit.description {
            tx.description = Some(description).filter(|d| !d.trim().is_empty());
        }
        let updated = tx.clone();
        self.persist(KEY_TRANSACTIONS, &self.transactions)?;
        Ok(updated)
    }

    /// Removes the transaction with `id`; the others keep their order.
    pub fn delete_transaction(&mut self, id: i64) -> StoreResult<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::not_found("Transaction", id))?;
        let removed = self.transactions.remove(pos);
        self.persist(KEY_TRANSACTIONS, &self.transactions)?;
        Ok(removed)
    }

    /// Replaces the whole list, dropping id-less entries and fixing signs.
    pub fn replace_transactions(&mut self, txs: Vec<Transaction>) -> StoreResult<()> {
        self.transactions = txs
            .into_iter()
            .filter(|t| t.id != 0)
            .map(Transaction::normalized)
            .collect();
        self.persist(KEY_TRANSACTIONS, &self.transactions)
    }

    // ---- categories ----

    /// Adds a custom category. Names clash case-insensitively with both the
    /// stored key and any display label of existing categories.
    pub fn add_category(&mut self, name: &str, color: CategoryColor) -> StoreResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid("name", "must not be empty"));
        }
        let wanted = name.to_lowercase();
        let clash = self.categories.iter().any(|c| {
            c.name.as_str().to_lowercase() == wanted
                || labels::all_labels(c.name.as_str())
                    .iter()
                    .any(|l| l.to_lowercase() == wanted)
        });
        if clash {
            return Err(StoreError::CategoryExists(name.to_string()));
        }
        let cat = Category {
            id: format!("cat_{}", Utc::now().timestamp_millis()),
            name: CategoryKey::new(name),
            color,
            is_system: false,
        };
        self.categories.push(cat.clone());
        self.persist(KEY_CATEGORIES, &self.categories)?;
        Ok(cat)
    }

    fn category_index(&self, id_or_name: &str) -> StoreResult<usize> {
        self.categories
            .iter()
            .position(|c| c.id == id_or_name)
            .or_else(|| {
                self.categories
                    .iter()
                    .position(|c| c.name.as_str() == id_or_name)
            })
            .ok_or_else(|| StoreError::not_found("Category", id_or_name))
    }

    pub fn set_category_color(&mut self, id_or_name: &str, color: CategoryColor) -> StoreResult<()> {
        let idx = self.category_index(id_or_name)?;
        self.categories[idx].color = color;
        self.persist(KEY_CATEGORIES, &self.categories)
    }

    /// Deletes a custom category that no transaction references, along with its limit.
    pub fn delete_category(&mut self, id_or_name: &str) -> StoreResult<Category> {
        let idx = self.category_index(id_or_name)?;
        let cat = &self.categories[idx];
        if cat.is_system {
            return Err(StoreError::SystemCategory(cat.name.to_string()));
        }
        let count = self
            .transactions
            .iter()
            .filter(|t| &t.category == cat.key())
            .count();
        if count > 0 {
            return Err(StoreError::CategoryInUse {
                name: cat.name.to_string(),
                count,
            });
        }
        let removed = self.categories.remove(idx);
        self.persist(KEY_CATEGORIES, &self.categories)?;
        if self.budget_limits.remove(removed.key()).is_some() {
            self.persist(KEY_BUDGET_LIMITS, &self.budget_limits)?;
        }
        Ok(removed)
    }

    // ---- budget limits ----

    /// Sets a limit from raw user input. Unparsable input reads as 0 and
    /// negative values are clamped to 0.
    pub fn set_budget_limit(&mut self, category: &CategoryKey, raw: &str) -> StoreResult<Decimal> {
        self.require_category(category)?;
        let limit = raw
            .trim()
            .parse::<Decimal>()
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        self.budget_limits.insert(category.clone(), limit);
        self.persist(KEY_BUDGET_LIMITS, &self.budget_limits)?;
        Ok(limit)
    }

    // ---- goals ----

    fn validate_goal(draft: &GoalDraft) -> StoreResult<()> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::invalid("name", "must not be empty"));
        }
        if draft.target <= Decimal::ZERO {
            return Err(StoreError::invalid("target", "must be positive"));
        }
        Ok(())
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> StoreResult<Goal> {
        Self::validate_goal(&draft)?;
        let goal = Goal {
            id: Self::next_id(self.goals.iter().map(|g| g.id)),
            name: draft.name.trim().to_string(),
            target: draft.target,
            current: Decimal::ZERO,
            color: draft.color,
        };
        self.goals.push(goal.clone());
        self.persist(KEY_GOALS, &self.goals)?;
        Ok(goal)
    }

    pub fn edit_goal(&mut self, id: i64, draft: GoalDraft) -> StoreResult<Goal> {
        Self::validate_goal(&draft)?;
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("Goal", id))?;
        goal.name = draft.name.trim().to_string();
        goal.target = draft.target;
        goal.color = draft.color;
        let updated = goal.clone();
        self.persist(KEY_GOALS, &self.goals)?;
        Ok(updated)
    }

    pub fn deposit(&mut self, id: i64, amount: Decimal) -> StoreResult<DepositOutcome> {
        if amount.is_zero() {
            return Err(StoreError::invalid("amount", "must not be zero"));
        }
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("Goal", id))?;
        let Some(current) = goal
            .current
            .checked_add(amount)
            .filter(|c| *c >= Decimal::ZERO)
        else {
            return Err(StoreError::invalid("amount", "would take savings below zero"));
        };
        let was_below = goal.current < goal.target;
        goal.current = current;
        let just_reached = was_below && goal.current >= goal.target;
        let goal = goal.clone();
        self.persist(KEY_GOALS, &self.goals)?;
        if just_reached {
            tracing::info!(id, "goal reached");
        }
        Ok(DepositOutcome { goal, just_reached })
    }

    pub fn delete_goal(&mut self, id: i64) -> StoreResult<Goal> {
        let pos = self
            .goals
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| StoreError::not_found("Goal", id))?;
        let removed = self.goals.remove(pos);
        self.persist(KEY_GOALS, &self.goals)?;
        Ok(removed)
    }

    // ---- subscriptions ----

    fn validate_subscription(draft: &SubscriptionDraft) -> StoreResult<()> {
        if draft.name.trim().is_empty() {
            return Err(StoreError::invalid("name", "must not be empty"));
        }
        if draft.cost <= Decimal::ZERO {
            return Err(StoreError::invalid("cost", "must be positive"));
        }
        if !(1..=31).contains(&draft.billing_day) {
            return Err(StoreError::invalid("billing day", "must be between 1 and 31"));
        }
        Ok(())
    }

    pub fn add_subscription(&mut self, draft: SubscriptionDraft) -> StoreResult<Subscription> {
        Self::validate_subscription(&draft)?;
        let sub = Subscription {
            id: Self::next_id(self.subscriptions.iter().map(|s| s.id)),
            name: draft.name.trim().to_string(),
            cost: draft.cost,
            billing_day: draft.billing_day,
            category: draft.category,
        };
        self.subscriptions.push(sub.clone());
        self.persist(KEY_SUBSCRIPTIONS, &self.subscriptions)?;
        Ok(sub)
    }

    pub fn edit_subscription(&mut self, id: i64, draft: SubscriptionDraft) -> StoreResult<Subscription> {
        Self::validate_subscription(&draft)?;
        let sub = self
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Subscription", id))?;
        sub.name = draft.name.trim().to_string();
        sub.cost = draft.cost;
        sub.billing_day = draft.billing_day;
        sub.category = draft.category;
        let updated = sub.clone();
        self.persist(KEY_SUBSCRIPTIONS, &self.subscriptions)?;
        Ok(updated)
    }

    pub fn delete_subscription(&mut self, id: i64) -> StoreResult<Subscription> {
        let pos = self
            .subscriptions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("Subscription", id))?;
        let removed = self.subscriptions.remove(pos);
        self.persist(KEY_SUBSCRIPTIONS, &self.subscriptions)?;
        Ok(removed)
    }
}
