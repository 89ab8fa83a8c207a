// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display labels for the seeded translation keys.
//!
//! Only keys that appear in stored data are covered: system categories and
//! the default goals. Anything else is shown as-is.

use crate::models::{Category, Language};

const LABELS: &[(&str, &str, &str)] = &[
    ("cat_food", "Food", "Yemek"),
    ("cat_transport", "Transport", "Ulaşım"),
    ("cat_entertainment", "Entertainment", "Eğlence"),
    ("cat_rent", "Rent", "Kira"),
    ("cat_health", "Health", "Sağlık"),
    ("cat_edu", "Education", "Eğitim"),
    ("cat_shopping", "Shopping", "Alışveriş"),
    ("cat_gift", "Gift", "Hediye"),
    ("cat_freelance", "Freelance", "Serbest Çalışma"),
    ("Salary", "Salary", "Maaş"),
    ("goal_vacation", "Vacation", "Tatil"),
    ("goal_laptop", "New Laptop", "Yeni Bilgisayar"),
];

pub fn label<'a>(lang: Language, key: &'a str) -> &'a str {
    LABELS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, en, tr)| match lang {
            Language::En => *en,
            Language::Tr => *tr,
        })
        .unwrap_or(key)
}

/// System categories are labelled through the table; custom ones use their literal name.
pub fn category_label<'a>(lang: Language, cat: &'a Category) -> &'a str {
    if cat.is_system {
        label(lang, cat.name.as_str())
    } else {
        cat.name.as_str()
    }
}

/// Every label a key is known by, in any language.
pub fn all_labels(key: &str) -> Vec<&str> {
    match LABELS.iter().find(|(k, _, _)| *k == key) {
        Some((_, en, tr)) => vec![*en, *tr],
        None => Vec::new(),
    }
}
