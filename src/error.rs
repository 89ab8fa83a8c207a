// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections raised by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Category '{0}' is a system category and cannot be deleted")]
    SystemCategory(String),

    #[error("Category '{name}' is still used by {count} transaction(s)")]
    CategoryInUse { name: String, count: usize },

    #[error("Category '{0}' already exists")]
    CategoryExists(String),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Failures at the auth boundary.
///
/// Provider messages are shown to the user exactly as the provider sent them.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Provider(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),

    #[error("Not signed in")]
    NoSession,

    #[error("No auth provider configured; set PENNYWISE_AUTH_URL and PENNYWISE_AUTH_KEY or use the demo account")]
    NoProvider,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
