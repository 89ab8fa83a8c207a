// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session gating.
//!
//! A session comes either from the local demo flag or from an external
//! provider. The demo flag is checked first; while it is set the provider is
//! never consulted. Signing in as the demo user signs any provider session
//! out first, so the two sources never hold a session at the same time.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::storage::{KEY_AUTH_SESSION, KEY_DEMO_SESSION, KeyValueStorage};
use crate::utils::http_client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub const DEMO_EMAIL: &str = "demo@student.com";
pub const DEMO_PASSWORD: &str = "demo123";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub demo: bool,
}

impl Session {
    pub fn demo() -> Self {
        Self {
            user: User {
                id: None,
                email: DEMO_EMAIL.to_string(),
                created_at: None,
            },
            access_token: None,
            refresh_token: None,
            demo: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
}

pub type Listener = Box<dyn Fn(AuthEvent, Option<&Session>)>;
type ListenerList = RefCell<Vec<(u64, Listener)>>;

/// Registry of session-change callbacks.
#[derive(Default)]
pub struct SessionListeners {
    next: RefCell<u64>,
    list: Rc<ListenerList>,
}

impl SessionListeners {
    pub fn subscribe(&self, listener: Listener) -> AuthSubscription {
        let mut next = self.next.borrow_mut();
        *next += 1;
        let id = *next;
        self.list.borrow_mut().push((id, listener));
        AuthSubscription {
            id,
            list: Rc::downgrade(&self.list),
        }
    }

    pub fn emit(&self, event: AuthEvent, session: Option<&Session>) {
        for (_, listener) in self.list.borrow().iter() {
            listener(event, session);
        }
    }

    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`AuthProvider::on_auth_state_change`].
pub struct AuthSubscription {
    id: u64,
    list: Weak<ListenerList>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {
        if let Some(list) = self.list.upgrade() {
            list.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// The operations consumed from an external session provider.
pub trait AuthProvider {
    fn get_session(&self) -> Result<Option<Session>, AuthError>;
    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;
    fn update_password(&self, password: &str) -> Result<(), AuthError>;
    fn on_auth_state_change(&self, listener: Listener) -> AuthSubscription;
}

/// GoTrue (Supabase auth) over HTTP. The session is kept in storage between runs.
pub struct GoTrueProvider<S: KeyValueStorage> {
    config: AuthConfig,
    storage: S,
    listeners: SessionListeners,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: User,
}

impl<S: KeyValueStorage> GoTrueProvider<S> {
    pub fn new(config: AuthConfig, storage: S) -> Self {
        Self {
            config,
            storage,
            listeners: SessionListeners::default(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn stored(&self) -> Result<Option<Session>, AuthError> {
        let raw = self.storage.get(KEY_AUTH_SESSION)?;
        Ok(raw.and_then(|s| serde_json::from_str(&s).ok()))
    }

    fn access_token(&self) -> Result<String, AuthError> {
        self.stored()?
            .and_then(|s| s.access_token)
            .ok_or(AuthError::NoSession)
    }

    fn send(&self, req: reqwest::blocking::RequestBuilder) -> Result<Value, AuthError> {
        let resp = req
            .header("apikey", &self.config.api_key)
            .send()
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        let status = resp.status();
        let body: Value = resp.json().unwrap_or(Value::Null);
        if status.is_success() {
            Ok(body)
        } else {
            Err(AuthError::Provider(provider_message(&body, status.as_u16())))
        }
    }
}

/// Pulls the human-readable message out of a provider error body.
pub fn provider_message(body: &Value, status: u16) -> String {
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|k| body.get(*k).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Auth request failed with status {}", status))
}

impl<S: KeyValueStorage> AuthProvider for GoTrueProvider<S> {
    fn get_session(&self) -> Result<Option<Session>, AuthError> {
        self.stored()
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let client = http_client()?;
        let body = self.send(
            client
                .post(self.endpoint("token"))
                .query(&[("grant_type", "password")])
                .json(&json!({ "email": email, "password": password })),
        )?;
        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| AuthError::Provider(e.to_string()))?;
        let session = Session {
            user: token.user,
            access_token: Some(token.access_token),
            refresh_token: token.refresh_token,
            demo: false,
        };
        let raw = serde_json::to_string(&session).map_err(anyhow::Error::from)?;
        self.storage.set(KEY_AUTH_SESSION, &raw)?;
        self.listeners.emit(AuthEvent::SignedIn, Some(&session));
        Ok(session)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let client = http_client()?;
        self.send(
            client
                .post(self.endpoint("signup"))
                .json(&json!({ "email": email, "password": password })),
        )?;
        Ok(())
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if let Ok(token) = self.access_token() {
            let client = http_client()?;
            self.send(client.post(self.endpoint("logout")).bearer_auth(token))?;
        }
        self.storage.remove(KEY_AUTH_SESSION)?;
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn update_password(&self, password: &str) -> Result<(), AuthError> {
        let token = self.access_token()?;
        let client = http_client()?;
        self.send(
            client
                .put(self.endpoint("user"))
                .bearer_auth(token)
                .json(&json!({ "password": password })),
        )?;
        let session = self.stored()?;
        self.listeners.emit(AuthEvent::UserUpdated, session.as_ref());
        Ok(())
    }

    fn on_auth_state_change(&self, listener: Listener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}

/// Decides which session, if any, is active.
pub struct SessionGate<'a> {
    storage: &'a dyn KeyValueStorage,
    provider: Option<&'a dyn AuthProvider>,
}

impl<'a> SessionGate<'a> {
    pub fn new(storage: &'a dyn KeyValueStorage, provider: Option<&'a dyn AuthProvider>) -> Self {
        Self { storage, provider }
    }

    pub fn is_demo(&self) -> Result<bool, AuthError> {
        Ok(self
            .storage
            .get(KEY_DEMO_SESSION)?
            .is_some_and(|v| !v.is_empty()))
    }

    fn provider(&self) -> Result<&'a dyn AuthProvider, AuthError> {
        self.provider.ok_or(AuthError::NoProvider)
    }

    pub fn current(&self) -> Result<Option<Session>, AuthError> {
        if self.is_demo()? {
            if self.storage.get(KEY_AUTH_SESSION)?.is_some() {
                tracing::warn!("demo flag and provider session both present; using demo");
            }
            return Ok(Some(Session::demo()));
        }
        match self.provider {
            Some(p) => p.get_session(),
            None => Ok(None),
        }
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.trim() == DEMO_EMAIL && password == DEMO_PASSWORD {
            if let Some(p) = self.provider {
                if p.get_session()?.is_some() {
                    if let Err(err) = p.sign_out() {
                        tracing::warn!(%err, "provider sign-out failed; dropping local session");
                        self.storage.remove(KEY_AUTH_SESSION)?;
                    }
                }
            }
            self.storage.set(KEY_DEMO_SESSION, "true")?;
            tracing::info!("demo session started");
            return Ok(Session::demo());
        }
        let session = self.provider()?.sign_in_with_password(email.trim(), password)?;
        tracing::info!(email = %session.user.email, "signed in");
        Ok(session)
    }

    pub fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.provider()?.sign_up(email.trim(), password)
    }

    pub fn sign_out(&self) -> Result<(), AuthError> {
        if self.is_demo()? {
            self.storage.remove(KEY_DEMO_SESSION)?;
            tracing::info!("demo session ended");
            return Ok(());
        }
        self.provider()?.sign_out()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Validates the new password locally, then hands it to the provider.
    /// Demo sessions accept any valid password without a provider call.
    pub fn change_password(&self, new: &str, confirm: &str) -> Result<(), AuthError> {
        if new != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        if new.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.is_demo()? {
            return Ok(());
        }
        self.provider()?.update_password(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn unsubscribe_stops_delivery() {
        let listeners = SessionListeners::default();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = listeners.subscribe(Box::new(move |_, _| h.set(h.get() + 1)));
        listeners.emit(AuthEvent::SignedIn, None);
        sub.unsubscribe();
        listeners.emit(AuthEvent::SignedOut, None);
        assert_eq!(hits.get(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn provider_message_prefers_description() {
        let body = json!({"error": "invalid_grant", "error_description": "Invalid login credentials"});
        assert_eq!(provider_message(&body, 400), "Invalid login credentials");
        assert_eq!(
            provider_message(&Value::Null, 502),
            "Auth request failed with status 502"
        );
    }
}
