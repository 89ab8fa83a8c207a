// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pennywise::auth::{
    AuthEvent, AuthProvider, AuthSubscription, Listener, Session, SessionGate,
    SessionListeners, User,
};
use pennywise::error::AuthError;
use pennywise::storage::{KEY_AUTH_SESSION, KEY_DEMO_SESSION, KeyValueStorage, MemoryStorage};
use std::cell::{Cell, RefCell};

/// Provider double that accepts one fixed account.
#[derive(Default)]
struct FakeProvider {
    session: RefCell<Option<Session>>,
    sign_outs: Cell<u32>,
    offline: Cell<bool>,
    password_updates: RefCell<Vec<String>>,
    listeners: SessionListeners,
}

impl FakeProvider {
    fn signed_in() -> Self {
        let p = FakeProvider::default();
        *p.session.borrow_mut() = Some(user_session("ada@example.com"));
        p
    }
}

fn user_session(email: &str) -> Session {
    Session {
        user: User {
            id: Some("u1".into()),
            email: email.into(),
            created_at: Some("2025-09-01T00:00:00Z".into()),
        },
        access_token: Some("token".into()),
        refresh_token: None,
        demo: false,
    }
}

impl AuthProvider for FakeProvider {
    fn get_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.session.borrow().clone())
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email != "ada@example.com" || password != "hunter22" {
            return Err(AuthError::Provider("Invalid login credentials".into()));
        }
        let s = user_session(email);
        *self.session.borrow_mut() = Some(s.clone());
        self.listeners.emit(AuthEvent::SignedIn, Some(&s));
        Ok(s)
    }

    fn sign_up(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        Err(AuthError::Provider("User already registered".into()))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if self.offline.get() {
            return Err(AuthError::Provider("error sending request".into()));
        }
        self.sign_outs.set(self.sign_outs.get() + 1);
        *self.session.borrow_mut() = None;
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn update_password(&self, password: &str) -> Result<(), AuthError> {
        self.password_updates.borrow_mut().push(password.to_string());
        Ok(())
    }

    fn on_auth_state_change(&self, listener: Listener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }
}

#[test]
fn no_session_without_flag_or_provider() {
    let storage = MemoryStorage::new();
    let gate = SessionGate::new(&storage, None);
    assert!(gate.current().unwrap().is_none());
    assert!(matches!(
        gate.sign_in("ada@example.com", "hunter22"),
        Err(AuthError::NoProvider)
    ));
}

#[test]
fn demo_credentials_set_the_flag() {
    let storage = MemoryStorage::new();
    let gate = SessionGate::new(&storage, None);
    let session = gate.sign_in(" demo@student.com ", "demo123").unwrap();
    assert!(session.demo);
    assert_eq!(storage.get(KEY_DEMO_SESSION).unwrap().as_deref(), Some("true"));
    assert_eq!(gate.current().unwrap(), Some(Session::demo()));

    gate.sign_out().unwrap();
    assert!(storage.get(KEY_DEMO_SESSION).unwrap().is_none());
    assert!(gate.current().unwrap().is_none());
}

#[test]
fn demo_sign_in_ends_the_provider_session() {
    let storage = MemoryStorage::new();
    let provider = FakeProvider::signed_in();
    let gate = SessionGate::new(&storage, Some(&provider));
    gate.sign_in("demo@student.com", "demo123").unwrap();
    assert_eq!(provider.sign_outs.get(), 1);
    assert!(provider.get_session().unwrap().is_none());
    assert!(gate.current().unwrap().unwrap().demo);
}

#[test]
fn demo_sign_in_works_while_the_provider_is_unreachable() {
    let storage = MemoryStorage::new();
    storage.set(KEY_AUTH_SESSION, r#"{"user":{"email":"ada@example.com"}}"#).unwrap();
    let provider = FakeProvider::signed_in();
    provider.offline.set(true);
    let gate = SessionGate::new(&storage, Some(&provider));
    let session = gate.sign_in("demo@student.com", "demo123").unwrap();
    assert!(session.demo);
    assert!(storage.get(KEY_AUTH_SESSION).unwrap().is_none());
    assert_eq!(storage.get(KEY_DEMO_SESSION).unwrap().as_deref(), Some("true"));
    assert!(gate.current().unwrap().unwrap().demo);
}

#[test]
fn demo_flag_takes_precedence() {
    let storage = MemoryStorage::new();
    storage.set(KEY_DEMO_SESSION, "true").unwrap();
    storage.set(KEY_AUTH_SESSION, "{}").unwrap();
    let provider = FakeProvider::signed_in();
    let gate = SessionGate::new(&storage, Some(&provider));
    let session = gate.current().unwrap().unwrap();
    assert!(session.demo);

    gate.sign_out().unwrap();
    assert_eq!(provider.sign_outs.get(), 0);
    assert_eq!(
        gate.current().unwrap().map(|s| s.user.email),
        Some("ada@example.com".to_string())
    );
}

#[test]
fn provider_sign_in_and_events() {
    let storage = MemoryStorage::new();
    let provider = FakeProvider::default();
    let events = std::rc::Rc::new(RefCell::new(Vec::new()));
    let seen = events.clone();
    let sub = provider.on_auth_state_change(Box::new(move |e, _| seen.borrow_mut().push(e)));
    let gate = SessionGate::new(&storage, Some(&provider));

    let err = gate.sign_in("ada@example.com", "wrong").unwrap_err();
    assert_eq!(err.to_string(), "Invalid login credentials");

    let s = gate.sign_in("ada@example.com", "hunter22").unwrap();
    assert!(!s.demo);
    gate.sign_out().unwrap();
    sub.unsubscribe();
    gate.sign_in("ada@example.com", "hunter22").unwrap();
    assert_eq!(*events.borrow(), [AuthEvent::SignedIn, AuthEvent::SignedOut]);
}

#[test]
fn sign_up_error_is_shown_verbatim() {
    let storage = MemoryStorage::new();
    let provider = FakeProvider::default();
    let gate = SessionGate::new(&storage, Some(&provider));
    let err = gate.sign_up("ada@example.com", "hunter22").unwrap_err();
    assert_eq!(err.to_string(), "User already registered");
}

#[test]
fn password_change_is_validated_locally() {
    let storage = MemoryStorage::new();
    let provider = FakeProvider::signed_in();
    let gate = SessionGate::new(&storage, Some(&provider));
    assert!(matches!(
        gate.change_password("abcdef", "abcdeg"),
        Err(AuthError::PasswordMismatch)
    ));
    assert!(matches!(
        gate.change_password("abc", "abc"),
        Err(AuthError::PasswordTooShort(6))
    ));
    assert!(provider.password_updates.borrow().is_empty());
    gate.change_password("abcdef", "abcdef").unwrap();
    assert_eq!(*provider.password_updates.borrow(), ["abcdef"]);
}

#[test]
fn demo_password_change_skips_the_provider() {
    let storage = MemoryStorage::new();
    let provider = FakeProvider::default();
    let gate = SessionGate::new(&storage, Some(&provider));
    gate.sign_in("demo@student.com", "demo123").unwrap();
    gate.change_password("newpass", "newpass").unwrap();
    assert!(provider.password_updates.borrow().is_empty());
}
