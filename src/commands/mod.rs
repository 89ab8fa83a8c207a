// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod account;
pub mod dashboard;
pub mod transactions;
pub mod calendar;
pub mod budgets;
pub mod goals;
pub mod subscriptions;
pub mod categories;
pub mod settings;
pub mod reports;
